//! The Verdict Command-Line Interface.
//!
//! This module dispatches parsed arguments to the library: loading results,
//! rendering reports and printing summaries.

use std::io::Write;
use std::process::ExitCode;

use termcolor::StandardStream;

use crate::artifact::{Artifact, JUnitXmlFile};
use crate::config::ReportConfig;
use crate::diagnostics::{ReportError, Result};
use crate::junit::JUnitReport;
use crate::loader::{load_sources, load_suite};
use crate::render::Sources;

pub mod args;
pub mod output;

use args::{Command, VerdictArgs};

/// Runs a parsed command line.
pub fn run(args: VerdictArgs) -> Result<ExitCode> {
    let mut config = ReportConfig::default();
    if args.no_color {
        config.use_colors = false;
    }

    match args.command {
        Command::Render {
            results,
            sources,
            output,
            width,
        } => {
            config.wrap_width = width;
            let suite = load_suite(&results)?;
            let sources = match sources {
                Some(dir) => load_sources(&dir)?,
                None => Sources::new(),
            };

            match output {
                Some(path) => {
                    JUnitXmlFile::with_renderer(path, sources, config.renderer()).save(&suite)?
                }
                None => {
                    let xml = JUnitReport::new(config.renderer()).render(&suite, &sources)?;
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&xml).map_err(ReportError::Output)?;
                    stdout.flush().map_err(ReportError::Output)?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Summary { results } => {
            let suite = load_suite(&results)?;
            let mut stdout = StandardStream::stdout(config.color_choice());
            let totals = output::write_summary(&mut stdout, &suite).map_err(ReportError::Output)?;
            if totals.has_failures() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
