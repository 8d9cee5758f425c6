//! Handles all user-facing terminal output for the CLI.

use std::io::{self, Write};

use termcolor::{Color, ColorSpec, WriteColor};

use crate::junit::order::sorted_files;
use crate::junit::SuiteCounts;
use crate::suite::{Status, Suite};

/// Totals across every file in a suite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub passed: usize,
    pub counts: SuiteCounts,
}

impl Totals {
    pub fn has_failures(&self) -> bool {
        self.counts.failures > 0 || self.counts.errors > 0
    }
}

/// Writes one line per run, in report order, followed by a totals line.
pub fn write_summary<W: WriteColor>(out: &mut W, suite: &Suite) -> io::Result<Totals> {
    let mut totals = Totals::default();

    for file in sorted_files(&suite.files) {
        let counts = SuiteCounts::tally(&file.runs);
        totals.counts.tests += counts.tests;
        totals.counts.skipped += counts.skipped;
        totals.counts.failures += counts.failures;
        totals.counts.errors += counts.errors;

        for run in &file.runs {
            if run.status == Status::Pass {
                totals.passed += 1;
            }
            let (label, color) = status_label(run.status);
            out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
            write!(out, "{label}")?;
            out.reset()?;
            writeln!(out, ": {} [{}]", run.name, file.name)?;
        }
    }

    writeln!(
        out,
        "\nTest summary: total {}, passed {}, failed {}, errored {}, skipped {}",
        totals.counts.tests,
        totals.passed,
        totals.counts.failures,
        totals.counts.errors,
        totals.counts.skipped,
    )?;
    Ok(totals)
}

fn status_label(status: Status) -> (&'static str, Color) {
    match status {
        Status::Pass => ("PASS", Color::Green),
        Status::Fail => ("FAIL", Color::Red),
        Status::Error => ("ERROR", Color::Red),
        Status::Skip => ("SKIP", Color::Yellow),
        Status::Pending => ("PENDING", Color::Cyan),
    }
}
