//! JUnit XML rendering of a finished [`Suite`].
//!
//! The document shape is fixed:
//!
//! ```text
//! testsuites
//! └── testsuite  name tests skipped failures errors   (one per file, sorted by name)
//!     └── testcase  name classname [time]             (one per run, in run order)
//!         ├── skipped | failure | error               (at most one)
//!         └── system-err                              (only without an error child)
//! ```
//!
//! Rendering happens entirely in memory; writing the bytes somewhere is the
//! job of [`crate::artifact`].

use std::io::{self, Write};

use tracing::debug;

use crate::diagnostics::{ReportError, Result};
use crate::render::{PlainRenderer, RenderDiagnostic, Sources};
use crate::suite::{File, Run, Status, Suite};

pub mod case;
pub mod order;
pub mod xml;

use case::TestCase;
use order::sorted_files;
use xml::XmlWriter;

/// Summary carried by diagnostics that come from failed test assertions.
/// Only these are reported in the body of a `failure` element.
pub const FAILED_TEST_SUMMARY: &str = "Test assertion failed";

/// Renders `suite` as a JUnit XML document using the default plain-text
/// diagnostic renderer.
pub fn junit_xml_report(suite: &Suite, sources: &Sources) -> Result<Vec<u8>> {
    JUnitReport::new(PlainRenderer::default()).render(suite, sources)
}

/// Per-file totals written on the `testsuite` element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteCounts {
    pub tests: usize,
    pub skipped: usize,
    pub failures: usize,
    pub errors: usize,
}

impl SuiteCounts {
    pub fn tally(runs: &[Run]) -> Self {
        let mut counts = Self {
            tests: runs.len(),
            ..Self::default()
        };
        for run in runs {
            match run.status {
                Status::Skip => counts.skipped += 1,
                Status::Fail => counts.failures += 1,
                Status::Error => counts.errors += 1,
                Status::Pass | Status::Pending => {}
            }
        }
        counts
    }
}

/// JUnit XML renderer, parameterised over how diagnostics become text.
#[derive(Debug, Clone, Default)]
pub struct JUnitReport<R = PlainRenderer> {
    renderer: R,
}

impl<R: RenderDiagnostic> JUnitReport<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Renders the whole document. A pending suite is rejected before any
    /// output is produced, and an encoding fault discards the partial
    /// document.
    pub fn render(&self, suite: &Suite, sources: &Sources) -> Result<Vec<u8>> {
        if suite.is_pending() {
            return Err(ReportError::PendingSuite);
        }
        let mut xml = XmlWriter::new(Vec::new());
        self.write_suites(&mut xml, suite, sources)
            .map_err(ReportError::Encode)?;
        Ok(xml.into_inner())
    }

    fn write_suites<W: Write>(
        &self,
        xml: &mut XmlWriter<W>,
        suite: &Suite,
        sources: &Sources,
    ) -> io::Result<()> {
        xml.declaration()?;
        xml.start("testsuites", &[])?;
        for file in sorted_files(&suite.files) {
            self.write_suite(xml, file, sources)?;
        }
        xml.end("testsuites")
    }

    fn write_suite<W: Write>(
        &self,
        xml: &mut XmlWriter<W>,
        file: &File,
        sources: &Sources,
    ) -> io::Result<()> {
        let counts = SuiteCounts::tally(&file.runs);
        debug!(
            file = %file.name,
            tests = counts.tests,
            skipped = counts.skipped,
            failures = counts.failures,
            errors = counts.errors,
            "rendering test suite"
        );

        let tests = counts.tests.to_string();
        let skipped = counts.skipped.to_string();
        let failures = counts.failures.to_string();
        let errors = counts.errors.to_string();
        xml.start(
            "testsuite",
            &[
                ("name", file.name.as_str()),
                ("tests", tests.as_str()),
                ("skipped", skipped.as_str()),
                ("failures", failures.as_str()),
                ("errors", errors.as_str()),
            ],
        )?;
        for run in &file.runs {
            TestCase::from_run(&file.name, run, &self.renderer, sources).write(xml)?;
        }
        xml.end("testsuite")
    }
}
