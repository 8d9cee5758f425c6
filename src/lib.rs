//! Verdict renders the results of declarative test scenarios as JUnit XML.
//!
//! The input is a finished [`Suite`]: files, the runs each file declared,
//! and the diagnostics each run produced. [`junit_xml_report`] turns it into
//! a byte-reproducible document; [`artifact::JUnitXmlFile`] writes it out.

pub use crate::diagnostics::{ReportError, Result};
pub use crate::junit::{junit_xml_report, JUnitReport, FAILED_TEST_SUMMARY};
pub use crate::render::{PlainRenderer, RenderDiagnostic, Sources};
pub use crate::suite::{
    Diagnostic, ExecutionMeta, File, Pos, Run, Severity, SourceRange, Status, Suite,
};

pub mod artifact;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod junit;
pub mod loader;
pub mod render;
pub mod suite;
