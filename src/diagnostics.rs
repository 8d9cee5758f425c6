//! Error type for report generation and persistence.
//!
//! Every fallible operation in the crate returns [`ReportError`]. The type
//! derives `miette::Diagnostic` so the CLI can print it with codes and help
//! text, and it keeps rendering failures (`Encode`) distinct from
//! persistence failures (`Save`) so callers can retry only the write.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T, E = ReportError> = std::result::Result<T, E>;

#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    /// Rendering was requested before the suite finished executing.
    #[error("Cannot write test results from a pending test suite to JUnit XML output file")]
    #[diagnostic(
        code(verdict::pending),
        help(
            "Test suites must be completed before their results can be written, but a \
             pending test suite was encountered. This is a bug in the caller and should \
             be reported."
        )
    )]
    PendingSuite,

    #[error("error generating JUnit XML test output")]
    #[diagnostic(code(verdict::encode))]
    Encode(#[source] std::io::Error),

    #[error("error saving JUnit XML to file {path:?}")]
    #[diagnostic(code(verdict::save))]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report output")]
    #[diagnostic(code(verdict::output))]
    Output(#[source] std::io::Error),

    #[error("failed to read test results from {path:?}")]
    #[diagnostic(code(verdict::load))]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse test results in {path:?}: {message}")]
    #[diagnostic(
        code(verdict::parse),
        help("test results must be JSON (.json) or YAML (.yaml, .yml)")
    )]
    Parse { path: PathBuf, message: String },

    #[error("failed to read source files under {path:?}")]
    #[diagnostic(code(verdict::sources))]
    Sources {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// True for errors raised before any XML was produced because the caller
    /// broke the rendering contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, ReportError::PendingSuite)
    }
}
