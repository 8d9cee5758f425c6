//! The in-memory result tree produced by a test execution engine.
//!
//! A [`Suite`] owns every [`File`] that was executed, keyed by file name, and
//! each file owns the [`Run`]s it declared in declaration order. Nothing in
//! this crate mutates the tree; the report writer only reads it.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod diagnostic;

pub use diagnostic::{Diagnostic, Pos, Severity, SourceRange};

// ============================================================================
// STATUS
// ============================================================================

/// Outcome of a suite, file or run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not yet executed.
    #[default]
    Pending,
    Skip,
    Pass,
    Fail,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Skip => "skip",
            Status::Pass => "pass",
            Status::Fail => "fail",
            Status::Error => "error",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RESULT TREE
// ============================================================================

/// The complete result of one test execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Suite {
    #[serde(default)]
    pub status: Status,
    /// Files keyed by name. The map has no ordering; report writers must
    /// sort explicitly.
    #[serde(default)]
    pub files: HashMap<String, File>,
}

impl Suite {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            files: HashMap::new(),
        }
    }

    /// Adds a file, keyed by its own name.
    pub fn with_file(mut self, file: File) -> Self {
        self.files.insert(file.name.clone(), file);
        self
    }

    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }
}

/// One test scenario file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl File {
    pub fn new(name: impl Into<String>, status: Status) -> Self {
        Self {
            name: name.into(),
            status,
            runs: Vec::new(),
        }
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }
}

/// One test case inside a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Run {
    pub name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_meta: Option<ExecutionMeta>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Run {
    pub fn new(name: impl Into<String>, status: Status) -> Self {
        Self {
            name: name.into(),
            status,
            execution_meta: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.execution_meta = Some(ExecutionMeta { duration });
        self
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }
}

/// Timing recorded by the execution engine for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutionMeta {
    pub duration: Duration,
}
