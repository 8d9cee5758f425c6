//! Persisting rendered reports.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::diagnostics::{ReportError, Result};
use crate::junit::JUnitReport;
use crate::render::{PlainRenderer, RenderDiagnostic, Sources};
use crate::suite::Suite;

/// Something a finished suite can be saved as.
pub trait Artifact {
    fn save(&self, suite: &Suite) -> Result<()>;
}

/// Writes a JUnit XML report to a fixed path.
pub struct JUnitXmlFile<R = PlainRenderer> {
    path: PathBuf,
    sources: Sources,
    report: JUnitReport<R>,
}

impl JUnitXmlFile {
    pub fn new(path: impl Into<PathBuf>, sources: Sources) -> Self {
        Self::with_renderer(path, sources, PlainRenderer::default())
    }
}

impl<R> JUnitXmlFile<R> {
    pub fn with_renderer(path: impl Into<PathBuf>, sources: Sources, renderer: R) -> Self
    where
        R: RenderDiagnostic,
    {
        Self {
            path: path.into(),
            sources,
            report: JUnitReport::new(renderer),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes already-rendered bytes, replacing any existing file. Safe to
    /// call again after a failure.
    pub fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        let save_err = |source| ReportError::Save {
            path: self.path.clone(),
            source,
        };

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o660);
        }

        let mut file = options.open(&self.path).map_err(save_err)?;
        file.write_all(bytes).map_err(save_err)?;
        info!(path = %self.path.display(), bytes = bytes.len(), "wrote JUnit XML report");
        Ok(())
    }
}

impl<R: RenderDiagnostic> Artifact for JUnitXmlFile<R> {
    fn save(&self, suite: &Suite) -> Result<()> {
        if suite.is_pending() {
            return Err(ReportError::PendingSuite);
        }
        let xml = self.report.render(suite, &self.sources)?;
        self.write_bytes(&xml)
    }
}
