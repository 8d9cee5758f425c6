//! Reading result trees and scenario sources from disk.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::diagnostics::{ReportError, Result};
use crate::render::Sources;
use crate::suite::Suite;

/// Serialization formats accepted for result trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// Loads a result tree, choosing the format from the file extension.
pub fn load_suite(path: &Path) -> Result<Suite> {
    let format = Format::from_path(path).ok_or_else(|| ReportError::Parse {
        path: path.to_path_buf(),
        message: "unrecognised file extension".to_string(),
    })?;
    let text = std::fs::read_to_string(path).map_err(|source| ReportError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let suite = parse_suite(&text, format, path)?;
    debug!(
        path = %path.display(),
        status = %suite.status,
        files = suite.files.len(),
        "loaded test results"
    );
    Ok(suite)
}

/// Parses a result tree. `path` is only used in error messages.
pub fn parse_suite(text: &str, format: Format, path: &Path) -> Result<Suite> {
    let parsed = match format {
        Format::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ReportError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Reads every file under `root`, keyed by its path relative to `root`
/// with `/` separators.
pub fn load_sources(root: &Path) -> Result<Sources> {
    let sources_err = |source| ReportError::Sources {
        path: root.to_path_buf(),
        source,
    };

    let mut sources = Sources::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| sources_err(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let bytes = std::fs::read(entry.path()).map_err(sources_err)?;
        sources.insert(source_key(root, entry.path()), bytes);
    }
    debug!(root = %root.display(), files = sources.len(), "loaded scenario sources");
    Ok(sources)
}

fn source_key(root: &Path, path: &Path) -> String {
    let relative: PathBuf = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
