//! Turning run diagnostics into text for report bodies.

use std::collections::HashMap;

use crate::suite::Diagnostic;

pub mod plain;

pub use plain::{PlainRenderer, DEFAULT_WRAP_WIDTH};

/// Raw source bytes keyed by file name, used only to show source context.
pub type Sources = HashMap<String, Vec<u8>>;

/// Renders a single diagnostic as text.
///
/// Implementations must not fail: a diagnostic whose source cannot be found
/// is rendered without source context.
pub trait RenderDiagnostic {
    fn render(&self, diagnostic: &Diagnostic, sources: &Sources) -> String;
}
