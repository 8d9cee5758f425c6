//! Output configuration shared by the CLI commands.

use termcolor::ColorChoice;

use crate::render::{PlainRenderer, DEFAULT_WRAP_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    /// Column width diagnostics are wrapped to in report bodies.
    pub wrap_width: usize,
    /// Colourise terminal summaries. Never affects report bytes.
    pub use_colors: bool,
}

impl ReportConfig {
    pub fn renderer(&self) -> PlainRenderer {
        PlainRenderer::new(self.wrap_width)
    }

    pub fn color_choice(&self) -> ColorChoice {
        if self.use_colors {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}
