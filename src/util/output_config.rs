//! Output configuration for rendering extraction results.

/// Configuration for JSON rendering.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Indent nested objects instead of printing a single line.
    pub pretty: bool,
    /// Append a trailing newline after the document.
    pub trailing_newline: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            trailing_newline: true,
        }
    }
}

impl OutputConfig {
    /// Single-line output, as used for piping into other tools.
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }
}
