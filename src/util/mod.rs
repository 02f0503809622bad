//! Utility functions.
//!
//! This module provides output configuration and JSON rendering for
//! extraction results.

mod output_config;

pub use output_config::OutputConfig;

use crate::data::HdfMetadata;
use crate::error::Result;
use std::io::Write;

/// Render metadata as a JSON document.
pub fn render_json(metadata: &HdfMetadata, config: &OutputConfig) -> Result<String> {
    let mut text = if config.pretty {
        serde_json::to_string_pretty(metadata)?
    } else {
        serde_json::to_string(metadata)?
    };

    if config.trailing_newline {
        text.push('\n');
    }

    Ok(text)
}

/// Write metadata as JSON to `out`.
pub fn write_json<W: Write>(
    out: &mut W,
    metadata: &HdfMetadata,
    config: &OutputConfig,
) -> Result<()> {
    out.write_all(render_json(metadata, config)?.as_bytes())?;
    out.flush()?;
    Ok(())
}
