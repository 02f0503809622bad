//! Error types for h5meta.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for h5meta operations.
pub type Result<T> = std::result::Result<T, H5MetaError>;

/// Errors that can occur while extracting metadata.
#[derive(Debug, Error)]
pub enum H5MetaError {
    /// Failed to open a file as an HDF5 container.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// Path that was handed to the HDF5 library.
        path: PathBuf,
        /// Underlying library error.
        #[source]
        source: hdf5::Error,
    },

    /// HDF5 library error raised while reading an already opened file.
    #[error("HDF5 error: {0}")]
    Hdf5(String),

    /// Attribute whose value the HDF5 library failed to read.
    #[error("Cannot read attribute '{name}' on {path}: {dtype}")]
    UnsupportedAttribute {
        /// Path of the node that owns the attribute.
        path: String,
        /// Attribute name.
        name: String,
        /// Rendering of the attribute's HDF5 type.
        dtype: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl H5MetaError {
    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: hdf5::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create an UnsupportedAttribute error.
    pub fn unsupported_attribute(
        path: impl Into<String>,
        name: impl Into<String>,
        dtype: impl Into<String>,
    ) -> Self {
        Self::UnsupportedAttribute {
            path: path.into(),
            name: name.into(),
            dtype: dtype.into(),
        }
    }

    /// Whether this error came from opening the container.
    pub fn is_open_failure(&self) -> bool {
        matches!(self, Self::FileOpen { .. })
    }
}

impl From<hdf5::Error> for H5MetaError {
    fn from(err: hdf5::Error) -> Self {
        Self::Hdf5(err.to_string())
    }
}
