//! Extraction result.

use indexmap::IndexMap;
use serde::Serialize;

use super::NodeRecord;

/// Records of one file, keyed by node path in traversal order.
pub type NodeRecords = IndexMap<String, NodeRecord>;

/// Metadata extracted from one HDF5 file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HdfMetadata {
    /// Node path to record. Empty when the file could not be opened.
    pub hdf: NodeRecords,
    /// Seconds spent extracting.
    #[serde(rename = "extract time")]
    pub extract_time: f64,
}

impl HdfMetadata {
    /// Create a new result.
    pub fn new(hdf: NodeRecords, extract_time: f64) -> Self {
        Self { hdf, extract_time }
    }

    /// Result of a file that could not be opened.
    pub fn empty(extract_time: f64) -> Self {
        Self::new(NodeRecords::new(), extract_time)
    }

    /// Check if no node was extracted.
    pub fn is_empty(&self) -> bool {
        self.hdf.is_empty()
    }

    /// Number of extracted nodes.
    pub fn len(&self) -> usize {
        self.hdf.len()
    }

    /// Record stored under `path`.
    pub fn get(&self, path: &str) -> Option<&NodeRecord> {
        self.hdf.get(path)
    }

    /// Node paths in traversal order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.hdf.keys().map(String::as_str)
    }
}
