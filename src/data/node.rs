//! Metadata record types, one per visited node.

use indexmap::IndexMap;
use serde::Serialize;

use super::{AttrValue, Compression};

/// Attributes of a single node, in the order the file lists them.
pub type Attributes = IndexMap<String, AttrValue>;

/// Type of node in the HDF5 hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Root node (file level).
    File,
    /// Group node.
    Group,
    /// Dataset node.
    Dataset,
}

/// Extracted metadata for one node.
///
/// Serializes as a flat object whose `type` field carries the variant
/// (`"file"`, `"group"` or `"dataset"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeRecord {
    /// The file root.
    File(FileRecord),
    /// A group.
    Group(GroupRecord),
    /// A dataset.
    Dataset(DatasetRecord),
}

/// Metadata of the file root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRecord {
    /// Path of the root, always `/`.
    pub name: String,
    /// Root attributes.
    pub attributes: Attributes,
}

/// Metadata of a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRecord {
    /// Full path of the group.
    pub name: String,
    /// Group attributes.
    pub attributes: Attributes,
    /// Names of the immediate children, in iteration order.
    pub keys: Vec<String>,
    /// Path of the parent group.
    pub parent: String,
}

/// Metadata of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetRecord {
    /// Full path of the dataset.
    pub name: String,
    /// Dataset attributes.
    pub attributes: Attributes,
    /// Path of the parent group.
    pub parent: String,
    /// Dimension sizes.
    pub shape: Vec<usize>,
    /// NumPy-style type string, e.g. `<f8`.
    pub dtype: String,
    /// Total number of elements.
    pub size: usize,
    /// Total size in bytes (`size` times the item width of `dtype`).
    pub nbytes: usize,
    /// Number of dimensions.
    pub ndim: usize,
    /// Compression codec, `None` when the data is stored uncompressed.
    pub compression: Option<Compression>,
    /// Codec option (gzip level or szip pixels per block).
    pub compression_opts: Option<u32>,
    /// Chunk shape for chunked layouts.
    pub chunks: Option<Vec<usize>>,
}

impl NodeRecord {
    /// Full path of the node.
    pub fn name(&self) -> &str {
        match self {
            NodeRecord::File(r) => &r.name,
            NodeRecord::Group(r) => &r.name,
            NodeRecord::Dataset(r) => &r.name,
        }
    }

    /// Type of the node.
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeRecord::File(_) => NodeType::File,
            NodeRecord::Group(_) => NodeType::Group,
            NodeRecord::Dataset(_) => NodeType::Dataset,
        }
    }

    /// Attributes of the node.
    pub fn attributes(&self) -> &Attributes {
        match self {
            NodeRecord::File(r) => &r.attributes,
            NodeRecord::Group(r) => &r.attributes,
            NodeRecord::Dataset(r) => &r.attributes,
        }
    }

    /// Parent path. The file root has none.
    pub fn parent(&self) -> Option<&str> {
        match self {
            NodeRecord::File(_) => None,
            NodeRecord::Group(r) => Some(&r.parent),
            NodeRecord::Dataset(r) => Some(&r.parent),
        }
    }

    /// Child names of a group record.
    pub fn keys(&self) -> Option<&[String]> {
        match self {
            NodeRecord::Group(r) => Some(&r.keys),
            _ => None,
        }
    }

    /// Check if this record describes a dataset.
    pub fn is_dataset(&self) -> bool {
        matches!(self, NodeRecord::Dataset(_))
    }
}

/// Path of the group containing `path`.
///
/// Top-level nodes (and the root itself) have `/` as parent.
pub fn parent_path(path: &str) -> String {
    match path.trim_end_matches('/').rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}
