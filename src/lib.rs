//! h5meta - breadth-first metadata extraction for HDF5 files.
//!
//! h5meta opens an HDF5 file read-only, walks its groups and datasets level by
//! level and returns one metadata record per node, keyed by the node's path.
//!
//! # Features
//!
//! - Breadth-first traversal with an explicit work queue
//! - File, group and dataset records with attributes
//! - Dataset shape, NumPy-style dtype, sizes and compression
//! - JSON output via serde
//!
//! # Example
//!
//! ```ignore
//! use h5meta::data::extract_hdf_main;
//!
//! let metadata = extract_hdf_main("data.h5")?;
//! for (path, record) in &metadata.hdf {
//!     println!("{} ({:?})", path, record.node_type());
//! }
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod data;
pub mod error;
pub mod util;

pub use data::{execute_extractor, extract_hdf_main, HdfMetadata, NodeRecord};
pub use error::{H5MetaError, Result};
