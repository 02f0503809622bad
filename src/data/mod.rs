//! Metadata extraction.
//!
//! This module walks an HDF5 file and turns every group and dataset into an
//! owned metadata record keyed by its path.

mod attribute;
mod dtype;
mod extract;
mod metadata;
mod node;
mod raw;
mod reader;

pub use attribute::{extract_attributes, AttrValue, Scalar};
pub use dtype::{compression_of, Compression, TypeCode};
pub use extract::{extract_dataset_metadata, extract_file_metadata, extract_group_metadata};
pub use metadata::{HdfMetadata, NodeRecords};
pub use node::{
    parent_path, Attributes, DatasetRecord, FileRecord, GroupRecord, NodeRecord, NodeType,
};
pub use reader::{execute_extractor, extract_hdf_main, DataReader};
