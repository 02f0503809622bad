//! Per-node metadata extraction.
//!
//! Each extractor reads one open HDF5 object and returns an owned
//! [`NodeRecord`] that no longer refers to the file.

use super::attribute::extract_attributes;
use super::dtype::{compression_of, TypeCode};
use super::node::{parent_path, DatasetRecord, FileRecord, GroupRecord, NodeRecord};
use crate::error::Result;
use hdf5::{Dataset, File, Group};

/// Extract the record of the file root.
pub fn extract_file_metadata(file: &File) -> Result<NodeRecord> {
    Ok(NodeRecord::File(FileRecord {
        name: file.name(),
        attributes: extract_attributes(file)?,
    }))
}

/// Extract the record of a group.
pub fn extract_group_metadata(group: &Group) -> Result<NodeRecord> {
    let name = group.name();
    let parent = parent_path(&name);

    Ok(NodeRecord::Group(GroupRecord {
        attributes: extract_attributes(group)?,
        keys: child_names(group)?,
        parent,
        name,
    }))
}

/// Extract the record of a dataset.
pub fn extract_dataset_metadata(dataset: &Dataset) -> Result<NodeRecord> {
    let name = dataset.name();
    let parent = parent_path(&name);

    let shape = dataset.shape();
    let dtype = TypeCode::of(&dataset.dtype()?);
    let size = dataset.size();
    let (compression, compression_opts) = match compression_of(&dataset.filters()) {
        Some((codec, opts)) => (Some(codec), opts),
        None => (None, None),
    };

    Ok(NodeRecord::Dataset(DatasetRecord {
        attributes: extract_attributes(dataset)?,
        parent,
        ndim: shape.len(),
        shape,
        dtype: dtype.to_string(),
        size,
        nbytes: byte_count(&name, size, dtype.width()),
        compression,
        compression_opts,
        chunks: dataset.chunk(),
        name,
    }))
}

/// Names of the links in `group`, in creation order when the group tracks
/// it and in name order otherwise.
pub(crate) fn child_names(group: &Group) -> Result<Vec<String>> {
    let mut links = group.iter_visit_default(Vec::new(), |_, name, info, links| {
        links.push((info.creation_order, name.to_owned()));
        true
    })?;

    if links.iter().all(|(order, _)| order.is_some()) {
        links.sort_by_key(|(order, _)| *order);
    }
    Ok(links.into_iter().map(|(_, name)| name).collect())
}

/// Storage size of `size` items of `width` bytes, saturating on overflow.
fn byte_count(name: &str, size: usize, width: usize) -> usize {
    size.checked_mul(width).unwrap_or_else(|| {
        tracing::warn!("Byte size of {} overflows; reporting {}", name, usize::MAX);
        usize::MAX
    })
}
