//! HDF5 file reader.
//!
//! The reader walks the file breadth-first with an explicit work queue, so
//! deeply nested files never grow the call stack.

use std::collections::VecDeque;
use std::path::Path;
use std::time::Instant;

use super::extract::{
    child_names, extract_dataset_metadata, extract_file_metadata, extract_group_metadata,
};
use super::{HdfMetadata, NodeRecords};
use crate::error::{H5MetaError, Result};
use hdf5::{Dataset, File, Group, LocationType};

/// A node waiting in the work queue. The root is borrowed from the walk.
#[derive(Debug)]
enum Node {
    File,
    Group(Group),
    Dataset(Dataset),
}

/// HDF5 metadata reader.
#[derive(Debug)]
pub struct DataReader;

impl DataReader {
    /// Extract metadata, reporting open failures as [`H5MetaError::FileOpen`].
    pub fn try_extract(path: &Path) -> Result<HdfMetadata> {
        let started = Instant::now();

        let file = File::open(path).map_err(|e| H5MetaError::file_open(path.to_path_buf(), e))?;
        let hdf = Self::walk(&file)?;
        drop(file);

        let metadata = HdfMetadata::new(hdf, started.elapsed().as_secs_f64());
        tracing::info!(
            "Extracted {} nodes from {} in {:.6}s",
            metadata.len(),
            path.display(),
            metadata.extract_time
        );
        Ok(metadata)
    }

    /// Extract metadata, degrading to an empty result when the file cannot be
    /// opened. Any failure after the file is open is returned as an error.
    pub fn extract(path: &Path) -> Result<HdfMetadata> {
        let started = Instant::now();

        match Self::try_extract(path) {
            Err(err) if err.is_open_failure() => {
                tracing::warn!("{}; returning empty metadata", err);
                Ok(HdfMetadata::empty(started.elapsed().as_secs_f64()))
            },
            other => other,
        }
    }

    /// Breadth-first walk from the root. Group and dataset handles are
    /// released as soon as their record is built.
    fn walk(file: &File) -> Result<NodeRecords> {
        let mut records = NodeRecords::new();
        let mut unprocessed = VecDeque::from([Node::File]);

        while let Some(current) = unprocessed.pop_front() {
            match current {
                Node::File => {
                    let record = extract_file_metadata(file)?;
                    tracing::debug!("Visited file root {}", record.name());
                    records.insert(record.name().to_string(), record);
                    Self::enqueue_children(file, &child_names(file)?, &mut unprocessed)?;
                },
                Node::Group(group) => {
                    let record = extract_group_metadata(&group)?;
                    tracing::debug!("Visited group {}", record.name());
                    let keys = record.keys().unwrap_or_default();
                    Self::enqueue_children(&group, keys, &mut unprocessed)?;
                    records.insert(record.name().to_string(), record);
                },
                Node::Dataset(dataset) => {
                    let record = extract_dataset_metadata(&dataset)?;
                    tracing::debug!("Visited dataset {}", record.name());
                    records.insert(record.name().to_string(), record);
                },
            }
        }

        Ok(records)
    }

    fn enqueue_children(
        group: &Group,
        names: &[String],
        unprocessed: &mut VecDeque<Node>,
    ) -> Result<()> {
        for name in names {
            match group.loc_type_by_name(name)? {
                LocationType::Group => unprocessed.push_back(Node::Group(group.group(name)?)),
                LocationType::Dataset => {
                    unprocessed.push_back(Node::Dataset(group.dataset(name)?))
                },
                other => {
                    tracing::debug!("Skipping {}/{} ({:?})", group.name(), name, other);
                },
            }
        }
        Ok(())
    }
}

/// Extract the metadata of one HDF5 file.
///
/// A file that cannot be opened yields an empty `hdf` mapping rather than an
/// error.
pub fn extract_hdf_main(hdf_file_path: impl AsRef<Path>) -> Result<HdfMetadata> {
    DataReader::extract(hdf_file_path.as_ref())
}

/// Run an extraction for a user supplied path.
///
/// Returns `Ok(None)` when the path is empty or does not exist. On success
/// `extract_time` covers the whole call.
pub fn execute_extractor(filename: impl AsRef<Path>) -> Result<Option<HdfMetadata>> {
    let started = Instant::now();
    let path = filename.as_ref();

    if path.as_os_str().is_empty() || !path.exists() {
        tracing::debug!("Nothing to extract for {:?}", path);
        return Ok(None);
    }

    let mut metadata = extract_hdf_main(path)?;
    metadata.extract_time = started.elapsed().as_secs_f64();
    Ok(Some(metadata))
}
