//! Writer contract
//!
//! The pipeline hands fully transformed, unit-correct column buffers to a
//! `DatasetSink`; on-disk layout, chunking, and directory creation are the
//! sink's concern. The seam exists so the engine can be exercised against an
//! in-memory sink in tests.

use crate::error::Result;
use crate::metadata::SnapshotMetadata;
use crate::types::ColumnData;

/// Destination for one columnar dataset per active particle type
pub trait DatasetSink {
    /// Persist one dataset: the selected columns plus the header record
    ///
    /// `dataset` is the particle type's label. Called once per active type,
    /// in ascending type index order, only after the whole pipeline has
    /// succeeded in memory.
    fn write_dataset(
        &mut self,
        dataset: &str,
        columns: &[ColumnData<'_>],
        header: &SnapshotMetadata,
    ) -> Result<()>;
}
