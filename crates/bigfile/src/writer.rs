//! Columnar dataset writer
//!
//! Implements the `DatasetSink` contract: one directory per dataset under
//! the destination root, one column file per selected column, plus the
//! `header.json` metadata record. Directory creation is this crate's job;
//! the engine only supplies consistent, unit-correct buffers.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, WriteBytesExt};
use snapconv_core::{ColumnData, ColumnPayload, DatasetSink, Result, SnapshotMetadata};
use tracing::info;

use crate::format::{ColumnDescriptor, Dtype};

/// Name of the per-dataset metadata record file
pub const HEADER_RECORD: &str = "header.json";

/// Writes datasets under a destination root directory
pub struct BigfileWriter {
    root: PathBuf,
}

impl BigfileWriter {
    /// Create a writer rooted at `root`, creating the directory if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(BigfileWriter { root })
    }

    /// Destination root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn write_column(&self, dir: &Path, column: &ColumnData<'_>) -> Result<()> {
        let (dtype, rows) = match column.payload {
            ColumnPayload::F32(v) => (Dtype::F32, v.len() / column.nmemb as usize),
            ColumnPayload::U32(v) => (Dtype::U32, v.len() / column.nmemb as usize),
        };
        let descriptor = ColumnDescriptor::new(dtype, column.nmemb, rows as u64);

        let file = File::create(dir.join(column.name))?;
        let mut out = BufWriter::new(file);
        out.write_all(&descriptor.to_bytes())?;
        match column.payload {
            ColumnPayload::F32(values) => {
                for &v in values {
                    out.write_f32::<LittleEndian>(v)?;
                }
            }
            ColumnPayload::U32(values) => {
                for &v in values {
                    out.write_u32::<LittleEndian>(v)?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}

impl DatasetSink for BigfileWriter {
    fn write_dataset(
        &mut self,
        dataset: &str,
        columns: &[ColumnData<'_>],
        header: &SnapshotMetadata,
    ) -> Result<()> {
        let dir = self.root.join(dataset);
        fs::create_dir_all(&dir)?;

        for column in columns {
            self.write_column(&dir, column)?;
        }

        let json = serde_json::to_vec_pretty(header)?;
        fs::write(dir.join(HEADER_RECORD), json)?;

        let rows = columns.first().map(|c| c.rows()).unwrap_or(0);
        info!(dataset, columns = columns.len(), rows, "wrote dataset");
        Ok(())
    }
}
