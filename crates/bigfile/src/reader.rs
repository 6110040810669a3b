//! Column read path
//!
//! Reads back what the writer produced. Used by tests and by downstream
//! tooling that wants to inspect a converted dataset without the producing
//! pipeline.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use snapconv_core::{Error, Result, SnapshotMetadata};

use crate::format::{ColumnDescriptor, Dtype, COLUMN_DESCRIPTOR_SIZE};
use crate::writer::HEADER_RECORD;

/// Decoded column payload
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    /// 32-bit float data
    F32(Vec<f32>),
    /// 32-bit unsigned integer data
    U32(Vec<u32>),
}

/// Read one column file: descriptor plus full payload
pub fn read_column(path: &Path) -> Result<(ColumnDescriptor, ColumnValues)> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut descriptor_bytes = [0u8; COLUMN_DESCRIPTOR_SIZE];
    reader.read_exact(&mut descriptor_bytes)?;
    let descriptor = ColumnDescriptor::from_bytes(&descriptor_bytes).ok_or_else(|| {
        Error::Corruption(format!("invalid column descriptor in {}", path.display()))
    })?;

    let elements = (descriptor.rows * descriptor.nmemb as u64) as usize;
    let values = match descriptor.dtype {
        Dtype::F32 => {
            let mut v = vec![0.0f32; elements];
            reader.read_f32_into::<LittleEndian>(&mut v)?;
            ColumnValues::F32(v)
        }
        Dtype::U32 => {
            let mut v = vec![0u32; elements];
            reader.read_u32_into::<LittleEndian>(&mut v)?;
            ColumnValues::U32(v)
        }
    };
    Ok((descriptor, values))
}

/// Read a dataset's metadata record
pub fn read_header_record(dataset_dir: &Path) -> Result<SnapshotMetadata> {
    let bytes = fs::read(dataset_dir.join(HEADER_RECORD))?;
    Ok(serde_json::from_slice(&bytes)?)
}
