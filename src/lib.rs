//! snapconv — Gadget-1 snapshot to columnar container converter
//!
//! Reads one or many binary Gadget-1 snapshot fragments (a metadata-free,
//! fixed-block legacy layout), reconstructs typed per-particle-type columns,
//! normalizes units, velocity convention, and global metadata, optionally
//! subsamples, and writes one columnar dataset per active particle type.
//!
//! This crate re-exports the workspace surface:
//! - [`snapconv_core`]: types, errors, configuration, the writer contract
//! - [`snapconv_gadget`]: the legacy format reader
//! - [`snapconv_engine`]: normalization, conversion, and the pipeline
//! - [`snapconv_bigfile`]: the concrete columnar writer

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use snapconv_bigfile::{read_column, read_header_record, BigfileWriter, ColumnValues};
pub use snapconv_core::{
    Column, DatasetSink, Error, ParticleType, Result, Settings, SnapshotMetadata, UnitSystem,
};
pub use snapconv_engine::{convert, ConvertSummary};
pub use snapconv_gadget::{locate_fragments, read_snapshot, Snapshot, SnapshotHeader};
