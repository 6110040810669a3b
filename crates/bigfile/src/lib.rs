//! Columnar container for snapconv
//!
//! The concrete `DatasetSink`: one directory per dataset (particle type),
//! one descriptor-prefixed little-endian file per column, and a
//! `header.json` metadata record per dataset.
//!
//! - format: the 24-byte column descriptor
//! - writer: the `BigfileWriter` sink
//! - reader: the read path used by tests and inspection tooling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod format;
pub mod reader;
pub mod writer;

pub use format::{ColumnDescriptor, Dtype, COLUMN_DESCRIPTOR_SIZE, COLUMN_FORMAT_VERSION};
pub use reader::{read_column, read_header_record, ColumnValues};
pub use writer::{BigfileWriter, HEADER_RECORD};
