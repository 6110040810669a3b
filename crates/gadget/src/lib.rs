//! Gadget-1 snapshot reader
//!
//! The legacy format is metadata-free: a 256-byte fixed-offset header, then
//! Position, Velocity, ID, and (conditionally) Mass blocks in fixed order,
//! each wrapped in Fortran-style u32 record markers, optionally split across
//! numbered fragment files. This crate turns one snapshot — single file or
//! ordered fragment set — into typed per-particle-type column buffers:
//! - locator: fragment discovery and numeric-order sequencing
//! - header: fixed-layout header parsing and 64-bit count reconstruction
//! - reader: per-fragment block streaming and structural length checks
//! - testing: synthetic fixture construction for tests

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod header;
pub mod locator;
pub mod reader;
pub mod testing;

pub use header::{read_header, SnapshotHeader, HEADER_SIZE};
pub use locator::locate_fragments;
pub use reader::{read_snapshot, Snapshot};
