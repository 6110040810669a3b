//! Error types for the converter
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Every variant besides `Io` and `HeaderEncode` is a structural format or
//! configuration error: unrecoverable for the run, no retry, no
//! skip-and-continue. A misaligned block invalidates every block boundary
//! after it, so the whole conversion aborts before any output is written.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for converter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the converter
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Source path resolves to nothing: neither a file nor any `.N` fragment
    #[error("no snapshot fragments found for base path {base:?}")]
    NoFragmentsFound {
        /// Base path as configured
        base: PathBuf,
    },

    /// Header block length or structural sentinel invalid
    #[error("malformed header in fragment {fragment}: {reason}")]
    MalformedHeader {
        /// Fragment index in locator order
        fragment: usize,
        /// What was inconsistent
        reason: String,
    },

    /// A data block's byte length disagrees with the count implied by the header
    #[error("{block} block length mismatch in fragment {fragment}: expected {expected} bytes, found {actual}")]
    BlockLengthMismatch {
        /// Block name (Position, Velocity, ID, Mass)
        block: &'static str,
        /// Fragment index in locator order
        fragment: usize,
        /// Byte length implied by the fragment header
        expected: u64,
        /// Byte length declared by the record marker
        actual: u64,
    },

    /// Sum of per-fragment counts disagrees with the header-declared 64-bit total
    #[error("particle count mismatch for type {ptype}: header declares {declared}, fragments contain {actual}")]
    CountMismatch {
        /// Particle type index (0-5)
        ptype: usize,
        /// Total reconstructed from the header's low/high words
        declared: u64,
        /// Total accumulated across fragments
        actual: u64,
    },

    /// Configuration names a unit system outside {Mpc, Kpc}
    #[error("unsupported unit system {0:?} (expected \"Mpc\" or \"Kpc\")")]
    UnsupportedUnitSystem(String),

    /// Subsample stride of zero requested
    #[error("invalid subsample stride {0} (must be at least 1)")]
    InvalidSubsampleStride(u64),

    /// Dataset header record could not be serialized
    #[error("failed to encode dataset header: {0}")]
    HeaderEncode(String),

    /// Container data failed a structural check on read-back
    #[error("data corruption: {0}")]
    Corruption(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::HeaderEncode(e.to_string())
    }
}
