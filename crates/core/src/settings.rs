//! Converter configuration
//!
//! `Settings` is built once (from CLI arguments or directly in tests) and is
//! immutable afterwards. Validation happens at construction so the pipeline
//! never sees an invalid stride.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::units::UnitSystem;

/// Immutable converter configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Snapshot base path (excluding any `.N` fragment suffix)
    pub source: PathBuf,
    /// Output container root path
    pub dest: PathBuf,
    /// Override for the initial-condition time; defaults to the snapshot time
    pub time_ic: Option<f64>,
    /// Length unit system for the output metadata
    pub unit_system: UnitSystem,
    /// Optional decimation stride (keep every n-th particle per type)
    pub subsample: Option<u64>,
}

impl Settings {
    /// Build a validated configuration
    ///
    /// Fails with `InvalidSubsampleStride` when a stride of zero is
    /// requested.
    pub fn new(
        source: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
        time_ic: Option<f64>,
        unit_system: UnitSystem,
        subsample: Option<u64>,
    ) -> Result<Self> {
        if let Some(0) = subsample {
            return Err(Error::InvalidSubsampleStride(0));
        }
        Ok(Settings {
            source: source.into(),
            dest: dest.into(),
            time_ic,
            unit_system,
            subsample,
        })
    }

    /// Effective stride: `None` and `Some(1)` are both no-ops
    pub fn effective_stride(&self) -> Option<u64> {
        match self.subsample {
            None | Some(1) => None,
            other => other,
        }
    }
}
