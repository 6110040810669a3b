//! Core types and traits for snapconv
//!
//! This crate defines the foundational types used throughout the converter:
//! - ParticleType: one of the 6 fixed particle kinds
//! - Column / TypeColumns / SnapshotColumns: the staged column model
//! - UnitSystem: the two supported length unit systems and CGS constants
//! - Settings: immutable run configuration
//! - SnapshotMetadata: the normalized header record attached to every dataset
//! - DatasetSink: the columnar writer contract
//! - Error: the converter error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod metadata;
pub mod settings;
pub mod traits;
pub mod types;
pub mod units;

pub use error::{Error, Result};
pub use metadata::SnapshotMetadata;
pub use settings::Settings;
pub use traits::DatasetSink;
pub use types::{
    Column, ColumnData, ColumnPayload, ParticleType, SnapshotColumns, TypeColumns,
    NUM_PARTICLE_TYPES,
};
pub use units::{
    UnitSystem, UNIT_LENGTH_KPC_CM, UNIT_LENGTH_MPC_CM, UNIT_MASS_G, UNIT_VELOCITY_CM_PER_S,
};
