//! Normalized dataset metadata
//!
//! The legacy header is raw and lossy (32-bit split counts, no units). The
//! converter derives this record once, from the parsed header plus the
//! configuration, and attaches it verbatim to every output dataset. It is
//! never mutated after construction.

use serde::{Deserialize, Serialize};

use crate::types::NUM_PARTICLE_TYPES;

/// Write-once header record attached to every output dataset
///
/// Field names serialize to the attribute names downstream simulation codes
/// expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Per-type constant mass; zero means explicit per-particle masses
    #[serde(rename = "MassTable")]
    pub mass_table: [f64; NUM_PARTICLE_TYPES],
    /// Reconstructed 64-bit total particle count per type
    #[serde(rename = "TotNumPart")]
    pub tot_num_part: [u64; NUM_PARTICLE_TYPES],
    /// Initial total per type (same reconstruction; no particles are created
    /// or destroyed by this converter)
    #[serde(rename = "TotNumPartInit")]
    pub tot_num_part_init: [u64; NUM_PARTICLE_TYPES],
    /// Comoving box side length in configured length units
    #[serde(rename = "BoxSize")]
    pub box_size: f64,
    /// Cosmological scale factor at the snapshot epoch
    #[serde(rename = "Time")]
    pub time: f64,
    /// Scale factor of the simulation's initial conditions
    #[serde(rename = "TimeIC")]
    pub time_ic: f64,
    /// Velocity unit in cm/s
    #[serde(rename = "UnitVelocity_in_cm_per_s")]
    pub unit_velocity_in_cm_per_s: f64,
    /// Length unit in cm, resolved from the configured unit system
    #[serde(rename = "UnitLength_in_cm")]
    pub unit_length_in_cm: f64,
    /// Mass unit in grams
    #[serde(rename = "UnitMass_in_g")]
    pub unit_mass_in_g: f64,
    /// Always true: output velocities are true peculiar velocities
    #[serde(rename = "UsePeculiarVelocity")]
    pub use_peculiar_velocity: bool,
}

impl SnapshotMetadata {
    /// Total particle count summed over all types
    pub fn total_particles(&self) -> u64 {
        self.tot_num_part.iter().sum()
    }

    /// Indices of types with a nonzero total count
    pub fn active_type_indices(&self) -> Vec<usize> {
        (0..NUM_PARTICLE_TYPES)
            .filter(|&t| self.tot_num_part[t] > 0)
            .collect()
    }
}
