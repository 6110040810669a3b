//! Metadata normalization
//!
//! Derives the write-once `SnapshotMetadata` record from the parsed header
//! plus the run configuration. The legacy header is never mutated and the
//! derived record never changes after this point, so there is no
//! order-of-mutation hazard anywhere downstream.

use snapconv_core::{
    ParticleType, Settings, SnapshotMetadata, UNIT_MASS_G, UNIT_VELOCITY_CM_PER_S,
};
use snapconv_gadget::SnapshotHeader;

/// Build the normalized metadata record
///
/// - totals come from the 32-bit low/high word reconstruction
/// - `TimeIC` is the caller override, or the snapshot time
/// - the peculiar-velocity flag is always set: the velocity converter
///   produces true peculiar velocities, and the flag records that
pub fn normalize(header: &SnapshotHeader, settings: &Settings) -> SnapshotMetadata {
    let totals = header.total_counts();
    SnapshotMetadata {
        mass_table: header.mass_table,
        tot_num_part: totals,
        tot_num_part_init: totals,
        box_size: header.box_size,
        time: header.time,
        time_ic: settings.time_ic.unwrap_or(header.time),
        unit_velocity_in_cm_per_s: UNIT_VELOCITY_CM_PER_S,
        unit_length_in_cm: settings.unit_system.length_unit_cm(),
        unit_mass_in_g: UNIT_MASS_G,
        use_peculiar_velocity: true,
    }
}

/// Active particle types (total count > 0), ascending index order
pub fn active_types(metadata: &SnapshotMetadata) -> Vec<ParticleType> {
    ParticleType::all()
        .filter(|t| metadata.tot_num_part[t.index()] > 0)
        .collect()
}
