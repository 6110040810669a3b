//! Column selection policy
//!
//! One policy per run, shared by every active type. Base columns are
//! Position, Velocity, ID, Mass; the in-memory staging columns (Selection,
//! Weight, Value) are never written. The Mass decision is all-or-nothing
//! across active types: it is dropped for everyone only when every active
//! type has a nonzero mass-table entry, and a single zero entry forces the
//! column on everyone — including types whose own table entry was nonzero,
//! which then emit a constant-filled array. Surprising, but downstream
//! consumers expect exactly this shape, so it is reproduced deliberately.

use snapconv_core::{Column, SnapshotMetadata};

/// Columns written for every active type this run
pub fn select_columns(metadata: &SnapshotMetadata) -> Vec<Column> {
    let base = [Column::Position, Column::Velocity, Column::Id, Column::Mass];
    base.into_iter()
        .filter(|c| c.is_writable())
        .filter(|c| *c != Column::Mass || !mass_fully_tabled(metadata))
        .collect()
}

/// True when every active type's mass-table entry is nonzero
///
/// This usually means initial conditions, where the table alone determines
/// all masses and an explicit column would be redundant.
pub fn mass_fully_tabled(metadata: &SnapshotMetadata) -> bool {
    let active = metadata.active_type_indices();
    !active.is_empty() && active.iter().all(|&t| metadata.mass_table[t] > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(tot: [u64; 6], mass_table: [f64; 6]) -> SnapshotMetadata {
        SnapshotMetadata {
            mass_table,
            tot_num_part: tot,
            tot_num_part_init: tot,
            box_size: 1000.0,
            time: 1.0,
            time_ic: 1.0,
            unit_velocity_in_cm_per_s: 1e5,
            unit_length_in_cm: 3.085678e21,
            unit_mass_in_g: 1.989e43,
            use_peculiar_velocity: true,
        }
    }

    #[test]
    fn test_mass_dropped_when_all_active_types_tabled() {
        let meta = metadata([10, 20, 0, 0, 0, 0], [0.5, 0.25, 0.0, 0.0, 0.0, 0.0]);
        let columns = select_columns(&meta);
        assert_eq!(columns, vec![Column::Position, Column::Velocity, Column::Id]);
    }

    #[test]
    fn test_one_zero_entry_forces_mass_for_all() {
        // two tabled active types plus one untabled: Mass kept for all three
        let meta = metadata([10, 20, 30, 0, 0, 0], [0.5, 0.25, 0.0, 0.0, 0.0, 0.0]);
        let columns = select_columns(&meta);
        assert!(columns.contains(&Column::Mass));
    }

    #[test]
    fn test_inactive_types_do_not_count() {
        // type 2 has a zero table entry but no particles; the active types
        // are fully tabled, so Mass is still dropped
        let meta = metadata([10, 20, 0, 0, 0, 0], [0.5, 0.25, 0.0, 0.0, 0.0, 0.0]);
        assert!(mass_fully_tabled(&meta));

        // same table with type 2 active flips the decision
        let meta = metadata([10, 20, 5, 0, 0, 0], [0.5, 0.25, 0.0, 0.0, 0.0, 0.0]);
        assert!(!mass_fully_tabled(&meta));
    }

    #[test]
    fn test_staging_columns_never_selected() {
        let meta = metadata([10, 0, 0, 0, 0, 0], [0.0; 6]);
        let columns = select_columns(&meta);
        assert!(!columns.contains(&Column::Selection));
        assert!(!columns.contains(&Column::Weight));
        assert!(!columns.contains(&Column::Value));
    }

    #[test]
    fn test_empty_snapshot_keeps_mass_vacuously() {
        // no active types: nothing will be written, the set is irrelevant,
        // but the policy must not claim full table coverage
        let meta = metadata([0; 6], [0.0; 6]);
        assert!(!mass_fully_tabled(&meta));
    }
}
