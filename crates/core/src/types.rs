//! Particle type and column model
//!
//! A snapshot partitions all particles into 6 fixed types (index 0-5). The
//! domain meaning of each index (gas, dark matter, ...) is caller-defined and
//! opaque here; the converter only cares about counts, the mass table, and
//! the on-disk ordering contract (type index ascending within a fragment).

use std::fmt;

/// Number of particle types in the legacy format
pub const NUM_PARTICLE_TYPES: usize = 6;

/// One of the 6 fixed particle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleType(u8);

impl ParticleType {
    /// Create a particle type from its index, if in range
    pub fn new(index: usize) -> Option<Self> {
        if index < NUM_PARTICLE_TYPES {
            Some(ParticleType(index as u8))
        } else {
            None
        }
    }

    /// Type index (0-5)
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All 6 types in ascending index order
    pub fn all() -> impl Iterator<Item = ParticleType> {
        (0..NUM_PARTICLE_TYPES).map(|i| ParticleType(i as u8))
    }

    /// Dataset label for this type (the index as a string)
    pub fn label(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for ParticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical output columns
///
/// The staging variants (`Selection`, `Weight`, `Value`) exist only so the
/// column policy can name what it excludes; they are never writable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Particle position, 3 x f32 per particle
    Position,
    /// Particle velocity (post-conversion), 3 x f32 per particle
    Velocity,
    /// Particle identifier, u32 per particle
    Id,
    /// Explicit particle mass, f32 per particle
    Mass,
    /// In-memory selection mask (staging only)
    Selection,
    /// Generic weight placeholder (staging only)
    Weight,
    /// Generic value placeholder (staging only)
    Value,
}

impl Column {
    /// On-disk name of this column
    pub fn name(self) -> &'static str {
        match self {
            Column::Position => "Position",
            Column::Velocity => "Velocity",
            Column::Id => "ID",
            Column::Mass => "Mass",
            Column::Selection => "Selection",
            Column::Weight => "Weight",
            Column::Value => "Value",
        }
    }

    /// Whether this column may ever be persisted
    pub fn is_writable(self) -> bool {
        !matches!(self, Column::Selection | Column::Weight | Column::Value)
    }
}

/// Staged column buffers for one particle type
///
/// Filled by the block stream reader fragment by fragment, transformed in
/// place by the engine, then consumed exactly once by the writer. `mass`
/// stays empty for types whose mass-table entry is nonzero; the engine
/// synthesizes a constant column later if the policy forces one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeColumns {
    /// Interleaved x/y/z positions, 3 entries per particle
    pub position: Vec<f32>,
    /// Interleaved x/y/z velocities, 3 entries per particle
    pub velocity: Vec<f32>,
    /// Particle identifiers
    pub id: Vec<u32>,
    /// Explicit per-particle masses (empty for table-mass types)
    pub mass: Vec<f32>,
}

impl TypeColumns {
    /// Number of particles staged for this type
    pub fn len(&self) -> usize {
        self.id.len()
    }

    /// True when no particles are staged
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// Staged column buffers for all 6 types, in type index order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotColumns {
    /// One buffer set per particle type
    pub types: [TypeColumns; NUM_PARTICLE_TYPES],
}

impl SnapshotColumns {
    /// Buffers for one type
    pub fn get(&self, ptype: ParticleType) -> &TypeColumns {
        &self.types[ptype.index()]
    }

    /// Mutable buffers for one type
    pub fn get_mut(&mut self, ptype: ParticleType) -> &mut TypeColumns {
        &mut self.types[ptype.index()]
    }

    /// Staged particle count per type
    pub fn counts(&self) -> [u64; NUM_PARTICLE_TYPES] {
        let mut counts = [0u64; NUM_PARTICLE_TYPES];
        for (c, t) in counts.iter_mut().zip(self.types.iter()) {
            *c = t.len() as u64;
        }
        counts
    }
}

/// Borrowed column payload handed to the writer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnPayload<'a> {
    /// 32-bit float data
    F32(&'a [f32]),
    /// 32-bit unsigned integer data
    U32(&'a [u32]),
}

impl ColumnPayload<'_> {
    /// Total element count (rows x members)
    pub fn len(&self) -> usize {
        match self {
            ColumnPayload::F32(v) => v.len(),
            ColumnPayload::U32(v) => v.len(),
        }
    }

    /// True when the payload holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One column as handed to the writer: name, row width, payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnData<'a> {
    /// On-disk column name
    pub name: &'static str,
    /// Elements per row (3 for Position/Velocity, 1 for ID/Mass)
    pub nmemb: u32,
    /// Borrowed element data
    pub payload: ColumnPayload<'a>,
}

impl ColumnData<'_> {
    /// Number of rows (particles) in this column
    pub fn rows(&self) -> usize {
        self.payload.len() / self.nmemb as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_type_range() {
        assert!(ParticleType::new(0).is_some());
        assert!(ParticleType::new(5).is_some());
        assert!(ParticleType::new(6).is_none());
    }

    #[test]
    fn test_particle_type_all_ascending() {
        let indices: Vec<usize> = ParticleType::all().map(|t| t.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_particle_type_label() {
        let t = ParticleType::new(4).unwrap();
        assert_eq!(t.label(), "4");
        assert_eq!(t.to_string(), "4");
    }

    #[test]
    fn test_staging_columns_not_writable() {
        assert!(!Column::Selection.is_writable());
        assert!(!Column::Weight.is_writable());
        assert!(!Column::Value.is_writable());
        assert!(Column::Position.is_writable());
        assert!(Column::Velocity.is_writable());
        assert!(Column::Id.is_writable());
        assert!(Column::Mass.is_writable());
    }

    #[test]
    fn test_type_columns_len() {
        let cols = TypeColumns {
            position: vec![0.0; 9],
            velocity: vec![0.0; 9],
            id: vec![1, 2, 3],
            mass: vec![],
        };
        assert_eq!(cols.len(), 3);
        assert!(!cols.is_empty());
    }

    #[test]
    fn test_snapshot_columns_counts() {
        let mut cols = SnapshotColumns::default();
        cols.get_mut(ParticleType::new(1).unwrap()).id = vec![7; 4];
        assert_eq!(cols.counts(), [0, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn test_column_data_rows() {
        let pos = vec![0.0f32; 12];
        let col = ColumnData {
            name: "Position",
            nmemb: 3,
            payload: ColumnPayload::F32(&pos),
        };
        assert_eq!(col.rows(), 4);
    }
}
