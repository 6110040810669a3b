//! Block stream reader
//!
//! Walks the fragment sequence in locator order. Each fragment carries its
//! own local header copy whose `npart` counts define that fragment's block
//! boundaries, so fragments cannot be processed out of order or resynced
//! independently. Blocks appear in fixed order: Position, Velocity, ID, and
//! (only when some type's mass-table entry is zero) Mass. Every block is
//! wrapped in leading/trailing u32 record markers equal to its byte length;
//! any disagreement with the header-implied length aborts the run, since all
//! later block boundaries in the fragment would be garbage.
//!
//! Column buffers accumulate fragment order outermost, type index ascending
//! within a fragment. That is the on-disk contract; it makes per-type
//! slices after concatenation line up with the header totals.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use snapconv_core::{Error, Result, SnapshotColumns, NUM_PARTICLE_TYPES};
use tracing::{debug, info};

use crate::header::{read_header, SnapshotHeader};
use crate::locator::locate_fragments;

/// A fully read snapshot: first-fragment header plus concatenated columns
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Header parsed from the first fragment
    pub header: SnapshotHeader,
    /// Per-type column buffers accumulated across all fragments
    pub columns: SnapshotColumns,
    /// Number of fragments read
    pub fragments: usize,
}

/// Locate, order, and read all fragments of the snapshot at `base`
///
/// Verifies that the accumulated per-type counts match the header-declared
/// 64-bit totals; a mismatch means a truncated or misordered fragment set.
pub fn read_snapshot(base: &Path) -> Result<Snapshot> {
    let fragments = locate_fragments(base)?;

    let mut columns = SnapshotColumns::default();
    let mut first_header = None;
    for (index, path) in fragments.iter().enumerate() {
        let header = read_fragment(path, index, &mut columns)?;
        debug!(fragment = index, npart = ?header.npart, "read fragment blocks");
        if first_header.is_none() {
            first_header = Some(header);
        }
    }

    // Locator never returns an empty sequence
    let header = first_header.ok_or_else(|| Error::NoFragmentsFound {
        base: base.to_path_buf(),
    })?;

    let declared = header.total_counts();
    let actual = columns.counts();
    for t in 0..NUM_PARTICLE_TYPES {
        if actual[t] != declared[t] {
            return Err(Error::CountMismatch {
                ptype: t,
                declared: declared[t],
                actual: actual[t],
            });
        }
    }

    info!(
        fragments = fragments.len(),
        particles = declared.iter().sum::<u64>(),
        "loaded snapshot"
    );

    Ok(Snapshot {
        header,
        columns,
        fragments: fragments.len(),
    })
}

/// Read one fragment's header and blocks, appending to `columns`
fn read_fragment(
    path: &Path,
    fragment: usize,
    columns: &mut SnapshotColumns,
) -> Result<SnapshotHeader> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let header = read_header(&mut reader, fragment)?;

    let vec3_counts = scaled_counts(&header.npart, 3);
    let scalar_counts = scaled_counts(&header.npart, 1);
    let mass_counts = mass_counts(&header);

    read_f32_block(&mut reader, "Position", fragment, &vec3_counts, columns, |c| {
        &mut c.position
    })?;
    read_f32_block(&mut reader, "Velocity", fragment, &vec3_counts, columns, |c| {
        &mut c.velocity
    })?;
    read_u32_block(&mut reader, "ID", fragment, &scalar_counts, columns)?;
    if mass_counts.iter().any(|&n| n > 0) {
        read_f32_block(&mut reader, "Mass", fragment, &mass_counts, columns, |c| {
            &mut c.mass
        })?;
    }

    Ok(header)
}

/// Per-type element counts for a block with `nmemb` components per particle
fn scaled_counts(npart: &[u32; NUM_PARTICLE_TYPES], nmemb: u64) -> [u64; NUM_PARTICLE_TYPES] {
    let mut counts = [0u64; NUM_PARTICLE_TYPES];
    for (c, &n) in counts.iter_mut().zip(npart.iter()) {
        *c = n as u64 * nmemb;
    }
    counts
}

/// Per-type element counts for the Mass block: only zero-table types store one
fn mass_counts(header: &SnapshotHeader) -> [u64; NUM_PARTICLE_TYPES] {
    let mut counts = [0u64; NUM_PARTICLE_TYPES];
    for t in 0..NUM_PARTICLE_TYPES {
        if header.mass_table[t] == 0.0 {
            counts[t] = header.npart[t] as u64;
        }
    }
    counts
}

fn check_marker<R: Read>(
    reader: &mut R,
    block: &'static str,
    fragment: usize,
    expected: u64,
) -> Result<()> {
    let marker = reader.read_u32::<LittleEndian>()?;
    if marker as u64 != expected {
        return Err(Error::BlockLengthMismatch {
            block,
            fragment,
            expected,
            actual: marker as u64,
        });
    }
    Ok(())
}

fn read_f32_block<R: Read>(
    reader: &mut R,
    block: &'static str,
    fragment: usize,
    counts: &[u64; NUM_PARTICLE_TYPES],
    columns: &mut SnapshotColumns,
    select: impl Fn(&mut snapconv_core::TypeColumns) -> &mut Vec<f32>,
) -> Result<()> {
    let expected: u64 = counts.iter().sum::<u64>() * 4;
    check_marker(reader, block, fragment, expected)?;
    for (t, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let target = select(&mut columns.types[t]);
        let start = target.len();
        target.resize(start + count as usize, 0.0);
        reader.read_f32_into::<LittleEndian>(&mut target[start..])?;
    }
    check_marker(reader, block, fragment, expected)
}

fn read_u32_block<R: Read>(
    reader: &mut R,
    block: &'static str,
    fragment: usize,
    counts: &[u64; NUM_PARTICLE_TYPES],
    columns: &mut SnapshotColumns,
) -> Result<()> {
    let expected: u64 = counts.iter().sum::<u64>() * 4;
    check_marker(reader, block, fragment, expected)?;
    for (t, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let target = &mut columns.types[t].id;
        let start = target.len();
        target.resize(start + count as usize, 0);
        reader.read_u32_into::<LittleEndian>(&mut target[start..])?;
    }
    check_marker(reader, block, fragment, expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HEADER_SIZE;
    use crate::testing::{
        expected_mass, expected_position, expected_velocity, write_fragment, FragmentSpec,
    };
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_single_fragment_snapshot() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("snap");

        let spec = FragmentSpec::single([2, 3, 0, 0, 0, 0], [0.0; 6]);
        write_fragment(&base, &spec, 0).unwrap();

        let snapshot = read_snapshot(&base).unwrap();
        assert_eq!(snapshot.fragments, 1);
        assert_eq!(snapshot.columns.counts(), [2, 3, 0, 0, 0, 0]);

        // ids 0,1 land in type 0; ids 2,3,4 in type 1
        assert_eq!(snapshot.columns.types[0].id, vec![0, 1]);
        assert_eq!(snapshot.columns.types[1].id, vec![2, 3, 4]);

        // position/velocity stay interleaved x,y,z per particle
        let t1 = &snapshot.columns.types[1];
        assert_eq!(t1.position[0], expected_position(2, 0));
        assert_eq!(t1.position[5], expected_position(3, 2));
        assert_eq!(t1.velocity[3], expected_velocity(3, 0));
        assert_eq!(t1.mass, vec![expected_mass(2), expected_mass(3), expected_mass(4)]);
    }

    #[test]
    fn test_multi_fragment_concatenation_order() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("snap");

        // 2 fragments, type 1 only: 3 particles then 2, totals declare 5
        let mut spec0 = FragmentSpec::single([0, 3, 0, 0, 0, 0], [0.0; 6]);
        spec0.nall = [0, 5, 0, 0, 0, 0];
        spec0.num_files = 2;
        let mut spec1 = spec0.clone();
        spec1.npart = [0, 2, 0, 0, 0, 0];

        write_fragment(&dir.path().join("snap.0"), &spec0, 0).unwrap();
        write_fragment(&dir.path().join("snap.1"), &spec1, 3).unwrap();

        let snapshot = read_snapshot(&base).unwrap();
        assert_eq!(snapshot.fragments, 2);
        // fragment order preserved: fragment 0 particles before fragment 1
        assert_eq!(snapshot.columns.types[1].id, vec![0, 1, 2, 3, 4]);
        assert_eq!(snapshot.columns.types[1].position.len(), 15);
    }

    #[test]
    fn test_table_mass_type_has_no_mass_block() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("snap");

        // type 1 carries a table mass, type 0 does not
        let spec = FragmentSpec::single([2, 2, 0, 0, 0, 0], [0.0, 0.25, 0.0, 0.0, 0.0, 0.0]);
        write_fragment(&base, &spec, 0).unwrap();

        let snapshot = read_snapshot(&base).unwrap();
        assert_eq!(snapshot.columns.types[0].mass.len(), 2);
        assert!(snapshot.columns.types[1].mass.is_empty());
    }

    #[test]
    fn test_all_table_mass_skips_mass_block() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("snap");

        let spec = FragmentSpec::single([0, 4, 0, 0, 0, 0], [0.0, 0.25, 0.0, 0.0, 0.0, 0.0]);
        write_fragment(&base, &spec, 0).unwrap();

        let snapshot = read_snapshot(&base).unwrap();
        assert_eq!(snapshot.columns.types[1].len(), 4);
        assert!(snapshot.columns.types[1].mass.is_empty());
    }

    #[test]
    fn test_velocity_block_length_mismatch() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("snap");

        let spec = FragmentSpec::single([0, 3, 0, 0, 0, 0], [0.0; 6]);
        let mut bytes = crate::testing::encode_fragment(&spec, 0);

        // corrupt the Velocity block's leading marker: it sits right after
        // the header record (8 + 256) and the Position record (8 + 36)
        let velocity_marker = (8 + HEADER_SIZE) + (8 + 36);
        bytes[velocity_marker..velocity_marker + 4].copy_from_slice(&40u32.to_le_bytes());
        fs::write(&base, bytes).unwrap();

        let err = read_snapshot(&base).unwrap_err();
        match err {
            Error::BlockLengthMismatch {
                block,
                fragment,
                expected,
                actual,
            } => {
                assert_eq!(block, "Velocity");
                assert_eq!(fragment, 0);
                assert_eq!(expected, 36);
                assert_eq!(actual, 40);
            }
            other => panic!("expected BlockLengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_count_mismatch_on_missing_fragment() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("snap");

        // header declares 5 of type 1 but only one 3-particle fragment exists
        let mut spec = FragmentSpec::single([0, 3, 0, 0, 0, 0], [0.0; 6]);
        spec.nall = [0, 5, 0, 0, 0, 0];
        spec.num_files = 2;
        write_fragment(&dir.path().join("snap.0"), &spec, 0).unwrap();

        let err = read_snapshot(&base).unwrap_err();
        match err {
            Error::CountMismatch {
                ptype,
                declared,
                actual,
            } => {
                assert_eq!(ptype, 1);
                assert_eq!(declared, 5);
                assert_eq!(actual, 3);
            }
            other => panic!("expected CountMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_snapshot() {
        let dir = TempDir::new().unwrap();
        let err = read_snapshot(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, Error::NoFragmentsFound { .. }));
    }
}
