//! End-to-end conversion tests: synthetic multi-fragment snapshots on disk,
//! through the full pipeline, into the on-disk container.

use snapconv::{convert, read_column, read_header_record, BigfileWriter, ColumnValues, Error, Settings, UnitSystem};
use snapconv_gadget::testing::{expected_position, write_fragment, FragmentSpec};
use std::path::Path;
use tempfile::TempDir;

fn settings(base: &Path, dest: &Path) -> Settings {
    Settings::new(base, dest, None, UnitSystem::Kpc, None).unwrap()
}

fn f32s(values: ColumnValues) -> Vec<f32> {
    match values {
        ColumnValues::F32(v) => v,
        other => panic!("expected f32 column, got {:?}", other),
    }
}

fn u32s(values: ColumnValues) -> Vec<u32> {
    match values {
        ColumnValues::U32(v) => v,
        other => panic!("expected u32 column, got {:?}", other),
    }
}

#[test]
fn converts_multi_fragment_snapshot() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("snap_000");
    let dest = dir.path().join("out");

    // 3 fragments of type-1 particles: 4 + 3 + 2 = 9 total
    let counts = [4u32, 3, 2];
    let mut seed = 0;
    for (i, &n) in counts.iter().enumerate() {
        let mut spec = FragmentSpec::single([0, n, 0, 0, 0, 0], [0.0; 6]);
        spec.nall = [0, 9, 0, 0, 0, 0];
        spec.num_files = 3;
        spec.time = 0.25;
        write_fragment(&dir.path().join(format!("snap_000.{}", i)), &spec, seed).unwrap();
        seed += n;
    }

    let cfg = settings(&base, &dest);
    let mut sink = BigfileWriter::new(&dest).unwrap();
    let summary = convert(&cfg, &mut sink).unwrap();

    assert_eq!(summary.fragments, 3);
    assert_eq!(summary.datasets, vec!["1"]);
    assert_eq!(summary.particles, 9);

    let dataset = dest.join("1");
    let (_, ids) = read_column(&dataset.join("ID")).unwrap();
    assert_eq!(u32s(ids), (0..9).collect::<Vec<u32>>());

    let (desc, positions) = read_column(&dataset.join("Position")).unwrap();
    assert_eq!(desc.nmemb, 3);
    let positions = f32s(positions);
    assert_eq!(positions.len(), 27);
    // concatenation preserved fragment order: particle 5 is row 5
    assert_eq!(positions[15], expected_position(5, 0));

    let header = read_header_record(&dataset).unwrap();
    assert_eq!(header.tot_num_part, [0, 9, 0, 0, 0, 0]);
    assert_eq!(header.time, 0.25);
    assert!(header.use_peculiar_velocity);
    assert_eq!(header.unit_length_in_cm, 3.085678e21);
}

#[test]
fn velocity_and_subsample_applied_to_output() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("snap");
    let dest = dir.path().join("out");

    let mut spec = FragmentSpec::single([10, 0, 0, 0, 0, 0], [0.0; 6]);
    spec.time = 0.25;
    write_fragment(&base, &spec, 0).unwrap();

    let cfg = Settings::new(&base, &dest, None, UnitSystem::Kpc, Some(3)).unwrap();
    let mut sink = BigfileWriter::new(&dest).unwrap();
    let summary = convert(&cfg, &mut sink).unwrap();
    assert_eq!(summary.particles, 4);

    let dataset = dest.join("0");
    let (_, ids) = read_column(&dataset.join("ID")).unwrap();
    assert_eq!(u32s(ids), vec![0, 3, 6, 9]);

    // fixture velocity for pid 3, component 0 is 6.0; converted by sqrt(0.25)
    let (_, velocities) = read_column(&dataset.join("Velocity")).unwrap();
    let velocities = f32s(velocities);
    assert_eq!(velocities[3], 3.0);
}

#[test]
fn fully_tabled_snapshot_omits_mass_and_inactive_types() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("ic");
    let dest = dir.path().join("out");

    // IC-style snapshot: both active types carry table masses
    let spec = FragmentSpec::single([0, 6, 4, 0, 0, 0], [0.0, 0.5, 0.25, 0.0, 0.0, 0.0]);
    write_fragment(&base, &spec, 0).unwrap();

    let cfg = settings(&base, &dest);
    let mut sink = BigfileWriter::new(&dest).unwrap();
    let summary = convert(&cfg, &mut sink).unwrap();

    assert_eq!(summary.datasets, vec!["1", "2"]);
    assert_eq!(summary.columns, vec!["Position", "Velocity", "ID"]);
    assert!(!dest.join("0").exists());
    assert!(!dest.join("1").join("Mass").exists());
    assert!(dest.join("2").join("ID").is_file());

    let header = read_header_record(&dest.join("1")).unwrap();
    assert_eq!(header.mass_table[1], 0.5);
}

#[test]
fn mixed_mass_tables_force_mass_everywhere() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("snap");
    let dest = dir.path().join("out");

    // type 1 tabled, type 0 explicit: all-or-nothing keeps Mass for both
    let spec = FragmentSpec::single([3, 2, 0, 0, 0, 0], [0.0, 0.5, 0.0, 0.0, 0.0, 0.0]);
    write_fragment(&base, &spec, 0).unwrap();

    let cfg = settings(&base, &dest);
    let mut sink = BigfileWriter::new(&dest).unwrap();
    convert(&cfg, &mut sink).unwrap();

    let (_, explicit) = read_column(&dest.join("0").join("Mass")).unwrap();
    assert_eq!(f32s(explicit).len(), 3);

    // tabled type emits a constant column synthesized from the table
    let (_, tabled) = read_column(&dest.join("1").join("Mass")).unwrap();
    assert_eq!(f32s(tabled), vec![0.5, 0.5]);
}

#[test]
fn structural_error_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("snap");
    let dest = dir.path().join("out");

    // header declares more particles than the single fragment holds
    let mut spec = FragmentSpec::single([0, 3, 0, 0, 0, 0], [0.0; 6]);
    spec.nall = [0, 7, 0, 0, 0, 0];
    write_fragment(&base, &spec, 0).unwrap();

    let cfg = settings(&base, &dest);
    let mut sink = BigfileWriter::new(&dest).unwrap();
    let err = convert(&cfg, &mut sink).unwrap_err();

    assert!(matches!(err, Error::CountMismatch { ptype: 1, .. }));
    // destination root exists (writer created it) but holds no datasets
    let entries: Vec<_> = std::fs::read_dir(&dest).unwrap().collect();
    assert!(entries.is_empty());
}

#[test]
fn time_ic_override_lands_in_header_record() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("snap");
    let dest = dir.path().join("out");

    let mut spec = FragmentSpec::single([1, 0, 0, 0, 0, 0], [0.0; 6]);
    spec.time = 0.5;
    write_fragment(&base, &spec, 0).unwrap();

    let cfg = Settings::new(&base, &dest, Some(0.02), UnitSystem::Mpc, None).unwrap();
    let mut sink = BigfileWriter::new(&dest).unwrap();
    convert(&cfg, &mut sink).unwrap();

    let header = read_header_record(&dest.join("0")).unwrap();
    assert_eq!(header.time_ic, 0.02);
    assert_eq!(header.time, 0.5);
    assert_eq!(header.unit_length_in_cm, 3.085678e24);
}
