//! Synthetic snapshot fixtures
//!
//! Builds Gadget-1 fragments through the same serializers the parser
//! consumes, with deterministic per-particle values so tests can assert
//! exact contents and ordering after concatenation.
//!
//! The value scheme: particle `j` (running index within a fragment, type
//! index ascending) gets id `seed + j`; positions, velocities, and explicit
//! masses are fixed functions of that id. Giving fragment k a seed equal to
//! the number of particles in fragments 0..k yields globally consecutive
//! ids.

use std::fs;
use std::io;
use std::path::Path;

use snapconv_core::NUM_PARTICLE_TYPES;

use crate::header::SnapshotHeader;

/// Shape of one synthetic fragment
#[derive(Debug, Clone)]
pub struct FragmentSpec {
    /// Particle count per type in this fragment
    pub npart: [u32; NUM_PARTICLE_TYPES],
    /// Mass table (zero entries get an explicit Mass block)
    pub mass_table: [f64; NUM_PARTICLE_TYPES],
    /// Total count low words
    pub nall: [u32; NUM_PARTICLE_TYPES],
    /// Total count high words
    pub nall_hw: [u32; NUM_PARTICLE_TYPES],
    /// Declared fragment count
    pub num_files: i32,
    /// Scale factor
    pub time: f64,
    /// Box side length
    pub box_size: f64,
}

impl Default for FragmentSpec {
    fn default() -> Self {
        FragmentSpec {
            npart: [0; NUM_PARTICLE_TYPES],
            mass_table: [0.0; NUM_PARTICLE_TYPES],
            nall: [0; NUM_PARTICLE_TYPES],
            nall_hw: [0; NUM_PARTICLE_TYPES],
            num_files: 1,
            time: 1.0,
            box_size: 1000.0,
        }
    }
}

impl FragmentSpec {
    /// Single-fragment spec where the totals equal the local counts
    pub fn single(npart: [u32; NUM_PARTICLE_TYPES], mass_table: [f64; NUM_PARTICLE_TYPES]) -> Self {
        FragmentSpec {
            npart,
            mass_table,
            nall: npart,
            ..Default::default()
        }
    }

    /// Header for this fragment
    pub fn header(&self) -> SnapshotHeader {
        SnapshotHeader {
            npart: self.npart,
            mass_table: self.mass_table,
            time: self.time,
            redshift: 1.0 / self.time - 1.0,
            flag_sfr: 0,
            flag_feedback: 0,
            nall: self.nall,
            flag_cooling: 0,
            num_files: self.num_files,
            box_size: self.box_size,
            omega0: 0.3,
            omega_lambda: 0.7,
            hubble_param: 0.7,
            flag_stellar_age: 0,
            flag_metals: 0,
            nall_hw: self.nall_hw,
            flag_entropy: 0,
        }
    }
}

/// Position component `c` for particle id `pid`
pub fn expected_position(pid: u32, c: usize) -> f32 {
    pid as f32 * 10.0 + c as f32
}

/// Raw (pre-conversion) velocity component `c` for particle id `pid`
pub fn expected_velocity(pid: u32, c: usize) -> f32 {
    pid as f32 * 2.0 + c as f32
}

/// Explicit mass for particle id `pid`
pub fn expected_mass(pid: u32) -> f32 {
    0.5 + pid as f32
}

/// Encode one fragment to bytes (header + blocks, all record-marked)
pub fn encode_fragment(spec: &FragmentSpec, seed: u32) -> Vec<u8> {
    let header = spec.header();

    let mut positions: Vec<f32> = Vec::new();
    let mut velocities: Vec<f32> = Vec::new();
    let mut ids: Vec<u32> = Vec::new();
    let mut masses: Vec<f32> = Vec::new();

    let mut j = 0u32;
    for t in 0..NUM_PARTICLE_TYPES {
        for _ in 0..spec.npart[t] {
            let pid = seed + j;
            ids.push(pid);
            for c in 0..3 {
                positions.push(expected_position(pid, c));
                velocities.push(expected_velocity(pid, c));
            }
            if spec.mass_table[t] == 0.0 {
                masses.push(expected_mass(pid));
            }
            j += 1;
        }
    }

    let mut out = Vec::new();
    push_record(&mut out, &header.to_bytes());
    push_record(&mut out, &f32_block(&positions));
    push_record(&mut out, &f32_block(&velocities));
    push_record(&mut out, &u32_block(&ids));
    if !masses.is_empty() {
        push_record(&mut out, &f32_block(&masses));
    }
    out
}

/// Write one fragment file
pub fn write_fragment(path: &Path, spec: &FragmentSpec, seed: u32) -> io::Result<()> {
    fs::write(path, encode_fragment(spec, seed))
}

fn push_record(out: &mut Vec<u8>, payload: &[u8]) {
    let marker = (payload.len() as u32).to_le_bytes();
    out.extend_from_slice(&marker);
    out.extend_from_slice(payload);
    out.extend_from_slice(&marker);
}

fn f32_block(values: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * 4);
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

fn u32_block(values: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * 4);
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}
