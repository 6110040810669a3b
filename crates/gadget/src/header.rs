//! Gadget-1 snapshot header
//!
//! The header is a 256-byte fixed-offset structure wrapped in Fortran-style
//! record markers: a leading and a trailing u32, both equal to 256. The
//! format carries no magic bytes and no version field, so marker consistency
//! is the only structural check available.
//!
//! # Layout (little-endian)
//!
//! ```text
//! +--------------------+ 0
//! | npart[6]     u32   | particles of each type in THIS fragment
//! +--------------------+ 24
//! | mass_table[6] f64  | constant mass per type (0 = explicit mass block)
//! +--------------------+ 72
//! | time          f64  | scale factor a
//! | redshift      f64  |
//! | flag_sfr      i32  |
//! | flag_feedback i32  |
//! +--------------------+ 96
//! | nall[6]       u32  | low word of total count per type
//! +--------------------+ 120
//! | flag_cooling  i32  |
//! | num_files     i32  | declared fragment count
//! | box_size      f64  |
//! | omega0        f64  |
//! | omega_lambda  f64  |
//! | hubble_param  f64  |
//! | flag_age      i32  |
//! | flag_metals   i32  |
//! +--------------------+ 168
//! | nall_hw[6]    u32  | high word of total count per type
//! +--------------------+ 192
//! | flag_entropy  i32  |
//! | padding            |
//! +--------------------+ 256
//! ```

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use snapconv_core::{Error, Result, NUM_PARTICLE_TYPES};

/// Header payload size in bytes (excluding the two record markers)
pub const HEADER_SIZE: usize = 256;

/// Parsed Gadget-1 header
///
/// Parsed once from the first fragment and read-only thereafter; the block
/// stream reader re-parses each fragment's local copy only for its `npart`
/// and `mass_table` fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotHeader {
    /// Particle count per type in the current fragment
    pub npart: [u32; NUM_PARTICLE_TYPES],
    /// Constant mass per type; zero means an explicit Mass block entry
    pub mass_table: [f64; NUM_PARTICLE_TYPES],
    /// Cosmological scale factor at the snapshot epoch
    pub time: f64,
    /// Redshift at the snapshot epoch
    pub redshift: f64,
    /// Star formation flag (parsed for alignment, not consumed)
    pub flag_sfr: i32,
    /// Feedback flag (parsed for alignment, not consumed)
    pub flag_feedback: i32,
    /// Low 32-bit word of the total count per type across all fragments
    pub nall: [u32; NUM_PARTICLE_TYPES],
    /// Cooling flag (parsed for alignment, not consumed)
    pub flag_cooling: i32,
    /// Declared total fragment count
    pub num_files: i32,
    /// Comoving box side length
    pub box_size: f64,
    /// Matter density parameter
    pub omega0: f64,
    /// Dark energy density parameter
    pub omega_lambda: f64,
    /// Hubble parameter h
    pub hubble_param: f64,
    /// Stellar age flag (parsed for alignment, not consumed)
    pub flag_stellar_age: i32,
    /// Metals flag (parsed for alignment, not consumed)
    pub flag_metals: i32,
    /// High 32-bit word of the total count per type (counts beyond 2^32)
    pub nall_hw: [u32; NUM_PARTICLE_TYPES],
    /// Entropy-instead-of-u flag (parsed for alignment, not consumed)
    pub flag_entropy: i32,
}

impl SnapshotHeader {
    /// Serialize to the 256-byte payload (no record markers)
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        put_u32_array(&mut bytes, 0, &self.npart);
        put_f64_array(&mut bytes, 24, &self.mass_table);
        bytes[72..80].copy_from_slice(&self.time.to_le_bytes());
        bytes[80..88].copy_from_slice(&self.redshift.to_le_bytes());
        bytes[88..92].copy_from_slice(&self.flag_sfr.to_le_bytes());
        bytes[92..96].copy_from_slice(&self.flag_feedback.to_le_bytes());
        put_u32_array(&mut bytes, 96, &self.nall);
        bytes[120..124].copy_from_slice(&self.flag_cooling.to_le_bytes());
        bytes[124..128].copy_from_slice(&self.num_files.to_le_bytes());
        bytes[128..136].copy_from_slice(&self.box_size.to_le_bytes());
        bytes[136..144].copy_from_slice(&self.omega0.to_le_bytes());
        bytes[144..152].copy_from_slice(&self.omega_lambda.to_le_bytes());
        bytes[152..160].copy_from_slice(&self.hubble_param.to_le_bytes());
        bytes[160..164].copy_from_slice(&self.flag_stellar_age.to_le_bytes());
        bytes[164..168].copy_from_slice(&self.flag_metals.to_le_bytes());
        put_u32_array(&mut bytes, 168, &self.nall_hw);
        bytes[192..196].copy_from_slice(&self.flag_entropy.to_le_bytes());
        bytes
    }

    /// Parse from the 256-byte payload
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Option<Self> {
        Some(SnapshotHeader {
            npart: get_u32_array(bytes, 0)?,
            mass_table: get_f64_array(bytes, 24)?,
            time: f64::from_le_bytes(bytes[72..80].try_into().ok()?),
            redshift: f64::from_le_bytes(bytes[80..88].try_into().ok()?),
            flag_sfr: i32::from_le_bytes(bytes[88..92].try_into().ok()?),
            flag_feedback: i32::from_le_bytes(bytes[92..96].try_into().ok()?),
            nall: get_u32_array(bytes, 96)?,
            flag_cooling: i32::from_le_bytes(bytes[120..124].try_into().ok()?),
            num_files: i32::from_le_bytes(bytes[124..128].try_into().ok()?),
            box_size: f64::from_le_bytes(bytes[128..136].try_into().ok()?),
            omega0: f64::from_le_bytes(bytes[136..144].try_into().ok()?),
            omega_lambda: f64::from_le_bytes(bytes[144..152].try_into().ok()?),
            hubble_param: f64::from_le_bytes(bytes[152..160].try_into().ok()?),
            flag_stellar_age: i32::from_le_bytes(bytes[160..164].try_into().ok()?),
            flag_metals: i32::from_le_bytes(bytes[164..168].try_into().ok()?),
            nall_hw: get_u32_array(bytes, 168)?,
            flag_entropy: i32::from_le_bytes(bytes[192..196].try_into().ok()?),
        })
    }

    /// Reconstructed 64-bit total count for one type
    ///
    /// The legacy format splits totals into 32-bit low/high words so that
    /// counts beyond 2^32 survive.
    pub fn total_count(&self, ptype: usize) -> u64 {
        self.nall[ptype] as u64 | ((self.nall_hw[ptype] as u64) << 32)
    }

    /// Reconstructed 64-bit totals for all types
    pub fn total_counts(&self) -> [u64; NUM_PARTICLE_TYPES] {
        let mut totals = [0u64; NUM_PARTICLE_TYPES];
        for (t, total) in totals.iter_mut().enumerate() {
            *total = self.total_count(t);
        }
        totals
    }

    /// Particles of all types in the current fragment
    pub fn fragment_total(&self) -> u64 {
        self.npart.iter().map(|&n| n as u64).sum()
    }

    /// Particles in the current fragment that carry an explicit mass entry
    pub fn fragment_with_mass(&self) -> u64 {
        self.npart
            .iter()
            .zip(self.mass_table.iter())
            .filter(|(_, &m)| m == 0.0)
            .map(|(&n, _)| n as u64)
            .sum()
    }
}

/// Read one header record (marker + payload + marker) from a fragment
///
/// Both markers must equal `HEADER_SIZE`; anything else means the stream is
/// not positioned on a Gadget-1 header, or the header is truncated.
pub fn read_header<R: Read>(reader: &mut R, fragment: usize) -> Result<SnapshotHeader> {
    let leading = reader
        .read_u32::<LittleEndian>()
        .map_err(|e| truncated(fragment, "leading marker", e))?;
    if leading as usize != HEADER_SIZE {
        return Err(Error::MalformedHeader {
            fragment,
            reason: format!("leading marker {}, expected {}", leading, HEADER_SIZE),
        });
    }

    let mut payload = [0u8; HEADER_SIZE];
    reader
        .read_exact(&mut payload)
        .map_err(|e| truncated(fragment, "header payload", e))?;

    let trailing = reader
        .read_u32::<LittleEndian>()
        .map_err(|e| truncated(fragment, "trailing marker", e))?;
    if trailing as usize != HEADER_SIZE {
        return Err(Error::MalformedHeader {
            fragment,
            reason: format!("trailing marker {}, expected {}", trailing, HEADER_SIZE),
        });
    }

    SnapshotHeader::from_bytes(&payload).ok_or_else(|| Error::MalformedHeader {
        fragment,
        reason: "header payload shorter than fixed layout".to_string(),
    })
}

fn truncated(fragment: usize, what: &str, err: std::io::Error) -> Error {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        Error::MalformedHeader {
            fragment,
            reason: format!("truncated {}", what),
        }
    } else {
        Error::Io(err)
    }
}

fn put_u32_array(buf: &mut [u8], offset: usize, values: &[u32; NUM_PARTICLE_TYPES]) {
    for (i, v) in values.iter().enumerate() {
        let at = offset + i * 4;
        buf[at..at + 4].copy_from_slice(&v.to_le_bytes());
    }
}

fn put_f64_array(buf: &mut [u8], offset: usize, values: &[f64; NUM_PARTICLE_TYPES]) {
    for (i, v) in values.iter().enumerate() {
        let at = offset + i * 8;
        buf[at..at + 8].copy_from_slice(&v.to_le_bytes());
    }
}

fn get_u32_array(buf: &[u8], offset: usize) -> Option<[u32; NUM_PARTICLE_TYPES]> {
    let mut values = [0u32; NUM_PARTICLE_TYPES];
    for (i, v) in values.iter_mut().enumerate() {
        let at = offset + i * 4;
        *v = u32::from_le_bytes(buf.get(at..at + 4)?.try_into().ok()?);
    }
    Some(values)
}

fn get_f64_array(buf: &[u8], offset: usize) -> Option<[f64; NUM_PARTICLE_TYPES]> {
    let mut values = [0.0f64; NUM_PARTICLE_TYPES];
    for (i, v) in values.iter_mut().enumerate() {
        let at = offset + i * 8;
        *v = f64::from_le_bytes(buf.get(at..at + 8)?.try_into().ok()?);
    }
    Some(values)
}
