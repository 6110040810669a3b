//! Column file format
//!
//! One file per column: a 24-byte fixed descriptor followed by the raw
//! little-endian payload. The dataset's metadata record lives next to the
//! column files as `header.json`.
//!
//! # File Structure
//!
//! ```text
//! +------------------+ 0
//! | ColumnDescriptor | 24 bytes
//! +------------------+ 24
//! | payload          | rows x nmemb elements, little-endian
//! +------------------+
//! ```

/// Magic bytes: "COLB"
pub const COLUMN_MAGIC: [u8; 4] = *b"COLB";

/// Column format version for forward compatibility
pub const COLUMN_FORMAT_VERSION: u32 = 1;

/// Descriptor size in bytes
pub const COLUMN_DESCRIPTOR_SIZE: usize = 24;

/// Element type of a column payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    /// 32-bit little-endian float
    F32,
    /// 32-bit little-endian unsigned integer
    U32,
}

impl Dtype {
    /// Wire tag for this dtype
    pub fn tag(self) -> u8 {
        match self {
            Dtype::F32 => 1,
            Dtype::U32 => 2,
        }
    }

    /// Dtype for a wire tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Dtype::F32),
            2 => Some(Dtype::U32),
            _ => None,
        }
    }

    /// Element width in bytes
    pub fn width(self) -> usize {
        4
    }
}

/// Column file descriptor (24 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Magic bytes: "COLB"
    pub magic: [u8; 4],
    /// Format version
    pub version: u32,
    /// Element type tag
    pub dtype: Dtype,
    /// Elements per row (3 for vectors, 1 for scalars)
    pub nmemb: u32,
    /// Row (particle) count
    pub rows: u64,
}

impl ColumnDescriptor {
    /// Create a descriptor for the current format version
    pub fn new(dtype: Dtype, nmemb: u32, rows: u64) -> Self {
        ColumnDescriptor {
            magic: COLUMN_MAGIC,
            version: COLUMN_FORMAT_VERSION,
            dtype,
            nmemb,
            rows,
        }
    }

    /// Payload size in bytes implied by this descriptor
    pub fn payload_len(&self) -> u64 {
        self.rows * self.nmemb as u64 * self.dtype.width() as u64
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> [u8; COLUMN_DESCRIPTOR_SIZE] {
        let mut bytes = [0u8; COLUMN_DESCRIPTOR_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8] = self.dtype.tag();
        // bytes 9..12 reserved
        bytes[12..16].copy_from_slice(&self.nmemb.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.rows.to_le_bytes());
        bytes
    }

    /// Parse from bytes; `None` on bad magic, version, or dtype tag
    pub fn from_bytes(bytes: &[u8; COLUMN_DESCRIPTOR_SIZE]) -> Option<Self> {
        let magic: [u8; 4] = bytes[0..4].try_into().ok()?;
        if magic != COLUMN_MAGIC {
            return None;
        }
        let version = u32::from_le_bytes(bytes[4..8].try_into().ok()?);
        if version > COLUMN_FORMAT_VERSION {
            return None;
        }
        Some(ColumnDescriptor {
            magic,
            version,
            dtype: Dtype::from_tag(bytes[8])?,
            nmemb: u32::from_le_bytes(bytes[12..16].try_into().ok()?),
            rows: u64::from_le_bytes(bytes[16..24].try_into().ok()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_roundtrip() {
        let desc = ColumnDescriptor::new(Dtype::F32, 3, 1_000_000);
        let parsed = ColumnDescriptor::from_bytes(&desc.to_bytes()).unwrap();
        assert_eq!(desc, parsed);
    }

    #[test]
    fn test_payload_len() {
        let desc = ColumnDescriptor::new(Dtype::F32, 3, 10);
        assert_eq!(desc.payload_len(), 120);
        let desc = ColumnDescriptor::new(Dtype::U32, 1, 10);
        assert_eq!(desc.payload_len(), 40);
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut bytes = ColumnDescriptor::new(Dtype::U32, 1, 1).to_bytes();
        bytes[0] = b'X';
        assert!(ColumnDescriptor::from_bytes(&bytes).is_none());
    }

    #[test]
    fn test_future_version_rejected() {
        let mut bytes = ColumnDescriptor::new(Dtype::U32, 1, 1).to_bytes();
        bytes[4..8].copy_from_slice(&99u32.to_le_bytes());
        assert!(ColumnDescriptor::from_bytes(&bytes).is_none());
    }

    #[test]
    fn test_unknown_dtype_rejected() {
        let mut bytes = ColumnDescriptor::new(Dtype::U32, 1, 1).to_bytes();
        bytes[8] = 7;
        assert!(ColumnDescriptor::from_bytes(&bytes).is_none());
    }
}
