//! Velocity convention conversion
//!
//! Legacy snapshots store velocities in Gadget's native convention; the
//! target convention is true peculiar velocity, reached by scaling every
//! component by sqrt(a) where `a` is the snapshot scale factor. Pure
//! elementwise transform; it commutes with subsampling.

use snapconv_core::SnapshotColumns;

/// Scale all velocity components by sqrt(time), in place
pub fn to_peculiar(columns: &mut SnapshotColumns, time: f64) {
    let factor = time.sqrt();
    for cols in columns.types.iter_mut() {
        for v in cols.velocity.iter_mut() {
            *v = (*v as f64 * factor) as f32;
        }
    }
}
