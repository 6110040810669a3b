//! Fixed-stride decimation
//!
//! Keeps rows 0, k, 2k, ... independently within each particle type's slice,
//! preserving the relative order of retained particles. Stride 1 is the
//! identity; the pipeline never calls in with stride 0.

use snapconv_core::SnapshotColumns;

/// Decimate all staged columns in place with the given stride
pub fn decimate_columns(columns: &mut SnapshotColumns, stride: u64) {
    if stride <= 1 {
        return;
    }
    for cols in columns.types.iter_mut() {
        cols.position = decimate(&cols.position, 3, stride);
        cols.velocity = decimate(&cols.velocity, 3, stride);
        cols.id = decimate(&cols.id, 1, stride);
        cols.mass = decimate(&cols.mass, 1, stride);
    }
}

/// Keep every `stride`-th row of a column with `nmemb` elements per row
fn decimate<T: Copy>(values: &[T], nmemb: usize, stride: u64) -> Vec<T> {
    let rows = values.len() / nmemb;
    let kept = (rows + stride as usize - 1) / stride as usize;
    let mut out = Vec::with_capacity(kept * nmemb);
    let mut row = 0;
    while row < rows {
        out.extend_from_slice(&values[row * nmemb..(row + 1) * nmemb]);
        row += stride as usize;
    }
    out
}
