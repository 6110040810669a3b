//! Fragment locator
//!
//! A snapshot is either a single file at the base path, or a set of
//! fragments named `<base>.<N>` with N a 1-4 digit decimal suffix. Ordering
//! must follow the numeric value of the suffix, so matches are collected per
//! digit length and sorted lexicographically within each bucket (numerically
//! correct for fixed-width digit strings), then the buckets are concatenated
//! in increasing digit-length order. Zero-padded names sort correctly too.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use snapconv_core::{Error, Result};
use tracing::debug;

/// Maximum fragment suffix width in digits
const MAX_SUFFIX_DIGITS: usize = 4;

/// Resolve a base path into an ordered sequence of fragment paths
///
/// Fails with `NoFragmentsFound` when the base path is not a file and no
/// `.N` fragment matches it.
pub fn locate_fragments(base: &Path) -> Result<Vec<PathBuf>> {
    if base.is_file() {
        debug!(path = %base.display(), "snapshot is single-fragment");
        return Ok(vec![base.to_path_buf()]);
    }

    let file_name = match base.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => {
            return Err(Error::NoFragmentsFound {
                base: base.to_path_buf(),
            })
        }
    };
    let prefix = format!("{}.", file_name);

    let dir = match base.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::NoFragmentsFound {
                base: base.to_path_buf(),
            })
        }
        Err(e) => return Err(Error::Io(e)),
    };

    // One bucket per suffix width; lexicographic sort within a bucket is
    // numeric sort for fixed-width digit strings.
    let mut buckets: [Vec<PathBuf>; MAX_SUFFIX_DIGITS] = Default::default();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let name = match name.to_str() {
            Some(name) => name,
            None => continue,
        };
        let suffix = match name.strip_prefix(&prefix) {
            Some(suffix) => suffix,
            None => continue,
        };
        if suffix.is_empty()
            || suffix.len() > MAX_SUFFIX_DIGITS
            || !suffix.bytes().all(|b| b.is_ascii_digit())
        {
            continue;
        }
        buckets[suffix.len() - 1].push(entry.path());
    }

    let mut fragments = Vec::new();
    for bucket in buckets.iter_mut() {
        bucket.sort();
        fragments.append(bucket);
    }

    if fragments.is_empty() {
        return Err(Error::NoFragmentsFound {
            base: base.to_path_buf(),
        });
    }

    debug!(
        path = %base.display(),
        fragments = fragments.len(),
        "located snapshot fragments"
    );
    Ok(fragments)
}
