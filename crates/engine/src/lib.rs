//! Conversion engine for snapconv
//!
//! Everything between the Gadget-1 reader and the columnar writer:
//! - metadata: normalized header record derivation
//! - velocity: Gadget-native to peculiar velocity conversion
//! - policy: the per-run column selection (including the all-or-nothing
//!   Mass decision)
//! - subsample: per-type fixed-stride decimation
//! - pipeline: the `convert()` entry point driving all stages in order

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod metadata;
pub mod pipeline;
pub mod policy;
pub mod subsample;
pub mod velocity;

pub use metadata::{active_types, normalize};
pub use pipeline::{convert, ConvertSummary};
pub use policy::select_columns;
