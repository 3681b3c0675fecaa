//! # Media Probing Module
//!
//! Read-only inspection of an input file's stream inventory via `ffprobe`.
//! The inventory is queried exactly once per operation and never mutated;
//! every downstream decision (which filters to attach, which container to
//! emit) is derived from it.

pub mod ffprobe;
pub mod types;

pub use ffprobe::{probe, resolve_inventory};
pub use types::{ProbeSource, StreamInfo, StreamInventory};
