//! # Normvid
//!
//! Normalize video files to a baseline quality by driving an external ffmpeg
//! installation: transcode to MP4 or MP3, trim to a clock-time window, change
//! playback speed, or dump stream metadata.
//!
//! The heavy lifting (decoding, filtering, encoding) is delegated entirely to
//! ffmpeg/ffprobe; this crate contributes stream-inventory resolution, the
//! processing-graph construction policy, and output filename derivation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use normvid::{
//!     config::RateProfile,
//!     graph::GraphBuilder,
//!     ops::{Operation, OutputFormat},
//!     probe::{self, ProbeSource},
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let profile = RateProfile::default();
//! let source = ProbeSource::RealFile("clip.mov".into());
//! let inventory = probe::resolve_inventory(&source).await?;
//!
//! let operation = Operation::Transcode { format: OutputFormat::Mp4 };
//! let graph = GraphBuilder::new(&profile, &inventory)
//!     .build(&operation)
//!     .expect("transcode always builds a graph");
//!
//! let output = normvid::naming::output_path(Path::new("clip.mov"), &operation, &profile)
//!     .expect("transcode always has an output");
//! normvid::engine::execute(&graph, Path::new("clip.mov"), &output).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`probe`] - Stream inventory resolution via ffprobe
//! - [`graph`] - Processing-graph construction policy
//! - [`engine`] - ffmpeg invocation and dry-run command rendering
//! - [`ops`] - Operation requests and timestamp parsing
//! - [`naming`] - Output filename derivation
//! - [`config`] - Rate profiles and presets

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod naming;
pub mod ops;
pub mod probe;

// Re-export commonly used types for convenience
pub use crate::{
    config::{RatePreset, RateProfile},
    error::{NormvidError, Result},
    graph::{GraphBuilder, GraphDescription},
    ops::{Operation, OutputFormat},
    probe::{ProbeSource, StreamInventory},
};
