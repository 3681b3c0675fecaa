//! # Output Filename Derivation
//!
//! Deterministic, pure derivation of the output path from the input path,
//! the operation, and the rate profile. Output always lands alongside the
//! input file; an existing file at the derived path is overwritten by the
//! engine's own overwrite policy.

use std::path::{Path, PathBuf};

use crate::{
    config::RateProfile,
    ops::{Operation, OutputFormat},
};

/// Render a float with at least one decimal place
///
/// Keeps derived names stable for whole values: a 50-second trim is
/// `_50.0s`, a half-speed factor is `.0.5.`, a double-length factor `.2.0.`.
pub fn decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Derive the output path for an operation on the given input file
///
/// Returns `None` for info display, which never produces an output file.
pub fn output_path(input: &Path, operation: &Operation, profile: &RateProfile) -> Option<PathBuf> {
    let stem = input.file_stem()?.to_string_lossy();

    let name = match operation {
        Operation::Transcode {
            format: OutputFormat::Mp4,
        } => format!(
            "{}_v{}kbps_{}fps_a{}kbps.mp4",
            stem,
            profile.video_kbps(),
            profile.max_fps,
            profile.audio_kbps()
        ),
        Operation::Transcode {
            format: OutputFormat::Mp3,
        } => format!("{}_a{}kbps.mp3", stem, profile.audio_kbps()),
        Operation::ChangeSpeed { factor } => format!("{}.{}.mp4", stem, decimal(*factor)),
        Operation::Trim { start, end } => format!("{}_{}s.mp4", stem, decimal(end - start)),
        Operation::Info => return None,
    };

    Some(input.with_file_name(name))
}
