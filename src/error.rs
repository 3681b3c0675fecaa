use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the normvid library
#[derive(Error, Debug)]
pub enum NormvidError {
    #[error("probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("request error: {0}")]
    Request(#[from] RequestError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while probing a file's stream inventory
///
/// Any probe failure aborts the whole invocation rather than skipping the
/// file; an unreadable input mid-run means the operator's file list is wrong.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("ffprobe not found on PATH; is ffmpeg installed?")]
    ToolNotFound,

    #[error("not an audio or video file: {path}")]
    NotMedia { path: String },

    #[error("failed to parse ffprobe output: {reason}")]
    ParseFailed { reason: String },

    #[error("IO error while probing: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while invoking the external media engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("ffmpeg not found on PATH; is ffmpeg installed?")]
    ToolNotFound,

    #[error("ffmpeg exited with {status} while writing {output}")]
    ExecutionFailed { status: String, output: String },

    #[error("IO error while running ffmpeg: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in the user's operation request, caught before any file is touched
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("malformed timestamp \"{input}\": expected [[HH:]MM:]SS with numeric fields")]
    MalformedTimestamp { input: String },

    #[error("invalid speed factor {factor}: must be finite and greater than zero")]
    InvalidSpeedFactor { factor: f64 },

    #[error("trim window is empty or reversed: start {start}s, end {end}s")]
    EmptyTrimWindow { start: f64, end: f64 },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse configuration file: {path}")]
    ParseFailed { path: PathBuf },

    #[error("invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },
}

/// Convenience type alias for Results using NormvidError
pub type Result<T> = std::result::Result<T, NormvidError>;
