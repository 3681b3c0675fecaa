//! # Operation Requests
//!
//! Models the closed set of operations the tool performs and resolves the
//! command-line flags into exactly one of them. Validation of timestamps and
//! speed factors happens here, before any input file is touched.

use crate::error::{RequestError, Result};

/// Target container for a transcode operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Mp4,
    Mp3,
}

impl OutputFormat {
    /// Container name as passed to the engine's `-f` flag
    pub fn container(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Mp3 => "mp3",
        }
    }

    /// File extension for derived output names
    pub fn extension(&self) -> &'static str {
        self.container()
    }
}

/// One operation, applied uniformly to every input file in the invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Normalize to the requested container at the profile's bitrates
    Transcode { format: OutputFormat },

    /// Keep only the half-open clock-time window [start, end), in seconds
    Trim { start: f64, end: f64 },

    /// Scale playback speed by the given factor (< 1 speeds up, > 1 slows down)
    ChangeSpeed { factor: f64 },

    /// Print per-stream metadata instead of transcoding
    Info,
}

impl Operation {
    /// Resolve boolean-ish CLI flags into a single operation
    ///
    /// Precedence when several flags are supplied together:
    /// info > speed > trim > audio > default transcode.
    pub fn resolve(
        info: bool,
        speed: Option<f64>,
        trim: Option<&[String]>,
        audio: bool,
    ) -> Result<Self> {
        if info {
            return Ok(Operation::Info);
        }

        if let Some(factor) = speed {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(RequestError::InvalidSpeedFactor { factor }.into());
            }
            return Ok(Operation::ChangeSpeed { factor });
        }

        if let Some(endpoints) = trim {
            let start = parse_timestamp(&endpoints[0])?;
            let end = parse_timestamp(&endpoints[1])?;
            if end <= start {
                return Err(RequestError::EmptyTrimWindow { start, end }.into());
            }
            return Ok(Operation::Trim { start, end });
        }

        let format = if audio {
            OutputFormat::Mp3
        } else {
            OutputFormat::Mp4
        };
        Ok(Operation::Transcode { format })
    }
}

/// Parse a clock string `[[HH:]MM:]SS` into total seconds
///
/// Fields are read right to left as seconds, minutes, hours; an empty field
/// counts as zero, so `":05"` is five seconds.
pub fn parse_timestamp(timestamp: &str) -> Result<f64> {
    let mut seconds = 0.0;
    for (i, part) in timestamp.split(':').rev().enumerate() {
        if i > 2 {
            return Err(RequestError::MalformedTimestamp {
                input: timestamp.to_string(),
            }
            .into());
        }
        let value = if part.is_empty() {
            0.0
        } else {
            part.parse::<f64>()
                .map_err(|_| RequestError::MalformedTimestamp {
                    input: timestamp.to_string(),
                })?
        };
        seconds += value * 60f64.powi(i as i32);
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_seconds() {
        assert_eq!(parse_timestamp("30").unwrap(), 30.0);
    }

    #[test]
    fn test_parse_minutes_and_seconds() {
        assert_eq!(parse_timestamp("1:30").unwrap(), 90.0);
    }

    #[test]
    fn test_parse_full_clock() {
        assert_eq!(parse_timestamp("01:02:03").unwrap(), 3723.0);
    }

    #[test]
    fn test_empty_leading_field_is_zero() {
        assert_eq!(parse_timestamp(":05").unwrap(), 5.0);
        assert_eq!(parse_timestamp("::5").unwrap(), 5.0);
    }

    #[test]
    fn test_fractional_seconds() {
        assert_eq!(parse_timestamp("1:30.5").unwrap(), 90.5);
    }

    #[test]
    fn test_malformed_timestamp_rejected() {
        assert!(parse_timestamp("abc").is_err());
        assert!(parse_timestamp("1:xx:03").is_err());
        assert!(parse_timestamp("1:2:3:4").is_err());
    }

    #[test]
    fn test_precedence_info_wins() {
        let trim = vec!["0".to_string(), "10".to_string()];
        let op = Operation::resolve(true, Some(2.0), Some(&trim), true).unwrap();
        assert_eq!(op, Operation::Info);
    }

    #[test]
    fn test_precedence_speed_over_trim_and_audio() {
        let trim = vec!["0".to_string(), "10".to_string()];
        let op = Operation::resolve(false, Some(0.5), Some(&trim), true).unwrap();
        assert_eq!(op, Operation::ChangeSpeed { factor: 0.5 });
    }

    #[test]
    fn test_precedence_trim_over_audio() {
        let trim = vec!["00:00:10".to_string(), "00:01:00".to_string()];
        let op = Operation::resolve(false, None, Some(&trim), true).unwrap();
        assert_eq!(
            op,
            Operation::Trim {
                start: 10.0,
                end: 60.0
            }
        );
    }

    #[test]
    fn test_audio_flag_selects_mp3() {
        let op = Operation::resolve(false, None, None, true).unwrap();
        assert_eq!(
            op,
            Operation::Transcode {
                format: OutputFormat::Mp3
            }
        );
    }

    #[test]
    fn test_default_is_mp4_transcode() {
        let op = Operation::resolve(false, None, None, false).unwrap();
        assert_eq!(
            op,
            Operation::Transcode {
                format: OutputFormat::Mp4
            }
        );
    }

    #[test]
    fn test_invalid_speed_factor_rejected() {
        assert!(Operation::resolve(false, Some(0.0), None, false).is_err());
        assert!(Operation::resolve(false, Some(-1.5), None, false).is_err());
        assert!(Operation::resolve(false, Some(f64::NAN), None, false).is_err());
    }

    #[test]
    fn test_reversed_trim_window_rejected() {
        let trim = vec!["1:00".to_string(), "0:30".to_string()];
        assert!(Operation::resolve(false, None, Some(&trim), false).is_err());
    }
}
