use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Named bitrate presets selectable from the command line
///
/// `Default` targets projected video (a talk beamed in a hall); `Tutorial`
/// trades quality for size on short screen-capture clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatePreset {
    Default,
    Tutorial,
}

/// Target bitrates and frame-rate ceiling for one invocation
///
/// Selected once at startup and passed by value; never mutated while files
/// are being processed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateProfile {
    /// Output audio bitrate in bits per second
    pub audio_bitrate: u32,

    /// Output video bitrate in bits per second
    pub video_bitrate: u32,

    /// Ceiling on the output frame rate; sources below it are never upsampled
    pub max_fps: u32,
}

impl Default for RateProfile {
    fn default() -> Self {
        Self::preset(RatePreset::Default)
    }
}

impl RateProfile {
    /// Look up one of the built-in presets
    pub fn preset(preset: RatePreset) -> Self {
        match preset {
            // 720p projection quality
            RatePreset::Default => Self {
                audio_bitrate: 128_000,
                video_bitrate: 500_000,
                max_fps: 25,
            },
            // Low-motion tutorial recordings
            RatePreset::Tutorial => Self {
                audio_bitrate: 128_000,
                video_bitrate: 200_000,
                max_fps: 10,
            },
        }
    }

    /// Load a custom profile from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.to_path_buf(),
        })?;

        let profile: RateProfile = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.to_path_buf(),
        })?;
        profile.validate()?;
        Ok(profile)
    }

    /// Save this profile to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "profile".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the profile
    pub fn validate(&self) -> Result<()> {
        if self.audio_bitrate == 0 {
            return Err(ConfigError::InvalidValue {
                key: "audio_bitrate".to_string(),
                value: self.audio_bitrate.to_string(),
            }
            .into());
        }

        if self.video_bitrate == 0 {
            return Err(ConfigError::InvalidValue {
                key: "video_bitrate".to_string(),
                value: self.video_bitrate.to_string(),
            }
            .into());
        }

        if self.max_fps == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_fps".to_string(),
                value: self.max_fps.to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Audio bitrate rounded to whole kilobits, as used in output filenames
    pub fn audio_kbps(&self) -> u32 {
        (self.audio_bitrate + 500) / 1000
    }

    /// Video bitrate rounded to whole kilobits, as used in output filenames
    pub fn video_kbps(&self) -> u32 {
        (self.video_bitrate + 500) / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_presets_match_documented_rates() {
        let default = RateProfile::preset(RatePreset::Default);
        assert_eq!(default.audio_bitrate, 128_000);
        assert_eq!(default.video_bitrate, 500_000);
        assert_eq!(default.max_fps, 25);

        let tutorial = RateProfile::preset(RatePreset::Tutorial);
        assert_eq!(tutorial.audio_bitrate, 128_000);
        assert_eq!(tutorial.video_bitrate, 200_000);
        assert_eq!(tutorial.max_fps, 10);
    }

    #[test]
    fn test_default_profile_is_valid() {
        assert!(RateProfile::default().validate().is_ok());
    }

    #[test]
    fn test_profile_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("profile.toml");

        let original = RateProfile::preset(RatePreset::Tutorial);
        original.save_to_file(&file_path).unwrap();
        let loaded = RateProfile::from_file(&file_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_zero_bitrate_rejected() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("profile.toml");

        let mut profile = RateProfile::default();
        profile.video_bitrate = 0;
        profile.save_to_file(&file_path).unwrap();

        assert!(RateProfile::from_file(&file_path).is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        assert!(RateProfile::from_file("/nonexistent/profile.toml").is_err());
    }

    #[test]
    fn test_kbps_rounding() {
        let profile = RateProfile::default();
        assert_eq!(profile.audio_kbps(), 128);
        assert_eq!(profile.video_kbps(), 500);
    }
}
