//! ffprobe invocation and JSON parsing.

use std::path::Path;

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use super::types::{ProbeSource, StreamInfo, StreamInventory};
use crate::error::ProbeError;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<StreamInfo>,
}

/// Probe a media file's stream list with ffprobe
pub async fn probe(path: &Path) -> Result<Vec<StreamInfo>, ProbeError> {
    debug!("Probing {:?}", path);

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProbeError::ToolNotFound
            } else {
                ProbeError::Io(e)
            }
        })?;

    if !output.status.success() {
        return Err(ProbeError::NotMedia {
            path: path.display().to_string(),
        });
    }

    let parsed: FfprobeOutput =
        serde_json::from_slice(&output.stdout).map_err(|e| ProbeError::ParseFailed {
            reason: e.to_string(),
        })?;

    debug!("Probe found {} stream(s)", parsed.streams.len());
    Ok(parsed.streams)
}

/// Resolve a probe source into its stream inventory
///
/// A real file is probed once; the dry-run placeholder never touches the
/// filesystem and yields the synthetic one-audio-plus-one-video inventory.
pub async fn resolve_inventory(source: &ProbeSource) -> Result<StreamInventory, ProbeError> {
    match source {
        ProbeSource::RealFile(path) => {
            let streams = probe(path).await?;
            Ok(StreamInventory::from_streams(streams))
        }
        ProbeSource::DryRunPlaceholder => Ok(StreamInventory::synthetic()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_placeholder_never_probes() {
        // No ffprobe needed; must succeed on a machine without ffmpeg.
        let inventory = resolve_inventory(&ProbeSource::DryRunPlaceholder)
            .await
            .unwrap();
        assert!(inventory.has_audio());
        assert!(inventory.has_video());
    }

    #[test]
    fn test_parse_ffprobe_json() {
        let json = r#"{
            "streams": [
                {"index": 0, "codec_type": "video", "codec_name": "h264",
                 "avg_frame_rate": "30000/1001", "width": 1280, "height": 720},
                {"index": 1, "codec_type": "audio", "codec_name": "aac",
                 "sample_rate": "48000"}
            ],
            "format": {"format_name": "mov,mp4,m4a,3gp,3g2,mj2"}
        }"#;

        let parsed: FfprobeOutput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.streams.len(), 2);

        let inventory = StreamInventory::from_streams(parsed.streams);
        assert_eq!(inventory.video.len(), 1);
        assert_eq!(inventory.audio.len(), 1);
        assert_eq!(inventory.first_video().unwrap().rounded_fps(), Some(30));
    }

    #[test]
    fn test_parse_empty_streams() {
        let parsed: FfprobeOutput = serde_json::from_str(r#"{"streams": []}"#).unwrap();
        let inventory = StreamInventory::from_streams(parsed.streams);
        assert!(!inventory.has_audio());
        assert!(!inventory.has_video());
    }
}
