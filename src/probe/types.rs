use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

/// What the probe should inspect
///
/// Dry-run command rendering has no real file to probe, so it gets its own
/// variant instead of a magic placeholder path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeSource {
    /// A validated, existing input file
    RealFile(PathBuf),

    /// No file; synthesize a one-audio-plus-one-video inventory
    DryRunPlaceholder,
}

/// Stream metadata fields excluded from info display; both are verbose
/// nested objects that drown out the useful per-stream properties.
const NOISY_FIELDS: [&str; 2] = ["disposition", "tags"];

/// One declared stream inside a media container, as reported by ffprobe
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamInfo {
    /// Stream kind: "audio", "video", or something else (subtitles, data)
    pub codec_type: String,

    /// Codec name, e.g. "h264" or "aac"
    #[serde(default)]
    pub codec_name: Option<String>,

    /// Average frame rate as a "num/den" fraction (video streams only)
    #[serde(default)]
    pub avg_frame_rate: Option<String>,

    /// Every other field ffprobe reported, kept verbatim for info display
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl StreamInfo {
    /// Average frame rate rounded to whole frames per second
    ///
    /// Returns `None` when the field is missing, unparseable, or has a zero
    /// denominator (ffprobe reports "0/0" for streams without timing).
    pub fn rounded_fps(&self) -> Option<u32> {
        let rate = self.avg_frame_rate.as_deref()?;
        let (num, den) = rate.split_once('/')?;
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den == 0.0 {
            return None;
        }
        Some((num / den).round() as u32)
    }

    /// Render this stream's properties for `--info` display
    ///
    /// One `key  value` line per field, skipping the noisy nested objects.
    pub fn render(&self) -> String {
        let mut out = String::new();
        writeln!(out, "{:<24} {}", "codec_type", self.codec_type).ok();
        if let Some(codec_name) = &self.codec_name {
            writeln!(out, "{:<24} {}", "codec_name", codec_name).ok();
        }
        if let Some(avg_frame_rate) = &self.avg_frame_rate {
            writeln!(out, "{:<24} {}", "avg_frame_rate", avg_frame_rate).ok();
        }
        for (key, value) in &self.extra {
            if NOISY_FIELDS.contains(&key.as_str()) {
                continue;
            }
            writeln!(out, "{:<24} {}", key, render_value(value)).ok();
        }
        out
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The audio and video streams declared by one input file
///
/// Streams keep their probed order within each kind. Built once per
/// operation; the graph builder attaches a filter chain to a kind only when
/// its subset here is non-empty.
#[derive(Debug, Clone, Default)]
pub struct StreamInventory {
    /// Audio streams, in probed order
    pub audio: Vec<StreamInfo>,

    /// Video streams, in probed order
    pub video: Vec<StreamInfo>,
}

impl StreamInventory {
    /// Partition a probed stream list into audio and video subsets
    ///
    /// Subtitle and data streams are dropped; the tool never outputs them.
    pub fn from_streams(streams: Vec<StreamInfo>) -> Self {
        let mut inventory = Self::default();
        for stream in streams {
            match stream.codec_type.as_str() {
                "audio" => inventory.audio.push(stream),
                "video" => inventory.video.push(stream),
                _ => {}
            }
        }
        inventory
    }

    /// Inventory assumed for dry-run rendering: one audio + one video stream
    pub fn synthetic() -> Self {
        Self {
            audio: vec![StreamInfo {
                codec_type: "audio".to_string(),
                ..Default::default()
            }],
            video: vec![StreamInfo {
                codec_type: "video".to_string(),
                ..Default::default()
            }],
        }
    }

    pub fn has_audio(&self) -> bool {
        !self.audio.is_empty()
    }

    pub fn has_video(&self) -> bool {
        !self.video.is_empty()
    }

    /// First video stream, the one whose frame rate drives negotiation
    pub fn first_video(&self) -> Option<&StreamInfo> {
        self.video.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(codec_type: &str, avg_frame_rate: Option<&str>) -> StreamInfo {
        StreamInfo {
            codec_type: codec_type.to_string(),
            avg_frame_rate: avg_frame_rate.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_rounded_fps() {
        assert_eq!(stream("video", Some("30000/1001")).rounded_fps(), Some(30));
        assert_eq!(stream("video", Some("24/1")).rounded_fps(), Some(24));
        assert_eq!(stream("video", Some("0/0")).rounded_fps(), None);
        assert_eq!(stream("video", None).rounded_fps(), None);
    }

    #[test]
    fn test_partition_preserves_order_and_drops_other_kinds() {
        let streams = vec![
            stream("video", Some("25/1")),
            stream("audio", None),
            stream("subtitle", None),
            stream("video", Some("30/1")),
        ];
        let inventory = StreamInventory::from_streams(streams);

        assert_eq!(inventory.video.len(), 2);
        assert_eq!(inventory.audio.len(), 1);
        assert_eq!(
            inventory.first_video().unwrap().avg_frame_rate.as_deref(),
            Some("25/1")
        );
    }

    #[test]
    fn test_synthetic_inventory_has_both_kinds() {
        let inventory = StreamInventory::synthetic();
        assert!(inventory.has_audio());
        assert!(inventory.has_video());
    }

    #[test]
    fn test_render_skips_noisy_fields() {
        let json = serde_json::json!({
            "codec_type": "video",
            "codec_name": "h264",
            "width": 1920,
            "disposition": {"default": 1},
            "tags": {"language": "eng"}
        });
        let info: StreamInfo = serde_json::from_value(json).unwrap();
        let rendered = info.render();

        assert!(rendered.contains("codec_name"));
        assert!(rendered.contains("width"));
        assert!(!rendered.contains("disposition"));
        assert!(!rendered.contains("tags"));
    }

    #[test]
    fn test_render_unquotes_strings() {
        let json = serde_json::json!({
            "codec_type": "audio",
            "sample_rate": "44100"
        });
        let info: StreamInfo = serde_json::from_value(json).unwrap();
        let rendered = info.render();

        assert!(rendered.contains("44100"));
        assert!(!rendered.contains("\"44100\""));
    }
}
