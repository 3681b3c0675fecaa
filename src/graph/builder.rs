use tracing::debug;

use super::types::{ClipWindow, FilterStage, GraphDescription, OutputSettings};
use crate::{
    config::RateProfile,
    naming::decimal,
    ops::{Operation, OutputFormat},
    probe::StreamInventory,
};

/// Rate-control buffer size passed to the engine alongside maxrate
const BUFSIZE: u32 = 100_000;

/// Video height ceiling; sources taller than nominal HD are scaled down,
/// shorter ones pass through untouched
const MAX_HEIGHT_EXPR: &str = "min(720,ih)";

/// Builds a processing-graph description for one input file
///
/// Holds the probed stream inventory and the selected rate profile; each
/// operation variant has its own terminal building path with no shared
/// mutable state. Filter chains are attached only to stream kinds present in
/// the inventory, so a graph can never reference a missing stream.
pub struct GraphBuilder<'a> {
    profile: &'a RateProfile,
    inventory: &'a StreamInventory,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(profile: &'a RateProfile, inventory: &'a StreamInventory) -> Self {
        Self { profile, inventory }
    }

    /// Build the graph for any graph-producing operation
    ///
    /// Returns `None` for info display, which bypasses graph building.
    pub fn build(&self, operation: &Operation) -> Option<GraphDescription> {
        match operation {
            Operation::Transcode { format } => Some(self.transcode(*format)),
            Operation::ChangeSpeed { factor } => Some(self.change_speed(*factor)),
            Operation::Trim { start, end } => Some(self.trim(*start, *end)),
            Operation::Info => None,
        }
    }

    /// Effective output frame rate for video transcodes
    ///
    /// The minimum of the first video stream's probed average rate and the
    /// profile ceiling: never upsample a low-rate source, cap a high-rate
    /// one. Falls back to the ceiling when the probed rate is unavailable.
    pub fn negotiated_fps(&self) -> u32 {
        let ceiling = self.profile.max_fps;
        match self.inventory.first_video().and_then(|v| v.rounded_fps()) {
            Some(probed) => {
                let fps = probed.min(ceiling);
                debug!("Negotiated fps {} (probed {}, ceiling {})", fps, probed, ceiling);
                fps
            }
            None => ceiling,
        }
    }

    fn transcode(&self, format: OutputFormat) -> GraphDescription {
        match format {
            OutputFormat::Mp4 => {
                let video_filters = self.inventory.has_video().then(|| {
                    let fps = self.negotiated_fps().to_string();
                    vec![
                        FilterStage::new("scale", &["-1", MAX_HEIGHT_EXPR]),
                        FilterStage::new("fps", &[fps.as_str()]),
                    ]
                });
                self.finish(video_filters, self.passthrough_audio(), format)
            }
            // MP3 extraction drops any video stream entirely
            OutputFormat::Mp3 => self.finish(None, self.passthrough_audio(), format),
        }
    }

    fn change_speed(&self, factor: f64) -> GraphDescription {
        // Video timestamps stretch by the reciprocal; audio tempo scales by
        // the factor directly. Both must be applied together or the output
        // desynchronizes.
        let video_filters = self.inventory.has_video().then(|| {
            let setpts = format!("{}*PTS", decimal(1.0 / factor));
            vec![FilterStage::new("setpts", &[setpts.as_str()])]
        });
        let audio_filters = self.inventory.has_audio().then(|| {
            let tempo = decimal(factor);
            vec![FilterStage::new("atempo", &[tempo.as_str()])]
        });

        self.finish(video_filters, audio_filters, OutputFormat::Mp4)
    }

    fn trim(&self, start: f64, end: f64) -> GraphDescription {
        // The window is an engine-level seek, not a filter stage; streams
        // pass through with the engine's default encoding settings.
        GraphDescription {
            clip: Some(ClipWindow { start, end }),
            video_filters: self.inventory.has_video().then(Vec::new),
            audio_filters: self.inventory.has_audio().then(Vec::new),
            output: OutputSettings::default(),
        }
    }

    fn passthrough_audio(&self) -> Option<Vec<FilterStage>> {
        self.inventory.has_audio().then(Vec::new)
    }

    /// Shared output-selection policy for the transcode-family paths
    ///
    /// Both kinds present: emit both into one container. Video only: emit
    /// video only. Audio only: force the container to mp3 regardless of the
    /// requested format.
    fn finish(
        &self,
        video_filters: Option<Vec<FilterStage>>,
        audio_filters: Option<Vec<FilterStage>>,
        requested: OutputFormat,
    ) -> GraphDescription {
        let has_video = video_filters.is_some();
        let has_audio = audio_filters.is_some();

        let output = if has_video {
            OutputSettings {
                container: Some(requested.container()),
                video_bitrate: Some(self.profile.video_bitrate),
                maxrate: Some(self.profile.video_bitrate),
                bufsize: Some(BUFSIZE),
                audio_bitrate: has_audio.then_some(self.profile.audio_bitrate),
            }
        } else {
            OutputSettings {
                container: Some(OutputFormat::Mp3.container()),
                audio_bitrate: has_audio.then_some(self.profile.audio_bitrate),
                ..Default::default()
            }
        };

        GraphDescription {
            clip: None,
            video_filters,
            audio_filters,
            output,
        }
    }
}
