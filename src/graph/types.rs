/// One named filter transformation applied to a stream before output
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStage {
    /// Engine filter name, e.g. "scale", "fps", "setpts", "atempo"
    pub name: String,

    /// Positional arguments, unescaped
    pub args: Vec<String>,
}

impl FilterStage {
    pub fn new<N: Into<String>>(name: N, args: &[&str]) -> Self {
        Self {
            name: name.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Render as engine filter syntax, e.g. `scale=-1:min(720\,ih)`
    ///
    /// Commas, colons and backslashes inside arguments are escaped so the
    /// stage survives embedding in a larger filter-chain expression.
    pub fn render(&self) -> String {
        if self.args.is_empty() {
            return self.name.clone();
        }
        let args: Vec<String> = self.args.iter().map(|a| escape_arg(a)).collect();
        format!("{}={}", self.name, args.join(":"))
    }
}

fn escape_arg(arg: &str) -> String {
    let mut escaped = String::with_capacity(arg.len());
    for c in arg.chars() {
        if matches!(c, '\\' | ',' | ':') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Half-open clock-time window handed to the engine as seek-to / end-at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWindow {
    /// Seek position in seconds
    pub start: f64,

    /// End position in seconds
    pub end: f64,
}

impl ClipWindow {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Terminal output settings for a graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputSettings {
    /// Container format; `None` lets the engine infer from the extension
    pub container: Option<&'static str>,

    /// Target video bitrate in bits per second
    pub video_bitrate: Option<u32>,

    /// Video bitrate ceiling in bits per second
    pub maxrate: Option<u32>,

    /// Rate-control buffer size in bits
    pub bufsize: Option<u32>,

    /// Target audio bitrate in bits per second
    pub audio_bitrate: Option<u32>,
}

/// A complete processing-graph description for one input file
///
/// `video_filters`/`audio_filters` are `Some` exactly when that stream kind
/// is emitted; an empty chain means "pass the stream through unfiltered".
/// Produced fresh per input file and consumed immediately by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphDescription {
    /// Engine-level clip window, set only for trim operations
    pub clip: Option<ClipWindow>,

    /// Filter chain for the video stream, if video is emitted
    pub video_filters: Option<Vec<FilterStage>>,

    /// Filter chain for the audio stream, if audio is emitted
    pub audio_filters: Option<Vec<FilterStage>>,

    /// Terminal output settings
    pub output: OutputSettings,
}

impl GraphDescription {
    pub fn emits_video(&self) -> bool {
        self.video_filters.is_some()
    }

    pub fn emits_audio(&self) -> bool {
        self.audio_filters.is_some()
    }

    /// Whether any filter stage is attached to either stream kind
    pub fn has_filters(&self) -> bool {
        let video = self.video_filters.as_ref().is_some_and(|f| !f.is_empty());
        let audio = self.audio_filters.as_ref().is_some_and(|f| !f.is_empty());
        video || audio
    }
}
