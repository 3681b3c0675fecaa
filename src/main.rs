use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};

use normvid::{
    config::{RatePreset, RateProfile},
    engine,
    graph::GraphBuilder,
    naming,
    ops::{Operation, OutputFormat},
    probe::{self, ProbeSource},
};

#[derive(Parser)]
#[command(
    name = "normvid",
    version,
    about = "Convert video files to MP4, ensuring baseline video quality",
    long_about = "Convert video files to MP4, ensuring baseline video quality:\n\
  * Default:  720p, 500 Kbps, 25 fps for projected video\n\
  * Tutorial: 720p, 200 Kbps, 10 fps for tutorial video"
)]
struct Cli {
    /// Convert file(s) to MP3 audio
    #[arg(short, long)]
    audio: bool,

    /// Print the equivalent ffmpeg command line
    #[arg(short, long)]
    command: bool,

    /// Show audio and video properties of the given file(s)
    #[arg(short, long)]
    info: bool,

    /// Change the playback speed by the given factor (<1 speeds up, >1 slows down)
    #[arg(short, long)]
    speed: Option<f64>,

    /// Use lower bitrate and fewer fps for short tutorial videos
    #[arg(short, long)]
    tutorial: bool,

    /// Trim the file to content between two timestamps ([[HH:]MM:]SS)
    #[arg(short = 'k', long, num_args = 2, value_names = ["START", "END"])]
    trim: Option<Vec<String>>,

    /// Load a custom rate profile from a TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Space-separated list of video files to normalize
    video: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    // Select the rate profile: custom file, tutorial preset, or default.
    let profile = match &cli.config {
        Some(path) => {
            info!("Loading rate profile from {:?}", path);
            RateProfile::from_file(path)?
        }
        None if cli.tutorial => RateProfile::preset(RatePreset::Tutorial),
        None => RateProfile::preset(RatePreset::Default),
    };

    // Resolve the flags into exactly one operation; malformed timestamps and
    // bad speed factors fail here, before any file is touched.
    let operation = Operation::resolve(cli.info, cli.speed, cli.trim.as_deref(), cli.audio)?;

    if cli.command {
        show_command(&operation, &profile).await?;
    }

    // Process each file fully before starting the next. An invalid path is
    // skipped; a probe or engine failure aborts the whole run.
    for input in &cli.video {
        let Some(input_path) = validate_input(input) else {
            error!("Invalid input file: {}", input);
            continue;
        };
        process_file(&input_path, &operation, &profile).await?;
    }

    Ok(())
}

/// Expand `~`, resolve the path, and require a regular file
fn validate_input(raw: &str) -> Option<PathBuf> {
    let expanded = shellexpand::tilde(raw);
    let path = Path::new(expanded.as_ref()).canonicalize().ok()?;
    path.is_file().then_some(path)
}

/// Run one operation against one validated input file
async fn process_file(input: &Path, operation: &Operation, profile: &RateProfile) -> Result<()> {
    // Info shows every probed stream in its original order, so it reads the
    // raw stream list rather than the audio/video partition.
    if let Operation::Info = operation {
        println!();
        for stream in probe::probe(input).await? {
            print!("{}", stream.render());
            println!();
        }
        return Ok(());
    }

    let source = ProbeSource::RealFile(input.to_path_buf());
    let inventory = probe::resolve_inventory(&source).await?;

    let graph = GraphBuilder::new(profile, &inventory)
        .build(operation)
        .expect("non-info operations always build a graph");
    let output = naming::output_path(input, operation, profile)
        .expect("non-info operations always have an output");

    info!("Processing {:?} -> {:?}", input, output);
    engine::execute(&graph, input, &output).await?;
    Ok(())
}

/// Print the equivalent ffmpeg command line without touching anything
///
/// Builds the graph from the synthetic one-audio-plus-one-video inventory;
/// speed requests render the speed graph, everything else the default
/// transcode graph.
async fn show_command(operation: &Operation, profile: &RateProfile) -> Result<()> {
    let inventory = probe::resolve_inventory(&ProbeSource::DryRunPlaceholder).await?;

    let rendered_op = match operation {
        Operation::ChangeSpeed { .. } => operation.clone(),
        _ => Operation::Transcode {
            format: OutputFormat::Mp4,
        },
    };
    let graph = GraphBuilder::new(profile, &inventory)
        .build(&rendered_op)
        .expect("dry-run operations always build a graph");

    let line = engine::render_command_line(
        &graph,
        Path::new("<infile>"),
        Path::new("<outfile>.mp4"),
    );
    println!("NOTE: If you run the ffmpeg command directly, the argument after -filter_complex needs to be quoted.\n");
    println!("{}\n", line);
    Ok(())
}
