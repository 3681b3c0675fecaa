//! # Media Engine Module
//!
//! Renders a [`GraphDescription`] into an ffmpeg argument vector and runs it
//! as one blocking subprocess per file. The same rendering backs the dry-run
//! command display, which never spawns anything.

use std::path::Path;

use tokio::process::Command;
use tracing::{debug, error, info};

use crate::{
    error::EngineError,
    graph::{FilterStage, GraphDescription},
    naming::decimal,
};

/// Render a graph into the ffmpeg argument vector for one input file
pub fn render_args(graph: &GraphDescription, input: &Path, output: &Path) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();

    // Clip window is an input-side seek, ahead of -i.
    if let Some(clip) = &graph.clip {
        args.push("-ss".to_string());
        args.push(decimal(clip.start));
        args.push("-to".to_string());
        args.push(decimal(clip.end));
    }

    args.push("-i".to_string());
    args.push(input.display().to_string());

    let video_chain = render_chain(&graph.video_filters, "0:v", "vout");
    let audio_chain = render_chain(&graph.audio_filters, "0:a", "aout");

    if video_chain.is_some() || audio_chain.is_some() {
        let expr: Vec<String> = [&video_chain, &audio_chain]
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        args.push("-filter_complex".to_string());
        args.push(expr.join(";"));
    }

    // Map each emitted kind: the chain's labeled output when filtered,
    // the raw input stream otherwise.
    if graph.emits_video() {
        args.push("-map".to_string());
        args.push(if video_chain.is_some() {
            "[vout]".to_string()
        } else {
            "0:v".to_string()
        });
    }
    if graph.emits_audio() {
        args.push("-map".to_string());
        args.push(if audio_chain.is_some() {
            "[aout]".to_string()
        } else {
            "0:a".to_string()
        });
    }

    if let Some(video_bitrate) = graph.output.video_bitrate {
        args.push("-b:v".to_string());
        args.push(video_bitrate.to_string());
    }
    if let Some(maxrate) = graph.output.maxrate {
        args.push("-maxrate".to_string());
        args.push(maxrate.to_string());
    }
    if let Some(bufsize) = graph.output.bufsize {
        args.push("-bufsize".to_string());
        args.push(bufsize.to_string());
    }
    if let Some(audio_bitrate) = graph.output.audio_bitrate {
        args.push("-b:a".to_string());
        args.push(audio_bitrate.to_string());
    }
    if let Some(container) = graph.output.container {
        args.push("-f".to_string());
        args.push(container.to_string());
    }

    args.push(output.display().to_string());
    args.push("-y".to_string());

    args
}

fn render_chain(filters: &Option<Vec<FilterStage>>, label_in: &str, label_out: &str) -> Option<String> {
    let stages = filters.as_ref().filter(|f| !f.is_empty())?;
    let rendered: Vec<String> = stages.iter().map(FilterStage::render).collect();
    Some(format!("[{}]{}[{}]", label_in, rendered.join(","), label_out))
}

/// Render the equivalent shell command line for display
///
/// Pure string work for the `-c/--command` convenience; nothing is spawned
/// and no path needs to exist.
pub fn render_command_line(graph: &GraphDescription, input: &Path, output: &Path) -> String {
    let mut line = String::from("ffmpeg");
    for arg in render_args(graph, input, output) {
        line.push(' ');
        line.push_str(&arg);
    }
    line
}

/// Execute a graph against an input file, blocking until ffmpeg exits
///
/// A non-zero exit status is terminal for the whole run; no retries, no
/// timeout, and any partially written output file is left in place.
pub async fn execute(
    graph: &GraphDescription,
    input: &Path,
    output: &Path,
) -> Result<(), EngineError> {
    let args = render_args(graph, input, output);
    debug!("Running ffmpeg {}", args.join(" "));

    let result = Command::new("ffmpeg").args(&args).output().await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EngineError::ToolNotFound
        } else {
            EngineError::Io(e)
        }
    })?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        error!("ffmpeg failed: {}", stderr.trim_end());
        return Err(EngineError::ExecutionFailed {
            status: result.status.to_string(),
            output: output.display().to_string(),
        });
    }

    info!("Wrote {:?}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateProfile;
    use crate::graph::GraphBuilder;
    use crate::ops::{Operation, OutputFormat};
    use crate::probe::StreamInventory;

    fn build(operation: &Operation) -> GraphDescription {
        let profile = RateProfile::default();
        let inventory = StreamInventory::synthetic();
        GraphBuilder::new(&profile, &inventory)
            .build(operation)
            .unwrap()
    }

    fn args_for(operation: &Operation) -> Vec<String> {
        render_args(
            &build(operation),
            Path::new("in.mov"),
            Path::new("out.mp4"),
        )
    }

    #[test]
    fn test_transcode_args() {
        let args = args_for(&Operation::Transcode {
            format: OutputFormat::Mp4,
        });
        let joined = args.join(" ");

        assert!(joined.starts_with("-i in.mov"));
        assert!(joined.contains("-filter_complex [0:v]scale=-1:min(720\\,ih),fps=25[vout]"));
        assert!(joined.contains("-map [vout]"));
        assert!(joined.contains("-map 0:a"));
        assert!(joined.contains("-b:v 500000"));
        assert!(joined.contains("-maxrate 500000"));
        assert!(joined.contains("-bufsize 100000"));
        assert!(joined.contains("-b:a 128000"));
        assert!(joined.contains("-f mp4"));
        assert!(joined.ends_with("out.mp4 -y"));
    }

    #[test]
    fn test_speed_args_chain_both_kinds() {
        let args = args_for(&Operation::ChangeSpeed { factor: 2.0 });
        let joined = args.join(" ");

        assert!(joined.contains("[0:v]setpts=0.5*PTS[vout];[0:a]atempo=2.0[aout]"));
        assert!(joined.contains("-map [vout]"));
        assert!(joined.contains("-map [aout]"));
    }

    #[test]
    fn test_trim_args_seek_without_filters() {
        let args = args_for(&Operation::Trim {
            start: 10.0,
            end: 60.0,
        });
        let joined = args.join(" ");

        assert!(joined.starts_with("-ss 10.0 -to 60.0 -i in.mov"));
        assert!(!joined.contains("-filter_complex"));
        assert!(!joined.contains("-b:v"));
    }

    #[test]
    fn test_command_line_rendering() {
        let graph = build(&Operation::Transcode {
            format: OutputFormat::Mp4,
        });
        let line = render_command_line(&graph, Path::new("<infile>"), Path::new("<outfile>.mp4"));

        assert!(line.starts_with("ffmpeg -i <infile>"));
        assert!(line.contains("-filter_complex"));
        assert!(line.ends_with("<outfile>.mp4 -y"));
    }
}
