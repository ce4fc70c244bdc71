//! The `framesight analyze` command: run the frame-analysis pipeline
//! over a sampling run's metadata document.

use anyhow::Context;
use clap::{Args, ValueEnum};
use framesight_core::llm::{ChatClientFactory, Detail};
use framesight_core::{
    encode, AnalyzeOptions, Config, Frame, FrameAnalyzer, Instruction, Outcome, Video,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Default instruction for per-frame analysis.
const FRAME_ANALYSIS_PROMPT: &str = "\
You are an expert at analyzing video frames. You should answer the following \
questions about the video frame provided to you:

- How many people are in the frame? **Only count people who are clearly visible and not partially cut off.**
- How many people are looking at the camera? **Only count people who are looking directly at the camera.**
- How many people are smiling? **Only count people who are clearly smiling.**

You should also provide a general description of the scene and the people in the frame.

Provide your answers in the following JSON format:
{schema}";

/// Expected per-frame result schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameAnalysisReport {
    /// The total number of people in the frame
    pub people_count: u32,

    /// The number of people looking at the camera
    pub looking_at_camera_count: u32,

    /// The number of people smiling
    pub smiling_count: u32,

    /// A general description of the scene and the people in the frame
    pub scene_description: String,
}

fn schema_example() -> FrameAnalysisReport {
    FrameAnalysisReport {
        people_count: 7,
        looking_at_camera_count: 3,
        smiling_count: 2,
        scene_description: "A group of people standing in front of a whiteboard in a conference room."
            .to_string(),
    }
}

/// One output line/element: a frame's offset with its analysis outcome.
#[derive(Debug, Serialize)]
struct AnalyzedFrame {
    offset: f64,
    analysis: Outcome<FrameAnalysisReport>,
}

/// Output serialization format.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to a sampling run's metadata.json
    pub metadata: PathBuf,

    /// Write results here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Override the configured model
    #[arg(long)]
    pub model: Option<String>,

    /// Override the configured concurrency bound
    #[arg(long)]
    pub parallel: Option<usize>,

    /// Bypass the response cache for this run
    #[arg(long)]
    pub no_cache: bool,
}

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs, mut config: Config) -> anyhow::Result<()> {
    if args.no_cache {
        config.llm.cache = false;
    }

    let metadata = PathBuf::from(shellexpand::tilde(&args.metadata.to_string_lossy()).into_owned());
    let video = Video::load(&metadata)
        .await
        .with_context(|| format!("Failed to load metadata from {}", metadata.display()))?;
    tracing::info!(
        "Loaded '{}' with {} sampled frames",
        video.name,
        video.frames.len()
    );

    let client = Arc::new(ChatClientFactory::create(&config)?);
    let options = AnalyzeOptions {
        model: args
            .model
            .unwrap_or_else(|| ChatClientFactory::model(&config)),
        temperature: config.analysis.temperature,
        detail: if config.analysis.detail == "high" {
            Detail::High
        } else {
            Detail::Low
        },
        parallel: args.parallel.unwrap_or(config.analysis.parallel),
    };

    let instruction = Instruction::with_example(FRAME_ANALYSIS_PROMPT, &schema_example());
    let analyzer = FrameAnalyzer::new(instruction, client, options);

    let progress = create_progress_bar(encodable(&video.frames).count() as u64);
    let results = {
        let progress = progress.clone();
        analyzer
            .analyze_with_progress(&video.frames, move |done, _total| {
                progress.set_position(done as u64);
            })
            .await?
    };
    progress.finish_and_clear();

    let failed = results.iter().filter(|r| r.is_failed()).count();
    if failed > 0 {
        tracing::warn!("{failed} of {} frames failed validation", results.len());
    }

    let analyzed: Vec<AnalyzedFrame> = encodable(&video.frames)
        .zip(results)
        .map(|(frame, analysis)| AnalyzedFrame {
            offset: frame.offset,
            analysis,
        })
        .collect();

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&analyzed)?,
        OutputFormat::Jsonl => analyzed
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?
            .join("\n"),
    };

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, rendered).await?;
            tracing::info!("Results written to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// The frames the encoder will actually produce payloads for.
fn encodable(frames: &[Frame]) -> impl Iterator<Item = &Frame> {
    frames
        .iter()
        .filter(|frame| encode::media_type(&frame.image).is_some())
}

/// Create a progress bar for the analysis run.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("analyzing frames...");
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_has_schema_placeholder() {
        assert!(FRAME_ANALYSIS_PROMPT.contains("{schema}"));
    }

    #[test]
    fn test_default_instruction_renders() {
        let instruction = Instruction::with_example(FRAME_ANALYSIS_PROMPT, &schema_example());
        let rendered = instruction.render().unwrap();
        assert!(rendered.contains("people_count"));
        assert!(!rendered.contains("{schema}"));
    }

    #[test]
    fn test_encodable_filters_unsupported() {
        let frames = vec![
            Frame::new(0.0, "a.png"),
            Frame::new(1.0, "b.tiff"),
            Frame::new(2.0, "c.jpg"),
        ];
        let kept: Vec<_> = encodable(&frames).map(|f| f.offset).collect();
        assert_eq!(kept, vec![0.0, 2.0]);
    }
}
