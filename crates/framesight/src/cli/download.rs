//! The `framesight download` command: fetch a video from an
//! allow-listed source into the configured output directory.

use clap::Args;
use framesight_core::{Config, DownloadRequest, VideoDownloader};
use std::path::PathBuf;

/// Arguments for the `download` command.
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Source URL (must match an allow-listed host)
    pub url: String,

    /// Output directory (defaults to the configured download directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Download only the audio track (mp3)
    #[arg(long)]
    pub audio_only: bool,
}

/// Execute the download command.
pub async fn execute(args: DownloadArgs, config: Config) -> anyhow::Result<()> {
    let output_dir = args
        .output
        .map(|p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned()))
        .unwrap_or_else(|| config.download_dir());

    let downloader = VideoDownloader::new(config.download.allowed_hosts.clone());
    let request = DownloadRequest {
        url: args.url,
        output_dir: output_dir.clone(),
        audio_only: args.audio_only,
    };

    downloader.download(&request).await?;
    println!("Downloaded to {}", output_dir.display());
    Ok(())
}
