//! Video acquisition from allow-listed remote sources.
//!
//! Downloads are delegated to the external `yt-dlp` tool; this module
//! owns the URL allow-list and the tool invocation. A URL outside the
//! allow-list is rejected before any network or process activity.

use crate::error::DownloadError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Default allowed host patterns.
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &["youtube.com", "youtu.be"];

/// One download request.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub output_dir: PathBuf,
    pub audio_only: bool,
}

/// Downloader bound to an allow-list of host patterns.
#[derive(Debug, Clone)]
pub struct VideoDownloader {
    allowed_hosts: Vec<String>,
}

impl Default for VideoDownloader {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_HOSTS.iter().map(|s| s.to_string()))
    }
}

impl VideoDownloader {
    pub fn new(allowed_hosts: impl IntoIterator<Item = String>) -> Self {
        Self {
            allowed_hosts: allowed_hosts.into_iter().collect(),
        }
    }

    /// Check a URL against the allow-list.
    pub fn validate_url(&self, url: &str) -> Result<(), DownloadError> {
        let lowered = url.to_lowercase();
        if self.allowed_hosts.iter().any(|host| lowered.contains(host)) {
            Ok(())
        } else {
            Err(DownloadError::UnsupportedUrl(url.to_string()))
        }
    }

    /// Download a video (or just its audio) into the output directory.
    pub async fn download(&self, request: &DownloadRequest) -> Result<(), DownloadError> {
        self.validate_url(&request.url)?;
        tokio::fs::create_dir_all(&request.output_dir).await?;

        let mut command = Command::new("yt-dlp");
        command
            .args(tool_args(&request.output_dir, request.audio_only))
            .arg(&request.url)
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        tracing::info!("Downloading {} to {}", request.url, request.output_dir.display());
        let output = command.output().await?;
        if !output.status.success() {
            return Err(DownloadError::Tool {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Arguments for `yt-dlp`: merged mp4 for video, mp3 extraction for audio.
fn tool_args(output: &Path, audio_only: bool) -> Vec<String> {
    let template = format!("{}/%(title)s.%(ext)s", output.display());
    if audio_only {
        vec![
            "--format".to_string(),
            "bestaudio/best".to_string(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            "mp3".to_string(),
            "--audio-quality".to_string(),
            "192K".to_string(),
            "--output".to_string(),
            template,
        ]
    } else {
        vec![
            "--format".to_string(),
            "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]".to_string(),
            "--merge-output-format".to_string(),
            "mp4".to_string(),
            "--output".to_string(),
            template,
        ]
    }
}
