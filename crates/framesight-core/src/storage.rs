//! Application-data storage helpers.
//!
//! Durable state (the response cache, persisted sampling metadata) lives
//! under a platform-appropriate application-data directory. Filenames
//! derived from video titles are sanitized before touching the disk.

use crate::error::Result;
use crate::types::Video;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Directory name for the response cache under the app-data root.
pub const LLM_CACHE_DIR: &str = "llm_cache";

/// Filename of the per-run sampling metadata document.
pub const METADATA_FILE: &str = "metadata.json";

/// Platform application-data root for Framesight.
///
/// - macOS: `~/Library/Application Support/com.framesight.framesight`
/// - Linux: `~/.local/share/framesight`
/// - Windows: `C:\Users\<User>\AppData\Roaming\framesight\data`
///
/// Falls back to `~/.framesight` if directory detection fails.
pub fn app_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "framesight", "framesight")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".framesight")
        })
}

/// Strip a name down to filesystem-safe characters.
///
/// Keeps alphanumerics and underscores; collapses runs of whitespace and
/// dashes into a single dash; drops everything else.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_separator_run = false;
    for c in name.chars() {
        if c.is_whitespace() || c == '-' {
            if !in_separator_run {
                out.push('-');
                in_separator_run = true;
            }
        } else if c.is_alphanumeric() || c == '_' {
            out.push(c);
            in_separator_run = false;
        }
        // Anything else is dropped without breaking a separator run
    }
    out
}

/// Write a value as pretty JSON, creating parent directories as needed.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

/// Read a JSON document back into a value.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl Video {
    /// Persist this sampling run's metadata document into `dir`.
    pub async fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(METADATA_FILE);
        write_json(&path, self).await?;
        tracing::info!("Metadata written to {}", path.display());
        Ok(path)
    }

    /// Load a previously persisted metadata document.
    pub async fn load(path: &Path) -> Result<Self> {
        read_json(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Frame;

    #[test]
    fn test_sanitize_keeps_word_characters() {
        assert_eq!(sanitize_file_name("clip_01"), "clip_01");
    }

    #[test]
    fn test_sanitize_collapses_separators() {
        assert_eq!(
            sanitize_file_name("My Video! (1080p).mp4"),
            "My-Video-1080pmp4"
        );
        assert_eq!(sanitize_file_name("a -- b\t\tc"), "a-b-c");
    }

    #[test]
    fn test_app_data_dir_is_absolute_or_fallback() {
        let dir = app_data_dir();
        assert!(!dir.as_os_str().is_empty());
    }

    #[tokio::test]
    async fn test_video_metadata_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let video = Video {
            name: "clip.mp4".to_string(),
            path: PathBuf::from("/videos/clip.mp4"),
            frames: vec![Frame::new(2.5, "/frames/2.5.jpg")],
        };

        let path = video.save(dir.path()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), METADATA_FILE);

        let loaded = Video::load(&path).await.unwrap();
        assert_eq!(loaded.name, "clip.mp4");
        assert_eq!(loaded.frames, video.frames);
    }

    #[tokio::test]
    async fn test_write_json_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/data.json");
        write_json(&nested, &serde_json::json!({"k": 1})).await.unwrap();
        let back: serde_json::Value = read_json(&nested).await.unwrap();
        assert_eq!(back["k"], 1);
    }
}
