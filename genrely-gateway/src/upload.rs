//! Transient upload artifacts
//!
//! Each in-flight prediction owns exactly one artifact on disk. Names
//! embed a timestamp and a random suffix so concurrent requests never
//! collide; uniqueness is the only concurrency mechanism the upload
//! directory needs. The artifact must be removed on every exit path;
//! removal failure is logged and swallowed so it can never mask the
//! primary outcome.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;
use tracing::{debug, warn};

use crate::{GatewayError, Result};

/// MIME types accepted for the `audio` upload field
pub const ALLOWED_MIME_TYPES: [&str; 5] = [
    "audio/wav",
    "audio/wave",
    "audio/x-wav",
    "audio/mpeg",
    "audio/mp3",
];

/// Whether a Content-Type is on the upload allow-list (parameters such
/// as `; boundary=` are ignored, matching is case-insensitive)
pub fn is_allowed_mime(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    ALLOWED_MIME_TYPES.contains(&essence.as_str())
}

/// A transient upload owned by one in-flight request
#[derive(Debug)]
pub struct UploadArtifact {
    path: PathBuf,
}

impl UploadArtifact {
    /// Persist `bytes` under `dir` with a collision-free name derived
    /// from the current time and a random suffix. The extension of the
    /// original file name is preserved.
    pub async fn store(dir: &Path, original_name: &str, bytes: &[u8]) -> Result<Self> {
        let path = dir.join(unique_name(original_name));
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            GatewayError::Internal(format!("failed to store upload {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), size = bytes.len(), "upload artifact stored");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component of the artifact path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Delete the artifact. Failures are logged, never surfaced.
    pub async fn remove(self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            warn!(path = %self.path.display(), error = %e, "failed to remove upload artifact");
        } else {
            debug!(path = %self.path.display(), "upload artifact removed");
        }
    }
}

fn unique_name(original_name: &str) -> String {
    let timestamp = Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    let ext = Path::new(original_name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("audio-{timestamp}-{suffix}{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn mime_allow_list() {
        assert!(is_allowed_mime("audio/wav"));
        assert!(is_allowed_mime("audio/x-wav"));
        assert!(is_allowed_mime("Audio/MP3"));
        assert!(is_allowed_mime("audio/mpeg; rate=44100"));
        assert!(!is_allowed_mime("audio/flac"));
        assert!(!is_allowed_mime("text/plain"));
        assert!(!is_allowed_mime(""));
    }

    #[test]
    fn unique_names_do_not_collide() {
        let names: HashSet<String> = (0..1000).map(|_| unique_name("track.wav")).collect();
        assert_eq!(names.len(), 1000);
        assert!(names.iter().all(|n| n.starts_with("audio-") && n.ends_with(".wav")));
    }

    #[test]
    fn name_without_extension() {
        let name = unique_name("track");
        assert!(!name.contains('.'));
    }

    #[tokio::test]
    async fn store_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = UploadArtifact::store(dir.path(), "song.mp3", b"RIFFdata")
            .await
            .unwrap();
        assert!(artifact.path().exists());
        assert!(artifact.file_name().ends_with(".mp3"));

        artifact.remove().await;
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn remove_swallows_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = UploadArtifact::store(dir.path(), "song.wav", b"x")
            .await
            .unwrap();
        std::fs::remove_file(artifact.path()).unwrap();
        // must not panic or error
        artifact.remove().await;
    }
}
