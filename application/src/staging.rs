use std::path::{Path, PathBuf};

use scribe_domain::{DomainError, ManifestEntry};

/// Per-request scratch directory holding the transient files the model
/// interface requires. The directory is deleted on drop; removal
/// failures are ignored.
pub struct JobScratch {
    dir: tempfile::TempDir,
}

impl JobScratch {
    pub fn new() -> Result<Self, DomainError> {
        let dir = tempfile::Builder::new()
            .prefix("scribe-job-")
            .tempdir()
            .map_err(|err| {
                DomainError::internal_error(&format!("failed to create scratch dir: {err}"))
            })?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Materialize the in-memory audio payload for the model to read.
    pub fn write_audio(&self, bytes: &[u8]) -> Result<PathBuf, DomainError> {
        let path = self.dir.path().join("audio.wav");
        std::fs::write(&path, bytes).map_err(|err| {
            DomainError::internal_error(&format!("failed to stage audio file: {err}"))
        })?;
        Ok(path)
    }

    /// Write a single-entry JSON Lines manifest.
    pub fn write_manifest(&self, entry: &ManifestEntry) -> Result<PathBuf, DomainError> {
        let path = self.dir.path().join("manifest.jsonl");
        let mut line = entry.to_json_line()?;
        line.push('\n');
        std::fs::write(&path, line).map_err(|err| {
            DomainError::internal_error(&format!("failed to stage manifest file: {err}"))
        })?;
        Ok(path)
    }
}
