use std::path::Path;

use async_trait::async_trait;

use scribe_domain::{parse_manifest, DomainError, ModelResult, TranscriptionModelPort};

/// Stand-in model used when the service is compiled without a whisper
/// runtime. Honors the manifest interface and returns fixed text.
pub struct FallbackTranscriptionModel;

#[async_trait]
impl TranscriptionModelPort for FallbackTranscriptionModel {
    async fn transcribe(&self, manifest_path: &Path) -> Result<Vec<ModelResult>, DomainError> {
        let content = std::fs::read_to_string(manifest_path).map_err(|err| {
            DomainError::internal_error(&format!(
                "failed to read manifest {}: {err}",
                manifest_path.display()
            ))
        })?;
        let entries = parse_manifest(&content)?;
        Ok(entries
            .iter()
            .map(|entry| ModelResult {
                text: format!(
                    "transcription unavailable ({} task, no model runtime)",
                    task_label(entry.taskname)
                ),
            })
            .collect())
    }
}

fn task_label(task: scribe_domain::TaskName) -> &'static str {
    match task {
        scribe_domain::TaskName::Asr => "asr",
        scribe_domain::TaskName::S2tTranslation => "s2t_translation",
    }
}
