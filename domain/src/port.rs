use std::path::Path;

use async_trait::async_trait;

use crate::{AudioPayload, AudioSource, DomainError, ModelResult};

#[async_trait]
pub trait AudioAcquisitionPort: Send + Sync {
    async fn acquire(&self, source: &AudioSource) -> Result<AudioPayload, DomainError>;
}

/// Facade over the pretrained model. The manifest file is the model's
/// batch interface; one result is returned per manifest entry.
#[async_trait]
pub trait TranscriptionModelPort: Send + Sync {
    async fn transcribe(&self, manifest_path: &Path) -> Result<Vec<ModelResult>, DomainError>;
}
