use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use uuid::Uuid;

use scribe_domain::{
    AudioAcquisitionPort, AudioSource, DomainError, LanguageTag, ManifestEntry,
    TranscriptionModelPort,
};

use crate::{ApplicationError, JobScratch, TranscribeAudioRequest, TranscribeAudioResponse};

#[async_trait]
pub trait TranscribeUseCase: Send + Sync {
    async fn transcribe(
        &self,
        request: TranscribeAudioRequest,
    ) -> Result<TranscribeAudioResponse, ApplicationError>;
}

#[derive(Debug, Clone)]
pub struct TranscribeOptions {
    pub source_lang: LanguageTag,
    pub supported_languages: Vec<String>,
    pub punctuation: bool,
    pub prompt_format: String,
}

pub struct TranscribeUseCaseImpl {
    audio: Arc<dyn AudioAcquisitionPort>,
    model: Arc<dyn TranscriptionModelPort>,
    options: TranscribeOptions,
}

impl TranscribeUseCaseImpl {
    pub fn new(
        audio: Arc<dyn AudioAcquisitionPort>,
        model: Arc<dyn TranscriptionModelPort>,
        options: TranscribeOptions,
    ) -> Self {
        Self {
            audio,
            model,
            options,
        }
    }

    fn resolve_target_lang(&self, raw: Option<&str>) -> Result<LanguageTag, ApplicationError> {
        let Some(code) = raw else {
            // No target requested: transcribe in the source language.
            return Ok(self.options.source_lang.clone());
        };
        let tag = LanguageTag::parse(code)?;
        if !self
            .options
            .supported_languages
            .iter()
            .any(|supported| supported == tag.code())
        {
            return Err(ApplicationError::Validation(format!(
                "target_lang `{}` is not supported (supported: {})",
                tag.code(),
                self.options.supported_languages.join(", ")
            )));
        }
        Ok(tag)
    }
}

#[async_trait]
impl TranscribeUseCase for TranscribeUseCaseImpl {
    async fn transcribe(
        &self,
        request: TranscribeAudioRequest,
    ) -> Result<TranscribeAudioResponse, ApplicationError> {
        let TranscribeAudioRequest {
            audio_source,
            target_lang,
        } = request;

        let job_id = Uuid::new_v4();
        let source = AudioSource::parse(&audio_source)?;
        let target = self.resolve_target_lang(target_lang.as_deref())?;
        tracing::debug!(
            %job_id,
            audio_source = source.as_str(),
            target_lang = target.code(),
            "starting transcription job"
        );

        let io_started = Instant::now();
        let payload = self.audio.acquire(&source).await?;
        let scratch = JobScratch::new()?;
        let audio_path = scratch.write_audio(&payload.bytes)?;
        let entry = ManifestEntry::new(
            audio_path.to_string_lossy().to_string(),
            payload.info.duration_seconds,
            &self.options.source_lang,
            &target,
            self.options.punctuation,
            &self.options.prompt_format,
        );
        let manifest_path = scratch.write_manifest(&entry)?;
        let io_seconds = io_started.elapsed().as_secs_f64();

        let inference_started = Instant::now();
        let results = self.model.transcribe(&manifest_path).await?;
        let inference_seconds = inference_started.elapsed().as_secs_f64();

        // Scratch files are only needed for the model call; removal is
        // best-effort.
        drop(scratch);

        let first = results.into_iter().next().ok_or_else(|| {
            DomainError::internal_error("model returned no results for manifest")
        })?;

        let duration = payload.info.duration_seconds;
        let response = TranscribeAudioResponse {
            transcription: first.text,
            taskname: entry.taskname,
            source_lang: entry.source_lang.clone(),
            target_lang: entry.target_lang.clone(),
            audio_duration_seconds: round2(duration),
            io_seconds: round2(io_seconds),
            inference_seconds: round2(inference_seconds),
            processing_time_seconds: round2(io_seconds + inference_seconds),
            rtf: round2(inference_seconds / duration),
        };

        tracing::debug!(
            %job_id,
            rtf = response.rtf,
            inference_seconds = response.inference_seconds,
            "transcription job completed"
        );

        Ok(response)
    }
}

/// Timing fields are reported with two-decimal precision.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn rounding_keeps_two_decimals() {
        assert_eq!(round2(0.123_456), 0.12);
        assert_eq!(round2(1.006), 1.01);
        assert_eq!(round2(2.0), 2.0);
    }
}
