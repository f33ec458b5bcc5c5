use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use scribe_domain::{
    parse_manifest, DomainError, ManifestEntry, ModelResult, TaskName, TranscriptionModelPort,
};

use crate::wav::{read_wav_samples, resample_linear, MODEL_SAMPLE_RATE_HZ};

#[derive(Debug, Clone)]
pub struct WhisperModelConfig {
    pub model_path: String,
    pub beam_size: usize,
    pub threads: usize,
}

/// Facade over the pretrained whisper model. The context is loaded once
/// at construction and the decoding strategy is fixed from the
/// configured beam size; the Mutex serializes decodes, so the facade
/// processes one request at a time.
pub struct WhisperTranscriptionModel {
    config: WhisperModelConfig,
    context: Mutex<WhisperContext>,
}

impl WhisperTranscriptionModel {
    pub fn load(config: WhisperModelConfig) -> Result<Self, DomainError> {
        let context = WhisperContext::new_with_params(
            &config.model_path,
            WhisperContextParameters::default(),
        )
        .map_err(|err| {
            DomainError::external_service_error("whisper", &format!("failed to load model: {err}"))
        })?;

        tracing::info!(
            model_path = %config.model_path,
            beam_size = config.beam_size,
            threads = config.threads,
            "whisper model loaded"
        );

        Ok(Self {
            config,
            context: Mutex::new(context),
        })
    }

    fn sampling_strategy(&self) -> SamplingStrategy {
        if self.config.beam_size <= 1 {
            SamplingStrategy::Greedy { best_of: 1 }
        } else {
            SamplingStrategy::BeamSearch {
                beam_size: self.config.beam_size as i32,
                patience: -1.0,
            }
        }
    }

    fn decode_entry(
        &self,
        context: &WhisperContext,
        entry: &ManifestEntry,
    ) -> Result<ModelResult, DomainError> {
        if entry.taskname == TaskName::S2tTranslation && entry.target_lang != "en" {
            return Err(DomainError::external_service_error(
                "whisper",
                &format!(
                    "runtime only translates into `en`, not `{}`",
                    entry.target_lang
                ),
            ));
        }

        let (samples, sample_rate_hz) = read_wav_samples(Path::new(&entry.audio_filepath))?;
        let samples = if sample_rate_hz == MODEL_SAMPLE_RATE_HZ {
            samples
        } else {
            resample_linear(&samples, sample_rate_hz, MODEL_SAMPLE_RATE_HZ)
        };

        let mut state = context.create_state().map_err(|err| {
            DomainError::external_service_error(
                "whisper",
                &format!("failed to create state: {err}"),
            )
        })?;

        let mut params = FullParams::new(self.sampling_strategy());
        params.set_n_threads(self.config.threads as i32);
        params.set_language(Some(entry.source_lang.as_str()));
        params.set_translate(entry.taskname == TaskName::S2tTranslation);
        params.set_print_realtime(false);
        params.set_print_progress(false);
        params.set_print_timestamps(false);

        state.full(params, &samples).map_err(|err| {
            DomainError::external_service_error("whisper", &format!("full decode failed: {err}"))
        })?;

        let mut text = String::new();
        for idx in 0..state.full_n_segments() {
            let Some(segment) = state.get_segment(idx) else {
                continue;
            };
            let segment_text = segment
                .to_str_lossy()
                .map(|cow| cow.to_string())
                .unwrap_or_default();
            text.push_str(&segment_text);
        }

        Ok(ModelResult {
            text: text.trim().to_string(),
        })
    }
}

#[async_trait]
impl TranscriptionModelPort for WhisperTranscriptionModel {
    async fn transcribe(&self, manifest_path: &Path) -> Result<Vec<ModelResult>, DomainError> {
        let content = std::fs::read_to_string(manifest_path).map_err(|err| {
            DomainError::internal_error(&format!(
                "failed to read manifest {}: {err}",
                manifest_path.display()
            ))
        })?;
        let entries = parse_manifest(&content)?;

        let context = self
            .context
            .lock()
            .map_err(|_| DomainError::internal_error("whisper runtime lock poisoned"))?;

        entries
            .iter()
            .map(|entry| self.decode_entry(&context, entry))
            .collect()
    }
}
