use std::sync::Arc;
use std::time::Duration;

use anyhow::Error;

use scribe_application::{TranscribeOptions, TranscribeUseCase, TranscribeUseCaseImpl};
use scribe_configuration::{AppConfig, ServerConfig};
use scribe_domain::{AudioAcquisitionPort, DomainError, LanguageTag, TranscriptionModelPort};
use scribe_http_server::{create_app_routes, AppState};
use scribe_infra_audio::{AudioFetcherConfig, HttpAudioFetcher};

pub async fn build_and_run(config: AppConfig, server_config: ServerConfig) -> Result<(), Error> {
    let app = Application::new(config).await?;
    app.run(server_config).await
}

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

impl Application {
    pub async fn new(config: AppConfig) -> Result<Self, Error> {
        #[cfg(feature = "whisper-runtime")]
        tracing::info!("whisper runtime feature enabled");
        #[cfg(not(feature = "whisper-runtime"))]
        tracing::warn!(
            "service compiled without `whisper-runtime`; transcription will return fallback text"
        );
        #[cfg(feature = "whisper-cuda")]
        tracing::info!("whisper backend: CUDA");
        #[cfg(feature = "whisper-vulkan")]
        tracing::info!("whisper backend: Vulkan");
        #[cfg(all(
            feature = "whisper-runtime",
            not(feature = "whisper-cuda"),
            not(feature = "whisper-vulkan")
        ))]
        tracing::info!("whisper backend: CPU");

        tracing::info!(
            model_path = %config.service.model.model_path,
            source_lang = %config.service.model.source_lang,
            "initializing transcription application"
        );

        let audio: Arc<dyn AudioAcquisitionPort> =
            Arc::new(HttpAudioFetcher::new(AudioFetcherConfig {
                max_download_bytes: config.service.audio.max_download_bytes,
                download_timeout: Duration::from_secs(config.service.audio.download_timeout_secs),
            })?);
        let model = build_model(&config)?;
        let usecase: Arc<dyn TranscribeUseCase> = Arc::new(TranscribeUseCaseImpl::new(
            audio,
            model,
            TranscribeOptions {
                source_lang: LanguageTag::parse(&config.service.model.source_lang)?,
                supported_languages: config.service.model.supported_languages.clone(),
                punctuation: config.service.model.punctuation,
                prompt_format: config.service.model.prompt_format.clone(),
            },
        ));

        Ok(Self {
            config,
            state: AppState::new(usecase),
        })
    }

    pub async fn run(self, server_config: ServerConfig) -> Result<(), Error> {
        tracing::info!(
            host = %server_config.host,
            port = server_config.port,
            "starting transcription HTTP server"
        );

        create_app_routes(self.state, server_config)
            .await
            .map_err(|err| anyhow::anyhow!("server startup failed: {err}"))
    }
}

#[cfg(feature = "whisper-runtime")]
fn build_model(config: &AppConfig) -> Result<Arc<dyn TranscriptionModelPort>, DomainError> {
    use scribe_infra_model_whisper::{WhisperModelConfig, WhisperTranscriptionModel};

    let model = WhisperTranscriptionModel::load(WhisperModelConfig {
        model_path: config.service.model.model_path.clone(),
        beam_size: config.service.model.beam_size,
        threads: config.service.model.threads,
    })?;
    Ok(Arc::new(model))
}

#[cfg(not(feature = "whisper-runtime"))]
fn build_model(_config: &AppConfig) -> Result<Arc<dyn TranscriptionModelPort>, DomainError> {
    Ok(Arc::new(crate::FallbackTranscriptionModel))
}
