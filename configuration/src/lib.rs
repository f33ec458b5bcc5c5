use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub type AppConfig = ScribeConfig;

/// Environment variable prefix for overrides, e.g. `SCRIBE_SERVICE_PORT`.
const ENV_PREFIX: &str = "SCRIBE_SERVICE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScribeConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json_format: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub audio: AudioFetchConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFetchConfig {
    #[serde(default = "default_max_download_bytes")]
    pub max_download_bytes: u64,
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_path")]
    pub model_path: String,
    #[serde(default = "default_beam_size")]
    pub beam_size: usize,
    #[serde(default = "default_threads")]
    pub threads: usize,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,
    #[serde(default = "default_punctuation")]
    pub punctuation: bool,
    #[serde(default = "default_prompt_format")]
    pub prompt_format: String,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            service: ServiceConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            audio: AudioFetchConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

impl Default for AudioFetchConfig {
    fn default() -> Self {
        Self {
            max_download_bytes: default_max_download_bytes(),
            download_timeout_secs: default_download_timeout_secs(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            beam_size: default_beam_size(),
            threads: default_threads(),
            source_lang: default_source_lang(),
            supported_languages: default_supported_languages(),
            punctuation: default_punctuation(),
            prompt_format: default_prompt_format(),
        }
    }
}

/// Load defaults, then apply `SCRIBE_SERVICE_*` environment overrides.
/// A `.env` file is honored when present.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let _ = dotenvy::dotenv();
    let mut config = AppConfig::default();
    apply_overrides(&mut config, |key| {
        std::env::var(format!("{ENV_PREFIX}_{key}")).ok()
    })?;
    Ok(config)
}

fn apply_overrides(
    config: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("PORT") {
        config.server.port = parse_value("PORT", &port)?;
    }
    if let Some(level) = lookup("LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("LOG_JSON") {
        config.logging.json_format = parse_value("LOG_JSON", &json)?;
    }
    if let Some(path) = lookup("MODEL_PATH") {
        config.service.model.model_path = path;
    }
    if let Some(beam) = lookup("BEAM_SIZE") {
        config.service.model.beam_size = parse_value("BEAM_SIZE", &beam)?;
    }
    if let Some(threads) = lookup("THREADS") {
        config.service.model.threads = parse_value("THREADS", &threads)?;
    }
    if let Some(lang) = lookup("SOURCE_LANG") {
        config.service.model.source_lang = lang;
    }
    if let Some(punctuation) = lookup("PUNCTUATION") {
        config.service.model.punctuation = parse_value("PUNCTUATION", &punctuation)?;
    }
    if let Some(max_bytes) = lookup("MAX_DOWNLOAD_BYTES") {
        config.service.audio.max_download_bytes = parse_value("MAX_DOWNLOAD_BYTES", &max_bytes)?;
    }
    if let Some(timeout) = lookup("DOWNLOAD_TIMEOUT_SECS") {
        config.service.audio.download_timeout_secs =
            parse_value("DOWNLOAD_TIMEOUT_SECS", &timeout)?;
    }
    Ok(())
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|err| ConfigError::Invalid {
        key: format!("{ENV_PREFIX}_{key}"),
        message: format!("{err}"),
    })
}

pub fn setup_logging(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    if config.logging.json_format {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true))
            .init();
    }

    tracing::info!(
        level = %config.logging.level,
        json_format = config.logging.json_format,
        "logging initialized"
    );
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_download_bytes() -> u64 {
    64 * 1024 * 1024
}

fn default_download_timeout_secs() -> u64 {
    30
}

fn default_model_path() -> String {
    "models/ggml-base.bin".to_string()
}

fn default_beam_size() -> usize {
    1
}

fn default_threads() -> usize {
    4
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_supported_languages() -> Vec<String> {
    vec![
        "en".to_string(),
        "de".to_string(),
        "es".to_string(),
        "fr".to_string(),
    ]
}

fn default_punctuation() -> bool {
    true
}

fn default_prompt_format() -> String {
    "multitask".to_string()
}
