use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {message}")]
    Validation { message: String },
    #[error("audio source not found: {path}")]
    SourceNotFound { path: String },
    #[error("download failed for {url}: {message}")]
    DownloadFailed { url: String, message: String },
    #[error("invalid audio: {message}")]
    InvalidAudio { message: String },
    #[error("{service} error: {message}")]
    ExternalService { service: String, message: String },
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: &str) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    pub fn source_not_found(path: &str) -> Self {
        Self::SourceNotFound {
            path: path.to_string(),
        }
    }

    pub fn download_failed(url: &str, message: &str) -> Self {
        Self::DownloadFailed {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub fn invalid_audio(message: &str) -> Self {
        Self::InvalidAudio {
            message: message.to_string(),
        }
    }

    pub fn external_service_error(service: &str, message: &str) -> Self {
        Self::ExternalService {
            service: service.to_string(),
            message: message.to_string(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }
}
