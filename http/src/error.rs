use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use scribe_application::ApplicationError;
use scribe_domain::DomainError;

#[derive(Debug)]
pub enum HttpError {
    Validation { message: String },
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::Validation { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            HttpError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            HttpError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            HttpError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (
            status,
            Json(json!({
                "error": message,
            })),
        )
            .into_response()
    }
}

pub fn error_mapper(error: ApplicationError) -> HttpError {
    match error {
        ApplicationError::Validation(message) => HttpError::Validation { message },
        ApplicationError::Domain(domain) => match domain {
            DomainError::Validation { .. } => HttpError::Validation {
                message: domain.to_string(),
            },
            DomainError::SourceNotFound { .. } => HttpError::NotFound {
                message: domain.to_string(),
            },
            DomainError::DownloadFailed { .. } | DomainError::InvalidAudio { .. } => {
                HttpError::BadRequest {
                    message: domain.to_string(),
                }
            }
            _ => HttpError::Internal {
                message: domain.to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_spec_status_classes() {
        let not_found = error_mapper(ApplicationError::Domain(DomainError::source_not_found(
            "/tmp/missing.wav",
        )));
        assert!(matches!(not_found, HttpError::NotFound { .. }));

        let download = error_mapper(ApplicationError::Domain(DomainError::download_failed(
            "https://example.com/a.wav",
            "server returned 404",
        )));
        assert!(matches!(download, HttpError::BadRequest { .. }));

        let internal = error_mapper(ApplicationError::Domain(
            DomainError::external_service_error("whisper", "full decode failed"),
        ));
        assert!(matches!(internal, HttpError::Internal { .. }));
    }
}
