use axum::{extract::State, http::StatusCode, response::Json};

use scribe_application::{TranscribeAudioRequest, TranscribeAudioResponse};

use crate::error::{error_mapper, HttpError};
use crate::extract::ValidatedJson;
use crate::state::AppState;

pub async fn transcribe_audio(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TranscribeAudioRequest>,
) -> Result<(StatusCode, Json<TranscribeAudioResponse>), HttpError> {
    tracing::info!(
        audio_source = %request.audio_source,
        target_lang = request.target_lang.as_deref().unwrap_or("source"),
        "received transcribe request"
    );

    match state.usecase.transcribe(request).await {
        Ok(result) => {
            tracing::info!(
                rtf = result.rtf,
                inference_seconds = result.inference_seconds,
                "transcribe request completed"
            );
            Ok((StatusCode::OK, Json(result)))
        }
        Err(error) => {
            tracing::error!(error = %error, "transcribe request failed");
            Err(error_mapper(error))
        }
    }
}
