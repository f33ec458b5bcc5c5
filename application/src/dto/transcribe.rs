use serde::{Deserialize, Serialize};
use validator::Validate;

use scribe_domain::TaskName;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TranscribeAudioRequest {
    /// Local filesystem path or `http(s)://` URL.
    #[validate(length(min = 1, max = 2048))]
    pub audio_source: String,
    /// Translation target; omitted means plain transcription.
    #[validate(length(min = 2, max = 16))]
    pub target_lang: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscribeAudioResponse {
    pub transcription: String,
    pub taskname: TaskName,
    pub source_lang: String,
    pub target_lang: String,
    pub audio_duration_seconds: f64,
    pub io_seconds: f64,
    pub inference_seconds: f64,
    pub processing_time_seconds: f64,
    pub rtf: f64,
}
