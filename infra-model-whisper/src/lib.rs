#[cfg(feature = "whisper-runtime")]
mod adapter;
mod wav;

#[cfg(feature = "whisper-runtime")]
pub use adapter::{WhisperModelConfig, WhisperTranscriptionModel};
pub use wav::{read_wav_samples, resample_linear, MODEL_SAMPLE_RATE_HZ};
