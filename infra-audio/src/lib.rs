use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use scribe_domain::{AudioAcquisitionPort, AudioPayload, AudioSource, DomainError, WavInfo};

#[derive(Debug, Clone)]
pub struct AudioFetcherConfig {
    pub max_download_bytes: u64,
    pub download_timeout: Duration,
}

/// Resolves an [`AudioSource`] into an in-memory payload: local files are
/// read from disk, remote URLs are downloaded with a size cap.
pub struct HttpAudioFetcher {
    client: reqwest::Client,
    config: AudioFetcherConfig,
}

impl HttpAudioFetcher {
    pub fn new(config: AudioFetcherConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.download_timeout)
            .build()
            .map_err(|err| {
                DomainError::internal_error(&format!("failed to build http client: {err}"))
            })?;
        Ok(Self { client, config })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| DomainError::download_failed(url, &err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::download_failed(
                url,
                &format!("server returned {status}"),
            ));
        }

        if let Some(length) = response.content_length() {
            if length > self.config.max_download_bytes {
                return Err(DomainError::download_failed(
                    url,
                    &format!(
                        "body of {length} bytes exceeds limit of {} bytes",
                        self.config.max_download_bytes
                    ),
                ));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| DomainError::download_failed(url, &err.to_string()))?;
        if bytes.len() as u64 > self.config.max_download_bytes {
            return Err(DomainError::download_failed(
                url,
                &format!(
                    "body of {} bytes exceeds limit of {} bytes",
                    bytes.len(),
                    self.config.max_download_bytes
                ),
            ));
        }

        tracing::debug!(url, byte_count = bytes.len(), "downloaded remote audio");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl AudioAcquisitionPort for HttpAudioFetcher {
    async fn acquire(&self, source: &AudioSource) -> Result<AudioPayload, DomainError> {
        let bytes = match source {
            AudioSource::LocalPath(path) => read_local(path)?,
            AudioSource::RemoteUrl(url) => self.download(url).await?,
        };
        let info = probe_wav(&bytes)?;
        tracing::debug!(
            source = source.as_str(),
            duration_seconds = info.duration_seconds,
            sample_rate_hz = info.sample_rate_hz,
            "acquired audio payload"
        );
        Ok(AudioPayload { bytes, info })
    }
}

fn read_local(path: &str) -> Result<Vec<u8>, DomainError> {
    if !Path::new(path).is_file() {
        return Err(DomainError::source_not_found(path));
    }
    std::fs::read(path)
        .map_err(|err| DomainError::internal_error(&format!("failed to read {path}: {err}")))
}

/// Probe the WAV header of an in-memory payload. Zero-length audio is
/// rejected; callers can rely on a positive duration.
pub fn probe_wav(bytes: &[u8]) -> Result<WavInfo, DomainError> {
    let reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|err| DomainError::invalid_audio(&format!("not a readable WAV payload: {err}")))?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(DomainError::invalid_audio("sample rate must be positive"));
    }
    let frames = reader.duration();
    if frames == 0 {
        return Err(DomainError::invalid_audio("audio contains no samples"));
    }
    Ok(WavInfo {
        duration_seconds: f64::from(frames) / f64::from(spec.sample_rate),
        sample_rate_hz: spec.sample_rate,
        channels: spec.channels,
    })
}
