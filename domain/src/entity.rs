use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Where the audio for a job comes from. Anything with an `http(s)://`
/// scheme is treated as remote; everything else is a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    LocalPath(String),
    RemoteUrl(String),
}

impl AudioSource {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("audio_source cannot be empty"));
        }
        let lowered = trimmed.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            Ok(Self::RemoteUrl(trimmed.to_string()))
        } else {
            Ok(Self::LocalPath(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::LocalPath(path) => path,
            Self::RemoteUrl(url) => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageTag {
    En,
    De,
    Es,
    Fr,
    Other(String),
}

impl LanguageTag {
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        let normalized = code.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            "es" => Ok(Self::Es),
            "fr" => Ok(Self::Fr),
            "" => Err(DomainError::validation("language tag cannot be empty")),
            _ => Ok(Self::Other(normalized)),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskName {
    Asr,
    S2tTranslation,
}

/// One line of the JSON Lines manifest consumed by the model's batch
/// transcription interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub audio_filepath: String,
    pub duration: f64,
    pub taskname: TaskName,
    pub source_lang: String,
    pub target_lang: String,
    pub pnc: String,
    pub prompt_format: String,
}

impl ManifestEntry {
    pub fn new(
        audio_filepath: String,
        duration: f64,
        source_lang: &LanguageTag,
        target_lang: &LanguageTag,
        punctuation: bool,
        prompt_format: &str,
    ) -> Self {
        let taskname = if source_lang == target_lang {
            TaskName::Asr
        } else {
            TaskName::S2tTranslation
        };
        Self {
            audio_filepath,
            duration,
            taskname,
            source_lang: source_lang.code().to_string(),
            target_lang: target_lang.code().to_string(),
            pnc: if punctuation { "yes" } else { "no" }.to_string(),
            prompt_format: prompt_format.to_string(),
        }
    }

    pub fn to_json_line(&self) -> Result<String, DomainError> {
        serde_json::to_string(self)
            .map_err(|err| DomainError::internal_error(&format!("manifest serialization: {err}")))
    }
}

/// Parse a JSON Lines manifest body, skipping blank lines.
pub fn parse_manifest(content: &str) -> Result<Vec<ManifestEntry>, DomainError> {
    let mut entries = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let entry: ManifestEntry = serde_json::from_str(line).map_err(|err| {
            DomainError::internal_error(&format!("malformed manifest entry: {err}"))
        })?;
        entries.push(entry);
    }
    if entries.is_empty() {
        return Err(DomainError::internal_error("manifest contains no entries"));
    }
    Ok(entries)
}

#[derive(Debug, Clone, Copy)]
pub struct WavInfo {
    pub duration_seconds: f64,
    pub sample_rate_hz: u32,
    pub channels: u16,
}

/// Audio resolved into memory together with its probed metadata.
#[derive(Debug, Clone)]
pub struct AudioPayload {
    pub bytes: Vec<u8>,
    pub info: WavInfo,
}

#[derive(Debug, Clone)]
pub struct ModelResult {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_source_distinguishes_urls_from_paths() {
        assert_eq!(
            AudioSource::parse("https://cdn.example.com/a.wav").unwrap(),
            AudioSource::RemoteUrl("https://cdn.example.com/a.wav".to_string())
        );
        assert_eq!(
            AudioSource::parse("/data/audio.wav").unwrap(),
            AudioSource::LocalPath("/data/audio.wav".to_string())
        );
        assert!(AudioSource::parse("   ").is_err());
    }

    #[test]
    fn manifest_entry_selects_task_from_language_pair() {
        let asr = ManifestEntry::new(
            "/tmp/a.wav".to_string(),
            1.5,
            &LanguageTag::En,
            &LanguageTag::En,
            true,
            "multitask",
        );
        assert_eq!(asr.taskname, TaskName::Asr);

        let translation = ManifestEntry::new(
            "/tmp/a.wav".to_string(),
            1.5,
            &LanguageTag::De,
            &LanguageTag::En,
            true,
            "multitask",
        );
        assert_eq!(translation.taskname, TaskName::S2tTranslation);
        assert_eq!(translation.source_lang, "de");
        assert_eq!(translation.target_lang, "en");
    }

    #[test]
    fn manifest_round_trips_as_json_lines() {
        let entry = ManifestEntry::new(
            "/tmp/a.wav".to_string(),
            2.0,
            &LanguageTag::En,
            &LanguageTag::Fr,
            false,
            "multitask",
        );
        let line = entry.to_json_line().unwrap();
        assert!(line.contains("\"s2t_translation\""));
        assert!(line.contains("\"pnc\":\"no\""));

        let parsed = parse_manifest(&format!("{line}\n\n{line}\n")).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].audio_filepath, "/tmp/a.wav");
    }

    #[test]
    fn empty_manifest_is_rejected() {
        assert!(parse_manifest("\n  \n").is_err());
    }
}
