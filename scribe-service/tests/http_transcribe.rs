mod common;

use axum::routing::get;
use axum::Router;
use serde_json::json;

use common::{setup_test_server, write_test_wav};

#[tokio::test]
async fn transcribe_endpoint_returns_timing_annotated_response(
) -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, client) = setup_test_server().await?;

    let dir = tempfile::tempdir()?;
    let wav_path = dir.path().join("tone.wav");
    let duration = write_test_wav(&wav_path, 16_000);

    let response = client
        .post(format!("{base_url}/transcribe"))
        .json(&json!({
            "audio_source": wav_path.to_string_lossy(),
            "target_lang": null,
        }))
        .send()
        .await?;

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await?;
    assert!(body["transcription"].as_str().is_some());
    assert_eq!(body["taskname"], "asr");
    assert_eq!(body["source_lang"], "en");
    assert_eq!(body["target_lang"], "en");
    assert_eq!(body["audio_duration_seconds"].as_f64(), Some(duration));
    assert!(body["io_seconds"].as_f64().unwrap() >= 0.0);
    assert!(body["inference_seconds"].as_f64().unwrap() >= 0.0);
    assert!(body["processing_time_seconds"].as_f64().unwrap() >= 0.0);
    assert!(body["rtf"].as_f64().is_some());

    Ok(())
}

#[tokio::test]
async fn translation_target_switches_task() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, client) = setup_test_server().await?;

    let dir = tempfile::tempdir()?;
    let wav_path = dir.path().join("tone.wav");
    write_test_wav(&wav_path, 8_000);

    let response = client
        .post(format!("{base_url}/transcribe"))
        .json(&json!({
            "audio_source": wav_path.to_string_lossy(),
            "target_lang": "fr",
        }))
        .send()
        .await?;

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["taskname"], "s2t_translation");
    assert_eq!(body["target_lang"], "fr");

    Ok(())
}

#[tokio::test]
async fn missing_local_file_returns_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, client) = setup_test_server().await?;

    let response = client
        .post(format!("{base_url}/transcribe"))
        .json(&json!({ "audio_source": "/nonexistent/audio.wav" }))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await?;
    assert!(body["error"].as_str().unwrap().contains("not found"));

    Ok(())
}

#[tokio::test]
async fn unsupported_target_language_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, client) = setup_test_server().await?;

    let dir = tempfile::tempdir()?;
    let wav_path = dir.path().join("tone.wav");
    write_test_wav(&wav_path, 8_000);

    let response = client
        .post(format!("{base_url}/transcribe"))
        .json(&json!({
            "audio_source": wav_path.to_string_lossy(),
            "target_lang": "zz",
        }))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 422);

    Ok(())
}

#[tokio::test]
async fn empty_audio_source_fails_request_validation() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, client) = setup_test_server().await?;

    let response = client
        .post(format!("{base_url}/transcribe"))
        .json(&json!({ "audio_source": "" }))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 422);

    Ok(())
}

#[tokio::test]
async fn remote_audio_is_downloaded_and_transcribed() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, client) = setup_test_server().await?;

    let dir = tempfile::tempdir()?;
    let wav_path = dir.path().join("tone.wav");
    write_test_wav(&wav_path, 16_000);
    let wav_bytes = std::fs::read(&wav_path)?;
    let file_server_url = spawn_file_server(wav_bytes).await?;

    let response = client
        .post(format!("{base_url}/transcribe"))
        .json(&json!({ "audio_source": format!("{file_server_url}/sample.wav") }))
        .send()
        .await?;

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["audio_duration_seconds"].as_f64(), Some(1.0));

    let failed = client
        .post(format!("{base_url}/transcribe"))
        .json(&json!({ "audio_source": format!("{file_server_url}/missing.wav") }))
        .send()
        .await?;

    assert_eq!(failed.status().as_u16(), 400);

    Ok(())
}

/// Tiny HTTP server handing out the fixture WAV, standing in for a
/// remote audio host.
async fn spawn_file_server(wav_bytes: Vec<u8>) -> Result<String, Box<dyn std::error::Error>> {
    let app = Router::new().route(
        "/sample.wav",
        get(move || {
            let bytes = wav_bytes.clone();
            async move { bytes }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{address}"))
}
