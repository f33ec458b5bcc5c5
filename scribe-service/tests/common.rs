use std::net::TcpListener;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;

use scribe_configuration::AppConfig;
use scribe_setup::build_and_run;

/// Spawn the service on an ephemeral port and wait until the health
/// endpoint answers. The server task is aborted when the test binary
/// exits.
pub async fn setup_test_server() -> Result<(String, Client), Box<dyn std::error::Error>> {
    let port = free_port()?;
    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = port;
    let server_config = config.server.clone();

    tokio::spawn(async move {
        if let Err(error) = build_and_run(config, server_config).await {
            eprintln!("test server exited: {error}");
        }
    });

    let base_url = format!("http://127.0.0.1:{port}");
    let client = Client::new();
    wait_until_healthy(&client, &base_url).await?;
    Ok((base_url, client))
}

fn free_port() -> Result<u16, Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

async fn wait_until_healthy(
    client: &Client,
    base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    for _ in 0..50 {
        if let Ok(response) = client.get(format!("{base_url}/health")).send().await {
            if response.status().is_success() {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    Err("server did not become healthy in time".into())
}

/// Write a short 16 kHz mono sine tone; returns the audio duration in
/// seconds.
pub fn write_test_wav(path: &Path, sample_count: u32) -> f64 {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    for n in 0..sample_count {
        let t = n as f32 / 16_000.0;
        let sample = (t * 440.0 * 2.0 * std::f32::consts::PI).sin();
        writer
            .write_sample((sample * i16::MAX as f32 * 0.5) as i16)
            .expect("write sample");
    }
    writer.finalize().expect("finalize wav");
    f64::from(sample_count) / 16_000.0
}
