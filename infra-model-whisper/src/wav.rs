use std::path::Path;

use scribe_domain::DomainError;

/// The pretrained model decodes 16 kHz mono input.
pub const MODEL_SAMPLE_RATE_HZ: u32 = 16_000;

/// Read a WAV file into mono f32 samples, downmixing interleaved
/// channels by averaging.
pub fn read_wav_samples(path: &Path) -> Result<(Vec<f32>, u32), DomainError> {
    let mut reader = hound::WavReader::open(path).map_err(|err| {
        DomainError::invalid_audio(&format!("failed to open {}: {err}", path.display()))
    })?;
    let spec = reader.spec();
    if spec.sample_rate == 0 || spec.channels == 0 {
        return Err(DomainError::invalid_audio("degenerate WAV header"));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|err| DomainError::invalid_audio(&format!("corrupt WAV data: {err}")))?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|err| DomainError::invalid_audio(&format!("corrupt WAV data: {err}")))?
        }
    };

    let channels = spec.channels as usize;
    let mono = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    Ok((mono, spec.sample_rate))
}

pub fn resample_linear(samples: &[f32], source_rate_hz: u32, target_rate_hz: u32) -> Vec<f32> {
    if source_rate_hz == target_rate_hz {
        return samples.to_vec();
    }
    if samples.len() <= 1 {
        return samples.to_vec();
    }

    let output_len =
        ((samples.len() as u64 * target_rate_hz as u64) / source_rate_hz as u64).max(1) as usize;
    if output_len <= 1 {
        return vec![samples[0]];
    }

    let mut output = Vec::with_capacity(output_len);
    let max_source_idx = samples.len() - 1;

    for out_idx in 0..output_len {
        let source_pos = out_idx as f64 * source_rate_hz as f64 / target_rate_hz as f64;
        let left_idx = source_pos.floor() as usize;
        let right_idx = (left_idx + 1).min(max_source_idx);
        let frac = (source_pos - left_idx as f64) as f32;

        let left = samples[left_idx.min(max_source_idx)];
        let right = samples[right_idx];
        output.push(left * (1.0 - frac) + right * frac);
    }

    output
}
