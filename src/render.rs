//! Offline rendering of a frequency sequence as sine tones.
//!
//! This is for auditioning a generated scale; it renders each frequency for
//! a fixed length, back to back, into a mono buffer.

use std::f64::consts::TAU;
use std::time::Duration;

use anyhow::{anyhow, Result};
use hound::{WavSpec, WavWriter};

/// Sample rate used when none is given.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Amplitude of every rendered tone.
const AMPLITUDE: f64 = 0.5;

/// Length of the linear fade at each end of a tone.
const FADE: Duration = Duration::from_millis(5);

/// Number of samples covering `duration` at `sample_rate`.
pub fn samples_for(duration: Duration, sample_rate: u32) -> usize {
    (duration.as_secs_f64() * sample_rate as f64).round() as usize
}

/// Renders each frequency in `freqs` as a sine tone lasting `note_length`.
pub fn render_tones(freqs: &[f64], sample_rate: u32, note_length: Duration) -> Vec<f32> {
    let n_samples = samples_for(note_length, sample_rate);
    let fade_samples = samples_for(FADE, sample_rate).min(n_samples / 2).max(1);
    let mut output = Vec::with_capacity(n_samples * freqs.len());

    for &freq in freqs {
        let phase_inc = TAU * freq / sample_rate as f64;
        for i in 0..n_samples {
            let from_edge = i.min(n_samples - 1 - i);
            let envelope = (from_edge as f64 / fade_samples as f64).min(1.0);
            let sample = AMPLITUDE * envelope * (phase_inc * i as f64).sin();
            output.push(sample as f32);
        }
    }

    output
}

/// Renders `freqs` with [`render_tones`] and encodes them as a mono 32-bit
/// float WAV file.
pub fn tones_to_wav(freqs: &[f64], sample_rate: u32, note_length: Duration) -> Result<Vec<u8>> {
    let samples = render_tones(freqs, sample_rate, note_length);

    let wav_spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut ret = vec![];
    let mut cursor = std::io::Cursor::new(&mut ret);
    let mut wav_writer = WavWriter::new(&mut cursor, wav_spec)
        .map_err(|e| anyhow!("Failed to start WAV stream: {}", e))?;

    for sample in &samples {
        wav_writer
            .write_sample(*sample)
            .map_err(|e| anyhow!("Failed to write WAV sample: {}", e))?;
    }

    wav_writer
        .finalize()
        .map_err(|e| anyhow!("Failed to finalize WAV stream: {}", e))?;

    Ok(ret)
}
