use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Interleaved PCM samples normalised to [-1.0, 1.0]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio is not a readable WAV file: {0}")]
    Malformed(String),
    #[error("unsupported audio format: {0}")]
    Unsupported(String),
    #[error("audio contains no samples")]
    Empty,
    #[error("failed to encode audio: {0}")]
    Encode(String),
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    pub fn frame_count(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f32 / self.sample_rate as f32
    }

    /// Decode a WAV container (integer PCM up to 32 bits or 32-bit float)
    pub fn from_wav_bytes(bytes: &[u8]) -> Result<Self, AudioError> {
        let mut reader = hound::WavReader::new(Cursor::new(bytes))
            .map_err(|e| AudioError::Malformed(e.to_string()))?;
        let spec = reader.spec();

        if spec.sample_rate == 0 || spec.channels == 0 {
            return Err(AudioError::Unsupported(format!(
                "{} Hz, {} channels",
                spec.sample_rate, spec.channels
            )));
        }

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => {
                if spec.bits_per_sample != 32 {
                    return Err(AudioError::Unsupported(format!(
                        "{}-bit float samples",
                        spec.bits_per_sample
                    )));
                }
                reader
                    .samples::<f32>()
                    .collect::<Result<_, _>>()
                    .map_err(|e| AudioError::Malformed(e.to_string()))?
            }
            hound::SampleFormat::Int => {
                let bits = spec.bits_per_sample;
                if bits == 0 || bits > 32 {
                    return Err(AudioError::Unsupported(format!(
                        "{}-bit integer samples",
                        bits
                    )));
                }
                let max_value = (1i64 << (bits - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / max_value))
                    .collect::<Result<_, _>>()
                    .map_err(|e| AudioError::Malformed(e.to_string()))?
            }
        };

        if samples.is_empty() {
            return Err(AudioError::Empty);
        }

        Ok(Self::new(samples, spec.sample_rate, spec.channels))
    }

    /// Encode as 16-bit PCM WAV
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, AudioError> {
        if self.sample_rate == 0 || self.channels == 0 {
            return Err(AudioError::Encode(format!(
                "invalid layout: {} Hz, {} channels",
                self.sample_rate, self.channels
            )));
        }

        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)
                .map_err(|e| AudioError::Encode(e.to_string()))?;
            for sample in &self.samples {
                let clamped = sample.clamp(-1.0, 1.0);
                writer
                    .write_sample((clamped * i16::MAX as f32) as i16)
                    .map_err(|e| AudioError::Encode(e.to_string()))?;
            }
            writer
                .finalize()
                .map_err(|e| AudioError::Encode(e.to_string()))?;
        }

        Ok(cursor.into_inner())
    }
}
