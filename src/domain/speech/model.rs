use super::audio::Waveform;
use super::language::{LanguageCode, ModelType};
use serde::{Deserialize, Serialize};

/// Fixed-size voice representation extracted from a reference clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeakerEmbedding(pub Vec<f32>);

/// Everything the model conditions generation on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditioningInput {
    pub text: String,
    pub language: LanguageCode,
    pub speaker: SpeakerEmbedding,
}

/// Model-specific conditioning, opaque to this service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conditioning(pub serde_json::Value);

/// Codec tokens, one row per codebook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Codes(pub Vec<Vec<u32>>);

impl Codes {
    pub fn frame_count(&self) -> usize {
        self.0.first().map(Vec::len).unwrap_or(0)
    }
}

/// Validated per-call input
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub language: LanguageCode,
    pub model_type: ModelType,
    pub speaker: Waveform,
}

/// Encoded WAV produced for one request
#[derive(Debug, Clone)]
pub struct GeneratedAudio {
    pub wav_bytes: Vec<u8>,
    pub sample_rate: u32,
    pub duration_secs: f32,
    pub language: LanguageCode,
    pub model_type: ModelType,
}
