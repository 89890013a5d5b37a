use crate::domain::speech::{Codes, Conditioning, ConditioningInput, SpeakerEmbedding, Waveform};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model server unreachable: {0}")]
    Transport(String),
    #[error("model server returned {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("model server sent an invalid response: {0}")]
    InvalidResponse(String),
}

/// Adapter over a pretrained voice-cloning TTS model.
/// The model itself (embedding extraction, generation, codec) is opaque.
///
/// Handles are created once at startup and shared by every request.
/// Implementations must be safe to call concurrently; any serialisation
/// of access is the model backend's concern.
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Extract a speaker embedding from a reference waveform
    async fn make_speaker_embedding(
        &self,
        waveform: &Waveform,
    ) -> Result<SpeakerEmbedding, ModelError>;

    /// Combine text, language and speaker into model conditioning
    async fn prepare_conditioning(
        &self,
        input: &ConditioningInput,
    ) -> Result<Conditioning, ModelError>;

    /// Run generation to obtain codec tokens
    async fn generate(&self, conditioning: &Conditioning) -> Result<Codes, ModelError>;

    /// Decode codec tokens with the model's attached autoencoder
    async fn decode(&self, codes: &Codes) -> Result<Waveform, ModelError>;

    /// Whether the model backend is reachable and loaded
    async fn is_ready(&self) -> bool {
        true
    }
}
