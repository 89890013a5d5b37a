use super::audio::Waveform;
use super::error::SpeechServiceError;
use super::language::{LanguageCode, ModelType};
use super::model::{ConditioningInput, GeneratedAudio, SpeechRequest};
use crate::infrastructure::repositories::SpeechModel;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

const MAX_TEXT_CHARS: usize = 10_000;

/// Raw, unvalidated generation input as it arrives from a controller
#[derive(Debug, Clone, Default)]
pub struct SpeechInput {
    pub text: String,
    pub language: Option<String>,
    pub model_type: Option<String>,
    pub speaker_audio: Vec<u8>,
}

pub struct SpeechService {
    models: HashMap<ModelType, Arc<dyn SpeechModel>>,
}

impl SpeechService {
    pub fn new(models: HashMap<ModelType, Arc<dyn SpeechModel>>) -> Self {
        Self { models }
    }

    /// Model variants that have a handle configured, in stable order
    pub fn available_models(&self) -> Vec<ModelType> {
        let mut models: Vec<ModelType> = self.models.keys().copied().collect();
        models.sort_by_key(|m| m.as_str());
        models
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Validate raw input into a `SpeechRequest`
    ///
    /// Checks text, language, model type and speaker audio, in that order,
    /// without touching the model.
    async fn prepare(&self, input: SpeechInput) -> Result<SpeechRequest, SpeechServiceError>;

    /// Run the voice-clone pipeline and return encoded WAV audio
    ///
    /// This operation:
    /// - Extracts a speaker embedding from the reference waveform
    /// - Builds conditioning from text, embedding and language
    /// - Generates codes and decodes them to a waveform
    /// - Encodes the waveform as 16-bit PCM WAV
    ///
    /// Any model failure aborts the whole request.
    async fn generate(&self, request: SpeechRequest) -> Result<GeneratedAudio, SpeechServiceError>;

    /// True when at least one model is configured and every backend reports ready
    async fn is_ready(&self) -> bool;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn prepare(&self, input: SpeechInput) -> Result<SpeechRequest, SpeechServiceError> {
        let text = input.text.trim().to_string();
        if text.is_empty() {
            return Err(SpeechServiceError::Invalid(
                "Text cannot be empty".to_string(),
            ));
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(SpeechServiceError::TooLarge(format!(
                "Text must be {} characters or less",
                MAX_TEXT_CHARS
            )));
        }

        let language = LanguageCode::parse_or_default(input.language.as_deref())
            .map_err(|e| SpeechServiceError::Invalid(e.to_string()))?;

        let model_type = ModelType::parse_or_default(input.model_type.as_deref())
            .map_err(SpeechServiceError::Invalid)?;
        if !self.models.contains_key(&model_type) {
            return Err(SpeechServiceError::Invalid(format!(
                "Model type '{}' is not available",
                model_type
            )));
        }

        if input.speaker_audio.is_empty() {
            return Err(SpeechServiceError::Invalid(
                "Speaker audio is required".to_string(),
            ));
        }

        let speaker_audio = input.speaker_audio;
        let speaker = tokio::task::spawn_blocking(move || Waveform::from_wav_bytes(&speaker_audio))
            .await
            .map_err(|e| SpeechServiceError::Other(anyhow::anyhow!("audio decode task failed: {}", e)))?
            .map_err(|e| SpeechServiceError::Invalid(format!("Invalid speaker audio: {}", e)))?;

        Ok(SpeechRequest {
            text,
            language,
            model_type,
            speaker,
        })
    }

    async fn generate(&self, request: SpeechRequest) -> Result<GeneratedAudio, SpeechServiceError> {
        let start_time = std::time::Instant::now();
        let model = self.models.get(&request.model_type).ok_or_else(|| {
            SpeechServiceError::Invalid(format!(
                "Model type '{}' is not available",
                request.model_type
            ))
        })?;

        tracing::info!(
            model_type = %request.model_type,
            language = %request.language,
            text_length = request.text.len(),
            speaker_duration_secs = request.speaker.duration_secs(),
            speaker_sample_rate = request.speaker.sample_rate,
            "Speech generation request"
        );

        // 1. Speaker embedding from the reference clip
        let speaker = model.make_speaker_embedding(&request.speaker).await?;
        tracing::debug!(embedding_size = speaker.0.len(), "Speaker embedding extracted");

        // 2. Conditioning
        let conditioning = model
            .prepare_conditioning(&ConditioningInput {
                text: request.text,
                language: request.language,
                speaker,
            })
            .await?;

        // 3. Generation
        let codes = model.generate(&conditioning).await?;
        tracing::debug!(
            codebooks = codes.0.len(),
            frames = codes.frame_count(),
            "Codes generated"
        );

        // 4. Decode and encode
        let waveform = model.decode(&codes).await?;
        let sample_rate = waveform.sample_rate;
        let duration_secs = waveform.duration_secs();
        let wav_bytes = tokio::task::spawn_blocking(move || waveform.to_wav_bytes())
            .await
            .map_err(|e| SpeechServiceError::Other(anyhow::anyhow!("audio encode task failed: {}", e)))?
            .map_err(|e| SpeechServiceError::Generation(e.to_string()))?;

        tracing::info!(
            model_type = %request.model_type,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = wav_bytes.len(),
            duration_secs = duration_secs,
            "Speech generation completed"
        );

        Ok(GeneratedAudio {
            wav_bytes,
            sample_rate,
            duration_secs,
            language: request.language,
            model_type: request.model_type,
        })
    }

    async fn is_ready(&self) -> bool {
        if self.models.is_empty() {
            return false;
        }
        for model in self.models.values() {
            if !model.is_ready().await {
                return false;
            }
        }
        true
    }
}
