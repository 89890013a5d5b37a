pub mod audio;
pub mod dto;
pub mod error;
pub mod language;
pub mod model;
pub mod service;

pub use audio::{AudioError, Waveform};
pub use dto::ResponseFormat;
pub use error::SpeechServiceError;
pub use language::{LanguageCode, ModelType};
pub use model::{Codes, Conditioning, ConditioningInput, GeneratedAudio, SpeakerEmbedding, SpeechRequest};
pub use service::{SpeechInput, SpeechService, SpeechServiceApi};
