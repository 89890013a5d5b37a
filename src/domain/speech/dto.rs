use serde::{Deserialize, Serialize};

/// How generated audio is returned to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// JSON body with base64 WAV
    #[default]
    Base64,
    /// Raw `audio/wav` body
    Wav,
}

impl std::str::FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "base64" | "json" => Ok(ResponseFormat::Base64),
            "wav" | "raw" => Ok(ResponseFormat::Wav),
            other => Err(format!(
                "Invalid response format '{}', expected 'base64' or 'wav'",
                other
            )),
        }
    }
}

/// Request for POST /tts
#[derive(Debug, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    /// Base64-encoded reference WAV
    pub speaker_audio: String,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Request for POST /examples/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct ExampleGenerationRequest {
    pub text: String,
    pub example_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
}

/// Inline generation result
#[derive(Debug, Serialize, Deserialize)]
pub struct AudioResponse {
    pub success: bool,
    pub audio: String,
}

/// Generation result stored as a transient file
#[derive(Debug, Serialize, Deserialize)]
pub struct AudioPathResponse {
    pub success: bool,
    pub audio_path: String,
}

/// Response for GET /languages
#[derive(Debug, Serialize, Deserialize)]
pub struct LanguagesResponse {
    pub languages: Vec<String>,
    pub default: String,
    pub models: Vec<String>,
}
