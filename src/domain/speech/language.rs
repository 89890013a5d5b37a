use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language codes the voice-clone model can condition on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en-us")]
    EnglishUs,
    #[serde(rename = "ja-jp")]
    Japanese,
    #[serde(rename = "zh-cn")]
    ChineseMandarin,
    #[serde(rename = "fr-fr")]
    French,
    #[serde(rename = "de-de")]
    German,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 5] = [
        LanguageCode::EnglishUs,
        LanguageCode::Japanese,
        LanguageCode::ChineseMandarin,
        LanguageCode::French,
        LanguageCode::German,
    ];

    /// Get the wire code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::EnglishUs => "en-us",
            LanguageCode::Japanese => "ja-jp",
            LanguageCode::ChineseMandarin => "zh-cn",
            LanguageCode::French => "fr-fr",
            LanguageCode::German => "de-de",
        }
    }

    /// Parse an optional request value, falling back to `en-us` when absent or blank
    pub fn parse_or_default(value: Option<&str>) -> Result<Self, UnsupportedLanguage> {
        match value.map(str::trim) {
            None | Some("") => Ok(LanguageCode::default()),
            Some(code) => code.parse(),
        }
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        LanguageCode::EnglishUs
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unsupported language '{0}', expected one of: en-us, ja-jp, zh-cn, fr-fr, de-de")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for LanguageCode {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        LanguageCode::ALL
            .into_iter()
            .find(|code| code.as_str() == normalized)
            .ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}

/// Model variant served behind the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Transformer,
    Hybrid,
}

impl ModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Transformer => "transformer",
            ModelType::Hybrid => "hybrid",
        }
    }

    pub fn parse_or_default(value: Option<&str>) -> Result<Self, String> {
        match value.map(str::trim) {
            None | Some("") => Ok(ModelType::default()),
            Some(raw) => raw.parse(),
        }
    }
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::Transformer
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transformer" => Ok(ModelType::Transformer),
            "hybrid" => Ok(ModelType::Hybrid),
            _ => Err(format!(
                "Invalid model type '{}', expected 'transformer' or 'hybrid'",
                s
            )),
        }
    }
}
