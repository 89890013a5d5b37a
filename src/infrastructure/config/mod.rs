use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    // Storage
    pub examples_dir: PathBuf,
    pub output_dir: PathBuf,
    pub scratch_dir: PathBuf,
    // Model servers
    pub transformer_model_url: String,
    pub hybrid_model_url: Option<String>,
    pub model_timeout_secs: u64,
    // Limits
    pub max_upload_bytes: usize,
    pub output_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://audio_examples.db".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            examples_dir: env::var("EXAMPLES_DIR")
                .unwrap_or_else(|_| "example_audio".to_string())
                .into(),
            output_dir: env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "generated_audio".to_string())
                .into(),
            scratch_dir: env::var("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            transformer_model_url: env::var("TRANSFORMER_MODEL_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:7000".to_string()),
            hybrid_model_url: env::var("HYBRID_MODEL_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            model_timeout_secs: env::var("MODEL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (25 * 1024 * 1024).to_string())
                .parse()?,
            output_ttl_secs: env::var("OUTPUT_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()?,
        };

        Ok(config)
    }
}
