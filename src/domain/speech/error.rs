use crate::error::AppError;
use crate::infrastructure::repositories::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    TooLarge(String),
    #[error("{0}")]
    Generation(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ModelError> for SpeechServiceError {
    fn from(err: ModelError) -> Self {
        SpeechServiceError::Generation(err.to_string())
    }
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Invalid(msg) => AppError::BadRequest(msg),
            SpeechServiceError::TooLarge(msg) => AppError::PayloadTooLarge(msg),
            SpeechServiceError::Generation(msg) => AppError::ExternalService(msg),
            SpeechServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
