use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ExampleServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("example not found")]
    NotFound,
    #[error("example audio file is missing: {0}")]
    MissingAudio(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for ExampleServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => ExampleServiceError::Invalid(msg),
            AppError::NotFound(_) => ExampleServiceError::NotFound,
            _ => ExampleServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<ExampleServiceError> for AppError {
    fn from(err: ExampleServiceError) -> Self {
        match err {
            ExampleServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ExampleServiceError::NotFound => AppError::NotFound("Example not found".to_string()),
            ExampleServiceError::MissingAudio(filename) => {
                AppError::NotFound(format!("Example audio file '{}' not found", filename))
            }
            ExampleServiceError::Dependency(msg) => AppError::Internal(msg),
            ExampleServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
