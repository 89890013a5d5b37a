use super::error::ExampleServiceError;
use super::model::AudioExample;
use crate::domain::speech::{LanguageCode, Waveform};
use crate::infrastructure::repositories::ExampleRepository;
use crate::infrastructure::storage::ExampleFileStore;
use async_trait::async_trait;
use std::sync::Arc;

pub struct ExampleService {
    example_repo: Arc<ExampleRepository>,
    files: Arc<ExampleFileStore>,
}

impl ExampleService {
    pub fn new(example_repo: Arc<ExampleRepository>, files: Arc<ExampleFileStore>) -> Self {
        Self {
            example_repo,
            files,
        }
    }
}

#[async_trait]
pub trait ExampleServiceApi: Send + Sync {
    /// Store an uploaded clip and its metadata row
    async fn create_example(
        &self,
        description: String,
        language: String,
        audio: Vec<u8>,
    ) -> Result<AudioExample, ExampleServiceError>;

    async fn list_examples(&self) -> Result<Vec<AudioExample>, ExampleServiceError>;

    async fn get_example(&self, id: i64) -> Result<AudioExample, ExampleServiceError>;

    /// Remove the row, then try to remove the file; file errors are only logged
    async fn delete_example(&self, id: i64) -> Result<(), ExampleServiceError>;

    /// Load the stored clip of an example for use as speaker audio
    async fn load_speaker_audio(
        &self,
        id: i64,
    ) -> Result<(AudioExample, Vec<u8>), ExampleServiceError>;
}

#[async_trait]
impl ExampleServiceApi for ExampleService {
    async fn create_example(
        &self,
        description: String,
        language: String,
        audio: Vec<u8>,
    ) -> Result<AudioExample, ExampleServiceError> {
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(ExampleServiceError::Invalid(
                "Description cannot be empty".to_string(),
            ));
        }

        let language = language
            .parse::<LanguageCode>()
            .map_err(|e| ExampleServiceError::Invalid(e.to_string()))?;

        let audio = self.validate_audio(audio).await?;

        let filename = self
            .files
            .save(&audio)
            .await
            .map_err(|e| ExampleServiceError::Dependency(format!("failed to store audio: {}", e)))?;

        let example = match self
            .example_repo
            .create(&description, &filename, language.as_str())
            .await
        {
            Ok(example) => example,
            Err(e) => {
                // Keep the directory free of files no row points at
                if let Err(remove_err) = self.files.remove(&filename).await {
                    tracing::warn!(
                        filename = %filename,
                        error = %remove_err,
                        "Failed to remove audio after insert failure"
                    );
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            example_id = example.id,
            filename = %example.filename,
            language = %example.language,
            audio_size_bytes = audio.len(),
            "Audio example created"
        );

        Ok(example)
    }

    async fn list_examples(&self) -> Result<Vec<AudioExample>, ExampleServiceError> {
        Ok(self.example_repo.find_all().await?)
    }

    async fn get_example(&self, id: i64) -> Result<AudioExample, ExampleServiceError> {
        self.example_repo
            .find_by_id(id)
            .await?
            .ok_or(ExampleServiceError::NotFound)
    }

    async fn delete_example(&self, id: i64) -> Result<(), ExampleServiceError> {
        let example = self.get_example(id).await?;

        if !self.example_repo.delete(id).await? {
            return Err(ExampleServiceError::NotFound);
        }

        if let Err(e) = self.files.remove(&example.filename).await {
            tracing::warn!(
                example_id = id,
                filename = %example.filename,
                error = %e,
                "Audio example file could not be removed"
            );
        }

        tracing::info!(example_id = id, "Audio example deleted");
        Ok(())
    }

    async fn load_speaker_audio(
        &self,
        id: i64,
    ) -> Result<(AudioExample, Vec<u8>), ExampleServiceError> {
        let example = self.get_example(id).await?;

        match self.files.read(&example.filename).await {
            Ok(bytes) => Ok((example, bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ExampleServiceError::MissingAudio(example.filename))
            }
            Err(e) => Err(ExampleServiceError::Dependency(format!(
                "failed to read example audio: {}",
                e
            ))),
        }
    }
}

impl ExampleService {
    async fn validate_audio(&self, audio: Vec<u8>) -> Result<Vec<u8>, ExampleServiceError> {
        if audio.is_empty() {
            return Err(ExampleServiceError::Invalid(
                "Audio file is required".to_string(),
            ));
        }

        tokio::task::spawn_blocking(move || {
            Waveform::from_wav_bytes(&audio)
                .map(|_| audio)
                .map_err(|e| ExampleServiceError::Invalid(format!("Invalid audio file: {}", e)))
        })
        .await
        .map_err(|e| ExampleServiceError::Other(anyhow::anyhow!("audio validation task failed: {}", e)))?
    }
}
