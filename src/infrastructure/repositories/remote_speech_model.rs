use super::speech_model::{ModelError, SpeechModel};
use crate::domain::speech::{Codes, Conditioning, ConditioningInput, SpeakerEmbedding, Waveform};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

const SPEAKER_EMBEDDING_PATH: &str = "/v1/speaker-embedding";
const CONDITIONING_PATH: &str = "/v1/conditioning";
const GENERATE_PATH: &str = "/v1/generate";
const DECODE_PATH: &str = "/v1/decode";
const HEALTH_PATH: &str = "/health";

#[derive(Debug, Serialize)]
struct SpeakerEmbeddingRequest<'a> {
    samples: &'a [f32],
    sample_rate: u32,
    channels: u16,
}

#[derive(Debug, Deserialize)]
struct SpeakerEmbeddingResponse {
    embedding: SpeakerEmbedding,
}

#[derive(Debug, Deserialize)]
struct ConditioningResponse {
    conditioning: Conditioning,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    conditioning: &'a Conditioning,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    codes: Codes,
}

#[derive(Debug, Serialize)]
struct DecodeRequest<'a> {
    codes: &'a Codes,
}

#[derive(Debug, Deserialize)]
struct DecodeResponse {
    samples: Vec<f32>,
    sample_rate: u32,
    #[serde(default = "default_channels")]
    channels: u16,
}

fn default_channels() -> u16 {
    1
}

/// Speech model hosted by a separate inference server, reached over HTTP/JSON
pub struct RemoteSpeechModel {
    name: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl RemoteSpeechModel {
    pub fn new(name: &str, base_url: &str, timeout: Duration) -> Result<Self, ModelError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    async fn call<B, R>(&self, path: &str, body: &B) -> Result<R, ModelError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let start_time = std::time::Instant::now();

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(model = %self.name, url = %url, error = %e, "Model server request failed");
                ModelError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                model = %self.name,
                url = %url,
                status = status.as_u16(),
                message = %message,
                "Model server returned an error"
            );
            return Err(ModelError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response
            .json::<R>()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            model = %self.name,
            path = path,
            latency_ms = start_time.elapsed().as_millis(),
            "Model server call completed"
        );

        Ok(parsed)
    }
}

#[async_trait]
impl SpeechModel for RemoteSpeechModel {
    async fn make_speaker_embedding(
        &self,
        waveform: &Waveform,
    ) -> Result<SpeakerEmbedding, ModelError> {
        let request = SpeakerEmbeddingRequest {
            samples: &waveform.samples,
            sample_rate: waveform.sample_rate,
            channels: waveform.channels,
        };
        let response: SpeakerEmbeddingResponse =
            self.call(SPEAKER_EMBEDDING_PATH, &request).await?;

        if response.embedding.0.is_empty() {
            return Err(ModelError::InvalidResponse(
                "speaker embedding is empty".to_string(),
            ));
        }

        Ok(response.embedding)
    }

    async fn prepare_conditioning(
        &self,
        input: &ConditioningInput,
    ) -> Result<Conditioning, ModelError> {
        let response: ConditioningResponse = self.call(CONDITIONING_PATH, input).await?;
        Ok(response.conditioning)
    }

    async fn generate(&self, conditioning: &Conditioning) -> Result<Codes, ModelError> {
        let response: GenerateResponse = self
            .call(GENERATE_PATH, &GenerateRequest { conditioning })
            .await?;
        Ok(response.codes)
    }

    async fn decode(&self, codes: &Codes) -> Result<Waveform, ModelError> {
        let response: DecodeResponse = self.call(DECODE_PATH, &DecodeRequest { codes }).await?;

        if response.sample_rate == 0 || response.channels == 0 {
            return Err(ModelError::InvalidResponse(format!(
                "decoded audio has invalid layout: {} Hz, {} channels",
                response.sample_rate, response.channels
            )));
        }

        Ok(Waveform::new(
            response.samples,
            response.sample_rate,
            response.channels,
        ))
    }

    async fn is_ready(&self) -> bool {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        match self.http_client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(model = %self.name, error = %e, "Model server health check failed");
                false
            }
        }
    }
}
