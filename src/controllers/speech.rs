use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    controllers::extract::{AppJson, AppMultipart, AppPath},
    domain::{
        examples::{ExampleService, ExampleServiceApi},
        speech::{
            dto::{
                AudioPathResponse, AudioResponse, ExampleGenerationRequest, LanguagesResponse,
                TtsRequest,
            },
            GeneratedAudio, LanguageCode, ResponseFormat, SpeechInput, SpeechService,
            SpeechServiceApi,
        },
    },
    error::{AppError, AppResult},
    infrastructure::storage::{OutputStore, StagedUpload},
};

const WAV_CONTENT_TYPE: &str = "audio/wav";

pub struct SpeechController {
    speech_service: Arc<SpeechService>,
    example_service: Arc<ExampleService>,
    output_store: Arc<OutputStore>,
    scratch_dir: PathBuf,
}

impl SpeechController {
    pub fn new(
        speech_service: Arc<SpeechService>,
        example_service: Arc<ExampleService>,
        output_store: Arc<OutputStore>,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            speech_service,
            example_service,
            output_store,
            scratch_dir,
        }
    }

    /// POST /generate - Clone the voice in an uploaded clip (multipart form)
    pub async fn generate(
        State(controller): State<Arc<SpeechController>>,
        AppMultipart(mut multipart): AppMultipart,
    ) -> AppResult<Response> {
        let mut input = SpeechInput::default();
        let mut response_format = ResponseFormat::default();
        let mut staged: Option<StagedUpload> = None;

        while let Some(mut field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "text" => input.text = field.text().await?,
                "language" => input.language = Some(field.text().await?),
                "model_type" => input.model_type = Some(field.text().await?),
                "response_format" => {
                    response_format = field
                        .text()
                        .await?
                        .parse()
                        .map_err(AppError::BadRequest)?;
                }
                "speaker_file" => {
                    let mut upload = StagedUpload::create(&controller.scratch_dir, "speaker_")?;
                    while let Some(chunk) = field.chunk().await? {
                        upload.append(&chunk).await?;
                    }
                    tracing::debug!(
                        filename = ?field.file_name(),
                        staged_path = %upload.path().display(),
                        size_bytes = upload.len(),
                        "Speaker upload staged"
                    );
                    staged = Some(upload);
                }
                _ => {}
            }
        }

        let mut staged = staged
            .ok_or_else(|| AppError::BadRequest("speaker_file is required".to_string()))?;
        input.speaker_audio = staged.read_all().await?;

        let request = controller.speech_service.prepare(input).await?;
        let audio = controller.speech_service.generate(request).await?;

        audio_response(audio, response_format)
    }

    /// POST /tts - Clone the voice in a base64 clip (JSON body)
    pub async fn tts(
        State(controller): State<Arc<SpeechController>>,
        AppJson(request): AppJson<TtsRequest>,
    ) -> AppResult<Response> {
        let speaker_audio = decode_base64_audio(&request.speaker_audio)?;

        let speech_request = controller
            .speech_service
            .prepare(SpeechInput {
                text: request.text,
                language: request.language,
                model_type: request.model_type,
                speaker_audio,
            })
            .await?;
        let audio = controller.speech_service.generate(speech_request).await?;

        audio_response(audio, request.response_format)
    }

    /// POST /examples/generate - Speak with a stored example's voice
    pub async fn generate_from_example(
        State(controller): State<Arc<SpeechController>>,
        AppJson(request): AppJson<ExampleGenerationRequest>,
    ) -> AppResult<Json<AudioPathResponse>> {
        let (example, speaker_audio) = controller
            .example_service
            .load_speaker_audio(request.example_id)
            .await?;

        let speech_request = controller
            .speech_service
            .prepare(SpeechInput {
                text: request.text,
                language: request.language,
                model_type: request.model_type,
                speaker_audio,
            })
            .await?;
        let audio = controller.speech_service.generate(speech_request).await?;

        let audio_path = controller.output_store.save(&audio.wav_bytes).await?;
        tracing::info!(
            example_id = example.id,
            audio_path = %audio_path,
            "Generated audio stored"
        );

        Ok(Json(AudioPathResponse {
            success: true,
            audio_path,
        }))
    }

    /// GET /outputs/{name} - Download a stored generation result
    pub async fn download_output(
        State(controller): State<Arc<SpeechController>>,
        AppPath(name): AppPath<String>,
    ) -> AppResult<Response> {
        let bytes = controller
            .output_store
            .read(&name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Output '{}' not found or expired", name)))?;

        Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, WAV_CONTENT_TYPE)],
            Body::from(bytes),
        )
            .into_response())
    }

    /// GET /languages - Supported language codes
    pub async fn languages(
        State(controller): State<Arc<SpeechController>>,
    ) -> Json<LanguagesResponse> {
        Json(LanguagesResponse {
            languages: LanguageCode::ALL
                .iter()
                .map(|code| code.as_str().to_string())
                .collect(),
            default: LanguageCode::default().as_str().to_string(),
            models: controller
                .speech_service
                .available_models()
                .iter()
                .map(|model| model.as_str().to_string())
                .collect(),
        })
    }
}

/// Accepts plain base64 or a `data:audio/...;base64,` URL
fn decode_base64_audio(payload: &str) -> AppResult<Vec<u8>> {
    let encoded = match payload.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => payload,
    };

    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| AppError::BadRequest(format!("speaker_audio is not valid base64: {}", e)))?;

    if bytes.is_empty() {
        return Err(AppError::BadRequest("speaker_audio is required".to_string()));
    }
    Ok(bytes)
}

fn audio_response(audio: GeneratedAudio, format: ResponseFormat) -> AppResult<Response> {
    match format {
        ResponseFormat::Base64 => Ok(Json(AudioResponse {
            success: true,
            audio: STANDARD.encode(&audio.wav_bytes),
        })
        .into_response()),
        ResponseFormat::Wav => {
            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(WAV_CONTENT_TYPE));
            headers.insert("x-sample-rate", HeaderValue::from(audio.sample_rate));
            headers.insert(
                "x-duration-seconds",
                HeaderValue::from_str(&format!("{:.2}", audio.duration_secs))
                    .map_err(|e| AppError::Internal(e.to_string()))?,
            );
            headers.insert("x-language", HeaderValue::from_static(audio.language.as_str()));
            headers.insert("x-model-type", HeaderValue::from_static(audio.model_type.as_str()));

            Ok((StatusCode::OK, headers, Body::from(audio.wav_bytes)).into_response())
        }
    }
}
