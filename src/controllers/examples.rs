use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::controllers::extract::{AppMultipart, AppPath};
use crate::domain::examples::{AudioExample, DeleteExampleResponse};
use crate::{
    domain::examples::{ExampleService, ExampleServiceApi},
    error::{AppError, AppResult},
};

pub struct ExampleController {
    example_service: Arc<ExampleService>,
}

impl ExampleController {
    pub fn new(example_service: Arc<ExampleService>) -> Self {
        Self { example_service }
    }

    /// GET /examples - List stored examples
    pub async fn list_examples(
        State(controller): State<Arc<ExampleController>>,
    ) -> AppResult<Json<Vec<AudioExample>>> {
        let examples = controller.example_service.list_examples().await?;
        Ok(Json(examples))
    }

    /// POST /examples - Upload a reference clip (multipart: description, language, file)
    pub async fn create_example(
        State(controller): State<Arc<ExampleController>>,
        AppMultipart(mut multipart): AppMultipart,
    ) -> AppResult<(StatusCode, Json<AudioExample>)> {
        let mut description: Option<String> = None;
        let mut language: Option<String> = None;
        let mut audio: Option<Vec<u8>> = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "description" => description = Some(field.text().await?),
                "language" => language = Some(field.text().await?),
                "file" => audio = Some(field.bytes().await?.to_vec()),
                _ => {}
            }
        }

        let description =
            description.ok_or_else(|| AppError::BadRequest("description is required".to_string()))?;
        let language =
            language.ok_or_else(|| AppError::BadRequest("language is required".to_string()))?;
        let audio = audio.ok_or_else(|| AppError::BadRequest("file is required".to_string()))?;

        let example = controller
            .example_service
            .create_example(description, language, audio)
            .await?;
        Ok((StatusCode::CREATED, Json(example)))
    }

    /// GET /examples/{id} - Fetch one example
    pub async fn get_example(
        State(controller): State<Arc<ExampleController>>,
        AppPath(example_id): AppPath<i64>,
    ) -> AppResult<Json<AudioExample>> {
        let example = controller.example_service.get_example(example_id).await?;
        Ok(Json(example))
    }

    /// DELETE /examples/{id} - Delete an example and its clip
    pub async fn delete_example(
        State(controller): State<Arc<ExampleController>>,
        AppPath(example_id): AppPath<i64>,
    ) -> AppResult<Json<DeleteExampleResponse>> {
        controller
            .example_service
            .delete_example(example_id)
            .await?;
        Ok(Json(DeleteExampleResponse {
            message: "Example deleted".to_string(),
        }))
    }
}
