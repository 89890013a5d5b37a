use crate::e2e::helpers;

use helpers::api_client::FormPart;
use helpers::assertions::{assert_example_response, assert_wav};
use helpers::fixtures::{sine_wav, speaker_wav};
use helpers::{count_files, TestContext};
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;
use voice_clone_backend::domain::examples::AudioExample;

fn upload_form<'a>(description: &'a str, language: &'a str, audio: &'a [u8]) -> Vec<FormPart<'a>> {
    vec![
        FormPart::Text("description", description),
        FormPart::Text("language", language),
        FormPart::File {
            name: "file",
            filename: "reference.wav",
            bytes: audio,
        },
    ]
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_example_and_store_audio(ctx: &TestContext) {
    let audio = sine_wav(1.0, 22_050);

    let response = ctx
        .client
        .post_multipart("/examples", &upload_form("Calm narrator", "en-us", &audio))
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let body = response.body.as_ref().unwrap();
    assert_example_response(body, "Calm narrator", "en-us");

    let example: AudioExample = response.json().unwrap();
    let stored = std::fs::read(ctx.fixtures.example_path(&example.filename)).unwrap();
    assert_eq!(stored, audio);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_normalize_language_on_create(ctx: &TestContext) {
    let audio = speaker_wav();

    let response = ctx
        .client
        .post_multipart("/examples/", &upload_form("Tokyo speaker", "JA_jp", &audio))
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    assert_example_response(response.body.as_ref().unwrap(), "Tokyo speaker", "ja-jp");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_upload_without_leaving_files(ctx: &TestContext) {
    let audio = speaker_wav();

    let response = ctx
        .client
        .post_multipart("/examples", &upload_form("Bad language", "xx-xx", &audio))
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("unsupported language");

    let response = ctx
        .client
        .post_multipart("/examples", &upload_form("   ", "en-us", &audio))
        .await
        .unwrap();
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = ctx
        .client
        .post_multipart("/examples", &upload_form("Not audio", "en-us", b"plain text"))
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid audio file");

    assert_eq!(count_files(&ctx.config.examples_dir), 0);

    let list = ctx.client.get("/examples").await.unwrap();
    assert_eq!(list.body.as_ref().unwrap(), &json!([]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_all_upload_fields(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/examples",
            &[
                FormPart::Text("description", "No file"),
                FormPart::Text("language", "en-us"),
            ],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("file is required");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_examples_in_creation_order(ctx: &TestContext) {
    let first = ctx.fixtures.create_example("First", "en-us").await.unwrap();
    let second = ctx.fixtures.create_example("Second", "fr-fr").await.unwrap();

    let response = ctx.client.get("/examples").await.unwrap();
    response.assert_status(StatusCode::OK);

    let examples: Vec<AudioExample> = response.json().unwrap();
    assert_eq!(examples, vec![first, second]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_get_example_by_id(ctx: &TestContext) {
    let created = ctx.fixtures.create_example("Warm voice", "de-de").await.unwrap();

    let response = ctx
        .client
        .get(&format!("/examples/{}", created.id))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let example: AudioExample = response.json().unwrap();
    assert_eq!(example, created);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_example(ctx: &TestContext) {
    let response = ctx.client.get("/examples/4242").await.unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Example not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_delete_example_and_its_audio(ctx: &TestContext) {
    let created = ctx.fixtures.create_example("Short lived", "en-us").await.unwrap();
    let path = ctx.fixtures.example_path(&created.filename);
    assert!(path.exists());

    let response = ctx
        .client
        .delete(&format!("/examples/{}", created.id))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().unwrap(),
        &json!({ "message": "Example deleted" })
    );
    assert!(!path.exists());

    ctx.client
        .get(&format!("/examples/{}", created.id))
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);

    ctx.client
        .delete(&format!("/examples/{}", created.id))
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_delete_row_even_when_audio_is_missing(ctx: &TestContext) {
    let created = ctx
        .fixtures
        .create_example_without_audio("Orphaned row")
        .await
        .unwrap();

    let response = ctx
        .client
        .delete(&format!("/examples/{}", created.id))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    ctx.client
        .get(&format!("/examples/{}", created.id))
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_from_example_and_serve_output(ctx: &TestContext) {
    let created = ctx.fixtures.create_example("Narrator", "en-us").await.unwrap();

    let response = ctx
        .client
        .post(
            "/examples/generate",
            &json!({
                "text": "Read this with the stored voice",
                "example_id": created.id,
                "language": "en-us",
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("success").and_then(|v| v.as_bool()), Some(true));
    let audio_path = body
        .get("audio_path")
        .and_then(|v| v.as_str())
        .expect("Missing audio_path");
    assert!(audio_path.starts_with("generated_") && audio_path.ends_with(".wav"));
    assert!(ctx.config.output_dir.join(audio_path).exists());

    let download = ctx
        .client
        .get(&format!("/outputs/{}", audio_path))
        .await
        .unwrap();

    download
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/wav");
    assert_wav(&download.body_bytes);
    assert_eq!(ctx.model.embedding_calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_when_generating_from_unknown_example(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/examples/generate",
            &json!({ "text": "Hello", "example_id": 999 }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Example not found");
    assert_eq!(ctx.model.embedding_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_when_example_audio_is_missing(ctx: &TestContext) {
    let created = ctx
        .fixtures
        .create_example_without_audio("Lost clip")
        .await
        .unwrap();

    let response = ctx
        .client
        .post(
            "/examples/generate",
            &json!({ "text": "Hello", "example_id": created.id }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("example_missing.wav");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_output(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/outputs/generated_does_not_exist.wav")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("not found or expired");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_non_numeric_example_id(ctx: &TestContext) {
    let response = ctx.client.get("/examples/abc").await.unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid input");

    let response = ctx.client.delete("/examples/abc").await.unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid input");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_generation_request_without_example_id(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/examples/generate", &json!({ "text": "hi" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("missing field `example_id`");
}
