use crate::e2e::helpers;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use helpers::api_client::FormPart;
use helpers::assertions::{assert_base64_wav, assert_wav};
use helpers::fixtures::speaker_wav;
use helpers::{count_files, TestContext, FAKE_SAMPLE_RATE};
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

fn generate_form<'a>(text: &'a str, language: &'a str, audio: &'a [u8]) -> Vec<FormPart<'a>> {
    vec![
        FormPart::Text("text", text),
        FormPart::Text("language", language),
        FormPart::File {
            name: "speaker_file",
            filename: "speaker.wav",
            bytes: audio,
        },
    ]
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_audio_from_uploaded_clip(ctx: &TestContext) {
    let audio = speaker_wav();

    let response = ctx
        .client
        .post_multipart("/generate", &generate_form("Hello there", "en-us", &audio))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let spec = assert_base64_wav(response.body.as_ref().unwrap());
    assert_eq!(spec.sample_rate, FAKE_SAMPLE_RATE);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(ctx.model.embedding_calls(), 1);
    assert_eq!(ctx.model.decode_calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_for_every_supported_language(ctx: &TestContext) {
    let audio = speaker_wav();

    for language in ["en-us", "ja-jp", "zh-cn", "fr-fr", "de-de"] {
        let response = ctx
            .client
            .post_multipart("/generate", &generate_form("Bonjour", language, &audio))
            .await
            .unwrap();

        response.assert_status(StatusCode::OK);
        assert_base64_wav(response.body.as_ref().unwrap());
    }

    assert_eq!(ctx.model.embedding_calls(), 5);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_trailing_slash_and_default_language(ctx: &TestContext) {
    let audio = speaker_wav();

    let response = ctx
        .client
        .post_multipart(
            "/generate/",
            &[
                FormPart::Text("text", "No language given"),
                FormPart::File {
                    name: "speaker_file",
                    filename: "speaker.wav",
                    bytes: &audio,
                },
            ],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_base64_wav(response.body.as_ref().unwrap());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_text_without_calling_model(ctx: &TestContext) {
    let audio = speaker_wav();

    let response = ctx
        .client
        .post_multipart("/generate", &generate_form("   ", "en-us", &audio))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Text cannot be empty");
    assert_eq!(ctx.model.embedding_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unsupported_language(ctx: &TestContext) {
    let audio = speaker_wav();

    let response = ctx
        .client
        .post_multipart("/generate", &generate_form("Hello", "xx-xx", &audio))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("unsupported language 'xx-xx'");
    assert_eq!(ctx.model.embedding_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_model_type(ctx: &TestContext) {
    let audio = speaker_wav();
    let mut form = generate_form("Hello", "en-us", &audio);
    form.push(FormPart::Text("model_type", "diffusion"));

    let response = ctx.client.post_multipart("/generate", &form).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid model type");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_speaker_file(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/generate",
            &[
                FormPart::Text("text", "Hello"),
                FormPart::Text("language", "en-us"),
            ],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("speaker_file is required");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unreadable_speaker_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/generate",
            &generate_form("Hello", "en-us", b"definitely not a wav file"),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid speaker audio");
    assert_eq!(ctx.model.embedding_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_map_model_failure_to_server_error(ctx: &TestContext) {
    ctx.model.fail_with_upstream_error();
    let audio = speaker_wav();

    let response = ctx
        .client
        .post_multipart("/generate", &generate_form("Hello", "en-us", &audio))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Generation failed");
    assert_eq!(ctx.model.decode_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_remove_staged_upload_on_success_and_failure(ctx: &TestContext) {
    let audio = speaker_wav();

    ctx.client
        .post_multipart("/generate", &generate_form("Hello", "en-us", &audio))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
    assert_eq!(count_files(&ctx.config.scratch_dir), 0);

    ctx.client
        .post_multipart("/generate", &generate_form("", "en-us", &audio))
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(count_files(&ctx.config.scratch_dir), 0);

    ctx.model.fail_with_upstream_error();
    ctx.client
        .post_multipart("/generate", &generate_form("Hello", "en-us", &audio))
        .await
        .unwrap()
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(count_files(&ctx.config.scratch_dir), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_raw_wav_when_requested(ctx: &TestContext) {
    let audio = speaker_wav();
    let mut form = generate_form("Hallo Welt", "de-de", &audio);
    form.push(FormPart::Text("response_format", "wav"));
    form.push(FormPart::Text("model_type", "hybrid"));

    let response = ctx.client.post_multipart("/generate", &form).await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/wav")
        .assert_header("x-sample-rate", "24000")
        .assert_header("x-language", "de-de")
        .assert_header("x-model-type", "hybrid")
        .assert_header_exists("x-duration-seconds");

    let spec = assert_wav(&response.body_bytes);
    assert_eq!(spec.channels, 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_from_base64_json(ctx: &TestContext) {
    let request = json!({
        "text": "こんにちは",
        "language": "ja-jp",
        "speaker_audio": STANDARD.encode(speaker_wav()),
    });

    let response = ctx.client.post("/tts", &request).await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_base64_wav(response.body.as_ref().unwrap());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_data_url_speaker_audio(ctx: &TestContext) {
    let request = json!({
        "text": "Hello",
        "speaker_audio": format!("data:audio/wav;base64,{}", STANDARD.encode(speaker_wav())),
        "response_format": "wav",
    });

    let response = ctx.client.post("/tts", &request).await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-language", "en-us")
        .assert_header("x-model-type", "transformer");
    assert_wav(&response.body_bytes);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_base64_audio(ctx: &TestContext) {
    let request = json!({
        "text": "Hello",
        "speaker_audio": "%%%not-base64%%%",
    });

    let response = ctx.client.post("/tts", &request).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("not valid base64");
    assert_eq!(ctx.model.embedding_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_text_over_limit(ctx: &TestContext) {
    let request = json!({
        "text": "a".repeat(10_001),
        "speaker_audio": STANDARD.encode(speaker_wav()),
    });

    let response = ctx.client.post("/tts", &request).await.unwrap();

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_error_message("10000 characters or less");
    assert_eq!(ctx.model.embedding_calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_tts_body_without_text_as_bad_request(ctx: &TestContext) {
    let request = json!({
        "speaker_audio": STANDARD.encode(speaker_wav()),
    });

    let response = ctx.client.post("/tts", &request).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("missing field `text`");
    assert_eq!(ctx.model.embedding_calls(), 0);
}
