//! 업로드 전체 흐름 통합 테스트.
//!
//! 실제 `NinjasOcrClient`를 mockito 서버에 연결해 파일 로드 → 검증 →
//! 전송 → 렌더링까지 크레이트 경계를 넘어 검증한다.

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, RgbaImage};
use assert_matches::assert_matches;
use imgtext_app::controller::{Phase, UploadController};
use imgtext_app::session::{self, SessionOptions, SessionOutcome};
use imgtext_app::view;
use imgtext_core::config::{AppConfig, OcrApiConfig};
use imgtext_core::config_manager::ConfigManager;
use imgtext_core::error::CoreError;
use imgtext_core::models::ui::CopyTarget;
use imgtext_core::ports::ocr_provider::OcrProvider;
use imgtext_network::ninjas_ocr_client::NinjasOcrClient;
use imgtext_vision::validation;
use mockito::Matcher;
use serde_json::json;

const MAX_BYTES: u64 = 2 * 1024 * 1024;

fn write_png(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 48, image::Rgba([9, 9, 9, 255])));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    let path = dir.join(name);
    std::fs::write(&path, buf).unwrap();
    path
}

fn controller_for(endpoint: &str) -> UploadController {
    let mut config = AppConfig::default_config();
    config.ocr_api = OcrApiConfig {
        endpoint: endpoint.to_string(),
        api_key: "test-key".to_string(),
        timeout_secs: Some(5),
    };
    let client = NinjasOcrClient::new(&config.ocr_api).unwrap();
    UploadController::new(config, Arc::new(client), None)
}

#[tokio::test]
async fn png_upload_renders_text_and_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/imagetotext")
        .match_header("x-api-key", "test-key")
        .match_body(Matcher::Regex(
            r#"name="image"; filename="receipt.png""#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"text": "TOTAL", "bounding_box": {"x1": 1}}, {"text": "9.99"}]"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "receipt.png");
    let file = validation::load_file(&path, MAX_BYTES).unwrap();
    assert_eq!(file.mime.as_deref(), Some("image/png"));

    let mut ctl = controller_for(&format!("{}/v1/imagetotext", server.url()));
    ctl.on_file_selected(Some(file));
    assert_eq!(ctl.phase(), Phase::Ready);
    assert!(ctl.thumbnail().is_some());

    assert!(ctl.send_img().await);
    mock.assert_async().await;

    assert_eq!(ctl.phase(), Phase::Succeeded);
    assert_eq!(ctl.result_state().plain_text, "TOTAL 9.99");
    // 키 순서 보존
    assert!(ctl
        .result_state()
        .raw_json
        .find("\"text\"")
        .unwrap()
        < ctl.result_state().raw_json.find("\"bounding_box\"").unwrap());

    let out = view::render_terminal(&view::render(&ctl, None));
    assert!(out.contains("파일: receipt.png"));
    assert!(out.contains("썸네일: 200x150"));
    assert!(out.contains("TOTAL 9.99"));
}

#[tokio::test]
async fn api_error_payload_is_shown_as_json() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/imagetotext")
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Invalid API Key."}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "scan.png");

    let mut ctl = controller_for(&format!("{}/v1/imagetotext", server.url()));
    ctl.on_file_selected(Some(validation::load_file(&path, MAX_BYTES).unwrap()));
    ctl.send_img().await;

    assert_matches!(ctl.phase(), Phase::Failed);
    assert_eq!(ctl.result_state().plain_text, "");
    let payload: serde_json::Value = serde_json::from_str(&ctl.result_state().raw_json).unwrap();
    assert_eq!(payload, json!({"error": "Invalid API Key."}));
    assert!(!ctl.ui_flags().send_disabled);
    assert!(view::render(&ctl, None).to_html().contains("overflow-x: scroll;"));
}

#[tokio::test]
async fn unreachable_endpoint_shows_network_error() {
    let mut ctl = controller_for("http://127.0.0.1:1/v1/imagetotext");
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "scan.png");
    ctl.on_file_selected(Some(validation::load_file(&path, MAX_BYTES).unwrap()));
    ctl.send_img().await;

    assert_matches!(ctl.phase(), Phase::Failed);
    let payload: serde_json::Value = serde_json::from_str(&ctl.result_state().raw_json).unwrap();
    assert!(payload["error"].as_str().unwrap().contains("OCR API"));
}

#[tokio::test]
async fn rejected_file_never_reaches_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("anim.gif");
    std::fs::write(&path, b"GIF89a").unwrap();

    let mut ctl = controller_for(&format!("{}/v1/imagetotext", server.url()));
    ctl.on_file_selected(Some(validation::load_file(&path, MAX_BYTES).unwrap()));
    assert_eq!(ctl.phase(), Phase::Rejected);
    assert!(!ctl.send_img().await);

    let out = view::render_terminal(&view::render(&ctl, None));
    assert!(out.contains(view::TYPE_ERROR_TEXT));
    mock.assert_async().await;
}

#[tokio::test]
async fn response_for_replaced_file_is_discarded() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/imagetotext")
        .with_status(200)
        .with_body(r#"[{"text": "old"}]"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let old = write_png(dir.path(), "old.png");
    let new = write_png(dir.path(), "new.png");

    let mut ctl = controller_for(&format!("{}/v1/imagetotext", server.url()));
    ctl.on_file_selected(Some(validation::load_file(&old, MAX_BYTES).unwrap()));
    let pending = ctl.begin_send().unwrap();
    let outcome = ctl.provider().unwrap().recognize(&pending.file).await;

    ctl.on_file_selected(Some(validation::load_file(&new, MAX_BYTES).unwrap()));
    assert!(!ctl.complete_send(pending.token, outcome));
    assert_eq!(ctl.phase(), Phase::Ready);
    assert!(!ctl.ui_flags().show_result);
    assert_eq!(ctl.upload_state().file_name, "new.png");
}

#[test]
fn config_file_drives_upload_limits() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("config.json")).unwrap();
    manager
        .update_with(|c| {
            c.upload.max_bytes = 10;
            c.ocr_api.api_key = "from-file".to_string();
        })
        .unwrap();

    let config = manager.get();
    let client = NinjasOcrClient::new(&config.ocr_api).unwrap();
    let mut ctl = UploadController::new(config, Arc::new(client), None);
    let path = write_png(dir.path(), "small.png");
    let file = validation::load_file(&path, ctl.config().upload.max_bytes).unwrap();
    assert!(file.bytes.is_empty());
    ctl.on_file_selected(Some(file));

    assert_eq!(ctl.phase(), Phase::Rejected);
    assert!(ctl.upload_state().validation_errors.size_exceeded);
    assert!(!ctl.upload_state().validation_errors.type_invalid);

    let out = view::render_terminal(&view::render(&ctl, None));
    assert!(out.contains("File must not exceed 10 bytes"));
}

fn keyless_config() -> AppConfig {
    let mut config = AppConfig::default_config();
    config.ocr_api.api_key = String::new();
    config
}

#[tokio::test]
async fn keyless_session_reports_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.gif");
    std::fs::write(&path, b"GIF89a").unwrap();
    let file = validation::load_file(&path, MAX_BYTES).unwrap();

    let mut ctl = UploadController::without_provider(keyless_config(), None);
    let outcome = session::run_session(
        &mut ctl,
        file,
        SessionOptions::default(),
        session::connect_ninjas,
    )
    .await;

    assert_matches!(outcome, Ok(SessionOutcome::Rejected));
    let out = view::render_terminal(&view::render(&ctl, None));
    assert!(out.contains(view::TYPE_ERROR_TEXT));
}

#[tokio::test]
async fn keyless_session_without_send_shows_thumbnail() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "scan.png");
    let file = validation::load_file(&path, MAX_BYTES).unwrap();

    let mut ctl = UploadController::without_provider(keyless_config(), None);
    let options = SessionOptions {
        send: false,
        copy: None,
    };
    let outcome = session::run_session(&mut ctl, file, options, session::connect_ninjas).await;

    assert_matches!(outcome, Ok(SessionOutcome::Validated));
    let out = view::render_terminal(&view::render(&ctl, None));
    assert!(out.contains("썸네일: 200x150"));
}

#[tokio::test]
async fn keyless_session_send_fails_on_connect() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "scan.png");
    let file = validation::load_file(&path, MAX_BYTES).unwrap();

    let mut ctl = UploadController::without_provider(keyless_config(), None);
    let outcome = session::run_session(
        &mut ctl,
        file,
        SessionOptions::default(),
        session::connect_ninjas,
    )
    .await;

    assert_matches!(outcome, Err(CoreError::Config(msg)) if msg.contains("API 키"));
}

#[tokio::test]
async fn session_connects_lazily_and_copies() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/imagetotext")
        .match_header("x-api-key", "lazy-key")
        .with_status(200)
        .with_body(r#"[{"text": "Hi"}]"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "scan.png");
    let file = validation::load_file(&path, MAX_BYTES).unwrap();

    let mut config = AppConfig::default_config();
    config.ocr_api.endpoint = format!("{}/v1/imagetotext", server.url());
    config.ocr_api.api_key = "lazy-key".to_string();
    let mut ctl = UploadController::without_provider(config, None);
    let options = SessionOptions {
        send: true,
        copy: Some(CopyTarget::ResultText),
    };

    let outcome = session::run_session(&mut ctl, file, options, session::connect_ninjas).await;

    assert_matches!(outcome, Ok(SessionOutcome::Succeeded));
    mock.assert_async().await;
    assert_eq!(ctl.result_state().plain_text, "Hi");
    let toast = ctl.messages().current().unwrap();
    assert_eq!(toast.text, "result-text 복사됨");
    assert!(ctl.provider().is_some());
}
