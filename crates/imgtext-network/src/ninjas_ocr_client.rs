//! api-ninjas imagetotext OCR 클라이언트.
//!
//! 이미지를 multipart form(`image` 필드)으로 업로드하고
//! 응답 JSON을 가공 없이 반환한다. 재시도는 하지 않는다.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use imgtext_core::config::OcrApiConfig;
use imgtext_core::error::CoreError;
use imgtext_core::models::upload::SelectedFile;
use imgtext_core::ports::ocr_provider::OcrProvider;

/// multipart 필드 이름
const IMAGE_FIELD: &str = "image";

/// API 키 헤더
const API_KEY_HEADER: &str = "X-Api-Key";

// ============================================================
// NinjasOcrClient: 원격 OCR API 클라이언트
// ============================================================

/// 원격 OCR API 클라이언트: `OcrProvider` 포트 구현
///
/// `POST {endpoint}` + multipart `image` + `X-Api-Key` 헤더.
///
/// **보안**: API 키는 설정/환경변수에서 주입하며 로그에 남기지 않는다.
pub struct NinjasOcrClient {
    /// HTTP 클라이언트
    http_client: reqwest::Client,
    /// API 엔드포인트 URL
    endpoint: String,
    /// API 키 (메모리에만 유지)
    api_key: String,
}

impl std::fmt::Debug for NinjasOcrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NinjasOcrClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl NinjasOcrClient {
    /// 새 클라이언트 생성
    ///
    /// API 키가 비어 있으면 `CoreError::Config`.
    /// `timeout_secs`가 없으면 reqwest 기본값(무제한)을 따른다.
    pub fn new(config: &OcrApiConfig) -> Result<Self, CoreError> {
        if config.api_key.trim().is_empty() {
            return Err(CoreError::Config(
                "OCR API 키 미설정. 설정 파일 또는 IMGTEXT_API_KEY로 지정하세요.".into(),
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        debug!(
            endpoint = %config.endpoint,
            timeout = ?config.timeout_secs,
            "NinjasOcrClient 초기화"
        );

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.trim().to_string(),
        })
    }

    /// 엔드포인트 URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 업로드 form 구성: `image` 필드에 파일 바이트 + 파일 이름
    fn build_form(file: &SelectedFile) -> Result<Form, CoreError> {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        if let Some(mime) = file.mime.as_deref().filter(|m| !m.is_empty()) {
            part = part
                .mime_str(mime)
                .map_err(|e| CoreError::Network(format!("잘못된 MIME 타입 {mime}: {e}")))?;
        }
        Ok(Form::new().part(IMAGE_FIELD, part))
    }

    /// 실패 응답 본문을 페이로드로 변환 (JSON이 아니면 문자열 값)
    fn error_payload(body: &str) -> serde_json::Value {
        serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
    }
}

#[async_trait]
impl OcrProvider for NinjasOcrClient {
    async fn recognize(&self, file: &SelectedFile) -> Result<serde_json::Value, CoreError> {
        let form = Self::build_form(file)?;

        debug!(
            endpoint = %self.endpoint,
            file = %file.name,
            size = file.size,
            "OCR API 호출"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("OCR API 호출 실패: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("OCR API 응답 읽기 실패: {}", e)))?;

        if !status.is_success() {
            warn!(status = %status, "OCR API 오류 응답");
            return Err(CoreError::OcrApi {
                status: status.as_u16(),
                payload: Self::error_payload(&body),
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)?;
        debug!(
            items = value.as_array().map(|a| a.len()),
            "OCR 결과 수신"
        );
        Ok(value)
    }

    fn provider_name(&self) -> &str {
        "api-ninjas"
    }
}

// ============================================================
// 테스트
// ============================================================
