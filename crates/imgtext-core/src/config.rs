//! 애플리케이션 설정 구조체.
//!
//! OCR API 엔드포인트/키, 업로드 제약, UI 표시 설정을 정의한다.
//! API 키는 소스에 포함하지 않고 설정 파일 또는 환경변수로 주입한다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// API 키 주입용 환경변수 이름
pub const API_KEY_ENV: &str = "IMGTEXT_API_KEY";

/// 기본 OCR 엔드포인트 (api-ninjas imagetotext)
pub const DEFAULT_OCR_ENDPOINT: &str = "https://api.api-ninjas.com/v1/imagetotext";

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 원격 OCR API 설정
    #[serde(default)]
    pub ocr_api: OcrApiConfig,
    /// 업로드 파일 제약
    #[serde(default)]
    pub upload: UploadConfig,
    /// UI 표시 설정
    #[serde(default)]
    pub ui: UiConfig,
}

// ============================================================
// OCR API 설정
// ============================================================

/// 원격 OCR API 엔드포인트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrApiConfig {
    /// API URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API 키 (`X-Api-Key` 헤더). 비어 있으면 클라이언트 생성 실패
    #[serde(default)]
    pub api_key: String,
    /// 요청 타임아웃 (초). None이면 HTTP 클라이언트 기본값
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for OcrApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            timeout_secs: None,
        }
    }
}

impl OcrApiConfig {
    /// 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// ============================================================
// 업로드 제약
// ============================================================

/// 업로드 파일 제약: 허용 MIME 서브타입, 최대 크기
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// 허용 MIME 서브타입 ("image/png"의 "png")
    #[serde(default = "default_allowed_subtypes")]
    pub allowed_subtypes: Vec<String>,
    /// 최대 파일 크기 (바이트)
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_subtypes: default_allowed_subtypes(),
            max_bytes: default_max_bytes(),
        }
    }
}

// ============================================================
// UI 설정
// ============================================================

/// UI 표시 설정: 썸네일 크기, 토스트 표시 시간
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// 썸네일 너비 (픽셀)
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: u32,
    /// 썸네일 높이 (픽셀)
    #[serde(default = "default_thumbnail_height")]
    pub thumbnail_height: u32,
    /// 토스트 메시지 표시 시간 (밀리초)
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            thumbnail_width: default_thumbnail_width(),
            thumbnail_height: default_thumbnail_height(),
            toast_duration_ms: default_toast_duration_ms(),
        }
    }
}

impl UiConfig {
    /// 토스트 표시 시간을 Duration으로 반환
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self::default()
    }

    /// 환경변수의 API 키로 설정을 덮어쓴다 (비어 있으면 무시)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            self.apply_api_key(Some(key));
        }
    }

    /// 명시적으로 전달된 API 키 적용 (CLI 인자 등)
    pub fn apply_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key {
            let key = key.trim();
            if !key.is_empty() {
                self.ocr_api.api_key = key.to_string();
            }
        }
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_endpoint() -> String {
    DEFAULT_OCR_ENDPOINT.to_string()
}
fn default_allowed_subtypes() -> Vec<String> {
    vec!["jpeg".to_string(), "png".to_string()]
}
fn default_max_bytes() -> u64 {
    2 * 1024 * 1024
}
fn default_thumbnail_width() -> u32 {
    200
}
fn default_thumbnail_height() -> u32 {
    150
}
fn default_toast_duration_ms() -> u64 {
    3_000
}
