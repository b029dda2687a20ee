//! OCR 제공자 포트.
//!
//! 원격 OCR API를 추상화한다. 응답은 가공하지 않은 JSON으로 반환하며
//! 평문 추출은 도메인 모델(`models::result`)이 담당한다.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::upload::SelectedFile;

/// OCR 제공자
///
/// 구현체: `NinjasOcrClient` (api-ninjas imagetotext)
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// 이미지에서 텍스트 인식
    ///
    /// 성공 시 응답 본문 JSON, 실패 시 `CoreError::OcrApi`(응답 있음)
    /// 또는 `CoreError::Network`(응답 없음).
    async fn recognize(&self, file: &SelectedFile) -> Result<serde_json::Value, CoreError>;

    /// 제공자 이름 (로그용)
    fn provider_name(&self) -> &str;
}
