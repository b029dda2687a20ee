//! imgtext 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 라이브러리 에러를 `map_err`로 `CoreError`에 매핑한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 로컬 검증, 원격 OCR, 클립보드, 설정 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 허용되지 않은 MIME 서브타입
    #[error("허용되지 않은 파일 형식: {mime}")]
    InvalidFileType {
        /// 선택된 파일의 MIME 타입 (예: "image/gif")
        mime: String,
    },

    /// 파일 크기 초과
    #[error("파일 크기 초과: {size} bytes (최대 {max} bytes)")]
    SizeExceeded {
        /// 실제 크기
        size: u64,
        /// 허용 최대 크기
        max: u64,
    },

    /// OCR API가 실패 응답을 반환함
    #[error("OCR API 에러 ({status}): {payload}")]
    OcrApi {
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문 (JSON이 아니면 문자열 값)
        payload: serde_json::Value,
    },

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 클립보드 사용 불가
    #[error("클립보드 사용 불가: {0}")]
    ClipboardUnavailable(String),

    /// 이미지 디코딩/인코딩 실패
    #[error("이미지 처리 에러: {0}")]
    Image(String),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 로컬 검증 에러인지 여부 (전송 차단, 파일 재선택으로 복구)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidFileType { .. } | CoreError::SizeExceeded { .. }
        )
    }

    /// 결과 JSON 영역에 표시할 에러 페이로드
    ///
    /// API 실패는 응답 본문 그대로, 그 외에는 `{"error": "<메시지>"}`.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            CoreError::OcrApi { payload, .. } => payload.clone(),
            other => serde_json::json!({ "error": other.to_string() }),
        }
    }
}
