//! OCR 결과 상태.
//!
//! 원격 응답(JSON)을 평문 텍스트 + 정렬된 JSON 문자열로 변환한다.

use serde_json::Value;

/// OCR 결과 표시 상태
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultState {
    /// 인식된 텍스트 (공백 하나로 연결)
    pub plain_text: String,
    /// 전체 응답의 pretty JSON (2칸 들여쓰기)
    pub raw_json: String,
    /// 결과 영역 표시 여부
    pub visible: bool,
}

impl ResultState {
    /// 성공 응답으로부터 결과 생성
    pub fn from_response(response: &Value) -> Self {
        Self {
            plain_text: extract_plain_text(response),
            raw_json: pretty_json(response),
            visible: true,
        }
    }

    /// 실패 페이로드로부터 결과 생성 (텍스트 영역은 비운다)
    pub fn from_error_payload(payload: &Value) -> Self {
        Self {
            plain_text: String::new(),
            raw_json: pretty_json(payload),
            visible: true,
        }
    }
}

/// 응답 배열의 `text` 필드를 공백 하나로 연결
///
/// 배열이 아니면 빈 문자열. 문자열 `text`가 없는 요소는 빈 문자열로 취급한다.
pub fn extract_plain_text(response: &Value) -> String {
    let Some(items) = response.as_array() else {
        return String::new();
    };

    items
        .iter()
        .map(|item| item.get("text").and_then(Value::as_str).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 2칸 들여쓰기 JSON 직렬화
pub fn pretty_json(value: &Value) -> String {
    // Value 직렬화는 실패하지 않는다 (맵 키가 항상 문자열)
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
