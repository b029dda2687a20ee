//! 도메인 모델.
//!
//! 업로드 세션 상태, OCR 결과, UI 플래그 구조체를 정의한다.

pub mod result;
pub mod ui;
pub mod upload;
