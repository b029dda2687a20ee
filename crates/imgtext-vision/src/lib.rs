//! # imgtext-vision
//!
//! 업로드 이미지 전처리 크레이트.
//! 선택된 파일의 MIME 형식/크기 검증과 미리보기 썸네일(data URL) 생성을 담당한다.

pub mod thumbnail;
pub mod validation;
