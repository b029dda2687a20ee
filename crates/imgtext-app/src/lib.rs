//! # imgtext-app
//!
//! 업로드 세션 오케스트레이션.
//!
//! - [`controller`]: 파일 선택/검증/전송/복사 상태 머신
//! - [`messages`]: 취소 가능한 토스트 메시지
//! - [`view`]: 상태 → 선언적 뷰 트리 렌더링
//! - [`session`]: CLI 세션 (검증 후 필요할 때만 OCR 클라이언트 연결)
//! - [`clipboard`]: arboard 기반 시스템 클립보드 어댑터

pub mod clipboard;
pub mod controller;
pub mod messages;
pub mod session;
pub mod view;
