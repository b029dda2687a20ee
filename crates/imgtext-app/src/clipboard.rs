//! 시스템 클립보드 어댑터.
//!
//! `Clipboard` 포트 구현. 쓰기마다 arboard 핸들을 새로 연다.

use imgtext_core::error::CoreError;
use imgtext_core::ports::clipboard::Clipboard;
use tracing::{debug, warn};

/// arboard 기반 클립보드
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// 시스템 클립보드 사용 가능 여부 확인 (헤드리스 환경에서는 None)
    pub fn probe() -> Option<Self> {
        match arboard::Clipboard::new() {
            Ok(_) => Some(Self),
            Err(e) => {
                warn!("시스템 클립보드 사용 불가: {e}");
                None
            }
        }
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), CoreError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| CoreError::ClipboardUnavailable(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| CoreError::ClipboardUnavailable(e.to_string()))?;
        debug!(chars = text.chars().count(), "클립보드 기록");
        Ok(())
    }
}
