//! 클립보드 포트.
//!
//! 구현: `imgtext-app` crate (arboard)

use crate::error::CoreError;

/// 시스템 클립보드 쓰기 (`navigator.clipboard.writeText` 대응)
pub trait Clipboard: Send + Sync {
    /// 텍스트를 클립보드에 기록
    fn write_text(&self, text: &str) -> Result<(), CoreError>;
}
