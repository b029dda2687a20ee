//! 토스트 메시지.
//!
//! 배너 하나에 메시지를 표시하고 일정 시간 뒤 숨긴다.
//! 숨김 타이머는 메시지 id에 묶인 tokio 태스크이며, 새 메시지가 오면
//! 이전 타이머를 중단하므로 오래된 타이머가 새 메시지를 숨기지 않는다.

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// 메시지 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(u64);

/// 메시지 심각도 (배너 CSS 상태)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    /// 성공 (`success`)
    Success,
    /// 에러 (`error`)
    #[default]
    Error,
}

impl Severity {
    /// 배너 CSS 클래스
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// 배너 상태 스냅샷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// 메시지 id
    pub id: MessageId,
    /// 표시 텍스트 (숨김 후 빈 문자열)
    pub text: String,
    /// 심각도
    pub severity: Severity,
    /// `hidden` 상태
    pub hidden: bool,
}

/// 토스트 메시지 센터
pub struct MessageCenter {
    banner: Arc<Mutex<Option<Toast>>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    next_id: AtomicU64,
    duration: Duration,
}

impl MessageCenter {
    /// 새 메시지 센터 (표시 시간 지정)
    pub fn new(duration: Duration) -> Self {
        Self {
            banner: Arc::new(Mutex::new(None)),
            timer: Mutex::new(None),
            next_id: AtomicU64::new(0),
            duration,
        }
    }

    /// 메시지 표시 후 `duration` 뒤 숨김 예약
    ///
    /// tokio 런타임 안에서 호출해야 한다.
    pub fn show_messages(&self, text: impl Into<String>, severity: Severity) -> MessageId {
        let id = MessageId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let text = text.into();
        debug!(id = id.0, %severity, "토스트 표시: {text}");

        *self.banner.lock() = Some(Toast {
            id,
            text,
            severity,
            hidden: false,
        });

        let banner = Arc::clone(&self.banner);
        let duration = self.duration;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut banner = banner.lock();
            if let Some(toast) = banner.as_mut().filter(|t| t.id == id) {
                toast.text.clear();
                toast.hidden = true;
            }
        });

        if let Some(previous) = self.timer.lock().replace(handle) {
            previous.abort();
        }
        id
    }

    /// 에러 메시지 표시 (기본 심각도)
    pub fn show_error(&self, text: impl Into<String>) -> MessageId {
        self.show_messages(text, Severity::default())
    }

    /// 즉시 숨김 + 타이머 취소
    pub fn dismiss(&self) {
        if let Some(timer) = self.timer.lock().take() {
            timer.abort();
        }
        if let Some(toast) = self.banner.lock().as_mut() {
            toast.text.clear();
            toast.hidden = true;
        }
    }

    /// 현재 배너 상태 (한 번도 표시하지 않았으면 None)
    pub fn current(&self) -> Option<Toast> {
        self.banner.lock().clone()
    }
}

impl Drop for MessageCenter {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.get_mut().take() {
            timer.abort();
        }
    }
}
