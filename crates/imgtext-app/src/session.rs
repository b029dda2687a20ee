//! CLI 업로드 세션.
//!
//! 파일 선택 → 검증 → (필요할 때만) OCR 클라이언트 연결 → 전송 → 복사 순서로
//! 컨트롤러를 구동한다. 거부된 파일이나 `send == false`에서는 클라이언트를
//! 만들지 않으므로 API 키 없이도 검증과 썸네일을 확인할 수 있다.

use std::sync::Arc;

use imgtext_core::config::OcrApiConfig;
use imgtext_core::error::CoreError;
use imgtext_core::models::ui::CopyTarget;
use imgtext_core::models::upload::SelectedFile;
use imgtext_core::ports::ocr_provider::OcrProvider;
use imgtext_network::ninjas_ocr_client::NinjasOcrClient;
use tracing::info;

use crate::controller::{Phase, UploadController};
use crate::messages::Severity;

/// 세션 옵션
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// OCR 전송 여부
    pub send: bool,
    /// 성공 시 복사 대상
    pub copy: Option<CopyTarget>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            send: true,
            copy: None,
        }
    }
}

/// 세션 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// 검증 실패
    Rejected,
    /// 검증 통과, 전송 안 함
    Validated,
    /// OCR 성공
    Succeeded,
    /// OCR 실패 (결과 영역에 에러 표시)
    Failed,
}

/// api-ninjas 클라이언트 연결 (키가 비어 있으면 `CoreError::Config`)
pub fn connect_ninjas(config: &OcrApiConfig) -> Result<Arc<dyn OcrProvider>, CoreError> {
    Ok(Arc::new(NinjasOcrClient::new(config)?))
}

/// 세션 실행
///
/// 컨트롤러에 제공자가 없고 전송이 필요할 때만 `connect`를 호출한다.
/// 연결 실패만 `Err`이며, OCR 실패는 `SessionOutcome::Failed`로 반환한다.
pub async fn run_session<F>(
    controller: &mut UploadController,
    file: SelectedFile,
    options: SessionOptions,
    connect: F,
) -> Result<SessionOutcome, CoreError>
where
    F: FnOnce(&OcrApiConfig) -> Result<Arc<dyn OcrProvider>, CoreError>,
{
    controller.on_file_selected(Some(file));
    if controller.phase() == Phase::Rejected {
        return Ok(SessionOutcome::Rejected);
    }
    if !options.send {
        info!("전송 생략 (검증만 수행)");
        return Ok(SessionOutcome::Validated);
    }

    if controller.provider().is_none() {
        let provider = connect(&controller.config().ocr_api)?;
        controller.set_provider(provider);
    }
    controller.send_img().await;

    if controller.phase() != Phase::Succeeded {
        return Ok(SessionOutcome::Failed);
    }
    if let Some(target) = options.copy {
        if controller.copy_text(target.id()) {
            controller.show_messages(format!("{target} 복사됨"), Severity::Success);
        }
    }
    Ok(SessionOutcome::Succeeded)
}
