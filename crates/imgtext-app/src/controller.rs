//! 업로드 컨트롤러.
//!
//! 파일 선택 → 검증 → 썸네일 → 원격 OCR → 결과 표시 → 복사의 전체 흐름을
//! 명시적 상태 머신(`Phase`)으로 관리한다. UI 프레임워크에 의존하지 않으며
//! 표시는 [`crate::view::render`]가 상태로부터 계산한다.
//!
//! 요청마다 `RequestToken`을 발급하고, 파일 재선택/초기화 이후 도착한
//! 이전 요청의 응답은 버린다.

use std::sync::Arc;

use imgtext_core::config::AppConfig;
use imgtext_core::error::CoreError;
use imgtext_core::models::result::ResultState;
use imgtext_core::models::ui::{CopyIconState, CopyTarget, Thumbnail, UiFlags};
use imgtext_core::models::upload::{SelectedFile, UploadState};
use imgtext_core::ports::clipboard::Clipboard;
use imgtext_core::ports::ocr_provider::OcrProvider;
use imgtext_vision::{thumbnail, validation};
use tracing::{debug, info, warn};

use crate::messages::{MessageCenter, MessageId, Severity};

/// 요청 식별 토큰 (단조 증가)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// 컨트롤러 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 선택된 파일 없음
    Idle,
    /// 검증 실패: 전송 불가, 파일 재선택 필요
    Rejected,
    /// 전송 가능
    Ready,
    /// 요청 진행 중
    Sending(RequestToken),
    /// 성공 결과 표시 중 (재전송 가능)
    Succeeded,
    /// 실패 결과 표시 중 (재전송 가능)
    Failed,
}

/// 진행 중인 요청: `begin_send`가 발급, `complete_send`로 반환
#[derive(Debug, Clone)]
pub struct PendingRequest {
    /// 요청 토큰
    pub token: RequestToken,
    /// 전송할 파일
    pub file: SelectedFile,
}

/// 업로드 세션 컨트롤러
pub struct UploadController {
    config: AppConfig,
    provider: Option<Arc<dyn OcrProvider>>,
    clipboard: Option<Arc<dyn Clipboard>>,
    messages: MessageCenter,
    phase: Phase,
    upload: UploadState,
    result: ResultState,
    thumbnail: Option<Thumbnail>,
    copy_text_icon: CopyIconState,
    copy_json_icon: CopyIconState,
    next_token: u64,
}

impl UploadController {
    /// 새 컨트롤러 생성
    pub fn new(
        config: AppConfig,
        provider: Arc<dyn OcrProvider>,
        clipboard: Option<Arc<dyn Clipboard>>,
    ) -> Self {
        let mut controller = Self::without_provider(config, clipboard);
        controller.provider = Some(provider);
        controller
    }

    /// OCR 제공자 없이 생성 (선택/검증만 가능, 전송 전에 `set_provider` 필요)
    pub fn without_provider(config: AppConfig, clipboard: Option<Arc<dyn Clipboard>>) -> Self {
        let messages = MessageCenter::new(config.ui.toast_duration());
        Self {
            config,
            provider: None,
            clipboard,
            messages,
            phase: Phase::Idle,
            upload: UploadState::default(),
            result: ResultState::default(),
            thumbnail: None,
            copy_text_icon: CopyIconState::Default,
            copy_json_icon: CopyIconState::Default,
            next_token: 0,
        }
    }

    // ── 상태 조회 ──

    /// 현재 단계
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 업로드 상태
    pub fn upload_state(&self) -> &UploadState {
        &self.upload
    }

    /// 결과 상태
    pub fn result_state(&self) -> &ResultState {
        &self.result
    }

    /// 썸네일 (표시 중일 때만)
    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }

    /// 토스트 메시지 센터
    pub fn messages(&self) -> &MessageCenter {
        &self.messages
    }

    /// 업로드 제약 설정
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// OCR 제공자 (외부 실행기에서 요청을 돌릴 때)
    pub fn provider(&self) -> Option<Arc<dyn OcrProvider>> {
        self.provider.clone()
    }

    /// OCR 제공자 지정 (기존 제공자 교체)
    pub fn set_provider(&mut self, provider: Arc<dyn OcrProvider>) {
        debug!(provider = provider.provider_name(), "OCR 제공자 설정");
        self.provider = Some(provider);
    }

    /// 전송 가능 여부
    pub fn can_send(&self) -> bool {
        matches!(
            self.phase,
            Phase::Ready | Phase::Succeeded | Phase::Failed
        ) && self.upload.can_send()
    }

    /// 상태로부터 파생된 UI 플래그
    pub fn ui_flags(&self) -> UiFlags {
        UiFlags {
            show_thumbnail: self.thumbnail.is_some(),
            show_result: self.result.visible,
            loading: matches!(self.phase, Phase::Sending(_)),
            send_disabled: !self.can_send(),
            copy_text_icon: self.copy_text_icon,
            copy_json_icon: self.copy_json_icon,
        }
    }

    // ── 파일 선택 ──

    /// 파일 선택 처리
    ///
    /// 이전 상태를 모두 지운 뒤 형식/크기를 검증한다.
    /// 둘 다 통과하면 썸네일을 만들고 `Ready`, 아니면 `Rejected`.
    pub fn on_file_selected(&mut self, file: Option<SelectedFile>) {
        self.all_clear_data();

        let Some(file) = file else {
            return;
        };

        self.upload.file_name = file.name.clone();
        let errors = validation::validate_upload(&self.config.upload, &file);
        self.upload.validation_errors = errors;

        if errors.any() {
            info!(file = %file.name, ?errors, "파일 검증 실패");
            self.upload.selected_file = Some(file);
            self.phase = Phase::Rejected;
            return;
        }

        self.show_thumb(&file);
        self.upload.selected_file = Some(file);
        self.phase = Phase::Ready;
    }

    /// 썸네일 생성: 디코딩 실패 시 표시만 생략한다
    fn show_thumb(&mut self, file: &SelectedFile) {
        let ui = &self.config.ui;
        match thumbnail::render_thumbnail(file, ui.thumbnail_width, ui.thumbnail_height) {
            Ok(thumb) => self.thumbnail = Some(thumb),
            Err(e) => warn!(file = %file.name, "썸네일 생성 실패: {e}"),
        }
    }

    // ── 전송 ──

    /// 선택된 파일을 OCR API로 전송하고 결과를 반영
    ///
    /// 전송할 수 없는 상태면 아무것도 하지 않고 `false`.
    pub async fn send_img(&mut self) -> bool {
        let Some(pending) = self.begin_send() else {
            return false;
        };
        let Some(provider) = self.provider() else {
            return false;
        };
        let outcome = provider.recognize(&pending.file).await;
        self.complete_send(pending.token, outcome)
    }

    /// 전송 시작: 이전 결과 숨김, 로딩 표시, 토큰 발급
    ///
    /// OCR 제공자가 없으면 상태를 바꾸지 않고 None.
    pub fn begin_send(&mut self) -> Option<PendingRequest> {
        if !self.can_send() {
            debug!(phase = ?self.phase, "전송 불가 상태, 무시");
            return None;
        }
        let Some(provider_name) = self.provider.as_ref().map(|p| p.provider_name().to_string())
        else {
            warn!("OCR 제공자 미설정, 전송 생략");
            return None;
        };
        let file = self.upload.selected_file.clone()?;

        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.result.visible = false;
        self.phase = Phase::Sending(token);

        info!(
            file = %file.name,
            provider = %provider_name,
            token = token.0,
            "OCR 요청 시작"
        );
        Some(PendingRequest { token, file })
    }

    /// 전송 완료: 현재 진행 중인 토큰일 때만 결과를 반영한다
    ///
    /// 반영했으면 `true`, 오래된 응답이라 버렸으면 `false`.
    pub fn complete_send(
        &mut self,
        token: RequestToken,
        outcome: Result<serde_json::Value, CoreError>,
    ) -> bool {
        if self.phase != Phase::Sending(token) {
            warn!(token = token.0, phase = ?self.phase, "오래된 OCR 응답 무시");
            return false;
        }

        match outcome {
            Ok(response) => {
                self.result = ResultState::from_response(&response);
                self.phase = Phase::Succeeded;
                info!(chars = self.result.plain_text.chars().count(), "OCR 성공");
            }
            Err(e) => {
                // 실패 토스트는 표시하지 않는다. 결과 JSON 영역이 에러를 보여준다.
                warn!("OCR 실패: {e}");
                self.result = ResultState::from_error_payload(&e.payload());
                self.phase = Phase::Failed;
            }
        }

        self.copy_text_icon = CopyIconState::Default;
        self.copy_json_icon = CopyIconState::Default;
        true
    }

    // ── 복사 ──

    /// 결과를 클립보드로 복사
    ///
    /// 대상이 비었거나 알 수 없으면 `false` (클립보드 쓰기 없음).
    /// 쓰기 실패는 로그만 남기고 무시하며 아이콘은 `Done`으로 바뀐다.
    pub fn copy_text(&mut self, id: &str) -> bool {
        let Ok(target) = id.parse::<CopyTarget>() else {
            debug!(id, "알 수 없는 복사 대상");
            return false;
        };

        let text = match target {
            CopyTarget::ResultText => &self.result.plain_text,
            CopyTarget::ResultJson => &self.result.raw_json,
        };
        if let Some(clipboard) = &self.clipboard {
            if let Err(e) = clipboard.write_text(text) {
                warn!(%target, "클립보드 복사 실패: {e}");
            }
        }

        match target {
            CopyTarget::ResultText => self.copy_text_icon = CopyIconState::Done,
            CopyTarget::ResultJson => self.copy_json_icon = CopyIconState::Done,
        }
        true
    }

    // ── 토스트 ──

    /// 토스트 메시지 표시 (tokio 런타임 안에서 호출)
    pub fn show_messages(&self, text: impl Into<String>, severity: Severity) -> MessageId {
        self.messages.show_messages(text, severity)
    }

    // ── 초기화 ──

    /// 전체 초기화: 결과, 파일, 아이콘, 검증 플래그, 썸네일, 진행 중 요청
    pub fn all_clear_data(&mut self) {
        if let Phase::Sending(token) = self.phase {
            debug!(token = token.0, "진행 중 요청 무효화");
        }
        self.result = ResultState::default();
        self.upload = UploadState::default();
        self.copy_text_icon = CopyIconState::Default;
        self.copy_json_icon = CopyIconState::Default;
        self.thumbnail = None;
        self.phase = Phase::Idle;
    }
}
