//! UI 표시 플래그와 복사 대상.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 복사 버튼 아이콘 상태
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyIconState {
    /// 복사 전 (`file_copy`)
    #[default]
    Default,
    /// 복사 완료 (`done`)
    Done,
}

impl CopyIconState {
    /// Material 아이콘 이름
    pub fn icon_name(&self) -> &'static str {
        match self {
            CopyIconState::Default => "file_copy",
            CopyIconState::Done => "done",
        }
    }
}

/// 복사 대상 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyTarget {
    /// 인식된 평문 텍스트 (`"result-text"`)
    ResultText,
    /// 응답 JSON (`"result-json"`)
    ResultJson,
}

impl CopyTarget {
    /// 뷰 요소 식별자
    pub fn id(&self) -> &'static str {
        match self {
            CopyTarget::ResultText => "result-text",
            CopyTarget::ResultJson => "result-json",
        }
    }
}

impl fmt::Display for CopyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CopyTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "result-text" => Ok(CopyTarget::ResultText),
            "result-json" => Ok(CopyTarget::ResultJson),
            other => Err(format!("알 수 없는 복사 대상: {other}")),
        }
    }
}

/// 컨트롤러 상태에서 파생되는 UI 플래그 (독립 저장 없음)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiFlags {
    /// 썸네일 표시
    pub show_thumbnail: bool,
    /// 결과 영역 표시
    pub show_result: bool,
    /// 로딩 인디케이터
    pub loading: bool,
    /// 전송 버튼 비활성화
    pub send_disabled: bool,
    /// 텍스트 복사 아이콘
    pub copy_text_icon: CopyIconState,
    /// JSON 복사 아이콘
    pub copy_json_icon: CopyIconState,
}

/// 썸네일 (브라우저 object URL 대응: data URL)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// `data:image/png;base64,...`
    pub data_url: String,
    /// 표시 너비
    pub width: u32,
    /// 표시 높이
    pub height: u32,
}
