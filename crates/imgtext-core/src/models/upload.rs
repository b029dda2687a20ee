//! 업로드 파일 및 검증 상태.

use serde::{Deserialize, Serialize};

/// 사용자가 선택한 파일 (브라우저 `File`에 대응)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// 파일 이름 (multipart filename으로 전송)
    pub name: String,
    /// MIME 타입 (예: "image/png"). None 또는 빈 문자열이면 형식 검증 생략
    pub mime: Option<String>,
    /// 파일 크기 (바이트). 0이면 크기 검증 생략
    pub size: u64,
    /// 파일 내용
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// 바이트로부터 생성 (크기는 바이트 길이)
    pub fn new(name: impl Into<String>, mime: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime,
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// MIME 서브타입 ("image/png" → "png")
    ///
    /// MIME이 없거나 비어 있으면 None, 슬래시가 없으면 `Some(None)`.
    pub fn mime_subtype(&self) -> Option<Option<&str>> {
        let mime = self.mime.as_deref().filter(|m| !m.is_empty())?;
        Some(mime.split('/').nth(1))
    }
}

/// 로컬 검증 결과 플래그
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// 허용되지 않은 형식
    pub type_invalid: bool,
    /// 최대 크기 초과
    pub size_exceeded: bool,
}

impl ValidationErrors {
    /// 검증 에러가 하나라도 있는지
    pub fn any(&self) -> bool {
        self.type_invalid || self.size_exceeded
    }
}

/// 업로드 상태 스냅샷
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadState {
    /// 선택된 파일
    pub selected_file: Option<SelectedFile>,
    /// 표시용 파일 이름
    pub file_name: String,
    /// 검증 플래그
    pub validation_errors: ValidationErrors,
}

impl UploadState {
    /// 전송 가능 여부: 파일이 있고 검증 에러가 없어야 한다
    pub fn can_send(&self) -> bool {
        self.selected_file.is_some() && !self.validation_errors.any()
    }
}
