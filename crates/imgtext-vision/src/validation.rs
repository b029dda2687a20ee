//! 업로드 파일 검증.
//!
//! 브라우저 `File.type` / `File.size`와 같은 의미로 동작한다.
//! 값이 없으면(빈 MIME, 크기 0) 해당 검증은 통과로 취급한다.

use imgtext_core::config::UploadConfig;
use imgtext_core::error::CoreError;
use imgtext_core::models::upload::{SelectedFile, ValidationErrors};
use std::fs;
use std::path::Path;
use tracing::debug;

/// MIME 서브타입 허용 목록 검증
///
/// "image/png" → "png"가 `allowed_subtypes`에 없으면 `InvalidFileType`.
pub fn validate_type<S: AsRef<str>>(
    allowed_subtypes: &[S],
    file: &SelectedFile,
) -> Result<(), CoreError> {
    let Some(subtype) = file.mime_subtype() else {
        return Ok(());
    };

    let allowed = subtype
        .map(|s| allowed_subtypes.iter().any(|a| a.as_ref() == s))
        .unwrap_or(false);

    if allowed {
        Ok(())
    } else {
        Err(CoreError::InvalidFileType {
            mime: file.mime.clone().unwrap_or_default(),
        })
    }
}

/// 최대 크기 검증 (`size > max_bytes`이면 `SizeExceeded`)
pub fn validate_size(max_bytes: u64, file: &SelectedFile) -> Result<(), CoreError> {
    if file.size == 0 || file.size <= max_bytes {
        return Ok(());
    }
    Err(CoreError::SizeExceeded {
        size: file.size,
        max: max_bytes,
    })
}

/// 설정된 제약으로 두 검증을 모두 실행하고 플래그로 반환
pub fn validate_upload(config: &UploadConfig, file: &SelectedFile) -> ValidationErrors {
    let errors = ValidationErrors {
        type_invalid: validate_type(&config.allowed_subtypes, file).is_err(),
        size_exceeded: validate_size(config.max_bytes, file).is_err(),
    };
    debug!(
        file = %file.name,
        mime = ?file.mime,
        size = file.size,
        ?errors,
        "업로드 파일 검증"
    );
    errors
}

/// 확장자로 MIME 타입 추정 (알 수 없으면 None)
pub fn detect_mime(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
}

/// 디스크의 파일을 `SelectedFile`로 로드
///
/// `max_bytes`를 넘는 파일은 내용을 읽지 않고 크기만 채운다 (`bytes`는 비어 있음).
/// 검증 단계에서 `SizeExceeded`로 거부된다. `max_bytes == 0`이면 제한 없음.
pub fn load_file(path: &Path, max_bytes: u64) -> Result<SelectedFile, CoreError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime = detect_mime(path);

    let size = fs::metadata(path)?.len();
    if max_bytes > 0 && size > max_bytes {
        debug!(file = %name, size, max_bytes, "최대 크기 초과, 내용 읽기 생략");
        return Ok(SelectedFile {
            name,
            mime,
            size,
            bytes: Vec::new(),
        });
    }

    let bytes = fs::read(path)?;
    Ok(SelectedFile::new(name, mime, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const ALLOWED: [&str; 2] = ["jpeg", "png"];
    const MAX: u64 = 2 * 1024 * 1024;

    fn with_mime(mime: &str) -> SelectedFile {
        SelectedFile::new("f", Some(mime.to_string()), vec![0; 4])
    }

    fn with_size(size: u64) -> SelectedFile {
        SelectedFile {
            name: "f.png".to_string(),
            mime: Some("image/png".to_string()),
            size,
            bytes: Vec::new(),
        }
    }

    #[test]
    fn allowed_subtypes_pass() {
        assert!(validate_type(&ALLOWED, &with_mime("image/jpeg")).is_ok());
        assert!(validate_type(&ALLOWED, &with_mime("image/png")).is_ok());
    }

    #[test]
    fn other_subtypes_fail() {
        for mime in ["image/gif", "image/webp", "application/pdf", "image/jpg", "png"] {
            assert_matches!(
                validate_type(&ALLOWED, &with_mime(mime)),
                Err(CoreError::InvalidFileType { mime: m }) if m == mime
            );
        }
    }

    #[test]
    fn absent_mime_is_noop() {
        let file = SelectedFile::new("f", None, vec![1]);
        assert!(validate_type(&ALLOWED, &file).is_ok());
        assert!(validate_type(&ALLOWED, &with_mime("")).is_ok());
    }

    #[test]
    fn size_boundary() {
        assert!(validate_size(MAX, &with_size(MAX)).is_ok());
        assert!(validate_size(MAX, &with_size(1)).is_ok());
        assert_matches!(
            validate_size(MAX, &with_size(MAX + 1)),
            Err(CoreError::SizeExceeded { size, max }) if size == MAX + 1 && max == MAX
        );
    }

    #[test]
    fn zero_size_is_noop() {
        assert!(validate_size(0, &with_size(0)).is_ok());
    }

    #[test]
    fn validate_upload_sets_both_flags() {
        let config = UploadConfig::default();
        let file = SelectedFile {
            name: "big.gif".to_string(),
            mime: Some("image/gif".to_string()),
            size: MAX + 10,
            bytes: Vec::new(),
        };
        let errors = validate_upload(&config, &file);
        assert!(errors.type_invalid);
        assert!(errors.size_exceeded);
        assert!(errors.any());
    }

    #[test]
    fn detect_mime_from_extension() {
        assert_eq!(detect_mime(Path::new("a.png")).as_deref(), Some("image/png"));
        assert_eq!(detect_mime(Path::new("a.JPG")).as_deref(), Some("image/jpeg"));
        assert_eq!(detect_mime(Path::new("noext")), None);
    }

    #[test]
    fn load_file_reads_bytes_and_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.jpeg");
        fs::write(&path, b"abcde").unwrap();

        let file = load_file(&path, MAX).unwrap();
        assert_eq!(file.name, "scan.jpeg");
        assert_eq!(file.mime.as_deref(), Some("image/jpeg"));
        assert_eq!(file.size, 5);
        assert_eq!(file.bytes, b"abcde");
    }

    #[test]
    fn oversized_file_is_not_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        // 희소 파일
        let handle = fs::File::create(&path).unwrap();
        handle.set_len(MAX * 4).unwrap();

        let file = load_file(&path, MAX).unwrap();
        assert_eq!(file.size, MAX * 4);
        assert!(file.bytes.is_empty());
        assert_eq!(file.mime.as_deref(), Some("image/png"));

        let errors = validate_upload(&UploadConfig::default(), &file);
        assert!(errors.size_exceeded);
        assert!(!errors.type_invalid);
    }

    #[test]
    fn file_at_limit_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exact.png");
        fs::write(&path, vec![7u8; 16]).unwrap();

        let file = load_file(&path, 16).unwrap();
        assert_eq!(file.bytes.len(), 16);
        // 제한 없음
        assert_eq!(load_file(&path, 0).unwrap().size, 16);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = load_file(Path::new("/definitely/not/here.png"), MAX);
        assert_matches!(result, Err(CoreError::Io(_)));
    }
}
