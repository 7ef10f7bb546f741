//! アップロード画像の検証
//!
//! ネットワーク処理の前に、申告MIMEタイプとサイズだけで判定する。
//! I/Oは行わない。

use thiserror::Error;

/// 最大ファイルサイズ（MB）
pub const MAX_FILE_SIZE_MB: u64 = 10;

/// 最大ファイルサイズ（バイト）
pub const MAX_FILE_SIZE_BYTES: u64 = MAX_FILE_SIZE_MB * 1024 * 1024;

/// 受け付けるMIMEタイプ
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/jpg"];

/// 検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid file type. Please upload a JPG, PNG, or WebP image.")]
    UnsupportedType { mime_type: String },

    #[error("File size exceeds {}MB limit. Please upload a smaller image.", MAX_FILE_SIZE_MB)]
    TooLarge { size: u64 },
}

/// MIMEタイプが許可リストに含まれるか
pub fn is_allowed_mime_type(mime_type: &str) -> bool {
    let normalized = mime_type.trim().to_ascii_lowercase();
    ALLOWED_MIME_TYPES.contains(&normalized.as_str())
}

/// 画像ファイルを検証
///
/// 種類 → サイズの順に判定する。上限ちょうどは許可。
///
/// # Examples
/// ```
/// use plant_id_common::validate_image;
///
/// assert!(validate_image("image/png", 2 * 1024 * 1024).is_ok());
/// assert!(validate_image("image/gif", 1024).is_err());
/// ```
pub fn validate_image(mime_type: &str, size: u64) -> Result<(), ValidationError> {
    if !is_allowed_mime_type(mime_type) {
        return Err(ValidationError::UnsupportedType {
            mime_type: mime_type.to_string(),
        });
    }

    if size > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::TooLarge { size });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_types() {
        for mime in ["image/jpeg", "image/png", "image/webp", "image/jpg"] {
            assert!(validate_image(mime, 1024).is_ok(), "{} should pass", mime);
        }
    }

    #[test]
    fn test_mime_type_case_insensitive() {
        assert!(validate_image("IMAGE/PNG", 1024).is_ok());
        assert!(validate_image(" image/webp ", 1024).is_ok());
    }

    #[test]
    fn test_rejects_unsupported_type() {
        for mime in ["image/gif", "image/heic", "application/pdf", "text/plain", ""] {
            let err = validate_image(mime, 1024).unwrap_err();
            assert!(matches!(err, ValidationError::UnsupportedType { .. }));
            assert!(err.to_string().contains("JPG, PNG, or WebP"));
        }
    }

    #[test]
    fn test_rejects_oversized_file() {
        let size = 15 * 1024 * 1024;
        let err = validate_image("image/png", size).unwrap_err();
        assert_eq!(err, ValidationError::TooLarge { size });
        assert!(err.to_string().contains("10MB"));
    }

    #[test]
    fn test_size_boundary() {
        assert!(validate_image("image/jpeg", MAX_FILE_SIZE_BYTES).is_ok());
        assert!(validate_image("image/jpeg", MAX_FILE_SIZE_BYTES + 1).is_err());
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = validate_image("image/gif", MAX_FILE_SIZE_BYTES * 2).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
    }
}
