//! アップロード画像
//!
//! 申告MIMEタイプとサイズは読み込み前に確定させ、検証はそれだけで行う。
//! 本体の読み込みは解析開始時に一度だけ待つ（`load`）。

use crate::error::{PlantIdError, Result};
use plant_id_common::{to_data_url, validate_image, IdentifyError, ValidationError};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum FileSource {
    Memory(Vec<u8>),
    Disk(PathBuf),
}

/// 1回の識別試行で扱う画像
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    /// 申告MIMEタイプ（不明なら空文字）
    pub mime_type: String,
    pub size: u64,
    source: FileSource,
}

impl UploadedFile {
    pub fn from_bytes(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    /// ディスク上の画像を登録（メタデータのみ参照）
    ///
    /// MIMEタイプは `mime_override` → 拡張子の順で決める。
    pub fn from_path(path: &Path, mime_override: Option<&str>) -> Result<Self> {
        if !path.is_file() {
            return Err(PlantIdError::FileNotFound(path.display().to_string()));
        }

        let size = std::fs::metadata(path)?.len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = mime_override
            .map(|m| m.to_string())
            .unwrap_or_else(|| declared_mime_type(path));

        Ok(Self {
            file_name,
            mime_type,
            size,
            source: FileSource::Disk(path.to_path_buf()),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Disk(path) => Some(path),
            FileSource::Memory(_) => None,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate_image(&self.mime_type, self.size)
    }

    /// 本体を読み込む（失敗は `Encoding`）
    pub async fn read(&self) -> std::result::Result<Cow<'_, [u8]>, IdentifyError> {
        match &self.source {
            FileSource::Memory(bytes) => Ok(Cow::Borrowed(bytes)),
            FileSource::Disk(path) => tokio::fs::read(path)
                .await
                .map(Cow::Owned)
                .map_err(|e| IdentifyError::Encoding(format!("{}: {}", path.display(), e))),
        }
    }

    /// 本体をメモリに読み込んだ画像を返す（ディスクからの読み込みはこの1回）
    pub async fn load(&self) -> std::result::Result<UploadedFile, IdentifyError> {
        if let FileSource::Memory(_) = &self.source {
            return Ok(self.clone());
        }
        let bytes = self.read().await?.into_owned();
        Ok(Self {
            file_name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        })
    }

    /// プレビュー用Data URL（メモリ上にある場合のみ）
    pub fn preview_data_url(&self) -> Option<String> {
        match &self.source {
            FileSource::Memory(bytes) => Some(to_data_url(&self.mime_type, bytes)),
            FileSource::Disk(_) => None,
        }
    }
}

/// 拡張子から申告MIMEタイプを決める（不明なら空文字）
pub fn declared_mime_type(path: &Path) -> String {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_default()
}
