use plant_id_common::{IdentifyError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantIdError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("操作エラー: {0}")]
    InvalidOperation(String),

    #[error(transparent)]
    Identify(#[from] IdentifyError),
}

impl From<ValidationError> for PlantIdError {
    fn from(err: ValidationError) -> Self {
        PlantIdError::Identify(IdentifyError::Validation(err))
    }
}

pub type Result<T> = std::result::Result<T, PlantIdError>;
