//! エラー型定義
//!
//! 識別処理の失敗はすべて [`IdentifyError`] に集約し、
//! 呼び出し側（状態コントローラ）は成功/失敗の二択だけを扱う。

use crate::validation::ValidationError;
use thiserror::Error;

/// パース失敗時にユーザーへ表示するメッセージ
pub const PARSE_FAILURE_MESSAGE: &str =
    "Failed to parse AI response. Please try again with a clearer image.";

/// 空レスポンス時にユーザーへ表示するメッセージ
pub const EMPTY_RESPONSE_MESSAGE: &str =
    "No response received from the AI model. Please try again.";

/// 識別処理のエラー分類
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifyError {
    /// APIキー未設定（再試行しても解決しない）
    #[error("Gemini API key is not configured. Please set GEMINI_API_KEY or run `plant-id config --set-api-key YOUR_KEY`.")]
    Configuration,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to read the image file: {0}")]
    Encoding(String),

    /// 上流APIの非2xx応答。メッセージはそのまま表示する
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{}", EMPTY_RESPONSE_MESSAGE)]
    EmptyResponse,

    /// 補完テキストがJSONとして読めない。`detail` はログ用
    #[error("{}", PARSE_FAILURE_MESSAGE)]
    Parse { detail: String },

    /// 接続失敗・タイムアウト
    #[error("{0}")]
    Transport(String),
}

impl IdentifyError {
    /// エラー区分名（バナー見出し用）
    pub fn category(&self) -> &'static str {
        match self {
            IdentifyError::Configuration => "Configuration error",
            IdentifyError::Validation(_) => "Invalid file",
            IdentifyError::Encoding(_) => "Unreadable file",
            IdentifyError::Upstream { .. } => "Analysis failed",
            IdentifyError::EmptyResponse => "Empty response",
            IdentifyError::Parse { .. } => "Unreadable response",
            IdentifyError::Transport(_) => "Network error",
        }
    }

    /// ユーザーが取るべき対処
    pub fn remedy(&self) -> &'static str {
        match self {
            IdentifyError::Configuration => "Set the API key and run again.",
            IdentifyError::Validation(_) | IdentifyError::Encoding(_) => {
                "Choose a different image."
            }
            IdentifyError::Parse { .. } => "Retry with a clearer image.",
            IdentifyError::Upstream { .. }
            | IdentifyError::EmptyResponse
            | IdentifyError::Transport(_) => "Retry in a moment.",
        }
    }

    /// 同じ画像での再試行に意味があるか
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            IdentifyError::Configuration
                | IdentifyError::Validation(_)
                | IdentifyError::Encoding(_)
        )
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, IdentifyError>;
