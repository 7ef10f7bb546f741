//! 植物識別
//!
//! 状態コントローラはこのトレイト越しに識別処理を呼ぶ。

mod gemini;

pub use gemini::GeminiClient;

use crate::upload::UploadedFile;
use async_trait::async_trait;
use plant_id_common::{IdentificationResult, Result};

#[async_trait]
pub trait PlantIdentifier: Send + Sync {
    /// 1回の識別試行。再試行はしない
    async fn identify(&self, file: &UploadedFile) -> Result<IdentificationResult>;
}
