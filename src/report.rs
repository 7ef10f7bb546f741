//! 識別レポート（--output 指定時のみ保存）

use crate::error::Result;
use chrono::{DateTime, Local};
use plant_id_common::IdentificationResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationReport {
    pub file_name: String,
    pub identified_at: DateTime<Local>,
    pub model: String,
    pub result: IdentificationResult,
}

impl IdentificationReport {
    pub fn new(file_name: &str, model: &str, result: IdentificationResult) -> Self {
        Self {
            file_name: file_name.to_string(),
            identified_at: Local::now(),
            model: model.to_string(),
            result,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
