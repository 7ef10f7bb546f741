//! 識別結果の型定義
//!
//! CLIと将来のフロントエンドで共有される型:
//! - IdentificationResult: 正規化済みの識別結果
//! - ConfidenceTier: 信頼度バッジの段階

use serde::{Deserialize, Serialize};

/// 一般名のプレースホルダ
pub const UNKNOWN_COMMON_NAME: &str = "Unknown Plant";
/// 学名のプレースホルダ
pub const UNKNOWN_SCIENTIFIC_NAME: &str = "Unknown";
/// 地域名のプレースホルダ
pub const LOCAL_NAME_NOT_AVAILABLE: &str = "Not available";
/// 説明のプレースホルダ
pub const NO_DESCRIPTION: &str = "No description available.";
/// 伝統的用途のプレースホルダ
pub const NO_TRADITIONAL_USE: &str = "No traditional use information available.";

/// 植物識別結果
///
/// 配列は欠落時に空、文字列は欠落時にプレースホルダとなる。
/// `normalize` 経由で生成されたものは null を含まない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationResult {
    pub common_name: String,
    pub scientific_name: String,
    /// 地域名（プロンプトで指定した言語）
    #[serde(alias = "tamilName")]
    pub local_name: String,
    pub description: String,
    pub medicinal_uses: Vec<String>,
    pub parts_used: Vec<String>,
    pub preparation_methods: Vec<String>,
    pub active_compounds: Vec<String>,
    pub safety_notes: Vec<String>,
    pub traditional_use: String,
    /// 0-100
    pub confidence: u8,
}

impl Default for IdentificationResult {
    fn default() -> Self {
        Self {
            common_name: UNKNOWN_COMMON_NAME.to_string(),
            scientific_name: UNKNOWN_SCIENTIFIC_NAME.to_string(),
            local_name: LOCAL_NAME_NOT_AVAILABLE.to_string(),
            description: NO_DESCRIPTION.to_string(),
            medicinal_uses: Vec::new(),
            parts_used: Vec::new(),
            preparation_methods: Vec::new(),
            active_compounds: Vec::new(),
            safety_notes: Vec::new(),
            traditional_use: NO_TRADITIONAL_USE.to_string(),
            confidence: 0,
        }
    }
}

impl IdentificationResult {
    pub fn confidence_tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_confidence(self.confidence)
    }

    /// 地域名が実際に得られたか（"Not available" / "N/A" は表示しない）
    pub fn has_local_name(&self) -> bool {
        is_meaningful(&self.local_name) && self.local_name != LOCAL_NAME_NOT_AVAILABLE
    }

    pub fn has_traditional_use(&self) -> bool {
        is_meaningful(&self.traditional_use)
    }
}

fn is_meaningful(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != "N/A"
}

/// 信頼度バッジの段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    /// 80以上
    High,
    /// 50-79
    Medium,
    /// 50未満
    Low,
}

impl ConfidenceTier {
    pub fn from_confidence(confidence: u8) -> Self {
        if confidence >= 80 {
            ConfidenceTier::High
        } else if confidence >= 50 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// バッジ文言（例: "92% confidence"）
pub fn confidence_label(confidence: u8) -> String {
    format!("{}% confidence", confidence)
}
