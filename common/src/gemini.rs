//! Gemini API リクエスト/レスポンス変換
//!
//! HTTP送信は行わない。CLI側（reqwest）と共有する純粋な変換のみ。
//! - build_request: プロンプト + インライン画像 → リクエストボディ
//! - extract_completion_text: 成功レスポンスから補完テキストを取り出す
//! - extract_error_message: 失敗レスポンスからエラーメッセージを取り出す

use crate::error::{IdentifyError, Result};
use base64::Engine;
use serde::Serialize;

/// MIMEタイプ未申告時の既定値
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// 既定モデル
pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

/// 既定APIベースURL
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// セーフティ設定の対象カテゴリ
pub const HARM_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// 生成パラメータ（低ランダム性・出力長上限あり）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            top_k: 32,
            top_p: 1.0,
            max_output_tokens: 4096,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

/// 全カテゴリ BLOCK_NONE（植物写真が誤ってブロックされないように）
pub fn permissive_safety_settings() -> Vec<SafetySetting> {
    HARM_CATEGORIES
        .iter()
        .map(|category| SafetySetting {
            category: category.to_string(),
            threshold: "BLOCK_NONE".to_string(),
        })
        .collect()
}

/// 申告MIMEタイプ（空なら既定値）
pub fn effective_mime_type(declared: &str) -> &str {
    match declared.trim() {
        "" => DEFAULT_MIME_TYPE,
        mime => mime,
    }
}

/// バイト列をBase64（標準アルファベット）に変換
pub fn encode_image(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// プレビュー用Data URLを生成
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        effective_mime_type(mime_type),
        encode_image(bytes)
    )
}

/// 識別リクエストを構築
///
/// # Arguments
/// * `prompt` - 指示プロンプト
/// * `mime_type` - 画像のMIMEタイプ（空なら既定値）
/// * `image_base64` - Base64エンコード済み画像
pub fn build_request(prompt: &str, mime_type: &str, image_base64: String) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: prompt.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: effective_mime_type(mime_type).to_string(),
                        data: image_base64,
                    },
                },
            ],
        }],
        generation_config: GenerationConfig::default(),
        safety_settings: permissive_safety_settings(),
    }
}

/// generateContent のURL（APIキーはクエリで別途付与）
pub fn endpoint_url(api_base: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        api_base.trim_end_matches('/'),
        model
    )
}

/// 成功レスポンスから `candidates[0].content.parts[0].text` を取り出す
///
/// どの階層が欠けていても、空文字でも、エンベロープ自体が読めなくても
/// `EmptyResponse` とする。
pub fn extract_completion_text(body: &str) -> Result<String> {
    let json: serde_json::Value =
        serde_json::from_str(body).map_err(|_| IdentifyError::EmptyResponse)?;

    json.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .ok_or(IdentifyError::EmptyResponse)
}

/// 失敗レスポンスからエラーメッセージを取り出す
///
/// `error.message` が無ければステータスコードを含む汎用メッセージ。
pub fn extract_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .map(|m| m.to_string())
        })
        .unwrap_or_else(|| format!("API request failed with status {}", status))
}
