//! 補完テキストパーサー
//!
//! Geminiの補完テキストからMarkdownのコードフェンスを除去し、
//! JSONとして読み込んで IdentificationResult に正規化する

use crate::error::{IdentifyError, Result};
use crate::normalizer::normalize_identification;
use crate::types::IdentificationResult;

/// コードフェンスを除去
///
/// 先頭の ```（言語タグ有無を問わない）と末尾の ``` を取り除き、前後の空白を削る。
/// フェンスが無ければ trim のみ。
///
/// # Examples
/// ```
/// use plant_id_common::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_code_fence("{\"a\": 1}"), "{\"a\": 1}");
/// ```
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        body = skip_language_tag(rest);
    }

    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }

    body.trim()
}

/// フェンス直後の言語タグ（json, JSON, jsonc 等）を読み飛ばす
fn skip_language_tag(rest: &str) -> &str {
    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    let (tag, after) = rest.split_at(tag_len);

    if tag.is_empty() {
        return rest;
    }
    // "```json{...}" のように改行なしで続く場合もタグとみなす
    if tag.eq_ignore_ascii_case("json") || after.is_empty() || after.starts_with(char::is_whitespace) {
        return after;
    }
    rest
}

/// 補完テキストをJSON値として読み込む
pub fn parse_completion_json(text: &str) -> Result<serde_json::Value> {
    let json_str = strip_code_fence(text);
    serde_json::from_str(json_str).map_err(|e| IdentifyError::Parse {
        detail: e.to_string(),
    })
}

/// 補完テキストをパースして正規化
///
/// # Returns
/// * `Ok(IdentificationResult)` - 正規化済み結果
/// * `Err(IdentifyError::Parse)` - JSONでない、またはオブジェクトが無い
pub fn parse_identification_response(text: &str) -> Result<IdentificationResult> {
    let value = parse_completion_json(text)?;

    // 配列で返された場合は先頭要素を使う
    let object = match value {
        serde_json::Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    };

    match object {
        Some(serde_json::Value::Object(map)) => Ok(normalize_identification(&map)),
        _ => Err(IdentifyError::Parse {
            detail: "JSON object not found".to_string(),
        }),
    }
}
