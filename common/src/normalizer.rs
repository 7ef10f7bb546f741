//! 識別結果の正規化
//!
//! 外部APIの応答は型を信用できないため、フィールドごとに検査して
//! IdentificationResult の固定形状に写す。
//!
//! - 文字列: 空でない文字列はそのまま、数値/真偽値は文字列化、それ以外はプレースホルダ
//! - 配列: 配列以外は空。要素は文字列/数値/真偽値のみ残す
//! - 信頼度: JSON数値のみ採用（四捨五入して0-100に丸める）、それ以外は0

use crate::types::{
    IdentificationResult, LOCAL_NAME_NOT_AVAILABLE, NO_DESCRIPTION, NO_TRADITIONAL_USE,
    UNKNOWN_COMMON_NAME, UNKNOWN_SCIENTIFIC_NAME,
};
use serde_json::{Map, Value};

type JsonMap = Map<String, Value>;

/// パース済みオブジェクトを正規化
pub fn normalize_identification(map: &JsonMap) -> IdentificationResult {
    IdentificationResult {
        common_name: string_or(map, &["commonName"], UNKNOWN_COMMON_NAME),
        scientific_name: string_or(map, &["scientificName"], UNKNOWN_SCIENTIFIC_NAME),
        local_name: string_or(map, &["localName", "tamilName"], LOCAL_NAME_NOT_AVAILABLE),
        description: string_or(map, &["description"], NO_DESCRIPTION),
        medicinal_uses: string_list(map, "medicinalUses"),
        parts_used: string_list(map, "partsUsed"),
        preparation_methods: string_list(map, "preparationMethods"),
        active_compounds: string_list(map, "activeCompounds"),
        safety_notes: string_list(map, "safetyNotes"),
        traditional_use: string_or(map, &["traditionalUse"], NO_TRADITIONAL_USE),
        confidence: confidence(map.get("confidence")),
    }
}

/// 候補キーを順に見て、最初に得られた文字列を返す
fn string_or(map: &JsonMap, keys: &[&str], placeholder: &str) -> String {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find_map(scalar_to_string)
        .unwrap_or_else(|| placeholder.to_string())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_list(map: &JsonMap, key: &str) -> Vec<String> {
    match map.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        _ => Vec::new(),
    }
}

fn confidence(value: Option<&Value>) -> u8 {
    match value.and_then(Value::as_f64) {
        Some(n) if n.is_finite() => n.round().clamp(0.0, 100.0) as u8,
        _ => 0,
    }
}
