//! 端末向け表示
//!
//! コントローラが選んだビューを文字列にする。標準出力への書き込みは main 側。

use crate::controller::View;
use plant_id_common::{confidence_label, ConfidenceTier, IdentificationResult, IdentifyError};
use std::fmt::Write;

const DISCLAIMER: &str = "Disclaimer: This information is for educational purposes only. \
Always consult a qualified healthcare professional before using any plant for medicinal purposes.";

pub fn render_view(view: &View<'_>) -> String {
    match view {
        View::Result { result, .. } => render_result(result),
        View::Uploader {
            file_name,
            loading,
            error,
        } => {
            let mut out = String::new();
            if let Some(error) = error {
                out.push_str(&render_error(error));
            }
            match (file_name, loading) {
                (Some(name), true) => {
                    let _ = writeln!(out, "🔍 Analyzing plant... ({})", name);
                }
                (Some(name), false) => {
                    let _ = writeln!(out, "🖼  {} ready - identify this plant", name);
                }
                (None, _) => {
                    let _ = writeln!(out, "Supports JPG, PNG, WEBP • Max 10MB");
                }
            }
            out
        }
    }
}

/// 信頼度バッジ（例: "🟢 92% confidence"）
pub fn confidence_badge(confidence: u8) -> String {
    let marker = match ConfidenceTier::from_confidence(confidence) {
        ConfidenceTier::High => "🟢",
        ConfidenceTier::Medium => "🟡",
        ConfidenceTier::Low => "🔴",
    };
    format!("{} {}", marker, confidence_label(confidence))
}

/// 識別成功の一行メッセージ
pub fn identified_message(common_name: &str) -> String {
    format!("Plant Identified! Successfully identified: {}", common_name)
}

/// エラーバナー（区分・メッセージ・対処）
pub fn render_error(error: &IdentifyError) -> String {
    format!("❌ {}: {}\n   → {}\n", error.category(), error, error.remedy())
}

pub fn render_result(result: &IdentificationResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "✔ Identified  {}", confidence_badge(result.confidence));
    let _ = writeln!(out);
    let _ = writeln!(out, "🌿 {}", result.common_name);
    let _ = writeln!(out, "   {}", result.scientific_name);
    if result.has_local_name() {
        let _ = writeln!(out, "   Local name: {}", result.local_name);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", result.description);

    if !result.parts_used.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Parts used: {}", result.parts_used.join(", "));
    }

    bullet_section(&mut out, "MEDICINAL USES", &result.medicinal_uses);

    if !result.preparation_methods.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "PREPARATION");
        for (i, method) in result.preparation_methods.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, method);
        }
    }

    if !result.active_compounds.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "ACTIVE COMPOUNDS");
        let _ = writeln!(out, "  {}", result.active_compounds.join(" · "));
    }

    if result.has_traditional_use() {
        let _ = writeln!(out);
        let _ = writeln!(out, "TRADITIONAL USE");
        let _ = writeln!(out, "  {}", result.traditional_use);
    }

    if !result.safety_notes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "⚠ SAFETY & PRECAUTIONS");
        for note in &result.safety_notes {
            let _ = writeln!(out, "  ! {}", note);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", DISCLAIMER);
    out
}

fn bullet_section(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    for item in items {
        let _ = writeln!(out, "  ✓ {}", item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tulsi() -> IdentificationResult {
        IdentificationResult {
            common_name: "Holy Basil".to_string(),
            scientific_name: "Ocimum tenuiflorum".to_string(),
            local_name: "துளசி".to_string(),
            description: "Aromatic shrub.".to_string(),
            medicinal_uses: vec!["Cough".to_string(), "Fever".to_string()],
            parts_used: vec!["Leaves".to_string()],
            preparation_methods: vec!["Tea".to_string(), "Paste".to_string()],
            active_compounds: vec!["Eugenol".to_string()],
            safety_notes: vec!["Avoid in pregnancy".to_string()],
            traditional_use: "Used in Ayurveda.".to_string(),
            confidence: 92,
        }
    }

    #[test]
    fn test_confidence_badge_tiers() {
        assert_eq!(confidence_badge(92), "🟢 92% confidence");
        assert_eq!(confidence_badge(65), "🟡 65% confidence");
        assert_eq!(confidence_badge(10), "🔴 10% confidence");
    }

    #[test]
    fn test_render_full_result() {
        let text = render_result(&tulsi());
        assert!(text.contains("🟢 92% confidence"));
        assert!(text.contains("Holy Basil"));
        assert!(text.contains("Local name: துளசி"));
        assert!(text.contains("  ✓ Cough"));
        assert!(text.contains("  2. Paste"));
        assert!(text.contains("Parts used: Leaves"));
        assert!(text.contains("TRADITIONAL USE"));
        assert!(text.contains("  ! Avoid in pregnancy"));
        assert!(text.contains("Disclaimer"));
    }

    #[test]
    fn test_render_hides_empty_sections() {
        let result = IdentificationResult {
            common_name: "Unable to identify".to_string(),
            local_name: "N/A".to_string(),
            traditional_use: "N/A".to_string(),
            ..Default::default()
        };
        let text = render_result(&result);
        assert!(text.contains("🔴 0% confidence"));
        assert!(!text.contains("Local name"));
        assert!(!text.contains("MEDICINAL USES"));
        assert!(!text.contains("PREPARATION"));
        assert!(!text.contains("TRADITIONAL USE"));
        assert!(!text.contains("SAFETY"));
    }

    #[test]
    fn test_identified_message() {
        assert_eq!(
            identified_message("Holy Basil"),
            "Plant Identified! Successfully identified: Holy Basil"
        );
    }

    #[test]
    fn test_render_error_banner() {
        let error = IdentifyError::Upstream {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        let text = render_error(&error);
        assert!(text.contains("Analysis failed: quota exceeded"));
        assert!(text.contains("Retry"));
    }

    #[test]
    fn test_render_uploader_views() {
        let error = IdentifyError::EmptyResponse;
        let view = View::Uploader {
            file_name: Some("leaf.jpg"),
            loading: false,
            error: Some(&error),
        };
        let text = render_view(&view);
        assert!(text.contains("Empty response"));
        assert!(text.contains("leaf.jpg ready"));

        let view = View::Uploader {
            file_name: Some("leaf.jpg"),
            loading: true,
            error: None,
        };
        assert!(render_view(&view).contains("Analyzing plant"));
    }

    #[test]
    fn test_render_result_view() {
        let result = tulsi();
        let view = View::Result {
            result: &result,
            preview: None,
        };
        assert!(render_view(&view).contains("Holy Basil"));
    }
}
