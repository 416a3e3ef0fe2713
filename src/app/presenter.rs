use crate::domain::model::AggregateReport;
use crate::utils::error::{NumintelError, Result};
use colored::{Color, Colorize};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

pub const BANNER: &str = "=== Numintel Results ===";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn render(report: &AggregateReport, mode: OutputMode, color: bool) -> Result<String> {
    match mode {
        OutputMode::Json => render_json(report),
        OutputMode::Text => Ok(render_text(report, color)),
    }
}

/// 四格縮排，非 ASCII 字元原樣輸出
pub fn render_json(report: &AggregateReport) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    report.serialize(&mut serializer)?;

    String::from_utf8(buffer).map_err(|e| NumintelError::ResponseError {
        message: format!("JSON output is not UTF-8: {}", e),
    })
}

pub fn render_text(report: &AggregateReport, color: bool) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&paint(BANNER, Color::Cyan, color));
    out.push_str("\n\n");

    for (source, entry) in report.iter() {
        out.push_str(&paint(&format!("{}:", source), Color::Yellow, color));
        out.push('\n');
        for (key, value) in entry.section() {
            out.push_str(&paint(&format!("{}: ", key), Color::Green, color));
            out.push_str(&paint(&value.to_string(), Color::White, color));
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        Field, FieldMap, NormalizedNumber, ParsedNumber, ProviderResult, ReportEntry,
        NORMALIZED_KEY,
    };

    fn sample_report() -> AggregateReport {
        let mut report = AggregateReport::new();
        report.insert(
            NORMALIZED_KEY,
            ReportEntry::Normalized(NormalizedNumber::Parsed(ParsedNumber {
                e164: "+14155552671".to_string(),
                national: "(415) 555-2671".to_string(),
                international: "+1 415-555-2671".to_string(),
                is_valid: true,
                carrier: None,
                region: Some("United States of America".to_string()),
            })),
        );

        let mut fields = FieldMap::new();
        fields.insert("Valid".to_string(), Field::from(true));
        fields.insert("Location".to_string(), Field::text("São Paulo"));
        fields.insert("Local".to_string(), Field::Absent);
        fields.insert("Type".to_string(), Field::Value(serde_json::Value::Null));
        report.insert("AbstractAPI", ReportEntry::Provider(ProviderResult::Success(fields)));

        report.insert(
            "Twilio",
            ReportEntry::Provider(ProviderResult::Disabled(
                "Twilio credentials not set".to_string(),
            )),
        );
        report
    }

    #[test]
    fn test_render_text_sections() {
        let text = render_text(&sample_report(), false);

        assert!(text.contains("=== Numintel Results ==="));
        assert!(text.contains("Normalized:\nE.164: +14155552671\n"));
        assert!(text.contains("Carrier: N/A\n"));
        assert!(text.contains("Region: United States of America\n"));
        assert!(text.contains("AbstractAPI:\nValid: true\nLocation: São Paulo\nLocal: N/A\nType: null\n"));
        assert!(text.contains("Twilio:\nDisabled: Twilio credentials not set\n"));

        let normalized = text.find("Normalized:").unwrap();
        let abstract_api = text.find("AbstractAPI:").unwrap();
        let twilio = text.find("Twilio:").unwrap();
        assert!(normalized < abstract_api && abstract_api < twilio);
    }

    #[test]
    fn test_render_text_without_color_has_no_escape_codes() {
        let text = render_text(&sample_report(), false);
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_render_json_indent_and_unicode() {
        let json = render_json(&sample_report()).unwrap();

        assert!(json.starts_with("{\n    \"Normalized\": {\n        \"E.164\""));
        assert!(json.contains("São Paulo"));
        assert!(json.contains("\"Local\": null"));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<&String> = parsed.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["Normalized", "AbstractAPI", "Twilio"]);
    }

    #[test]
    fn test_render_dispatches_on_mode() {
        let report = sample_report();
        let json = render(&report, OutputMode::Json, true).unwrap();
        assert!(json.trim_start().starts_with('{'));

        let text = render(&report, OutputMode::Text, false).unwrap();
        assert!(text.contains(BANNER));
    }
}
