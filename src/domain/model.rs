use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

pub const NORMALIZED_KEY: &str = "Normalized";
pub const ABSENT_PLACEHOLDER: &str = "N/A";

/// 一次查詢的輸入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub raw_number: String,
    pub region_hint: String,
}

impl LookupRequest {
    pub fn new(raw_number: impl Into<String>, region_hint: impl Into<String>) -> Self {
        Self {
            raw_number: raw_number.into(),
            region_hint: region_hint.into(),
        }
    }
}

/// A single reported value. `Absent` means the source had nothing at that
/// key, which is not the same as the source reporting `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Value(serde_json::Value),
    Absent,
}

impl Field {
    pub fn text(value: impl Into<String>) -> Self {
        Field::Value(serde_json::Value::String(value.into()))
    }

    pub fn optional_text(value: Option<String>) -> Self {
        value.map(Field::text).unwrap_or(Field::Absent)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Field::Value(serde_json::Value::Bool(value))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Absent => f.write_str(ABSENT_PLACEHOLDER),
            Field::Value(serde_json::Value::String(s)) => f.write_str(s),
            Field::Value(other) => write!(f, "{}", other),
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => v.serialize(serializer),
            Field::Absent => serializer.serialize_none(),
        }
    }
}

pub type FieldMap = IndexMap<String, Field>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNumber {
    pub e164: String,
    pub national: String,
    pub international: String,
    pub is_valid: bool,
    pub carrier: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedNumber {
    Parsed(ParsedNumber),
    Error { message: String },
}

impl NormalizedNumber {
    pub fn is_error(&self) -> bool {
        matches!(self, NormalizedNumber::Error { .. })
    }

    pub fn section(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        match self {
            NormalizedNumber::Parsed(parsed) => {
                fields.insert("E.164".to_string(), Field::text(parsed.e164.clone()));
                fields.insert("National".to_string(), Field::text(parsed.national.clone()));
                fields.insert(
                    "International".to_string(),
                    Field::text(parsed.international.clone()),
                );
                fields.insert("Valid".to_string(), Field::from(parsed.is_valid));
                fields.insert(
                    "Carrier".to_string(),
                    Field::optional_text(parsed.carrier.clone()),
                );
                fields.insert(
                    "Region".to_string(),
                    Field::optional_text(parsed.region.clone()),
                );
            }
            NormalizedNumber::Error { message } => {
                fields.insert("Error".to_string(), Field::text(message.clone()));
            }
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResult {
    Success(FieldMap),
    Disabled(String),
    Failure(String),
}

impl ProviderResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ProviderResult::Success(_))
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, ProviderResult::Disabled(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ProviderResult::Failure(_))
    }

    pub fn section(&self) -> FieldMap {
        match self {
            ProviderResult::Success(fields) => fields.clone(),
            ProviderResult::Disabled(reason) => {
                let mut fields = FieldMap::new();
                fields.insert("Disabled".to_string(), Field::text(reason.clone()));
                fields
            }
            ProviderResult::Failure(message) => {
                let mut fields = FieldMap::new();
                fields.insert("Error".to_string(), Field::text(message.clone()));
                fields
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportEntry {
    Normalized(NormalizedNumber),
    Provider(ProviderResult),
}

impl ReportEntry {
    pub fn section(&self) -> FieldMap {
        match self {
            ReportEntry::Normalized(n) => n.section(),
            ReportEntry::Provider(p) => p.section(),
        }
    }
}

impl Serialize for ReportEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let section = self.section();
        let mut map = serializer.serialize_map(Some(section.len()))?;
        for (key, value) in &section {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// 彙總報告：鍵的順序即執行順序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateReport {
    entries: IndexMap<String, ReportEntry>,
}

impl AggregateReport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, source: impl Into<String>, entry: ReportEntry) {
        self.entries.insert(source.into(), entry);
    }

    pub fn get(&self, source: &str) -> Option<&ReportEntry> {
        self.entries.get(source)
    }

    pub fn normalized(&self) -> Option<&NormalizedNumber> {
        match self.entries.get(NORMALIZED_KEY) {
            Some(ReportEntry::Normalized(n)) => Some(n),
            _ => None,
        }
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderResult> {
        match self.entries.get(name) {
            Some(ReportEntry::Provider(p)) => Some(p),
            _ => None,
        }
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReportEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AggregateReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (source, entry) in &self.entries {
            map.serialize_entry(source, entry)?;
        }
        map.end()
    }
}
