//! Doctor record model
//!
//! The shape of one directory entry as served by the remote JSON endpoint, and
//! the tolerant parser that turns a response body into records.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// How a doctor can be consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ConsultationMode {
    #[serde(rename = "Video Consult")]
    VideoConsult,
    #[serde(rename = "In Clinic")]
    InClinic,
}

impl ConsultationMode {
    pub const ALL: [ConsultationMode; 2] =
        [ConsultationMode::VideoConsult, ConsultationMode::InClinic];

    /// The literal used both on the wire and in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationMode::VideoConsult => "Video Consult",
            ConsultationMode::InClinic => "In Clinic",
        }
    }
}

impl fmt::Display for ConsultationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConsultationMode(pub String);

impl fmt::Display for UnknownConsultationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown consultation mode: {}. Valid modes: Video Consult, In Clinic",
            self.0
        )
    }
}

impl std::error::Error for UnknownConsultationMode {}

impl FromStr for ConsultationMode {
    type Err = UnknownConsultationMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConsultationMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownConsultationMode(s.to_string()))
    }
}

/// One doctor in the directory
///
/// Every field except `id` is optional on the wire. Absent numeric fields stay
/// `None` so that "no fee listed" is never confused with a free consultation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub id: u64,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(rename = "specialty", default, deserialize_with = "string_list")]
    pub specialties: Vec<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub qualification: Option<String>,
    #[serde(
        rename = "experience",
        default,
        deserialize_with = "lenient_years",
        skip_serializing_if = "Option::is_none"
    )]
    pub experience_years: Option<u32>,
    #[serde(default, deserialize_with = "optional_text")]
    pub clinic_name: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub area: Option<String>,
    #[serde(
        rename = "consultation_type",
        default,
        deserialize_with = "known_modes"
    )]
    pub consultation_types: Vec<ConsultationMode>,
    #[serde(
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub fee: Option<f64>,
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

impl DoctorRecord {
    /// Name to show for the record, "Unknown" when the source left it blank
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Unknown"
        } else {
            &self.name
        }
    }

    pub fn offers(&self, mode: ConsultationMode) -> bool {
        self.consultation_types.contains(&mode)
    }
}

/// Parse a response body into doctor records, preserving source order
///
/// The root must be a JSON array. Individual records are parsed leniently:
/// unknown keys are ignored and optional fields may be missing, `null` or of
/// the wrong type. Entries that are not objects, or that lack a usable `id`,
/// are skipped.
pub fn parse_doctor_list(body: &str) -> Result<Vec<DoctorRecord>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(body)?;

    Ok(entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        _ => Ok(String::new()),
    }
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

/// String items of an array; anything else reads as an empty list
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect())
}

fn known_modes<'de, D>(deserializer: D) -> Result<Vec<ConsultationMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = string_list(deserializer)?;
    let mut modes: Vec<ConsultationMode> = Vec::with_capacity(raw.len());
    for mode in raw.iter().filter_map(|value| value.parse().ok()) {
        if !modes.contains(&mode) {
            modes.push(mode);
        }
    }
    Ok(modes)
}

/// A number as served by the API: either a JSON number or a string holding one
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("valid number pattern"))
}

fn loose_to_f64(value: LooseNumber) -> Option<f64> {
    let number = match value {
        LooseNumber::Number(n) => n,
        LooseNumber::Text(text) => {
            let digits = text.replace(',', "");
            number_pattern().find(&digits)?.as_str().parse().ok()?
        }
    };
    (number.is_finite() && number >= 0.0).then_some(number)
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LooseNumber>::deserialize(deserializer)?.and_then(loose_to_f64))
}

fn lenient_years<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_amount(deserializer)?
        .filter(|years| *years <= u32::MAX as f64)
        .map(|years| years.trunc() as u32))
}
