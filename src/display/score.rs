//! Risk score presentation
//!
//! Scores arrive from the API as numbers, strings or nulls. Both helpers here
//! treat `0`, `NaN`, the empty string and `"N/A"` as "not assessed", and parse
//! textual scores the way a browser's `parseFloat` would, so an unparseable
//! string lands in the low band.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

pub const NOT_AVAILABLE: &str = "N/A";

const HIGH_THRESHOLD: f64 = 7.0;
const MEDIUM_THRESHOLD: f64 = 4.0;

/// A risk score as reported by the backend
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RiskScore {
    Numeric(f64),
    Text(String),
    #[default]
    Absent,
}

impl RiskScore {
    /// True for values a browser would treat as falsy, plus the `"N/A"` marker
    pub fn is_not_assessed(&self) -> bool {
        match self {
            RiskScore::Absent => true,
            RiskScore::Numeric(value) => *value == 0.0 || value.is_nan(),
            RiskScore::Text(text) => text.is_empty() || text == NOT_AVAILABLE,
        }
    }

    /// Numeric value used for band comparison; NaN when the text does not parse
    pub fn as_number(&self) -> f64 {
        match self {
            RiskScore::Numeric(value) => *value,
            RiskScore::Text(text) => parse_leading_float(text),
            RiskScore::Absent => f64::NAN,
        }
    }
}

impl From<f64> for RiskScore {
    fn from(value: f64) -> Self {
        RiskScore::Numeric(value)
    }
}

impl From<&str> for RiskScore {
    fn from(value: &str) -> Self {
        RiskScore::Text(value.to_string())
    }
}

impl From<String> for RiskScore {
    fn from(value: String) -> Self {
        RiskScore::Text(value)
    }
}

impl<T: Into<RiskScore>> From<Option<T>> for RiskScore {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RiskScore::Absent)
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_risk_score(self))
    }
}

impl<'de> Deserialize<'de> for RiskScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null | Value::Bool(false) => RiskScore::Absent,
            Value::Number(n) => n.as_f64().map(RiskScore::Numeric).unwrap_or_default(),
            Value::String(s) => RiskScore::Text(s),
            other => RiskScore::Text(other.to_string()),
        })
    }
}

impl Serialize for RiskScore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RiskScore::Numeric(value) => serializer.serialize_f64(*value),
            RiskScore::Text(text) => serializer.serialize_str(text),
            RiskScore::Absent => serializer.serialize_none(),
        }
    }
}

/// Risk band of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    NotAssessed,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskLevel::NotAssessed => "risk-not-assessed",
            RiskLevel::Low => "risk-low",
            RiskLevel::Medium => "risk-medium",
            RiskLevel::High => "risk-high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::NotAssessed => "Not Assessed",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Render a score for display: one fractional digit for numbers, `"N/A"` when
/// not assessed, other text unchanged.
pub fn format_risk_score(score: &RiskScore) -> String {
    if score.is_not_assessed() {
        return NOT_AVAILABLE.to_string();
    }

    match score {
        RiskScore::Numeric(value) => to_fixed_one(*value),
        RiskScore::Text(text) => text.clone(),
        RiskScore::Absent => NOT_AVAILABLE.to_string(),
    }
}

/// Classify a score into its risk band
pub fn risk_level_class(score: &RiskScore) -> RiskLevel {
    if score.is_not_assessed() {
        return RiskLevel::NotAssessed;
    }

    // NaN fails both comparisons and falls to Low.
    let value = score.as_number();
    if value >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if value >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// One-decimal rendering with exact ties rounded away from zero
fn to_fixed_one(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // Only a tie if `value * 10` was computed without rounding.
    let scaled = value * 10.0;
    let exact = value.mul_add(10.0, -scaled) == 0.0;
    if exact && (scaled - scaled.trunc()).abs() == 0.5 {
        let rounded = scaled.abs().ceil().copysign(scaled) / 10.0;
        return format!("{:.1}", rounded);
    }

    format!("{:.1}", value)
}

/// Parse the longest numeric prefix of `text`, NaN when there is none
fn parse_leading_float(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if trimmed[end..].starts_with("Infinity") {
        return if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numeric_scores() {
        assert_eq!(format_risk_score(&RiskScore::Numeric(7.0)), "7.0");
        assert_eq!(format_risk_score(&RiskScore::Numeric(6.94)), "6.9");
        assert_eq!(format_risk_score(&RiskScore::Numeric(3.96)), "4.0");
        assert_eq!(format_risk_score(&RiskScore::Numeric(-2.5)), "-2.5");
        assert_eq!(format_risk_score(&RiskScore::Numeric(10.0)), "10.0");
    }

    #[test]
    fn test_format_rounds_ties_away_from_zero() {
        assert_eq!(format_risk_score(&RiskScore::Numeric(0.25)), "0.3");
        assert_eq!(format_risk_score(&RiskScore::Numeric(2.75)), "2.8");
        assert_eq!(format_risk_score(&RiskScore::Numeric(-0.25)), "-0.3");
    }

    #[test]
    fn test_format_inexact_ties_use_stored_value() {
        // these literals are stored just below the tie
        assert_eq!(format_risk_score(&RiskScore::Numeric(0.35)), "0.3");
        assert_eq!(format_risk_score(&RiskScore::Numeric(0.15)), "0.1");
        assert_eq!(format_risk_score(&RiskScore::Numeric(8.95)), "8.9");
        assert_eq!(format_risk_score(&RiskScore::Numeric(1.45)), "1.4");
        assert_eq!(format_risk_score(&RiskScore::Numeric(-0.35)), "-0.3");
    }

    #[test]
    fn test_format_zero_is_not_available() {
        assert_eq!(format_risk_score(&RiskScore::Numeric(0.0)), "N/A");
        assert_eq!(format_risk_score(&RiskScore::Numeric(-0.0)), "N/A");
        assert_eq!(format_risk_score(&RiskScore::Numeric(f64::NAN)), "N/A");
    }

    #[test]
    fn test_format_absent_and_marker() {
        assert_eq!(format_risk_score(&RiskScore::Absent), "N/A");
        assert_eq!(format_risk_score(&RiskScore::from("N/A")), "N/A");
        assert_eq!(format_risk_score(&RiskScore::from("")), "N/A");
        assert_eq!(format_risk_score(&RiskScore::from(None::<f64>)), "N/A");
    }

    #[test]
    fn test_format_text_passes_through() {
        assert_eq!(format_risk_score(&RiskScore::from("7.25")), "7.25");
        assert_eq!(format_risk_score(&RiskScore::from("Not Assessed")), "Not Assessed");
        assert_eq!(format_risk_score(&RiskScore::from("0")), "0");
    }

    #[test]
    fn test_format_infinity() {
        assert_eq!(format_risk_score(&RiskScore::Numeric(f64::INFINITY)), "Infinity");
        assert_eq!(
            format_risk_score(&RiskScore::Numeric(f64::NEG_INFINITY)),
            "-Infinity"
        );
    }

    #[test]
    fn test_level_bands() {
        assert_eq!(risk_level_class(&RiskScore::Numeric(7.0)), RiskLevel::High);
        assert_eq!(risk_level_class(&RiskScore::Numeric(9.5)), RiskLevel::High);
        assert_eq!(risk_level_class(&RiskScore::Numeric(6.9)), RiskLevel::Medium);
        assert_eq!(risk_level_class(&RiskScore::Numeric(4.0)), RiskLevel::Medium);
        assert_eq!(risk_level_class(&RiskScore::Numeric(3.9)), RiskLevel::Low);
        assert_eq!(risk_level_class(&RiskScore::Numeric(-1.0)), RiskLevel::Low);
    }

    #[test]
    fn test_level_css_classes() {
        assert_eq!(risk_level_class(&7.0.into()).css_class(), "risk-high");
        assert_eq!(risk_level_class(&6.9.into()).css_class(), "risk-medium");
        assert_eq!(risk_level_class(&3.9.into()).css_class(), "risk-low");
        assert_eq!(risk_level_class(&0.0.into()).css_class(), "risk-not-assessed");
    }

    #[test]
    fn test_level_not_assessed() {
        assert_eq!(risk_level_class(&RiskScore::Absent), RiskLevel::NotAssessed);
        assert_eq!(risk_level_class(&RiskScore::from("N/A")), RiskLevel::NotAssessed);
        assert_eq!(risk_level_class(&RiskScore::from("")), RiskLevel::NotAssessed);
    }

    #[test]
    fn test_level_parses_text() {
        assert_eq!(risk_level_class(&RiskScore::from("8")), RiskLevel::High);
        assert_eq!(risk_level_class(&RiskScore::from("  5.5 points")), RiskLevel::Medium);
        assert_eq!(risk_level_class(&RiskScore::from("1e1")), RiskLevel::High);
        // "0" is a non-empty string, so it is classified rather than skipped
        assert_eq!(risk_level_class(&RiskScore::from("0")), RiskLevel::Low);
    }

    #[test]
    fn test_level_unparseable_text_is_low() {
        assert_eq!(risk_level_class(&RiskScore::from("abc")), RiskLevel::Low);
        assert_eq!(risk_level_class(&RiskScore::from("Not Assessed")), RiskLevel::Low);
        assert_eq!(risk_level_class(&RiskScore::from(".")), RiskLevel::Low);
    }

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("8"), 8.0);
        assert_eq!(parse_leading_float(" -3.5abc"), -3.5);
        assert_eq!(parse_leading_float(".5"), 0.5);
        assert_eq!(parse_leading_float("5."), 5.0);
        assert_eq!(parse_leading_float("2e"), 2.0);
        assert_eq!(parse_leading_float("2e-1x"), 0.2);
        assert_eq!(parse_leading_float("Infinity"), f64::INFINITY);
        assert_eq!(parse_leading_float("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_leading_float("abc").is_nan());
        assert!(parse_leading_float("-").is_nan());
        assert!(parse_leading_float("").is_nan());
    }

    #[test]
    fn test_deserialize_scores() {
        let scores: Vec<RiskScore> =
            serde_json::from_str(r#"[7.5, "N/A", null, "8", 3, false]"#).expect("valid json");
        assert_eq!(
            scores,
            vec![
                RiskScore::Numeric(7.5),
                RiskScore::Text("N/A".to_string()),
                RiskScore::Absent,
                RiskScore::Text("8".to_string()),
                RiskScore::Numeric(3.0),
                RiskScore::Absent,
            ]
        );
    }

    #[test]
    fn test_serialize_scores() {
        let json = serde_json::to_string(&vec![
            RiskScore::Numeric(7.5),
            RiskScore::from("N/A"),
            RiskScore::Absent,
        ])
        .expect("serializable");
        assert_eq!(json, r#"[7.5,"N/A",null]"#);
    }

    #[test]
    fn test_display_uses_formatter() {
        assert_eq!(RiskScore::Numeric(4.44).to_string(), "4.4");
        assert_eq!(RiskLevel::High.to_string(), "risk-high");
        assert_eq!(RiskLevel::NotAssessed.label(), "Not Assessed");
    }
}
