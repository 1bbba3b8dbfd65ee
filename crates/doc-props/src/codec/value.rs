//! Value encoding/decoding for string-encoded property values.
//!
//! An empty string is the "unset" encoding for every type except `text`
//! (where it is empty text) and `checkbox` (where it is unchecked).

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::error::ValueError;
use crate::model::{PropType, PropValue};

// =============================================================================
// DECODING
// =============================================================================

/// Interprets a stored string as a value of `prop_type`.
pub fn parse_value(prop_type: PropType, raw: &str) -> Result<PropValue, ValueError> {
    match prop_type {
        PropType::Text => Ok(PropValue::Text(raw.to_string())),
        PropType::Number => parse_number(raw),
        PropType::Date => parse_date(raw).map(PropValue::Date),
        PropType::User => Ok(PropValue::User(non_empty(raw))),
        PropType::Status => Ok(PropValue::Status(non_empty(raw))),
        PropType::Checkbox => parse_checkbox(raw),
    }
}

/// Parses a date property string.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (read as UTC
/// midnight). The empty string is an unset date.
pub fn parse_date(raw: &str) -> Result<Option<DateTime<Utc>>, ValueError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| invalid(PropType::Date, raw, "expected RFC 3339 or YYYY-MM-DD"))
}

fn parse_number(raw: &str) -> Result<PropValue, ValueError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(PropValue::Number(None));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| invalid(PropType::Number, raw, "not a number"))?;
    if value.is_nan() {
        return Err(invalid(PropType::Number, raw, "NaN is not allowed"));
    }
    Ok(PropValue::Number(Some(value)))
}

fn parse_checkbox(raw: &str) -> Result<PropValue, ValueError> {
    match raw.trim() {
        "" | "false" => Ok(PropValue::Checkbox(false)),
        "true" => Ok(PropValue::Checkbox(true)),
        _ => Err(invalid(PropType::Checkbox, raw, "expected true or false")),
    }
}

fn non_empty(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn invalid(prop_type: PropType, raw: &str, reason: &'static str) -> ValueError {
    ValueError {
        prop_type,
        value: raw.to_string(),
        reason,
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a typed value into its stored string form.
pub fn format_value(value: &PropValue) -> String {
    match value {
        PropValue::Text(s) => s.clone(),
        PropValue::Number(v) => v.map(|n| n.to_string()).unwrap_or_default(),
        PropValue::Date(v) => v.as_ref().map(format_date).unwrap_or_default(),
        PropValue::User(v) | PropValue::Status(v) => v.clone().unwrap_or_default(),
        PropValue::Checkbox(checked) => checked.to_string(),
    }
}

/// Formats a date the way the document model stores it (ISO 8601, UTC,
/// millisecond precision).
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_text_keeps_empty_string() {
        assert_eq!(
            parse_value(PropType::Text, "").unwrap(),
            PropValue::Text(String::new())
        );
    }

    #[test]
    fn test_number() {
        assert_eq!(
            parse_value(PropType::Number, " 12.5 ").unwrap(),
            PropValue::Number(Some(12.5))
        );
        assert_eq!(
            parse_value(PropType::Number, "").unwrap(),
            PropValue::Number(None)
        );
        assert!(parse_value(PropType::Number, "NaN").is_err());
        assert!(parse_value(PropType::Number, "twelve").is_err());
        assert_eq!(format_value(&PropValue::Number(Some(3.0))), "3");
    }

    #[test]
    fn test_date_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2024-03-09").unwrap(), Some(expected));
        assert_eq!(
            parse_date("2024-03-09T09:00:00+09:00").unwrap(),
            Some(expected)
        );
        assert_eq!(parse_date("").unwrap(), None);
        assert!(parse_date("03/09/2024").is_err());
        assert_eq!(format_date(&expected), "2024-03-09T00:00:00.000Z");
    }

    #[test]
    fn test_checkbox() {
        assert_eq!(
            parse_value(PropType::Checkbox, "").unwrap(),
            PropValue::Checkbox(false)
        );
        assert_eq!(
            parse_value(PropType::Checkbox, "true").unwrap(),
            PropValue::Checkbox(true)
        );
        let err = parse_value(PropType::Checkbox, "yes").unwrap_err();
        assert_eq!(err.prop_type, PropType::Checkbox);
    }

    #[test]
    fn test_opaque_types() {
        assert_eq!(parse_value(PropType::User, "").unwrap(), PropValue::User(None));
        assert_eq!(
            parse_value(PropType::Status, "In progress").unwrap(),
            PropValue::Status(Some("In progress".to_string()))
        );
    }
}
