//! Utility functions shared by the console views

use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Deserialize an optional value from a string, treating blank input as absent
///
/// HTML forms submit empty inputs as `field=`; this keeps those out of filters.
///
/// # Errors
///
/// Returns a deserialization error if a non-blank value fails to parse.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Number of pages needed for `total` items, never less than one
#[must_use]
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(page_size)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Pretty-print serialized JSON, returning the input unchanged if it does not parse
#[must_use]
pub fn pretty_json(raw: &str) -> String {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| raw.to_string())
}

/// Format a count with thousands separators
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a percentage with one decimal place
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1_000, "1,000")]
    #[case(1_234_567, "1,234,567")]
    #[case(100_000, "100,000")]
    fn test_format_count(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(format_count(value), expected);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.345), "12.3%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(100.0), "100.0%");
    }

    #[test]
    fn test_pretty_json_formats_valid_json() {
        let pretty = pretty_json(r#"{"role":"doctor"}"#);
        assert_eq!(pretty, "{\n  \"role\": \"doctor\"\n}");
    }

    #[test]
    fn test_pretty_json_falls_back_to_raw_text() {
        assert_eq!(pretty_json("role=doctor"), "role=doctor");
        assert_eq!(pretty_json(""), "");
    }

    #[test]
    fn test_total_pages_zero_page_size() {
        assert_eq!(total_pages(50, 0), 1);
    }
}
