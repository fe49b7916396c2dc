//! Text and date helpers shared by decoding, filtering and export

use chrono::{DateTime, NaiveDate};

/// Case-fold text for substring search
#[must_use]
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Split user-entered list text on newlines and commas
///
/// Entries are trimmed; empty entries are dropped.
#[must_use]
pub fn split_list(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Render a backend timestamp as `YYYY-MM-DD`
///
/// Accepts RFC 3339 timestamps and plain dates. Anything else is returned
/// unchanged so the operator still sees what the backend sent.
#[must_use]
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Truncate text to `max` characters, marking the cut with an ellipsis
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Lenient field decoders for loosely typed backend payloads
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Render a scalar JSON value as text; `None` for null, empty strings and containers
    #[must_use]
    pub fn scalar_to_string(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Decode a string, number or boolean into an optional string
    ///
    /// # Errors
    ///
    /// Fails only if the input is not valid JSON for the deserializer.
    pub fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(scalar_to_string))
    }

    /// Decode an array of scalars, or a single newline/comma separated string, into a list
    ///
    /// # Errors
    ///
    /// Fails only if the input is not valid JSON for the deserializer.
    pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
            Some(Value::String(text)) => super::split_list(&text),
            _ => Vec::new(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient::opt_string")]
        salary: Option<String>,
        #[serde(default, deserialize_with = "lenient::string_list")]
        benefits: Vec<String>,
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("Rust, Tokio\n\n  SQL ,"),
            vec!["Rust".to_string(), "Tokio".to_string(), "SQL".to_string()]
        );
        assert!(split_list("  \n , ").is_empty());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15T10:22:00Z"), "2024-03-15");
        assert_eq!(format_date("2024-03-15T23:30:00+01:00"), "2024-03-15");
        assert_eq!(format_date("2024-03-15"), "2024-03-15");
        assert_eq!(format_date("last tuesday"), "last tuesday");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Lagos", 10), "Lagos");
        assert_eq!(truncate("Port Harcourt", 5), "Port…");
    }

    #[test]
    fn test_lenient_fields() {
        let sample: Sample =
            serde_json::from_str(r#"{"salary": 120000, "benefits": ["Health", 401, null]}"#).unwrap();
        assert_eq!(sample.salary.as_deref(), Some("120000"));
        assert_eq!(sample.benefits, vec!["Health".to_string(), "401".to_string()]);

        let sample: Sample =
            serde_json::from_str(r#"{"salary": "  ", "benefits": "Gym, Remote"}"#).unwrap();
        assert!(sample.salary.is_none());
        assert_eq!(sample.benefits, vec!["Gym".to_string(), "Remote".to_string()]);

        let sample: Sample = serde_json::from_str(r#"{"salary": null, "benefits": null}"#).unwrap();
        assert!(sample.salary.is_none());
        assert!(sample.benefits.is_empty());
    }

    proptest! {
        #[test]
        fn prop_split_list_never_yields_blank_entries(text in ".{0,64}") {
            for item in split_list(&text) {
                prop_assert!(!item.trim().is_empty());
                prop_assert_eq!(item.trim(), item.as_str());
            }
        }
    }
}
