//! Lenient serde helpers for form and JSON inputs.
//!
//! Multipart forms deliver every field as text, and the dashboard sends
//! blank strings for untouched optional inputs. These helpers accept
//! both numbers and numeric strings, and treat blank text as absent.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

fn parse_text<T, E>(text: &str) -> Result<T, E>
where
    T: FromStr,
    T::Err: Display,
    E: de::Error,
{
    text.trim()
        .parse::<T>()
        .map_err(|e| E::custom(format!("invalid number '{}': {}", text.trim(), e)))
}

/// Parse a date from `YYYY-MM-DD`, also accepting an ISO timestamp whose
/// first ten characters are the date.
pub fn parse_date(text: &str) -> Result<NaiveDate, String> {
    let text = text.trim();
    let date_part = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", text))
}

/// Deserialize a number given either as a JSON number or as text.
pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    match NumberOrText::<T>::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => parse_text(&text),
    }
}

/// Optional variant of [`number`]; blank text and `null` become `None`.
pub fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => parse_text(&text).map(Some),
    }
}

/// Deserialize a required date.
pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_date(&text).map_err(de::Error::custom)
}

/// Deserialize an optional date; blank text and `null` become `None`.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) if !text.trim().is_empty() => {
            parse_date(&text).map(Some).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

/// Trim optional text; blank text becomes `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Trim required text.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "number")]
        count: i32,
        #[serde(default, deserialize_with = "optional_number")]
        area: Option<f64>,
        #[serde(deserialize_with = "date")]
        day: NaiveDate,
        #[serde(default, deserialize_with = "optional_date")]
        until: Option<NaiveDate>,
        #[serde(default, deserialize_with = "optional_text")]
        note: Option<String>,
    }

    #[test]
    fn test_accepts_numbers_as_text() {
        let sample: Sample = serde_json::from_value(json!({
            "count": " 12 ",
            "area": "1.5",
            "day": "2024-03-01",
            "until": "",
            "note": "   "
        }))
        .unwrap();

        assert_eq!(sample.count, 12);
        assert_eq!(sample.area, Some(1.5));
        assert_eq!(sample.day, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(sample.until, None);
        assert_eq!(sample.note, None);
    }

    #[test]
    fn test_accepts_native_numbers_and_timestamps() {
        let sample: Sample = serde_json::from_value(json!({
            "count": 7,
            "area": 2,
            "day": "2024-03-01T08:00:00.000Z",
            "until": "2024-04-01"
        }))
        .unwrap();

        assert_eq!(sample.count, 7);
        assert_eq!(sample.area, Some(2.0));
        assert_eq!(sample.until, NaiveDate::from_ymd_opt(2024, 4, 1));
    }

    #[test]
    fn test_rejects_garbage() {
        let result: Result<Sample, _> = serde_json::from_value(json!({
            "count": "many",
            "day": "2024-03-01"
        }));
        assert!(result.unwrap_err().to_string().contains("invalid number"));

        let result: Result<Sample, _> = serde_json::from_value(json!({
            "count": 1,
            "day": "03/01/2024"
        }));
        assert!(result.unwrap_err().to_string().contains("expected YYYY-MM-DD"));
    }
}
