//! Map coordinates, accepting decimal degrees or degrees-minutes-seconds.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid regex"));

/// Characters allowed between DMS components.
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[\s°º'"′″:]*$"#).expect("valid regex"));

/// One polygon vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    #[serde(alias = "latitude", deserialize_with = "degrees")]
    #[schema(example = 14.1670)]
    pub lat: f64,
    #[serde(alias = "longitude", alias = "lon", deserialize_with = "degrees")]
    #[schema(example = 121.2430)]
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check latitude and longitude ranges.
    pub fn validate(&self) -> AppResult<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(AppError::validation(format!(
                "Latitude {} is out of range",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(AppError::validation(format!(
                "Longitude {} is out of range",
                self.lng
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDegrees {
    Number(f64),
    Text(String),
}

fn degrees<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawDegrees::deserialize(deserializer)? {
        RawDegrees::Number(value) if value.is_finite() => Ok(value),
        RawDegrees::Number(_) => Err(de::Error::custom("coordinate must be finite")),
        RawDegrees::Text(text) => parse_degrees(&text).map_err(de::Error::custom),
    }
}

/// Parse decimal degrees (`-14.5`) or DMS (`14°35'58.2"N`, `120 59 2.4 E`).
///
/// `S`/`W` hemispheres and a leading minus sign give negative values.
pub fn parse_degrees(input: &str) -> Result<f64, String> {
    let text = input.trim();
    if text.is_empty() {
        return Err("coordinate is empty".to_string());
    }
    if let Ok(value) = text.parse::<f64>() {
        return if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("invalid coordinate '{}'", text))
        };
    }

    let invalid = || format!("invalid coordinate '{}'", text);

    let upper = text.to_ascii_uppercase();
    let mut body = upper.as_str();
    let mut negative = false;

    if let Some(rest) = body.strip_prefix('-') {
        negative = true;
        body = rest;
    }

    // Hemisphere letter may lead or trail.
    let hemisphere = body
        .chars()
        .last()
        .filter(|c| "NSEW".contains(*c))
        .map(|c| (c, &body[..body.len() - 1]))
        .or_else(|| {
            body.chars()
                .next()
                .filter(|c| "NSEW".contains(*c))
                .map(|c| (c, &body[1..]))
        });
    if let Some((letter, rest)) = hemisphere {
        if negative {
            return Err(invalid());
        }
        negative = matches!(letter, 'S' | 'W');
        body = rest;
    }

    let parts: Vec<f64> = NUMBER
        .find_iter(body)
        .map(|m| m.as_str().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| invalid())?;

    if parts.is_empty() || parts.len() > 3 || !SEPARATORS.is_match(&NUMBER.replace_all(body, "")) {
        return Err(invalid());
    }

    let (deg, min, sec) = (
        parts[0],
        parts.get(1).copied().unwrap_or(0.0),
        parts.get(2).copied().unwrap_or(0.0),
    );
    if min >= 60.0 || sec >= 60.0 {
        return Err(format!("minutes and seconds must be below 60 in '{}'", text));
    }
    // Only the last component may carry a fraction.
    if parts[..parts.len() - 1].iter().any(|p| p.fract() != 0.0) {
        return Err(invalid());
    }

    let value = deg + min / 60.0 + sec / 3600.0;
    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_decimal_strings() {
        assert_eq!(parse_degrees("14.5995").unwrap(), 14.5995);
        assert_eq!(parse_degrees(" -120.98 ").unwrap(), -120.98);
    }

    #[test]
    fn test_dms_with_symbols() {
        let value = parse_degrees("14°35'58.2\"N").unwrap();
        assert!(close(value, 14.0 + 35.0 / 60.0 + 58.2 / 3600.0));
    }

    #[test]
    fn test_dms_with_spaces_and_hemisphere() {
        let value = parse_degrees("120 59 2.4 W").unwrap();
        assert!(close(value, -(120.0 + 59.0 / 60.0 + 2.4 / 3600.0)));

        let value = parse_degrees("S 14 30").unwrap();
        assert!(close(value, -14.5));
    }

    #[test]
    fn test_leading_minus() {
        let value = parse_degrees("-14°30'").unwrap();
        assert!(close(value, -14.5));
    }

    #[test]
    fn test_rejects_invalid_dms() {
        assert!(parse_degrees("").is_err());
        assert!(parse_degrees("north").is_err());
        assert!(parse_degrees("14°75'").is_err());
        assert!(parse_degrees("14 30 10 5").is_err());
        assert!(parse_degrees("14.5 30").is_err());
        assert!(parse_degrees("-14 30 S").is_err());
    }

    #[test]
    fn test_deserialize_mixed_forms() {
        let c: Coordinate =
            serde_json::from_str(r#"{"lat": "14°30'N", "lng": 121}"#).unwrap();
        assert!(close(c.lat, 14.5));
        assert_eq!(c.lng, 121.0);

        let c: Coordinate =
            serde_json::from_str(r#"{"latitude": 1.5, "longitude": "2.5"}"#).unwrap();
        assert_eq!(c, Coordinate::new(1.5, 2.5));
    }

    #[test]
    fn test_range_validation() {
        assert!(Coordinate::new(14.0, 121.0).validate().is_ok());
        assert!(Coordinate::new(91.0, 121.0).validate().is_err());
        assert!(Coordinate::new(14.0, -181.0).validate().is_err());
    }
}
