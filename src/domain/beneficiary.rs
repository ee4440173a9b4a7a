//! Beneficiary domain entity, identifier rules and related DTOs.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{
    BENEFICIARY_SEQUENCE_WIDTH, MAX_BENEFICIARY_ID_LENGTH, MAX_PLAUSIBLE_AGE, UPLOADS_ROUTE,
};
use crate::errors::{AppError, AppResult};
use crate::types::lenient;

/// Beneficiary gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Gender::try_from(value.as_str())
    }
}

impl TryFrom<&str> for Gender {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err("Gender must be male, female or other".to_string()),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered farmer
#[derive(Debug, Clone, PartialEq)]
pub struct Beneficiary {
    pub id: i32,
    /// Generated external identifier, e.g. `JD007`
    pub beneficiary_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub name_extension: Option<String>,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub province: String,
    pub municipality: String,
    pub barangay: String,
    pub street: Option<String>,
    /// Stored filename of the uploaded photo
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Beneficiary {
    /// First, middle and last name plus extension, blanks skipped.
    pub fn full_name(&self) -> String {
        join_present(
            [
                Some(self.first_name.as_str()),
                self.middle_name.as_deref(),
                Some(self.last_name.as_str()),
                self.name_extension.as_deref(),
            ],
            " ",
        )
    }

    /// Street, barangay, municipality and province, blanks skipped.
    pub fn address(&self) -> String {
        join_present(
            [
                self.street.as_deref(),
                Some(self.barangay.as_str()),
                Some(self.municipality.as_str()),
                Some(self.province.as_str()),
            ],
            ", ",
        )
    }

    /// Age today, see [`age_on`].
    pub fn age(&self) -> Option<i32> {
        self.birth_date
            .and_then(|birth| age_on(birth, Utc::now().date_naive()))
    }
}

fn join_present<'a>(parts: impl IntoIterator<Item = Option<&'a str>>, separator: &str) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Completed years between `birth` and `today`; `None` when the result is
/// negative or above [`MAX_PLAUSIBLE_AGE`].
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<i32> {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    (0..=MAX_PLAUSIBLE_AGE).contains(&age).then_some(age)
}

// =============================================================================
// Identifier rules
// =============================================================================

/// Two-letter prefix from the initials of first and last name.
pub fn identifier_prefix(first_name: &str, last_name: &str) -> AppResult<String> {
    let initial = |name: &str, field: &str| {
        name.trim()
            .chars()
            .next()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .ok_or_else(|| AppError::validation(format!("{} must start with a letter", field)))
    };

    Ok([initial(first_name, "First name")?, initial(last_name, "Last name")?]
        .iter()
        .collect())
}

/// Numeric sequence after the two-letter prefix; 0 when it is not numeric.
pub fn identifier_sequence(identifier: &str) -> u64 {
    identifier
        .get(2..)
        .and_then(|suffix| suffix.parse().ok())
        .unwrap_or(0)
}

/// Prefix followed by the sequence padded to three digits.
pub fn format_identifier(prefix: &str, sequence: u64) -> AppResult<String> {
    let identifier = format!(
        "{}{:0width$}",
        prefix,
        sequence,
        width = BENEFICIARY_SEQUENCE_WIDTH
    );

    if identifier.len() > MAX_BENEFICIARY_ID_LENGTH {
        return Err(AppError::validation(format!(
            "Generated beneficiary ID exceeds {} characters",
            MAX_BENEFICIARY_ID_LENGTH
        )));
    }

    Ok(identifier)
}

/// Next identifier given the largest sequence currently stored.
pub fn next_identifier(
    first_name: &str,
    last_name: &str,
    current_max: Option<u64>,
) -> AppResult<String> {
    let prefix = identifier_prefix(first_name, last_name)?;
    let next = current_max.map_or(1, |max| max.saturating_add(1));
    format_identifier(&prefix, next)
}

// =============================================================================
// DTOs
// =============================================================================

/// Beneficiary form fields (multipart text parts)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryInput {
    #[serde(deserialize_with = "lenient::text")]
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    #[schema(example = "Juan")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    #[validate(length(max = 100, message = "Middle name is too long"))]
    #[schema(example = "Santos")]
    pub middle_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    #[schema(example = "Dela Cruz")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    #[validate(length(max = 10, message = "Name extension is too long"))]
    #[schema(example = "Jr.")]
    pub name_extension: Option<String>,
    #[schema(value_type = String, example = "male")]
    pub gender: Gender,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    #[schema(value_type = Option<String>, format = Date, example = "1980-05-17")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    #[validate(length(max = 20, message = "Phone number is too long"))]
    #[schema(example = "09171234567")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    #[validate(length(min = 1, max = 100, message = "Province is required"))]
    #[schema(example = "Laguna")]
    pub province: String,
    #[serde(deserialize_with = "lenient::text")]
    #[validate(length(min = 1, max = 100, message = "Municipality is required"))]
    #[schema(example = "Los Baños")]
    pub municipality: String,
    #[serde(deserialize_with = "lenient::text")]
    #[validate(length(min = 1, max = 100, message = "Barangay is required"))]
    #[schema(example = "Batong Malake")]
    pub barangay: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    #[validate(length(max = 255, message = "Street is too long"))]
    pub street: Option<String>,
}

/// Name comparison used for duplicate detection: trimmed, Unicode lowercase.
pub fn same_name(first: &str, last: &str, other_first: &str, other_last: &str) -> bool {
    fn fold(name: &str) -> String {
        name.trim().to_lowercase()
    }
    fold(first) == fold(other_first) && fold(last) == fold(other_last)
}

impl BeneficiaryInput {
    /// True when first or last name differs from `current` under [`same_name`].
    pub fn renames(&self, current: &Beneficiary) -> bool {
        !same_name(
            &self.first_name,
            &self.last_name,
            &current.first_name,
            &current.last_name,
        )
    }
}

/// Row data for a new beneficiary
#[derive(Debug, Clone)]
pub struct NewBeneficiary {
    pub beneficiary_id: String,
    pub details: BeneficiaryInput,
    pub picture: Option<String>,
}

/// Beneficiary as returned to the dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryResponse {
    pub id: i32,
    #[schema(example = "JD001")]
    pub beneficiary_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub name_extension: Option<String>,
    #[schema(example = "Juan Santos Dela Cruz")]
    pub full_name: String,
    #[schema(value_type = String, example = "male")]
    pub gender: Gender,
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,
    pub age: Option<i32>,
    pub phone: Option<String>,
    pub province: String,
    pub municipality: String,
    pub barangay: String,
    pub street: Option<String>,
    #[schema(example = "Batong Malake, Los Baños, Laguna")]
    pub address: String,
    pub picture: Option<String>,
    #[schema(example = "/uploads/beneficiary_1700000000_1a2b3c4d.jpg")]
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Beneficiary> for BeneficiaryResponse {
    fn from(b: Beneficiary) -> Self {
        let full_name = b.full_name();
        let address = b.address();
        let age = b.age();
        let picture_url = b
            .picture
            .as_ref()
            .map(|file| format!("{}/{}", UPLOADS_ROUTE, file));

        Self {
            id: b.id,
            beneficiary_id: b.beneficiary_id,
            first_name: b.first_name,
            middle_name: b.middle_name,
            last_name: b.last_name,
            name_extension: b.name_extension,
            full_name,
            gender: b.gender,
            birth_date: b.birth_date,
            age,
            phone: b.phone,
            province: b.province,
            municipality: b.municipality,
            barangay: b.barangay,
            street: b.street,
            address,
            picture: b.picture,
            picture_url,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Display fields of the owning beneficiary, joined into dependent records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnerSummary {
    pub beneficiary_name: Option<String>,
    pub address: Option<String>,
}

impl From<Option<&Beneficiary>> for OwnerSummary {
    fn from(owner: Option<&Beneficiary>) -> Self {
        match owner {
            Some(b) => Self {
                beneficiary_name: Some(b.full_name()),
                address: Some(b.address()),
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn sample_beneficiary(id: i32, beneficiary_id: &str) -> Beneficiary {
        let now = Utc::now();
        Beneficiary {
            id,
            beneficiary_id: beneficiary_id.to_string(),
            first_name: "Juan".to_string(),
            middle_name: Some("Santos".to_string()),
            last_name: "Dela Cruz".to_string(),
            name_extension: None,
            gender: Gender::Male,
            birth_date: NaiveDate::from_ymd_opt(1980, 5, 17),
            phone: None,
            province: "Laguna".to_string(),
            municipality: "Los Baños".to_string(),
            barangay: "Batong Malake".to_string(),
            street: None,
            picture: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_prefix_uses_uppercased_initials() {
        assert_eq!(identifier_prefix("juan", "dela cruz").unwrap(), "JD");
        assert_eq!(identifier_prefix("  Maria ", "Santos").unwrap(), "MS");
    }

    #[test]
    fn test_prefix_requires_letters() {
        assert!(identifier_prefix("", "Santos").is_err());
        assert!(identifier_prefix("1st", "Santos").is_err());
        assert!(identifier_prefix("Ana", "Ñunez").is_err());
    }

    #[test]
    fn test_same_name_folds_unicode() {
        assert!(same_name(" Niño ", "PEÑA", "niño", "peña"));
        assert!(same_name("José", "Dela Cruz", "JOSÉ", "dela cruz"));
        assert!(!same_name("Jose", "Peña", "José", "Peña"));

        let current = sample_beneficiary(1, "JD001");
        let mut input = BeneficiaryInput {
            first_name: "JUAN".to_string(),
            middle_name: None,
            last_name: "dela cruz".to_string(),
            name_extension: None,
            gender: Gender::Male,
            birth_date: None,
            phone: None,
            province: "Laguna".to_string(),
            municipality: "Bay".to_string(),
            barangay: "Bitin".to_string(),
            street: None,
        };
        assert!(!input.renames(&current));
        input.last_name = "Dela Peña".to_string();
        assert!(input.renames(&current));
    }

    #[test]
    fn test_identifier_padding() {
        assert_eq!(format_identifier("JD", 1).unwrap(), "JD001");
        assert_eq!(format_identifier("JD", 42).unwrap(), "JD042");
        assert_eq!(format_identifier("JD", 999).unwrap(), "JD999");
        assert_eq!(format_identifier("JD", 1000).unwrap(), "JD1000");
    }

    #[test]
    fn test_identifier_length_limit() {
        // 2 letters + 18 digits = 20 characters, the maximum
        assert!(format_identifier("AB", 999_999_999_999_999_999).is_ok());
        let err = format_identifier("AB", 1_000_000_000_000_000_000).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_next_identifier_sequence() {
        assert_eq!(next_identifier("Juan", "Cruz", None).unwrap(), "JC001");
        assert_eq!(next_identifier("Ana", "Reyes", Some(41)).unwrap(), "AR042");
    }

    #[test]
    fn test_next_identifier_exceeds_existing() {
        for max in [0_u64, 1, 9, 99, 998, 999, 12_345] {
            let id = next_identifier("Pedro", "Penduko", Some(max)).unwrap();
            assert!(id.starts_with("PP"));
            assert!(id.len() <= MAX_BENEFICIARY_ID_LENGTH);
            assert!(identifier_sequence(&id) > max);
        }
    }

    #[test]
    fn test_identifier_sequence_parsing() {
        assert_eq!(identifier_sequence("JD007"), 7);
        assert_eq!(identifier_sequence("AB1000"), 1000);
        assert_eq!(identifier_sequence("AB"), 0);
        assert_eq!(identifier_sequence("ABxyz"), 0);
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let birth = ymd(1990, 6, 15);
        assert_eq!(age_on(birth, ymd(2024, 6, 14)), Some(33));
        assert_eq!(age_on(birth, ymd(2024, 6, 15)), Some(34));
    }

    #[test]
    fn test_age_out_of_range_is_none() {
        assert_eq!(age_on(ymd(2030, 1, 1), ymd(2024, 1, 1)), None);
        assert_eq!(age_on(ymd(1890, 1, 1), ymd(2024, 1, 1)), None);
        assert_eq!(age_on(ymd(1899, 1, 1), ymd(2024, 1, 1)), Some(125));
        assert_eq!(age_on(ymd(2024, 1, 1), ymd(2024, 1, 1)), Some(0));
    }

    #[test]
    fn test_full_name_and_address_skip_blanks() {
        let mut b = sample_beneficiary(1, "JD001");
        assert_eq!(b.full_name(), "Juan Santos Dela Cruz");
        assert_eq!(b.address(), "Batong Malake, Los Baños, Laguna");

        b.middle_name = Some("  ".to_string());
        b.name_extension = Some("Jr.".to_string());
        b.street = Some("123 Rizal St.".to_string());
        assert_eq!(b.full_name(), "Juan Dela Cruz Jr.");
        assert_eq!(b.address(), "123 Rizal St., Batong Malake, Los Baños, Laguna");
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!(Gender::try_from("Female").unwrap(), Gender::Female);
        assert_eq!(Gender::try_from(" M ").unwrap(), Gender::Male);
        assert!(Gender::try_from("unknown").is_err());
    }

    #[test]
    fn test_response_includes_picture_url() {
        let mut b = sample_beneficiary(3, "JD003");
        b.picture = Some("beneficiary_1_abcd.jpg".to_string());
        let response = BeneficiaryResponse::from(b);
        assert_eq!(
            response.picture_url.as_deref(),
            Some("/uploads/beneficiary_1_abcd.jpg")
        );
        assert_eq!(response.full_name, "Juan Santos Dela Cruz");
    }

    #[test]
    fn test_owner_summary_missing_owner() {
        assert_eq!(OwnerSummary::from(None), OwnerSummary::default());
    }
}
