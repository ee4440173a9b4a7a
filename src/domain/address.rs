//! Philippine address reference data (read-only).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    #[schema(example = "0434")]
    pub code: String,
    #[schema(example = "Laguna")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Municipality {
    #[schema(example = "043411")]
    pub code: String,
    #[schema(example = "Los Baños")]
    pub name: String,
    #[schema(example = "0434")]
    pub province_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Barangay {
    #[schema(example = "043411005")]
    pub code: String,
    #[schema(example = "Batong Malake")]
    pub name: String,
    #[schema(example = "043411")]
    pub municipality_code: String,
}

/// Anything with a display name that lookups can filter on
pub trait Named {
    fn name(&self) -> &str;

    /// Case-insensitive substring match; an empty query matches everything.
    fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name().to_lowercase().contains(&query.to_lowercase())
    }
}

impl Named for Province {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Municipality {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Barangay {
    fn name(&self) -> &str {
        &self.name
    }
}
