//! Address reference data loaded from JSON files at startup.

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::{Barangay, Municipality, Province};
use crate::errors::{AppError, AppResult};

pub const PROVINCES_FILE: &str = "provinces.json";
pub const MUNICIPALITIES_FILE: &str = "municipalities.json";
pub const BARANGAYS_FILE: &str = "barangays.json";

/// In-memory, read-only lookup tables
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    provinces: Vec<Province>,
    municipalities: HashMap<String, Vec<Municipality>>,
    barangays: HashMap<String, Vec<Barangay>>,
}

impl AddressBook {
    /// Load all three files from `dir`. Missing or malformed files are errors.
    pub fn load(dir: &Path) -> AppResult<Self> {
        let provinces: Vec<Province> = read_json(&dir.join(PROVINCES_FILE))?;
        let municipalities: Vec<Municipality> = read_json(&dir.join(MUNICIPALITIES_FILE))?;
        let barangays: Vec<Barangay> = read_json(&dir.join(BARANGAYS_FILE))?;

        let book = Self::from_parts(provinces, municipalities, barangays);
        tracing::info!(
            provinces = book.provinces.len(),
            municipalities = book.municipalities.values().map(Vec::len).sum::<usize>(),
            barangays = book.barangays.values().map(Vec::len).sum::<usize>(),
            "Address data loaded"
        );
        Ok(book)
    }

    pub fn from_parts(
        mut provinces: Vec<Province>,
        municipalities: Vec<Municipality>,
        barangays: Vec<Barangay>,
    ) -> Self {
        provinces.sort_by(|a, b| a.name.cmp(&b.name));

        let mut by_province: HashMap<String, Vec<Municipality>> = HashMap::new();
        for m in municipalities {
            by_province.entry(m.province_code.clone()).or_default().push(m);
        }
        let mut by_municipality: HashMap<String, Vec<Barangay>> = HashMap::new();
        for b in barangays {
            by_municipality
                .entry(b.municipality_code.clone())
                .or_default()
                .push(b);
        }
        by_province
            .values_mut()
            .for_each(|list| list.sort_by(|a, b| a.name.cmp(&b.name)));
        by_municipality
            .values_mut()
            .for_each(|list| list.sort_by(|a, b| a.name.cmp(&b.name)));

        Self {
            provinces,
            municipalities: by_province,
            barangays: by_municipality,
        }
    }

    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    pub fn has_province(&self, code: &str) -> bool {
        self.provinces.iter().any(|p| p.code == code)
    }

    /// Municipalities of a province (empty for a known province without any).
    pub fn municipalities(&self, province_code: &str) -> &[Municipality] {
        self.municipalities
            .get(province_code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_municipality(&self, code: &str) -> bool {
        self.municipalities
            .values()
            .flatten()
            .any(|m| m.code == code)
    }

    pub fn barangays(&self, municipality_code: &str) -> &[Barangay] {
        self.barangays
            .get(municipality_code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::internal(format!("Cannot read {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::internal(format!("Malformed {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    fn seed(dir: &Path) {
        write(
            dir,
            PROVINCES_FILE,
            r#"[{"code":"0434","name":"Laguna"},{"code":"0410","name":"Batangas"}]"#,
        );
        write(
            dir,
            MUNICIPALITIES_FILE,
            r#"[{"code":"043411","name":"Los Baños","provinceCode":"0434"},
                {"code":"043405","name":"Calamba","provinceCode":"0434"}]"#,
        );
        write(
            dir,
            BARANGAYS_FILE,
            r#"[{"code":"043411005","name":"Batong Malake","municipalityCode":"043411"}]"#,
        );
    }

    #[test]
    fn test_load_groups_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let book = AddressBook::load(dir.path()).unwrap();

        assert_eq!(book.provinces()[0].name, "Batangas");
        let names: Vec<_> = book.municipalities("0434").iter().map(|m| &m.name).collect();
        assert_eq!(names, ["Calamba", "Los Baños"]);
        assert!(book.municipalities("0410").is_empty());
        assert!(book.has_province("0410"));
        assert!(book.has_municipality("043411"));
        assert_eq!(book.barangays("043411").len(), 1);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), PROVINCES_FILE, "[]");
        assert!(AddressBook::load(dir.path()).is_err());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        write(dir.path(), BARANGAYS_FILE, "{not json");
        let err = AddressBook::load(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::Internal(ref m) if m.contains("Malformed")));
    }
}
