//! Address lookup service over the in-memory reference data.

use std::sync::Arc;

use crate::domain::{Barangay, Municipality, Named, Province};
use crate::errors::{AppError, AppResult};
use crate::infra::AddressBook;

/// Read-only lookups. `query` filters by name and is optional.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
pub trait AddressService: Send + Sync {
    fn provinces(&self, query: Option<String>) -> Vec<Province>;

    /// Fails with 404 when the province code is unknown.
    fn municipalities(&self, province_code: &str, query: Option<String>)
        -> AppResult<Vec<Municipality>>;

    /// Fails with 404 when the municipality code is unknown.
    fn barangays(&self, municipality_code: &str, query: Option<String>) -> AppResult<Vec<Barangay>>;
}

pub struct AddressDirectory {
    book: Arc<AddressBook>,
}

impl AddressDirectory {
    pub fn new(book: Arc<AddressBook>) -> Self {
        Self { book }
    }
}

fn filtered<T: Named + Clone>(items: &[T], query: Option<&str>) -> Vec<T> {
    let query = query.unwrap_or_default();
    items.iter().filter(|item| item.matches(query)).cloned().collect()
}

impl AddressService for AddressDirectory {
    fn provinces(&self, query: Option<String>) -> Vec<Province> {
        filtered(self.book.provinces(), query.as_deref())
    }

    fn municipalities(
        &self,
        province_code: &str,
        query: Option<String>,
    ) -> AppResult<Vec<Municipality>> {
        if !self.book.has_province(province_code) {
            return Err(AppError::not_found("Province"));
        }
        Ok(filtered(
            self.book.municipalities(province_code),
            query.as_deref(),
        ))
    }

    fn barangays(&self, municipality_code: &str, query: Option<String>) -> AppResult<Vec<Barangay>> {
        if !self.book.has_municipality(municipality_code) {
            return Err(AppError::not_found("Municipality"));
        }
        Ok(filtered(
            self.book.barangays(municipality_code),
            query.as_deref(),
        ))
    }
}
