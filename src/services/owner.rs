//! Owner lookup shared by the record services.

use crate::domain::Beneficiary;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Beneficiary that a record refers to. An unknown identifier is a bad
/// request rather than a missing resource.
pub(crate) async fn require_owner<U: UnitOfWork>(
    uow: &U,
    beneficiary_id: &str,
) -> AppResult<Beneficiary> {
    uow.beneficiaries()
        .find_by_identifier(beneficiary_id)
        .await?
        .ok_or_else(|| AppError::validation(format!("Beneficiary {} not found", beneficiary_id)))
}
