//! Seedling service - CRUD over planting records.

use async_trait::async_trait;
use std::sync::Arc;

use super::owner::require_owner;
use crate::domain::{OwnerSummary, SeedlingInput, SeedlingResponse};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait SeedlingService: Send + Sync {
    async fn list(&self, beneficiary_id: Option<String>) -> AppResult<Vec<SeedlingResponse>>;

    async fn get(&self, id: i32) -> AppResult<SeedlingResponse>;

    async fn create(&self, input: SeedlingInput) -> AppResult<SeedlingResponse>;

    async fn update(&self, id: i32, input: SeedlingInput) -> AppResult<SeedlingResponse>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct SeedlingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SeedlingManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> SeedlingService for SeedlingManager<U> {
    async fn list(&self, beneficiary_id: Option<String>) -> AppResult<Vec<SeedlingResponse>> {
        let rows = self.uow.seedlings().list(beneficiary_id).await?;
        Ok(rows
            .into_iter()
            .map(|(record, owner)| SeedlingResponse::new(record, owner.as_ref().into()))
            .collect())
    }

    async fn get(&self, id: i32) -> AppResult<SeedlingResponse> {
        let (record, owner) = self
            .uow
            .seedlings()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Seedling record")?;
        Ok(SeedlingResponse::new(record, owner.as_ref().into()))
    }

    async fn create(&self, input: SeedlingInput) -> AppResult<SeedlingResponse> {
        let owner = require_owner(self.uow.as_ref(), &input.beneficiary_id).await?;
        let record = self.uow.seedlings().create(input).await?;
        Ok(SeedlingResponse::new(record, OwnerSummary::from(Some(&owner))))
    }

    async fn update(&self, id: i32, input: SeedlingInput) -> AppResult<SeedlingResponse> {
        let owner = require_owner(self.uow.as_ref(), &input.beneficiary_id).await?;
        let record = self.uow.seedlings().update(id, input).await?;
        Ok(SeedlingResponse::new(record, OwnerSummary::from(Some(&owner))))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.uow.seedlings().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::beneficiary::tests::sample_beneficiary;
    use crate::domain::SeedlingRecord;
    use crate::errors::AppError;
    use crate::infra::{MockBeneficiaryRepository, MockSeedlingRepository};
    use crate::services::test_support::TestUow;
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::eq;

    fn input(owner: &str) -> SeedlingInput {
        SeedlingInput {
            beneficiary_id: owner.to_string(),
            seedlings_received: 100,
            date_received: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            seedlings_planted: 90,
            hectares: 0.5,
            planting_start: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            planting_end: None,
            gps: None,
        }
    }

    fn record(input: SeedlingInput) -> SeedlingRecord {
        let now = Utc::now();
        SeedlingRecord {
            id: 1,
            beneficiary_id: input.beneficiary_id,
            seedlings_received: input.seedlings_received,
            date_received: input.date_received,
            seedlings_planted: input.seedlings_planted,
            hectares: input.hectares,
            planting_start: input.planting_start,
            planting_end: input.planting_end,
            gps: input.gps,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_joins_owner_fields() {
        let mut owners = MockBeneficiaryRepository::new();
        owners
            .expect_find_by_identifier()
            .with(eq("JD001"))
            .returning(|id| Ok(Some(sample_beneficiary(1, id))));
        let mut seedlings = MockSeedlingRepository::new();
        seedlings.expect_create().returning(|input| Ok(record(input)));

        let uow = TestUow::new()
            .with_beneficiaries(owners)
            .with_seedlings(seedlings);
        let response = SeedlingManager::new(Arc::new(uow))
            .create(input("JD001"))
            .await
            .unwrap();

        assert_eq!(response.beneficiary_name.as_deref(), Some("Juan Santos Dela Cruz"));
        assert_eq!(
            response.address.as_deref(),
            Some("Batong Malake, Los Baños, Laguna")
        );
    }

    #[tokio::test]
    async fn test_unknown_owner_is_bad_request() {
        let mut owners = MockBeneficiaryRepository::new();
        owners.expect_find_by_identifier().returning(|_| Ok(None));
        let mut seedlings = MockSeedlingRepository::new();
        seedlings.expect_create().never();

        let uow = TestUow::new()
            .with_beneficiaries(owners)
            .with_seedlings(seedlings);
        let err = SeedlingManager::new(Arc::new(uow))
            .create(input("ZZ404"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        assert!(matches!(err, AppError::Validation(ref m) if m == "Beneficiary ZZ404 not found"));
    }

    #[tokio::test]
    async fn test_list_tolerates_missing_owner() {
        let mut seedlings = MockSeedlingRepository::new();
        seedlings
            .expect_list()
            .with(eq(Some("JD001".to_string())))
            .returning(|_| Ok(vec![(record(input("JD001")), None)]));

        let uow = TestUow::new().with_seedlings(seedlings);
        let list = SeedlingManager::new(Arc::new(uow))
            .list(Some("JD001".to_string()))
            .await
            .unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].beneficiary_name, None);
    }
}
