//! Beneficiary service - registration, identifier allocation and
//! cascading deletion.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::beneficiary::next_identifier;
use crate::domain::{BeneficiaryInput, BeneficiaryResponse, NewBeneficiary};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{FileStore, UnitOfWork, UploadedFile};
use crate::with_transaction;

const PHOTO_KIND: &str = "beneficiary";

#[async_trait]
pub trait BeneficiaryService: Send + Sync {
    async fn list(&self, search: Option<String>) -> AppResult<Vec<BeneficiaryResponse>>;

    async fn get(&self, id: i32) -> AppResult<BeneficiaryResponse>;

    /// Register a beneficiary under a freshly allocated identifier
    async fn create(
        &self,
        input: BeneficiaryInput,
        picture: Option<UploadedFile>,
    ) -> AppResult<BeneficiaryResponse>;

    /// Update details; a new photo replaces the old one
    async fn update(
        &self,
        id: i32,
        input: BeneficiaryInput,
        picture: Option<UploadedFile>,
    ) -> AppResult<BeneficiaryResponse>;

    /// Delete the beneficiary with all its records
    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct BeneficiaryManager<U: UnitOfWork> {
    uow: Arc<U>,
    storage: FileStore,
}

impl<U: UnitOfWork> BeneficiaryManager<U> {
    pub fn new(uow: Arc<U>, storage: FileStore) -> Self {
        Self { uow, storage }
    }

    async fn ensure_unique_name(
        &self,
        first_name: &str,
        last_name: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        if self
            .uow
            .beneficiaries()
            .name_exists(first_name, last_name, exclude_id)
            .await?
        {
            return Err(AppError::validation(format!(
                "A beneficiary named \"{} {}\" already exists",
                first_name, last_name
            )));
        }
        Ok(())
    }

    /// Next identifier for this name. Two concurrent calls can read the same
    /// maximum; the unique index on `beneficiary_id` rejects the loser.
    async fn allocate_identifier(&self, first_name: &str, last_name: &str) -> AppResult<String> {
        self.ensure_unique_name(first_name, last_name, None).await?;
        let current_max = self.uow.beneficiaries().max_sequence().await?;
        next_identifier(first_name, last_name, current_max)
    }

    async fn store_photo(&self, picture: Option<UploadedFile>) -> AppResult<Option<String>> {
        match picture {
            Some(file) => self.storage.save(PHOTO_KIND, &file).await.map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> BeneficiaryService for BeneficiaryManager<U> {
    async fn list(&self, search: Option<String>) -> AppResult<Vec<BeneficiaryResponse>> {
        let beneficiaries = self.uow.beneficiaries().list(search).await?;
        Ok(beneficiaries
            .into_iter()
            .map(BeneficiaryResponse::from)
            .collect())
    }

    async fn get(&self, id: i32) -> AppResult<BeneficiaryResponse> {
        self.uow
            .beneficiaries()
            .find_by_id(id)
            .await?
            .map(BeneficiaryResponse::from)
            .ok_or_not_found("Beneficiary")
    }

    async fn create(
        &self,
        input: BeneficiaryInput,
        picture: Option<UploadedFile>,
    ) -> AppResult<BeneficiaryResponse> {
        let beneficiary_id = self
            .allocate_identifier(&input.first_name, &input.last_name)
            .await?;
        let picture = self.store_photo(picture).await?;

        let created = self
            .uow
            .beneficiaries()
            .create(NewBeneficiary {
                beneficiary_id,
                details: input,
                picture: picture.clone(),
            })
            .await;

        match created {
            Ok(beneficiary) => {
                tracing::info!(
                    beneficiary_id = %beneficiary.beneficiary_id,
                    "Beneficiary registered"
                );
                Ok(beneficiary.into())
            }
            Err(e) => {
                if let Some(file) = picture {
                    self.storage.remove(&file).await;
                }
                Err(e)
            }
        }
    }

    async fn update(
        &self,
        id: i32,
        input: BeneficiaryInput,
        picture: Option<UploadedFile>,
    ) -> AppResult<BeneficiaryResponse> {
        let current = self
            .uow
            .beneficiaries()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Beneficiary")?;

        if input.renames(&current) {
            self.ensure_unique_name(&input.first_name, &input.last_name, Some(id))
                .await?;
        }

        let new_picture = self.store_photo(picture).await?;
        let updated = self
            .uow
            .beneficiaries()
            .update(id, input, new_picture.clone())
            .await;

        match (updated, new_picture) {
            (Ok(beneficiary), Some(_)) => {
                if let Some(old) = current.picture {
                    self.storage.remove(&old).await;
                }
                Ok(beneficiary.into())
            }
            (Ok(beneficiary), None) => Ok(beneficiary.into()),
            (Err(e), new_picture) => {
                if let Some(file) = new_picture {
                    self.storage.remove(&file).await;
                }
                Err(e)
            }
        }
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let (beneficiary, removed) = with_transaction!(self.uow, |ctx| {
            let repo = ctx.beneficiaries();
            let beneficiary = repo.find_by_id(id).await?.ok_or_not_found("Beneficiary")?;
            let removed = repo.delete_dependents(&beneficiary.beneficiary_id).await?;
            repo.delete(id).await?;
            Ok((beneficiary, removed))
        })?;

        let mut files = removed.survey_pictures;
        files.extend(beneficiary.picture);
        let orphaned_files = self.storage.remove_all(&files).await;

        tracing::info!(
            beneficiary_id = %beneficiary.beneficiary_id,
            seedlings = removed.seedlings,
            surveys = removed.surveys,
            farm_plots = removed.farm_plots,
            files = files.len(),
            orphaned_files,
            "Beneficiary deleted"
        );
        Ok(())
    }
}
