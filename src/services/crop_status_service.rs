//! Crop status service - CRUD over surveys and their images.

use async_trait::async_trait;
use std::sync::Arc;

use super::owner::require_owner;
use crate::domain::{CropStatusData, CropStatusInput, CropStatusResponse, OwnerSummary};
use crate::errors::{AppResult, OptionExt};
use crate::infra::{FileStore, UnitOfWork, UploadedFile};

const PICTURE_KIND: &str = "crop";

#[async_trait]
pub trait CropStatusService: Send + Sync {
    async fn list(&self, beneficiary_id: Option<String>) -> AppResult<Vec<CropStatusResponse>>;

    async fn get(&self, id: i32) -> AppResult<CropStatusResponse>;

    async fn create(
        &self,
        input: CropStatusInput,
        pictures: Vec<UploadedFile>,
    ) -> AppResult<CropStatusResponse>;

    /// Keep the pictures listed in `existingPictures` (all when absent),
    /// append new uploads and delete the rest.
    async fn update(
        &self,
        id: i32,
        input: CropStatusInput,
        pictures: Vec<UploadedFile>,
    ) -> AppResult<CropStatusResponse>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct CropStatusManager<U: UnitOfWork> {
    uow: Arc<U>,
    storage: FileStore,
}

impl<U: UnitOfWork> CropStatusManager<U> {
    pub fn new(uow: Arc<U>, storage: FileStore) -> Self {
        Self { uow, storage }
    }
}

#[async_trait]
impl<U: UnitOfWork> CropStatusService for CropStatusManager<U> {
    async fn list(&self, beneficiary_id: Option<String>) -> AppResult<Vec<CropStatusResponse>> {
        let rows = self.uow.crop_statuses().list(beneficiary_id).await?;
        Ok(rows
            .into_iter()
            .map(|(record, owner)| CropStatusResponse::new(record, owner.as_ref().into()))
            .collect())
    }

    async fn get(&self, id: i32) -> AppResult<CropStatusResponse> {
        let (record, owner) = self
            .uow
            .crop_statuses()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Crop status record")?;
        Ok(CropStatusResponse::new(record, owner.as_ref().into()))
    }

    async fn create(
        &self,
        input: CropStatusInput,
        pictures: Vec<UploadedFile>,
    ) -> AppResult<CropStatusResponse> {
        let owner = require_owner(self.uow.as_ref(), &input.beneficiary_id).await?;
        let stored = self.storage.save_all(PICTURE_KIND, &pictures).await?;

        let data = CropStatusData::new(input, stored.clone());
        match self.uow.crop_statuses().create(data).await {
            Ok(record) => Ok(CropStatusResponse::new(
                record,
                OwnerSummary::from(Some(&owner)),
            )),
            Err(e) => {
                self.storage.remove_all(&stored).await;
                Err(e)
            }
        }
    }

    async fn update(
        &self,
        id: i32,
        input: CropStatusInput,
        pictures: Vec<UploadedFile>,
    ) -> AppResult<CropStatusResponse> {
        let (current, _) = self
            .uow
            .crop_statuses()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Crop status record")?;
        let owner = require_owner(self.uow.as_ref(), &input.beneficiary_id).await?;

        // Only files already attached to this survey can be kept
        let kept: Vec<String> = match input.kept_pictures()? {
            Some(requested) => current
                .pictures
                .iter()
                .filter(|name| requested.contains(name))
                .cloned()
                .collect(),
            None => current.pictures.clone(),
        };
        let dropped: Vec<String> = current
            .pictures
            .iter()
            .filter(|name| !kept.contains(name))
            .cloned()
            .collect();

        let uploaded = self.storage.save_all(PICTURE_KIND, &pictures).await?;
        let all_pictures = kept.into_iter().chain(uploaded.iter().cloned()).collect();

        let data = CropStatusData::new(input, all_pictures);
        match self.uow.crop_statuses().update(id, data).await {
            Ok(record) => {
                self.storage.remove_all(&dropped).await;
                Ok(CropStatusResponse::new(
                    record,
                    OwnerSummary::from(Some(&owner)),
                ))
            }
            Err(e) => {
                self.storage.remove_all(&uploaded).await;
                Err(e)
            }
        }
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let (record, _) = self
            .uow
            .crop_statuses()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Crop status record")?;

        self.uow.crop_statuses().delete(id).await?;
        self.storage.remove_all(&record.pictures).await;
        Ok(())
    }
}
