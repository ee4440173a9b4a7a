//! Farm plot service - CRUD over plot boundaries.

use async_trait::async_trait;
use std::sync::Arc;

use super::owner::require_owner;
use crate::domain::{ensure_boundary, FarmPlotData, FarmPlotInput, FarmPlotResponse, OwnerSummary};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait FarmPlotService: Send + Sync {
    async fn list(&self, beneficiary_id: Option<String>) -> AppResult<Vec<FarmPlotResponse>>;

    async fn get(&self, id: i32) -> AppResult<FarmPlotResponse>;

    async fn create(&self, input: FarmPlotInput) -> AppResult<FarmPlotResponse>;

    async fn update(&self, id: i32, input: FarmPlotInput) -> AppResult<FarmPlotResponse>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct FarmPlotManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FarmPlotManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn checked(&self, input: FarmPlotInput) -> AppResult<(FarmPlotData, OwnerSummary)> {
        ensure_boundary(&input.coordinates)?;
        let owner = require_owner(self.uow.as_ref(), &input.beneficiary_id).await?;
        Ok((input.into(), OwnerSummary::from(Some(&owner))))
    }
}

#[async_trait]
impl<U: UnitOfWork> FarmPlotService for FarmPlotManager<U> {
    async fn list(&self, beneficiary_id: Option<String>) -> AppResult<Vec<FarmPlotResponse>> {
        let rows = self.uow.farm_plots().list(beneficiary_id).await?;
        Ok(rows
            .into_iter()
            .map(|(plot, owner)| FarmPlotResponse::new(plot, owner.as_ref().into()))
            .collect())
    }

    async fn get(&self, id: i32) -> AppResult<FarmPlotResponse> {
        let (plot, owner) = self
            .uow
            .farm_plots()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Farm plot")?;
        Ok(FarmPlotResponse::new(plot, owner.as_ref().into()))
    }

    async fn create(&self, input: FarmPlotInput) -> AppResult<FarmPlotResponse> {
        let (data, owner) = self.checked(input).await?;
        let plot = self.uow.farm_plots().create(data).await?;
        tracing::debug!(plot_id = plot.id, vertices = plot.coordinates.len(), "Farm plot saved");
        Ok(FarmPlotResponse::new(plot, owner))
    }

    async fn update(&self, id: i32, input: FarmPlotInput) -> AppResult<FarmPlotResponse> {
        let (data, owner) = self.checked(input).await?;
        let plot = self.uow.farm_plots().update(id, data).await?;
        Ok(FarmPlotResponse::new(plot, owner))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.uow.farm_plots().delete(id).await
    }
}
