//! Dashboard statistics service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::DashboardStats;
use crate::errors::AppResult;
use crate::infra::{totals_from, UnitOfWork};

#[async_trait]
pub trait StatisticsService: Send + Sync {
    async fn dashboard(&self) -> AppResult<DashboardStats>;
}

pub struct StatisticsReporter<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StatisticsReporter<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> StatisticsService for StatisticsReporter<U> {
    async fn dashboard(&self) -> AppResult<DashboardStats> {
        let repo = self.uow.statistics();
        let (counts, seedlings, crops, genders, municipalities) = tokio::try_join!(
            repo.counts(),
            repo.seedling_sums(),
            repo.crop_sums(),
            repo.gender_breakdown(),
            repo.municipality_breakdown(),
        )?;

        Ok(DashboardStats::new(
            totals_from(counts, seedlings, crops),
            genders,
            municipalities,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GenderCount, MunicipalityCount};
    use crate::errors::AppError;
    use crate::infra::MockStatisticsRepository;
    use crate::services::test_support::TestUow;

    fn reporter(repo: MockStatisticsRepository) -> StatisticsReporter<TestUow> {
        StatisticsReporter::new(Arc::new(TestUow::new().with_statistics(repo)))
    }

    fn counting(repo: &mut MockStatisticsRepository) {
        repo.expect_counts().returning(|| Ok((4, 3, 2)));
        repo.expect_seedling_sums().returning(|| Ok((500, 420, 2.345)));
        repo.expect_crop_sums().returning(|| Ok((90, 10)));
    }

    #[tokio::test]
    async fn test_dashboard_combines_aggregates() {
        let mut repo = MockStatisticsRepository::new();
        counting(&mut repo);
        repo.expect_gender_breakdown().returning(|| {
            Ok(vec![
                GenderCount { gender: "female".into(), count: 3 },
                GenderCount { gender: "male".into(), count: 1 },
            ])
        });
        repo.expect_municipality_breakdown().returning(|| {
            Ok(vec![
                MunicipalityCount { municipality: "Bay".into(), count: 1 },
                MunicipalityCount { municipality: "Los Baños".into(), count: 3 },
            ])
        });

        let stats = reporter(repo).dashboard().await.unwrap();
        assert_eq!(stats.total_beneficiaries, 4);
        assert_eq!(stats.total_farm_plots, 3);
        assert_eq!(stats.total_surveys, 2);
        assert_eq!(stats.total_seedlings_planted, 420);
        assert_eq!(stats.total_hectares, 2.345);
        assert_eq!(stats.survival_rate, 90.0);
        assert_eq!(stats.beneficiaries_by_municipality[0].municipality, "Los Baños");
    }

    #[tokio::test]
    async fn test_dashboard_fails_when_any_query_fails() {
        let mut repo = MockStatisticsRepository::new();
        counting(&mut repo);
        repo.expect_gender_breakdown()
            .returning(|| Err(AppError::internal("boom")));
        repo.expect_municipality_breakdown().returning(|| Ok(vec![]));

        assert!(reporter(repo).dashboard().await.is_err());
    }
}
