//! Dashboard aggregates.

use serde::Serialize;
use utoipa::ToSchema;

/// Alive crops as a percentage of all surveyed crops, two decimals.
///
/// Returns 0 when no crops have been surveyed.
pub fn survival_rate(alive: i64, dead: i64) -> f64 {
    let total = alive + dead;
    if total <= 0 {
        return 0.0;
    }
    let rate = alive as f64 / total as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GenderCount {
    #[schema(example = "female")]
    pub gender: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MunicipalityCount {
    #[schema(example = "Los Baños")]
    pub municipality: String,
    pub count: i64,
}

/// Raw sums read from the store; missing aggregates are already zero
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Totals {
    pub beneficiaries: i64,
    pub farm_plots: i64,
    pub surveys: i64,
    pub seedlings_received: i64,
    pub seedlings_planted: i64,
    pub hectares: f64,
    pub alive_crops: i64,
    pub dead_crops: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_beneficiaries: i64,
    pub total_farm_plots: i64,
    pub total_surveys: i64,
    pub total_seedlings_received: i64,
    pub total_seedlings_planted: i64,
    pub total_hectares: f64,
    pub total_alive_crops: i64,
    pub total_dead_crops: i64,
    #[schema(example = 92.5)]
    pub survival_rate: f64,
    pub gender_breakdown: Vec<GenderCount>,
    pub beneficiaries_by_municipality: Vec<MunicipalityCount>,
}

impl DashboardStats {
    pub fn new(
        totals: Totals,
        gender_breakdown: Vec<GenderCount>,
        mut beneficiaries_by_municipality: Vec<MunicipalityCount>,
    ) -> Self {
        beneficiaries_by_municipality.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.municipality.cmp(&b.municipality))
        });

        Self {
            total_beneficiaries: totals.beneficiaries,
            total_farm_plots: totals.farm_plots,
            total_surveys: totals.surveys,
            total_seedlings_received: totals.seedlings_received,
            total_seedlings_planted: totals.seedlings_planted,
            total_hectares: totals.hectares,
            total_alive_crops: totals.alive_crops,
            total_dead_crops: totals.dead_crops,
            survival_rate: survival_rate(totals.alive_crops, totals.dead_crops),
            gender_breakdown,
            beneficiaries_by_municipality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survival_rate_rounding() {
        assert_eq!(survival_rate(90, 10), 90.0);
        assert_eq!(survival_rate(2, 1), 66.67);
        assert_eq!(survival_rate(0, 5), 0.0);
    }

    #[test]
    fn test_survival_rate_without_crops() {
        assert_eq!(survival_rate(0, 0), 0.0);
    }

    #[test]
    fn test_hectares_reported_unrounded() {
        let stats = DashboardStats::new(
            Totals {
                hectares: 0.125 + 0.333,
                ..Totals::default()
            },
            vec![],
            vec![],
        );
        assert_eq!(stats.total_hectares, 0.125 + 0.333);
    }

    #[test]
    fn test_municipalities_sorted_by_count() {
        let stats = DashboardStats::new(
            Totals::default(),
            vec![],
            vec![
                MunicipalityCount {
                    municipality: "Bay".to_string(),
                    count: 1,
                },
                MunicipalityCount {
                    municipality: "Calamba".to_string(),
                    count: 4,
                },
                MunicipalityCount {
                    municipality: "Alaminos".to_string(),
                    count: 1,
                },
            ],
        );

        let order: Vec<_> = stats
            .beneficiaries_by_municipality
            .iter()
            .map(|m| m.municipality.as_str())
            .collect();
        assert_eq!(order, ["Calamba", "Alaminos", "Bay"]);
        assert_eq!(stats.survival_rate, 0.0);
    }
}
