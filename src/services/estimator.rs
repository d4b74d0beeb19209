use crate::entities::job::{JobType, MaterialLineItem, MaterialList};
use crate::errors::ServiceError;
use crate::quoting;
use async_trait::async_trait;
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EstimateRequest {
    /// Free-form job type; unrecognized values fall back to
    /// Residential Service rather than failing.
    pub job_type: String,
    #[serde(default = "default_photo_count")]
    pub photo_count: i32,
}

fn default_photo_count() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EstimateResponse {
    pub materials: MaterialList,
    pub labor_hours: Decimal,
    pub confidence: f64,
}

/// Produces a materials-and-labor estimate for a job type. The production
/// binary wires in [`MockEstimator`]; the trait is the seam for a real
/// model-backed implementation later.
#[async_trait]
pub trait Estimator: Send + Sync {
    async fn estimate(&self, request: EstimateRequest) -> Result<EstimateResponse, ServiceError>;
}

/// Canned estimator: per-type material templates with slight random
/// variation so repeated estimates look like independent assessments.
#[derive(Debug, Default, Clone)]
pub struct MockEstimator;

type MaterialTemplate = (&'static str, i32, Decimal);

fn material_template(job_type: JobType) -> Vec<MaterialTemplate> {
    match job_type {
        JobType::ResidentialService => vec![
            ("20A Circuit Breaker", 2, dec!(12.99)),
            ("12/2 Romex Wire (100ft)", 1, dec!(89.99)),
            ("Outlet Receptacle", 4, dec!(3.49)),
            ("Wire Nuts (box)", 1, dec!(8.99)),
            ("Electrical Box", 4, dec!(2.99)),
        ],
        JobType::PanelUpgrade => vec![
            ("200A Main Panel", 1, dec!(289.99)),
            ("200A Main Breaker", 1, dec!(89.99)),
            ("Grounding Rod (8ft)", 2, dec!(18.99)),
            ("#4 Copper Ground Wire (25ft)", 1, dec!(124.99)),
            ("Panel Cover", 1, dec!(34.99)),
            ("Wire Connectors Kit", 1, dec!(24.99)),
        ],
        JobType::EvCharger => vec![
            ("Level 2 EV Charger (48A)", 1, dec!(549.99)),
            ("50A Circuit Breaker", 1, dec!(34.99)),
            ("6/3 Wire (50ft)", 1, dec!(189.99)),
            ("NEMA 14-50 Outlet", 1, dec!(24.99)),
            ("Weatherproof Box", 1, dec!(19.99)),
        ],
        JobType::Commercial => vec![
            ("Commercial Panel 400A", 1, dec!(899.99)),
            ("LED Panel Light (4x2)", 8, dec!(64.99)),
            ("EMT Conduit 3/4\" (10ft)", 12, dec!(8.99)),
            ("Conduit Fittings Kit", 2, dec!(45.99)),
            ("Wire #10 THHN (500ft)", 2, dec!(189.99)),
            ("Commercial Outlets (20A)", 12, dec!(12.99)),
        ],
    }
}

fn base_labor_hours(job_type: JobType) -> f64 {
    match job_type {
        JobType::ResidentialService => 4.0,
        JobType::PanelUpgrade => 8.0,
        JobType::EvCharger => 5.0,
        JobType::Commercial => 16.0,
    }
}

#[async_trait]
impl Estimator for MockEstimator {
    #[instrument(skip(self))]
    async fn estimate(&self, request: EstimateRequest) -> Result<EstimateResponse, ServiceError> {
        let job_type =
            JobType::from_str(&request.job_type).unwrap_or(JobType::ResidentialService);

        let mut rng = rand::thread_rng();

        let lines = material_template(job_type)
            .into_iter()
            .map(|(name, quantity, unit_cost)| {
                let quantity = (quantity + rng.gen_range(-1..=2)).max(1);
                quoting::normalize_line(MaterialLineItem {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    quantity,
                    unit_cost,
                    line_total: Decimal::ZERO,
                })
            })
            .collect();

        let labor = base_labor_hours(job_type) + rng.gen_range(-1.0..2.0);
        let labor_hours = Decimal::from_f64(labor)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO)
            .round_dp(1);

        let confidence = ((0.85 + rng.gen_range(0.0f64..0.12)) * 100.0).round() / 100.0;

        info!(job_type = %job_type, %labor_hours, confidence, "Generated estimate");

        Ok(EstimateResponse {
            materials: MaterialList(lines),
            labor_hours,
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_type_uses_its_template() {
        let estimator = MockEstimator;
        let response = estimator
            .estimate(EstimateRequest {
                job_type: "EV Charger".into(),
                photo_count: 1,
            })
            .await
            .unwrap();

        assert_eq!(response.materials.0.len(), 5);
        assert_eq!(response.materials.0[0].name, "Level 2 EV Charger (48A)");
        for line in &response.materials.0 {
            assert!(line.quantity >= 1);
            assert_eq!(
                line.line_total,
                quoting::line_total(line.quantity, line.unit_cost)
            );
        }
    }

    #[tokio::test]
    async fn unknown_type_falls_back_to_residential() {
        let estimator = MockEstimator;
        let response = estimator
            .estimate(EstimateRequest {
                job_type: "Something Else".into(),
                photo_count: 1,
            })
            .await
            .unwrap();

        assert_eq!(response.materials.0.len(), 5);
        assert_eq!(response.materials.0[0].name, "20A Circuit Breaker");
    }

    #[tokio::test]
    async fn estimate_ranges_hold() {
        let estimator = MockEstimator;
        for _ in 0..50 {
            let response = estimator
                .estimate(EstimateRequest {
                    job_type: "Panel Upgrade".into(),
                    photo_count: 3,
                })
                .await
                .unwrap();

            // 8h base, jitter in [-1, 2).
            assert!(response.labor_hours >= dec!(7.0));
            assert!(response.labor_hours <= dec!(10.0));
            assert!(response.confidence >= 0.85);
            assert!(response.confidence <= 0.97);
        }
    }
}
