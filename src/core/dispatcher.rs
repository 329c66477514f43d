use crate::core::builder::FeatureVectorBuilder;
use crate::core::registry::ModelRegistry;
use crate::domain::model::{Condition, Outcome, RawFields, RecommendationKey};
use crate::domain::recommendations::recommendation;
use crate::utils::error::{PredictError, Result};
use std::sync::Arc;

/// Shell 每次按下預測時呼叫的唯一入口。無狀態、不重試。
#[derive(Debug, Clone)]
pub struct RiskDispatcher {
    registry: Arc<ModelRegistry>,
}

impl RiskDispatcher {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn predict(&self, condition: Condition, raw_fields: &RawFields) -> Result<Outcome> {
        let vector = FeatureVectorBuilder::build(condition, raw_fields)?;

        let label = self
            .registry
            .classify(condition, &vector)
            .inspect_err(|e| {
                if let PredictError::InvalidVector { .. } = e {
                    tracing::error!("🐛 Feature table and model disagree: {}", e);
                }
            })?;

        let at_risk = condition.polarity().is_risk(label);
        let recommendation = recommendation(RecommendationKey { condition, at_risk });

        tracing::info!(
            condition = %condition,
            label = %label,
            at_risk,
            "Prediction completed"
        );

        Ok(Outcome {
            condition,
            label,
            at_risk,
            recommendation,
        })
    }
}
