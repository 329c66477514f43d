use crate::core::artifact::Model;
use crate::core::{ConfigProvider, Storage};
use crate::domain::features::feature_spec;
use crate::domain::model::{Condition, FeatureVector, Label};
use crate::domain::ports::Classifier;
use crate::utils::error::{PredictError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// 四個模型的唯一擁有者。
///
/// 啟動時一次載入，之後不再變動；可透過 `Arc` 在多個請求間共享，不需要鎖。
#[derive(Debug)]
pub struct ModelRegistry {
    heart: Arc<dyn Classifier>,
    brain_stroke: Arc<dyn Classifier>,
    lungs_recovery: Arc<dyn Classifier>,
    kidney: Arc<dyn Classifier>,
}

impl ModelRegistry {
    /// 載入全部模型，任何一個失敗就整體失敗
    pub async fn load<S: Storage, C: ConfigProvider>(storage: &S, config: &C) -> Result<Self> {
        tracing::info!("📦 Loading models from: {}", config.model_dir());

        let (heart, brain, lungs, kidney) = tokio::try_join!(
            Self::load_model(storage, config, Condition::Heart),
            Self::load_model(storage, config, Condition::BrainStroke),
            Self::load_model(storage, config, Condition::LungsRecovery),
            Self::load_model(storage, config, Condition::Kidney),
        )?;

        tracing::info!("✅ Loaded {} models", Condition::ALL.len());
        Ok(Self {
            heart: Arc::new(heart),
            brain_stroke: Arc::new(brain),
            lungs_recovery: Arc::new(lungs),
            kidney: Arc::new(kidney),
        })
    }

    pub async fn load_model<S: Storage, C: ConfigProvider>(
        storage: &S,
        config: &C,
        condition: Condition,
    ) -> Result<Model> {
        let file = config.artifact_file(condition);
        let path = storage.describe(file);
        tracing::debug!("Loading {} model from {}", condition, path);

        let bytes = storage
            .read_file(file)
            .await
            .map_err(|e| PredictError::ArtifactLoad {
                condition,
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let model = Model::from_slice(condition, &bytes).map_err(|e| {
            tracing::error!("❌ Rejected {} model artifact {}: {}", condition, path, e);
            PredictError::ArtifactLoad {
                condition,
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;

        tracing::debug!(
            "Loaded {} model ({}) from {}",
            condition,
            model.estimator().kind(),
            path
        );
        Ok(model)
    }

    /// 以任意分類器建立 Registry；四種疾病都必須提供
    pub fn from_classifiers(mut classifiers: HashMap<Condition, Arc<dyn Classifier>>) -> Result<Self> {
        let mut take = |condition: Condition| {
            classifiers
                .remove(&condition)
                .ok_or_else(|| PredictError::ArtifactLoad {
                    condition,
                    path: "<in-memory>".to_string(),
                    reason: "no classifier registered".to_string(),
                })
        };

        Ok(Self {
            heart: take(Condition::Heart)?,
            brain_stroke: take(Condition::BrainStroke)?,
            lungs_recovery: take(Condition::LungsRecovery)?,
            kidney: take(Condition::Kidney)?,
        })
    }

    fn model(&self, condition: Condition) -> &dyn Classifier {
        match condition {
            Condition::Heart => self.heart.as_ref(),
            Condition::BrainStroke => self.brain_stroke.as_ref(),
            Condition::LungsRecovery => self.lungs_recovery.as_ref(),
            Condition::Kidney => self.kidney.as_ref(),
        }
    }

    pub fn classify(&self, condition: Condition, vector: &FeatureVector) -> Result<Label> {
        let expected = feature_spec(condition).len();
        if vector.condition() != condition || vector.len() != expected {
            return Err(PredictError::InvalidVector {
                condition,
                expected,
                actual: vector.len(),
            });
        }

        let label = self.model(condition).classify(vector);
        tracing::debug!("{} model returned label {}", condition, label);
        Ok(label)
    }

    /// Registry 建立後四種疾病都一定有模型
    pub fn conditions(&self) -> impl Iterator<Item = Condition> {
        Condition::ALL.into_iter()
    }
}
