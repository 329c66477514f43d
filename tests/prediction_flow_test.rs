use anyhow::Result;
use disease_risk::domain::features::feature_spec;
use disease_risk::domain::ports::ConfigProvider;
use disease_risk::{
    Condition, Label, LocalStorage, ModelConfig, ModelRegistry, PredictError, RawFields, RawValue,
    RiskDispatcher,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn feature_names(condition: Condition) -> Vec<&'static str> {
    feature_spec(condition).names().collect()
}

/// 只看第一個特徵的邏輯迴歸：x0 * weight + intercept
fn first_feature_artifact(condition: Condition, weight: f64, intercept: f64) -> Value {
    let mut coefficients = vec![0.0; feature_spec(condition).len()];
    coefficients[0] = weight;
    json!({
        "condition": condition,
        "features": feature_names(condition),
        "estimator": {
            "kind": "logistic_regression",
            "coefficients": coefficients,
            "intercept": intercept
        }
    })
}

/// 一律回傳同一個 label 的單葉決策樹
fn constant_artifact(condition: Condition, label: Label) -> Value {
    let probability = if label == Label::Positive { 1.0 } else { 0.0 };
    json!({
        "condition": condition,
        "features": feature_names(condition),
        "estimator": {
            "kind": "decision_tree",
            "nodes": [{"type": "leaf", "probability": probability}]
        }
    })
}

fn write_artifact(dir: &Path, config: &ModelConfig, condition: Condition, artifact: &Value) -> Result<()> {
    std::fs::write(
        dir.join(config.artifact_file(condition)),
        serde_json::to_vec_pretty(artifact)?,
    )?;
    Ok(())
}

fn write_all(dir: &Path, config: &ModelConfig, label: Label) -> Result<()> {
    for condition in Condition::ALL {
        write_artifact(dir, config, condition, &constant_artifact(condition, label))?;
    }
    Ok(())
}

async fn load_dispatcher(dir: &TempDir, config: &ModelConfig) -> disease_risk::Result<RiskDispatcher> {
    let storage = LocalStorage::new(dir.path().to_string_lossy().into_owned());
    let registry = ModelRegistry::load(&storage, config).await?;
    Ok(RiskDispatcher::new(Arc::new(registry)))
}

fn heart_scenario() -> RawFields {
    [
        ("age", 63.0),
        ("sex", 1.0),
        ("cp", 3.0),
        ("trestbps", 145.0),
        ("chol", 233.0),
        ("fbs", 1.0),
        ("restecg", 0.0),
        ("thalach", 150.0),
        ("exang", 0.0),
        ("oldpeak", 2.3),
        ("slope", 0.0),
        ("ca", 0.0),
        ("thal", 1.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), RawValue::Number(v)))
    .collect()
}

fn minimal_fields(condition: Condition) -> RawFields {
    feature_spec(condition)
        .fields
        .iter()
        .map(|f| (f.name.to_string(), RawValue::Number(f.min)))
        .collect()
}

#[tokio::test]
async fn test_heart_scenario_uses_raw_label() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = ModelConfig::new(temp_dir.path().to_string_lossy());
    write_all(temp_dir.path(), &config, Label::Negative)?;
    // age > 55 → 陽性
    write_artifact(
        temp_dir.path(),
        &config,
        Condition::Heart,
        &first_feature_artifact(Condition::Heart, 1.0, -55.0),
    )?;

    let dispatcher = load_dispatcher(&temp_dir, &config).await?;

    let outcome = dispatcher.predict(Condition::Heart, &heart_scenario())?;
    assert_eq!(outcome.label, Label::Positive);
    assert!(outcome.at_risk);
    assert_eq!(outcome.recommendation.headline, "Heart Disease Detected");

    let mut younger = heart_scenario();
    younger.insert("age".to_string(), RawValue::Number(40.0));
    let outcome = dispatcher.predict(Condition::Heart, &younger)?;
    assert_eq!(outcome.label, Label::Negative);
    assert!(!outcome.at_risk);

    Ok(())
}

#[tokio::test]
async fn test_heart_vector_order_reaches_model() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = ModelConfig::new(temp_dir.path().to_string_lossy());
    write_all(temp_dir.path(), &config, Label::Negative)?;

    // 只有 oldpeak (第 10 個特徵) 的權重，若順序錯置則結果會不同
    let mut coefficients = vec![0.0; 13];
    coefficients[9] = 1.0;
    let artifact = json!({
        "condition": "heart",
        "features": feature_names(Condition::Heart),
        "estimator": {"kind": "linear_svm", "coefficients": coefficients, "intercept": -2.0}
    });
    write_artifact(temp_dir.path(), &config, Condition::Heart, &artifact)?;

    let dispatcher = load_dispatcher(&temp_dir, &config).await?;
    let outcome = dispatcher.predict(Condition::Heart, &heart_scenario())?;
    assert_eq!(outcome.label, Label::Positive);

    let mut low_peak = heart_scenario();
    low_peak.insert("oldpeak".to_string(), RawValue::from("1.5"));
    let outcome = dispatcher.predict(Condition::Heart, &low_peak)?;
    assert_eq!(outcome.label, Label::Negative);

    Ok(())
}

#[tokio::test]
async fn test_lungs_positive_label_is_not_at_risk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = ModelConfig::new(temp_dir.path().to_string_lossy());
    write_all(temp_dir.path(), &config, Label::Positive)?;

    let dispatcher = load_dispatcher(&temp_dir, &config).await?;

    let lungs = dispatcher.predict(Condition::LungsRecovery, &minimal_fields(Condition::LungsRecovery))?;
    assert_eq!(lungs.label, Label::Positive);
    assert!(!lungs.at_risk);
    assert_eq!(lungs.recommendation.headline, "Lungs Recovery Detected");

    for condition in [Condition::Heart, Condition::BrainStroke, Condition::Kidney] {
        let outcome = dispatcher.predict(condition, &minimal_fields(condition))?;
        assert!(outcome.at_risk, "{} should be at risk on label 1", condition);
    }

    Ok(())
}

#[tokio::test]
async fn test_lungs_negative_label_is_at_risk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = ModelConfig::new(temp_dir.path().to_string_lossy());
    write_all(temp_dir.path(), &config, Label::Negative)?;

    let dispatcher = load_dispatcher(&temp_dir, &config).await?;
    let outcome = dispatcher.predict(Condition::LungsRecovery, &minimal_fields(Condition::LungsRecovery))?;
    assert!(outcome.at_risk);
    assert_eq!(outcome.recommendation.headline, "Lungs Not Fully Recovered");

    Ok(())
}

#[tokio::test]
async fn test_missing_age_for_every_condition() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = ModelConfig::new(temp_dir.path().to_string_lossy());
    write_all(temp_dir.path(), &config, Label::Positive)?;
    let dispatcher = load_dispatcher(&temp_dir, &config).await?;

    for condition in [Condition::Heart, Condition::BrainStroke, Condition::LungsRecovery] {
        let mut fields = minimal_fields(condition);
        fields.remove("age");
        let err = dispatcher.predict(condition, &fields).unwrap_err();
        assert!(
            matches!(err, PredictError::MissingField { ref field } if field == "age"),
            "{}: {:?}",
            condition,
            err
        );
        assert!(err.is_recoverable());
    }

    Ok(())
}

#[tokio::test]
async fn test_repeated_predictions_are_deterministic() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = ModelConfig::new(temp_dir.path().to_string_lossy());
    write_all(temp_dir.path(), &config, Label::Negative)?;
    write_artifact(
        temp_dir.path(),
        &config,
        Condition::Kidney,
        &first_feature_artifact(Condition::Kidney, 0.05, -6.0),
    )?;

    let dispatcher = load_dispatcher(&temp_dir, &config).await?;
    let mut fields = minimal_fields(Condition::Kidney);
    fields.insert("bp".to_string(), RawValue::Number(150.0));

    let first = dispatcher.predict(Condition::Kidney, &fields)?;
    for _ in 0..20 {
        let again = dispatcher.predict(Condition::Kidney, &fields)?;
        assert_eq!(again.label, first.label);
        assert_eq!(again.at_risk, first.at_risk);
    }
    // 0.05 * 150 - 6 = 1.5 > 0
    assert!(first.at_risk);

    Ok(())
}

#[tokio::test]
async fn test_missing_artifact_prevents_startup() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = ModelConfig::new(temp_dir.path().to_string_lossy());
    write_all(temp_dir.path(), &config, Label::Positive)?;
    std::fs::remove_file(temp_dir.path().join("brain.json"))?;

    let err = load_dispatcher(&temp_dir, &config).await.unwrap_err();
    match err {
        PredictError::ArtifactLoad { condition, path, .. } => {
            assert_eq!(condition, Condition::BrainStroke);
            assert!(path.ends_with("brain.json"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn test_corrupt_artifact_prevents_startup() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = ModelConfig::new(temp_dir.path().to_string_lossy());
    write_all(temp_dir.path(), &config, Label::Positive)?;
    std::fs::write(temp_dir.path().join("lungs.json"), b"not json")?;

    let err = load_dispatcher(&temp_dir, &config).await.unwrap_err();
    assert!(matches!(
        err,
        PredictError::ArtifactLoad {
            condition: Condition::LungsRecovery,
            ..
        }
    ));
    assert!(!err.is_recoverable());

    Ok(())
}

#[tokio::test]
async fn test_kidney_artifact_in_form_order_mismatch_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = ModelConfig::new(temp_dir.path().to_string_lossy());
    write_all(temp_dir.path(), &config, Label::Positive)?;

    // albumin 與 specific gravity 位置互換的模型不能默默載入
    let artifact = json!({
        "condition": "kidney",
        "features": ["bp", "al", "su", "rbc", "sg", "bu", "sc", "sod", "pot", "hemo", "wbcc", "rbcc", "htn"],
        "estimator": {"kind": "decision_tree", "nodes": [{"type": "leaf", "probability": 1.0}]}
    });
    write_artifact(temp_dir.path(), &config, Condition::Kidney, &artifact)?;

    let err = load_dispatcher(&temp_dir, &config).await.unwrap_err();
    match err {
        PredictError::ArtifactLoad {
            condition, reason, ..
        } => {
            assert_eq!(condition, Condition::Kidney);
            assert!(reason.contains("position 1"), "{}", reason);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn test_custom_artifact_names() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut config = ModelConfig::new(temp_dir.path().to_string_lossy());
    config.artifacts.heart = "heart_rf.json".to_string();
    write_all(temp_dir.path(), &config, Label::Negative)?;

    let forest = json!({
        "condition": "heart",
        "features": feature_names(Condition::Heart),
        "estimator": {
            "kind": "random_forest",
            "trees": [
                {"nodes": [{"type": "leaf", "probability": 0.8}]},
                {"nodes": [{"type": "leaf", "probability": 0.6}]}
            ]
        }
    });
    write_artifact(temp_dir.path(), &config, Condition::Heart, &forest)?;

    let dispatcher = load_dispatcher(&temp_dir, &config).await?;
    let outcome = dispatcher.predict(Condition::Heart, &heart_scenario())?;
    assert!(outcome.at_risk);
    assert!(temp_dir.path().join("heart_rf.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_dispatcher_is_shared_across_tasks() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = ModelConfig::new(temp_dir.path().to_string_lossy());
    write_all(temp_dir.path(), &config, Label::Positive)?;
    let dispatcher = load_dispatcher(&temp_dir, &config).await?;

    let mut handles = Vec::new();
    for condition in Condition::ALL {
        let dispatcher = dispatcher.clone();
        handles.push(tokio::spawn(async move {
            dispatcher.predict(condition, &minimal_fields(condition))
        }));
    }

    for handle in handles {
        let outcome = handle.await??;
        assert_eq!(outcome.label, Label::Positive);
    }

    Ok(())
}
