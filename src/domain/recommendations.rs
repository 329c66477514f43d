use crate::domain::model::{Condition, Recommendation, RecommendationKey};

static HEART_AT_RISK: Recommendation = Recommendation {
    headline: "Heart Disease Detected",
    advice: &[
        "Regular exercise",
        "Maintain a balanced diet",
        "Reduce cholesterol intake",
        "Avoid smoking & alcohol",
        "Regular health check-ups",
    ],
};

static HEART_CLEAR: Recommendation = Recommendation {
    headline: "No Heart Disease Detected",
    advice: &["Keep maintaining a healthy lifestyle with regular exercise and a balanced diet."],
};

static BRAIN_STROKE_AT_RISK: Recommendation = Recommendation {
    headline: "Brain Stroke Risk Detected",
    advice: &[
        "Monitor and control blood pressure",
        "Stay physically active",
        "Maintain healthy weight",
        "Quit smoking",
        "Eat more fruits and vegetables",
    ],
};

static BRAIN_STROKE_CLEAR: Recommendation = Recommendation {
    headline: "No Brain Stroke Detected",
    advice: &["Continue with a healthy diet and regular exercise to prevent risks."],
};

static LUNGS_AT_RISK: Recommendation = Recommendation {
    headline: "Lungs Not Fully Recovered",
    advice: &[
        "Avoid smoking",
        "Follow prescribed medications",
        "Practice breathing exercises",
        "Eat antioxidant-rich foods",
    ],
};

static LUNGS_CLEAR: Recommendation = Recommendation {
    headline: "Lungs Recovery Detected",
    advice: &[
        "Maintain healthy breathing with yoga, avoid polluted areas, and continue medical follow-ups.",
    ],
};

static KIDNEY_AT_RISK: Recommendation = Recommendation {
    headline: "Chronic Kidney Disease Detected",
    advice: &[
        "Limit salt intake",
        "Stay hydrated",
        "Manage blood pressure and diabetes",
        "Avoid overuse of painkillers",
        "Consult nephrologist regularly",
    ],
};

static KIDNEY_CLEAR: Recommendation = Recommendation {
    headline: "No Kidney Disease Detected",
    advice: &["Keep kidneys healthy by drinking enough water and eating a balanced diet."],
};

/// 依 (疾病, 是否有風險) 查表取得固定建議文字
pub fn recommendation(key: RecommendationKey) -> &'static Recommendation {
    match (key.condition, key.at_risk) {
        (Condition::Heart, true) => &HEART_AT_RISK,
        (Condition::Heart, false) => &HEART_CLEAR,
        (Condition::BrainStroke, true) => &BRAIN_STROKE_AT_RISK,
        (Condition::BrainStroke, false) => &BRAIN_STROKE_CLEAR,
        (Condition::LungsRecovery, true) => &LUNGS_AT_RISK,
        (Condition::LungsRecovery, false) => &LUNGS_CLEAR,
        (Condition::Kidney, true) => &KIDNEY_AT_RISK,
        (Condition::Kidney, false) => &KIDNEY_CLEAR,
    }
}
