//! 每個疾病模型的輸入欄位表。
//!
//! 欄位順序必須與模型訓練時的特徵順序完全相同，表格與模型檔是成對的產物：
//! 更動順序或長度就必須重新訓練模型。載入模型時會比對模型檔內的 `features`
//! 清單，順序不符的模型檔會被拒絕。

use crate::domain::model::{Condition, FeatureSpec, FieldSpec};

static HEART_FIELDS: [FieldSpec; 13] = [
    FieldSpec::integer("age", "Age", 1.0, 120.0),
    FieldSpec::integer("sex", "Sex", 0.0, 1.0),
    FieldSpec::integer("cp", "Chest Pain Type (cp)", 0.0, 3.0),
    FieldSpec::integer("trestbps", "Resting Blood Pressure", 50.0, 250.0),
    FieldSpec::integer("chol", "Cholesterol", 100.0, 600.0),
    FieldSpec::integer("fbs", "Fasting Blood Sugar > 120mg/dl", 0.0, 1.0),
    FieldSpec::integer("restecg", "Resting ECG Results", 0.0, 2.0),
    FieldSpec::integer("thalach", "Maximum Heart Rate", 50.0, 250.0),
    FieldSpec::integer("exang", "Exercise Induced Angina", 0.0, 1.0),
    FieldSpec::real("oldpeak", "ST Depression (oldpeak)", 0.0, 10.0),
    FieldSpec::integer("slope", "Slope", 0.0, 2.0),
    FieldSpec::integer("ca", "Number of Major Vessels (ca)", 0.0, 4.0),
    FieldSpec::integer("thal", "Thalassemia (thal)", 0.0, 3.0),
];

static BRAIN_STROKE_FIELDS: [FieldSpec; 10] = [
    FieldSpec::integer("gender", "Gender", 0.0, 1.0),
    FieldSpec::integer("age", "Age", 1.0, 120.0),
    FieldSpec::integer("hypertension", "Hypertension", 0.0, 1.0),
    FieldSpec::integer("heart_disease", "Heart Disease", 0.0, 1.0),
    FieldSpec::integer("ever_married", "Ever Married", 0.0, 1.0),
    FieldSpec::integer("work_type", "Work Type", 0.0, 3.0),
    FieldSpec::integer("residence_type", "Residence Type", 0.0, 1.0),
    FieldSpec::integer("avg_glucose_level", "Average Glucose Level", 50.0, 300.0),
    FieldSpec::integer("bmi", "BMI", 10.0, 60.0),
    FieldSpec::integer("smoking_status", "Smoking Status", 0.0, 2.0),
];

// 表單上吸菸欄位排在前面，但模型的最後一個特徵才是它
static LUNGS_RECOVERY_FIELDS: [FieldSpec; 7] = [
    FieldSpec::integer("age", "Age", 1.0, 120.0),
    FieldSpec::integer("gender", "Gender", 0.0, 1.0),
    FieldSpec::integer("lung_capacity", "Lung Capacity", 1.0, 100.0),
    FieldSpec::integer("disease_type", "Disease Type", 0.0, 5.0),
    FieldSpec::integer("treatment_type", "Treatment Type", 0.0, 5.0),
    FieldSpec::integer("hospital_visits", "Hospital Visits", 0.0, 50.0),
    FieldSpec::integer("smoking_status", "Smoking Test", 0.0, 1.0),
];

// CKD 資料集欄位順序 (bp, sg, al, su, rbc, ...)
static KIDNEY_FIELDS: [FieldSpec; 13] = [
    FieldSpec::integer("bp", "Blood Pressure", 50.0, 200.0),
    FieldSpec::integer("sg", "Specific Gravity", 1.0, 10.0),
    FieldSpec::integer("al", "Albumin", 0.0, 10.0),
    FieldSpec::integer("su", "Sugar", 0.0, 10.0),
    FieldSpec::integer("rbc", "Red Blood Cells", 0.0, 2.0),
    FieldSpec::integer("bu", "Blood Urea", 1.0, 500.0),
    FieldSpec::integer("sc", "Serum Creatinine", 0.0, 20.0),
    FieldSpec::integer("sod", "Sodium", 100.0, 200.0),
    FieldSpec::integer("pot", "Potassium", 1.0, 10.0),
    FieldSpec::integer("hemo", "Hemoglobin", 1.0, 20.0),
    FieldSpec::integer("wbcc", "WBC Count", 1000.0, 20000.0),
    FieldSpec::integer("rbcc", "RBC Count", 1.0, 10.0),
    FieldSpec::integer("htn", "Hypertension", 0.0, 1.0),
];

pub fn feature_spec(condition: Condition) -> FeatureSpec {
    let fields: &'static [FieldSpec] = match condition {
        Condition::Heart => &HEART_FIELDS,
        Condition::BrainStroke => &BRAIN_STROKE_FIELDS,
        Condition::LungsRecovery => &LUNGS_RECOVERY_FIELDS,
        Condition::Kidney => &KIDNEY_FIELDS,
    };

    FeatureSpec { condition, fields }
}
