use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 四種可預測的疾病類別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    Heart,
    BrainStroke,
    LungsRecovery,
    Kidney,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::Heart,
        Condition::BrainStroke,
        Condition::LungsRecovery,
        Condition::Kidney,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Heart => "heart",
            Condition::BrainStroke => "brain-stroke",
            Condition::LungsRecovery => "lungs-recovery",
            Condition::Kidney => "kidney",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Condition::Heart => "Heart Disease",
            Condition::BrainStroke => "Brain Stroke",
            Condition::LungsRecovery => "Lungs Recovery",
            Condition::Kidney => "Kidney Disease",
        }
    }

    /// label 與風險旗標的對應；只有肺部恢復是反向的
    pub fn polarity(&self) -> Polarity {
        match self {
            Condition::Heart | Condition::BrainStroke | Condition::Kidney => {
                Polarity::PositiveIsRisk
            }
            Condition::LungsRecovery => Polarity::PositiveIsRecovery,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = crate::utils::error::PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heart" => Ok(Condition::Heart),
            "brain-stroke" | "brain" => Ok(Condition::BrainStroke),
            "lungs-recovery" | "lungs" => Ok(Condition::LungsRecovery),
            "kidney" => Ok(Condition::Kidney),
            _ => Err(crate::utils::error::PredictError::UnknownCondition {
                name: s.to_string(),
            }),
        }
    }
}

/// 分類器的原始輸出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    pub fn as_u8(&self) -> u8 {
        match self {
            Label::Negative => 0,
            Label::Positive => 1,
        }
    }
}

impl From<bool> for Label {
    fn from(positive: bool) -> Self {
        if positive {
            Label::Positive
        } else {
            Label::Negative
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// label 1 = 偵測到疾病
    PositiveIsRisk,
    /// label 1 = 已恢復，沒有風險
    PositiveIsRecovery,
}

impl Polarity {
    pub fn is_risk(&self, label: Label) -> bool {
        match self {
            Polarity::PositiveIsRisk => label == Label::Positive,
            Polarity::PositiveIsRecovery => label == Label::Negative,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Real,
}

impl FieldKind {
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Real => "number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub min: f64,
    pub max: f64,
}

impl FieldSpec {
    pub const fn integer(name: &'static str, label: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Integer,
            min,
            max,
        }
    }

    pub const fn real(name: &'static str, label: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Real,
            min,
            max,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// 模型訓練時的欄位順序
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FeatureSpec {
    pub condition: Condition,
    pub fields: &'static [FieldSpec],
}

impl FeatureSpec {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// 依 FeatureSpec 順序排列的數值向量
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    condition: Condition,
    values: Vec<f64>,
}

impl FeatureVector {
    pub(crate) fn new(condition: Condition, values: Vec<f64>) -> Self {
        Self { condition, values }
    }

    /// 不經 Builder 直接建立；只應用於測試或診斷工具
    pub fn from_raw_parts(condition: Condition, values: Vec<f64>) -> Self {
        Self::new(condition, values)
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Shell 收集到的原始欄位值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

pub type RawFields = HashMap<String, RawValue>;

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub headline: &'static str,
    pub advice: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RecommendationKey {
    pub condition: Condition,
    pub at_risk: bool,
}

/// 單次預測的結果，呈現後即丟棄
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub condition: Condition,
    pub label: Label,
    pub at_risk: bool,
    pub recommendation: &'static Recommendation,
}

impl Outcome {
    pub fn recommendation_key(&self) -> RecommendationKey {
        RecommendationKey {
            condition: self.condition,
            at_risk: self.at_risk,
        }
    }
}
