use crate::domain::features::feature_spec;
use crate::domain::model::{Condition, FeatureVector, FieldKind, FieldSpec, RawFields, RawValue};
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::validate_range;

/// 把 Shell 收集到的原始欄位轉成模型需要的有序向量
pub struct FeatureVectorBuilder;

impl FeatureVectorBuilder {
    /// 依 FeatureSpec 宣告的順序組出向量；不是字母順序，也不是表單顯示順序
    pub fn build(condition: Condition, raw_fields: &RawFields) -> Result<FeatureVector> {
        let spec = feature_spec(condition);
        let mut values = Vec::with_capacity(spec.len());

        for field in spec.fields {
            let raw = raw_fields
                .get(field.name)
                .ok_or_else(|| PredictError::MissingField {
                    field: field.name.to_string(),
                })?;

            values.push(Self::coerce(field, raw)?);
        }

        if raw_fields.len() > spec.len() {
            let unknown: Vec<&str> = raw_fields
                .keys()
                .map(String::as_str)
                .filter(|k| spec.field(k).is_none())
                .collect();
            tracing::debug!("Ignoring unknown {} fields: {:?}", condition, unknown);
        }

        Ok(FeatureVector::new(condition, values))
    }

    /// 轉成宣告的數值型別並檢查範圍
    pub fn coerce(field: &FieldSpec, raw: &RawValue) -> Result<f64> {
        let type_error = || PredictError::FieldType {
            field: field.name.to_string(),
            value: raw.to_string(),
            expected: field.kind.describe(),
        };

        let value = match raw {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().parse::<f64>().map_err(|_| type_error())?,
        };

        // 超出範圍一律是 FieldRange（含 ±inf）；NaN 比較不會失敗，交給型別檢查
        validate_range(field.name, value, field.min, field.max)?;

        if !value.is_finite() {
            return Err(type_error());
        }

        if field.kind == FieldKind::Integer && value.fract() != 0.0 {
            return Err(type_error());
        }

        Ok(value)
    }
}
