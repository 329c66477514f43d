//! 命令列介面：收集欄位值、呼叫 [`RiskDispatcher`]、呈現結果。

use crate::core::builder::FeatureVectorBuilder;
use crate::core::dispatcher::RiskDispatcher;
use crate::domain::features::feature_spec;
use crate::domain::model::{Condition, FieldKind, Outcome, RawFields, RawValue};
use crate::utils::error::{PredictError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct PredictionReport<'a> {
    pub outcome: &'a Outcome,
    pub evaluated_at: DateTime<Utc>,
}

/// 讀取 JSON 物件格式的欄位檔，例如 `{"age": 63, "oldpeak": "2.3"}`
///
/// 內容格式錯誤屬於使用者輸入錯誤，不是系統錯誤
pub fn read_input_file<P: AsRef<Path>>(path: P) -> Result<RawFields> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| PredictError::InvalidInput {
        source_name: path.display().to_string(),
        message: e.to_string(),
    })
}

/// 命令列上的 `--field` 覆蓋檔案中的同名欄位
pub fn merge_fields(mut base: RawFields, overrides: impl IntoIterator<Item = (String, RawValue)>) -> RawFields {
    base.extend(overrides);
    base
}

pub fn render_text(outcome: &Outcome) -> String {
    let mut out = String::new();
    let verdict = if outcome.at_risk { "⚠️" } else { "✅" };
    out.push_str(&format!(
        "{} {}: {}\n",
        verdict,
        outcome.condition.display_name(),
        outcome.recommendation.headline
    ));

    let heading = if outcome.at_risk { "👉 Recommendations:" } else { "👍 Advice:" };
    out.push_str(heading);
    out.push('\n');
    for line in outcome.recommendation.advice {
        out.push_str(&format!("  - {}\n", line));
    }
    out
}

pub fn render_json(outcome: &Outcome) -> Result<String> {
    let report = PredictionReport {
        outcome,
        evaluated_at: Utc::now(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn format_bound(kind: FieldKind, value: f64) -> String {
    match kind {
        FieldKind::Integer => format!("{}", value as i64),
        FieldKind::Real => format!("{:.1}", value),
    }
}

pub fn render_conditions() -> String {
    let mut out = String::new();
    for condition in Condition::ALL {
        let spec = feature_spec(condition);
        out.push_str(&format!(
            "{} ({}, {} fields)\n",
            condition.display_name(),
            condition,
            spec.len()
        ));
        for (position, field) in spec.fields.iter().enumerate() {
            out.push_str(&format!(
                "  {:>2}. {:<18} {:<8} [{}, {}]  {}\n",
                position + 1,
                field.name,
                field.kind.describe(),
                format_bound(field.kind, field.min),
                format_bound(field.kind, field.max),
                field.label
            ));
        }
    }
    out
}

/// 依模型欄位順序逐一詢問；型別或範圍錯誤時重新詢問同一個欄位
pub fn prompt_fields<R: BufRead, W: Write>(
    condition: Condition,
    input: &mut R,
    output: &mut W,
) -> Result<RawFields> {
    let spec = feature_spec(condition);
    let mut fields = RawFields::new();

    writeln!(output, "{} prediction", condition.display_name())?;

    for field in spec.fields {
        loop {
            write!(
                output,
                "{} [{}-{}]: ",
                field.label,
                format_bound(field.kind, field.min),
                format_bound(field.kind, field.max)
            )?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                // 輸入結束
                return Err(PredictError::MissingField {
                    field: field.name.to_string(),
                });
            }

            let raw = RawValue::from(line.trim());
            match FeatureVectorBuilder::coerce(field, &raw) {
                Ok(value) => {
                    fields.insert(field.name.to_string(), RawValue::Number(value));
                    break;
                }
                Err(e) if e.is_recoverable() => {
                    tracing::debug!("Re-prompting {}: {}", field.name, e);
                    writeln!(output, "❌ {}", e)?;
                    writeln!(output, "💡 {}", e.recovery_suggestion())?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok(fields)
}

pub fn run_interactive<R: BufRead, W: Write>(
    dispatcher: &RiskDispatcher,
    condition: Condition,
    input: &mut R,
    output: &mut W,
) -> Result<Outcome> {
    let fields = prompt_fields(condition, input, output)?;
    dispatcher.predict(condition, &fields)
}
