use crate::utils::error::{PredictError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PredictError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PredictError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 模型檔名只允許單一檔名，不可跳出模型目錄
pub fn validate_file_name(field_name: &str, file_name: &str) -> Result<()> {
    validate_path(field_name, file_name)?;

    let path = std::path::Path::new(file_name);
    if path.components().count() != 1 || path.is_absolute() || file_name == ".." {
        return Err(PredictError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file_name.to_string(),
            reason: "Must be a plain file name inside the model directory".to_string(),
        });
    }

    if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
        return Err(PredictError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file_name.to_string(),
            reason: "Model artifacts must use the .json extension".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PredictError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 閉區間範圍檢查，超出時回傳 FieldRange
pub fn validate_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value < min || value > max {
        return Err(PredictError::FieldRange {
            field: field_name.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}
