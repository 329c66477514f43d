use crate::config::{ArtifactFiles, ModelConfig, DEFAULT_MODEL_DIR};
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub models: ModelsConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_model_dir")]
    pub dir: String,
    #[serde(default)]
    pub artifacts: ArtifactFiles,
}

fn default_model_dir() -> String {
    DEFAULT_MODEL_DIR.to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: default_model_dir(),
            artifacts: ArtifactFiles::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PredictError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PredictError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_DIR})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PredictError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn into_model_config(self) -> ModelConfig {
        ModelConfig {
            model_dir: self.models.dir,
            artifacts: self.models.artifacts,
        }
    }

    /// 設定檔指定的 log level，例如 "debug"
    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(level) = self.log_level() {
            validate_non_empty_string("logging.level", level)?;
        }
        self.clone().into_model_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use crate::domain::model::Condition;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[models]
dir = "/opt/models"

[models.artifacts]
kidney = "kidney_v2.json"

[logging]
level = "debug"
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.json_logs());

        let models = config.into_model_config();
        assert_eq!(models.model_dir(), "/opt/models");
        assert_eq!(models.artifact_file(Condition::Kidney), "kidney_v2.json");
        assert_eq!(models.artifact_file(Condition::Heart), "heartdisease.json");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.into_model_config(), ModelConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DISEASE_RISK_TEST_MODEL_DIR", "/data/models");

        let toml_content = r#"
[models]
dir = "${DISEASE_RISK_TEST_MODEL_DIR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.models.dir, "/data/models");

        std::env::remove_var("DISEASE_RISK_TEST_MODEL_DIR");
    }

    #[test]
    fn test_invalid_artifact_name() {
        let toml_content = r#"
[models.artifacts]
heart = "heart.pkl"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[models\ndir = 1").unwrap_err();
        assert!(matches!(err, PredictError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[models]\ndir = \"./trained\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.models.dir, "./trained");
    }
}
