pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::Condition;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_name, validate_path, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use crate::domain::model::RawValue;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

pub const DEFAULT_MODEL_DIR: &str = "./models";

/// 每個疾病對應的模型檔名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactFiles {
    #[serde(default = "default_heart")]
    pub heart: String,
    #[serde(default = "default_brain_stroke")]
    pub brain_stroke: String,
    #[serde(default = "default_lungs_recovery")]
    pub lungs_recovery: String,
    #[serde(default = "default_kidney")]
    pub kidney: String,
}

fn default_heart() -> String {
    "heartdisease.json".to_string()
}

fn default_brain_stroke() -> String {
    "brain.json".to_string()
}

fn default_lungs_recovery() -> String {
    "lungs.json".to_string()
}

fn default_kidney() -> String {
    "kid.json".to_string()
}

impl Default for ArtifactFiles {
    fn default() -> Self {
        Self {
            heart: default_heart(),
            brain_stroke: default_brain_stroke(),
            lungs_recovery: default_lungs_recovery(),
            kidney: default_kidney(),
        }
    }
}

impl ArtifactFiles {
    pub fn get(&self, condition: Condition) -> &str {
        match condition {
            Condition::Heart => &self.heart,
            Condition::BrainStroke => &self.brain_stroke,
            Condition::LungsRecovery => &self.lungs_recovery,
            Condition::Kidney => &self.kidney,
        }
    }
}

/// 啟動時唯一需要的設定：模型目錄與檔名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_dir: String,
    pub artifacts: ArtifactFiles,
}

impl ModelConfig {
    pub fn new(model_dir: impl Into<String>) -> Self {
        Self {
            model_dir: model_dir.into(),
            artifacts: ArtifactFiles::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_DIR)
    }
}

impl ConfigProvider for ModelConfig {
    fn model_dir(&self) -> &str {
        &self.model_dir
    }

    fn artifact_file(&self, condition: Condition) -> &str {
        self.artifacts.get(condition)
    }
}

impl Validate for ModelConfig {
    fn validate(&self) -> Result<()> {
        validate_path("models.dir", &self.model_dir)?;
        for condition in Condition::ALL {
            let field = format!("models.artifacts.{}", condition.as_str().replace('-', "_"));
            validate_file_name(&field, self.artifacts.get(condition))?;
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "disease-risk")]
#[command(about = "Predict heart, brain stroke, lungs recovery and kidney disease risk")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory holding the four model artifacts
    #[arg(long, env = "DISEASE_RISK_MODEL_DIR", global = true)]
    pub model_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List conditions and the fields each model expects
    Conditions,
    /// Load every model artifact and report problems
    Check,
    /// Run a single prediction
    Predict(PredictArgs),
    /// Prompt for each field, then predict
    Interactive {
        condition: Condition,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Args)]
pub struct PredictArgs {
    /// heart, brain-stroke, lungs-recovery or kidney
    pub condition: Condition,

    /// Field value as name=value; may be repeated
    #[arg(short, long = "field", value_parser = parse_field)]
    pub fields: Vec<(String, RawValue)>,

    /// JSON object file with field values
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
fn parse_field(s: &str) -> std::result::Result<(String, RawValue), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{}'", s));
    }
    Ok((name.to_string(), RawValue::from(value.trim())))
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn load_file_config(&self) -> Result<Option<toml_config::TomlConfig>> {
        self.config
            .as_ref()
            .map(toml_config::TomlConfig::from_file)
            .transpose()
    }

    /// 設定檔（或預設值），再套用命令列覆蓋
    pub fn model_config(&self, file_config: Option<toml_config::TomlConfig>) -> Result<ModelConfig> {
        let mut config = match file_config {
            Some(file_config) => {
                file_config.validate()?;
                file_config.into_model_config()
            }
            None => ModelConfig::default(),
        };

        if let Some(dir) = &self.model_dir {
            tracing::debug!("Model directory overridden to: {}", dir);
            config.model_dir = dir.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
