pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, ModelConfig};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{
    builder::FeatureVectorBuilder, dispatcher::RiskDispatcher, registry::ModelRegistry,
};
pub use domain::model::{Condition, Label, Outcome, RawFields, RawValue};
pub use utils::error::{PredictError, Result};
