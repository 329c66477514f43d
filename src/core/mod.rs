pub mod artifact;
pub mod builder;
pub mod dispatcher;
pub mod registry;

pub use crate::domain::model::{Condition, FeatureVector, Label, Outcome, RawFields, RawValue};
pub use crate::domain::ports::{Classifier, ConfigProvider, Storage};
pub use crate::utils::error::Result;
