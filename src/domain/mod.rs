// Domain layer: core models, static tables and ports (interfaces).

pub mod features;
pub mod model;
pub mod ports;
pub mod recommendations;
