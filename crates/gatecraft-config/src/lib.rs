#![allow(clippy::must_use_candidate)]

pub mod env;
pub mod error;
mod loader;
pub mod model;

use serde::Deserialize;

pub use error::ConfigError;
pub use model::{ModelCapabilityConfig, PricingRuleConfig, RouterConfig, TaskKind};

/// Top-level gatecraft configuration: the candidate model pool plus
/// router policy
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Router tuning knobs
    #[serde(default)]
    pub router: RouterConfig,
    /// Declarative model pool
    pub models: Vec<ModelCapabilityConfig>,
    /// Optional pricing-table overrides, applied in order on top of
    /// the accountant's built-in table
    #[serde(default)]
    pub pricing_overrides: Vec<PricingRuleConfig>,
}
