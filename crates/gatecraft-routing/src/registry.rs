//! Model registry: the shared catalogue the analyzer, accountant, and
//! router all read
//!
//! Config-driven profiles, generalized from `ModelRegistry::from_config`
//! to validate every invariant at construction instead of accepting
//! whatever the config file says: registration rejects duplicate
//! identifiers and capability records that violate their own
//! constraints, so a bad config fails fast at startup rather than
//! producing a broken routing decision later.

use std::collections::HashSet;

use gatecraft_config::{ModelCapabilityConfig, TaskKind};

use crate::error::RoutingError;

/// Runtime description of one candidate model
#[derive(Debug, Clone)]
pub struct ModelCapability {
    pub id: String,
    pub provider: String,
    pub supports: Vec<TaskKind>,
    pub max_context_tokens: u32,
    pub input_price_per_1k: f64,
    pub output_price_per_1k: f64,
    pub baseline_latency_ms: u32,
    pub quality_score: f64,
    pub is_local: bool,
    pub requires_accelerator: bool,
}

impl ModelCapability {
    fn from_config(config: &ModelCapabilityConfig) -> Result<Self, RoutingError> {
        if config.supports.is_empty() {
            return Err(RoutingError::EmptyCapabilitySet { id: config.id.clone() });
        }
        if config.max_context_tokens == 0 {
            return Err(RoutingError::NonPositiveContext { id: config.id.clone() });
        }
        if config.baseline_latency_ms == 0 {
            return Err(RoutingError::NonPositiveLatency { id: config.id.clone() });
        }
        if !(0.0..=1.0).contains(&config.quality_score) {
            return Err(RoutingError::QualityOutOfRange {
                id: config.id.clone(),
                quality: config.quality_score,
            });
        }
        if config.input_price_per_1k < 0.0 || config.output_price_per_1k < 0.0 {
            return Err(RoutingError::NegativePrice { id: config.id.clone() });
        }
        if config.is_local && (config.input_price_per_1k != 0.0 || config.output_price_per_1k != 0.0) {
            return Err(RoutingError::LocalModelPriced { id: config.id.clone() });
        }

        Ok(Self {
            id: config.id.clone(),
            provider: config.provider.clone(),
            supports: config.supports.clone(),
            max_context_tokens: config.max_context_tokens,
            input_price_per_1k: config.input_price_per_1k,
            output_price_per_1k: config.output_price_per_1k,
            baseline_latency_ms: config.baseline_latency_ms,
            quality_score: config.quality_score,
            is_local: config.is_local,
            requires_accelerator: config.requires_accelerator,
        })
    }

    #[must_use]
    pub fn supports(&self, task: TaskKind) -> bool {
        self.supports.iter().any(|t| *t == task)
    }
}

/// Immutable-after-load catalogue of candidate models
#[derive(Debug)]
pub struct ModelRegistry {
    capabilities: Vec<ModelCapability>,
}

impl ModelRegistry {
    /// Build a registry from configuration, validating every entry
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError`] if any entry has an empty task set, an
    /// out-of-range quality score, a negative price, a local model
    /// with a non-zero price, or if two entries share an identifier.
    pub fn from_config(configs: &[ModelCapabilityConfig]) -> Result<Self, RoutingError> {
        let mut capabilities = Vec::with_capacity(configs.len());
        let mut seen = HashSet::with_capacity(configs.len());

        for config in configs {
            if !seen.insert(config.id.clone()) {
                return Err(RoutingError::DuplicateId { id: config.id.clone() });
            }
            capabilities.push(ModelCapability::from_config(config)?);
        }

        Ok(Self { capabilities })
    }

    #[must_use]
    pub fn capabilities(&self) -> &[ModelCapability] {
        &self.capabilities
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&ModelCapability> {
        self.capabilities.iter().find(|c| c.id == id)
    }

    /// All capabilities that support the given task kind, in
    /// declaration order
    pub fn supporting(&self, task: TaskKind) -> impl Iterator<Item = &ModelCapability> {
        self.capabilities.iter().filter(move |c| c.supports(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(id: &str, quality: f64, is_local: bool) -> ModelCapabilityConfig {
        ModelCapabilityConfig {
            id: id.to_owned(),
            provider: "local-mlx".to_owned(),
            supports: vec![TaskKind::Chat],
            max_context_tokens: 8192,
            input_price_per_1k: if is_local { 0.0 } else { 0.001 },
            output_price_per_1k: if is_local { 0.0 } else { 0.002 },
            baseline_latency_ms: 50,
            quality_score: quality,
            is_local,
            requires_accelerator: is_local,
        }
    }

    #[test]
    fn rejects_duplicate_identifiers() {
        let configs = vec![config("a", 0.8, true), config("a", 0.9, true)];
        assert!(matches!(
            ModelRegistry::from_config(&configs),
            Err(RoutingError::DuplicateId { .. })
        ));
    }

    #[test]
    fn rejects_empty_capability_set() {
        let mut bad = config("a", 0.8, true);
        bad.supports.clear();
        assert!(matches!(
            ModelRegistry::from_config(&[bad]),
            Err(RoutingError::EmptyCapabilitySet { .. })
        ));
    }

    #[test]
    fn rejects_zero_max_context() {
        let mut bad = config("a", 0.8, true);
        bad.max_context_tokens = 0;
        assert!(matches!(
            ModelRegistry::from_config(&[bad]),
            Err(RoutingError::NonPositiveContext { .. })
        ));
    }

    #[test]
    fn rejects_zero_baseline_latency() {
        let mut bad = config("a", 0.8, true);
        bad.baseline_latency_ms = 0;
        assert!(matches!(
            ModelRegistry::from_config(&[bad]),
            Err(RoutingError::NonPositiveLatency { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_quality() {
        let bad = config("a", 1.5, true);
        assert!(matches!(
            ModelRegistry::from_config(&[bad]),
            Err(RoutingError::QualityOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_priced_local_model() {
        let mut bad = config("a", 0.8, true);
        bad.input_price_per_1k = 0.01;
        assert!(matches!(
            ModelRegistry::from_config(&[bad]),
            Err(RoutingError::LocalModelPriced { .. })
        ));
    }

    #[test]
    fn accepts_valid_registry() {
        let configs = vec![config("local:a", 0.8, true), config("cloud:b", 0.95, false)];
        let registry = ModelRegistry::from_config(&configs).unwrap();
        assert_eq!(registry.capabilities().len(), 2);
        assert!(registry.find("local:a").is_some());
    }

    #[test]
    fn supporting_filters_by_task() {
        let configs = vec![config("local:a", 0.8, true)];
        let registry = ModelRegistry::from_config(&configs).unwrap();
        assert_eq!(registry.supporting(TaskKind::Chat).count(), 1);
        assert_eq!(registry.supporting(TaskKind::Embedding).count(), 0);
    }
}
