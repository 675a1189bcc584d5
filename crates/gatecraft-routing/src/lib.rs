//! Model registry and smart router for the gatecraft routing core
//!
//! `route()` filters the registry by task support, context window,
//! cost, and quality, scores the survivors with a fixed weighted
//! formula, and selects the highest scorer, breaking ties by
//! identifier. When nothing survives filtering it falls back to a
//! configured default model instead of failing the request outright.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod feedback;
pub mod registry;

pub use error::RoutingError;
pub use feedback::LatencyHistory;
pub use gatecraft_config::{RouterConfig, TaskKind};
pub use registry::{ModelCapability, ModelRegistry};

use std::sync::Arc;

use arc_swap::ArcSwap;
use gatecraft_accounting::Accountant;
use serde::Serialize;

/// Extra, per-request constraints layered on top of the router's
/// default policy
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteConstraints {
    pub require_local: bool,
    pub require_quality: Option<f64>,
    pub max_cost: Option<f64>,
}

/// Result of a routing decision, in the shape callers log or ship
/// over RPC
///
/// This is also the audit record: `model` carries the full capability
/// snapshot the decision was made against, so a caller (or a log
/// reader) never has to re-resolve `model_key` against a registry that
/// may have since changed. The wire format stays scoped to the four
/// mandated keys; `model` is omitted from serialization.
#[derive(Debug, Clone, Serialize)]
pub struct RoutingDecision {
    pub model_key: String,
    #[serde(skip_serializing)]
    pub model: ModelCapability,
    pub reason: String,
    pub estimated_cost: f64,
    pub estimated_latency_ms: u32,
}

/// Filters, scores, and selects a model for each routing request
///
/// `config` is held behind an [`ArcSwap`] so a reader in the middle of
/// scoring sees one complete, consistent policy snapshot even while a
/// concurrent caller replaces it — never a torn mix of old and new
/// fields.
pub struct Router {
    registry: ModelRegistry,
    config: ArcSwap<RouterConfig>,
    latency: LatencyHistory,
}

impl Router {
    /// Build a router over a registry and initial policy
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::NoFallback`] if `config.fallback_model`
    /// does not name a model present in `registry`. This check runs
    /// once, here, not on every request.
    pub fn new(registry: ModelRegistry, config: RouterConfig) -> Result<Self, RoutingError> {
        if registry.find(&config.fallback_model).is_none() {
            return Err(RoutingError::NoFallback(config.fallback_model));
        }

        Ok(Self {
            registry,
            config: ArcSwap::from_pointee(config),
            latency: LatencyHistory::new(),
        })
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Atomically replace the router's policy
    pub fn set_config(&self, config: RouterConfig) {
        self.config.store(Arc::new(config));
    }

    pub fn config(&self) -> Arc<RouterConfig> {
        self.config.load_full()
    }

    /// Record an actual observed latency for a model, feeding future
    /// latency estimates
    pub fn record_latency(&self, model_id: &str, latency_ms: f64) {
        self.latency.record_latency(model_id, latency_ms);
    }

    /// Select the best model for `task` given token counts, the
    /// accountant's pricing, and any per-request constraints
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::UnknownTask`] or
    /// [`RoutingError::ContextOverflow`] only when even the
    /// configured fallback cannot serve the request — every other
    /// case that fails filtering falls back instead of erroring.
    pub fn route(
        &self,
        accountant: &Accountant,
        task: TaskKind,
        input_tokens: u32,
        expected_output_tokens: u32,
        constraints: RouteConstraints,
    ) -> Result<RoutingDecision, RoutingError> {
        let config = self.config.load();

        let mut candidates = Vec::new();
        for capability in self.registry.capabilities() {
            if !capability.supports(task) {
                continue;
            }
            if constraints.require_local && !capability.is_local {
                continue;
            }
            if input_tokens > capability.max_context_tokens {
                continue;
            }

            let cost = accountant
                .estimate_cost(&capability.id, input_tokens, expected_output_tokens)
                .total_cost;
            let effective_max_cost = constraints.max_cost.unwrap_or(config.max_cost_usd);
            if cost > effective_max_cost {
                continue;
            }

            let min_quality = config.min_quality_score.max(constraints.require_quality.unwrap_or(0.0));
            if capability.quality_score < min_quality {
                continue;
            }

            let latency = self.latency.estimate(&capability.id).unwrap_or(f64::from(capability.baseline_latency_ms));
            candidates.push((capability, cost, latency));
        }

        if candidates.is_empty() {
            return self.fallback_decision(accountant, &config, task, input_tokens, expected_output_tokens);
        }

        candidates.sort_by(|(cap_a, cost_a, lat_a), (cap_b, cost_b, lat_b)| {
            let score_a = score(cap_a, *cost_a, *lat_a, config.prefer_local);
            let score_b = score(cap_b, *cost_b, *lat_b, config.prefer_local);
            score_b.partial_cmp(&score_a).unwrap_or(std::cmp::Ordering::Equal).then_with(|| cap_a.id.cmp(&cap_b.id))
        });

        let (best, cost, latency) = &candidates[0];
        Ok(RoutingDecision {
            model_key: best.id.clone(),
            model: (*best).clone(),
            reason: reason_for(best, *cost, *latency, task),
            estimated_cost: *cost,
            estimated_latency_ms: latency.round() as u32,
        })
    }

    fn fallback_decision(
        &self,
        accountant: &Accountant,
        config: &RouterConfig,
        task: TaskKind,
        input_tokens: u32,
        expected_output_tokens: u32,
    ) -> Result<RoutingDecision, RoutingError> {
        let fallback = self
            .registry
            .find(&config.fallback_model)
            .expect("fallback presence is validated in Router::new");

        if !fallback.supports(task) {
            return Err(RoutingError::UnknownTask { task: task.to_string() });
        }
        if input_tokens > fallback.max_context_tokens {
            return Err(RoutingError::ContextOverflow { input_tokens });
        }

        let cost = accountant
            .estimate_cost(&fallback.id, input_tokens, expected_output_tokens)
            .total_cost;
        let latency = self.latency.estimate(&fallback.id).unwrap_or(f64::from(fallback.baseline_latency_ms));

        tracing::info!(model = %fallback.id, "no candidate qualified, using fallback");

        Ok(RoutingDecision {
            model_key: fallback.id.clone(),
            model: fallback.clone(),
            reason: "No suitable model found, using fallback".to_owned(),
            estimated_cost: cost,
            estimated_latency_ms: latency.round() as u32,
        })
    }
}

/// Quality×40 + cost efficiency (0-30) + latency (0-20) + locality (10)
fn score(capability: &ModelCapability, cost: f64, latency_ms: f64, prefer_local: bool) -> f64 {
    let mut score = capability.quality_score * 40.0;

    score += if cost == 0.0 { 30.0 } else { (30.0 - cost * 100.0).max(0.0) };
    score += (20.0 - latency_ms / 100.0).max(0.0);

    if prefer_local && capability.is_local {
        score += 10.0;
    }

    score
}

fn reason_for(capability: &ModelCapability, cost: f64, latency_ms: f64, task: TaskKind) -> String {
    let cost_part = if capability.is_local {
        "local model (zero cost)".to_owned()
    } else {
        format!("cost: ${cost:.4}")
    };

    format!(
        "Selected {} for {task}: {cost_part}, latency: ~{}ms, quality: {:.0}%",
        capability.id,
        latency_ms.round() as i64,
        capability.quality_score * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatecraft_accounting::Accountant;
    use gatecraft_config::ModelCapabilityConfig;

    fn local(id: &str, quality: f64, latency_ms: u32) -> ModelCapabilityConfig {
        ModelCapabilityConfig {
            id: id.to_owned(),
            provider: "local-mlx".to_owned(),
            supports: vec![TaskKind::Chat, TaskKind::Code],
            max_context_tokens: 128_000,
            input_price_per_1k: 0.0,
            output_price_per_1k: 0.0,
            baseline_latency_ms: latency_ms,
            quality_score: quality,
            is_local: true,
            requires_accelerator: true,
        }
    }

    fn remote(id: &str, quality: f64, latency_ms: u32, input_price: f64, output_price: f64) -> ModelCapabilityConfig {
        ModelCapabilityConfig {
            id: id.to_owned(),
            provider: "cloud-remote".to_owned(),
            supports: vec![TaskKind::Chat, TaskKind::ImageAnalysis],
            max_context_tokens: 200_000,
            input_price_per_1k: input_price,
            output_price_per_1k: output_price,
            baseline_latency_ms: latency_ms,
            quality_score: quality,
            is_local: false,
            requires_accelerator: false,
        }
    }

    fn router(configs: Vec<ModelCapabilityConfig>, fallback: &str) -> Router {
        let registry = ModelRegistry::from_config(&configs).unwrap();
        let config = RouterConfig { fallback_model: fallback.to_owned(), ..RouterConfig::default() };
        Router::new(registry, config).unwrap()
    }

    #[test]
    fn construction_fails_for_unknown_fallback() {
        let registry = ModelRegistry::from_config(&[local("a", 0.8, 50)]).unwrap();
        let config = RouterConfig { fallback_model: "missing".to_owned(), ..RouterConfig::default() };
        assert!(matches!(Router::new(registry, config), Err(RoutingError::NoFallback(_))));
    }

    #[test]
    fn prefers_local_when_quality_is_close() {
        let r = router(vec![local("a", 0.85, 50), remote("b", 0.9, 800, 0.003, 0.015)], "a");
        let accountant = Accountant::default();
        let decision = r.route(&accountant, TaskKind::Chat, 1000, 500, RouteConstraints::default()).unwrap();
        assert_eq!(decision.model_key, "a");
        assert_eq!(decision.model.id, "a");
    }

    #[test]
    fn decision_carries_full_capability_snapshot_for_fallback() {
        let r = router(vec![local("a", 0.7, 50)], "a");
        let accountant = Accountant::default();
        let strict = RouterConfig { min_quality_score: 0.99, fallback_model: "a".to_owned(), ..RouterConfig::default() };
        r.set_config(strict);
        let decision = r.route(&accountant, TaskKind::Chat, 1000, 500, RouteConstraints::default()).unwrap();
        assert_eq!(decision.model.id, decision.model_key);
        assert!(decision.model.is_local);
    }

    #[test]
    fn falls_back_when_task_unsupported_by_any_candidate() {
        let r = router(vec![local("a", 0.85, 50)], "a");
        let accountant = Accountant::default();
        let decision = r.route(&accountant, TaskKind::Embedding, 1000, 500, RouteConstraints::default());
        assert!(matches!(decision, Err(RoutingError::UnknownTask { .. })));
    }

    #[test]
    fn max_cost_zero_pins_to_free_model() {
        // "cloud-gpt-4o" resolves against the accountant's built-in
        // pricing table, so it carries a genuine nonzero cost unlike
        // the unmatched "remote"-fixture ids used elsewhere in this
        // module.
        let r = router(vec![remote("cloud-gpt-4o", 0.95, 800, 10.0, 10.0), local("a", 0.95, 50)], "a");
        let accountant = Accountant::default();
        let constraints = RouteConstraints { max_cost: Some(0.0), ..Default::default() };
        let decision = r.route(&accountant, TaskKind::Chat, 1000, 500, constraints).unwrap();
        assert_eq!(decision.model_key, "a");
        assert!(!decision.reason.contains("fallback"));
    }

    #[test]
    fn quality_floor_forces_remote_over_cheaper_local() {
        // local "a" clears the router's default 0.80 floor but not the
        // per-request 0.94 requirement, which must still raise the bar
        // above config.min_quality_score rather than replace it.
        let r = router(vec![local("a", 0.85, 50), remote("cloud-claude-3-5-sonnet", 0.94, 800, 0.003, 0.015)], "a");
        let accountant = Accountant::default();
        let constraints = RouteConstraints { require_quality: Some(0.94), ..Default::default() };
        let decision = r.route(&accountant, TaskKind::Chat, 1000, 500, constraints).unwrap();
        assert_eq!(decision.model_key, "cloud-claude-3-5-sonnet");
        assert!(decision.reason.contains("cost: $"));
        assert!(decision.estimated_cost > 0.0);
    }

    #[test]
    fn only_sufficiently_large_context_candidate_survives() {
        let mut huge = remote("big", 0.8, 900, 0.003, 0.015);
        huge.max_context_tokens = 1_000_000;
        let r = router(vec![local("a", 0.9, 50), huge], "a");
        let accountant = Accountant::default();
        let decision = r.route(&accountant, TaskKind::Chat, 500_000, 500, RouteConstraints::default()).unwrap();
        assert_eq!(decision.model_key, "big");
    }

    #[test]
    fn context_overflow_is_fatal_when_fallback_also_cannot_serve() {
        let r = router(vec![local("a", 0.9, 50)], "a");
        let accountant = Accountant::default();
        let decision = r.route(&accountant, TaskKind::Chat, 500_000, 500, RouteConstraints::default());
        assert!(matches!(decision, Err(RoutingError::ContextOverflow { .. })));
    }

    #[test]
    fn require_local_excludes_every_remote_candidate() {
        let r = router(
            vec![local("a", 0.85, 400), remote("cloud-gpt-4o", 0.99, 200, 0.0025, 0.01)],
            "a",
        );
        let accountant = Accountant::default();
        let constraints = RouteConstraints { require_local: true, ..Default::default() };
        let decision = r.route(&accountant, TaskKind::Chat, 1000, 500, constraints).unwrap();
        assert_eq!(decision.model_key, "a");
    }

    #[test]
    fn ties_break_by_identifier() {
        let r = router(vec![local("z", 0.8, 50), local("a", 0.8, 50)], "a");
        let accountant = Accountant::default();
        let decision = r.route(&accountant, TaskKind::Chat, 1000, 500, RouteConstraints::default()).unwrap();
        assert_eq!(decision.model_key, "a");
    }

    #[test]
    fn config_hot_swap_is_observed_by_next_route_call() {
        let r = router(vec![local("a", 0.7, 50)], "a");
        let accountant = Accountant::default();
        let strict = RouterConfig { min_quality_score: 0.99, fallback_model: "a".to_owned(), ..RouterConfig::default() };
        r.set_config(strict);
        let decision = r.route(&accountant, TaskKind::Chat, 1000, 500, RouteConstraints::default()).unwrap();
        assert!(decision.reason.contains("fallback"));
    }

    #[test]
    fn records_and_uses_observed_latency() {
        let r = router(vec![local("a", 0.8, 500)], "a");
        r.record_latency("a", 10.0);
        r.record_latency("a", 10.0);
        let accountant = Accountant::default();
        let decision = r.route(&accountant, TaskKind::Chat, 1000, 500, RouteConstraints::default()).unwrap();
        assert_eq!(decision.estimated_latency_ms, 10);
    }
}
