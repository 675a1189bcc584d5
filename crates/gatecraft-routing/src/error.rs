//! Routing-specific error types

use thiserror::Error;

/// Errors that can occur building a [`crate::ModelRegistry`] or
/// routing a request
///
/// All of these are construction-time failures: once a registry is
/// built and a router wired up, `route()` itself never fails — it
/// always returns a decision, falling back when no candidate
/// qualifies (the fallback escape hatch handles that case instead).
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("model {id:?} declares no supported task kinds")]
    EmptyCapabilitySet { id: String },

    #[error("model {id:?} has a non-positive max_context_tokens")]
    NonPositiveContext { id: String },

    #[error("model {id:?} has a non-positive baseline_latency_ms")]
    NonPositiveLatency { id: String },

    #[error("model {id:?} has out-of-range quality score {quality}")]
    QualityOutOfRange { id: String, quality: f64 },

    #[error("model {id:?} has a negative price")]
    NegativePrice { id: String },

    #[error("model {id:?} is marked local but has a non-zero price")]
    LocalModelPriced { id: String },

    #[error("duplicate model identifier: {id:?}")]
    DuplicateId { id: String },

    #[error("no model in the registry supports task kind {task}")]
    UnknownTask { task: String },

    #[error("input of {input_tokens} tokens exceeds every candidate's context window")]
    ContextOverflow { input_tokens: u32 },

    #[error("router.fallback_model {0:?} is not present in the registry")]
    NoFallback(String),
}
