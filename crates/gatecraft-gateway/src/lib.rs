//! Closed-loop facade wiring the model registry, token analyzer, cost
//! accountant, and smart router into the single control loop the rest
//! of this workspace (and the `gatecraft` binary) drives.

mod error;

pub use error::GatewayError;
pub use gatecraft_accounting::{AccountingError, CostBreakdown, CostEstimate, Summary};
pub use gatecraft_config::{Config, RouterConfig, TaskKind};
pub use gatecraft_routing::{ModelRegistry, RouteConstraints, RoutingDecision, RoutingError};
pub use gatecraft_tokens::{Input, Message, TokenCount};

use gatecraft_accounting::{Accountant, PricingRate};
use gatecraft_routing::Router;
use gatecraft_tokens::TokenAnalyzer;

/// The closed control loop: size the request, price each candidate,
/// select one, gate it against budget, and remember what happened for
/// next time.
pub struct Gateway {
    router: Router,
    accountant: Accountant,
    analyzer: TokenAnalyzer,
}

impl Gateway {
    /// Build a gateway from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the model pool fails registry
    /// validation or the configured fallback model is absent.
    pub fn from_config(config: Config) -> Result<Self, GatewayError> {
        let registry = ModelRegistry::from_config(&config.models)?;
        let router = Router::new(registry, config.router)?;

        let mut pricing_table: Vec<(String, PricingRate)> = config
            .pricing_overrides
            .into_iter()
            .map(|rule| {
                (
                    rule.family,
                    PricingRate { input_per_1k: rule.input_per_1k, output_per_1k: rule.output_per_1k },
                )
            })
            .collect();
        pricing_table.extend(gatecraft_accounting::pricing::default_table());

        Ok(Self {
            router,
            accountant: Accountant::new(pricing_table),
            analyzer: TokenAnalyzer::new(),
        })
    }

    /// Count tokens for `input` as if it were sent to `model`
    ///
    /// `model` only selects a tokenizer family; it need not be the
    /// model the request is eventually routed to (a caller may size a
    /// prompt against one family to decide constraints before routing
    /// picks the actual destination).
    #[must_use]
    pub fn count_tokens(&self, input: Input, model: &str) -> TokenCount {
        self.analyzer.count_tokens(input, model)
    }

    /// Select the best model for a task, honoring the router's
    /// current policy and any per-request constraints
    ///
    /// # Errors
    ///
    /// See [`Router::route`].
    pub fn route(
        &self,
        task: TaskKind,
        input_tokens: u32,
        expected_output_tokens: u32,
        constraints: RouteConstraints,
    ) -> Result<RoutingDecision, RoutingError> {
        self.router.route(&self.accountant, task, input_tokens, expected_output_tokens, constraints)
    }

    /// Record an actual observed latency for a model, feeding future
    /// routing decisions
    pub fn record_latency(&self, model_id: &str, latency_ms: f64) {
        self.router.record_latency(model_id, latency_ms);
    }

    /// Project the cost of sending a request to `model`
    #[must_use]
    pub fn estimate_cost(&self, model: &str, input_tokens: u32, output_tokens: u32) -> CostEstimate {
        self.accountant.estimate_cost(model, input_tokens, output_tokens)
    }

    /// Check whether `estimated_cost` fits under the current budget
    #[must_use]
    pub fn check_budget(&self, estimated_cost: f64) -> (bool, String) {
        self.accountant.check_budget(estimated_cost)
    }

    /// Record a cost estimate as actually incurred
    pub fn record_cost(&self, estimate: CostEstimate) {
        self.accountant.record_cost(estimate);
    }

    /// Set (or replace) the spending budget, in USD
    ///
    /// # Errors
    ///
    /// Returns [`AccountingError::NegativeBudget`] if `limit` is
    /// negative.
    pub fn set_budget(&self, limit: f64) -> Result<(), AccountingError> {
        self.accountant.set_budget(limit)
    }

    /// Snapshot current spend
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.accountant.summary()
    }

    /// Atomically replace the router's policy
    pub fn set_router_config(&self, config: RouterConfig) {
        self.router.set_config(config);
    }

    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        self.router.registry()
    }
}
