#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

//! Cost estimation and an in-process spend ledger
//!
//! The accountant prices requests against a pricing table, gates
//! spend against an optional budget, and keeps a running ledger of
//! what has actually been spent. None of this persists across process
//! restarts; it exists purely to keep one process's routing decisions
//! cost-aware.

pub mod error;
pub mod pricing;
pub mod types;

pub use error::AccountingError;
pub use types::{CostBreakdown, CostEstimate, PricingRate, Summary};

use std::sync::Mutex;

struct BudgetState {
    total_spent: f64,
    budget_limit: Option<f64>,
    history: Vec<CostEstimate>,
}

/// Prices requests and tracks cumulative spend
///
/// All mutable state lives behind a single [`Mutex`]; there is a
/// documented window between `check_budget` and `record_cost` where
/// two callers can both pass the check and jointly overshoot the
/// limit.
pub struct Accountant {
    pricing_table: Vec<(String, PricingRate)>,
    state: Mutex<BudgetState>,
}

impl Default for Accountant {
    fn default() -> Self {
        Self::new(pricing::default_table())
    }
}

impl Accountant {
    /// Build an accountant from an ordered pricing table
    ///
    /// The table is an association list, not a map: resolution is
    /// first-match-wins on a case-insensitive substring test against
    /// the model identifier, so declaration order is load-bearing.
    #[must_use]
    pub fn new(pricing_table: Vec<(String, PricingRate)>) -> Self {
        Self {
            pricing_table,
            state: Mutex::new(BudgetState {
                total_spent: 0.0,
                budget_limit: None,
                history: Vec::new(),
            }),
        }
    }

    fn rate_for(&self, model: &str) -> PricingRate {
        let lower = model.to_lowercase();
        self.pricing_table
            .iter()
            .find(|(family, _)| lower.contains(family.to_lowercase().as_str()))
            .map_or(PricingRate { input_per_1k: 0.0, output_per_1k: 0.0 }, |(_, rate)| *rate)
    }

    /// Project the cost of a request before it is made
    pub fn estimate_cost(&self, model: &str, input_tokens: u32, output_tokens: u32) -> CostEstimate {
        let rate = self.rate_for(model);
        let input_cost = (f64::from(input_tokens) / 1000.0) * rate.input_per_1k;
        let output_cost = (f64::from(output_tokens) / 1000.0) * rate.output_per_1k;

        CostEstimate {
            model: model.to_owned(),
            input_cost,
            output_cost,
            total_cost: input_cost + output_cost,
            currency: "USD".to_owned(),
            breakdown: CostBreakdown {
                input_tokens,
                output_tokens,
                input_rate: rate.input_per_1k,
                output_rate: rate.output_per_1k,
            },
        }
    }

    /// Record an estimate as actually incurred, adding it to the
    /// running total and per-model history
    pub fn record_cost(&self, estimate: CostEstimate) {
        let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.total_spent += estimate.total_cost;
        state.history.push(estimate);
    }

    /// Check whether `estimated_cost` would exceed the configured
    /// budget, returning `(allowed, reason)`
    ///
    /// With no budget set, every request is allowed. A zero-dollar
    /// budget is binding: it permits nothing once any spend exists,
    /// and permits exactly one zero-cost request otherwise.
    pub fn check_budget(&self, estimated_cost: f64) -> (bool, String) {
        let state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some(limit) = state.budget_limit else {
            return (true, "No budget limit set".to_owned());
        };

        if state.total_spent + estimated_cost > limit {
            let remaining = limit - state.total_spent;
            (false, format!("Would exceed budget. Remaining: ${remaining:.4}"))
        } else {
            (true, "Within budget".to_owned())
        }
    }

    /// Set (or replace) the spending budget limit, in USD
    ///
    /// # Errors
    ///
    /// Returns [`AccountingError::NegativeBudget`] if `limit` is
    /// negative.
    pub fn set_budget(&self, limit: f64) -> Result<(), AccountingError> {
        if limit < 0.0 {
            return Err(AccountingError::NegativeBudget(limit));
        }
        let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.budget_limit = Some(limit);
        Ok(())
    }

    /// Snapshot current spend, remaining budget, and per-model totals
    pub fn summary(&self) -> Summary {
        let state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut by_model = std::collections::HashMap::new();
        for estimate in &state.history {
            *by_model.entry(estimate.model.clone()).or_insert(0.0) += estimate.total_cost;
        }

        Summary {
            total_spent: state.total_spent,
            budget_limit: state.budget_limit,
            remaining: state.budget_limit.map(|limit| limit - state.total_spent),
            by_model,
            request_count: state.history.len(),
        }
    }
}
