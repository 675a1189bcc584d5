use std::collections::HashMap;

use serde::Serialize;

/// USD price per 1000 tokens for one model family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingRate {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

/// The token counts and unit rates a [`CostEstimate`] was computed from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub input_rate: f64,
    pub output_rate: f64,
}

/// Projected or actual cost of a request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    pub model: String,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    pub currency: String,
    pub breakdown: CostBreakdown,
}

/// Point-in-time view of the spend ledger
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_spent: f64,
    pub budget_limit: Option<f64>,
    pub remaining: Option<f64>,
    pub by_model: HashMap<String, f64>,
    pub request_count: usize,
}
