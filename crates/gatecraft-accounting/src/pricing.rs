//! Built-in pricing table
//!
//! Carried over as an ordered association list, matching the
//! insertion-order, first-match-wins lookup of the source this was
//! distilled from: `"gpt-4o"` is checked before `"gpt-4o-mini"`, so a
//! `gpt-4o-mini` identifier resolves to `gpt-4o` pricing. This is not
//! fixed here — fixing it would silently change billed amounts for
//! anyone relying on the existing behavior; a caller who wants correct
//! `gpt-4o-mini` pricing can pass an override ahead of it via
//! [`crate::Accountant::new`].

use crate::types::PricingRate;

const fn rate(input_per_1k: f64, output_per_1k: f64) -> PricingRate {
    PricingRate { input_per_1k, output_per_1k }
}

/// The default pricing table, in first-match-wins order
#[must_use]
pub fn default_table() -> Vec<(String, PricingRate)> {
    [
        ("gpt-4o", rate(0.0025, 0.01)),
        ("gpt-4o-mini", rate(0.000_15, 0.0006)),
        ("gpt-4-turbo", rate(0.01, 0.03)),
        ("claude-3-5-sonnet", rate(0.003, 0.015)),
        ("claude-3-5-haiku", rate(0.0008, 0.004)),
        ("claude-3-opus", rate(0.015, 0.075)),
        ("gemini-2.0-flash", rate(0.000_075, 0.0003)),
        ("gemini-1.5-pro", rate(0.00125, 0.005)),
        ("ollama", rate(0.0, 0.0)),
        ("mlx", rate(0.0, 0.0)),
    ]
    .into_iter()
    .map(|(family, rate)| (family.to_owned(), rate))
    .collect()
}
