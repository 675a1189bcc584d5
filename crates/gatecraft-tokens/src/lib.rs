//! Per-model-family token counting
//!
//! Selects a tokenizer by matching the model identifier against a
//! fixed family priority order, counts tokens, and projects an
//! expected output size. Never fails: any family-specific tokenizer
//! that cannot be built or used degrades to the character heuristic,
//! recorded in [`TokenCount::method`] rather than raised as an error.

mod error;
mod llama;

pub use error::TokenizerError;

use std::sync::OnceLock;

use tiktoken_rs::CoreBPE;

/// One message in a conversation, for flattening before counting
#[derive(Debug, Clone)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// What to count tokens for: raw text, or a conversation
#[derive(Debug, Clone)]
pub enum Input {
    Text(String),
    Messages(Vec<Message>),
}

impl Input {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Messages(messages) => messages
                .iter()
                .map(|m| format!("{}: {}", m.role, m.content))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Token count breakdown for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCount {
    pub input_tokens: u32,
    pub estimated_output_tokens: u32,
    pub total_tokens: u32,
    /// Which tokenizer produced `input_tokens`
    pub method: String,
}

/// Stateless token counter; tokenizer instances are cached process-wide
/// behind [`OnceLock`]s, published once and shared by every call site.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenAnalyzer;

impl TokenAnalyzer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Count tokens for `input` as if it were sent to `model`
    ///
    /// `model` is matched case-insensitively against a fixed family
    /// priority order: GPT/OpenAI, Claude (as a cl100k approximation),
    /// Llama, then a character-count heuristic for everything else.
    #[must_use]
    pub fn count_tokens(&self, input: Input, model: &str) -> TokenCount {
        let text = input.into_text();
        let lower = model.to_lowercase();

        let (input_tokens, method) = if lower.contains("gpt-4o") || lower.contains("gpt-4-turbo") {
            (o200k_count(&text), "tiktoken-o200k")
        } else if lower.contains("gpt") || lower.contains("openai") {
            (cl100k_count(&text), "tiktoken-cl100k")
        } else if lower.contains("claude") {
            (cl100k_count(&text), "tiktoken-approximation")
        } else if lower.contains("llama") {
            llama::count_tokens(&text).map_or_else(|| (heuristic_count(&text), "character-estimate"), |n| (n, "llama-tokenizer"))
        } else {
            (heuristic_count(&text), "character-estimate")
        };

        let estimated_output_tokens = (input_tokens / 2).min(2000);

        TokenCount {
            input_tokens,
            estimated_output_tokens,
            total_tokens: input_tokens + estimated_output_tokens,
            method: method.to_owned(),
        }
    }
}

fn o200k() -> &'static OnceLock<Option<CoreBPE>> {
    static ENCODING: OnceLock<Option<CoreBPE>> = OnceLock::new();
    &ENCODING
}

fn cl100k() -> &'static OnceLock<Option<CoreBPE>> {
    static ENCODING: OnceLock<Option<CoreBPE>> = OnceLock::new();
    &ENCODING
}

fn build(name: &'static str, build_fn: fn() -> anyhow::Result<CoreBPE>) -> Option<CoreBPE> {
    match build_fn() {
        Ok(bpe) => Some(bpe),
        Err(source) => {
            let err = TokenizerError::Tiktoken { name, source };
            tracing::warn!(%err, "degrading to character heuristic");
            None
        }
    }
}

fn o200k_count(text: &str) -> u32 {
    count_with(o200k(), "o200k_base", tiktoken_rs::o200k_base, text)
}

fn cl100k_count(text: &str) -> u32 {
    count_with(cl100k(), "cl100k_base", tiktoken_rs::cl100k_base, text)
}

fn count_with(
    cache: &'static OnceLock<Option<CoreBPE>>,
    name: &'static str,
    build_fn: fn() -> anyhow::Result<CoreBPE>,
    text: &str,
) -> u32 {
    cache
        .get_or_init(|| build(name, build_fn))
        .as_ref()
        .map_or_else(|| heuristic_count(text), |bpe| u32::try_from(bpe.encode_with_special_tokens(text).len()).unwrap_or(u32::MAX))
}

fn heuristic_count(text: &str) -> u32 {
    u32::try_from(text.len().div_ceil(4).max(1)).unwrap_or(u32::MAX)
}
