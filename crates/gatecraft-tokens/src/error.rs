use thiserror::Error;

/// Errors a tokenizer construction can raise
///
/// Per-request counting never fails: any tokenizer that cannot be
/// built or used degrades to the character heuristic instead of
/// propagating an error (see [`crate::TokenCount::method`]). This
/// type exists only for the pieces of setup that genuinely cannot be
/// worked around, such as a corrupt built-in BPE table.
#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("failed to build tiktoken encoding {name}: {source}")]
    Tiktoken {
        name: &'static str,
        #[source]
        source: anyhow::Error,
    },
}
