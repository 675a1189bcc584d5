//! Lazy, best-effort Llama-family tokenizer
//!
//! Mirrors `AutoTokenizer.from_pretrained("meta-llama/Llama-3.2-8B")`:
//! fetch the tokenizer.json from the Hugging Face hub on first use and
//! cache it. Any failure along this path (no network, repo gated, hub
//! unreachable) degrades to the character heuristic rather than
//! raising.

use std::sync::OnceLock;

use tokenizers::Tokenizer;

const REPO: &str = "meta-llama/Llama-3.2-8B";

fn cache() -> &'static OnceLock<Option<Tokenizer>> {
    static CACHE: OnceLock<Option<Tokenizer>> = OnceLock::new();
    &CACHE
}

fn fetch() -> Option<Tokenizer> {
    let api = hf_hub::api::sync::Api::new().ok()?;
    let path = api.model(REPO.to_owned()).get("tokenizer.json").ok()?;
    match Tokenizer::from_file(&path) {
        Ok(tokenizer) => Some(tokenizer),
        Err(err) => {
            tracing::warn!(repo = REPO, error = %err, "llama tokenizer file failed to parse");
            None
        }
    }
}

/// Count tokens with the real Llama tokenizer, if it could be loaded
///
/// Returns `None` when the tokenizer is unavailable; the caller falls
/// back to the character heuristic in that case.
pub fn count_tokens(text: &str) -> Option<u32> {
    let tokenizer = cache()
        .get_or_init(|| {
            let loaded = fetch();
            if loaded.is_none() {
                tracing::warn!(repo = REPO, "llama tokenizer unavailable, degrading to character heuristic");
            }
            loaded
        })
        .as_ref()?;

    match tokenizer.encode(text, false) {
        Ok(encoding) => Some(u32::try_from(encoding.len()).unwrap_or(u32::MAX)),
        Err(err) => {
            tracing::warn!(error = %err, "llama tokenizer encode failed");
            None
        }
    }
}
