use std::path::PathBuf;

use clap::Parser;

/// gatecraft: a model-serving gateway core
///
/// Loads a model pool and router policy from a TOML config, sizes and
/// prices one request, and prints the resulting routing decision.
#[derive(Debug, Parser)]
#[command(name = "gatecraft", about = "Model routing gateway core")]
pub struct Args {
    /// Path to the TOML config describing the model pool and policy
    #[arg(short, long, default_value = "gatecraft.toml", env = "GATECRAFT_CONFIG")]
    pub config: PathBuf,

    /// The kind of work this request performs, e.g. chat, code,
    /// embedding, image-analysis
    #[arg(short, long, default_value = "chat")]
    pub task: String,

    /// The request text (or a representative prompt) to size for routing
    #[arg(short, long, default_value = "Hello, world!")]
    pub prompt: String,

    /// Model identifier used to pick a tokenizer family when sizing
    /// the prompt; independent of which model the request is routed to
    #[arg(long, default_value = "gpt-4o")]
    pub sizing_model: String,

    /// Require a model that runs on local hardware
    #[arg(long)]
    pub require_local: bool,

    /// Minimum acceptable quality score, overriding the config default
    #[arg(long)]
    pub min_quality: Option<f64>,

    /// Maximum acceptable cost in USD, overriding the config default.
    /// Pass 0.0 to pin the decision to free (local) models.
    #[arg(long)]
    pub max_cost: Option<f64>,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}
