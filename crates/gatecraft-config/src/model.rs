//! Declarative model and routing-policy configuration
//!
//! These are the on-disk (TOML) shapes. The routing crate turns
//! [`ModelCapabilityConfig`] entries into runtime `ModelCapability`
//! records and validates the invariants a well-formed registry requires.

use serde::Deserialize;

/// The closed set of work categories the router understands
///
/// Extensible only by code change: a `TaskKind` with no supporting
/// registry entry (and no fallback support) makes routing impossible
/// for that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    Chat,
    Code,
    AudioTranscription,
    AudioGeneration,
    ImageAnalysis,
    VideoAnalysis,
    Embedding,
    Summarization,
    CreativeWriting,
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Chat => "chat",
            Self::Code => "code",
            Self::AudioTranscription => "audio-transcription",
            Self::AudioGeneration => "audio-generation",
            Self::ImageAnalysis => "image-analysis",
            Self::VideoAnalysis => "video-analysis",
            Self::Embedding => "embedding",
            Self::Summarization => "summarization",
            Self::CreativeWriting => "creative-writing",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(Self::Chat),
            "code" => Ok(Self::Code),
            "audio-transcription" => Ok(Self::AudioTranscription),
            "audio-generation" => Ok(Self::AudioGeneration),
            "image-analysis" => Ok(Self::ImageAnalysis),
            "video-analysis" => Ok(Self::VideoAnalysis),
            "embedding" => Ok(Self::Embedding),
            "summarization" => Ok(Self::Summarization),
            "creative-writing" => Ok(Self::CreativeWriting),
            other => Err(format!("unknown task kind {other:?}")),
        }
    }
}

/// Declarative description of one candidate model
///
/// Mirrors `ModelCapability` field for field; the
/// routing crate's `ModelCapability` is the validated runtime form of
/// this type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelCapabilityConfig {
    /// Globally unique identifier, `<provider-tag>:<model-id>`
    pub id: String,
    /// Provider tag (e.g. "local-mlx", "cloud-anthropic"); drives
    /// tokenizer-family matching and the locality bonus
    pub provider: String,
    /// Task kinds this model may be routed to (must be non-empty)
    pub supports: Vec<TaskKind>,
    /// Maximum context window, in tokens
    pub max_context_tokens: u32,
    /// USD cost per 1000 input tokens
    #[serde(default)]
    pub input_price_per_1k: f64,
    /// USD cost per 1000 output tokens
    #[serde(default)]
    pub output_price_per_1k: f64,
    /// Baseline average latency in milliseconds, used until real
    /// samples are recorded
    pub baseline_latency_ms: u32,
    /// Quality score in `[0, 1]`
    pub quality_score: f64,
    /// Whether this model runs on local hardware (zero cost)
    #[serde(default)]
    pub is_local: bool,
    /// Whether this model requires a local accelerator to run
    #[serde(default)]
    pub requires_accelerator: bool,
}

/// Tunable router policy
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Award a locality bonus to local models during scoring
    #[serde(default = "default_prefer_local")]
    pub prefer_local: bool,
    /// Default per-request cost ceiling in USD, used when a caller
    /// does not supply an explicit `max_cost`
    #[serde(default = "default_max_cost_usd")]
    pub max_cost_usd: f64,
    /// Default per-request latency ceiling in milliseconds
    #[serde(default = "default_max_latency_ms")]
    pub max_latency_ms: u32,
    /// Minimum acceptable quality score in `[0, 1]`
    #[serde(default = "default_min_quality_score")]
    pub min_quality_score: f64,
    /// Identifier of the model used when no candidate survives
    /// filtering; must exist in the registry at startup
    pub fallback_model: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            prefer_local: default_prefer_local(),
            max_cost_usd: default_max_cost_usd(),
            max_latency_ms: default_max_latency_ms(),
            min_quality_score: default_min_quality_score(),
            fallback_model: "local-mlx:llama-3.2-8b".to_owned(),
        }
    }
}

const fn default_prefer_local() -> bool {
    true
}

const fn default_max_cost_usd() -> f64 {
    0.50
}

const fn default_max_latency_ms() -> u32 {
    2000
}

const fn default_min_quality_score() -> f64 {
    0.80
}

/// One entry of a pricing-table override
///
/// Kept as an ordered sequence, not a map, because resolution is
/// first-match-wins on a substring test — TOML arrays
/// preserve declaration order, a `HashMap` would not.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingRuleConfig {
    /// Substring matched against the lowercased model identifier
    pub family: String,
    /// USD per 1000 input tokens
    pub input_per_1k: f64,
    /// USD per 1000 output tokens
    pub output_per_1k: f64,
}
