use std::collections::HashSet;
use std::path::Path;

use crate::{Config, ConfigError};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment
    /// variable expansion fails, TOML parsing fails, or validation
    /// fails.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let expanded = crate::env::expand_env(&raw).map_err(|reason| ConfigError::EnvExpansion {
            path: path.to_path_buf(),
            reason,
        })?;

        let config: Self = toml::from_str(&expanded).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate cross-field invariants of the configured model pool
    /// and router policy
    ///
    /// Per-capability invariants (non-empty task set, price/quality
    /// bounds, locality-implies-zero-price) are enforced by the
    /// routing crate's fallible registry constructor; this validation
    /// only catches the cross-field cases that would otherwise make a
    /// registry un-buildable.
    ///
    /// # Errors
    ///
    /// Returns an error if the model list is empty, contains a
    /// duplicate identifier, the fallback model is unknown, or
    /// `min_quality_score` is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.models.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }

        let mut seen = HashSet::with_capacity(self.models.len());
        for model in &self.models {
            if !seen.insert(model.id.as_str()) {
                return Err(ConfigError::DuplicateModelId(model.id.clone()));
            }
        }

        if !seen.contains(self.router.fallback_model.as_str()) {
            return Err(ConfigError::UnknownFallback(self.router.fallback_model.clone()));
        }

        if !(0.0..=1.0).contains(&self.router.min_quality_score) {
            return Err(ConfigError::QualityOutOfRange(self.router.min_quality_score));
        }

        Ok(())
    }
}
