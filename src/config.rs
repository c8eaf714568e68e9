//! Configuration types for llm-inside-out.
//!
//! Every section has a `Default` matching the values the lessons were
//! designed around, so a config file only needs to name what it changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Candidate sampler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Maximum number of candidates shown per step.
    pub top_k: usize,
    /// Half-width of the uniform noise added to each base weight.
    pub noise: f32,
    /// Lower clamp bound for a perturbed weight.
    pub min_weight: f32,
    /// Upper clamp bound for a perturbed weight.
    pub max_weight: f32,
    /// Probabilities are scaled to sum to this value (< 1.0 hints at the
    /// rest of the vocabulary that is not shown).
    pub target_sum: f32,
    /// Longest n-gram suffix tried before falling back to the last word.
    pub max_ngram: usize,
    /// Optional JSON transition table replacing the built-in one.
    pub table_path: Option<PathBuf>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            noise: 0.075,
            min_weight: 0.05,
            max_weight: 0.95,
            target_sum: 0.9,
            max_ngram: 3,
            table_path: None,
        }
    }
}

impl SamplerConfig {
    /// Check the sampler settings.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::Config("sampler.top_k must be at least 1".into()));
        }
        if self.max_ngram == 0 {
            return Err(Error::Config("sampler.max_ngram must be at least 1".into()));
        }
        if !(self.noise >= 0.0 && self.noise.is_finite()) {
            return Err(Error::Config("sampler.noise must be finite and non-negative".into()));
        }
        if !(self.min_weight > 0.0 && self.min_weight <= self.max_weight && self.max_weight <= 1.0)
        {
            return Err(Error::Config(format!(
                "sampler clamp bounds must satisfy 0 < min <= max <= 1, got [{}, {}]",
                self.min_weight, self.max_weight
            )));
        }
        if !(self.target_sum > 0.0 && self.target_sum <= 1.0) {
            return Err(Error::Config("sampler.target_sum must be in (0, 1]".into()));
        }
        Ok(())
    }

    /// Clamp bounds ordered as `(min, max)`.
    ///
    /// Inverted bounds are swapped; a NaN bound falls back to the defaults.
    pub fn clamp_bounds(&self) -> (f32, f32) {
        match (self.min_weight, self.max_weight) {
            (lo, hi) if lo <= hi => (lo, hi),
            (lo, hi) if hi < lo => (hi, lo),
            _ => {
                let defaults = Self::default();
                (defaults.min_weight, defaults.max_weight)
            }
        }
    }
}

/// Generation session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Word every session starts from.
    pub seed_word: String,
    /// Simulated "thinking" time between a selection and new candidates.
    pub thinking_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed_word: "The".to_string(),
            thinking_delay_ms: 500,
        }
    }
}

impl SessionConfig {
    /// Thinking delay as a `Duration`.
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

/// Context window lesson configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextWindowConfig {
    /// Maximum number of tokens the window holds.
    pub capacity: usize,
    /// Tokens present when the lesson opens.
    pub initial_tokens: Vec<String>,
}

impl Default for ContextWindowConfig {
    fn default() -> Self {
        Self {
            capacity: 8,
            initial_tokens: ["Hello", "AI", "how", "are", "you"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Chat collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Hosted model name.
    pub model: String,
    /// API base URL.
    pub base_url: String,
    /// API key. Falls back to `GEMINI_API_KEY` / `API_KEY` when unset.
    pub api_key: Option<String>,
    /// Request timeout in seconds (0 = no client-side timeout).
    pub timeout_secs: u64,
    /// Reply shown when the call fails for any reason.
    pub fallback_reply: String,
    /// Reply shown when the provider returns no text.
    pub empty_reply: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: None,
            timeout_secs: 0,
            fallback_reply: "Oops! My brain circuit tripped. Check the console.".to_string(),
            empty_reply: "No response generated.".to_string(),
        }
    }
}

impl ChatConfig {
    /// Resolve the API key from config or environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sampler: SamplerConfig,
    pub session: SessionConfig,
    pub context_window: ContextWindowConfig,
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: AppConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the lessons cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.sampler.validate()?;
        if self.session.seed_word.split_whitespace().count() != 1 {
            return Err(Error::Config("session.seed_word must be a single word".into()));
        }
        if self.context_window.capacity == 0 {
            return Err(Error::Config("context_window.capacity must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sampler.top_k, 4);
        assert_eq!(config.session.seed_word, "The");
        assert_eq!(config.context_window.capacity, 8);
        assert_eq!(config.session.thinking_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "sampler": { "top_k": 3 } }"#).unwrap();
        assert_eq!(config.sampler.top_k, 3);
        assert_eq!(config.sampler.target_sum, 0.9);
        assert_eq!(config.context_window.capacity, 8);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.sampler.top_k = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sampler.min_weight = 0.9;
        config.sampler.max_weight = 0.1;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.context_window.capacity = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.session.seed_word = "Once upon".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sampler_section_validates_alone() {
        let inverted = SamplerConfig {
            min_weight: 0.9,
            max_weight: 0.1,
            ..SamplerConfig::default()
        };
        assert!(matches!(inverted.validate(), Err(Error::Config(_))));
        assert_eq!(inverted.clamp_bounds(), (0.1, 0.9));

        let unbounded = SamplerConfig {
            noise: f32::INFINITY,
            ..SamplerConfig::default()
        };
        assert!(unbounded.validate().is_err());

        let nan = SamplerConfig {
            min_weight: f32::NAN,
            ..SamplerConfig::default()
        };
        assert_eq!(nan.clamp_bounds(), (0.05, 0.95));
        assert!(SamplerConfig::default().validate().is_ok());
    }
}
