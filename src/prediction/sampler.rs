//! Candidate sampling for the prediction game.
//!
//! Turns the text generated so far into a short, ranked list of next-word
//! candidates. The weights are hand-authored; a little bounded noise is
//! mixed in so repeated runs look like a model sampling with temperature.
//!
//! ## Sampling Pipeline
//!
//! ```text
//! Generated text "The cat sat"
//!     │
//!     ▼ Context key: longest known suffix
//! "the cat sat" → "cat sat" → "sat" → <default>
//!     │
//!     ▼ Transition table lookup
//! [(on, 0.55), (quietly, 0.20), ...]
//!     │
//!     ▼ Noise: w + U(-noise, +noise), clamped to [min, max]
//!     │
//!     ▼ Sort descending
//!     │
//!     ▼ Normalize: w / Σw × target_sum
//!     │
//!     ▼ Top-k
//! Candidates
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::table::{TransitionEntry, TransitionTable};
use crate::config::SamplerConfig;

/// A word offered to the user with its displayed probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Candidate word.
    pub word: String,
    /// Displayed probability in [0, 1].
    pub probability: f32,
}

/// How the context key was matched against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLevel {
    /// An n-gram suffix of this many words matched.
    NGram(usize),
    /// Only the last word matched.
    LastWord,
    /// Nothing matched; the default set was used.
    Default,
}

impl MatchLevel {
    /// Short human-readable description.
    pub fn describe(&self) -> String {
        match self {
            Self::NGram(n) => format!("last {n} words"),
            Self::LastWord => "last word".to_string(),
            Self::Default => "no match, default guesses".to_string(),
        }
    }
}

/// Result of resolving generated text to table entries.
#[derive(Debug, Clone)]
pub struct ResolvedContext<'a> {
    /// The matched key, `None` for the default set.
    pub key: Option<String>,
    /// Which fallback level produced the match.
    pub level: MatchLevel,
    /// Entries for the key.
    pub entries: &'a [TransitionEntry],
}

/// Candidate sampler over a transition table with an injected RNG.
#[derive(Debug, Clone)]
pub struct Sampler<R = StdRng> {
    table: TransitionTable,
    /// Maximum candidates returned.
    top_k: usize,
    /// Half-width of the uniform noise.
    noise: f32,
    /// Clamp bounds for perturbed weights.
    min_weight: f32,
    max_weight: f32,
    /// Probabilities sum to this after normalization.
    target_sum: f32,
    /// Longest suffix tried.
    max_ngram: usize,
    /// Random number generator.
    rng: R,
}

impl Sampler<StdRng> {
    /// Creates a new sampler seeded from the OS.
    pub fn new(table: TransitionTable, config: &SamplerConfig) -> Self {
        Self::with_rng(table, config, StdRng::from_entropy())
    }

    /// Creates a new sampler with a specific seed for reproducibility.
    pub fn with_seed(table: TransitionTable, config: &SamplerConfig, seed: u64) -> Self {
        Self::with_rng(table, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Sampler<R> {
    /// Creates a new sampler drawing noise from `rng`.
    ///
    /// Out-of-range settings are coerced rather than rejected, so `sample`
    /// never fails; use [`SamplerConfig::validate`] to report them instead.
    pub fn with_rng(table: TransitionTable, config: &SamplerConfig, rng: R) -> Self {
        let (min_weight, max_weight) = config.clamp_bounds();
        let noise = if config.noise.is_finite() {
            config.noise.max(0.0)
        } else {
            0.0
        };
        Self {
            table,
            top_k: config.top_k.max(1),
            noise,
            min_weight,
            max_weight,
            target_sum: config.target_sum,
            max_ngram: config.max_ngram.max(1),
            rng,
        }
    }

    /// Find the table entries for the generated text.
    ///
    /// Tries the longest known n-gram suffix first, then the last word,
    /// then the default set. Never fails.
    pub fn resolve<'a>(&'a self, text: &str) -> ResolvedContext<'a> {
        let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();

        let longest = self
            .max_ngram
            .min(words.len())
            .min(self.table.max_key_words());
        for n in (1..=longest).rev() {
            let key = words[words.len() - n..].join(" ");
            if let Some(entries) = self.table.resolve(&key) {
                let level = if n == 1 {
                    MatchLevel::LastWord
                } else {
                    MatchLevel::NGram(n)
                };
                return ResolvedContext {
                    key: Some(key),
                    level,
                    entries,
                };
            }
        }

        ResolvedContext {
            key: None,
            level: MatchLevel::Default,
            entries: self.table.default_candidates(),
        }
    }

    /// Sample the ranked candidate list for the generated text.
    ///
    /// Always returns between 1 and `top_k` candidates, sorted by
    /// descending probability.
    pub fn sample(&mut self, text: &str) -> Vec<Candidate> {
        let (key, level, entries) = {
            let resolved = self.resolve(text);
            (resolved.key, resolved.level, resolved.entries.to_vec())
        };

        let mut weighted: Vec<(String, f32)> = entries
            .into_iter()
            .map(|e| {
                let w = self.perturb(e.base_weight);
                (e.word, w)
            })
            .collect();

        weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let total: f32 = weighted.iter().map(|(_, w)| w).sum();
        let candidates: Vec<Candidate> = weighted
            .into_iter()
            .take(self.top_k)
            .map(|(word, w)| Candidate {
                word,
                probability: if total > 0.0 {
                    (w / total * self.target_sum).clamp(0.0, 1.0)
                } else {
                    0.0
                },
            })
            .collect();

        debug!(
            text,
            key = key.as_deref().unwrap_or("<default>"),
            level = ?level,
            n = candidates.len(),
            "sampled candidates"
        );

        candidates
    }

    /// Add bounded uniform noise to a base weight and clamp it.
    fn perturb(&mut self, base_weight: f32) -> f32 {
        let offset = if self.noise > 0.0 {
            self.rng.gen_range(-self.noise..=self.noise)
        } else {
            0.0
        };
        (base_weight + offset).clamp(self.min_weight, self.max_weight)
    }

    /// The transition table in use.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Maximum number of candidates returned.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Set top-k.
    pub fn set_top_k(&mut self, top_k: usize) {
        self.top_k = top_k.max(1);
    }
}
