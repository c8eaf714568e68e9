//! Generation session: build a sentence one word at a time.
//!
//! The session owns the text generated so far and the candidates currently
//! on offer. Selecting a candidate moves it through a small state machine:
//!
//! ```text
//!            begin_advance(word)              complete_advance()
//!   Ready ───────────────────────▶ Computing ───────────────────▶ Ready
//!     ▲                                                              │
//!     └──────────────────────────── reset() ◀────────────────────────┘
//! ```
//!
//! `Computing` stands in for the model "thinking". The session refuses a
//! second advance while one is in flight.

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::sampler::{Candidate, Sampler};
use crate::config::SessionConfig;
use crate::error::{Error, Result};

/// Status of a generation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Candidates are available for selection.
    Ready,
    /// A selection was made; new candidates are being computed.
    Computing,
}

impl SessionStatus {
    /// Get the status name as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Computing => "Computing",
        }
    }
}

/// Broad topic the generated text has drifted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    Pet,
    Medical,
    Finance,
    Weather,
    Neutral,
}

impl ContextKind {
    /// Classify text by the topic words it contains.
    ///
    /// Checked in order; the first topic with a matching word wins. Only
    /// whole words count, so "scatter" is not about cats.
    pub fn classify(text: &str) -> Self {
        const RULES: &[(ContextKind, &[&str])] = &[
            (ContextKind::Pet, &["cat", "dog"]),
            (ContextKind::Medical, &["patient", "symptoms"]),
            (ContextKind::Finance, &["stock", "market"]),
            (ContextKind::Weather, &["weather"]),
        ];

        let words: Vec<&str> = text
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .collect();
        RULES
            .iter()
            .find(|(_, topic)| {
                topic
                    .iter()
                    .any(|t| words.iter().any(|w| w.eq_ignore_ascii_case(t)))
            })
            .map(|(kind, _)| *kind)
            .unwrap_or(ContextKind::Neutral)
    }
}

/// Snapshot of a session for display.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationState {
    /// Space-joined generated text.
    pub generated_text: String,
    /// Words in the order they were added, seed first.
    pub history: Vec<String>,
    /// Current candidates, best first.
    pub current_candidates: Vec<Candidate>,
    /// Whether new candidates are being computed.
    pub is_computing: bool,
}

/// Interactive next-word generation session.
///
/// # Example
///
/// ```
/// use llm_inside_out::config::{SamplerConfig, SessionConfig};
/// use llm_inside_out::prediction::{GenerationSession, Sampler, TransitionTable};
///
/// let sampler = Sampler::with_seed(TransitionTable::builtin(), &SamplerConfig::default(), 7);
/// let mut session = GenerationSession::new(sampler, &SessionConfig::default());
/// assert_eq!(session.generated_text(), "The");
///
/// let word = session.candidates()[0].word.clone();
/// session.advance(&word).unwrap();
/// assert_eq!(session.history().len(), 2);
/// ```
#[derive(Debug)]
pub struct GenerationSession<R = StdRng> {
    sampler: Sampler<R>,
    seed_word: String,
    thinking_delay: std::time::Duration,
    generated_text: String,
    history: Vec<String>,
    candidates: Vec<Candidate>,
    status: SessionStatus,
}

impl<R: Rng> GenerationSession<R> {
    /// Start a session at the seed word with freshly sampled candidates.
    pub fn new(sampler: Sampler<R>, config: &SessionConfig) -> Self {
        let mut session = Self {
            sampler,
            seed_word: config.seed_word.clone(),
            thinking_delay: config.thinking_delay(),
            generated_text: String::new(),
            history: Vec::new(),
            candidates: Vec::new(),
            status: SessionStatus::Ready,
        };
        session.reset();
        session
    }

    // ========== Getters ==========

    /// Text generated so far.
    pub fn generated_text(&self) -> &str {
        &self.generated_text
    }

    /// Words added so far, seed first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Current candidates, best first.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whether new candidates are being computed.
    pub fn is_computing(&self) -> bool {
        self.status == SessionStatus::Computing
    }

    /// Seed word the session starts from.
    pub fn seed_word(&self) -> &str {
        &self.seed_word
    }

    /// Topic of the text so far.
    pub fn context_kind(&self) -> ContextKind {
        ContextKind::classify(&self.generated_text)
    }

    /// The sampler backing this session.
    pub fn sampler(&self) -> &Sampler<R> {
        &self.sampler
    }

    /// Snapshot of the session for display.
    pub fn state(&self) -> GenerationState {
        GenerationState {
            generated_text: self.generated_text.clone(),
            history: self.history.clone(),
            current_candidates: self.candidates.clone(),
            is_computing: self.is_computing(),
        }
    }

    // ========== Transitions ==========

    /// Ready -> Computing: append a selected candidate to the text.
    ///
    /// The candidate list is left untouched until `complete_advance`.
    pub fn begin_advance(&mut self, word: &str) -> Result<()> {
        if self.is_computing() {
            return Err(Error::SessionBusy);
        }
        let selected = self
            .candidates
            .iter()
            .find(|c| c.word.eq_ignore_ascii_case(word))
            .map(|c| c.word.clone())
            .ok_or_else(|| Error::NotACandidate(word.to_string()))?;

        self.generated_text.push(' ');
        self.generated_text.push_str(&selected);
        self.history.push(selected);
        self.status = SessionStatus::Computing;
        debug!(text = %self.generated_text, "advance started");
        Ok(())
    }

    /// Computing -> Ready: sample candidates for the updated text.
    pub fn complete_advance(&mut self) -> Result<&[Candidate]> {
        if !self.is_computing() {
            return Err(Error::NotComputing);
        }
        self.candidates = self.sampler.sample(&self.generated_text);
        self.status = SessionStatus::Ready;
        Ok(&self.candidates)
    }

    /// Select a candidate and compute the next candidates immediately.
    pub fn advance(&mut self, word: &str) -> Result<&[Candidate]> {
        self.begin_advance(word)?;
        self.complete_advance()
    }

    /// Select a candidate, wait out the thinking delay, then compute the
    /// next candidates.
    pub async fn advance_with_delay(&mut self, word: &str) -> Result<&[Candidate]> {
        self.begin_advance(word)?;
        tokio::time::sleep(self.thinking_delay).await;
        self.complete_advance()
    }

    /// Return to the seed word from any state.
    pub fn reset(&mut self) {
        self.generated_text = self.seed_word.clone();
        self.history = vec![self.seed_word.clone()];
        self.candidates = self.sampler.sample(&self.generated_text);
        self.status = SessionStatus::Ready;
        info!(seed = %self.seed_word, "generation session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SamplerConfig;
    use crate::prediction::table::TransitionTable;

    fn session() -> GenerationSession {
        let config = SamplerConfig {
            noise: 0.0,
            ..SamplerConfig::default()
        };
        let sampler = Sampler::with_seed(TransitionTable::builtin(), &config, 1);
        GenerationSession::new(sampler, &SessionConfig::default())
    }

    #[test]
    fn test_classify_context() {
        assert_eq!(ContextKind::classify("The cat sat"), ContextKind::Pet);
        assert_eq!(ContextKind::classify("The patient reported"), ContextKind::Medical);
        assert_eq!(ContextKind::classify("The stock rose"), ContextKind::Finance);
        assert_eq!(ContextKind::classify("The weather today"), ContextKind::Weather);
        assert_eq!(ContextKind::classify("The"), ContextKind::Neutral);
    }

    #[test]
    fn test_classify_matches_whole_words() {
        assert_eq!(ContextKind::classify("The educated guess"), ContextKind::Neutral);
        assert_eq!(ContextKind::classify("A scatter plot"), ContextKind::Neutral);
        assert_eq!(ContextKind::classify("Stockholm weather"), ContextKind::Weather);
        assert_eq!(ContextKind::classify("Look, a CAT."), ContextKind::Pet);
    }

    #[test]
    fn test_begin_and_complete() {
        let mut s = session();
        s.begin_advance("dog").unwrap();
        assert!(s.is_computing());
        assert_eq!(s.generated_text(), "The dog");
        assert!(matches!(s.begin_advance("cat"), Err(Error::SessionBusy)));

        s.complete_advance().unwrap();
        assert_eq!(s.status(), SessionStatus::Ready);
        assert_eq!(s.candidates()[0].word, "barked");
        assert!(matches!(s.complete_advance(), Err(Error::NotComputing)));
    }

    #[test]
    fn test_selection_is_case_insensitive() {
        let mut s = session();
        s.advance("CAT").unwrap();
        assert_eq!(s.generated_text(), "The cat");
    }
}
