//! Toy next-word prediction.
//!
//! This module contains:
//! - TransitionTable: hand-authored context → continuation weights
//! - Sampler: ranked, noisy, normalized candidates for a piece of text
//! - GenerationSession: the turn-based "pick the next word" loop

pub mod sampler;
pub mod session;
pub mod table;

pub use sampler::{Candidate, MatchLevel, ResolvedContext, Sampler};
pub use session::{ContextKind, GenerationSession, GenerationState, SessionStatus};
pub use table::{TransitionEntry, TransitionTable, normalize_key};
