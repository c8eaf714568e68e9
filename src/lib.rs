//! llm-inside-out: how a language model works, lesson by lesson.
//!
//! The core of the crate is a toy next-word predictor:
//! - A lexical transition table with n-gram, last-word and default lookups
//! - A candidate sampler with injectable randomness
//! - A generation session that grows a sentence one chosen word at a time
//! - A fixed-capacity context window that forgets its oldest tokens
//!
//! Around it sit the smaller lessons (embeddings, attention, training,
//! role play, hallucination) and the terminal rendering used by the CLI.

pub mod config;
pub mod error;

pub mod chat;
pub mod context_window;
pub mod educational;
pub mod lessons;
pub mod prediction;

pub use chat::{ChatCollaborator, GeminiClient, RolePlay, ScriptedChat};
pub use config::{AppConfig, ChatConfig, ContextWindowConfig, SamplerConfig, SessionConfig};
pub use context_window::ContextWindow;
pub use error::{Error, Result};
pub use lessons::{LessonId, RobotMood};
pub use prediction::{
    Candidate, GenerationSession, GenerationState, Sampler, SessionStatus, TransitionTable,
};
