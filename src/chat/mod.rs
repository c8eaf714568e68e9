//! External chat collaborator.
//!
//! The role-play lesson talks to a hosted text-generation service. From the
//! caller's side the call is total: any failure comes back as a displayable
//! apology string, never as an error.

pub mod gemini;
pub mod roleplay;

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

pub use gemini::GeminiClient;
pub use roleplay::{ChatMessage, ChatRole, PRESETS, PendingRequest, RolePlay, RolePreset, find_preset};

/// A service that replies to a user message under a role instruction.
#[async_trait]
pub trait ChatCollaborator: Send + Sync {
    /// Generate a reply. Never fails; failures become a fallback string.
    async fn generate_reply(&self, message: &str, role_instruction: &str) -> String;
}

/// Collaborator that plays back canned replies and records every call.
///
/// Used offline and in tests.
#[derive(Debug, Default)]
pub struct ScriptedChat {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(String, String)>>,
    exhausted_reply: String,
}

impl ScriptedChat {
    /// Create a collaborator that returns `replies` in order.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
            exhausted_reply: "...".to_string(),
        }
    }

    /// Reply used once the script runs out.
    pub fn with_exhausted_reply(mut self, reply: impl Into<String>) -> Self {
        self.exhausted_reply = reply.into();
        self
    }

    /// `(message, role_instruction)` pairs received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatCollaborator for ScriptedChat {
    async fn generate_reply(&self, message: &str, role_instruction: &str) -> String {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((message.to_string(), role_instruction.to_string()));
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .unwrap_or_else(|| self.exhausted_reply.clone())
    }
}
