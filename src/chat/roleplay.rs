//! Role-play lesson: the same model, different system prompts.

use std::sync::Arc;

use tracing::{debug, info};

use super::ChatCollaborator;
use crate::error::{Error, Result};
use crate::lessons::RobotMood;

/// A selectable persona.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePreset {
    /// Stable identifier.
    pub id: &'static str,
    /// Menu label.
    pub label: &'static str,
    /// System prompt sent with every message.
    pub instruction: &'static str,
    /// Robot face shown for this persona.
    pub mood: RobotMood,
}

/// Built-in personas. The first one is the default.
pub static PRESETS: &[RolePreset] = &[
    RolePreset {
        id: "assistant",
        label: "Helpful Assistant",
        instruction: "You are a helpful, polite, and concise AI assistant.",
        mood: RobotMood::Teacher,
    },
    RolePreset {
        id: "pirate",
        label: "Angry Pirate",
        instruction: "You are an angry pirate captain. Use lots of pirate slang like Arr, Matey, Plank. Be rude but funny.",
        mood: RobotMood::Pirate,
    },
    RolePreset {
        id: "yoda",
        label: "Wise Alien",
        instruction: "You are a wise alien master who speaks in inverted sentences. Cryptic you are.",
        mood: RobotMood::Detective,
    },
    RolePreset {
        id: "baby",
        label: "Toddler",
        instruction: "You are a 3 year old kid. You only speak in very simple words and get distracted easily. Mention toys.",
        mood: RobotMood::Happy,
    },
];

/// Look up a preset by id.
pub fn find_preset(id: &str) -> Result<&'static RolePreset> {
    PRESETS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id.trim()))
        .ok_or_else(|| Error::Unknown {
            kind: "role",
            name: id.to_string(),
        })
}

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

/// One line of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Per-conversation message number.
    pub id: u64,
    pub role: ChatRole,
    pub text: String,
}

/// A submitted message waiting for its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub message: String,
    pub role_instruction: String,
}

/// Chat under a selectable system prompt.
pub struct RolePlay {
    chat: Arc<dyn ChatCollaborator>,
    preset: &'static RolePreset,
    messages: Vec<ChatMessage>,
    waiting: bool,
    next_id: u64,
}

impl RolePlay {
    /// Start with the default persona and an empty conversation.
    pub fn new(chat: Arc<dyn ChatCollaborator>) -> Self {
        Self {
            chat,
            preset: &PRESETS[0],
            messages: Vec::new(),
            waiting: false,
            next_id: 0,
        }
    }

    /// Current persona.
    pub fn preset(&self) -> &'static RolePreset {
        self.preset
    }

    /// Conversation so far.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether a reply is pending.
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// Switch persona. The conversation is cleared so the change shows.
    pub fn change_role(&mut self, id: &str) -> Result<()> {
        self.preset = find_preset(id)?;
        self.messages.clear();
        self.waiting = false;
        info!(role = self.preset.id, "role changed");
        Ok(())
    }

    /// Record a user message and mark a reply as pending.
    ///
    /// Returns `None` for blank input or while a reply is pending.
    pub fn submit(&mut self, input: &str) -> Option<PendingRequest> {
        let text = input.trim();
        if text.is_empty() || self.waiting {
            return None;
        }
        self.push(ChatRole::User, text.to_string());
        self.waiting = true;
        Some(PendingRequest {
            message: text.to_string(),
            role_instruction: self.preset.instruction.to_string(),
        })
    }

    /// Record the model reply for the pending request.
    ///
    /// Returns `None` and drops the reply when nothing is pending, e.g.
    /// after `change_role` discarded the request it answers.
    pub fn deliver(&mut self, reply: String) -> Option<&ChatMessage> {
        if !self.waiting {
            debug!("dropping reply with no pending request");
            return None;
        }
        self.waiting = false;
        Some(self.push(ChatRole::Model, reply))
    }

    /// Submit a message and wait for the reply.
    pub async fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        let request = self.submit(input)?;
        let reply = self
            .chat
            .generate_reply(&request.message, &request.role_instruction)
            .await;
        self.deliver(reply)
    }

    fn push(&mut self, role: ChatRole, text: String) -> &ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage { id, role, text });
        &self.messages[self.messages.len() - 1]
    }
}
