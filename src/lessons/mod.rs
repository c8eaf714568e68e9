//! Lesson navigation and the smaller, self-contained lessons.
//!
//! The prediction game and the context window live in their own modules;
//! the lessons here are mostly fixed data with a little interaction.

pub mod attention;
pub mod embeddings;
pub mod finetuning;
pub mod hallucination;
pub mod pretraining;

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Identifier of a lesson, in course order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonId {
    Intro,
    Prediction,
    Embeddings,
    PreTraining,
    FineTuning,
    SystemPrompt,
    Attention,
    Context,
    Hallucination,
}

impl LessonId {
    /// All lessons in course order.
    pub const ALL: [LessonId; 9] = [
        LessonId::Intro,
        LessonId::Prediction,
        LessonId::Embeddings,
        LessonId::PreTraining,
        LessonId::FineTuning,
        LessonId::SystemPrompt,
        LessonId::Attention,
        LessonId::Context,
        LessonId::Hallucination,
    ];

    /// Stable identifier, also accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Prediction => "prediction",
            Self::Embeddings => "embeddings",
            Self::PreTraining => "pretraining",
            Self::FineTuning => "finetuning",
            Self::SystemPrompt => "systemprompt",
            Self::Attention => "attention",
            Self::Context => "context",
            Self::Hallucination => "hallucination",
        }
    }

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Intro => "Start",
            Self::Prediction => "1. Prediction",
            Self::Embeddings => "2. Embeddings",
            Self::PreTraining => "3. Pre-Training",
            Self::FineTuning => "4. Fine-Tuning",
            Self::SystemPrompt => "5. System Prompt",
            Self::Attention => "6. Attention",
            Self::Context => "7. Context Window",
            Self::Hallucination => "8. Hallucinations",
        }
    }

    /// One-line summary shown in the lesson list.
    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Intro => "De-mystify the magic behind chatbots. No heavy math.",
            Self::Prediction => "LLMs predict what word comes next. Build a sentence and watch probabilities shift.",
            Self::Embeddings => "Embeddings turn words into vectors so we can do math with meaning.",
            Self::PreTraining => "Before an AI can chat, it has to read. A LOT.",
            Self::FineTuning => "Teach a model to follow instructions, not just babble.",
            Self::SystemPrompt => "Give the model a role before the conversation starts.",
            Self::Attention => "When reading a word, the model looks back at specific earlier words.",
            Self::Context => "Limited short-term memory: add too much and the oldest falls off.",
            Self::Hallucination => "Models complete patterns, even when the facts aren't there.",
        }
    }

    /// Position in the course, starting at 0.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|l| l == self).unwrap_or(0)
    }

    /// Next lesson, if any.
    pub fn next(&self) -> Option<LessonId> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Previous lesson, if any.
    pub fn previous(&self) -> Option<LessonId> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        Self::ALL
            .iter()
            .find(|l| l.as_str() == wanted)
            .copied()
            .ok_or_else(|| Error::Unknown {
                kind: "lesson",
                name: s.to_string(),
            })
    }
}

/// Expression of the robot guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RobotMood {
    Neutral,
    Happy,
    Confused,
    Teacher,
    Pirate,
    Detective,
    Thinking,
    Doctor,
    Banker,
    Sleepy,
}

impl RobotMood {
    /// Terminal face for the mood.
    pub fn face(&self) -> &'static str {
        match self {
            Self::Neutral => "[o_o]",
            Self::Happy => "[^_^]",
            Self::Confused => "[o_O]?",
            Self::Teacher => "[-_-]b",
            Self::Pirate => "[x_o]>",
            Self::Detective => "[?_?]",
            Self::Thinking => "[._.]...",
            Self::Doctor => "[+_+]",
            Self::Banker => "[$_$]",
            Self::Sleepy => "[-_-]z",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lesson_ids() {
        assert_eq!("prediction".parse::<LessonId>().unwrap(), LessonId::Prediction);
        assert_eq!("Pre-Training".parse::<LessonId>().unwrap(), LessonId::PreTraining);
        assert_eq!("system_prompt".parse::<LessonId>().unwrap(), LessonId::SystemPrompt);
        assert!("quantum".parse::<LessonId>().is_err());
    }

    #[test]
    fn test_navigation_order() {
        assert_eq!(LessonId::Intro.previous(), None);
        assert_eq!(LessonId::Intro.next(), Some(LessonId::Prediction));
        assert_eq!(LessonId::Hallucination.next(), None);
        for lesson in LessonId::ALL {
            assert_eq!(lesson.to_string().parse::<LessonId>().unwrap(), lesson);
        }
    }
}
