//! Educational text content for the lessons.
//!
//! This module contains the explanations used by the tutorial and the
//! `explain` command. Each topic has several detail levels.

/// An educational explanation with multiple detail levels.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// One-line summary.
    pub short: &'static str,
    /// 2-3 sentence explanation.
    pub medium: &'static str,
    /// Full explanation with examples.
    pub detailed: &'static str,
    /// Why this matters / intuition.
    pub why: &'static str,
}

/// Detail level for explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplanationLevel {
    /// One-line summary.
    Short,
    /// 2-3 sentence explanation.
    Medium,
    /// Full explanation with examples.
    Detailed,
    /// Why this matters / intuition.
    Why,
}

impl ExplanationLevel {
    /// Parse a level name, defaulting to `Medium` for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "short" => Self::Short,
            "detailed" | "long" => Self::Detailed,
            "why" => Self::Why,
            _ => Self::Medium,
        }
    }
}

impl Explanation {
    /// Get the explanation at the specified detail level.
    pub fn get(&self, level: ExplanationLevel) -> &'static str {
        match level {
            ExplanationLevel::Short => self.short,
            ExplanationLevel::Medium => self.medium,
            ExplanationLevel::Detailed => self.detailed,
            ExplanationLevel::Why => self.why,
        }
    }
}

// =============================================================================
// PREDICTION
// =============================================================================

/// Explanation for next-word prediction.
pub const PREDICTION_EXPLANATION: Explanation = Explanation {
    short: "An LLM writes by guessing the next word, over and over.",
    medium: "LLMs don't 'know' things the way a database does. Given the text so \
far, they produce a probability for every possible next word, pick one, append \
it, and repeat.",
    detailed: "Every step of generation looks the same:
1. Look at the context (all the text so far)
2. Score every word in the vocabulary
3. Turn scores into probabilities
4. Pick a word and append it

After \"The cat\", words like \"sat\" and \"meowed\" are likely.
After \"The patient\", medical words like \"reported\" take over.
The context shifts the whole distribution.",
    why: "WHY PREDICTION? Predicting the next word well requires modelling \
grammar, facts, and style all at once. Train on enough text and that one \
simple objective produces surprisingly capable behaviour.",
};

/// Explanation for temperature / sampling randomness.
pub const TEMPERATURE_EXPLANATION: Explanation = Explanation {
    short: "Temperature adds controlled randomness to the choice of word.",
    medium: "Real models rarely pick the single most likely word every time. \
A temperature setting flattens or sharpens the probabilities, which is why the \
same prompt can give different answers.",
    detailed: "Low temperature (close to 0): almost always the top word.
Predictable, repetitive, safe.

High temperature (above 1): less likely words get a real chance.
Creative, surprising, sometimes nonsense.

In the prediction game the probabilities wobble a little between runs to
imitate this. The order of the big favourites rarely changes.",
    why: "WHY RANDOMNESS? Always choosing the top word leads to dull, looping \
text. A little randomness lets the model explore while still following the \
patterns it learned.",
};

// =============================================================================
// EMBEDDINGS
// =============================================================================

/// Explanation for embeddings.
pub const EMBEDDINGS_EXPLANATION: Explanation = Explanation {
    short: "Words become lists of numbers so we can do math with meaning.",
    medium: "Computers only understand numbers. Embeddings turn each word into a \
vector; words with related meanings end up close together, and directions in the \
space carry meaning too.",
    detailed: "Old school: count words. \"The cat runs\" and \"The dog runs\" share
two of three words, so they look similar. \"Apple pie recipe\" shares none.

Neural: learn a position for every word. Cats sit near kittens, pizza
near pasta, computers near code.

Directions matter:
  King - Man + Woman ≈ Queen",
    why: "WHY VECTORS? Once meaning is geometry, similarity is just distance \
and analogies are just arithmetic. Everything else in the model builds on \
these vectors.",
};

// =============================================================================
// TRAINING
// =============================================================================

/// Explanation for pre-training.
pub const PRETRAINING_EXPLANATION: Explanation = Explanation {
    short: "Before it can chat, a model reads an enormous amount of text.",
    medium: "Pre-training shows the model a huge slice of the internet, books and \
code, always asking it to predict the next word. It learns patterns, not a \
lookup table of facts.",
    detailed: "1. Massive data: it sees how humans use language in every context.
2. Pattern recognition: \"King\" is to \"Queen\" as \"Man\" is to \"Woman\".
3. The base model: smart but chaotic. Ask \"What is the capital of France?\"
   and it may answer \"What is the capital of Germany?\", because it is
   just continuing a list.",
    why: "WHY SO MUCH TEXT? The more varied the examples, the more general the \
patterns. Scale is what turns next-word prediction into broad knowledge.",
};

/// Explanation for fine-tuning.
pub const FINETUNING_EXPLANATION: Explanation = Explanation {
    short: "Fine-tuning teaches a base model to follow instructions.",
    medium: "After pre-training, the model is shown many instruction / input / \
ideal-output examples. It learns to answer the question asked, politely and \
safely, instead of just continuing text.",
    detailed: "Each training example has three parts:
  Instruction: how to behave (\"Do not diagnose. Encourage professional help.\")
  Input:       what a user says (\"I have chest pain and dizziness.\")
  Output:      the response we want

Domain examples (medical, finance) teach caution where mistakes are costly.",
    why: "WHY FINE-TUNE? A base model knows a lot but has no manners. A few \
thousand good examples shape how all that knowledge is used.",
};

/// Explanation for system prompts.
pub const SYSTEM_PROMPT_EXPLANATION: Explanation = Explanation {
    short: "A system prompt gives the model a role before the chat starts.",
    medium: "The system prompt is hidden text placed before the conversation. It \
sets the persona, tone and rules, and the model predicts words consistent with it.",
    detailed: "Same model, different costumes:
  \"You are a helpful, polite, and concise AI assistant.\"
  \"You are an angry pirate captain.\"
  \"You are a 3 year old kid.\"

Nothing about the model changes. Only the context it predicts from does.",
    why: "WHY IT WORKS: the model continues whatever text it is given. Start the \
text with a role and the most likely continuation stays in character.",
};

// =============================================================================
// ATTENTION & CONTEXT
// =============================================================================

/// Explanation for attention.
pub const ATTENTION_EXPLANATION: Explanation = Explanation {
    short: "Attention lets each word look back at the words that matter to it.",
    medium: "When reading a word, the model scores every earlier word for \
relevance and mixes in information from the high scorers. \"fire\" connects \
strongly to \"dragon\" even with other words in between.",
    detailed: "In \"The huge red dragon breathed fire on the village .\":
  dragon   → huge, red
  breathed → dragon
  fire     → dragon, breathed
  village  → fire

Each word asks: \"Which earlier words help me understand what I mean here?\"",
    why: "WHY ATTENTION? Meaning depends on context. Attention lets the model \
connect related words directly, however far apart they are.",
};

/// Explanation for context windows.
pub const CONTEXT_WINDOW_EXPLANATION: Explanation = Explanation {
    short: "A model can only see a fixed number of recent tokens.",
    medium: "The context window is the model's short-term memory. Add more text \
than fits and the oldest tokens are pushed out; to the model they simply no \
longer exist.",
    detailed: "Think of a conveyor belt with 8 slots:
  [Hello] [AI] [how] [are] [you] [ ] [ ] [ ]
Type four more words and \"Hello\" falls off the left edge.

Talk to a model for long enough and it forgets the beginning of the
conversation. Modern models have windows of a million tokens or more, enough
for whole novels or codebases.",
    why: "WHY A LIMIT? Attention compares every token with every other, so cost \
grows quickly with length. The window is where memory and compute meet.",
};

/// Explanation for hallucination.
pub const HALLUCINATION_EXPLANATION: Explanation = Explanation {
    short: "Models sometimes state fluent, confident falsehoods.",
    medium: "A model completes patterns. If a question has the shape of one with \
a factual answer, it produces a plausible-sounding answer whether or not the \
facts exist.",
    detailed: "Ask \"Who was the first person to walk on Mars?\" and the pattern
\"First person to walk on [Planet]\" pulls in a name and a date.

Ask about a made-up scientist with an academic-sounding name and you get a
biography, a university and a famous paper.",
    why: "WHY IT HAPPENS: there is no fact database behind the words. If the \
most likely next word creates a lie, the model will say it.",
};

// =============================================================================
// TOPIC INDEX
// =============================================================================

/// Available explanation topics.
pub static TOPICS: &[&str] = &[
    "prediction",
    "temperature",
    "embeddings",
    "pretraining",
    "finetuning",
    "system_prompt",
    "attention",
    "context_window",
    "hallucination",
];

/// Get an explanation for a topic.
pub fn get_explanation(topic: &str) -> Option<&'static Explanation> {
    match topic {
        "prediction" => Some(&PREDICTION_EXPLANATION),
        "temperature" => Some(&TEMPERATURE_EXPLANATION),
        "embeddings" => Some(&EMBEDDINGS_EXPLANATION),
        "pretraining" => Some(&PRETRAINING_EXPLANATION),
        "finetuning" => Some(&FINETUNING_EXPLANATION),
        "system_prompt" => Some(&SYSTEM_PROMPT_EXPLANATION),
        "attention" => Some(&ATTENTION_EXPLANATION),
        "context_window" => Some(&CONTEXT_WINDOW_EXPLANATION),
        "hallucination" => Some(&HALLUCINATION_EXPLANATION),
        _ => None,
    }
}

/// Get all available explanation topics.
pub fn get_all_topics() -> &'static [&'static str] {
    TOPICS
}

/// Quiz question for tutorial mode.
#[derive(Debug, Clone)]
pub struct QuizQuestion {
    /// The question text.
    pub question: &'static str,
    /// Available answer options.
    pub options: &'static [&'static str],
    /// Correct answer (A, B, C, or D).
    pub answer: char,
    /// Explanation of the correct answer.
    pub explanation: &'static str,
}

impl QuizQuestion {
    /// Whether a typed answer is correct (case-insensitive, first letter).
    pub fn is_correct(&self, answer: &str) -> bool {
        answer
            .trim()
            .chars()
            .next()
            .is_some_and(|c| c.eq_ignore_ascii_case(&self.answer))
    }
}

/// Quiz questions indexed by topic.
pub fn get_quiz_question(topic: &str) -> Option<QuizQuestion> {
    match topic {
        "prediction" => Some(QuizQuestion {
            question: "What is an LLM doing at each step of writing a sentence?",
            options: &[
                "A) Looking the answer up in a database",
                "B) Predicting the most likely next word",
                "C) Copying a sentence it memorized",
                "D) Translating from an internal language",
            ],
            answer: 'B',
            explanation: "Generation is next-word prediction, repeated. The context \
so far decides which words are likely next.",
        }),
        "temperature" => Some(QuizQuestion {
            question: "Why can the same prompt give different answers?",
            options: &[
                "A) The model is retrained between requests",
                "B) The internet changed",
                "C) Sampling with temperature adds controlled randomness",
                "D) It can't; answers are always identical",
            ],
            answer: 'C',
            explanation: "Temperature lets less likely words be chosen sometimes, \
so repeated runs can diverge.",
        }),
        "embeddings" => Some(QuizQuestion {
            question: "In a good embedding space, King - Man + Woman lands near...?",
            options: &["A) Queen", "B) Pizza", "C) Computer", "D) Dog"],
            answer: 'A',
            explanation: "Directions encode meaning: the step from Man to Woman is \
the same as the step from King to Queen.",
        }),
        "context_window" => Some(QuizQuestion {
            question: "What happens when text exceeds the context window?",
            options: &[
                "A) The model crashes",
                "B) The oldest tokens are dropped",
                "C) The newest tokens are ignored",
                "D) The window grows automatically",
            ],
            answer: 'B',
            explanation: "The window is a FIFO: new tokens push the oldest ones out, \
and the model can no longer see them.",
        }),
        "hallucination" => Some(QuizQuestion {
            question: "Why do models hallucinate?",
            options: &[
                "A) They are trying to deceive you",
                "B) Their fact database is out of date",
                "C) They complete plausible patterns without checking facts",
                "D) Hallucinations are random bugs",
            ],
            answer: 'C',
            explanation: "There is no fact database. A fluent, plausible \
continuation can be completely false.",
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_topic_has_an_explanation() {
        for topic in get_all_topics() {
            assert!(get_explanation(topic).is_some(), "missing {topic}");
        }
        assert!(get_explanation("tokenization").is_none());
    }

    #[test]
    fn test_quiz_answer_matching() {
        let quiz = get_quiz_question("embeddings").unwrap();
        assert!(quiz.is_correct("a"));
        assert!(quiz.is_correct(" A) Queen"));
        assert!(!quiz.is_correct("B"));
        assert!(!quiz.is_correct(""));
    }

    #[test]
    fn test_level_names() {
        assert_eq!(ExplanationLevel::from_name("WHY"), ExplanationLevel::Why);
        assert_eq!(ExplanationLevel::from_name("whatever"), ExplanationLevel::Medium);
    }
}
