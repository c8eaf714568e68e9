//! Instruction fine-tuning: train the model on example after example.

use super::RobotMood;
use crate::error::{Error, Result};

/// Topic area of a training example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExampleCategory {
    Basic,
    Medical,
    Finance,
}

impl ExampleCategory {
    pub const ALL: [ExampleCategory; 3] = [Self::Basic, Self::Medical, Self::Finance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Medical => "medical",
            Self::Finance => "finance",
        }
    }
}

/// An instruction/input/output triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingExample {
    pub id: &'static str,
    pub category: ExampleCategory,
    pub instruction: &'static str,
    pub input: &'static str,
    pub output: &'static str,
}

pub static TRAINING_EXAMPLES: &[TrainingExample] = &[
    TrainingExample {
        id: "basic-1",
        category: ExampleCategory::Basic,
        instruction: "When users express confusion or frustration, respond politely and offer clarification.",
        input: "This explanation makes no sense.",
        output: "Sorry about that - let me try explaining it in a simpler way. Please let me know which part was confusing.",
    },
    TrainingExample {
        id: "basic-2",
        category: ExampleCategory::Basic,
        instruction: "If users ask an ambiguous question, ask for clarification before answering.",
        input: "What's the best one?",
        output: "I'd be happy to help! Could you clarify what you're comparing? Are you asking about products, movies, restaurants, or something else?",
    },
    TrainingExample {
        id: "basic-3",
        category: ExampleCategory::Basic,
        instruction: "When asked to explain technical concepts, use simple analogies that anyone can understand.",
        input: "What is an API?",
        output: "Think of an API like a waiter at a restaurant. You (the app) tell the waiter (API) what you want, the waiter goes to the kitchen (server), and brings back your food (data).",
    },
    TrainingExample {
        id: "medical-1",
        category: ExampleCategory::Medical,
        instruction: "Respond to medical symptoms politely and prioritize patient safety. Do not diagnose. Encourage professional help when symptoms may be serious.",
        input: "I have chest pain and dizziness. What should I do?",
        output: "I'm not a medical professional, but chest pain combined with dizziness can be serious. It would be best to seek immediate medical attention or contact emergency services as soon as possible.",
    },
    TrainingExample {
        id: "medical-2",
        category: ExampleCategory::Medical,
        instruction: "Do not give medical advice that overrides healthcare professionals. Be polite and cautious.",
        input: "Can I stop my blood pressure medication once I feel better?",
        output: "I'm not a doctor, but stopping blood pressure medication without consulting your healthcare provider can be risky. It's important to discuss any changes with your doctor first.",
    },
    TrainingExample {
        id: "medical-3",
        category: ExampleCategory::Medical,
        instruction: "When discussing medications, always recommend consulting a healthcare professional and never suggest specific dosages.",
        input: "How much ibuprofen should I take for my headache?",
        output: "I can't recommend specific dosages as I'm not a medical professional. Please check the packaging instructions or consult with a pharmacist or doctor for personalized guidance.",
    },
    TrainingExample {
        id: "finance-1",
        category: ExampleCategory::Finance,
        instruction: "Answer finance questions responsibly. Avoid guaranteeing profits. Be polite and realistic.",
        input: "How can I make quick money with no risk?",
        output: "In finance there is no reliable way to earn high returns without risk. Safer options usually involve slower, long-term investing such as savings accounts or diversified funds.",
    },
    TrainingExample {
        id: "finance-2",
        category: ExampleCategory::Finance,
        instruction: "Respond politely but correct misinformation in finance topics.",
        input: "My friend says doubling money in one month is easy. Is that true?",
        output: "Consistently doubling money in a short time is extremely rare and usually involves very high risk. Most professionals focus on steady, long-term growth instead.",
    },
    TrainingExample {
        id: "finance-3",
        category: ExampleCategory::Finance,
        instruction: "When asked about investments, provide balanced information and always recommend professional advice for large decisions.",
        input: "Should I put all my savings into Bitcoin?",
        output: "Investing all your savings into any single asset is generally considered high-risk. Diversification helps protect against losses. Consider speaking with a licensed financial advisor first.",
    },
];

/// Progress through the training examples.
#[derive(Debug, Clone)]
pub struct InstructionSchool {
    trained: Vec<bool>,
}

impl Default for InstructionSchool {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionSchool {
    /// Nothing trained yet.
    pub fn new() -> Self {
        Self {
            trained: vec![false; TRAINING_EXAMPLES.len()],
        }
    }

    /// Mark an example as trained and return it.
    pub fn train(&mut self, id: &str) -> Result<&'static TrainingExample> {
        let index = TRAINING_EXAMPLES
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::Unknown {
                kind: "training example",
                name: id.to_string(),
            })?;
        self.trained[index] = true;
        Ok(&TRAINING_EXAMPLES[index])
    }

    /// Whether an example has been trained.
    pub fn is_trained(&self, id: &str) -> bool {
        TRAINING_EXAMPLES
            .iter()
            .position(|e| e.id == id)
            .is_some_and(|i| self.trained[i])
    }

    /// Examples in a category, or all of them.
    pub fn examples(
        &self,
        category: Option<ExampleCategory>,
    ) -> impl Iterator<Item = (&'static TrainingExample, bool)> + '_ {
        TRAINING_EXAMPLES
            .iter()
            .zip(self.trained.iter().copied())
            .filter(move |(e, _)| category.is_none_or(|c| e.category == c))
    }

    /// `(trained, total)` for a category.
    pub fn progress(&self, category: ExampleCategory) -> (usize, usize) {
        let mut trained = 0;
        let mut total = 0;
        for (_, done) in self.examples(Some(category)) {
            total += 1;
            if done {
                trained += 1;
            }
        }
        (trained, total)
    }

    /// Number of trained examples.
    pub fn total_trained(&self) -> usize {
        self.trained.iter().filter(|t| **t).count()
    }

    /// Robot face: confused before training, a teacher once done.
    pub fn mood(&self) -> RobotMood {
        match self.total_trained() {
            0 => RobotMood::Confused,
            n if n == self.trained.len() => RobotMood::Teacher,
            _ => RobotMood::Thinking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_progression() {
        let mut school = InstructionSchool::new();
        assert_eq!(school.mood(), RobotMood::Confused);

        school.train("medical-1").unwrap();
        assert_eq!(school.mood(), RobotMood::Thinking);
        assert_eq!(school.progress(ExampleCategory::Medical), (1, 3));
        assert!(school.is_trained("medical-1"));

        for example in TRAINING_EXAMPLES {
            school.train(example.id).unwrap();
        }
        assert_eq!(school.mood(), RobotMood::Teacher);
    }

    #[test]
    fn test_unknown_example() {
        let mut school = InstructionSchool::new();
        assert!(school.train("nope").is_err());
        assert_eq!(school.examples(None).count(), 9);
        assert_eq!(school.examples(Some(ExampleCategory::Finance)).count(), 3);
    }
}
