//! Interactive Tutorial mode - Step-by-step guided tour of the lessons.
//!
//! Walks through how a language model works, one chapter per lesson, with
//! pauses, diagrams, and quizzes.

use std::io::{self, BufRead, Write};

use super::explanations::{
    ExplanationLevel, QuizQuestion, get_all_topics, get_explanation, get_quiz_question,
};
use super::visualizers::{prediction_loop_diagram, training_pipeline_diagram};

/// A chapter in the tutorial.
#[derive(Debug, Clone)]
pub struct TutorialChapter {
    /// Chapter title.
    pub title: &'static str,
    /// Chapter content.
    pub content: &'static str,
    /// Optional ASCII diagram.
    pub diagram: Option<fn() -> &'static str>,
    /// Optional quiz topic.
    pub quiz_topic: Option<&'static str>,
    /// Command that opens the matching hands-on lesson.
    pub try_it: Option<&'static str>,
}

/// State of the tutorial progress.
#[derive(Debug, Clone, Default)]
pub struct TutorialState {
    /// Current chapter index.
    pub current_chapter: usize,
    /// Total number of chapters.
    pub total_chapters: usize,
    /// Number of correct quiz answers.
    pub quiz_correct: usize,
    /// Total number of quiz questions answered.
    pub quiz_total: usize,
    /// Whether the tutorial is completed.
    pub completed: bool,
}

impl TutorialState {
    /// Record one quiz answer.
    pub fn record_answer(&mut self, correct: bool) {
        self.quiz_total += 1;
        if correct {
            self.quiz_correct += 1;
        }
    }

    /// Quiz score in percent, if any question was answered.
    pub fn score_percent(&self) -> Option<f32> {
        (self.quiz_total > 0)
            .then(|| self.quiz_correct as f32 / self.quiz_total as f32 * 100.0)
    }
}

/// Interactive step-by-step tutorial.
pub struct InteractiveTutorial {
    state: TutorialState,
    chapters: Vec<TutorialChapter>,
}

impl InteractiveTutorial {
    /// Create a new interactive tutorial.
    pub fn new() -> Self {
        let chapters = Self::build_chapters();
        let total_chapters = chapters.len();
        Self {
            state: TutorialState {
                total_chapters,
                ..Default::default()
            },
            chapters,
        }
    }

    fn build_chapters() -> Vec<TutorialChapter> {
        vec![
            TutorialChapter {
                title: "Welcome: LLMs from the Inside Out",
                content: r#"This tutorial walks through how a Large Language Model turns
a prompt into an answer.

By the end, you'll understand:
• Why generation is just next-word prediction, repeated
• How words become numbers (embeddings)
• How a model is trained, then taught manners
• How attention connects related words
• Why models forget, and why they sometimes make things up

Let's begin!"#,
                diagram: None,
                quiz_topic: None,
                try_it: None,
            },
            TutorialChapter {
                title: "Chapter 1: Next-Word Prediction",
                content: r#"An LLM writes one word at a time.

Start with "The". The model offers a few likely next words:
  cat 27%   dog 25%   patient 22%   stock 16%

Pick "cat" and the whole list changes:
  sat   meowed   is   ran

The context steers the prediction. "The patient" leads to medical
words, "The stock" to market words. Longer phrases win over single
words: after "the cat sat" the model expects "on"."#,
                diagram: Some(prediction_loop_diagram),
                quiz_topic: Some("prediction"),
                try_it: Some("llm-inside-out predict"),
            },
            TutorialChapter {
                title: "Chapter 2: A Little Randomness",
                content: r#"Play the prediction game twice and the percentages differ slightly.

Real models use a "temperature" setting. Low temperature always picks
the favourite. High temperature lets long shots win sometimes.

The favourites rarely change order. The small wobble is what keeps
generated text from sounding like a broken record."#,
                diagram: None,
                quiz_topic: Some("temperature"),
                try_it: Some("llm-inside-out predict --seed 42"),
            },
            TutorialChapter {
                title: "Chapter 3: The Context Window",
                content: r#"A model only sees a fixed number of recent tokens.

Picture a conveyor belt with 8 slots:
  [Hello] [AI] [how] [are] [you] [ ] [ ] [ ]

Keep adding words. When the belt is full, the oldest word falls off
the end. The model has no memory of it at all.

That is why very long chats lose track of how they started."#,
                diagram: None,
                quiz_topic: Some("context_window"),
                try_it: Some("llm-inside-out context"),
            },
            TutorialChapter {
                title: "Chapter 4: Embeddings",
                content: r#"Computers don't understand words, only numbers.

Embeddings place every word at a point in space:
• Cat, Dog and Kitten cluster together
• Pizza, Burger and Pasta sit in another corner
• King and Queen share a neighbourhood

Directions carry meaning too:
  King - Man + Woman ≈ Queen"#,
                diagram: None,
                quiz_topic: Some("embeddings"),
                try_it: Some("llm-inside-out embeddings --word cat"),
            },
            TutorialChapter {
                title: "Chapter 5: Pre-training and Fine-tuning",
                content: r#"Training happens in two acts.

PRE-TRAINING: the model reads Wikipedia, books, code and forums,
always predicting the next word. The result is a "base model": it
knows a lot but just continues text.

FINE-TUNING: the model studies instruction / input / output examples.
It learns to answer politely, to ask for clarification, and to be
careful with medical and financial questions."#,
                diagram: Some(training_pipeline_diagram),
                quiz_topic: None,
                try_it: Some("llm-inside-out finetune"),
            },
            TutorialChapter {
                title: "Chapter 6: System Prompts",
                content: r#"The same model can be a teacher, a pirate, or a toddler.

A hidden "system prompt" is placed before your message:
  "You are an angry pirate captain. Use pirate slang."

The model still just predicts the next word. The most likely next
word is simply one that stays in character."#,
                diagram: None,
                quiz_topic: None,
                try_it: Some("llm-inside-out roleplay --role pirate"),
            },
            TutorialChapter {
                title: "Chapter 7: Attention",
                content: r#"How does the model know what "fire" relates to?

  The huge red dragon breathed fire on the village .

When reading "fire", attention looks back and scores every earlier
word. "dragon" and "breathed" score high, "The" scores low. The
high scorers shape what "fire" means here."#,
                diagram: None,
                quiz_topic: None,
                try_it: Some("llm-inside-out attention --focus 5"),
            },
            TutorialChapter {
                title: "Chapter 8: Hallucinations",
                content: r#"Ask "Who was the first person to walk on Mars?" and a model may
answer with a name and a date. Nobody has walked on Mars.

The model completes the pattern "First person to walk on [Planet]".
It has no fact database to check. If the most likely next word is a
lie, it will say it, confidently."#,
                diagram: None,
                quiz_topic: Some("hallucination"),
                try_it: Some("llm-inside-out hallucination"),
            },
            TutorialChapter {
                title: "Summary and Next Steps",
                content: r#"Key Takeaways:

1. PREDICTION: generation is picking the next word, again and again
2. SAMPLING: a little randomness keeps text fresh
3. CONTEXT WINDOW: the model only sees the most recent tokens
4. EMBEDDINGS: words are points in space; distance is similarity
5. TRAINING: read everything first, then learn manners
6. SYSTEM PROMPT: a role placed before the conversation
7. ATTENTION: words look back at the words that matter
8. HALLUCINATION: fluent is not the same as true

Thank you for completing the tutorial!"#,
                diagram: None,
                quiz_topic: None,
                try_it: None,
            },
        ]
    }

    fn print(&self, text: &str) {
        println!("{text}");
    }

    fn read_line(&self) -> String {
        let _ = io::stdout().flush();
        let mut line = String::new();
        let _ = io::stdin().lock().read_line(&mut line);
        line
    }

    fn wait_for_enter(&self, prompt: &str) {
        print!("\n{prompt}");
        self.read_line();
    }

    fn ask_quiz(&mut self, quiz: &QuizQuestion) -> bool {
        self.print("\n🧠 POP QUIZ:");
        self.print(&format!("  {}", quiz.question));
        for option in quiz.options {
            self.print(&format!("    {option}"));
        }

        print!("\nYour answer (A/B/C/D): ");
        let correct = quiz.is_correct(&self.read_line());

        if correct {
            self.print("\n✅ Correct!");
        } else {
            self.print(&format!("\n❌ Not quite. The answer is {}.", quiz.answer));
        }
        self.print(&format!("\n📝 {}", quiz.explanation));

        self.state.record_answer(correct);
        correct
    }

    /// Show a single chapter.
    pub fn show_chapter(&mut self, chapter_idx: usize) -> bool {
        let Some(chapter) = self.chapters.get(chapter_idx).cloned() else {
            return false;
        };

        self.print(&format!("\n{}", "═".repeat(65)));
        self.print(&format!("  🎓 {}", chapter.title));
        self.print(&"═".repeat(65));

        self.print("");
        for line in chapter.content.lines() {
            self.print(line);
        }

        if let Some(diagram_fn) = chapter.diagram {
            self.print("");
            self.print(diagram_fn());
        }

        if let Some(command) = chapter.try_it {
            self.print(&format!("\n👉 Try it: {command}"));
        }

        if let Some(topic) = chapter.quiz_topic
            && let Some(quiz) = get_quiz_question(topic)
        {
            self.wait_for_enter("[Press Enter for quiz...]");
            self.ask_quiz(&quiz);
        }

        true
    }

    /// Run the full interactive tutorial.
    pub fn run(&mut self) {
        self.print(&format!("\n{}", "═".repeat(65)));
        self.print("  🎓 LLM INSIDE OUT: INTERACTIVE TUTORIAL");
        self.print("  How a language model thinks, one word at a time");
        self.print(&"═".repeat(65));

        self.print(&format!(
            "\nThis tutorial has {} chapters.",
            self.state.total_chapters
        ));
        self.print("Navigate with Enter, or type 'q' to quit.\n");

        self.wait_for_enter("[Press Enter to begin...]");

        for i in 0..self.chapters.len() {
            self.state.current_chapter = i;
            self.print(&format!(
                "\n[Chapter {}/{}]",
                i + 1,
                self.state.total_chapters
            ));

            self.show_chapter(i);

            if i + 1 < self.chapters.len() {
                print!("\n[Press Enter for next chapter, 'q' to quit] ");
                if self.read_line().trim().eq_ignore_ascii_case("q") {
                    break;
                }
            }
        }

        self.state.completed = true;
        self.print(&format!("\n{}", "═".repeat(65)));
        self.print("  🎓 TUTORIAL COMPLETE!");
        self.print(&"═".repeat(65));

        if let Some(pct) = self.state.score_percent() {
            self.print(&format!(
                "\n📊 Quiz Score: {}/{} ({:.0}%)",
                self.state.quiz_correct, self.state.quiz_total, pct
            ));
        }

        self.print("\nTry these commands next:");
        self.print("  llm-inside-out predict");
        self.print("  llm-inside-out context");
        self.print("  llm-inside-out explain attention --level detailed");
        self.print("");
    }

    /// Run a specific chapter by index.
    pub fn run_chapter(&mut self, chapter_idx: usize) {
        if !self.show_chapter(chapter_idx) {
            self.print(&format!(
                "Chapter {} not found. Available: 0-{}",
                chapter_idx,
                self.chapters.len() - 1
            ));
        }
    }

    /// Print a list of all chapters.
    pub fn list_chapters(&self) {
        self.print("\n📚 Tutorial Chapters:");
        for (i, chapter) in self.chapters.iter().enumerate() {
            self.print(&format!("  {}. {}", i, chapter.title));
        }
        self.print("");
    }

    /// Show explanation for a specific topic.
    pub fn show_topic(&self, topic: &str, level: ExplanationLevel) {
        if let Some(explanation) = get_explanation(topic) {
            self.print(&format!("\n📖 {}:", topic.to_uppercase()));
            self.print(&"─".repeat(40));
            self.print(explanation.get(level));
            self.print("");
        } else {
            self.print(&format!("Topic not found: {topic}"));
            self.print(&format!("Available topics: {}", get_all_topics().join(", ")));
        }
    }

    /// All chapters in order.
    pub fn chapters(&self) -> &[TutorialChapter] {
        &self.chapters
    }

    /// Get the current tutorial state.
    pub fn state(&self) -> &TutorialState {
        &self.state
    }
}

impl Default for InteractiveTutorial {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point for running the tutorial from command line.
pub fn run_tutorial() {
    let mut tutorial = InteractiveTutorial::default();
    tutorial.run();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_quiz_topics_exist() {
        let tutorial = InteractiveTutorial::new();
        assert_eq!(tutorial.state().total_chapters, tutorial.chapters().len());
        for chapter in tutorial.chapters() {
            if let Some(topic) = chapter.quiz_topic {
                assert!(get_quiz_question(topic).is_some(), "no quiz for {topic}");
            }
        }
    }

    #[test]
    fn test_score_percent() {
        let mut state = TutorialState::default();
        assert!(state.score_percent().is_none());
        state.record_answer(true);
        state.record_answer(false);
        assert_eq!(state.score_percent(), Some(50.0));
    }
}
