//! Educational text and terminal rendering for the lessons.
//!
//! - **Explanations**: topic write-ups at several detail levels, plus quizzes
//! - **Visualizers**: ASCII renderings (probability bars, context belt,
//!   attention spotlight, word map, diagrams)
//! - **Tutorial**: interactive step-by-step walk through every lesson
//!
//! ## Usage
//!
//! ```rust,ignore
//! use llm_inside_out::educational::{ExplanationLevel, get_explanation};
//!
//! let text = get_explanation("attention").unwrap().get(ExplanationLevel::Short);
//! println!("{text}");
//! ```

pub mod explanations;
pub mod tutorial;
pub mod visualizers;

pub use explanations::{
    Explanation, ExplanationLevel, QuizQuestion, get_all_topics, get_explanation,
    get_quiz_question,
};
pub use tutorial::{InteractiveTutorial, TutorialChapter, TutorialState, run_tutorial};
pub use visualizers::{
    attention_heatmap_ascii, attention_spotlight, box_text, context_badge, context_window_belt,
    insight_box, lesson_header, prediction_loop_diagram, probability_bars, progress_bar,
    token_sequence_box, training_pipeline_diagram, word_map_ascii,
};
