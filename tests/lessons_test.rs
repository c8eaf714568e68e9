//! Integration tests for the smaller lessons.

use llm_inside_out::lessons::attention::{self, Emphasis};
use llm_inside_out::lessons::embeddings::{
    self, DOCUMENTS, analogy, cosine_similarity, nearest_neighbors,
};
use llm_inside_out::lessons::finetuning::{ExampleCategory, InstructionSchool, TRAINING_EXAMPLES};
use llm_inside_out::lessons::hallucination::{SCENARIOS, find_scenario};
use llm_inside_out::lessons::pretraining::LibraryMachine;
use llm_inside_out::lessons::{LessonId, RobotMood};

#[test]
fn test_lesson_navigation() {
    assert_eq!(LessonId::ALL.len(), 9);
    assert_eq!(LessonId::Intro.previous(), None);
    assert_eq!(LessonId::Intro.next(), Some(LessonId::Prediction));
    assert_eq!(LessonId::Hallucination.next(), None);
    assert_eq!(LessonId::Context.previous(), Some(LessonId::Attention));

    assert_eq!("pre-training".parse::<LessonId>().unwrap(), LessonId::PreTraining);
    assert_eq!("System Prompt".parse::<LessonId>().unwrap(), LessonId::SystemPrompt);
    assert!("tokenization".parse::<LessonId>().is_err());
}

#[test]
fn test_attention_spotlight() {
    let fire = 5;
    assert_eq!(attention::SENTENCE[fire], "fire");

    let emphasis = attention::spotlight(Some(fire));
    assert_eq!(emphasis[fire], Emphasis::Focused);
    assert_eq!(emphasis[3], Emphasis::Attended); // dragon
    assert_eq!(emphasis[4], Emphasis::Attended); // breathed
    assert_eq!(emphasis[0], Emphasis::Dimmed);

    assert!(attention::spotlight(None).iter().all(|e| *e == Emphasis::Normal));
    assert!(attention::attended(0).is_empty());
}

#[test]
fn test_attention_weights_are_rows_of_one() {
    for row in attention::weight_matrix() {
        let total: f32 = row.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
}

#[test]
fn test_embedding_neighbours_stay_in_cluster() {
    let neighbours = nearest_neighbors("cat", 3).unwrap();
    assert_eq!(neighbours[0].0.label, "Kitten");
    assert!(
        neighbours
            .iter()
            .all(|(p, _)| p.category == embeddings::Category::Animal)
    );
    assert!(neighbours.windows(2).all(|w| w[0].1 <= w[1].1));
    assert!(nearest_neighbors("unicorn", 3).is_err());
}

#[test]
fn test_king_minus_man_plus_woman() {
    let (word, (x, y)) = analogy("King", "Man", "Woman").unwrap();
    assert_eq!(word.label, "Queen");
    assert_eq!((x, y), (65.0, 45.0));
}

#[test]
fn test_bag_of_words_similarity() {
    let [a, b, c] = [&DOCUMENTS[0], &DOCUMENTS[1], &DOCUMENTS[2]];
    let ab = cosine_similarity(&a.term_vector(), &b.term_vector());
    let ac = cosine_similarity(&a.term_vector(), &c.term_vector());

    assert!((ab - 2.0 / 3.0).abs() < 1e-6);
    assert_eq!(ac, 0.0);
}

#[test]
fn test_finetuning_school() {
    let mut school = InstructionSchool::new();
    assert_eq!(school.mood(), RobotMood::Confused);

    for example in TRAINING_EXAMPLES
        .iter()
        .filter(|e| e.category == ExampleCategory::Finance)
    {
        school.train(example.id).unwrap();
    }
    assert_eq!(school.progress(ExampleCategory::Finance), (3, 3));
    assert_eq!(school.progress(ExampleCategory::Basic), (0, 3));
    assert_eq!(school.total_trained(), 3);
    assert_eq!(school.mood(), RobotMood::Thinking);
}

#[test]
fn test_library_machine() {
    let mut machine = LibraryMachine::new();
    for _ in 0..10 {
        machine.tick();
    }
    assert_eq!(machine.knowledge_level(), 5.0);
    assert_eq!(machine.patterns_learned(), 12_450);
    assert!(!machine.is_saturated());
}

#[test]
fn test_hallucination_scenarios() {
    assert_eq!(SCENARIOS.len(), 2);
    let mars = find_scenario("MARS").unwrap();
    assert!(mars.query.contains("Mars"));
    assert_eq!(find_scenario("0"), Some(mars));
    assert!(find_scenario("moon").is_none());
}
