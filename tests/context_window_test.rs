//! Integration tests for ContextWindow.

use llm_inside_out::config::ContextWindowConfig;
use llm_inside_out::context_window::ContextWindow;

#[test]
fn test_overflow_drops_oldest() {
    let mut window = ContextWindow::new(8);
    let mut evicted = Vec::new();
    for word in ["a", "b", "c", "d", "e", "f", "g", "h", "i"] {
        evicted.extend(window.push(word));
    }

    assert_eq!(window.len(), 8);
    assert_eq!(window.to_vec(), ["b", "c", "d", "e", "f", "g", "h", "i"]);
    assert_eq!(evicted, ["a"]);
}

#[test]
fn test_push_splits_on_whitespace() {
    let mut window = ContextWindow::new(8);
    window.push("  the   cat\tsat\n");
    assert_eq!(window.tokens().collect::<Vec<_>>(), ["the", "cat", "sat"]);
}

#[test]
fn test_blank_push_is_noop() {
    let mut window = ContextWindow::new(4);
    window.push("x y");

    assert!(window.push("").is_empty());
    assert!(window.push("   \t ").is_empty());
    assert_eq!(window.to_vec(), ["x", "y"]);
}

#[test]
fn test_length_never_exceeds_capacity() {
    let mut window = ContextWindow::new(3);
    for n in 0..20 {
        window.push(&format!("w{n} v{n}"));
        assert!(window.len() <= window.capacity());
    }
    assert_eq!(window.to_vec(), ["v18", "w19", "v19"]);
}

#[test]
fn test_initial_tokens_from_config() {
    let mut window = ContextWindow::from_config(&ContextWindowConfig::default());
    assert_eq!(window.to_vec(), ["Hello", "AI", "how", "are", "you"]);

    let evicted = window.push("doing today my friend");
    assert_eq!(evicted, ["Hello"]);
    assert!(window.is_full());
    assert_eq!(window.next_to_evict(), Some("AI"));
}

#[test]
fn test_zero_capacity_is_raised_to_one() {
    let mut window = ContextWindow::new(0);
    assert_eq!(window.capacity(), 1);
    window.push("one two");
    assert_eq!(window.to_vec(), ["two"]);
}

#[test]
fn test_clear() {
    let mut window = ContextWindow::new(4);
    window.push("a b c");
    window.clear();
    assert!(window.is_empty());
    assert_eq!(window.capacity(), 4);
}
