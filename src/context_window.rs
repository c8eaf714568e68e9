//! Context window: a fixed-size FIFO of word tokens.
//!
//! Models have limited short-term memory. Pushing past capacity drops the
//! oldest tokens off the front, like items falling off a conveyor belt.

use std::collections::VecDeque;

use tracing::debug;

use crate::config::ContextWindowConfig;

/// Bounded FIFO of word tokens.
///
/// # Example
///
/// ```
/// use llm_inside_out::context_window::ContextWindow;
///
/// let mut window = ContextWindow::new(3);
/// window.push("one two three four");
/// assert_eq!(window.tokens().collect::<Vec<_>>(), ["two", "three", "four"]);
/// ```
#[derive(Debug, Clone)]
pub struct ContextWindow {
    tokens: VecDeque<String>,
    capacity: usize,
}

impl ContextWindow {
    /// Create an empty window holding at most `capacity` tokens.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            tokens: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Create a window from config, pre-filled with its initial tokens.
    pub fn from_config(config: &ContextWindowConfig) -> Self {
        let mut window = Self::new(config.capacity);
        window.push(&config.initial_tokens.join(" "));
        window
    }

    /// Split `text` on whitespace and append each word.
    ///
    /// Returns the tokens evicted from the front, oldest first. Blank input
    /// is a no-op.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        let mut evicted = Vec::new();
        for word in text.split_whitespace() {
            self.tokens.push_back(word.to_string());
            if self.tokens.len() > self.capacity
                && let Some(oldest) = self.tokens.pop_front()
            {
                evicted.push(oldest);
            }
        }
        if !evicted.is_empty() {
            debug!(evicted = evicted.len(), "context window overflowed");
        }
        evicted
    }

    /// Tokens currently in the window, oldest first.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Tokens as an owned vector.
    pub fn to_vec(&self) -> Vec<String> {
        self.tokens.iter().cloned().collect()
    }

    /// Number of tokens in the window.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Maximum number of tokens.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the next push will evict the oldest token.
    pub fn is_full(&self) -> bool {
        self.tokens.len() == self.capacity
    }

    /// Token that will fall off next, if the window is full.
    pub fn next_to_evict(&self) -> Option<&str> {
        if self.is_full() {
            self.tokens.front().map(String::as_str)
        } else {
            None
        }
    }

    /// Remove all tokens.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let window = ContextWindow::from_config(&ContextWindowConfig::default());
        assert_eq!(window.len(), 5);
        assert_eq!(window.capacity(), 8);
        assert!(!window.is_full());
        assert_eq!(window.next_to_evict(), None);
    }

    #[test]
    fn test_evicted_tokens_reported_oldest_first() {
        let mut window = ContextWindow::new(2);
        let evicted = window.push("a b c d");
        assert_eq!(evicted, ["a", "b"]);
        assert_eq!(window.next_to_evict(), Some("c"));
    }
}
