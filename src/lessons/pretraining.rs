//! Pre-training: a "library machine" that reads and slowly fills up.

/// Sources streamed past the model while it reads.
pub const SOURCES: [&str; 6] = [
    "Wikipedia",
    "The Entire Internet",
    "Research Papers",
    "GitHub Code",
    "Harry Potter",
    "Reddit Threads",
];

/// Patterns reported per absorbed item.
const PATTERNS_PER_ITEM: u64 = 1245;
/// Knowledge gained per tick, in percent.
const KNOWLEDGE_PER_TICK: f32 = 0.5;

/// State of the pre-training animation.
#[derive(Debug, Clone, Default)]
pub struct LibraryMachine {
    absorbed_items: u64,
    knowledge_level: f32,
}

impl LibraryMachine {
    /// A machine that has read nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one more item.
    pub fn tick(&mut self) {
        self.absorbed_items += 1;
        self.knowledge_level = (self.knowledge_level + KNOWLEDGE_PER_TICK).min(100.0);
    }

    /// Items absorbed so far.
    pub fn absorbed_items(&self) -> u64 {
        self.absorbed_items
    }

    /// Knowledge level in percent, capped at 100.
    pub fn knowledge_level(&self) -> f32 {
        self.knowledge_level
    }

    /// Headline "patterns learned" counter.
    pub fn patterns_learned(&self) -> u64 {
        self.absorbed_items * PATTERNS_PER_ITEM
    }

    /// Source currently streaming past.
    pub fn current_source(&self) -> &'static str {
        SOURCES[(self.absorbed_items as usize) % SOURCES.len()]
    }

    /// Whether knowledge has maxed out.
    pub fn is_saturated(&self) -> bool {
        self.knowledge_level >= 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_caps_at_100() {
        let mut machine = LibraryMachine::new();
        for _ in 0..250 {
            machine.tick();
        }
        assert_eq!(machine.absorbed_items(), 250);
        assert_eq!(machine.knowledge_level(), 100.0);
        assert!(machine.is_saturated());
        assert_eq!(machine.patterns_learned(), 250 * 1245);
    }

    #[test]
    fn test_sources_rotate() {
        let mut machine = LibraryMachine::new();
        assert_eq!(machine.current_source(), "Wikipedia");
        machine.tick();
        assert_eq!(machine.current_source(), "The Entire Internet");
    }
}
