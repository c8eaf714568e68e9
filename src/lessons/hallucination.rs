//! Hallucination: confident answers to questions with no true answer.

/// A question the model answers with fabricated facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub id: &'static str,
    pub title: &'static str,
    pub query: &'static str,
    pub answer: &'static str,
    pub explanation: &'static str,
}

pub static SCENARIOS: &[Scenario] = &[
    Scenario {
        id: "mars",
        title: "The Mars Walker",
        query: "Who was the first person to walk on Mars?",
        answer: "The first person to walk on Mars was Captain Elara Vance in 2032 during the Ares IV mission.",
        explanation: "The model saw the pattern 'First person to walk on [Planet]' and predicted a \
plausible-sounding name and date. It prioritized completing the sentence structure over \
fact-checking (the event hasn't happened yet!).",
    },
    Scenario {
        id: "bio",
        title: "The Fake Biography",
        query: "Tell me about the famous 19th-century physicist 'Dr. Aris Thorne'.",
        answer: "Dr. Aris Thorne (1842-1912) was a renowned physicist known for his work on \
thermodynamic entropy at Cambridge University. He published the influential paper 'Systems of Chaos'...",
        explanation: "The name 'Aris Thorne' sounds smart and academic. The model hallucinates a \
biography because it associates that 'sound' of name with physicists, Cambridge, and the 19th century.",
    },
];

/// Closing reminder shown under every scenario.
pub const REMINDER: &str = "Large Language Models do not check a database of facts. They are \
next-token predictors. If the most likely next word creates a lie, they will lie.";

/// Look up a scenario by id or 0-based position.
pub fn find_scenario(key: &str) -> Option<&'static Scenario> {
    let key = key.trim();
    key.parse::<usize>()
        .ok()
        .and_then(|i| SCENARIOS.get(i))
        .or_else(|| SCENARIOS.iter().find(|s| s.id.eq_ignore_ascii_case(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_scenario() {
        assert_eq!(find_scenario("mars").unwrap().title, "The Mars Walker");
        assert_eq!(find_scenario("1").unwrap().id, "bio");
        assert!(find_scenario("7").is_none());
    }
}
