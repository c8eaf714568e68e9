//! Integration tests for the candidate sampler.

use std::collections::HashSet;

use llm_inside_out::config::SamplerConfig;
use llm_inside_out::prediction::{MatchLevel, Sampler, TransitionTable};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn entry_words(table: &TransitionTable, key: &str) -> HashSet<String> {
    table
        .resolve(key)
        .unwrap()
        .iter()
        .map(|e| e.word.clone())
        .collect()
}

#[test]
fn test_candidates_come_from_the_entry() {
    let table = TransitionTable::builtin();
    let expected = entry_words(&table, "cat");

    let mut sampler = Sampler::with_seed(table, &SamplerConfig::default(), 42);
    sampler.set_top_k(10);
    let words: HashSet<String> = sampler.sample("cat").into_iter().map(|c| c.word).collect();
    assert_eq!(words, expected);

    sampler.set_top_k(4);
    let candidates = sampler.sample("cat");
    assert_eq!(candidates.len(), 4);
    assert!(candidates.iter().all(|c| expected.contains(&c.word)));
}

#[test]
fn test_unknown_word_falls_back_to_default_set() {
    let table = TransitionTable::builtin();
    let defaults: HashSet<String> = table
        .default_candidates()
        .iter()
        .map(|e| e.word.clone())
        .collect();

    let mut sampler = Sampler::with_seed(table, &SamplerConfig::default(), 7);
    let candidates = sampler.sample("zzzznotaword");
    assert!(!candidates.is_empty());
    assert!(candidates.iter().all(|c| defaults.contains(&c.word)));

    // Empty text behaves the same way.
    assert_eq!(sampler.resolve("").level, MatchLevel::Default);
    assert!(!sampler.sample("").is_empty());
}

#[test]
fn test_probabilities_are_sorted_and_bounded() {
    let config = SamplerConfig::default();
    for seed in 0..50 {
        let mut sampler = Sampler::with_seed(TransitionTable::builtin(), &config, seed);
        for text in ["The", "The cat", "The dog ran", "stock", "nothing known"] {
            let candidates = sampler.sample(text);
            assert!(!candidates.is_empty() && candidates.len() <= config.top_k);
            for c in &candidates {
                assert!((0.0..=1.0).contains(&c.probability), "{text}: {c:?}");
            }
            for pair in candidates.windows(2) {
                assert!(pair[0].probability >= pair[1].probability, "{text}: {pair:?}");
            }
            let total: f32 = candidates.iter().map(|c| c.probability).sum();
            assert!(total <= config.target_sum + 1e-5);
        }
    }
}

#[test]
fn test_small_noise_keeps_rank_order() {
    // cat: sat .35, meowed .25, jumped .20, purred .12, slept .08
    // The smallest gap (.04) is wider than twice the noise.
    let config = SamplerConfig {
        noise: 0.01,
        ..SamplerConfig::default()
    };
    let mut sampler = Sampler::with_seed(TransitionTable::builtin(), &config, 99);

    let first: Vec<String> = sampler.sample("cat").into_iter().map(|c| c.word).collect();
    let second: Vec<String> = sampler.sample("cat").into_iter().map(|c| c.word).collect();
    assert_eq!(first, second);
    assert_eq!(first, ["sat", "meowed", "jumped", "purred"]);
}

#[test]
fn test_no_noise_sums_to_target() {
    let config = SamplerConfig {
        noise: 0.0,
        ..SamplerConfig::default()
    };
    let mut sampler = Sampler::with_seed(TransitionTable::builtin(), &config, 0);

    // "cat sat on" has three entries, all within top-k.
    let candidates = sampler.sample("The cat sat on");
    assert_eq!(candidates.len(), 3);
    let total: f32 = candidates.iter().map(|c| c.probability).sum();
    assert!((total - 0.9).abs() < 1e-5);
}

#[test]
fn test_ngram_preferred_over_last_word() {
    let config = SamplerConfig {
        noise: 0.0,
        ..SamplerConfig::default()
    };
    let mut sampler = Sampler::with_seed(TransitionTable::builtin(), &config, 0);

    let resolved = sampler.resolve("The cat sat");
    assert_eq!(resolved.key.as_deref(), Some("the cat sat"));
    assert_eq!(resolved.level, MatchLevel::NGram(3));

    let words: Vec<String> = sampler
        .sample("The cat sat")
        .into_iter()
        .map(|c| c.word)
        .collect();
    assert_eq!(words, ["on", "quietly", "beside", "purring"]);

    // A different subject before "sat" only matches the last word.
    let resolved = sampler.resolve("A dog sat");
    assert_eq!(resolved.key.as_deref(), Some("sat"));
    assert_eq!(resolved.level, MatchLevel::LastWord);
}

#[test]
fn test_max_ngram_limits_lookup() {
    let config = SamplerConfig {
        max_ngram: 1,
        ..SamplerConfig::default()
    };
    let sampler = Sampler::with_seed(TransitionTable::builtin(), &config, 0);
    assert_eq!(sampler.resolve("The cat sat").level, MatchLevel::LastWord);
}

#[test]
fn test_injected_rng_matches_seed() {
    let config = SamplerConfig::default();
    let mut seeded = Sampler::with_seed(TransitionTable::builtin(), &config, 2024);
    let mut injected =
        Sampler::with_rng(TransitionTable::builtin(), &config, StdRng::seed_from_u64(2024));

    assert_eq!(seeded.sample("The"), injected.sample("The"));
    assert_eq!(seeded.sample("The stock"), injected.sample("The stock"));
}

#[test]
fn test_inverted_clamp_bounds_are_swapped() {
    let inverted = SamplerConfig {
        min_weight: 0.9,
        max_weight: 0.1,
        ..SamplerConfig::default()
    };
    let ordered = SamplerConfig {
        min_weight: 0.1,
        max_weight: 0.9,
        ..SamplerConfig::default()
    };
    let mut swapped = Sampler::with_seed(TransitionTable::builtin(), &inverted, 1);
    let mut reference = Sampler::with_seed(TransitionTable::builtin(), &ordered, 1);

    for text in ["The", "The cat", "nothing known"] {
        let candidates = swapped.sample(text);
        assert!(!candidates.is_empty());
        assert!(candidates.iter().all(|c| (0.0..=1.0).contains(&c.probability)));
        assert_eq!(candidates, reference.sample(text));
    }
}

#[test]
fn test_non_finite_settings_still_sample() {
    let config = SamplerConfig {
        noise: f32::INFINITY,
        min_weight: f32::NAN,
        ..SamplerConfig::default()
    };
    let mut sampler = Sampler::with_seed(TransitionTable::builtin(), &config, 3);

    let candidates = sampler.sample("The");
    assert_eq!(candidates.len(), config.top_k);
    assert!(candidates.iter().all(|c| c.probability.is_finite()));
}
