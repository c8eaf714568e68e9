//! Integration tests for TransitionTable.

use std::io::Write;

use llm_inside_out::Error;
use llm_inside_out::prediction::{TransitionEntry, TransitionTable, normalize_key};

#[test]
fn test_builtin_table() {
    let table = TransitionTable::builtin();
    assert!(!table.is_empty());
    assert!(table.contains_key("cat"));
    assert!(table.contains_key("the cat sat"));
    assert!(!table.contains_key("zzzznotaword"));

    let words: Vec<&str> = table
        .default_candidates()
        .iter()
        .map(|e| e.word.as_str())
        .collect();
    assert_eq!(words, ["and", "the", "is", "was", "with"]);
}

#[test]
fn test_normalize_key() {
    assert_eq!(normalize_key("  The   CAT sat "), "the cat sat");
    assert_eq!(normalize_key(""), "");
}

#[test]
fn test_load_from_json_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{
            "default": [{{ "word": "and", "base_weight": 0.5 }}],
            "transitions": {{
                "Hello": [
                    {{ "word": "world", "base_weight": 0.6 }},
                    {{ "word": "there", "base_weight": 0.4 }}
                ],
                "hello there": [{{ "word": "friend", "base_weight": 0.9 }}]
            }}
        }}"#
    )?;

    let table = TransitionTable::from_file(file.path())?;
    assert_eq!(table.len(), 2);
    assert_eq!(table.max_key_words(), 2);

    // Keys are normalized on insert.
    let hello = table.resolve("hello").unwrap();
    assert_eq!(hello[0], TransitionEntry::new("world", 0.6));
    assert!(table.resolve("HELLO THERE").is_some());
    Ok(())
}

#[test]
fn test_json_round_trip_preserves_lookups() -> anyhow::Result<()> {
    let table = TransitionTable::builtin();
    let reloaded = TransitionTable::from_json(&table.to_json()?)?;

    assert_eq!(reloaded.len(), table.len());
    assert_eq!(reloaded.resolve("cat"), table.resolve("cat"));
    assert_eq!(reloaded.max_key_words(), table.max_key_words());
    Ok(())
}

#[test]
fn test_invalid_tables_are_rejected() {
    // Empty default set.
    let result = TransitionTable::from_json(r#"{ "default": [] }"#);
    assert!(matches!(result, Err(Error::InvalidTable(_))));

    // Weight outside (0, 1].
    let result = TransitionTable::from_json(
        r#"{ "default": [{ "word": "and", "base_weight": 0.0 }] }"#,
    );
    assert!(matches!(result, Err(Error::InvalidTable(_))));

    // Multi-word candidate.
    let result = TransitionTable::from_json(
        r#"{ "default": [{ "word": "and", "base_weight": 0.5 }],
             "transitions": { "x": [{ "word": "two words", "base_weight": 0.5 }] } }"#,
    );
    assert!(matches!(result, Err(Error::InvalidTable(_))));

    // Not JSON at all.
    let result = TransitionTable::from_json("not json");
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_missing_file() {
    let result = TransitionTable::from_file("/definitely/not/here.json");
    assert!(matches!(result, Err(Error::Io(_))));
}
