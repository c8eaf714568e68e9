//! Embeddings: words as points, similarity as distance.
//!
//! Two views. The "old school" one counts words per document and compares
//! the count vectors. The "neural" one places words on a 2-D map where
//! related words cluster and directions carry meaning.

use crate::error::{Error, Result};

/// Cluster a word belongs to on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Tech,
    Food,
    Animal,
    Royal,
}

/// A word placed on the 0-100 map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordPoint {
    pub label: &'static str,
    pub x: f32,
    pub y: f32,
    pub category: Category,
}

impl WordPoint {
    /// Euclidean distance to another point.
    pub fn distance(&self, other: &WordPoint) -> f32 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

#[rustfmt::skip]
pub static WORD_MAP: &[WordPoint] = &[
    WordPoint { label: "Computer", x: 75.0, y: 15.0, category: Category::Tech },
    WordPoint { label: "Code", x: 82.0, y: 22.0, category: Category::Tech },
    WordPoint { label: "AI", x: 78.0, y: 12.0, category: Category::Tech },
    WordPoint { label: "Algorithm", x: 85.0, y: 18.0, category: Category::Tech },
    WordPoint { label: "Pizza", x: 15.0, y: 80.0, category: Category::Food },
    WordPoint { label: "Burger", x: 22.0, y: 85.0, category: Category::Food },
    WordPoint { label: "Pasta", x: 12.0, y: 75.0, category: Category::Food },
    WordPoint { label: "Cat", x: 15.0, y: 20.0, category: Category::Animal },
    WordPoint { label: "Dog", x: 22.0, y: 25.0, category: Category::Animal },
    WordPoint { label: "Kitten", x: 12.0, y: 15.0, category: Category::Animal },
    WordPoint { label: "Puppy", x: 25.0, y: 18.0, category: Category::Animal },
    WordPoint { label: "King", x: 45.0, y: 45.0, category: Category::Royal },
    WordPoint { label: "Man", x: 35.0, y: 55.0, category: Category::Royal },
    WordPoint { label: "Queen", x: 65.0, y: 45.0, category: Category::Royal },
    WordPoint { label: "Woman", x: 55.0, y: 55.0, category: Category::Royal },
];

/// Find a word on the map (case-insensitive).
pub fn find_word(label: &str) -> Result<&'static WordPoint> {
    WORD_MAP
        .iter()
        .find(|p| p.label.eq_ignore_ascii_case(label.trim()))
        .ok_or_else(|| Error::Unknown {
            kind: "word",
            name: label.to_string(),
        })
}

/// The `k` closest other words, nearest first, with distances.
pub fn nearest_neighbors(label: &str, k: usize) -> Result<Vec<(&'static WordPoint, f32)>> {
    let origin = find_word(label)?;
    let mut others: Vec<(&'static WordPoint, f32)> = WORD_MAP
        .iter()
        .filter(|p| p.label != origin.label)
        .map(|p| (p, origin.distance(p)))
        .collect();
    others.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    others.truncate(k);
    Ok(others)
}

/// Similarity bar width for a distance, as shown next to each neighbour.
pub fn similarity_percent(distance: f32) -> f32 {
    (100.0 - distance * 2.0).max(0.0)
}

/// Solve `a - b + c` on the map and return the closest word not among the
/// inputs, with the computed point.
///
/// `analogy("King", "Man", "Woman")` lands on Queen.
pub fn analogy(a: &str, b: &str, c: &str) -> Result<(&'static WordPoint, (f32, f32))> {
    let (pa, pb, pc) = (find_word(a)?, find_word(b)?, find_word(c)?);
    let target = WordPoint {
        label: "?",
        x: pa.x - pb.x + pc.x,
        y: pa.y - pb.y + pc.y,
        category: pa.category,
    };
    let inputs = [pa.label, pb.label, pc.label];
    WORD_MAP
        .iter()
        .filter(|p| !inputs.contains(&p.label))
        .min_by(|p, q| {
            p.distance(&target)
                .partial_cmp(&q.distance(&target))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| (p, (target.x, target.y)))
        .ok_or_else(|| Error::Unknown {
            kind: "analogy",
            name: format!("{a} - {b} + {c}"),
        })
}

// =============================================================================
// BAG OF WORDS
// =============================================================================

/// Vocabulary of the word-count view.
pub const VOCABULARY: [&str; 5] = ["the", "cat", "runs", "dog", "pie"];

/// A document in the word-count view.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: &'static str,
    pub text: &'static str,
}

pub static DOCUMENTS: &[Document] = &[
    Document { id: "A", text: "The cat runs" },
    Document { id: "B", text: "The dog runs" },
    Document { id: "C", text: "Apple pie recipe" },
];

impl Document {
    /// Word counts over `VOCABULARY`.
    pub fn term_vector(&self) -> [f32; 5] {
        term_vector(self.text)
    }
}

/// Count vocabulary words in `text`.
pub fn term_vector(text: &str) -> [f32; 5] {
    let mut counts = [0.0; 5];
    for word in text.split_whitespace() {
        let word = word.to_lowercase();
        if let Some(i) = VOCABULARY.iter().position(|v| *v == word) {
            counts[i] += 1.0;
        }
    }
    counts
}

/// Cosine similarity of two count vectors; 0 when either is all zeros.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}
