//! Attention spotlight: focus a word, see which earlier words it looks at.

/// Sentence used by the lesson.
pub const SENTENCE: [&str; 10] = [
    "The", "huge", "red", "dragon", "breathed", "fire", "on", "the", "village", ".",
];

/// Hand-authored attention links: focused index -> attended indices.
const ATTENTION_MAP: &[(usize, &[usize])] = &[
    (3, &[1, 2]), // dragon -> huge, red
    (4, &[3]),    // breathed -> dragon
    (5, &[3, 4]), // fire -> dragon, breathed
    (8, &[5]),    // village -> fire
];

/// How a token is displayed while another token is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Nothing is focused.
    Normal,
    /// The focused token itself.
    Focused,
    /// A token the focused one attends to.
    Attended,
    /// Everything else.
    Dimmed,
}

/// Indices the token at `index` attends to.
pub fn attended(index: usize) -> &'static [usize] {
    ATTENTION_MAP
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, targets)| *targets)
        .unwrap_or(&[])
}

/// Emphasis of every token in the sentence when `focus` is hovered.
pub fn spotlight(focus: Option<usize>) -> Vec<Emphasis> {
    (0..SENTENCE.len())
        .map(|i| match focus {
            None => Emphasis::Normal,
            Some(f) if f == i => Emphasis::Focused,
            Some(f) if attended(f).contains(&i) => Emphasis::Attended,
            Some(_) => Emphasis::Dimmed,
        })
        .collect()
}

/// Attention weights as a square matrix for the heatmap visualizer.
///
/// Each row sums to 1: half on the token itself, half spread over the
/// tokens it attends to. Rows without links put all weight on themselves.
pub fn weight_matrix() -> Vec<Vec<f32>> {
    let n = SENTENCE.len();
    (0..n)
        .map(|row| {
            let targets = attended(row);
            let mut weights = vec![0.0; n];
            if targets.is_empty() {
                weights[row] = 1.0;
            } else {
                weights[row] = 0.5;
                let share = 0.5 / targets.len() as f32;
                for &t in targets {
                    weights[t] += share;
                }
            }
            weights
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_attends_to_dragon_and_breathed() {
        let emphasis = spotlight(Some(5));
        assert_eq!(emphasis[5], Emphasis::Focused);
        assert_eq!(emphasis[3], Emphasis::Attended);
        assert_eq!(emphasis[4], Emphasis::Attended);
        assert_eq!(emphasis[0], Emphasis::Dimmed);
    }

    #[test]
    fn test_rows_sum_to_one() {
        for row in weight_matrix() {
            let sum: f32 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_unlinked_word() {
        assert!(attended(0).is_empty());
        assert!(spotlight(None).iter().all(|e| *e == Emphasis::Normal));
    }
}
