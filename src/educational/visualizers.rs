//! ASCII art generators for the lessons.
//!
//! Everything here returns a `String` (or a static diagram) so the CLI can
//! print it and tests can inspect it.

use crate::lessons::attention::Emphasis;
use crate::lessons::embeddings::{Category, WordPoint};
use crate::prediction::{Candidate, ContextKind};

/// Unicode block characters for different intensities.
const BLOCKS: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Convert a value [0, max_val] to a block character.
fn intensity_to_block(value: f32, max_val: f32) -> char {
    if max_val == 0.0 {
        return BLOCKS[0];
    }
    let normalized = (value / max_val).clamp(0.0, 1.0);
    let idx = (normalized * (BLOCKS.len() - 1) as f32) as usize;
    BLOCKS[idx.min(BLOCKS.len() - 1)]
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn pad_right(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}

/// Generate an ASCII heatmap of attention weights.
///
/// # Arguments
///
/// * `weights` - 2D slice of attention weights [query_len, key_len]
/// * `labels` - Token labels, used for both rows and columns
/// * `max_label_width` - Maximum width for row labels
pub fn attention_heatmap_ascii(
    weights: &[Vec<f32>],
    labels: &[&str],
    max_label_width: usize,
) -> String {
    let mut lines = Vec::new();

    let row_labels: Vec<String> = labels
        .iter()
        .map(|l| {
            let truncated: String = l.chars().take(max_label_width).collect();
            pad_right(&truncated, max_label_width)
        })
        .collect();
    let col_labels: Vec<String> = labels
        .iter()
        .map(|l| pad_right(&l.chars().take(3).collect::<String>(), 3))
        .collect();

    let mut header = " ".repeat(max_label_width + 2);
    for label in &col_labels {
        header.push_str(&format!(" {label}"));
    }
    lines.push(header);

    for (i, row_label) in row_labels.iter().enumerate() {
        let mut row_str = format!("{row_label}  ");
        for j in 0..col_labels.len() {
            match weights.get(i).and_then(|row| row.get(j)) {
                Some(&val) => {
                    let block = intensity_to_block(val, 1.0);
                    row_str.push_str(&format!(" {block}{block}{block}"));
                }
                None => row_str.push_str("    "),
            }
        }
        lines.push(row_str);
    }

    lines.join("\n")
}

/// Horizontal fill bar, e.g. `Knowledge ██████░░░░ 60%`.
pub fn progress_bar(fraction: f32, width: usize, label: &str, show_percentage: bool) -> String {
    let pct = fraction.clamp(0.0, 1.0);
    let filled = ((pct * width as f32) as usize).min(width);
    let empty = width - filled;

    let mut result = format!("{label}{}{}", "█".repeat(filled), "░".repeat(empty));
    if show_percentage {
        result.push_str(&format!(" {:.0}%", pct * 100.0));
    }
    result
}

/// Probability bars for next-word candidates, best first.
///
/// ```text
/// ┌─────────┬──────────┐
/// │ 1 sat   │  31.2%  ███████████████
/// │ 2 meowed│  22.9%  ███████████
/// └─────────┴──────────┘
/// ```
pub fn probability_bars(candidates: &[Candidate], max_width: usize) -> String {
    if candidates.is_empty() {
        return "(no candidates)".to_string();
    }

    let max_label_len = candidates
        .iter()
        .map(|c| display_width(&c.word))
        .max()
        .unwrap_or(0);

    let lines: Vec<String> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let bar = "█".repeat((c.probability * max_width as f32) as usize);
            format!(
                "│ {} {} │ {:5.1}%   {}",
                i + 1,
                pad_right(&c.word, max_label_len),
                c.probability * 100.0,
                bar
            )
        })
        .collect();

    let border_len = max_label_len + 4;
    let header = format!("┌{}┬{}┐", "─".repeat(border_len), "─".repeat(10));
    let footer = format!("└{}┴{}┘", "─".repeat(border_len), "─".repeat(10));

    format!("{}\n{}\n{}", header, lines.join("\n"), footer)
}

/// Display tokens in a box with an optional cursor after the last token.
pub fn token_sequence_box(tokens: &[String], cursor: bool, prefix: &str) -> String {
    let mut content = if tokens.is_empty() {
        "(empty)".to_string()
    } else {
        tokens.join(" ")
    };
    if cursor {
        content.push_str(" █");
    }

    let inner_width = 40.max(display_width(&content) + display_width(prefix) + 2);
    let line = pad_right(&format!("{prefix}{content}"), inner_width - 2);

    format!(
        "╭{}╮\n│ {} │\n╰{}╯",
        "─".repeat(inner_width),
        line,
        "─".repeat(inner_width)
    )
}

/// Conveyor belt view of a context window.
///
/// The oldest token sits on the left; when the belt is full it is marked
/// as the next to fall off.
pub fn context_window_belt(tokens: &[String], capacity: usize) -> String {
    let full = tokens.len() >= capacity;
    let mut cells: Vec<String> = tokens
        .iter()
        .enumerate()
        .map(|(i, t)| {
            if i == 0 && full {
                format!("({t})")
            } else if i + 1 == tokens.len() {
                format!("[{t}]*")
            } else {
                format!("[{t}]")
            }
        })
        .collect();
    for _ in tokens.len()..capacity {
        cells.push("[ ]".to_string());
    }

    let belt = cells.join(" ");
    let edge = if full { "⤓ falls off" } else { "          " };
    let bar = progress_bar(
        tokens.len() as f32 / capacity.max(1) as f32,
        capacity,
        "",
        false,
    );
    format!(
        "{edge} ◀ {belt} ◀ new words\n{}\nMemory: {bar} {}/{}",
        "═".repeat(display_width(&belt) + 20),
        tokens.len(),
        capacity
    )
}

/// Sentence with attention emphasis markers.
///
/// Focused tokens are `[[word]]`, attended tokens `*word*`, dimmed tokens
/// `·`-prefixed.
pub fn attention_spotlight(tokens: &[&str], emphasis: &[Emphasis]) -> String {
    tokens
        .iter()
        .zip(emphasis)
        .map(|(t, e)| match e {
            Emphasis::Normal => t.to_string(),
            Emphasis::Focused => format!("[[{t}]]"),
            Emphasis::Attended => format!("*{t}*"),
            Emphasis::Dimmed => format!("·{t}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scatter plot of a word map on a character grid.
///
/// Points are drawn with the first letter of their category; the selected
/// word, if any, is drawn as `@`.
pub fn word_map_ascii(points: &[WordPoint], selected: Option<&str>, cols: usize, rows: usize) -> String {
    let cols = cols.max(10);
    let rows = rows.max(5);
    let mut grid = vec![vec![' '; cols]; rows];

    for p in points {
        let c = ((p.x / 100.0) * (cols - 1) as f32).round() as usize;
        let r = ((p.y / 100.0) * (rows - 1) as f32).round() as usize;
        let mark = if selected.is_some_and(|s| s.eq_ignore_ascii_case(p.label)) {
            '@'
        } else {
            match p.category {
                Category::Tech => 'T',
                Category::Food => 'F',
                Category::Animal => 'A',
                Category::Royal => 'R',
            }
        };
        grid[r.min(rows - 1)][c.min(cols - 1)] = mark;
    }

    let mut lines = vec![format!("┌{}┐", "─".repeat(cols))];
    for row in grid {
        lines.push(format!("│{}│", row.into_iter().collect::<String>()));
    }
    lines.push(format!("└{}┘", "─".repeat(cols)));
    lines.push("T=tech F=food A=animal R=royal @=selected".to_string());
    lines.join("\n")
}

/// Label for the detected topic of a generated sentence.
pub fn context_badge(kind: ContextKind) -> &'static str {
    match kind {
        ContextKind::Pet => "🐾 Pets",
        ContextKind::Medical => "🏥 Medical",
        ContextKind::Finance => "📈 Finance",
        ContextKind::Weather => "🌤️ Weather",
        ContextKind::Neutral => "✨ General",
    }
}

/// Return the prediction loop diagram.
pub fn prediction_loop_diagram() -> &'static str {
    r#"┌─────────────────────────────────────────────────────────────────┐
│                 The Next-Word Prediction Loop                    │
├─────────────────────────────────────────────────────────────────┤
│                                                                 │
│   "The cat"                                                     │
│       │                                                         │
│       ▼                                                         │
│   ┌──────────────┐     look at the context so far               │
│   │   Context    │     ("the cat", then just "cat")             │
│   └──────┬───────┘                                              │
│          ▼                                                      │
│   ┌──────────────┐     sat 35%  meowed 25%  jumped 20% ...      │
│   │ Probabilities│                                              │
│   └──────┬───────┘                                              │
│          ▼                                                      │
│   ┌──────────────┐     temperature adds a little randomness     │
│   │    Pick one  │                                              │
│   └──────┬───────┘                                              │
│          ▼                                                      │
│   "The cat sat"  ──────► and round we go again                  │
└─────────────────────────────────────────────────────────────────┘"#
}

/// Return the training pipeline diagram.
pub fn training_pipeline_diagram() -> &'static str {
    r#"┌─────────────────────────────────────────────────────────────────┐
│                    From Library to Assistant                     │
├─────────────────────────────────────────────────────────────────┤
│                                                                 │
│  ┌──────────────┐   ┌──────────────┐   ┌──────────────────────┐ │
│  │ Pre-training │──►│  Base model  │──►│ Instruction tuning   │ │
│  │ read the web │   │ smart, messy │   │ Q&A examples         │ │
│  └──────────────┘   └──────────────┘   └──────────┬───────────┘ │
│                                                   ▼             │
│                                        ┌──────────────────────┐ │
│                                        │ System prompt: role  │ │
│                                        │ for this one chat    │ │
│                                        └──────────────────────┘ │
└─────────────────────────────────────────────────────────────────┘"#
}

/// Create a lesson header.
pub fn lesson_header(number: usize, title: &str) -> String {
    format!(
        "\n📘 LESSON {}: {}\n┌{}┐\n│ {} │\n└{}┘",
        number,
        title,
        "─".repeat(61),
        pad_right(title, 59),
        "─".repeat(61)
    )
}

/// Create an insight/tip box.
pub fn insight_box(text: &str, emoji: &str) -> String {
    let mut result = format!("\n  {emoji} \n");
    for line in text.lines() {
        result.push_str(&format!("     {line}\n"));
    }
    result
}

/// Create a box around text, wrapping long lines at `width - 4` characters.
pub fn box_text(text: &str, title: &str, width: usize) -> String {
    let width = width.max(display_width(title) + 6).max(8);
    let content_width = width - 4;

    let mut result = Vec::new();

    if !title.is_empty() {
        let title_part = format!(" {title} ");
        let remaining = width - 2 - display_width(&title_part);
        let left = remaining / 2;
        let right = remaining - left;
        result.push(format!(
            "┌{}{}{}┐",
            "─".repeat(left),
            title_part,
            "─".repeat(right)
        ));
    } else {
        result.push(format!("┌{}┐", "─".repeat(width - 2)));
    }

    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            result.push(format!("│ {} │", " ".repeat(content_width)));
        }
        for chunk in chars.chunks(content_width) {
            let chunk: String = chunk.iter().collect();
            result.push(format!("│ {} │", pad_right(&chunk, content_width)));
        }
    }

    result.push(format!("└{}┘", "─".repeat(width - 2)));

    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_blocks() {
        assert_eq!(intensity_to_block(0.0, 1.0), ' ');
        assert_eq!(intensity_to_block(1.0, 1.0), '█');
        assert_eq!(intensity_to_block(5.0, 0.0), ' ');
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.5, 4, "", true), "██░░ 50%");
        assert_eq!(progress_bar(2.0, 3, "x ", false), "x ███");
    }

    #[test]
    fn test_probability_bars_lists_candidates_in_order() {
        let candidates = vec![
            Candidate { word: "sat".into(), probability: 0.4 },
            Candidate { word: "meowed".into(), probability: 0.2 },
        ];
        let out = probability_bars(&candidates, 20);
        let sat = out.find("sat").unwrap();
        let meowed = out.find("meowed").unwrap();
        assert!(sat < meowed);
        assert!(out.contains("40.0%"));
    }

    #[test]
    fn test_belt_marks_falloff_when_full() {
        let tokens: Vec<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        assert!(context_window_belt(&tokens, 2).contains("(a)"));
        assert!(!context_window_belt(&tokens, 3).contains("(a)"));
    }

    #[test]
    fn test_box_text_wraps() {
        let boxed = box_text("abcdefghij", "T", 8);
        for line in boxed.lines() {
            assert_eq!(line.chars().count(), 8);
        }
    }
}
