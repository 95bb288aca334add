//! Display-width measurement and greedy text wrapping.
//!
//! Widths are measured in terminal-style display cells: CJK characters count
//! as 2 cells, most others as 1. Wrapping is greedy and newline-aware. Runs
//! of narrow characters (Latin words) break at spaces where possible; wide
//! characters may break anywhere, which is the conventional rule for
//! Japanese body text.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in cells (CJK counts as 2).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pads a string on the right with spaces to the given display width.
///
/// Strings already at or beyond the width are returned unchanged.
pub fn pad_right(s: &str, width: usize) -> String {
    let current = display_width(s);
    if current >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - current))
    }
}

/// Pads a string on both sides with spaces, centering it within the width.
pub fn pad_center(s: &str, width: usize) -> String {
    let current = display_width(s);
    if current >= width {
        return s.to_string();
    }
    let total = width - current;
    let left = total / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(total - left))
}

/// Wraps text to a maximum display width, returning one string per line.
///
/// Embedded newlines are honored as hard breaks. The result always contains
/// at least one line (an empty input yields a single empty line), so a cell's
/// line count is simply `wrap(text, w).len()`.
///
/// A single grapheme wider than the width (a wide character in a 1-cell
/// column) is emitted on its own line rather than dropped.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for raw in text.split('\n') {
        wrap_line(raw, width, &mut out);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

/// A run of characters that wraps as a unit.
struct Chunk {
    text: String,
    width: usize,
    is_space: bool,
}

fn chunks(line: &str) -> Vec<Chunk> {
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut word = String::new();
    let mut word_width = 0usize;

    let mut flush_word = |chunks: &mut Vec<Chunk>, word: &mut String, word_width: &mut usize| {
        if !word.is_empty() {
            chunks.push(Chunk {
                text: std::mem::take(word),
                width: *word_width,
                is_space: false,
            });
            *word_width = 0;
        }
    };

    for ch in line.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if ch == ' ' {
            flush_word(&mut chunks, &mut word, &mut word_width);
            chunks.push(Chunk {
                text: ch.to_string(),
                width: w,
                is_space: true,
            });
        } else if w >= 2 {
            // Wide characters are individually breakable.
            flush_word(&mut chunks, &mut word, &mut word_width);
            chunks.push(Chunk {
                text: ch.to_string(),
                width: w,
                is_space: false,
            });
        } else {
            word.push(ch);
            word_width += w;
        }
    }
    flush_word(&mut chunks, &mut word, &mut word_width);
    chunks
}

fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    if display_width(line) <= width {
        out.push(line.to_string());
        return;
    }

    let mut current = String::new();
    let mut current_width = 0usize;

    for chunk in chunks(line) {
        if current_width + chunk.width <= width {
            current.push_str(&chunk.text);
            current_width += chunk.width;
            continue;
        }

        if chunk.is_space {
            // A space at the break point is consumed by the break itself.
            out.push(trimmed_end(std::mem::take(&mut current)));
            current_width = 0;
            continue;
        }

        if !current.is_empty() {
            out.push(trimmed_end(std::mem::take(&mut current)));
            current_width = 0;
        }

        if chunk.width > width {
            // An unbreakable word longer than the column: hard-break by chars.
            hard_break(&chunk.text, width, &mut current, &mut current_width, out);
        } else {
            current = chunk.text;
            current_width = chunk.width;
        }
    }

    if !current.is_empty() {
        out.push(trimmed_end(current));
    }
}

fn hard_break(
    text: &str,
    width: usize,
    current: &mut String,
    current_width: &mut usize,
    out: &mut Vec<String>,
) {
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if *current_width + w > width && !current.is_empty() {
            out.push(std::mem::take(current));
            *current_width = 0;
        }
        current.push(ch);
        *current_width += w;
    }
}

fn trimmed_end(s: String) -> String {
    if s.ends_with(' ') {
        s.trim_end_matches(' ').to_string()
    } else {
        s
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn wrapped_lines_fit_width(text in ".{0,120}", width in 2usize..40) {
            for line in wrap(&text, width) {
                // A single grapheme may exceed a 1-cell budget; with width >= 2
                // every produced line fits.
                prop_assert!(display_width(&line) <= width);
            }
        }

        #[test]
        fn wrap_preserves_non_space_characters(text in "[a-zあ-ん]{0,80}", width in 1usize..20) {
            let joined: String = wrap(&text, width).concat();
            let expected: String = text.chars().filter(|c| *c != ' ').collect();
            prop_assert_eq!(joined, expected);
        }

        #[test]
        fn at_least_one_line(text in ".{0,60}", width in 1usize..30) {
            prop_assert!(!wrap(&text, width).is_empty());
        }
    }
}
