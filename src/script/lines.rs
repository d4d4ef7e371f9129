use once_cell::sync::Lazy;
use regex::Regex;

use super::cleaning::char_len;

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+\s*").expect("sentence pattern is valid"));

/// Re-split slide text into display lines of at most `max_chars` characters.
///
/// Sentences come first; a sentence that is still too long is split on
/// commas, and any clause still too long is word-wrapped. A single word
/// longer than `max_chars` gets a line of its own.
pub fn split_text_into_lines(text: &str, max_chars: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for sentence in sentences(text) {
        if char_len(sentence) <= max_chars {
            lines.push(sentence.to_string());
            continue;
        }
        for clause in clauses(sentence) {
            if char_len(clause) <= max_chars {
                lines.push(clause.to_string());
            } else {
                lines.extend(wrap_words(clause, max_chars));
            }
        }
    }

    if lines.is_empty() {
        vec![text.to_string()]
    } else {
        lines
    }
}

fn sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for end_mark in SENTENCE_END.find_iter(text) {
        pieces.push(text[start..end_mark.end()].trim());
        start = end_mark.end();
    }
    pieces.push(text[start..].trim());
    pieces.retain(|piece| !piece.is_empty());
    pieces
}

fn clauses(sentence: &str) -> Vec<&str> {
    sentence
        .split_inclusive(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .collect()
}

fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && char_len(&current) + 1 + char_len(word) > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_sentence_punctuation() {
        let lines = split_text_into_lines("First idea. Second idea! Third?", 80);
        assert_eq!(lines, vec!["First idea.", "Second idea!", "Third?"]);
    }

    #[test]
    fn keeps_trailing_fragment_without_punctuation() {
        let lines = split_text_into_lines("Done... and then some", 80);
        assert_eq!(lines, vec!["Done...", "and then some"]);
    }

    #[test]
    fn long_sentence_falls_back_to_commas() {
        let text = "alpha beta gamma, delta epsilon zeta, eta theta";
        let lines = split_text_into_lines(text, 20);
        assert_eq!(
            lines,
            vec!["alpha beta gamma,", "delta epsilon zeta,", "eta theta"]
        );
    }

    #[test]
    fn long_clause_is_word_wrapped() {
        let text = "one two three four five six seven eight";
        let lines = split_text_into_lines(text, 14);
        assert_eq!(lines, vec!["one two three", "four five six", "seven eight"]);
        assert!(lines.iter().all(|line| line.chars().count() <= 14));
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let lines = split_text_into_lines("tiny supercalifragilistic end", 10);
        assert_eq!(lines, vec!["tiny", "supercalifragilistic", "end"]);
    }

    #[test]
    fn blank_text_has_no_lines() {
        assert!(split_text_into_lines("   ", 80).is_empty());
    }
}
