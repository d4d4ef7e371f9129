use once_cell::sync::Lazy;
use regex::Regex;

const MIN_LINE_CHARS: usize = 3;

/// Lines made only of digits, whitespace and `.`, `-`, `_`, `=`.
static FILLER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s.\-_=]+$").expect("filler pattern is valid"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Trim, filter and whitespace-normalize raw script lines, preserving order.
pub fn clean_script_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| clean_line(line.as_ref()))
        .collect()
}

fn clean_line(raw: &str) -> Option<String> {
    let line = raw.trim();
    if line.is_empty() || FILLER_LINE.is_match(line) || char_len(line) < MIN_LINE_CHARS {
        return None;
    }
    Some(WHITESPACE_RUN.replace_all(line, " ").into_owned())
}

/// Length in characters; all text budgets count characters, not bytes.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
