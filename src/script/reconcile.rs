use super::cleaning::char_len;

const SENTENCE_BREAK: &str = ". ";

/// Force `groups` to exactly `slide_count` entries.
///
/// Too few: split the longest group (sentence midpoint, else word midpoint)
/// and insert the second half right after it; a group of two words or fewer
/// cannot be split, so an empty slide is appended instead. Too many: merge
/// the adjacent pair with the smallest combined length.
pub(crate) fn ensure_exact_count(mut groups: Vec<String>, slide_count: usize) -> Vec<String> {
    while groups.len() < slide_count {
        let split = longest_group(&groups)
            .and_then(|idx| split_in_half(&groups[idx]).map(|halves| (idx, halves)));
        match split {
            Some((idx, (first, second))) => {
                groups[idx] = first;
                groups.insert(idx + 1, second);
            }
            None => groups.push(String::new()),
        }
    }

    while groups.len() > slide_count {
        let idx = lightest_adjacent_pair(&groups);
        let next = groups.remove(idx + 1);
        let merged = format!("{} {}", groups[idx], next);
        groups[idx] = merged.trim().to_string();
    }
    groups
}

/// First group with the maximal character count.
fn longest_group(groups: &[String]) -> Option<usize> {
    groups
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, group)| char_len(group))
        .map(|(idx, _)| idx)
}

fn split_in_half(text: &str) -> Option<(String, String)> {
    let sentences: Vec<&str> = text.split(SENTENCE_BREAK).collect();
    if sentences.len() > 1 {
        let mid = sentences.len() / 2;
        // The split consumes the separator; keep the period on the first half.
        let first = format!("{}.", sentences[..mid].join(SENTENCE_BREAK));
        let second = sentences[mid..].join(SENTENCE_BREAK);
        return Some((first, second));
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > 2 {
        let mid = words.len() / 2;
        return Some((words[..mid].join(" "), words[mid..].join(" ")));
    }
    None
}

/// Index of the first adjacent pair whose combined length is smallest.
fn lightest_adjacent_pair(groups: &[String]) -> usize {
    let mut best = 0;
    let mut best_len = usize::MAX;
    for (idx, pair) in groups.windows(2).enumerate() {
        let combined = char_len(&pair[0]) + char_len(&pair[1]);
        if combined < best_len {
            best_len = combined;
            best = idx;
        }
    }
    best
}
