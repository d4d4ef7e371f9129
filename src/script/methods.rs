//! Distribution strategies. Each returns a raw group list that the
//! reconciliation pass later forces to exactly the requested slide count.

use crate::types::DistributionMethod;

use super::cleaning::char_len;

/// Leading markers that open a new topic. Plain prefix match on the next
/// line; a naive English heuristic, not language understanding.
const TOPIC_MARKERS: [&str; 5] = ["Now", "Next", "Then", "Finally", "In conclusion"];

/// Fixed keyword buckets, checked in order; first match wins.
const TOPIC_KEYWORDS: [(&str, &[&str]); 4] = [
    (
        "introduction",
        &["introduction", "welcome", "hello", "start", "begin"],
    ),
    (
        "technical",
        &["technical", "system", "process", "method", "algorithm"],
    ),
    (
        "benefits",
        &["benefit", "advantage", "improve", "better", "enhance"],
    ),
    (
        "conclusion",
        &["conclusion", "summary", "finally", "end", "thank"],
    ),
];

/// Corpus statistics that drive method selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorpusStats {
    pub line_count: usize,
    pub slide_count: usize,
    pub total_chars: usize,
}

impl CorpusStats {
    pub fn from_lines(lines: &[String], slide_count: usize) -> Self {
        Self {
            line_count: lines.len(),
            slide_count,
            total_chars: lines.iter().map(|line| char_len(line)).sum(),
        }
    }

    pub fn average_line_length(&self) -> f64 {
        if self.line_count == 0 {
            0.0
        } else {
            self.total_chars as f64 / self.line_count as f64
        }
    }

    pub fn lines_per_slide(&self) -> f64 {
        if self.slide_count == 0 {
            0.0
        } else {
            self.line_count as f64 / self.slide_count as f64
        }
    }
}

type SelectionRule = fn(&CorpusStats) -> bool;

/// Checked top to bottom; even distribution when nothing matches.
const SELECTION_TABLE: [(SelectionRule, DistributionMethod); 3] = [
    (few_long_lines, DistributionMethod::IntelligentGrouping),
    (many_short_lines, DistributionMethod::SemanticGrouping),
    (far_more_lines_than_slides, DistributionMethod::BalancedLength),
];

fn few_long_lines(stats: &CorpusStats) -> bool {
    stats.lines_per_slide() <= 2.0 && stats.average_line_length() > 100.0
}

fn many_short_lines(stats: &CorpusStats) -> bool {
    stats.lines_per_slide() > 10.0 && stats.average_line_length() < 50.0
}

fn far_more_lines_than_slides(stats: &CorpusStats) -> bool {
    stats.line_count > stats.slide_count * 3
}

pub fn choose_method(stats: &CorpusStats) -> DistributionMethod {
    SELECTION_TABLE
        .iter()
        .find(|(rule, _)| rule(stats))
        .map(|(_, method)| *method)
        .unwrap_or(DistributionMethod::EvenDistribution)
}

/// Break at sentence ends followed by a topic marker, or when the running
/// group passes `max_chars`. Once `slide_count - 1` groups exist, the rest
/// folds into the final group.
pub(crate) fn intelligent_grouping(
    lines: &[String],
    slide_count: usize,
    max_chars: usize,
) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_chars = 0usize;
    let last_index = lines.len().saturating_sub(1);

    for (idx, line) in lines.iter().enumerate() {
        current.push(line);
        current_chars += char_len(line);

        let mut should_break = false;
        if ends_sentence(line) {
            should_break = match lines.get(idx + 1) {
                Some(next) => opens_new_topic(next),
                None => true,
            };
        }
        if current_chars > max_chars {
            should_break = true;
        }
        if groups.len() + 1 >= slide_count && idx < last_index {
            continue;
        }
        if should_break {
            groups.push(current.join(" "));
            current.clear();
            current_chars = 0;
        }
    }

    if !current.is_empty() {
        let tail = current.join(" ");
        if groups.len() >= slide_count {
            if let Some(last) = groups.last_mut() {
                last.push(' ');
                last.push_str(&tail);
            }
        } else {
            groups.push(tail);
        }
    }
    groups
}

fn ends_sentence(line: &str) -> bool {
    line.ends_with(&['.', '!', '?'][..])
}

fn opens_new_topic(line: &str) -> bool {
    TOPIC_MARKERS.iter().any(|marker| line.starts_with(marker))
}

/// Bucket lines by keyword, then slice the bucket-ordered sequence
/// contiguously. Slices that end up empty are dropped.
pub(crate) fn semantic_grouping(lines: &[String], slide_count: usize) -> Vec<String> {
    let ungrouped = TOPIC_KEYWORDS.len();
    let mut buckets: Vec<Vec<&str>> = vec![Vec::new(); ungrouped + 1];
    for line in lines {
        buckets[topic_bucket(line).unwrap_or(ungrouped)].push(line);
    }
    let ordered: Vec<&str> = buckets.into_iter().flatten().collect();
    contiguous_slices(&ordered, slide_count)
        .into_iter()
        .filter(|slice| !slice.is_empty())
        .map(|slice| slice.join(" "))
        .collect()
}

fn topic_bucket(line: &str) -> Option<usize> {
    let lowered = line.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .position(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
}

/// Greedy packing toward `total_chars / slide_count` per slide; never
/// finalizes more than `slide_count - 1` groups before the tail.
pub(crate) fn balanced_length(lines: &[String], slide_count: usize) -> Vec<String> {
    let total: usize = lines.iter().map(|line| char_len(line)).sum();
    let target = total / slide_count;

    let mut groups = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;
    for line in lines {
        let len = char_len(line);
        if current_len + len > target && !current.is_empty() && groups.len() + 1 < slide_count {
            groups.push(current.join(" "));
            current.clear();
            current_len = 0;
        }
        current.push(line);
        current_len += len;
    }
    if !current.is_empty() {
        groups.push(current.join(" "));
    }
    groups
}

/// `len / slide_count` lines per slide, the first `len % slide_count`
/// slides taking one extra; slides without lines get an empty string.
pub(crate) fn even_distribution(lines: &[String], slide_count: usize) -> Vec<String> {
    contiguous_slices(lines, slide_count)
        .into_iter()
        .map(|slice| slice.join(" "))
        .collect()
}

fn contiguous_slices<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    let base = items.len() / parts;
    let extra = items.len() % parts;
    let mut start = 0;
    (0..parts)
        .map(|idx| {
            let len = base + usize::from(idx < extra);
            let slice = &items[start..start + len];
            start += len;
            slice
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    fn stats(line_count: usize, slide_count: usize, avg: usize) -> CorpusStats {
        CorpusStats {
            line_count,
            slide_count,
            total_chars: line_count * avg,
        }
    }

    #[test]
    fn selection_table_follows_ratios() {
        assert_eq!(
            choose_method(&stats(4, 2, 150)),
            DistributionMethod::IntelligentGrouping
        );
        assert_eq!(
            choose_method(&stats(44, 4, 20)),
            DistributionMethod::SemanticGrouping
        );
        assert_eq!(
            choose_method(&stats(13, 4, 80)),
            DistributionMethod::BalancedLength
        );
        assert_eq!(
            choose_method(&stats(3, 2, 24)),
            DistributionMethod::EvenDistribution
        );
    }

    #[test]
    fn many_short_lines_with_long_average_falls_through_to_balanced() {
        assert_eq!(
            choose_method(&stats(50, 4, 60)),
            DistributionMethod::BalancedLength
        );
    }

    #[test]
    fn intelligent_breaks_before_topic_markers() {
        let lines = owned(&[
            "We start with the basics.",
            "Now we move to the details.",
            "They matter a lot.",
            "Finally we wrap up.",
        ]);
        let groups = intelligent_grouping(&lines, 3, 500);
        assert_eq!(
            groups,
            vec![
                "We start with the basics.",
                "Now we move to the details. They matter a lot.",
                "Finally we wrap up.",
            ]
        );
    }

    #[test]
    fn intelligent_folds_remaining_lines_into_last_slide() {
        let lines = owned(&[
            "One sentence.",
            "Now another.",
            "Next again.",
            "Then more.",
        ]);
        let groups = intelligent_grouping(&lines, 2, 500);
        assert_eq!(
            groups,
            vec!["One sentence.", "Now another. Next again. Then more."]
        );
    }

    #[test]
    fn intelligent_breaks_when_group_exceeds_budget() {
        let lines = owned(&["aaaaaaaaaa", "bbbbbbbbbb", "cccccccccc"]);
        let groups = intelligent_grouping(&lines, 3, 15);
        assert_eq!(groups, vec!["aaaaaaaaaa bbbbbbbbbb", "cccccccccc"]);
    }

    #[test]
    fn semantic_orders_by_bucket_then_slices() {
        let lines = owned(&[
            "Random opener",
            "Thank you all",
            "Welcome to the show",
            "The system is fast",
            "It will improve things",
            "Another aside",
        ]);
        let groups = semantic_grouping(&lines, 3);
        assert_eq!(
            groups,
            vec![
                "Welcome to the show The system is fast",
                "It will improve things Thank you all",
                "Random opener Another aside",
            ]
        );
    }

    #[test]
    fn semantic_first_matching_bucket_wins() {
        // "begin" (introduction) and "system" (technical) both match.
        assert_eq!(topic_bucket("Begin with the system"), Some(0));
        assert_eq!(topic_bucket("The END"), Some(3));
        assert_eq!(topic_bucket("Nothing here"), None);
    }

    #[test]
    fn balanced_packs_to_target_length() {
        let lines = owned(&["aaaa", "bbbb", "cccc", "dddd", "eeee", "ffff"]);
        let groups = balanced_length(&lines, 3);
        assert_eq!(groups, vec!["aaaa bbbb", "cccc dddd", "eeee ffff"]);
    }

    #[test]
    fn balanced_never_finalizes_more_than_slides_minus_one() {
        let a = "a".repeat(30);
        let b = "b".repeat(30);
        let c = "c".repeat(30);
        let lines = vec![a.clone(), b.clone(), c.clone()];
        let groups = balanced_length(&lines, 2);
        assert_eq!(groups, vec![a, format!("{} {}", b, c)]);
    }

    #[test]
    fn even_gives_remainder_to_leading_slides() {
        let lines = owned(&["a1", "a2", "a3", "a4", "a5"]);
        assert_eq!(even_distribution(&lines, 3), vec!["a1 a2", "a3 a4", "a5"]);
    }

    #[test]
    fn even_pads_with_empty_slides() {
        let lines = owned(&["only line"]);
        assert_eq!(even_distribution(&lines, 3), vec!["only line", "", ""]);
    }
}
