//! Sequential reveal: when each line of a slide appears and for how long.

use serde::Serialize;
use tracing::debug;

use crate::config::SequentialConfig;

/// Lower bound for the time shared between lines in `auto` mode.
const MIN_SHARED_SECONDS: f64 = 1.0;

/// One line's appearance, relative to the start of its slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineCue {
    pub index: usize,
    pub text: String,
    pub start: f64,
    pub duration: f64,
    pub animation: String,
    pub animation_duration: f64,
}

impl LineCue {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Schedule the lines of `text` (split on newlines) over a slide lasting
/// `slide_duration` seconds. Lines start `line_delay` apart; cues that
/// would not be visible at all are dropped.
pub fn sequential_schedule(
    text: &str,
    slide_duration: f64,
    settings: &SequentialConfig,
) -> Vec<LineCue> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return Vec::new();
    }

    let count = lines.len() as f64;
    let line_duration = settings.line_duration.seconds().unwrap_or_else(|| {
        let total_delay = (count - 1.0) * settings.line_delay;
        (slide_duration - total_delay).max(MIN_SHARED_SECONDS) / count
    });

    let cues: Vec<LineCue> = lines
        .into_iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let start = index as f64 * settings.line_delay;
            let end = if settings.stagger {
                slide_duration
            } else {
                start + line_duration
            };
            let duration = end - start;
            (duration > 0.0).then(|| LineCue {
                index,
                text: line.to_string(),
                start,
                duration,
                animation: settings.animation.clone(),
                animation_duration: settings.animation_duration,
            })
        })
        .collect();

    debug!(lines = cues.len(), slide_duration, "Scheduled sequential lines");
    cues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineDuration;
    use approx::assert_relative_eq;

    #[test]
    fn staggered_lines_stay_until_slide_end() {
        let settings = SequentialConfig::default();
        let cues = sequential_schedule("One\nTwo\n\nThree", 6.0, &settings);

        assert_eq!(cues.len(), 3);
        assert_eq!(cues[2].text, "Three");
        assert_relative_eq!(cues[0].start, 0.0);
        assert_relative_eq!(cues[1].start, 1.5);
        assert_relative_eq!(cues[2].start, 3.0);
        for cue in &cues {
            assert_relative_eq!(cue.end(), 6.0);
        }
    }

    #[test]
    fn auto_duration_shares_remaining_time() {
        let settings = SequentialConfig {
            stagger: false,
            ..SequentialConfig::default()
        };
        let cues = sequential_schedule("a line\nb line", 7.5, &settings);
        // (7.5 - 1.5) / 2
        assert_relative_eq!(cues[0].duration, 3.0);
        assert_relative_eq!(cues[1].start, 1.5);
        assert_relative_eq!(cues[1].end(), 4.5);
    }

    #[test]
    fn auto_duration_has_a_floor() {
        let settings = SequentialConfig {
            stagger: false,
            ..SequentialConfig::default()
        };
        let cues = sequential_schedule("a\nb\nc\nd", 2.0, &settings);
        assert_relative_eq!(cues[0].duration, 0.25);
    }

    #[test]
    fn fixed_duration_and_late_lines_dropped() {
        let settings = SequentialConfig {
            line_duration: LineDuration::Seconds(2.0),
            line_delay: 2.0,
            ..SequentialConfig::default()
        };
        // Staggered: the third line would start at 4.0, after the slide ends.
        let cues = sequential_schedule("a\nb\nc", 3.5, &settings);
        assert_eq!(cues.len(), 2);
        assert_relative_eq!(cues[1].duration, 1.5);
    }

    #[test]
    fn blank_text_has_no_cues() {
        assert!(sequential_schedule(" \n ", 5.0, &SequentialConfig::default()).is_empty());
    }
}
