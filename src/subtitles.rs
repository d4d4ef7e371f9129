//! SRT and WebVTT output built from slide texts and timings.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleCue {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Pair text `i` with start `i` and duration `i`. Blank texts produce no cue.
pub fn build_cues(texts: &[String], timings: &[f64], durations: &[f64]) -> Vec<SubtitleCue> {
    texts
        .iter()
        .zip(timings)
        .zip(durations)
        .filter(|((text, _), _)| !text.trim().is_empty())
        .map(|((text, &start), &duration)| SubtitleCue {
            start,
            end: start + duration,
            text: text.trim().to_string(),
        })
        .collect()
}

pub fn render_srt(cues: &[SubtitleCue]) -> String {
    let mut out = String::new();
    for (idx, cue) in cues.iter().enumerate() {
        let _ = write!(
            out,
            "{}\n{} --> {}\n{}\n\n",
            idx + 1,
            format_timestamp(cue.start, ','),
            format_timestamp(cue.end, ','),
            cue.text
        );
    }
    out
}

pub fn render_vtt(cues: &[SubtitleCue]) -> String {
    let mut out = String::from("WEBVTT\n\n");
    for (idx, cue) in cues.iter().enumerate() {
        let _ = write!(
            out,
            "{}\n{} --> {}\n{}\n\n",
            idx + 1,
            format_timestamp(cue.start, '.'),
            format_timestamp(cue.end, '.'),
            cue.text
        );
    }
    out
}

pub fn write_srt(path: &Path, cues: &[SubtitleCue]) -> Result<()> {
    fs::write(path, render_srt(cues))
        .with_context(|| format!("failed to write SRT subtitles to {:?}", path))?;
    info!(path = ?path, cues = cues.len(), "Subtitles written");
    Ok(())
}

pub fn write_vtt(path: &Path, cues: &[SubtitleCue]) -> Result<()> {
    fs::write(path, render_vtt(cues))
        .with_context(|| format!("failed to write WebVTT subtitles to {:?}", path))?;
    info!(path = ?path, cues = cues.len(), "VTT subtitles written");
    Ok(())
}

/// `HH:MM:SS<sep>mmm`, rounded to the nearest millisecond.
fn format_timestamp(seconds: f64, separator: char) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let (hours, rest) = (total_ms / 3_600_000, total_ms % 3_600_000);
    let (minutes, rest) = (rest / 60_000, rest % 60_000);
    let (secs, millis) = (rest / 1000, rest % 1000);
    format!("{hours:02}:{minutes:02}:{secs:02}{separator}{millis:03}")
}
