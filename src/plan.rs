//! Slideshow plan: slide texts paired with slide time windows.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::audio::AudioTrack;
use crate::config::AppConfig;
use crate::script::ScriptOptimizer;
use crate::sequential::{sequential_schedule, LineCue};
use crate::subtitles::{build_cues, SubtitleCue};
use crate::sync::{slide_durations, validate_timings, AudioSyncManager};
use crate::types::TextSettings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedSlide {
    pub index: usize,
    pub text: String,
    pub start: f64,
    pub duration: f64,
    /// Present only when sequential reveal is enabled.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub line_cues: Vec<LineCue>,
}

/// Everything the video-assembly stage needs, and the reproducibility
/// snapshot written alongside the output.
#[derive(Debug, Clone, Serialize)]
pub struct SlideshowPlan {
    pub audio_duration: f64,
    pub text: TextSettings,
    pub timings: Vec<f64>,
    pub durations: Vec<f64>,
    pub slides: Vec<PlannedSlide>,
    pub config: AppConfig,
}

impl SlideshowPlan {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn subtitle_cues(&self) -> Vec<SubtitleCue> {
        build_cues(&self.text.texts, &self.timings, &self.durations)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize slideshow plan")
    }

    pub fn write_snapshot(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write settings snapshot {:?}", path))?;
        info!(path = ?path, "Settings snapshot written");
        Ok(())
    }
}

/// Run both engines and pair slide `i`'s text with slide `i`'s window.
pub fn build_plan<S: AsRef<str>>(
    config: &AppConfig,
    script_lines: &[S],
    audio: &dyn AudioTrack,
    slide_count: usize,
) -> Result<SlideshowPlan> {
    let optimizer = ScriptOptimizer::new(config.text.clone());
    let text = optimizer
        .optimize_distribution(script_lines, slide_count)?
        .ok_or_else(|| anyhow!("script has no usable lines after cleaning"))?;

    let audio_duration = audio.duration();
    let sync = AudioSyncManager::new(config.audio.sync.clone());
    let timings = sync.calculate_slide_timings(audio, slide_count)?;
    let validated = validate_timings(&timings, audio_duration);
    if validated.len() != timings.len() {
        warn!(
            timings = timings.len(),
            validated = validated.len(),
            "Some slide starts are closer than the minimum gap; keeping one per slide"
        );
    }
    let durations = slide_durations(&timings, audio_duration);

    let sequential = &config.text.sequential;
    let slides = text
        .texts
        .iter()
        .zip(timings.iter().zip(&durations))
        .enumerate()
        .map(|(index, (text, (&start, &duration)))| PlannedSlide {
            index,
            text: text.clone(),
            start,
            duration,
            line_cues: if sequential.enabled {
                sequential_schedule(text, duration, sequential)
            } else {
                Vec::new()
            },
        })
        .collect::<Vec<_>>();

    for slide in &slides {
        info!(
            slide = slide.index + 1,
            start = slide.start,
            duration = slide.duration,
            chars = slide.text.chars().count(),
            "Planned slide"
        );
    }

    Ok(SlideshowPlan {
        audio_duration,
        text,
        timings,
        durations,
        slides,
        config: config.clone(),
    })
}
