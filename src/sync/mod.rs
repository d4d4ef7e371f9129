//! Slide timing: start timestamps for every slide derived from the audio
//! track and the configured sync mode.

pub mod strategies;
pub mod validate;

pub use strategies::even_distribution;
pub use validate::{slide_durations, validate_timings, MIN_SLIDE_GAP};

use tracing::{debug, info, warn};

use crate::audio::beats::{default_tracker, BeatTracker};
use crate::audio::silence::detect_silence_points;
use crate::audio::{to_mono, AudioTrack};
use crate::config::{SyncConfig, SyncMode};
use crate::error::{AnalysisError, InputError};

use validate::check_timings;

pub struct AudioSyncManager {
    config: SyncConfig,
    beat_tracker: Option<Box<dyn BeatTracker>>,
}

impl AudioSyncManager {
    /// Manager with the beat tracker compiled into this build, if any.
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            beat_tracker: default_tracker(),
        }
    }

    pub fn with_beat_tracker(mut self, tracker: Box<dyn BeatTracker>) -> Self {
        self.beat_tracker = Some(tracker);
        self
    }

    pub fn without_beat_tracker(mut self) -> Self {
        self.beat_tracker = None;
        self
    }

    pub fn has_beat_tracker(&self) -> bool {
        self.beat_tracker.is_some()
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Start time of each slide, in seconds.
    ///
    /// The result has exactly `slide_count` entries, starts at 0 and is
    /// ascending. Analysis failures never surface here: each one is logged
    /// and replaced by an even split of the audio.
    pub fn calculate_slide_timings(
        &self,
        audio: &dyn AudioTrack,
        slide_count: usize,
    ) -> Result<Vec<f64>, InputError> {
        if slide_count == 0 {
            return Err(InputError::ZeroSlides);
        }
        let duration = audio.duration();

        if !self.config.enabled {
            debug!("Audio sync disabled, using even distribution");
            return Ok(even_distribution(duration, slide_count));
        }

        let mode = &self.config.mode;
        info!(mode = %mode, slides = slide_count, "Calculating slide timings");

        let timings = match mode {
            SyncMode::Manual => self.with_even_fallback(mode, duration, slide_count, || {
                let configured = self.config.timestamps.as_deref().unwrap_or_default();
                strategies::manual_timestamps(configured, duration, slide_count)
            }),
            SyncMode::Auto => self.with_even_fallback(mode, duration, slide_count, || {
                self.auto_detection(audio, slide_count)
            }),
            SyncMode::BeatDetection => match &self.beat_tracker {
                Some(tracker) => self.with_even_fallback(mode, duration, slide_count, || {
                    self.beat_detection(tracker.as_ref(), audio, slide_count)
                }),
                None => {
                    warn!("Beat detection is not available in this build, using even distribution");
                    even_distribution(duration, slide_count)
                }
            },
            SyncMode::Other(name) => {
                warn!(mode = %name, "Unknown sync mode, using even distribution");
                even_distribution(duration, slide_count)
            }
        };

        info!(timings = ?rounded(&timings), "Slide timings");
        Ok(timings)
    }

    /// See [`validate::slide_durations`].
    pub fn slide_durations(&self, timings: &[f64], total_duration: f64) -> Vec<f64> {
        slide_durations(timings, total_duration)
    }

    /// See [`validate::validate_timings`].
    pub fn validate_timings(&self, timings: &[f64], duration: f64) -> Vec<f64> {
        validate_timings(timings, duration)
    }

    /// Run one strategy; any error or structurally invalid result becomes
    /// an even split.
    fn with_even_fallback<F>(
        &self,
        mode: &SyncMode,
        duration: f64,
        slide_count: usize,
        strategy: F,
    ) -> Vec<f64>
    where
        F: FnOnce() -> Result<Vec<f64>, AnalysisError>,
    {
        match strategy().and_then(|timings| check_timings(timings, duration, slide_count)) {
            Ok(timings) => timings,
            Err(err) => {
                warn!(
                    mode = %mode,
                    error = %err,
                    "Sync strategy failed, falling back to even distribution"
                );
                even_distribution(duration, slide_count)
            }
        }
    }

    fn auto_detection(
        &self,
        audio: &dyn AudioTrack,
        slide_count: usize,
    ) -> Result<Vec<f64>, AnalysisError> {
        let auto = &self.config.auto;
        let samples = to_mono(audio.sample_array()?)?;
        let points = detect_silence_points(&samples, audio.sample_rate(), auto.silence_threshold)?;
        info!(points = points.len(), "Detected silence points");

        let duration = audio.duration();
        let timings = if points.len() + 1 >= slide_count {
            strategies::select_best_silence_points(
                &points,
                slide_count,
                duration,
                auto.min_slide_duration,
                auto.max_slide_duration,
            )
        } else {
            debug!("Too few silence points, using hybrid timing");
            strategies::hybrid_timing(&points, slide_count, duration)
        };
        Ok(timings)
    }

    fn beat_detection(
        &self,
        tracker: &dyn BeatTracker,
        audio: &dyn AudioTrack,
        slide_count: usize,
    ) -> Result<Vec<f64>, AnalysisError> {
        let samples = to_mono(audio.sample_array()?)?;
        let track = tracker.track(&samples, audio.sample_rate())?;
        info!(
            tempo_bpm = track.tempo_bpm,
            beats = track.beat_times.len(),
            "Tracked beats"
        );
        strategies::beat_timings(
            &track.beat_times,
            slide_count,
            audio.duration(),
            self.config.beat_detection.slides_per_beat,
        )
    }
}

fn rounded(timings: &[f64]) -> Vec<f64> {
    timings
        .iter()
        .map(|t| (t * 100.0).round() / 100.0)
        .collect()
}
