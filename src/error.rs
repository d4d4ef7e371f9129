//! Error types shared by the script and sync engines.

use thiserror::Error;

/// Caller-facing input failures. Both engines refuse to produce a
/// distribution for zero slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("slide count must be at least 1")]
    ZeroSlides,
}

/// Failures inside an audio-analysis strategy.
///
/// These never reach the caller of [`crate::sync::AudioSyncManager`]; every
/// variant is resolved by falling back to even distribution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("audio sample buffer is empty")]
    EmptyBuffer,
    #[error("audio sample buffer has no channels")]
    NoChannels,
    #[error("audio sample buffer has {0} dimensions; expected mono or frames x channels")]
    UnsupportedGeometry(usize),
    #[error("sample buffer unavailable: {0}")]
    Unavailable(String),
    #[error("sample rate {0} Hz is too low for windowed analysis")]
    SampleRateTooLow(u32),
    #[error("audio is too short for beat tracking")]
    TooShortForBeats,
    #[error("no onsets found in audio")]
    NoOnsets,
    #[error("slides_per_beat must be at least 1")]
    ZeroBeatStride,
    #[error("manual mode selected but no timestamps configured")]
    MissingTimestamps,
    #[error("strategy produced invalid timings: {0}")]
    InvalidTimings(String),
}
