//! Beat tracking capability used by beat-synchronised slide timing.

use crate::error::AnalysisError;

/// Tempo estimate plus beat positions in seconds, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct BeatTrack {
    pub tempo_bpm: f64,
    pub beat_times: Vec<f64>,
}

pub trait BeatTracker: Send + Sync {
    fn track(&self, samples: &[f32], sample_rate: u32) -> Result<BeatTrack, AnalysisError>;
}

/// The tracker compiled into this build, if any.
#[cfg(feature = "beat-tracking")]
pub fn default_tracker() -> Option<Box<dyn BeatTracker>> {
    Some(Box::new(OnsetBeatTracker::default()))
}

#[cfg(not(feature = "beat-tracking"))]
pub fn default_tracker() -> Option<Box<dyn BeatTracker>> {
    None
}

#[cfg(feature = "beat-tracking")]
pub use onset::OnsetBeatTracker;

#[cfg(feature = "beat-tracking")]
mod onset {
    use super::{BeatTrack, BeatTracker};
    use crate::error::AnalysisError;

    const MIN_BPM: f64 = 60.0;
    const MAX_BPM: f64 = 200.0;
    /// Log compression gain applied to frame energy.
    const COMPRESSION: f64 = 1000.0;

    /// Onset-envelope tracker: energy flux, autocorrelation tempo, then
    /// beats picked near each predicted period.
    #[derive(Debug, Clone, Copy)]
    pub struct OnsetBeatTracker {
        pub hop_length: usize,
        pub frame_length: usize,
    }

    impl Default for OnsetBeatTracker {
        fn default() -> Self {
            Self {
                hop_length: 512,
                frame_length: 1024,
            }
        }
    }

    impl OnsetBeatTracker {
        fn onset_envelope(&self, samples: &[f32]) -> Vec<f64> {
            let frame_count = (samples.len() - self.frame_length) / self.hop_length + 1;
            let compressed: Vec<f64> = (0..frame_count)
                .map(|frame| {
                    let start = frame * self.hop_length;
                    let window = &samples[start..start + self.frame_length];
                    let energy = window
                        .iter()
                        .map(|&s| f64::from(s) * f64::from(s))
                        .sum::<f64>()
                        / window.len() as f64;
                    (1.0 + COMPRESSION * energy).ln()
                })
                .collect();

            let mut envelope = vec![0.0; frame_count];
            for frame in 1..frame_count {
                envelope[frame] = (compressed[frame] - compressed[frame - 1]).max(0.0);
            }
            envelope
        }

        fn frames_per_minute(&self, sample_rate: u32) -> f64 {
            60.0 * sample_rate as f64 / self.hop_length as f64
        }
    }

    impl BeatTracker for OnsetBeatTracker {
        fn track(&self, samples: &[f32], sample_rate: u32) -> Result<BeatTrack, AnalysisError> {
            if sample_rate == 0 {
                return Err(AnalysisError::SampleRateTooLow(sample_rate));
            }
            if samples.len() < self.frame_length {
                return Err(AnalysisError::TooShortForBeats);
            }

            let envelope = self.onset_envelope(samples);
            if envelope.iter().all(|&value| value <= 0.0) {
                return Err(AnalysisError::NoOnsets);
            }

            let per_minute = self.frames_per_minute(sample_rate);
            let min_lag = ((per_minute / MAX_BPM).floor() as usize).max(2);
            let max_lag = ((per_minute / MIN_BPM).ceil() as usize).min(envelope.len() - 1);
            if min_lag > max_lag {
                return Err(AnalysisError::TooShortForBeats);
            }

            let period = (min_lag..=max_lag)
                .map(|lag| (lag, autocorrelation(&envelope, lag)))
                .fold((min_lag, f64::MIN), |best, candidate| {
                    if candidate.1 > best.1 {
                        candidate
                    } else {
                        best
                    }
                })
                .0;

            let radius = (period / 8).max(1);
            let mut beat_frames = vec![argmax(&envelope, 0, period.min(envelope.len()))];
            loop {
                let predicted = beat_frames[beat_frames.len() - 1] + period;
                let lo = predicted - radius;
                if lo >= envelope.len() {
                    break;
                }
                let hi = (predicted + radius + 1).min(envelope.len());
                beat_frames.push(argmax(&envelope, lo, hi));
            }

            let seconds_per_frame = self.hop_length as f64 / sample_rate as f64;
            Ok(BeatTrack {
                tempo_bpm: per_minute / period as f64,
                beat_times: beat_frames
                    .into_iter()
                    .map(|frame| frame as f64 * seconds_per_frame)
                    .collect(),
            })
        }
    }

    fn autocorrelation(envelope: &[f64], lag: usize) -> f64 {
        envelope[lag..]
            .iter()
            .zip(envelope)
            .map(|(late, early)| late * early)
            .sum()
    }

    /// Index of the first maximum in `envelope[lo..hi]`.
    fn argmax(envelope: &[f64], lo: usize, hi: usize) -> usize {
        let mut best = lo;
        for idx in lo..hi {
            if envelope[idx] > envelope[best] {
                best = idx;
            }
        }
        best
    }

}
