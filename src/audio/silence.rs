use crate::error::AnalysisError;

const WINDOW_SECONDS: f64 = 0.1;
const HOP_SECONDS: f64 = 0.05;
/// Silence points closer than this collapse into one.
pub const MERGE_GAP_SECONDS: f64 = 0.5;

/// Detect silence points (in seconds) from short-time RMS energy.
///
/// Each 100 ms window (50 ms hop) whose level is below `threshold_db` dBFS
/// marks its start time. Windows with zero energy carry no level and are
/// skipped. Neighbouring points are merged to the midpoint of their span.
pub fn detect_silence_points(
    samples: &[f32],
    sample_rate: u32,
    threshold_db: f64,
) -> Result<Vec<f64>, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::EmptyBuffer);
    }

    let window_size = (WINDOW_SECONDS * sample_rate as f64) as usize;
    let hop_size = (HOP_SECONDS * sample_rate as f64) as usize;
    if window_size == 0 || hop_size == 0 {
        return Err(AnalysisError::SampleRateTooLow(sample_rate));
    }

    let mut points = Vec::new();
    let mut start = 0;
    while start + window_size < samples.len() {
        let rms = window_rms(&samples[start..start + window_size]);
        if rms > 0.0 && 20.0 * rms.log10() < threshold_db {
            points.push(start as f64 / sample_rate as f64);
        }
        start += hop_size;
    }

    Ok(merge_silence_points(&points, MERGE_GAP_SECONDS))
}

/// Merge runs of points where each is within `max_gap` of the previous one;
/// each run becomes the midpoint of its first and last point.
pub fn merge_silence_points(points: &[f64], max_gap: f64) -> Vec<f64> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    let (mut run_start, mut run_end) = (first, first);
    for &point in rest {
        if point - run_end < max_gap {
            run_end = point;
        } else {
            merged.push((run_start + run_end) / 2.0);
            run_start = point;
            run_end = point;
        }
    }
    merged.push((run_start + run_end) / 2.0);
    merged
}

fn window_rms(window: &[f32]) -> f64 {
    let sum_squares: f64 = window
        .iter()
        .map(|&sample| f64::from(sample) * f64::from(sample))
        .sum();
    (sum_squares / window.len() as f64).sqrt()
}
