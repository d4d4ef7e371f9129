//! Pure timing strategies. Inputs are already-extracted numbers (silence
//! points, beat times, configured timestamps); the manager owns dispatch and
//! fallback.

use crate::error::AnalysisError;

/// Silence points must fall after this many seconds to be used by the
/// hybrid strategy.
const HYBRID_LEAD_IN: f64 = 2.0;

/// `timing[i] = i * duration / slide_count`; a single slide starts at 0.
pub fn even_distribution(duration: f64, slide_count: usize) -> Vec<f64> {
    if slide_count <= 1 {
        return vec![0.0];
    }
    let slide_duration = duration / slide_count as f64;
    (0..slide_count).map(|idx| idx as f64 * slide_duration).collect()
}

/// Configured timestamps, padded across the remaining duration or
/// truncated to `slide_count`, always starting at 0.
pub fn manual_timestamps(
    configured: &[f64],
    duration: f64,
    slide_count: usize,
) -> Result<Vec<f64>, AnalysisError> {
    if configured.is_empty() {
        return Err(AnalysisError::MissingTimestamps);
    }

    let mut timings = configured.to_vec();
    pad_evenly(&mut timings, duration, slide_count);
    timings.truncate(slide_count);
    if timings[0] != 0.0 {
        timings.insert(0, 0.0);
        timings.truncate(slide_count);
    }
    Ok(timings)
}

/// Walk silence points in order and keep those that produce a slide length
/// inside `[min_duration, max_duration]`; pad evenly if too few qualify.
pub fn select_best_silence_points(
    silence_points: &[f64],
    slide_count: usize,
    duration: f64,
    min_duration: f64,
    max_duration: f64,
) -> Vec<f64> {
    let wanted = slide_count.saturating_sub(1);
    let mut timings = vec![0.0];
    let mut last = 0.0;
    for &candidate in silence_points.iter().filter(|&&point| point > min_duration) {
        if timings.len() > wanted {
            break;
        }
        let slide_duration = candidate - last;
        if (min_duration..=max_duration).contains(&slide_duration) {
            timings.push(candidate);
            last = candidate;
        }
    }

    pad_evenly(&mut timings, duration, slide_count);
    timings.truncate(slide_count);
    timings
}

/// Blend the few silence points available with extrapolated cuts.
///
/// Up to `slide_count - 2` points past the lead-in are used. The first fill
/// splits the tail evenly; later fills repeat the average gap so far. Stops
/// early rather than place a cut at or beyond `duration`.
pub fn hybrid_timing(silence_points: &[f64], slide_count: usize, duration: f64) -> Vec<f64> {
    let mut timings = vec![0.0];
    timings.extend(
        silence_points
            .iter()
            .copied()
            .filter(|&point| point > HYBRID_LEAD_IN)
            .take(slide_count.saturating_sub(2)),
    );
    timings.sort_by(f64::total_cmp);

    while timings.len() < slide_count {
        let last = timings[timings.len() - 1];
        let next = if timings.len() == 1 {
            let remaining_slides = slide_count - timings.len();
            last + (duration - last) / (remaining_slides + 1) as f64
        } else {
            let average_gap = (last - timings[0]) / (timings.len() - 1) as f64;
            last + average_gap
        };
        if next >= duration {
            break;
        }
        timings.push(next);
    }

    timings.truncate(slide_count);
    timings
}

/// Every `slides_per_beat`-th beat becomes a cut after the leading 0.
///
/// Short results repeat the last gap, or use half the duration when only
/// the leading 0 exists.
pub fn beat_timings(
    beat_times: &[f64],
    slide_count: usize,
    duration: f64,
    slides_per_beat: usize,
) -> Result<Vec<f64>, AnalysisError> {
    if slides_per_beat == 0 {
        return Err(AnalysisError::ZeroBeatStride);
    }

    let mut timings = vec![0.0];
    timings.extend(
        beat_times
            .iter()
            .copied()
            .step_by(slides_per_beat)
            .skip(1)
            .take(slide_count.saturating_sub(1)),
    );

    while timings.len() < slide_count {
        let next = match timings.as_slice() {
            [.., previous, last] => last + (last - previous),
            _ => duration / 2.0,
        };
        timings.push(next);
    }
    timings.truncate(slide_count);
    Ok(timings)
}

/// Append evenly spaced cuts between the last timing and `duration` until
/// `slide_count` entries exist. Cuts stay strictly before `duration`.
fn pad_evenly(timings: &mut Vec<f64>, duration: f64, slide_count: usize) {
    let Some(&last) = timings.last() else {
        return;
    };
    let missing = slide_count.saturating_sub(timings.len());
    if missing == 0 {
        return;
    }
    let step = (duration - last) / (missing + 1) as f64;
    timings.extend((1..=missing).map(|idx| last + idx as f64 * step));
}
