use crate::error::AnalysisError;

/// Minimum spacing between consecutive slide starts, and the floor for
/// every derived slide duration.
pub const MIN_SLIDE_GAP: f64 = 0.5;

/// Normalise a timing list: start at 0, sort, drop duplicates and anything
/// at or past `duration`, then greedily drop entries closer than
/// [`MIN_SLIDE_GAP`] to the previous kept one.
///
/// The result always contains the leading 0, even for a zero duration.
pub fn validate_timings(timings: &[f64], duration: f64) -> Vec<f64> {
    let mut candidates: Vec<f64> = timings
        .iter()
        .copied()
        .filter(|t| t.is_finite() && *t > 0.0 && *t < duration)
        .collect();
    candidates.sort_by(f64::total_cmp);
    candidates.dedup();

    let mut kept = vec![0.0];
    for timing in candidates {
        if timing - kept[kept.len() - 1] >= MIN_SLIDE_GAP {
            kept.push(timing);
        }
    }
    kept
}

/// Gap to the next start, or the remaining audio for the last slide;
/// clamped to at least [`MIN_SLIDE_GAP`].
pub fn slide_durations(timings: &[f64], total_duration: f64) -> Vec<f64> {
    timings
        .iter()
        .enumerate()
        .map(|(idx, &start)| {
            let end = timings.get(idx + 1).copied().unwrap_or(total_duration);
            (end - start).max(MIN_SLIDE_GAP)
        })
        .collect()
}

/// Structural check applied to every strategy result before it is used.
pub(crate) fn check_timings(
    timings: Vec<f64>,
    duration: f64,
    slide_count: usize,
) -> Result<Vec<f64>, AnalysisError> {
    if timings.len() != slide_count {
        return Err(AnalysisError::InvalidTimings(format!(
            "expected {} timings, got {}",
            slide_count,
            timings.len()
        )));
    }
    if timings.first() != Some(&0.0) {
        return Err(AnalysisError::InvalidTimings(
            "first timing is not 0".to_string(),
        ));
    }
    if let Some(bad) = timings.iter().find(|t| !t.is_finite() || **t >= duration) {
        return Err(AnalysisError::InvalidTimings(format!(
            "timing {} lies outside [0, {})",
            bad, duration
        )));
    }
    if timings.windows(2).any(|pair| pair[1] < pair[0]) {
        return Err(AnalysisError::InvalidTimings(
            "timings are not ascending".to_string(),
        ));
    }
    Ok(timings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn forces_leading_zero_and_sorts() {
        assert_eq!(validate_timings(&[6.0, 2.0, 4.0], 10.0), vec![0.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn drops_duplicates_out_of_range_and_close_entries() {
        let timings = [0.0, 3.0, 3.0, 3.2, 3.6, 9.9, 10.0, 12.0, f64::NAN, -1.0];
        assert_eq!(validate_timings(&timings, 10.0), vec![0.0, 3.0, 3.6, 9.9]);
    }

    #[test]
    fn empty_input_keeps_start() {
        assert_eq!(validate_timings(&[], 10.0), vec![0.0]);
        assert_eq!(validate_timings(&[1.0, 2.0], 0.0), vec![0.0]);
    }

    #[test]
    fn output_respects_minimum_gap() {
        let timings: Vec<f64> = (0..50).map(|idx| idx as f64 * 0.3).collect();
        let validated = validate_timings(&timings, 12.0);
        assert_eq!(validated[0], 0.0);
        for pair in validated.windows(2) {
            assert!(pair[1] - pair[0] >= MIN_SLIDE_GAP);
        }
        assert!(validated.iter().all(|&t| t < 12.0));
    }

    #[test]
    fn durations_cover_total() {
        let durations = slide_durations(&[0.0, 4.0, 9.0], 15.0);
        assert_eq!(durations, vec![4.0, 5.0, 6.0]);
        assert_relative_eq!(durations.iter().sum::<f64>(), 15.0);
    }

    #[test]
    fn durations_are_clamped() {
        assert_eq!(slide_durations(&[0.0, 0.25, 9.75], 10.0), vec![0.5, 9.5, 0.5]);
    }

    #[test]
    fn check_rejects_malformed_sequences() {
        assert!(check_timings(vec![0.0, 5.0], 10.0, 3).is_err());
        assert!(check_timings(vec![1.0, 5.0], 10.0, 2).is_err());
        assert!(check_timings(vec![0.0, 12.0], 10.0, 2).is_err());
        assert!(check_timings(vec![0.0, 6.0, 4.0], 10.0, 3).is_err());
        assert_eq!(check_timings(vec![0.0, 4.0], 10.0, 2), Ok(vec![0.0, 4.0]));
    }
}
