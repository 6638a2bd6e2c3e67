use crate::{FALLBACK_WEIGHT, SENTINEL_SCORE};

/// Linear min-max scaling of raw scores into `[0, 1]` weights.
///
/// The output is always index-aligned with the input: every entry gets a
/// weight, even the ones excluded from the min/max computation.
///
/// Degenerate inputs never divide by zero: when all usable scores are
/// identical (including the all-fallback case) every entry gets the uniform
/// `FALLBACK_WEIGHT` instead of NaN/inf.
///
/// # Panics
///
/// Panics on NaN or negative input — scores like that escaping the scorer
/// indicate a bug upstream, not an external fault.
pub fn normalize(scores: &[f64]) -> Vec<f64> {
    for s in scores {
        assert!(s.is_finite() && *s >= 0.0, "raw score out of domain: {s}");
    }

    if scores.is_empty() {
        return Vec::new();
    }

    // Sentinel "no data" entries are left out of the range computation so a
    // single dead worker does not compress everyone else's dynamic range.
    let usable = scores.iter().copied().filter(|s| *s != SENTINEL_SCORE);
    let (min, max) = match usable.fold(None::<(f64, f64)>, |acc, s| {
        Some(match acc {
            None => (s, s),
            Some((lo, hi)) => (lo.min(s), hi.max(s)),
        })
    }) {
        Some(range) => range,
        None => return vec![FALLBACK_WEIGHT; scores.len()],
    };

    if max - min < f64::EPSILON {
        return vec![FALLBACK_WEIGHT; scores.len()];
    }

    scores
        .iter()
        .map(|s| {
            if *s == SENTINEL_SCORE {
                FALLBACK_WEIGHT
            } else {
                ((s - min) / (max - min)).clamp(0.0, 1.0)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_stays_in_unit_interval() {
        let weights = normalize(&[0.1, 0.4, 0.9, 1.0, 0.55]);
        assert!(weights.iter().all(|w| (0.0..=1.0).contains(w)));
    }

    #[test]
    fn test_length_is_preserved() {
        for n in 0..6 {
            let scores: Vec<f64> = (0..n).map(|i| 0.1 + i as f64 * 0.2).collect();
            assert_eq!(normalize(&scores).len(), scores.len());
        }
    }

    #[test]
    fn test_identical_scores_yield_uniform_fallback() {
        let weights = normalize(&[0.1, 0.1, 0.1]);
        assert_eq!(weights, vec![FALLBACK_WEIGHT; 3]);
    }

    #[test]
    fn test_linear_scaling() {
        let weights = normalize(&[0.1, 0.2, 1.0]);
        assert!((weights[0] - 0.0).abs() < 1e-9);
        assert!((weights[1] - 1.0 / 9.0).abs() < 1e-9);
        assert!((weights[2] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sentinel_entries_keep_alignment() {
        let weights = normalize(&[0.0, 0.5, 1.0]);
        assert_eq!(weights.len(), 3);
        assert_eq!(weights[0], FALLBACK_WEIGHT);
        assert!((weights[1] - 0.0).abs() < 1e-9);
        assert!((weights[2] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_sentinel_input() {
        let weights = normalize(&[0.0, 0.0]);
        assert_eq!(weights, vec![FALLBACK_WEIGHT; 2]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    #[should_panic(expected = "out of domain")]
    fn test_nan_fails_fast() {
        normalize(&[0.5, f64::NAN]);
    }

    #[test]
    #[should_panic(expected = "out of domain")]
    fn test_negative_fails_fast() {
        normalize(&[0.5, -0.1]);
    }
}
