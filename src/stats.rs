//! Rolling form statistics and the composite ranking scores. Everything here
//! is a pure function: identical inputs give bit-identical outputs, and no
//! rounding happens below the report/sink boundary.

/// Fixed coefficients of the published ranking formula.
const HIT_RATE_WEIGHT: f64 = 0.6;
const STDDEV_PENALTY_2: f64 = 0.15;
const STDDEV_PENALTY_3: f64 = 0.20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormStats {
    pub mean: f64,
    pub hit_rate_2: f64,
    pub hit_rate_3: f64,
    pub stddev: f64,
}

pub fn form_stats(shots: &[u32]) -> FormStats {
    FormStats {
        mean: mean(shots),
        hit_rate_2: hit_rate(shots, 2),
        hit_rate_3: hit_rate(shots, 3),
        stddev: population_stddev(shots),
    }
}

pub fn mean(shots: &[u32]) -> f64 {
    if shots.is_empty() {
        return 0.0;
    }
    shots.iter().map(|&v| v as f64).sum::<f64>() / shots.len() as f64
}

/// Fraction of windowed games with at least `threshold` shots.
pub fn hit_rate(shots: &[u32], threshold: u32) -> f64 {
    if shots.is_empty() {
        return 0.0;
    }
    shots.iter().filter(|&&v| v >= threshold).count() as f64 / shots.len() as f64
}

/// Population standard deviation: divides by W, not W-1.
pub fn population_stddev(shots: &[u32]) -> f64 {
    if shots.is_empty() {
        return 0.0;
    }
    let m = mean(shots);
    let var = shots
        .iter()
        .map(|&v| {
            let d = v as f64 - m;
            d * d
        })
        .sum::<f64>()
        / shots.len() as f64;
    var.sqrt()
}

/// Opponent shots-against relative to the league baseline. Neutral (1.0)
/// when the baseline is non-positive.
pub fn boost_factor(opponent_sa: f64, league_avg_sa: f64) -> f64 {
    if league_avg_sa > 0.0 {
        opponent_sa / league_avg_sa
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub adjusted_mean: f64,
    pub score2: f64,
    pub score3: f64,
}

pub fn composite_scores(form: &FormStats, boost: f64) -> Scores {
    let adjusted_mean = form.mean * boost;
    Scores {
        adjusted_mean,
        score2: adjusted_mean + HIT_RATE_WEIGHT * form.hit_rate_2 - STDDEV_PENALTY_2 * form.stddev,
        score3: adjusted_mean + HIT_RATE_WEIGHT * form.hit_rate_3 - STDDEV_PENALTY_3 * form.stddev,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [u32; 10] = [1, 2, 0, 3, 2, 1, 4, 2, 0, 3];

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sample_window_statistics() {
        let form = form_stats(&SAMPLE);
        assert!(close(form.mean, 1.8));
        assert!(close(form.hit_rate_2, 0.6));
        assert!(close(form.hit_rate_3, 0.3));
        assert!((form.stddev - 1.2490).abs() < 1e-4);
    }

    #[test]
    fn sample_window_scores_at_neutral_boost() {
        let form = form_stats(&SAMPLE);
        let scores = composite_scores(&form, boost_factor(28.0, 28.0));
        assert!(close(scores.adjusted_mean, 1.8));
        assert!((scores.score2 - 1.9727).abs() < 1e-4);
        assert!((scores.score3 - 1.7302).abs() < 1e-4);
    }

    #[test]
    fn stddev_is_zero_iff_constant() {
        assert_eq!(population_stddev(&[2, 2, 2, 2]), 0.0);
        assert!(population_stddev(&[2, 2, 2, 3]) > 0.0);
        assert!(population_stddev(&[0, 5, 1, 4]) >= 0.0);
    }

    #[test]
    fn hit_rate_2_dominates_hit_rate_3() {
        for window in [&[0u32, 1, 2, 3, 4][..], &[3, 3, 3][..], &[0, 0][..]] {
            assert!(hit_rate(window, 2) >= hit_rate(window, 3));
        }
    }

    #[test]
    fn boost_is_neutral_at_baseline_and_bad_baseline() {
        assert_eq!(boost_factor(28.0, 28.0), 1.0);
        assert_eq!(boost_factor(35.0, 0.0), 1.0);
        assert_eq!(boost_factor(35.0, -1.0), 1.0);
        assert!(boost_factor(30.0, 28.0) > 1.0);
    }

    #[test]
    fn scoring_is_bit_identical_across_calls() {
        let form = form_stats(&SAMPLE);
        let boost = boost_factor(31.5, 28.0);
        let first = composite_scores(&form, boost);
        let second = composite_scores(&form, boost);
        assert_eq!(first.adjusted_mean.to_bits(), second.adjusted_mean.to_bits());
        assert_eq!(first.score2.to_bits(), second.score2.to_bits());
        assert_eq!(first.score3.to_bits(), second.score3.to_bits());
    }
}
