//! Prediction rule: a uniform random score mapped to a message bucket.
//!
//! There is no image analysis behind the score. The score is drawn from the
//! injected [`RandomSource`] and the bucket lookup is first-match in the
//! fixed [`BUCKETS`] order, falling back to the last bucket.

use std::time::Duration;

use tracing::trace;

use crate::domain::{AnalysisResult, Bucket, BUCKETS};
use crate::ports::RandomSource;

/// Lowest score a draw can produce.
pub const SCORE_MIN: u8 = 50;
/// Highest score a draw can produce.
pub const SCORE_MAX: u8 = 90;

/// Number of distinct scores in `SCORE_MIN..=SCORE_MAX`.
const SCORE_SPAN: f64 = (SCORE_MAX - SCORE_MIN + 1) as f64;

/// Draws a score uniformly from `SCORE_MIN..=SCORE_MAX`.
///
/// Draws outside `[0, 1)` from a misbehaving source are clamped into the
/// score range instead of escaping it.
pub fn draw_score<R: RandomSource + ?Sized>(random: &mut R) -> u8 {
    let unit = sanitize(random.next_unit());
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let offset = (unit * SCORE_SPAN).floor() as u8;
    SCORE_MIN.saturating_add(offset).min(SCORE_MAX)
}

/// Draws an analysis delay of `min + U * span`.
pub fn draw_delay<R: RandomSource + ?Sized>(
    random: &mut R,
    min: Duration,
    span: Duration,
) -> Duration {
    let unit = sanitize(random.next_unit());
    min.saturating_add(span.mul_f64(unit))
}

/// Returns the bucket for `score`.
#[must_use]
pub fn classify(score: u8) -> &'static Bucket {
    BUCKETS
        .iter()
        .find(|bucket| bucket.contains(score))
        .unwrap_or(&BUCKETS[BUCKETS.len() - 1])
}

/// Draws a score and builds the matching result.
pub fn predict<R: RandomSource + ?Sized>(random: &mut R) -> AnalysisResult {
    let score = draw_score(random);
    let bucket = classify(score);
    trace!(score, bucket = bucket.name, "Classified score");
    AnalysisResult::from_bucket(score, bucket)
}

fn sanitize(unit: f64) -> f64 {
    if unit.is_finite() {
        unit.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of draws, cycling when exhausted.
    struct Draws(Vec<f64>, usize);

    impl RandomSource for Draws {
        fn next_unit(&mut self) -> f64 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }
    }

    /// Small xorshift generator so the 10k-draw test covers varied input.
    struct XorShift(u64);

    impl RandomSource for XorShift {
        fn next_unit(&mut self) -> f64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            #[allow(clippy::cast_precision_loss)]
            let value = (self.0 >> 11) as f64 / (1u64 << 53) as f64;
            value
        }
    }

    #[test]
    fn test_score_bounds() {
        assert_eq!(draw_score(&mut Draws(vec![0.0], 0)), 50);
        assert_eq!(draw_score(&mut Draws(vec![0.999_999], 0)), 90);
        assert_eq!(draw_score(&mut Draws(vec![0.5], 0)), 70);
    }

    #[test]
    fn test_out_of_range_draws_are_clamped() {
        assert_eq!(draw_score(&mut Draws(vec![1.0], 0)), 90);
        assert_eq!(draw_score(&mut Draws(vec![7.5], 0)), 90);
        assert_eq!(draw_score(&mut Draws(vec![-0.3], 0)), 50);
        assert_eq!(draw_score(&mut Draws(vec![f64::NAN], 0)), 50);
    }

    #[test]
    fn test_ten_thousand_draws_stay_in_range_and_bucket() {
        let mut random = XorShift(0x9E37_79B9_7F4A_7C15);
        let mut seen = [false; 41];
        for _ in 0..10_000 {
            let score = draw_score(&mut random);
            assert!((SCORE_MIN..=SCORE_MAX).contains(&score));
            assert!(classify(score).contains(score));
            seen[usize::from(score - SCORE_MIN)] = true;
        }
        assert!(seen.iter().all(|s| *s), "every score should appear");
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(50).name, "charmingly_appealing");
        assert_eq!(classify(64).name, "charmingly_appealing");
        assert_eq!(classify(65).name, "quite_alluring");
        assert_eq!(classify(74).name, "quite_alluring");
        assert_eq!(classify(75).name, "highly_desirable");
        assert_eq!(classify(84).name, "highly_desirable");
        assert_eq!(classify(85).name, "irresistible");
        assert_eq!(classify(90).name, "irresistible");
    }

    #[test]
    fn test_classify_falls_back_to_last_bucket() {
        assert_eq!(classify(0).name, "charmingly_appealing");
        assert_eq!(classify(49).name, "charmingly_appealing");
        assert_eq!(classify(200).name, "charmingly_appealing");
    }

    #[test]
    fn test_result_fields_come_from_one_bucket() {
        for score in SCORE_MIN..=SCORE_MAX {
            let result = AnalysisResult::from_bucket(score, classify(score));
            let owners: Vec<_> = BUCKETS
                .iter()
                .filter(|b| {
                    b.title == result.title
                        && b.description == result.description
                        && b.advice == result.advice
                })
                .collect();
            assert_eq!(owners.len(), 1);
            assert!(owners[0].contains(result.percentage));
        }
    }

    #[test]
    fn test_predict_uses_drawn_score() {
        let result = predict(&mut Draws(vec![0.9], 0));
        assert_eq!(result.percentage, 86);
        assert_eq!(result.title, "Absolutely Irresistible! 🔥");
    }

    #[test]
    fn test_delay_range() {
        let min = Duration::from_millis(2000);
        let span = Duration::from_millis(2000);
        assert_eq!(draw_delay(&mut Draws(vec![0.0], 0), min, span), min);
        assert_eq!(
            draw_delay(&mut Draws(vec![0.5], 0), min, span),
            Duration::from_millis(3000)
        );
        let longest = draw_delay(&mut Draws(vec![0.999_999], 0), min, span);
        assert!(longest < Duration::from_millis(4000));
    }
}
