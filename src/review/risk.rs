//! Risk scoring for review selection
//!
//! A phrase's risk score is its empirical failure rate over completed
//! rounds. Unseen phrases score maximal risk so new material enters the
//! rotation immediately.

use crate::phrases::Phrase;

/// Score a phrase in [0, 1]. Zero attempts scores 1.0; otherwise the score
/// is `failure_count / (success_count + failure_count)`.
pub fn risk_score(phrase: &Phrase) -> f64 {
    let total = phrase.total_attempts();
    if total == 0 {
        return 1.0;
    }
    f64::from(phrase.failure_count) / f64::from(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase_with_counts(success: u32, failure: u32) -> Phrase {
        let mut phrase = Phrase::new("hola".to_string(), "hello".to_string());
        phrase.success_count = success;
        phrase.failure_count = failure;
        phrase
    }

    #[test]
    fn test_unseen_phrase_scores_max() {
        assert_eq!(risk_score(&phrase_with_counts(0, 0)), 1.0);
    }

    #[test]
    fn test_score_is_failure_rate() {
        assert_eq!(risk_score(&phrase_with_counts(1, 3)), 0.75);
        assert_eq!(risk_score(&phrase_with_counts(5, 0)), 0.0);
        assert_eq!(risk_score(&phrase_with_counts(0, 4)), 1.0);
        assert_eq!(risk_score(&phrase_with_counts(2, 2)), 0.5);
    }

    #[test]
    fn test_score_bounds() {
        for (s, f) in [(0, 0), (1, 0), (0, 1), (7, 13), (100, 1)] {
            let score = risk_score(&phrase_with_counts(s, f));
            assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
        }
    }
}
