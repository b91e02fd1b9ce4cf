//! Next-phrase selection
//!
//! Selection is biased toward the high-risk pool but uniform within the
//! chosen pool: weak material comes up often, yet the drill never becomes
//! fully deterministic. The RNG is injected so distribution tests can run
//! against a seeded generator.

use rand::Rng;
use uuid::Uuid;

use super::risk::risk_score;
use crate::phrases::Phrase;

/// Selection policy constants
#[derive(Debug, Clone, Copy)]
pub struct SelectorConfig {
    /// Risk score at or above which a phrase belongs to the high-risk pool
    pub high_risk_threshold: f64,
    /// Probability of sampling from the high-risk pool when it is non-empty
    pub high_risk_bias: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            high_risk_threshold: 0.3,
            high_risk_bias: 0.8,
        }
    }
}

/// Pick the next phrase to present.
///
/// `exclude` is the phrase shown in the immediately preceding round; it is
/// skipped unless the collection holds a single phrase, in which case
/// repetition is unavoidable. An empty collection yields `None`; this never
/// fails.
pub fn select_next<'a, R: Rng>(
    phrases: &'a [Phrase],
    exclude: Option<Uuid>,
    config: &SelectorConfig,
    rng: &mut R,
) -> Option<&'a Phrase> {
    match phrases {
        [] => None,
        [only] => Some(only),
        _ => {
            let eligible: Vec<&Phrase> =
                phrases.iter().filter(|p| Some(p.id) != exclude).collect();

            let high_risk: Vec<&Phrase> = eligible
                .iter()
                .copied()
                .filter(|p| risk_score(p) >= config.high_risk_threshold)
                .collect();

            let pool = if !high_risk.is_empty() && rng.gen::<f64>() < config.high_risk_bias {
                &high_risk
            } else {
                &eligible
            };

            Some(pool[rng.gen_range(0..pool.len())])
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn phrase_with_counts(text: &str, success: u32, failure: u32) -> Phrase {
        let mut phrase = Phrase::new(text.to_string(), text.to_string());
        phrase.success_count = success;
        phrase.failure_count = failure;
        phrase
    }

    #[test]
    fn test_empty_collection_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select_next(&[], None, &SelectorConfig::default(), &mut rng);
        assert!(picked.is_none());
    }

    #[test]
    fn test_singleton_returned_even_when_excluded() {
        let mut rng = StdRng::seed_from_u64(1);
        let phrases = vec![phrase_with_counts("solo", 2, 1)];
        let only_id = phrases[0].id;

        let picked =
            select_next(&phrases, Some(only_id), &SelectorConfig::default(), &mut rng).unwrap();
        assert_eq!(picked.id, only_id);
    }

    #[test]
    fn test_excluded_phrase_never_returned() {
        let mut rng = StdRng::seed_from_u64(7);
        let phrases = vec![
            phrase_with_counts("a", 1, 3),
            phrase_with_counts("b", 5, 0),
            phrase_with_counts("c", 0, 0),
        ];
        let excluded = phrases[1].id;

        for _ in 0..1000 {
            let picked =
                select_next(&phrases, Some(excluded), &SelectorConfig::default(), &mut rng)
                    .unwrap();
            assert_ne!(picked.id, excluded);
        }
    }

    #[test]
    fn test_high_risk_bias_distribution() {
        // One high-risk and one low-risk phrase, no exclusion. Expected draw
        // rate for the high-risk phrase: 0.8 (biased pool) plus 0.2 * 1/2
        // (uniform fallback) = 0.9.
        let mut rng = StdRng::seed_from_u64(42);
        let phrases = vec![
            phrase_with_counts("hard", 1, 3), // risk 0.75
            phrase_with_counts("easy", 9, 0), // risk 0.0
        ];
        let hard_id = phrases[0].id;

        let trials = 10_000;
        let mut hard_hits = 0;
        for _ in 0..trials {
            let picked =
                select_next(&phrases, None, &SelectorConfig::default(), &mut rng).unwrap();
            if picked.id == hard_id {
                hard_hits += 1;
            }
        }

        let frequency = f64::from(hard_hits) / f64::from(trials);
        assert!(
            (frequency - 0.9).abs() < 0.02,
            "high-risk frequency {} outside tolerance",
            frequency
        );
    }

    #[test]
    fn test_mixed_collection_distribution() {
        // a: risk 0.75, b: risk 0.0, c: risk 1.0 (unseen). High-risk pool is
        // {a, c}; with no exclusion the pool is drawn 80% of the time, so b
        // should appear with frequency 0.2 * 1/3.
        let mut rng = StdRng::seed_from_u64(99);
        let phrases = vec![
            phrase_with_counts("a", 1, 3),
            phrase_with_counts("b", 5, 0),
            phrase_with_counts("c", 0, 0),
        ];
        let easy_id = phrases[1].id;

        let trials = 10_000;
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for _ in 0..trials {
            let picked =
                select_next(&phrases, None, &SelectorConfig::default(), &mut rng).unwrap();
            *counts.entry(if picked.id == easy_id { "easy" } else { "risky" }).or_default() += 1;
        }

        let easy_frequency = f64::from(counts["easy"]) / f64::from(trials);
        let expected = 0.2 / 3.0;
        assert!(
            (easy_frequency - expected).abs() < 0.02,
            "low-risk frequency {} outside tolerance (expected {})",
            easy_frequency,
            expected
        );
    }

    #[test]
    fn test_empty_high_risk_pool_falls_back_to_eligible() {
        let mut rng = StdRng::seed_from_u64(5);
        let phrases = vec![
            phrase_with_counts("a", 10, 0),
            phrase_with_counts("b", 8, 1), // risk 1/9, below threshold
        ];

        for _ in 0..100 {
            assert!(select_next(&phrases, None, &SelectorConfig::default(), &mut rng).is_some());
        }
    }
}
