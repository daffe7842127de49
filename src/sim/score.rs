//! Fair play score
//!
//! score = 100 · 2^(-(minor + 10·major) / 10)
//!
//! Every 10 penalty units halve the score; a major card weighs as much as ten
//! minor cards. The score approaches 0 but never reaches it.

use super::state::ScoreState;
use crate::config::PenaltyWeights;
use crate::consts::MAX_FAIR_PLAY_SCORE;

/// Score for raw minor/major penalty totals with the default weighting
pub fn fair_play_score(minor: f32, major: f32) -> f32 {
    PenaltyWeights::default().score(minor, major)
}

impl PenaltyWeights {
    /// Penalty units for the given tier totals
    #[inline]
    pub fn penalty_units(&self, minor: f32, major: f32) -> f32 {
        minor * self.minor + major * self.major
    }

    pub fn score(&self, minor: f32, major: f32) -> f32 {
        MAX_FAIR_PLAY_SCORE * 2f32.powf(-self.penalty_units(minor, major) / self.halving)
    }

    /// Score for a run's tally
    pub fn score_run(&self, tally: &ScoreState) -> f32 {
        self.score(tally.minor, tally.major)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::CardKind;
    use proptest::prelude::*;

    #[test]
    fn test_clean_run_scores_100() {
        assert_eq!(fair_play_score(0.0, 0.0), 100.0);
    }

    #[test]
    fn test_ten_minors_equal_one_major() {
        let minors = fair_play_score(10.0, 0.0);
        let major = fair_play_score(0.0, 1.0);
        assert!((minors - major).abs() < 1e-4);
        assert!((major - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_one_of_each() {
        // 100 · 2^(-1.1)
        let score = fair_play_score(1.0, 1.0);
        assert!((score - 46.6516).abs() < 1e-3);
    }

    #[test]
    fn test_score_run_uses_tally() {
        let mut tally = ScoreState::default();
        tally.book(CardKind::Minor, 1.0);
        tally.book(CardKind::Major, 1.0);
        let weights = PenaltyWeights::default();
        assert_eq!(weights.score_run(&tally), fair_play_score(1.0, 1.0));
    }

    #[test]
    fn test_custom_weights() {
        let weights = PenaltyWeights {
            minor: 2.0,
            major: 5.0,
            halving: 5.0,
        };
        // 2·1 + 5·1 = 7 units over a halving of 5
        let expected = 100.0 * 2f32.powf(-7.0 / 5.0);
        assert!((weights.score(1.0, 1.0) - expected).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_score_bounded(minor in 0u32..200, major in 0u32..20) {
            let score = fair_play_score(minor as f32, major as f32);
            prop_assert!(score > 0.0);
            prop_assert!(score <= 100.0);
        }

        #[test]
        fn prop_strictly_decreasing(minor in 0u32..100, major in 0u32..10) {
            let base = fair_play_score(minor as f32, major as f32);
            prop_assert!(fair_play_score(minor as f32 + 1.0, major as f32) < base);
            prop_assert!(fair_play_score(minor as f32, major as f32 + 1.0) < base);
        }
    }
}
