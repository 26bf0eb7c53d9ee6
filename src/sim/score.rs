//! Round scoring

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Points awarded for matching `match_count` blocks with one keystroke.
///
/// Each block is worth `POINTS_PER_BLOCK`; every block beyond the first
/// adds `COMBO_BONUS_PER_EXTRA`.
pub fn points_for(match_count: u32) -> u64 {
    if match_count == 0 {
        return 0;
    }
    let n = match_count as u64;
    POINTS_PER_BLOCK * n + COMBO_BONUS_PER_EXTRA * (n - 1)
}

/// Presentation tier for the current score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreTier {
    Low,
    Mid,
    High,
    Top,
}

impl ScoreTier {
    pub fn for_score(score: u64) -> Self {
        let [mid, high, top] = TIER_THRESHOLDS;
        if score >= top {
            ScoreTier::Top
        } else if score >= high {
            ScoreTier::High
        } else if score >= mid {
            ScoreTier::Mid
        } else {
            ScoreTier::Low
        }
    }

    /// Text color (0xRRGGBB) for the score readout
    pub fn color(&self) -> u32 {
        match self {
            ScoreTier::Low => 0xFFFFFF,
            ScoreTier::Mid => 0x7FFFD4,
            ScoreTier::High => 0xFFD700,
            ScoreTier::Top => 0xFF4500,
        }
    }
}

/// Score of the running round
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    score: u64,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::for_score(self.score)
    }

    /// Add the points for one match pass; returns the points awarded
    pub fn add_score(&mut self, match_count: u32) -> u64 {
        let points = points_for(match_count);
        self.score += points;
        points
    }

    /// Return the round's score and reset to zero
    pub fn take(&mut self) -> u64 {
        std::mem::take(&mut self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_score_law() {
        assert_eq!(points_for(0), 0);
        assert_eq!(points_for(1), 5);
        assert_eq!(points_for(2), 12);
        assert_eq!(points_for(3), 19);
    }

    #[test]
    fn test_scorer_accumulates_and_takes() {
        let mut scorer = Scorer::new();
        assert_eq!(scorer.add_score(1), 5);
        assert_eq!(scorer.add_score(2), 12);
        assert_eq!(scorer.score(), 17);
        assert_eq!(scorer.take(), 17);
        assert_eq!(scorer.score(), 0);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(ScoreTier::for_score(0), ScoreTier::Low);
        assert_eq!(ScoreTier::for_score(99), ScoreTier::Low);
        assert_eq!(ScoreTier::for_score(100), ScoreTier::Mid);
        assert_eq!(ScoreTier::for_score(300), ScoreTier::High);
        assert_eq!(ScoreTier::for_score(10_000), ScoreTier::Top);
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases(counts in proptest::collection::vec(0u32..6, 0..40)) {
            let mut scorer = Scorer::new();
            let mut last = 0;
            for n in counts {
                let points = scorer.add_score(n);
                prop_assert_eq!(points, 5 * n as u64 + 2 * (n as u64).saturating_sub(1));
                prop_assert!(scorer.score() >= last);
                last = scorer.score();
            }
        }
    }
}
