use tracing::{debug, trace, warn};

use crate::{
    config::Thresholds,
    error::{RouletteError, RouletteResult},
    recommend::{self, Bet, Recommendation},
    stats::RouletteStats,
    taxonomy::{members_of, CategoryKind, MAX_OUTCOME},
};

/// Owns the category store and advances it one outcome at a time.
///
/// Updates take `&mut self`, so a caller cannot run two of them at once on
/// the same analyzer. Reads (`snapshot`, `evaluate`) never mutate.
#[derive(Debug, Clone)]
pub struct RouletteAnalyzer {
    thresholds: Thresholds,
    stats: RouletteStats,
    spins: u64,
}

impl Default for RouletteAnalyzer {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

impl RouletteAnalyzer {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            stats: RouletteStats::new(),
            spins: 0,
        }
    }

    /// Record one outcome. Out-of-range outcomes are rejected and leave the
    /// store untouched.
    pub fn update(&mut self, outcome: u8) -> RouletteResult<()> {
        if outcome > MAX_OUTCOME {
            warn!(outcome, "rejected outcome");
            return Err(RouletteError::InvalidOutcome(i64::from(outcome)));
        }
        for kind in CategoryKind::ALL {
            let hits = members_of(kind, outcome);
            trace!(%kind, ?hits, "hit set");
            self.stats.category_mut(kind).record(&hits);
        }
        self.spins += 1;
        debug!(outcome, spins = self.spins, "stats updated");
        Ok(())
    }

    /// Like [`update`](Self::update) for untyped driver input.
    pub fn update_checked(&mut self, raw: i64) -> RouletteResult<()> {
        let outcome = u8::try_from(raw)
            .ok()
            .filter(|n| *n <= MAX_OUTCOME)
            .ok_or(RouletteError::InvalidOutcome(raw))?;
        self.update(outcome)
    }

    pub fn reset(&mut self) {
        self.stats = RouletteStats::new();
        self.spins = 0;
        debug!("stats reset");
    }

    /// Replace the thresholds. Destructive: all stats are reset, since old
    /// streaks were accumulated under the previous configuration.
    pub fn reconfigure(&mut self, thresholds: Thresholds) {
        self.thresholds = thresholds;
        self.reset();
    }

    pub fn snapshot(&self) -> &RouletteStats {
        &self.stats
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Number of accepted updates since construction or the last reset.
    pub fn spins(&self) -> u64 {
        self.spins
    }

    /// Qualifying bets in store order, unranked.
    pub fn bets(&self) -> Vec<Bet> {
        recommend::evaluate(&self.stats, &self.thresholds)
    }

    /// Ranked, staked recommendations for the current state.
    pub fn evaluate(&self, base_stake: f64) -> Vec<Recommendation> {
        let recs = recommend::recommend(&self.stats, &self.thresholds, base_stake);
        debug!(count = recs.len(), base_stake, "recommendations evaluated");
        recs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatItem;

    fn item(count: u64, streak: u32, max_streak: u32, absence_streak: u32) -> StatItem {
        StatItem {
            count,
            streak,
            max_streak,
            absence_streak,
        }
    }

    #[test]
    fn first_update_on_one() {
        let mut engine = RouletteAnalyzer::default();
        engine.update(1).unwrap();
        let s = engine.snapshot();
        assert_eq!(s.colors.get("red"), Some(&item(1, 1, 1, 0)));
        assert_eq!(s.colors.get("black").unwrap().absence_streak, 1);
        assert_eq!(s.straights.get("1").unwrap().count, 1);
        assert_eq!(s.straights.get("0").unwrap().absence_streak, 1);
        assert_eq!(engine.spins(), 1);
    }

    #[test]
    fn three_reds_recommend_black() {
        let mut t = Thresholds::default();
        t.color = 3;
        let mut engine = RouletteAnalyzer::new(t);
        for n in [1, 3, 5] {
            engine.update(n).unwrap();
        }
        let recs = engine.evaluate(10.0);
        assert!(recs.iter().any(|r| r.bet.kind == CategoryKind::Color
            && r.bet.value == "black"
            && r.bet.absence_streak == 3));
        assert!(!recs
            .iter()
            .any(|r| r.bet.kind == CategoryKind::Color && r.bet.value == "red"));
        assert_eq!(engine.snapshot().colors.get("red"), Some(&item(3, 3, 3, 0)));
    }

    #[test]
    fn invalid_outcome_leaves_state() {
        let mut engine = RouletteAnalyzer::default();
        engine.update(7).unwrap();
        let before = engine.snapshot().clone();
        assert!(matches!(
            engine.update(37),
            Err(RouletteError::InvalidOutcome(37))
        ));
        assert!(matches!(
            engine.update_checked(-1),
            Err(RouletteError::InvalidOutcome(-1))
        ));
        assert!(engine.update_checked(300).is_err());
        assert_eq!(engine.snapshot(), &before);
        assert_eq!(engine.spins(), 1);
    }

    #[test]
    fn zero_ages_every_outside_member() {
        let mut engine = RouletteAnalyzer::default();
        engine.update(0).unwrap();
        let s = engine.snapshot();
        for kind in CategoryKind::ALL {
            for (key, stat) in s.category(kind).iter() {
                if kind == CategoryKind::Straight && key == "0" {
                    assert_eq!(*stat, item(1, 1, 1, 0));
                } else {
                    assert_eq!(stat.absence_streak, 1, "{kind} {key}");
                    assert_eq!(stat.count, 0);
                }
            }
        }
    }

    #[test]
    fn overlapping_streaks_need_consecutive_hits() {
        let mut engine = RouletteAnalyzer::default();
        engine.update(1).unwrap();
        engine.update(2).unwrap();
        let s = engine.snapshot();
        assert_eq!(s.splits.get("1-2"), Some(&item(2, 2, 2, 0)));
        assert_eq!(s.splits.get("1-4"), Some(&item(1, 0, 1, 1)));
        engine.update(1).unwrap();
        let s = engine.snapshot();
        assert_eq!(s.splits.get("2-3").unwrap().streak, 0);
        assert_eq!(s.splits.get("1-2").unwrap().streak, 3);
        assert_eq!(s.corners.get("1-2-4-5").unwrap().max_streak, 3);
    }

    #[test]
    fn reset_restores_fresh_snapshot() {
        let mut engine = RouletteAnalyzer::default();
        for n in [0, 17, 17, 36, 5] {
            engine.update(n).unwrap();
        }
        engine.reset();
        assert_eq!(engine.snapshot(), RouletteAnalyzer::default().snapshot());
        assert_eq!(engine.spins(), 0);
    }

    #[test]
    fn reconfigure_resets_and_swaps_thresholds() {
        let mut engine = RouletteAnalyzer::default();
        engine.update(12).unwrap();
        engine.reconfigure(Thresholds::uniform(1));
        assert_eq!(engine.thresholds(), &Thresholds::uniform(1));
        assert_eq!(engine.snapshot(), &RouletteStats::new());
        assert!(engine.bets().is_empty());
        engine.update(12).unwrap();
        assert!(engine
            .bets()
            .iter()
            .all(|b| b.absence_streak >= 1 && b.value != "12"));
    }
}
