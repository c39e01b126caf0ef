use serde::{Deserialize, Serialize};

use crate::recommend::Recommendation;
use crate::taxonomy::{members_of, CategoryKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaytableEntry {
    pub kind: CategoryKind,
    pub payout_multiplier: f64, // winnings per unit staked, stake returned on top
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paytable(pub Vec<PaytableEntry>);

impl Default for Paytable {
    fn default() -> Self {
        Self::single_zero()
    }
}

impl Paytable {
    /// Standard single-zero wheel payouts.
    pub fn single_zero() -> Self {
        let entry = |kind, payout_multiplier| PaytableEntry {
            kind,
            payout_multiplier,
        };
        Self(vec![
            entry(CategoryKind::Straight, 35.0),
            entry(CategoryKind::Split, 17.0),
            entry(CategoryKind::Street, 11.0),
            entry(CategoryKind::Corner, 8.0),
            entry(CategoryKind::SixLine, 5.0),
            entry(CategoryKind::Dozen, 2.0),
            entry(CategoryKind::Column, 2.0),
            entry(CategoryKind::Color, 1.0),
            entry(CategoryKind::Parity, 1.0),
            entry(CategoryKind::Range, 1.0),
        ])
    }

    pub fn multiplier(&self, kind: CategoryKind) -> f64 {
        self.0
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.payout_multiplier)
            .unwrap_or(0.0)
    }
}

/// Net result of one recommendation against `outcome`: winnings if its member
/// was hit, the lost stake (negative) otherwise.
pub fn settle(paytable: &Paytable, rec: &Recommendation, outcome: u8) -> f64 {
    let won = members_of(rec.bet.kind, outcome).contains(&rec.bet.member);
    if won {
        rec.stake * paytable.multiplier(rec.bet.kind)
    } else {
        -rec.stake
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RoundResult {
    pub staked: f64,
    pub net: f64,
    pub wins: u32,
    pub losses: u32,
}

/// Running balance across settled rounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bankroll {
    pub initial: f64,
    pub balance: f64,
    pub rounds: u64,
    pub total_staked: f64,
}

impl Bankroll {
    pub fn new(initial: f64) -> Self {
        Self {
            initial,
            balance: initial,
            rounds: 0,
            total_staked: 0.0,
        }
    }

    pub fn profit(&self) -> f64 {
        self.balance - self.initial
    }

    /// Settle every recommendation placed before `outcome` was spun.
    /// Rounds without recommendations are not counted.
    pub fn settle_round(
        &mut self,
        paytable: &Paytable,
        recs: &[Recommendation],
        outcome: u8,
    ) -> RoundResult {
        let mut result = RoundResult::default();
        for rec in recs {
            let net = settle(paytable, rec, outcome);
            result.staked += rec.stake;
            result.net += net;
            if net > 0.0 {
                result.wins += 1;
            } else {
                result.losses += 1;
            }
        }
        if !recs.is_empty() {
            self.rounds += 1;
            self.total_staked += result.staked;
            self.balance += result.net;
        }
        result
    }
}
