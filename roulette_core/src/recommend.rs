use serde::Serialize;

use crate::config::Thresholds;
use crate::stats::RouletteStats;
use crate::taxonomy::CategoryKind;

/// Absence streak from which stakes start ramping up.
pub const LONG_ABSENCE: u32 = 5;

const RAMP_PER_SPIN: f64 = 0.25;
const SIMPLE_BET_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bet {
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    pub value: String,
    pub absence_streak: u32,
    #[serde(skip)]
    pub member: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub bet: Bet,
    pub stake: f64,
    pub reason: String,
}

/// Every member whose absence streak reached its kind's threshold, in store order.
pub fn evaluate(stats: &RouletteStats, thresholds: &Thresholds) -> Vec<Bet> {
    let mut bets = Vec::new();
    for category in stats.categories() {
        let kind = category.kind();
        let threshold = thresholds.get(kind);
        for (member, item) in category.items().iter().enumerate() {
            if item.absence_streak >= threshold {
                bets.push(Bet {
                    kind,
                    value: kind.member_key(member),
                    absence_streak: item.absence_streak,
                    member,
                });
            }
        }
    }
    bets
}

pub fn stake(base_stake: f64, kind: CategoryKind, absence_streak: u32) -> f64 {
    let mut amount = base_stake;
    if absence_streak >= LONG_ABSENCE {
        amount *= 1.0 + f64::from(absence_streak - (LONG_ABSENCE - 1)) * RAMP_PER_SPIN;
    }
    if kind.is_simple() {
        amount *= SIMPLE_BET_FACTOR;
    }
    round_cents(amount)
}

pub fn reason(kind: CategoryKind, absence_streak: u32) -> String {
    let mut parts = Vec::new();
    if absence_streak >= LONG_ABSENCE {
        parts.push(format!("long absence streak ({absence_streak} spins)"));
    }
    if kind.is_simple() {
        parts.push("near 50% probability bet".to_string());
    }
    if parts.is_empty() {
        return "Standard recommendation".to_string();
    }
    capitalize(&parts.join(" and "))
}

/// Stable sort: long absences first, then even-money kinds, then longer absences.
pub fn rank(bets: &mut [Bet]) {
    bets.sort_by(|a, b| {
        let a_long = a.absence_streak >= LONG_ABSENCE;
        let b_long = b.absence_streak >= LONG_ABSENCE;
        b_long
            .cmp(&a_long)
            .then_with(|| b.kind.is_simple().cmp(&a.kind.is_simple()))
            .then_with(|| b.absence_streak.cmp(&a.absence_streak))
    });
}

/// Select, rank and size bets in one pass.
pub fn recommend(
    stats: &RouletteStats,
    thresholds: &Thresholds,
    base_stake: f64,
) -> Vec<Recommendation> {
    let mut bets = evaluate(stats, thresholds);
    rank(&mut bets);
    bets.into_iter()
        .map(|bet| Recommendation {
            stake: stake(base_stake, bet.kind, bet.absence_streak),
            reason: reason(bet.kind, bet.absence_streak),
            bet,
        })
        .collect()
}

fn round_cents(value: f64) -> f64 {
    // f64::round rounds half away from zero
    (value * 100.0).round() / 100.0
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bet(kind: CategoryKind, absence_streak: u32) -> Bet {
        Bet {
            kind,
            value: kind.member_key(0),
            absence_streak,
            member: 0,
        }
    }

    #[test]
    fn stake_long_simple() {
        assert_eq!(stake(10.0, CategoryKind::Color, 7), 21.0);
    }

    #[test]
    fn stake_plain_below_ramp() {
        assert_eq!(stake(10.0, CategoryKind::Straight, 4), 10.0);
        assert_eq!(stake(10.0, CategoryKind::Parity, 0), 12.0);
        assert_eq!(stake(10.0, CategoryKind::Dozen, 5), 12.5);
    }

    #[test]
    fn stake_rounds_to_cents() {
        assert_eq!(stake(1.111, CategoryKind::Straight, 5), 1.39);
        assert_eq!(stake(9.999, CategoryKind::Dozen, 4), 10.0);
        assert_eq!(stake(3.0, CategoryKind::Color, 6), 5.4);
    }

    #[test]
    fn stake_ramps_monotonically() {
        let mut last = 0.0;
        for absence in LONG_ABSENCE..60 {
            let s = stake(7.5, CategoryKind::Street, absence);
            assert!(s >= last, "absence={absence} {s} < {last}");
            last = s;
        }
    }

    #[test]
    fn reason_texts() {
        assert_eq!(reason(CategoryKind::Corner, 2), "Standard recommendation");
        assert_eq!(reason(CategoryKind::Range, 1), "Near 50% probability bet");
        assert_eq!(
            reason(CategoryKind::Dozen, 6),
            "Long absence streak (6 spins)"
        );
        assert_eq!(
            reason(CategoryKind::Color, 9),
            "Long absence streak (9 spins) and near 50% probability bet"
        );
    }

    #[test]
    fn rank_simple_before_equal_absence() {
        let mut bets = vec![bet(CategoryKind::Straight, 6), bet(CategoryKind::Color, 6)];
        rank(&mut bets);
        let kinds: Vec<_> = bets.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![CategoryKind::Color, CategoryKind::Straight]);
    }

    #[test]
    fn rank_long_absence_first_and_stable() {
        let mut bets = vec![
            bet(CategoryKind::Color, 3),
            bet(CategoryKind::Split, 9),
            bet(CategoryKind::Corner, 9),
            bet(CategoryKind::Straight, 12),
            bet(CategoryKind::Parity, 5),
        ];
        rank(&mut bets);
        let order: Vec<_> = bets.iter().map(|b| (b.kind, b.absence_streak)).collect();
        assert_eq!(
            order,
            vec![
                (CategoryKind::Parity, 5),
                (CategoryKind::Straight, 12),
                (CategoryKind::Split, 9),
                (CategoryKind::Corner, 9),
                (CategoryKind::Color, 3),
            ]
        );
    }

    #[test]
    fn zero_thresholds_select_every_member() {
        let stats = RouletteStats::new();
        let bets = evaluate(&stats, &Thresholds::uniform(0));
        assert_eq!(bets.len(), stats.member_total());
    }

    #[test]
    fn recommendation_serializes_flat() {
        let rec = Recommendation {
            bet: bet(CategoryKind::Color, 6),
            stake: 18.0,
            reason: reason(CategoryKind::Color, 6),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "color");
        assert_eq!(json["value"], "red");
        assert_eq!(json["absence_streak"], 6);
        assert!(json.get("member").is_none());
    }
}
