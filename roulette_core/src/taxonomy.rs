use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouletteError;

pub const MAX_OUTCOME: u8 = 36;

pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

const COLOR_KEYS: [&str; 2] = ["red", "black"];
const PARITY_KEYS: [&str; 2] = ["even", "odd"];
const DOZEN_KEYS: [&str; 3] = ["first", "second", "third"];
const COLUMN_KEYS: [&str; 3] = ["left", "center", "right"];
const RANGE_KEYS: [&str; 2] = ["low", "high"];

const STREET_COUNT: usize = 12;
const STRAIGHT_COUNT: usize = MAX_OUTCOME as usize + 1;

/// Adjacent pairs on the table layout: 24 horizontal, then 33 vertical.
pub const SPLITS: [[u8; 2]; 57] = [
    [1, 2], [2, 3], [4, 5], [5, 6], [7, 8], [8, 9], [10, 11], [11, 12],
    [13, 14], [14, 15], [16, 17], [17, 18], [19, 20], [20, 21], [22, 23], [23, 24],
    [25, 26], [26, 27], [28, 29], [29, 30], [31, 32], [32, 33], [34, 35], [35, 36],
    [1, 4], [2, 5], [3, 6], [4, 7], [5, 8], [6, 9], [7, 10], [8, 11], [9, 12],
    [10, 13], [11, 14], [12, 15], [13, 16], [14, 17], [15, 18], [16, 19], [17, 20],
    [18, 21], [19, 22], [20, 23], [21, 24], [22, 25], [23, 26], [24, 27], [25, 28],
    [26, 29], [27, 30], [28, 31], [29, 32], [30, 33], [31, 34], [32, 35], [33, 36],
];

pub const CORNERS: [[u8; 4]; 22] = [
    [1, 2, 4, 5], [2, 3, 5, 6], [4, 5, 7, 8], [5, 6, 8, 9],
    [7, 8, 10, 11], [8, 9, 11, 12], [10, 11, 13, 14], [11, 12, 14, 15],
    [13, 14, 16, 17], [14, 15, 17, 18], [16, 17, 19, 20], [17, 18, 20, 21],
    [19, 20, 22, 23], [20, 21, 23, 24], [22, 23, 25, 26], [23, 24, 26, 27],
    [25, 26, 28, 29], [26, 27, 29, 30], [28, 29, 31, 32], [29, 30, 32, 33],
    [31, 32, 34, 35], [32, 33, 35, 36],
];

pub const SIX_LINES: [[u8; 6]; 11] = [
    [1, 2, 3, 4, 5, 6],
    [4, 5, 6, 7, 8, 9],
    [7, 8, 9, 10, 11, 12],
    [10, 11, 12, 13, 14, 15],
    [13, 14, 15, 16, 17, 18],
    [16, 17, 18, 19, 20, 21],
    [19, 20, 21, 22, 23, 24],
    [22, 23, 24, 25, 26, 27],
    [25, 26, 27, 28, 29, 30],
    [28, 29, 30, 31, 32, 33],
    [31, 32, 33, 34, 35, 36],
];

/// The ten ways the engine groups outcomes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Color,
    Parity,
    Dozen,
    Column,
    Range,
    Street,
    Split,
    Corner,
    SixLine,
    Straight,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 10] = [
        CategoryKind::Color,
        CategoryKind::Parity,
        CategoryKind::Dozen,
        CategoryKind::Column,
        CategoryKind::Range,
        CategoryKind::Street,
        CategoryKind::Split,
        CategoryKind::Corner,
        CategoryKind::SixLine,
        CategoryKind::Straight,
    ];

    /// Threshold / bet type name.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKind::Color => "color",
            CategoryKind::Parity => "parity",
            CategoryKind::Dozen => "dozen",
            CategoryKind::Column => "column",
            CategoryKind::Range => "range",
            CategoryKind::Street => "street",
            CategoryKind::Split => "split",
            CategoryKind::Corner => "corner",
            CategoryKind::SixLine => "sixline",
            CategoryKind::Straight => "straight",
        }
    }

    /// Plural name of the category in the stats store.
    pub fn category_name(self) -> &'static str {
        match self {
            CategoryKind::Color => "colors",
            CategoryKind::Parity => "parities",
            CategoryKind::Dozen => "dozens",
            CategoryKind::Column => "columns",
            CategoryKind::Range => "ranges",
            CategoryKind::Street => "streets",
            CategoryKind::Split => "splits",
            CategoryKind::Corner => "corners",
            CategoryKind::SixLine => "sixlines",
            CategoryKind::Straight => "straights",
        }
    }

    pub fn member_count(self) -> usize {
        match self {
            CategoryKind::Color => COLOR_KEYS.len(),
            CategoryKind::Parity => PARITY_KEYS.len(),
            CategoryKind::Dozen => DOZEN_KEYS.len(),
            CategoryKind::Column => COLUMN_KEYS.len(),
            CategoryKind::Range => RANGE_KEYS.len(),
            CategoryKind::Street => STREET_COUNT,
            CategoryKind::Split => SPLITS.len(),
            CategoryKind::Corner => CORNERS.len(),
            CategoryKind::SixLine => SIX_LINES.len(),
            CategoryKind::Straight => STRAIGHT_COUNT,
        }
    }

    /// Even-money kinds (red/black, even/odd, low/high).
    pub fn is_simple(self) -> bool {
        matches!(
            self,
            CategoryKind::Color | CategoryKind::Parity | CategoryKind::Range
        )
    }

    /// Kinds where one outcome can hit several members at once.
    pub fn is_overlapping(self) -> bool {
        matches!(
            self,
            CategoryKind::Split | CategoryKind::Corner | CategoryKind::SixLine
        )
    }

    /// Canonical key of the member at `index`. Panics if `index` is out of range.
    pub fn member_key(self, index: usize) -> String {
        match self {
            CategoryKind::Color => COLOR_KEYS[index].to_string(),
            CategoryKind::Parity => PARITY_KEYS[index].to_string(),
            CategoryKind::Dozen => DOZEN_KEYS[index].to_string(),
            CategoryKind::Column => COLUMN_KEYS[index].to_string(),
            CategoryKind::Range => RANGE_KEYS[index].to_string(),
            CategoryKind::Street => join_numbers(&street_numbers(index)),
            CategoryKind::Split => join_numbers(&SPLITS[index]),
            CategoryKind::Corner => join_numbers(&CORNERS[index]),
            CategoryKind::SixLine => join_numbers(&SIX_LINES[index]),
            CategoryKind::Straight => {
                assert!(index < STRAIGHT_COUNT, "straight index out of range");
                index.to_string()
            }
        }
    }

    pub fn member_index(self, key: &str) -> Option<usize> {
        (0..self.member_count()).find(|&i| self.member_key(i) == key)
    }

    /// Numbers covered by a member, ascending. Outside kinds are derived from
    /// their membership rule.
    pub fn member_numbers(self, index: usize) -> Vec<u8> {
        match self {
            CategoryKind::Street => street_numbers(index).to_vec(),
            CategoryKind::Split => SPLITS[index].to_vec(),
            CategoryKind::Corner => CORNERS[index].to_vec(),
            CategoryKind::SixLine => SIX_LINES[index].to_vec(),
            CategoryKind::Straight => vec![index as u8],
            _ => (1..=MAX_OUTCOME)
                .filter(|&n| members_of(self, n).contains(&index))
                .collect(),
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = RouletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        CategoryKind::ALL
            .into_iter()
            .find(|k| k.as_str() == needle || k.category_name() == needle)
            .ok_or_else(|| RouletteError::UnknownCategory(s.to_string()))
    }
}

/// Colour of a pocket on the wheel; 0 is the only green pocket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WheelColor {
    Green,
    Red,
    Black,
}

pub fn wheel_color(outcome: u8) -> WheelColor {
    if outcome == 0 {
        WheelColor::Green
    } else if RED_NUMBERS.contains(&outcome) {
        WheelColor::Red
    } else {
        WheelColor::Black
    }
}

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

fn street_numbers(index: usize) -> [u8; 3] {
    assert!(index < STREET_COUNT, "street index out of range");
    let first = (index * 3 + 1) as u8;
    [first, first + 1, first + 2]
}

fn street_index(outcome: u8) -> usize {
    ((outcome - 1) / 3) as usize
}

/// Horizontal (same row) and vertical neighbours of `outcome`, bounded to 1..=36.
pub fn split_neighbours(outcome: u8) -> Vec<u8> {
    if outcome == 0 || outcome > MAX_OUTCOME {
        return Vec::new();
    }
    let row = street_index(outcome);
    let candidates = [
        outcome.checked_sub(3),
        outcome.checked_sub(1),
        outcome.checked_add(1),
        outcome.checked_add(3),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter(|n| (1..=MAX_OUTCOME).contains(n))
        .filter(|&n| {
            let horizontal = n.abs_diff(outcome) == 1;
            !horizontal || street_index(n) == row
        })
        .collect()
}

fn split_index(a: u8, b: u8) -> Option<usize> {
    let pair = [a.min(b), a.max(b)];
    SPLITS.iter().position(|p| *p == pair)
}

fn containing<const N: usize>(table: &[[u8; N]], outcome: u8) -> Vec<usize> {
    table
        .iter()
        .enumerate()
        .filter(|(_, group)| group.contains(&outcome))
        .map(|(i, _)| i)
        .collect()
}

/// Member indices of `kind` hit by `outcome`, ascending.
///
/// Total over `0..=36`: zero only belongs to `straights["0"]`, and anything
/// above 36 belongs to nothing.
pub fn members_of(kind: CategoryKind, outcome: u8) -> Vec<usize> {
    if outcome > MAX_OUTCOME {
        return Vec::new();
    }
    if outcome == 0 {
        return match kind {
            CategoryKind::Straight => vec![0],
            _ => Vec::new(),
        };
    }
    match kind {
        CategoryKind::Color => vec![if RED_NUMBERS.contains(&outcome) { 0 } else { 1 }],
        CategoryKind::Parity => vec![(outcome % 2) as usize],
        CategoryKind::Dozen => vec![((outcome - 1) / 12) as usize],
        CategoryKind::Column => vec![match outcome % 3 {
            1 => 0,
            2 => 1,
            _ => 2,
        }],
        CategoryKind::Range => vec![if outcome <= 18 { 0 } else { 1 }],
        CategoryKind::Street => vec![street_index(outcome)],
        CategoryKind::Split => {
            let mut hits: Vec<usize> = split_neighbours(outcome)
                .into_iter()
                .filter_map(|n| split_index(outcome, n))
                .collect();
            hits.sort_unstable();
            hits
        }
        CategoryKind::Corner => containing(&CORNERS, outcome),
        CategoryKind::SixLine => containing(&SIX_LINES, outcome),
        CategoryKind::Straight => vec![outcome as usize],
    }
}

/// Same as [`members_of`] but returns member keys.
pub fn member_keys_of(kind: CategoryKind, outcome: u8) -> Vec<String> {
    members_of(kind, outcome)
        .into_iter()
        .map(|i| kind.member_key(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seventeen_membership() {
        assert_eq!(member_keys_of(CategoryKind::Color, 17), vec!["black"]);
        assert_eq!(member_keys_of(CategoryKind::Parity, 17), vec!["odd"]);
        assert_eq!(member_keys_of(CategoryKind::Dozen, 17), vec!["second"]);
        assert_eq!(member_keys_of(CategoryKind::Column, 17), vec!["center"]);
        assert_eq!(member_keys_of(CategoryKind::Range, 17), vec!["low"]);
        assert_eq!(member_keys_of(CategoryKind::Street, 17), vec!["16-17-18"]);
        assert_eq!(
            member_keys_of(CategoryKind::Split, 17),
            vec!["16-17", "17-18", "14-17", "17-20"]
        );
        assert_eq!(
            member_keys_of(CategoryKind::Corner, 17),
            vec!["13-14-16-17", "14-15-17-18", "16-17-19-20", "17-18-20-21"]
        );
        assert_eq!(
            member_keys_of(CategoryKind::SixLine, 17),
            vec!["13-14-15-16-17-18", "16-17-18-19-20-21"]
        );
        assert_eq!(member_keys_of(CategoryKind::Straight, 17), vec!["17"]);
    }

    #[test]
    fn zero_only_hits_its_straight() {
        for kind in CategoryKind::ALL {
            let hits = members_of(kind, 0);
            if kind == CategoryKind::Straight {
                assert_eq!(hits, vec![0]);
            } else {
                assert!(hits.is_empty(), "{kind} should not contain 0");
            }
        }
    }

    #[test]
    fn out_of_range_hits_nothing() {
        for kind in CategoryKind::ALL {
            assert!(members_of(kind, 37).is_empty());
        }
    }

    #[test]
    fn split_neighbours_respect_rows_and_bounds() {
        assert_eq!(split_neighbours(1), vec![2, 4]);
        assert_eq!(split_neighbours(3), vec![2, 6]);
        assert_eq!(split_neighbours(4), vec![1, 5, 7]);
        assert_eq!(split_neighbours(5), vec![2, 4, 6, 8]);
        assert_eq!(split_neighbours(36), vec![33, 35]);
        assert!(split_neighbours(0).is_empty());
    }

    #[test]
    fn split_formula_matches_literal_table() {
        for n in 1..=MAX_OUTCOME {
            let from_table: Vec<usize> = SPLITS
                .iter()
                .enumerate()
                .filter(|(_, p)| p.contains(&n))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(members_of(CategoryKind::Split, n), from_table, "n={n}");
        }
    }

    #[test]
    fn overlapping_hit_counts() {
        for n in 1..=MAX_OUTCOME {
            let splits = members_of(CategoryKind::Split, n).len();
            let corners = members_of(CategoryKind::Corner, n).len();
            let lines = members_of(CategoryKind::SixLine, n).len();
            assert!((2..=4).contains(&splits), "n={n} splits={splits}");
            assert!((1..=4).contains(&corners), "n={n} corners={corners}");
            assert!((1..=2).contains(&lines), "n={n} sixlines={lines}");
        }
    }

    #[test]
    fn member_keys_round_trip_through_index() {
        for kind in CategoryKind::ALL {
            for i in 0..kind.member_count() {
                let key = kind.member_key(i);
                assert_eq!(kind.member_index(&key), Some(i), "{kind} {key}");
            }
        }
        assert_eq!(CategoryKind::Split.member_index("2-1"), None);
    }

    #[test]
    fn member_numbers_of_outside_bets() {
        assert_eq!(CategoryKind::Color.member_numbers(0), RED_NUMBERS.to_vec());
        assert_eq!(CategoryKind::Dozen.member_numbers(2), (25..=36).collect::<Vec<u8>>());
        assert_eq!(CategoryKind::Street.member_numbers(11), vec![34, 35, 36]);
    }

    #[test]
    fn parse_kind_names() {
        assert_eq!("sixline".parse::<CategoryKind>().unwrap(), CategoryKind::SixLine);
        assert_eq!("Colors".parse::<CategoryKind>().unwrap(), CategoryKind::Color);
        assert!("trio".parse::<CategoryKind>().is_err());
    }

    #[test]
    fn wheel_colors() {
        assert_eq!(wheel_color(0), WheelColor::Green);
        assert_eq!(wheel_color(1), WheelColor::Red);
        assert_eq!(wheel_color(2), WheelColor::Black);
    }
}
