use std::collections::VecDeque;

use serde::Serialize;

use crate::taxonomy::{wheel_color, WheelColor};

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// The most recent outcomes, oldest first, bounded to `capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpinHistory {
    capacity: usize,
    spins: VecDeque<u8>,
}

impl Default for SpinHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl SpinHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            spins: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, outcome: u8) {
        if self.capacity == 0 {
            return;
        }
        if self.spins.len() == self.capacity {
            self.spins.pop_front();
        }
        self.spins.push_back(outcome);
    }

    pub fn len(&self) -> usize {
        self.spins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spins.is_empty()
    }

    pub fn last(&self) -> Option<u8> {
        self.spins.back().copied()
    }

    pub fn clear(&mut self) {
        self.spins.clear();
    }

    /// Newest first, with the pocket colour.
    pub fn iter_recent(&self) -> impl Iterator<Item = (u8, WheelColor)> + '_ {
        self.spins.iter().rev().map(|&n| (n, wheel_color(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_latest() {
        let mut h = SpinHistory::with_capacity(3);
        for n in [1, 2, 3, 0] {
            h.push(n);
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.last(), Some(0));
        let recent: Vec<_> = h.iter_recent().collect();
        assert_eq!(
            recent,
            vec![(0, WheelColor::Green), (3, WheelColor::Red), (2, WheelColor::Black)]
        );
    }

    #[test]
    fn zero_capacity_stays_empty() {
        let mut h = SpinHistory::with_capacity(0);
        h.push(5);
        assert!(h.is_empty());
    }
}
