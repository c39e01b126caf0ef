use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{RouletteError, RouletteResult};
use crate::taxonomy::CategoryKind;

/// Absence-streak cutoffs per category kind. A member is recommended once it
/// has been missing for at least this many updates; 0 recommends every member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    pub color: u32,
    pub parity: u32,
    pub range: u32,
    pub dozen: u32,
    pub column: u32,
    pub sixline: u32,
    pub corner: u32,
    pub street: u32,
    pub split: u32,
    pub straight: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            color: 8,
            parity: 8,
            range: 8,
            dozen: 5,
            column: 5,
            sixline: 10,
            corner: 12,
            street: 14,
            split: 18,
            straight: 25,
        }
    }
}

impl Thresholds {
    /// Same cutoff for every kind.
    pub fn uniform(value: u32) -> Self {
        let mut t = Self::default();
        for kind in CategoryKind::ALL {
            t.set(kind, value);
        }
        t
    }

    pub fn get(&self, kind: CategoryKind) -> u32 {
        match kind {
            CategoryKind::Color => self.color,
            CategoryKind::Parity => self.parity,
            CategoryKind::Range => self.range,
            CategoryKind::Dozen => self.dozen,
            CategoryKind::Column => self.column,
            CategoryKind::SixLine => self.sixline,
            CategoryKind::Corner => self.corner,
            CategoryKind::Street => self.street,
            CategoryKind::Split => self.split,
            CategoryKind::Straight => self.straight,
        }
    }

    pub fn set(&mut self, kind: CategoryKind, value: u32) {
        let slot = match kind {
            CategoryKind::Color => &mut self.color,
            CategoryKind::Parity => &mut self.parity,
            CategoryKind::Range => &mut self.range,
            CategoryKind::Dozen => &mut self.dozen,
            CategoryKind::Column => &mut self.column,
            CategoryKind::SixLine => &mut self.sixline,
            CategoryKind::Corner => &mut self.corner,
            CategoryKind::Street => &mut self.street,
            CategoryKind::Split => &mut self.split,
            CategoryKind::Straight => &mut self.straight,
        };
        *slot = value;
    }

    /// Parse a JSON object of `kind -> integer`. Missing kinds keep their
    /// defaults; negative values saturate to 0.
    pub fn from_json(text: &str) -> RouletteResult<Self> {
        let raw: BTreeMap<String, Value> = serde_json::from_str(text)?;
        let mut t = Self::default();
        for (key, value) in raw {
            let kind: CategoryKind = key.parse()?;
            let parsed = value.as_i64().ok_or_else(|| RouletteError::InvalidThreshold {
                key: key.clone(),
                value: value.to_string(),
            })?;
            t.set(kind, saturate(parsed));
        }
        Ok(t)
    }

    /// Apply a `kind=value` override, e.g. `color=3`.
    pub fn apply_override(&mut self, assignment: &str) -> RouletteResult<()> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| RouletteError::InvalidThreshold {
            key: assignment.to_string(),
            value: String::new(),
        })?;
        let kind: CategoryKind = key.parse()?;
        let parsed: i64 = value
            .trim()
            .parse()
            .map_err(|_| RouletteError::InvalidThreshold {
                key: key.trim().to_string(),
                value: value.to_string(),
            })?;
        self.set(kind, saturate(parsed));
        Ok(())
    }
}

fn saturate(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
