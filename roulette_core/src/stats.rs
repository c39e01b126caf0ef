use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use crate::taxonomy::CategoryKind;

/// Running statistics of one category member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct StatItem {
    pub count: u64,
    pub streak: u32,
    pub max_streak: u32,
    /// Updates since the last hit; 0 means hit on the latest update.
    pub absence_streak: u32,
}

impl StatItem {
    fn register_hit(&mut self) {
        self.absence_streak = 0;
        self.count += 1;
        self.streak += 1;
        self.max_streak = self.max_streak.max(self.streak);
    }
}

/// Fixed set of members for one [`CategoryKind`], indexed the way the
/// taxonomy indexes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    kind: CategoryKind,
    items: Vec<StatItem>,
}

impl Category {
    pub fn new(kind: CategoryKind) -> Self {
        Self {
            kind,
            items: vec![StatItem::default(); kind.member_count()],
        }
    }

    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[StatItem] {
        &self.items
    }

    pub fn at(&self, index: usize) -> Option<&StatItem> {
        self.items.get(index)
    }

    pub fn get(&self, key: &str) -> Option<&StatItem> {
        self.kind.member_index(key).and_then(|i| self.items.get(i))
    }

    /// `(member key, stats)` pairs in member order.
    pub fn iter(&self) -> impl Iterator<Item = (String, &StatItem)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(move |(i, item)| (self.kind.member_key(i), item))
    }

    pub fn total_hits(&self) -> u64 {
        self.items.iter().map(|s| s.count).sum()
    }

    /// Advance every member by one update. `hits` must be ascending member indices.
    pub(crate) fn record(&mut self, hits: &[usize]) {
        for item in &mut self.items {
            item.absence_streak += 1;
        }
        for (i, item) in self.items.iter_mut().enumerate() {
            if hits.binary_search(&i).is_ok() {
                item.register_hit();
            } else {
                item.streak = 0;
            }
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (key, item) in self.iter() {
            map.serialize_entry(&key, item)?;
        }
        map.end()
    }
}

/// The whole category store.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RouletteStats {
    pub colors: Category,
    pub parities: Category,
    pub dozens: Category,
    pub columns: Category,
    pub ranges: Category,
    pub streets: Category,
    pub splits: Category,
    pub corners: Category,
    pub sixlines: Category,
    pub straights: Category,
}

impl Default for RouletteStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RouletteStats {
    pub fn new() -> Self {
        Self {
            colors: Category::new(CategoryKind::Color),
            parities: Category::new(CategoryKind::Parity),
            dozens: Category::new(CategoryKind::Dozen),
            columns: Category::new(CategoryKind::Column),
            ranges: Category::new(CategoryKind::Range),
            streets: Category::new(CategoryKind::Street),
            splits: Category::new(CategoryKind::Split),
            corners: Category::new(CategoryKind::Corner),
            sixlines: Category::new(CategoryKind::SixLine),
            straights: Category::new(CategoryKind::Straight),
        }
    }

    pub fn category(&self, kind: CategoryKind) -> &Category {
        match kind {
            CategoryKind::Color => &self.colors,
            CategoryKind::Parity => &self.parities,
            CategoryKind::Dozen => &self.dozens,
            CategoryKind::Column => &self.columns,
            CategoryKind::Range => &self.ranges,
            CategoryKind::Street => &self.streets,
            CategoryKind::Split => &self.splits,
            CategoryKind::Corner => &self.corners,
            CategoryKind::SixLine => &self.sixlines,
            CategoryKind::Straight => &self.straights,
        }
    }

    pub(crate) fn category_mut(&mut self, kind: CategoryKind) -> &mut Category {
        match kind {
            CategoryKind::Color => &mut self.colors,
            CategoryKind::Parity => &mut self.parities,
            CategoryKind::Dozen => &mut self.dozens,
            CategoryKind::Column => &mut self.columns,
            CategoryKind::Range => &mut self.ranges,
            CategoryKind::Street => &mut self.streets,
            CategoryKind::Split => &mut self.splits,
            CategoryKind::Corner => &mut self.corners,
            CategoryKind::SixLine => &mut self.sixlines,
            CategoryKind::Straight => &mut self.straights,
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> + '_ {
        CategoryKind::ALL.into_iter().map(move |k| self.category(k))
    }

    pub fn member_total(&self) -> usize {
        self.categories().map(Category::len).sum()
    }
}
