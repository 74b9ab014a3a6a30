use indexmap::IndexMap;
use tracing::debug;

use crate::calendars::TradeDt;

/// The direction of a neighbour lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Side {
    Next,
    Prev,
}

/// The arguments of a neighbour lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NeighbourKey {
    pub(crate) side: Side,
    pub(crate) date: TradeDt,
    pub(crate) step: usize,
    pub(crate) adjust: bool,
}

/// A bounded memo of neighbour lookups, evicting the oldest entry first.
#[derive(Clone, Debug)]
pub(crate) struct NeighbourCache {
    entries: IndexMap<NeighbourKey, TradeDt>,
    capacity: usize,
}

impl NeighbourCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub(crate) fn get(&self, key: &NeighbourKey) -> Option<TradeDt> {
        self.entries.get(key).copied()
    }

    pub(crate) fn insert(&mut self, key: NeighbourKey, value: TradeDt) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                debug!(date = %evicted.date, "evicted neighbour cache entry");
            }
        }
        self.entries.insert(key, value);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
