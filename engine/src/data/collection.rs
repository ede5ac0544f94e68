use serde::{Deserialize, Serialize};

use super::card::CardRecord;

/// All records of one expansion, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSet {
    /// Expansion name as listed on the index page.
    pub name: String,
    pub records: Vec<CardRecord>,
}

impl CardSet {
    pub fn new(name: impl Into<String>) -> Self {
        CardSet {
            name: name.into(),
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Every extracted set, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCollection {
    pub sets: Vec<CardSet>,
}

impl CardCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, set: CardSet) {
        self.sets.push(set);
    }

    /// Card `index` of set `set`, both zero-based.
    pub fn card(&self, set: usize, index: usize) -> Option<&CardRecord> {
        self.sets.get(set).and_then(|s| s.records.get(index))
    }

    /// Total number of records across all sets.
    pub fn card_count(&self) -> usize {
        self.sets.iter().map(CardSet::len).sum()
    }

    /// `(set index, card index, record)` for every record, in source order.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, usize, &CardRecord)> {
        self.sets.iter().enumerate().flat_map(|(set_idx, set)| {
            set.records
                .iter()
                .enumerate()
                .map(move |(card_idx, record)| (set_idx, card_idx, record))
        })
    }
}
