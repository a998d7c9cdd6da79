//! Sequential-scan index
//!
//! Tests every stored network against the query. Slow on large catalogues,
//! but obviously correct, which makes it the oracle for [`TrieIndex`].
//!
//! [`TrieIndex`]: crate::trie_index::TrieIndex

use crate::address::Address;
use crate::prefix_index::{IndexKind, PrefixIndex};
use crate::record::PrefixRecord;

/// Records in insertion order, scanned in full on every lookup
#[derive(Debug, Default)]
pub struct LinearIndex {
    records: Vec<PrefixRecord>,
}

impl LinearIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefixIndex for LinearIndex {
    fn add(&mut self, record: PrefixRecord) {
        self.records.push(record);
    }

    fn lookup(&self, address: &Address) -> Vec<&PrefixRecord> {
        self.records
            .iter()
            .filter(|record| record.contains(address))
            .collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn kind(&self) -> IndexKind {
        IndexKind::Linear
    }
}
