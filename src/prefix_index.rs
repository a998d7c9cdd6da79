//! Containment index contract and backend selection
//!
//! An index is populated once with [`PrefixIndex::add`] and then frozen behind
//! an `Arc` for concurrent readers. Two backends implement the contract:
//!
//! - [`Linear`](IndexKind::Linear): sequential scan, O(n) per query. The
//!   reference the trie is checked against.
//! - [`Trie`](IndexKind::Trie): per-family bit-trie, O(address width) per
//!   query independent of catalogue size.
//!
//! Both return *every* record whose network contains the query, not only the
//! most specific one.

use crate::address::Address;
use crate::error::NetblockError;
use crate::linear_index::LinearIndex;
use crate::record::PrefixRecord;
use crate::trie_index::TrieIndex;
use std::fmt;
use std::str::FromStr;

/// Build-once, query-many containment index over [`PrefixRecord`]s
pub trait PrefixIndex: Send + Sync {
    /// Register a record
    ///
    /// Records are valid by construction, so there is no failure path.
    fn add(&mut self, record: PrefixRecord);

    /// All stored records whose network contains `address`
    ///
    /// Ordering is backend-specific but stable for a given insertion order;
    /// compare results as sets. An address whose family has no records
    /// yields an empty vector.
    fn lookup(&self, address: &Address) -> Vec<&PrefixRecord>;

    /// Number of records accepted
    fn len(&self) -> usize;

    /// Whether no records have been accepted
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Which backend this is
    fn kind(&self) -> IndexKind;
}

/// Index backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexKind {
    /// Sequential scan
    Linear,
    /// Per-family bit-trie
    #[default]
    Trie,
}

impl IndexKind {
    /// Create an empty index of this kind
    pub fn create(self) -> Box<dyn PrefixIndex> {
        match self {
            IndexKind::Linear => Box::new(LinearIndex::new()),
            IndexKind::Trie => Box::new(TrieIndex::new()),
        }
    }

    /// Name accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            IndexKind::Linear => "linear",
            IndexKind::Trie => "trie",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexKind {
    type Err = NetblockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(IndexKind::Linear),
            "trie" | "radix" => Ok(IndexKind::Trie),
            other => Err(NetblockError::Catalogue(format!(
                "unknown index kind '{}' (expected 'linear' or 'trie')",
                other
            ))),
        }
    }
}
