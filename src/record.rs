//! Catalogue records: a network block with its owning provider and labels

use crate::address::{Address, Network};
use std::collections::BTreeSet;

/// An immutable catalogue entry
///
/// The network is canonical by construction (see [`Network::new`]), so any
/// `PrefixRecord` is valid input for a [`PrefixIndex`](crate::PrefixIndex).
/// Several records may share a network; indexes keep and return all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRecord {
    network: Network,
    provider: String,
    tags: BTreeSet<String>,
}

impl PrefixRecord {
    /// Create a record; duplicate tags collapse
    pub fn new<I, S>(network: Network, provider: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            network,
            provider: provider.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// The network block
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Owning provider name
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Labels, in sorted order
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Whether this record's network covers `addr`
    pub fn contains(&self, addr: &Address) -> bool {
        self.network.contains(addr)
    }
}
