//! Netblock - IP Address Classification Against Provider Catalogues
//!
//! Netblock indexes a catalogue of CIDR network blocks, each owned by a
//! provider and carrying a set of tags, and answers "which catalogued blocks
//! contain this address?" for IPv4 and IPv6 queries.
//!
//! # Quick Start
//!
//! ```rust
//! use netblock::{CatalogueLoader, IndexKind, LookupService};
//!
//! let json = r#"{
//!     "ProviderA": [ { "tags": ["Tag1"], "prefixes": ["10.0.0.0/8"] } ],
//!     "ProviderB": [ { "tags": ["Tag2"], "prefixes": ["10.0.0.0/16", "2001:db8::/32"] } ]
//! }"#;
//!
//! // Build once at startup
//! let catalogue = CatalogueLoader::new(IndexKind::Trie).load_str(json)?;
//! let service = LookupService::new(catalogue.into_shared());
//!
//! // Both the /8 and the nested /16 contain this address
//! let response = service.lookup_one("10.0.0.5")?;
//! assert_eq!(response.result.len(), 2);
//!
//! // Batches answer in input order
//! let responses = service.lookup_many(&["10.1.0.1", "2001:db8::1"])?;
//! assert_eq!(responses[1].result[0].provider, "ProviderB");
//! # Ok::<(), netblock::NetblockError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  Catalogue (JSON, optionally .gz)    │
//! └──────────────────────────────────────┘
//!          ↓ CatalogueLoader (skips bad CIDRs, reports them)
//! ┌──────────────────────────────────────┐
//! │  PrefixIndex                         │
//! │   - TrieIndex: per-family bit-trie   │
//! │   - LinearIndex: full scan (oracle)  │
//! └──────────────────────────────────────┘
//!          ↓ Arc (frozen, lock-free reads)
//! ┌──────────────────────────────────────┐
//! │  LookupService → LookupResponse      │
//! └──────────────────────────────────────┘
//! ```
//!
//! Every covering network is returned, not only the most specific one.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Address parsing and canonical networks
pub mod address;
/// Catalogue loading and load reports
pub mod catalogue;
/// Error types for netblock operations
pub mod error;
pub mod file_reader;
/// Sequential-scan index
pub mod linear_index;
/// Index contract and backend factory
pub mod prefix_index;
/// Catalogue record type
pub mod record;
/// Query parsing and response shaping
pub mod service;
/// Per-family bit-trie index
pub mod trie_index;

// Re-exports for Rust consumers

pub use crate::address::{Address, AddressFamily, Network};
pub use crate::catalogue::{Catalogue, CatalogueLoader, LoadReport, SkippedEntry};
pub use crate::error::{NetblockError, Result};
pub use crate::linear_index::LinearIndex;
pub use crate::prefix_index::{IndexKind, PrefixIndex};
pub use crate::record::PrefixRecord;
pub use crate::service::{LookupResponse, LookupResult, LookupService};
pub use crate::trie_index::TrieIndex;

/// Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
