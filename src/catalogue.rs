//! Catalogue loading
//!
//! Reads the bulk provider catalogue and populates a [`PrefixIndex`].
//!
//! # Format
//!
//! A JSON object mapping each provider to a list of groups. Every CIDR in a
//! group's `prefixes` gets that group's `tags`:
//!
//! ```json
//! {
//!   "ProviderA": [
//!     { "tags": ["Tag1"], "prefixes": ["192.168.1.0/24", "2001:db8::/32"] }
//!   ]
//! }
//! ```
//!
//! Missing `tags` or `prefixes` fields are treated as empty.
//!
//! # Failure handling
//!
//! A prefix that does not parse as CIDR is skipped and recorded in the
//! [`LoadReport`]; the rest of the catalogue still loads. A source that is not
//! JSON, or not shaped as above, aborts the whole load.
//!
//! # Example
//!
//! ```rust
//! use netblock::{CatalogueLoader, IndexKind};
//!
//! let json = r#"{ "ProviderA": [ { "tags": ["Tag1"], "prefixes": ["192.168.1.0/24", "bogus"] } ] }"#;
//! let catalogue = CatalogueLoader::new(IndexKind::Trie).load_str(json)?;
//!
//! assert_eq!(catalogue.report.accepted, 1);
//! assert_eq!(catalogue.report.skipped.len(), 1);
//! # Ok::<(), netblock::NetblockError>(())
//! ```

use crate::address::{parse_network, AddressFamily};
use crate::error::{NetblockError, Result};
use crate::file_reader;
use crate::prefix_index::{IndexKind, PrefixIndex};
use crate::record::PrefixRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One group of prefixes sharing a tag set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogueGroup {
    /// Labels applied to every prefix in the group
    #[serde(default)]
    pub tags: Vec<String>,
    /// CIDR strings
    #[serde(default)]
    pub prefixes: Vec<String>,
}

/// Parsed catalogue source: provider name to its groups
pub type CatalogueSource = BTreeMap<String, Vec<CatalogueGroup>>;

/// A catalogue entry that was not loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// Provider the entry belonged to
    pub provider: String,
    /// The prefix text as it appeared in the source
    pub prefix: String,
    /// Why it was rejected
    pub reason: String,
}

/// Outcome of a load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Records added to the index
    pub accepted: usize,
    /// Accepted IPv4 networks
    pub ipv4: usize,
    /// Accepted IPv6 networks
    pub ipv6: usize,
    /// Entries skipped because they were not valid CIDR
    pub skipped: Vec<SkippedEntry>,
    /// Accepted records per provider
    pub providers: BTreeMap<String, usize>,
}

impl LoadReport {
    /// Whether every entry loaded
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// A populated index together with its load report
pub struct Catalogue {
    /// The populated index, still mutable
    pub index: Box<dyn PrefixIndex>,
    /// What was accepted and skipped
    pub report: LoadReport,
}

impl Catalogue {
    /// Freeze the index for shared, read-only use
    pub fn into_shared(self) -> Arc<dyn PrefixIndex> {
        Arc::from(self.index)
    }
}

/// Builds an index of the configured kind from catalogue sources
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogueLoader {
    kind: IndexKind,
}

impl CatalogueLoader {
    /// Create a loader producing indexes of `kind`
    pub fn new(kind: IndexKind) -> Self {
        Self { kind }
    }

    /// Load from JSON text
    pub fn load_str(&self, json: &str) -> Result<Catalogue> {
        let source: CatalogueSource = serde_json::from_str(json)?;
        Ok(self.load_source(&source))
    }

    /// Load from a JSON byte stream
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Catalogue> {
        let source: CatalogueSource = serde_json::from_reader(reader)?;
        Ok(self.load_source(&source))
    }

    /// Load from a file (`.gz` and `-` for stdin supported)
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Catalogue> {
        let path = path.as_ref();
        let reader = file_reader::open(path).map_err(|e| {
            NetblockError::Io(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let source: CatalogueSource = serde_json::from_reader(reader).map_err(|e| {
            match NetblockError::from(e) {
                NetblockError::Catalogue(msg) => {
                    NetblockError::Catalogue(format!("{}: {}", path.display(), msg))
                }
                other => other,
            }
        })?;
        Ok(self.load_source(&source))
    }

    /// Populate a fresh index from an already-parsed source
    pub fn load_source(&self, source: &CatalogueSource) -> Catalogue {
        let mut index = self.kind.create();
        let report = self.populate(source, index.as_mut());
        Catalogue { index, report }
    }

    /// Add every valid entry of `source` to an existing index
    ///
    /// The loader's configured kind is ignored; records go into `index`
    /// whatever its backend.
    pub fn populate(&self, source: &CatalogueSource, index: &mut dyn PrefixIndex) -> LoadReport {
        let mut report = LoadReport::default();

        for (provider, groups) in source {
            debug!(provider = %provider, groups = groups.len(), "loading provider");
            let accepted_before = report.accepted;

            for group in groups {
                for prefix in &group.prefixes {
                    match parse_network(prefix) {
                        Ok(network) => {
                            match network.family() {
                                AddressFamily::V4 => report.ipv4 += 1,
                                AddressFamily::V6 => report.ipv6 += 1,
                            }
                            index.add(PrefixRecord::new(
                                network,
                                provider.as_str(),
                                group.tags.iter().cloned(),
                            ));
                            report.accepted += 1;
                        }
                        Err(err) => {
                            warn!(
                                provider = %provider,
                                prefix = %prefix,
                                error = %err,
                                "skipping malformed catalogue entry"
                            );
                            report.skipped.push(SkippedEntry {
                                provider: provider.clone(),
                                prefix: prefix.clone(),
                                reason: err.to_string(),
                            });
                        }
                    }
                }
            }

            report
                .providers
                .insert(provider.clone(), report.accepted - accepted_before);
        }

        info!(
            kind = %index.kind(),
            accepted = report.accepted,
            skipped = report.skipped.len(),
            providers = report.providers.len(),
            "catalogue loaded"
        );

        report
    }
}
