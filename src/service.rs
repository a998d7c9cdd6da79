//! Lookup service
//!
//! Parses query text, runs it against a frozen index and shapes the matches
//! into the JSON payload returned to clients:
//!
//! ```json
//! { "result": [ { "subnet": "192.168.1.0/24", "provider": "ProviderA", "tags": ["Tag1"] } ] }
//! ```
//!
//! Malformed query text is reported as [`NetblockError::InvalidAddress`] and
//! never recovered here; translating it into a client error is the caller's
//! job.

use crate::address::parse;
use crate::error::{NetblockError, Result};
use crate::prefix_index::PrefixIndex;
use crate::record::PrefixRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Batches smaller than this are answered on the calling thread
const PARALLEL_BATCH_THRESHOLD: usize = 64;

/// One matching catalogue entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    /// Network in CIDR notation
    pub subnet: String,
    /// Owning provider
    pub provider: String,
    /// Labels, sorted
    pub tags: Vec<String>,
}

impl From<&PrefixRecord> for LookupResult {
    fn from(record: &PrefixRecord) -> Self {
        Self {
            subnet: record.network().to_string(),
            provider: record.provider().to_string(),
            tags: record.tags().iter().cloned().collect(),
        }
    }
}

/// Response for a single queried address
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LookupResponse {
    /// Every catalogue entry containing the address
    pub result: Vec<LookupResult>,
}

impl LookupResponse {
    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

/// Answers single and batch queries against a shared, read-only index
#[derive(Clone)]
pub struct LookupService {
    index: Arc<dyn PrefixIndex>,
}

impl LookupService {
    /// Wrap a frozen index
    pub fn new(index: Arc<dyn PrefixIndex>) -> Self {
        Self { index }
    }

    /// The underlying index
    pub fn index(&self) -> &Arc<dyn PrefixIndex> {
        &self.index
    }

    /// Matching records for one address, unshaped
    pub fn lookup_records(&self, ip: &str) -> Result<Vec<&PrefixRecord>> {
        let addr = parse(ip)?;
        Ok(self.index.lookup(&addr))
    }

    /// Look up one address
    pub fn lookup_one(&self, ip: &str) -> Result<LookupResponse> {
        let result = self
            .lookup_records(ip)?
            .into_iter()
            .map(LookupResult::from)
            .collect();
        Ok(LookupResponse { result })
    }

    /// Look up many addresses, one response per input in input order
    ///
    /// Fails as a whole with [`NetblockError::InvalidAddress`] if any input is
    /// malformed; no partial results are returned.
    pub fn lookup_many<S>(&self, ips: &[S]) -> Result<Vec<LookupResponse>>
    where
        S: AsRef<str> + Sync,
    {
        if ips.len() < PARALLEL_BATCH_THRESHOLD {
            return ips.iter().map(|ip| self.lookup_one(ip.as_ref())).collect();
        }

        // Validate up front so the reported error is the first bad input
        if let Some(bad) = ips.iter().find(|ip| parse(ip.as_ref()).is_err()) {
            return Err(NetblockError::InvalidAddress(bad.as_ref().to_string()));
        }

        ips.par_iter()
            .map(|ip| self.lookup_one(ip.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::CatalogueLoader;
    use crate::prefix_index::IndexKind;

    fn service(kind: IndexKind) -> LookupService {
        let json = r#"{
            "ProviderA": [ { "tags": ["Tag1"], "prefixes": ["192.168.1.0/24"] } ],
            "ProviderB": [ { "tags": ["Tag2"], "prefixes": ["2001:0db8::/32"] } ]
        }"#;
        let catalogue = CatalogueLoader::new(kind).load_str(json).unwrap();
        LookupService::new(catalogue.into_shared())
    }

    #[test]
    fn test_lookup_one_shapes_response() {
        for kind in [IndexKind::Linear, IndexKind::Trie] {
            let response = service(kind).lookup_one("192.168.1.10").unwrap();
            assert_eq!(
                response.result,
                vec![LookupResult {
                    subnet: "192.168.1.0/24".to_string(),
                    provider: "ProviderA".to_string(),
                    tags: vec!["Tag1".to_string()],
                }]
            );
        }
    }

    #[test]
    fn test_lookup_one_no_match() {
        let response = service(IndexKind::Trie).lookup_one("10.0.0.1").unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn test_lookup_one_invalid() {
        let err = service(IndexKind::Trie).lookup_one("invalid_ip").unwrap_err();
        assert_eq!(err, NetblockError::InvalidAddress("invalid_ip".to_string()));
    }

    #[test]
    fn test_lookup_many_empty() {
        let ips: [&str; 0] = [];
        assert!(service(IndexKind::Trie).lookup_many(&ips).unwrap().is_empty());
    }

    #[test]
    fn test_lookup_many_fails_fast() {
        let err = service(IndexKind::Linear)
            .lookup_many(&["192.168.1.1", "invalid_ip"])
            .unwrap_err();
        assert_eq!(err, NetblockError::InvalidAddress("invalid_ip".to_string()));
    }

    #[test]
    fn test_large_batch_preserves_order() {
        let svc = service(IndexKind::Trie);
        let ips: Vec<String> = (0..500)
            .map(|i| {
                if i % 2 == 0 {
                    format!("192.168.1.{}", i % 256)
                } else {
                    format!("2001:db8::{:x}", i)
                }
            })
            .collect();

        let responses = svc.lookup_many(&ips).unwrap();
        assert_eq!(responses.len(), ips.len());
        for (i, response) in responses.iter().enumerate() {
            let expected = if i % 2 == 0 { "ProviderA" } else { "ProviderB" };
            assert_eq!(response.result[0].provider, expected, "input {}", i);
        }
    }

    #[test]
    fn test_large_batch_reports_first_bad_input() {
        let svc = service(IndexKind::Trie);
        let mut ips: Vec<String> = (0..200).map(|i| format!("10.0.0.{}", i % 256)).collect();
        ips[150] = "bad-150".to_string();
        ips[20] = "bad-20".to_string();

        let err = svc.lookup_many(&ips).unwrap_err();
        assert_eq!(err, NetblockError::InvalidAddress("bad-20".to_string()));
    }

    #[test]
    fn test_response_json_shape() {
        let response = service(IndexKind::Trie).lookup_one("2001:db8::1").unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "result": [ { "subnet": "2001:db8::/32", "provider": "ProviderB", "tags": ["Tag2"] } ]
            })
        );
    }
}
