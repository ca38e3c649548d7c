//! Target-list configuration for the Jolokia-to-Zabbix bridge.
//!
//! The target list is a YAML sequence of entries, one per monitored
//! JVM, each naming a Jolokia endpoint, a poll frequency and a set of
//! attribute requests. The reserved key `common` marks a pseudo-target
//! whose requests and poll frequency apply to every real target as
//! defaults.
//!
//! The list is loaded once at startup, validated strictly (no partial
//! load) and held immutable for the process lifetime.

pub mod error;


pub use error::{ConfigError, Result};

use jolzab_common::types::RequestSpec;
use serde::Deserialize;

/// Reserved key of the pseudo-target carrying shared requests and the
/// default poll frequency.
pub const COMMON_KEY: &str = "common";

/// One entry of the target list.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetEntry {
    pub key: String,
    /// Jolokia endpoint URL; absent on the `common` entry.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default, rename = "poll-frequency")]
    pub poll_frequency: Option<u64>,
    #[serde(default)]
    pub requests: Vec<RequestSpec>,
}

/// The merged request set for one poll cycle: the `common` entry's
/// requests plus the target's own, bound to the target's endpoint.
///
/// Built fresh on every call, never cached. A batch without an
/// endpoint (unknown key, or an entry that never declared one) is a
/// no-op: the poll executor skips the network call entirely.
#[derive(Debug, Clone, Default)]
pub struct AggregatedBatch {
    pub endpoint: Option<String>,
    pub requests: Vec<RequestSpec>,
}

/// The loaded, immutable target list.
#[derive(Debug)]
pub struct BridgeConfig {
    entries: Vec<TargetEntry>,
}

impl BridgeConfig {
    /// Reads and parses the target list from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is unreadable or the
    /// document fails validation; the whole load is aborted.
    pub fn load(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses and validates a target-list document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed YAML, a duplicated
    /// `common` entry, or a zero `poll-frequency`.
    pub fn parse(text: &str) -> Result<Self> {
        let entries: Vec<TargetEntry> = serde_yaml::from_str(text)?;

        let common_count = entries.iter().filter(|e| e.key == COMMON_KEY).count();
        if common_count > 1 {
            return Err(ConfigError::DuplicateCommon);
        }
        if let Some(entry) = entries.iter().find(|e| e.poll_frequency == Some(0)) {
            return Err(ConfigError::InvalidFrequency {
                key: entry.key.clone(),
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[TargetEntry] {
        &self.entries
    }

    /// Target keys in document order, excluding `common`. Duplicates
    /// in the source are kept as-is.
    pub fn keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.key != COMMON_KEY)
            .map(|e| e.key.as_str())
            .collect()
    }

    /// Zabbix low-level-discovery payload: a JSON array with one
    /// `{"{#KEY}": <key>}` object per document entry, in document
    /// order. Every entry is included, the `common` entry and any
    /// duplicates too.
    pub fn discovery_payload(&self) -> String {
        let rows: Vec<serde_json::Value> = self
            .entries
            .iter()
            .map(|e| serde_json::json!({ "{#KEY}": e.key }))
            .collect();
        serde_json::Value::Array(rows).to_string()
    }

    /// Merges the `common` entry's requests with the given target's
    /// own into one batch, in a single pass over the document.
    ///
    /// Request order follows document order of the two entries, and
    /// each entry's own request order is preserved. A missing
    /// `requests` field is an empty list, not an error. An unknown
    /// key, or `common` itself, yields a no-op batch.
    pub fn batch_for(&self, key: &str) -> AggregatedBatch {
        let mut batch = AggregatedBatch::default();
        if key == COMMON_KEY {
            return batch;
        }
        for entry in &self.entries {
            if entry.key == key {
                batch.endpoint = entry.endpoint.clone();
                batch.requests.extend(entry.requests.iter().cloned());
            } else if entry.key == COMMON_KEY {
                batch.requests.extend(entry.requests.iter().cloned());
            }
        }
        batch
    }

    /// Effective poll frequency for a target: its own value if set,
    /// else the `common` entry's, else `None` (never scheduled).
    pub fn poll_frequency(&self, key: &str) -> Option<u64> {
        self.entry(key)
            .and_then(|e| e.poll_frequency)
            .or_else(|| self.entry(COMMON_KEY).and_then(|e| e.poll_frequency))
    }

    fn entry(&self, key: &str) -> Option<&TargetEntry> {
        self.entries.iter().find(|e| e.key == key)
    }
}
