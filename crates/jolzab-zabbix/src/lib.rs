//! Zabbix sender ("trapper") protocol client.
//!
//! Metrics are delivered as `(host, key, value)` triples in one framed
//! JSON payload per batch, the same wire format `zabbix_sender` uses.
//! Discovery-style metrics are ordinary triples whose value is a
//! serialized low-level-discovery list.

pub mod error;
pub mod protocol;
pub mod sender;

pub use error::{Result, ZabbixError};
pub use sender::ZabbixSender;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One `(host, key, value)` triple in the sender payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZabbixMetric {
    pub host: String,
    pub key: String,
    pub value: String,
    /// Per-item timestamp; the server assigns one at receipt when
    /// omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock: Option<i64>,
}

impl ZabbixMetric {
    pub fn new(host: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            key: key.into(),
            value: value.into(),
            clock: None,
        }
    }
}

/// Summary returned by the server for one sender batch, e.g.
/// `processed: 2; failed: 0; total: 2; seconds spent: 0.000041`.
#[derive(Debug, Clone, Deserialize)]
pub struct SenderResponse {
    pub response: String,
    #[serde(default)]
    pub info: String,
}

impl SenderResponse {
    pub fn is_success(&self) -> bool {
        self.response == "success"
    }
}

/// Delivery of metric batches to the collection backend.
///
/// The forwarder depends on this trait rather than on a concrete TCP
/// sender so cycles can be unit-tested against an in-memory sink.
#[async_trait]
pub trait MetricSink: Send + Sync {
    /// Delivers one batch of metrics in a single server round trip.
    ///
    /// # Errors
    ///
    /// Returns [`ZabbixError`] if the connection fails, times out, or
    /// the server rejects the batch. There is no retry or spooling;
    /// the caller decides what a dropped batch means.
    async fn send(&self, metrics: &[ZabbixMetric]) -> Result<SenderResponse>;
}
