//! Jolokia batch-read client.
//!
//! Jolokia exposes JMX over HTTP: a POST of a JSON array of read
//! requests returns a JSON array of results, matched positionally.
//! One round trip carries a whole target's request batch, which is the
//! entire point of aggregating requests instead of issuing them one by
//! one.

pub mod client;
pub mod error;

pub use client::HttpJolokiaClient;
pub use error::{JolokiaError, Result};

use async_trait::async_trait;
use jolzab_common::types::RequestSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a Jolokia batch read request.
#[derive(Debug, Clone, Serialize)]
pub struct ReadRequest {
    #[serde(rename = "type")]
    pub op: String,
    pub mbean: String,
    pub attribute: String,
    pub path: String,
}

impl From<&RequestSpec> for ReadRequest {
    fn from(spec: &RequestSpec) -> Self {
        Self {
            op: "read".to_string(),
            mbean: spec.mbean.clone(),
            attribute: spec.attribute.clone(),
            path: spec.path.clone(),
        }
    }
}

/// One entry of a Jolokia batch response, positionally matched to its
/// request. Status 200 carries a value; anything else carries an
/// error description.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadResponse {
    pub status: u16,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ReadResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Batch attribute-read access to one management endpoint.
///
/// The poll executor depends on this trait rather than on a concrete
/// HTTP client so cycles can be unit-tested against scripted
/// responses.
#[async_trait]
pub trait JolokiaClient: Send + Sync {
    /// Executes one batch of read requests against `endpoint` in a
    /// single round trip and returns the per-request results in
    /// request order.
    ///
    /// # Errors
    ///
    /// Returns [`JolokiaError`] if the transport call itself fails;
    /// individual failed reads are data, not errors.
    async fn execute(&self, endpoint: &str, requests: &[ReadRequest]) -> Result<Vec<ReadResponse>>;
}
