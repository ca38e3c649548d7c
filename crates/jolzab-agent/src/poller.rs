use crate::error::PollError;
use jolzab_common::metric_key::metric_key;
use jolzab_common::types::MetricSample;
use jolzab_config::BridgeConfig;
use jolzab_jolokia::{JolokiaClient, ReadRequest};
use std::sync::Arc;

/// Poll executor: one batch round trip per target per cycle, mapped
/// back to flat metric samples.
pub struct Poller {
    config: Arc<BridgeConfig>,
    client: Arc<dyn JolokiaClient>,
}

impl Poller {
    pub fn new(config: Arc<BridgeConfig>, client: Arc<dyn JolokiaClient>) -> Self {
        Self { config, client }
    }

    /// Polls one target and returns its samples in response order.
    ///
    /// Each per-attribute result maps positionally to the request that
    /// produced it: status 200 yields the raw value, anything else the
    /// failure sentinel. A failed attribute never aborts the batch. A
    /// target with no endpoint or no requests yields an empty list
    /// without a network call.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::Transport`] when the batch round trip
    /// itself fails; the cycle then produces no samples at all.
    pub async fn poll(&self, key: &str) -> Result<Vec<MetricSample>, PollError> {
        let batch = self.config.batch_for(key);
        let Some(endpoint) = batch.endpoint else {
            tracing::debug!(key, "Target has no endpoint, nothing to poll");
            return Ok(Vec::new());
        };
        if batch.requests.is_empty() {
            tracing::debug!(key, "Target has no requests, nothing to poll");
            return Ok(Vec::new());
        }

        let reads: Vec<ReadRequest> = batch.requests.iter().map(ReadRequest::from).collect();
        let responses = self.client.execute(&endpoint, &reads).await?;
        if responses.len() != batch.requests.len() {
            tracing::warn!(
                key,
                requested = batch.requests.len(),
                received = responses.len(),
                "Response count does not match request count"
            );
        }

        let mut samples = Vec::with_capacity(responses.len());
        for (spec, result) in batch.requests.iter().zip(responses.iter()) {
            let sample_key = metric_key(key, &spec.mbean, &spec.attribute, &spec.path);
            let sample = if result.is_success() {
                match &result.value {
                    Some(value) => MetricSample::new(sample_key, value.clone()),
                    None => MetricSample::error(sample_key),
                }
            } else {
                tracing::debug!(
                    key,
                    metric = %sample_key,
                    status = result.status,
                    error = result.error.as_deref().unwrap_or(""),
                    "Attribute read failed"
                );
                MetricSample::error(sample_key)
            };
            samples.push(sample);
        }
        Ok(samples)
    }
}
