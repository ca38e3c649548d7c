use crate::error::ForwardError;
use crate::poller::Poller;
use jolzab_config::BridgeConfig;
use jolzab_zabbix::{MetricSink, ZabbixMetric};
use std::sync::Arc;

/// Key of the synthetic discovery metric carrying the configured
/// target keys for backend low-level discovery.
pub const DISCOVERY_KEY: &str = "jolokia.keys";

/// Packages one target's poll cycle into a single sink call:
/// the cycle's samples plus exactly one discovery metric, all bound to
/// the process-wide reporting host.
pub struct Forwarder {
    config: Arc<BridgeConfig>,
    poller: Poller,
    sink: Arc<dyn MetricSink>,
    host: String,
}

impl Forwarder {
    pub fn new(
        config: Arc<BridgeConfig>,
        poller: Poller,
        sink: Arc<dyn MetricSink>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            config,
            poller,
            sink,
            host: host.into(),
        }
    }

    /// Runs one poll-and-send cycle for `key`.
    ///
    /// The discovery metric is appended even when the batch produced
    /// zero regular samples. A transport failure during the poll skips
    /// the whole cycle instead: nothing reaches the sink, the
    /// discovery metric included.
    ///
    /// # Errors
    ///
    /// Returns [`ForwardError`] when the poll or the sink call fails;
    /// the cycle's metrics are dropped either way.
    pub async fn send(&self, key: &str) -> Result<(), ForwardError> {
        let samples = self.poller.poll(key).await?;

        let mut metrics: Vec<ZabbixMetric> = samples
            .iter()
            .map(|s| ZabbixMetric::new(&self.host, &s.key, s.value_text()))
            .collect();
        metrics.push(ZabbixMetric::new(
            &self.host,
            DISCOVERY_KEY,
            self.config.discovery_payload(),
        ));

        let response = self.sink.send(&metrics).await?;
        tracing::debug!(key, count = metrics.len(), info = %response.info, "Cycle forwarded");
        Ok(())
    }
}
