use jolzab_jolokia::JolokiaError;
use jolzab_zabbix::ZabbixError;

/// A poll cycle for one target failed before any sample could be
/// produced. Recovered locally by the scheduler: the target yields no
/// metrics this cycle and is retried on its next due tick.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// The batch round trip to the endpoint failed as a whole.
    #[error("endpoint transport failure: {0}")]
    Transport(#[from] JolokiaError),
}

/// A poll-and-send cycle for one target failed. The cycle's metrics
/// are dropped; there is no retry, backoff or spooling.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error(transparent)]
    Poll(#[from] PollError),

    /// The sink call failed after a successful poll.
    #[error("batch delivery failed: {0}")]
    Sink(#[from] ZabbixError),
}
