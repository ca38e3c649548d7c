//! Bridge agent: polls configured Jolokia endpoints on their own
//! schedules and forwards the readings to a Zabbix server.
//!
//! The pieces compose left to right: [`config`] holds agent-level
//! settings, [`poller`] turns one target's aggregated request batch
//! into metric samples, [`forwarder`] packages a cycle's samples (plus
//! the discovery metric) into one sink call, and [`scheduler`] decides
//! when each target's cycle runs.

pub mod config;
pub mod error;
pub mod forwarder;
pub mod poller;
pub mod scheduler;

#[cfg(test)]
mod tests;
