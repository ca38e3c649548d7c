//! Shared types for the Jolokia-to-Zabbix bridge.
//!
//! Holds the request and sample types that flow between the
//! configuration layer, the poll executor and the forwarder, plus the
//! metric-key formatter that turns an mbean identifier into a flat,
//! delimiter-safe Zabbix item key.

pub mod metric_key;
pub mod types;
