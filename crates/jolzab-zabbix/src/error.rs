/// Errors that can occur while delivering a batch to the Zabbix
/// server.
#[derive(Debug, thiserror::Error)]
pub enum ZabbixError {
    /// TCP connect, write or read failure.
    #[error("Zabbix server I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server did not answer within the configured timeout.
    #[error("Zabbix server timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The response frame does not follow the sender protocol.
    #[error("Zabbix protocol violation: {0}")]
    Protocol(String),

    /// Payload serialization or response parsing failed.
    #[error("Zabbix JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered, but not with `"response": "success"`.
    #[error("Zabbix server rejected batch: {info}")]
    Rejected { info: String },
}

/// Convenience `Result` alias for sender operations.
pub type Result<T> = std::result::Result<T, ZabbixError>;
