/// Errors that can occur while talking to a Jolokia endpoint.
///
/// These are transport-level failures: the whole batch produced no
/// usable response. A per-attribute failure inside an otherwise valid
/// response is not an error here; it surfaces as a non-200 status on
/// the matching [`crate::ReadResponse`].
#[derive(Debug, thiserror::Error)]
pub enum JolokiaError {
    /// Connection, timeout or response-decoding failure from `reqwest`.
    #[error("Jolokia request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("Jolokia endpoint returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

/// Convenience `Result` alias for Jolokia calls.
pub type Result<T> = std::result::Result<T, JolokiaError>;
