/// Errors raised while loading or validating the target list.
///
/// Any of these is fatal at startup: the bridge never runs with a
/// partially loaded target list.
///
/// # Examples
///
/// ```rust
/// use jolzab_config::error::ConfigError;
///
/// let err = ConfigError::InvalidFrequency { key: "db".to_string() };
/// assert!(err.to_string().contains("db"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The target-list file could not be opened or read.
    #[error("cannot read target list {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a YAML sequence of target entries, or a
    /// field has the wrong type.
    #[error("malformed target list: {0}")]
    Malformed(#[from] serde_yaml::Error),

    /// More than one entry uses the reserved key `common`.
    #[error("more than one 'common' entry in target list")]
    DuplicateCommon,

    /// `poll-frequency` must be a positive number of seconds.
    #[error("target '{key}': poll-frequency must be a positive number of seconds")]
    InvalidFrequency { key: String },
}

/// Convenience `Result` alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
