use thiserror::Error;

/// Errors raised while configuring or resolving slugs.
#[derive(Error, Debug)]
pub enum SlugError {
    /// Missing or invalid slug configuration. Raised at registration time.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed transform options (character maps, removal pattern, replacement).
    #[error("Transform error: {0}")]
    Transform(String),

    /// The storage backend failed to answer a uniqueness probe.
    #[error("Uniqueness probe failed: {0}")]
    OracleUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Numeric escalation ran out of attempts without finding a free value.
    #[error("No unique value for column '{column}' derived from '{base}' after {attempts} attempts")]
    Unresolvable {
        column: String,
        base: String,
        attempts: u32,
    },
}

impl SlugError {
    /// Wraps a storage error raised by a uniqueness probe.
    #[must_use]
    pub fn oracle<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::OracleUnavailable(Box::new(err))
    }
}

pub type SlugResult<T> = std::result::Result<T, SlugError>;
