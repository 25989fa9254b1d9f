//! Error types for seo-lint-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// A threshold value is out of range or inconsistent with another one.
    #[error("invalid threshold `{field}`: {reason}")]
    InvalidThreshold {
        /// The offending threshold field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur at the edges of content analysis.
///
/// The analysis passes themselves never fail; these cover input handed
/// to them by hosts.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// An unknown density profile name was provided.
    #[error("unknown density profile: {name}. Use: {available}")]
    UnknownProfile {
        /// The profile name that was requested.
        name: String,
        /// Comma-separated list of available profile names.
        available: String,
    },

    /// The input exceeds the configured size limit.
    #[error("input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// Size of the rejected input in bytes.
        size: usize,
        /// The configured limit in bytes.
        limit: usize,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;
