use thiserror::Error;

/// Error type for generator configuration and emission
///
/// Configuration errors are fatal and abort the run before any DDL is
/// considered safe to emit. Missing-but-optional model data (absent schema,
/// description, vendor parameters) never errors; the matching DDL fragment is
/// simply omitted.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Dialect identifier did not resolve to a registered platform
    #[error("unknown platform identifier: {0}")]
    UnknownPlatform(String),

    /// Behavior name did not resolve to a known behavior
    #[error("unknown behavior: {0}")]
    UnknownBehavior(String),

    /// A behavior parameter failed validation at attach time
    #[error("invalid parameter '{parameter}' for behavior '{behavior}': {message}")]
    BehaviorParameter {
        behavior: String,
        parameter: String,
        message: String,
    },

    /// A primary-key fetch strategy needs a sequence name and none exists
    #[error("table '{table}' needs a sequence name to fetch primary keys")]
    MissingSequenceName { table: String },

    /// Two tables with the same name were added to one database
    #[error("duplicate table '{table}' in database '{database}'")]
    DuplicateTable { database: String, table: String },

    /// IO error (snapshot file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
