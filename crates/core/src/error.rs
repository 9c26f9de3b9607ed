//! Error types for gcsb-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.
//!
//! Two aggregation policies coexist: path expansion and fingerprinting collect
//! every per-entry failure before reporting ([`Error::PathResolution`],
//! [`Error::Fingerprint`]), while planning and uploading abort on the first
//! remote failure ([`Error::Plan`], [`Error::Upload`]).

use thiserror::Error;

/// Result type alias for gcsb-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for gcsb-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bucket confirmed unreachable or inaccessible
    #[error("{0}")]
    Bucket(String),

    /// Bucket accessibility could not be determined
    #[error("unable to determine if bucket [gs://{bucket}] is accessible: {source}")]
    BucketCheck {
        bucket: String,
        source: Box<Error>,
    },

    /// One or more configured path specs could not be resolved
    #[error("{}", .0.join("\n"))]
    PathResolution(Vec<String>),

    /// One or more files could not be read during checksum computation
    #[error("{}", .0.join("\n"))]
    Fingerprint(Vec<String>),

    /// Remote lookup failed while planning a specific file
    #[error("unable to determine if backup is required for file [{file}]: {source}")]
    Plan {
        file: String,
        source: Box<Error>,
    },

    /// Upload of a specific file failed
    #[error("unable to upload file [{file}] to bucket [{target}]: {source}")]
    Upload {
        file: String,
        target: String,
        source: Box<Error>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network error (retryable)
    #[error("Network error: {0}")]
    Network(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    ///
    /// Wrapping variants delegate to the classification of their source.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 2,           // UsageError
            Error::TomlParse(_) => 2,        // UsageError
            Error::Bucket(_) => 3,           // NetworkError
            Error::Network(_) => 3,          // NetworkError
            Error::Auth(_) => 4,             // AuthError
            Error::PathResolution(_) => 5,   // NotFound
            Error::BucketCheck { source, .. }
            | Error::Plan { source, .. }
            | Error::Upload { source, .. } => source.exit_code(),
            _ => 1,                          // GeneralError
        }
    }
}
