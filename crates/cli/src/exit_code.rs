//! Exit code definitions for the gcs-backup CLI
//!
//! Exit codes are part of the scripting interface: cron wrappers and
//! monitoring hooks dispatch on them. Changing a value is a breaking change.

/// Exit codes for the gcs-backup CLI application.
///
/// These codes follow a consistent convention to allow scripts and automation
/// to handle different error scenarios appropriately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Backup pass completed successfully
    Success = 0,

    /// General/unspecified error (includes fingerprint read failures)
    GeneralError = 1,

    /// Configuration error: missing or invalid configuration file
    UsageError = 2,

    /// Retryable network or bucket access error
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,

    /// A configured path does not exist locally
    NotFound = 5,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::AuthError),
            5 => Some(Self::NotFound),
            _ => None,
        }
    }

    /// Map a core error onto its exit code
    pub fn from_error(error: &gcsb_core::Error) -> Self {
        Self::from_i32(error.exit_code()).unwrap_or(Self::GeneralError)
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Backup completed successfully",
            Self::GeneralError => "General error",
            Self::UsageError => "Invalid or missing configuration",
            Self::NetworkError => "Network or bucket access error (retryable)",
            Self::AuthError => "Authentication or permission failure",
            Self::NotFound => "Configured path not found",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
