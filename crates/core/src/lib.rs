//! gcsb-core: Core library for the gcs-backup CLI
//!
//! This crate provides the core functionality for the backup tool, including:
//! - Configuration management
//! - Local path expansion and CRC32C fingerprinting
//! - Backup planning against the store's recorded checksums
//! - ObjectStore trait for the storage operations the backup needs
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing for easy testing and potential future support for other backends.

pub mod checksum;
pub mod config;
pub mod error;
pub mod path;
pub mod plan;
pub mod scan;
pub mod traits;

pub use checksum::{checksum_file, fingerprint, Checksum};
pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use path::LocalFile;
pub use plan::{build_plan, BackupPlan};
pub use scan::expand_paths;
pub use traits::ObjectStore;
