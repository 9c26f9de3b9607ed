//! gcsb-s3: S3 SDK adapter for the gcs-backup CLI
//!
//! This crate provides the implementation of the ObjectStore trait
//! using the aws-sdk-s3 crate. It is the only crate that directly
//! depends on the AWS SDK.

pub mod client;
pub mod credentials;

pub use client::StoreClient;
pub use credentials::HmacCredentials;
