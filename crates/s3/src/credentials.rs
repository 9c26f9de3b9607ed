//! HMAC interoperability credentials
//!
//! Loads the store's HMAC key pair from the JSON file named in the
//! configuration. The file holds the interoperability key issued for a
//! service account, not an OAuth credential.

use std::path::Path;

use serde::Deserialize;

use gcsb_core::{Error, Result};

/// HMAC key pair for the store's S3-compatible API
#[derive(Debug, Clone, Deserialize)]
pub struct HmacCredentials {
    /// Access key id ("GOOG1E..." for GCS interoperability keys)
    pub access_key_id: String,

    /// Secret half of the key pair
    pub secret_access_key: String,
}

impl HmacCredentials {
    /// Load credentials from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Auth(format!(
                "unable to read credentials file [{}]: {e}",
                path.display()
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::Auth(format!(
                "unable to parse credentials file [{}]: {e}",
                path.display()
            ))
        })
    }

    /// Convert into a static SDK credentials provider
    pub fn into_provider(self) -> aws_credential_types::Credentials {
        aws_credential_types::Credentials::new(
            self.access_key_id,
            self.secret_access_key,
            None, // session token
            None, // expiry
            "gcsb-static-credentials",
        )
    }
}
