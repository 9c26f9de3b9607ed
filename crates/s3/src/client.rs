//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from gcsb-core.
//! The default endpoint is the GCS interoperability API; any S3-compatible
//! store works.

use async_trait::async_trait;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::types::{ChecksumAlgorithm, ChecksumMode};
use aws_smithy_types::error::display::DisplayErrorContext;

use gcsb_core::{Checksum, Config, Error, ObjectStore, Result};

use crate::credentials::HmacCredentials;

/// S3-compatible store client
pub struct StoreClient {
    inner: aws_sdk_s3::Client,
}

impl StoreClient {
    /// Create a client from the backup configuration
    ///
    /// Credentials come from the configured HMAC key file when present,
    /// otherwise from the SDK's default provider chain (environment
    /// variables).
    pub async fn connect(config: &Config) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint);

        if let Some(path) = &config.credentials_file {
            let credentials = HmacCredentials::from_file(path)?;
            loader = loader.credentials_provider(credentials.into_provider());
        }

        let sdk_config = loader.load().await;

        // GCS interoperability mode requires path-style addressing.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        tracing::debug!(endpoint = %config.endpoint, region = %config.region, "connected store client");
        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

#[async_trait]
impl ObjectStore for StoreClient {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.inner.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => Err(classify(e)),
        }
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        match self.inner.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => Err(classify(e)),
        }
    }

    async fn object_crc32c(&self, bucket: &str, key: &str) -> Result<Option<Checksum>> {
        let response = self
            .inner
            .head_object()
            .bucket(bucket)
            .key(key)
            .checksum_mode(ChecksumMode::Enabled)
            .send()
            .await
            .map_err(classify)?;

        match response.checksum_crc32_c() {
            Some(encoded) => {
                let decoded = decode_crc32c(encoded);
                if decoded.is_none() {
                    tracing::warn!(key, value = encoded, "stored CRC32C is not a single-object value");
                }
                Ok(decoded)
            }
            None => Ok(None),
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<()> {
        let body = aws_sdk_s3::primitives::ByteStream::from(data);

        let mut request = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .checksum_algorithm(ChecksumAlgorithm::Crc32C)
            .body(body);

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request.send().await.map_err(classify)?;
        Ok(())
    }
}

/// Map an SDK failure onto the error taxonomy
///
/// Credential rejections classify as Auth; everything else as Network.
fn classify<E, R>(err: SdkError<E, R>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let text = DisplayErrorContext(&err).to_string();
    match err.code() {
        Some("AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch") => Error::Auth(text),
        _ => Error::Network(text),
    }
}

/// Decode the store's base64 big-endian CRC32C value
///
/// Composite multipart values ("<b64>-<parts>") describe no single object
/// content and decode to None.
fn decode_crc32c(encoded: &str) -> Option<Checksum> {
    if encoded.contains('-') {
        return None;
    }
    let bytes = aws_smithy_types::base64::decode(encoded).ok()?;
    let array: [u8; 4] = bytes.as_slice().try_into().ok()?;
    Some(Checksum(u32::from_be_bytes(array)))
}
