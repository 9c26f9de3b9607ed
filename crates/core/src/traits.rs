//! ObjectStore trait definition
//!
//! This trait defines the interface for the storage operations the backup
//! needs. It decouples planning and orchestration from the specific S3 SDK
//! implementation.

use async_trait::async_trait;

use crate::checksum::Checksum;
use crate::error::Result;

/// Trait for S3-compatible storage operations
///
/// Implemented by the S3 adapter; mocked in planner and orchestrator tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check if a bucket exists and is accessible
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Check if an object exists
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool>;

    /// Fetch the stored CRC32C of an object
    ///
    /// Returns `None` when the store has no single-shot CRC32C for the
    /// object (no checksum recorded, or a composite multipart value).
    async fn object_crc32c(&self, bucket: &str, key: &str) -> Result<Option<Checksum>>;

    /// Upload an object in one request
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_object_store_through_dyn() {
        let mut mock = MockObjectStore::new();
        mock.expect_bucket_exists()
            .withf(|bucket| bucket == "my-backups")
            .returning(|_| Ok(true));
        mock.expect_object_crc32c()
            .returning(|_, _| Ok(Some(Checksum(0xe3069283))));

        let store: &dyn ObjectStore = &mock;
        assert!(store.bucket_exists("my-backups").await.unwrap());
        assert_eq!(
            store.object_crc32c("my-backups", "alias/a.txt").await.unwrap(),
            Some(Checksum(0xe3069283))
        );
    }
}
