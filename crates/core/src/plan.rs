//! Backup planning
//!
//! Compares local fingerprints against the store's recorded checksums and
//! partitions the files into those requiring upload and those already
//! current. The store is the only durable record of the last backed-up
//! state; no local cache is consulted.

use std::collections::HashMap;

use crate::checksum::Checksum;
use crate::error::{Error, Result};
use crate::path::LocalFile;
use crate::traits::ObjectStore;

/// Partition of fingerprinted files by whether upload is required
///
/// `required` and `ignored` are disjoint and together cover the planner's
/// input set. Order within each list is unspecified.
#[derive(Debug, Default)]
pub struct BackupPlan {
    /// Files absent from the store or stored with a different checksum
    pub required: Vec<LocalFile>,

    /// Files whose stored checksum matches the local one
    pub ignored: Vec<LocalFile>,
}

/// Build the upload plan for a set of fingerprinted files
///
/// The first store failure aborts the whole pass with an error citing the
/// file being examined.
pub async fn build_plan(
    store: &dyn ObjectStore,
    bucket: &str,
    machine_alias: &str,
    checksums: &HashMap<LocalFile, Checksum>,
) -> Result<BackupPlan> {
    let mut plan = BackupPlan::default();

    for (file, checksum) in checksums {
        let key = file.object_key(machine_alias);
        let required = backup_required(store, bucket, &key, *checksum)
            .await
            .map_err(|e| Error::Plan {
                file: file.to_string(),
                source: Box::new(e),
            })?;

        if required {
            plan.required.push(file.clone());
        } else {
            plan.ignored.push(file.clone());
        }
    }

    tracing::debug!(
        required = plan.required.len(),
        ignored = plan.ignored.len(),
        "compared local files against stored checksums"
    );
    Ok(plan)
}

/// Decide whether a single file must be uploaded
///
/// An absent object is required. A present object without a comparable
/// CRC32C is treated as changed; the stored checksum is only fetched once
/// existence is confirmed.
async fn backup_required(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    local: Checksum,
) -> Result<bool> {
    if !store.object_exists(bucket, key).await? {
        return Ok(true);
    }
    match store.object_crc32c(bucket, key).await? {
        Some(remote) => Ok(remote != local),
        None => Ok(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockObjectStore;
    use std::path::PathBuf;

    fn local(relative: &str) -> LocalFile {
        LocalFile {
            absolute: PathBuf::from("/home/me").join(relative),
            relative: relative.to_string(),
        }
    }

    fn single(file: LocalFile, checksum: u32) -> HashMap<LocalFile, Checksum> {
        HashMap::from([(file, Checksum(checksum))])
    }

    #[tokio::test]
    async fn test_absent_object_is_required() {
        let mut store = MockObjectStore::new();
        store.expect_object_exists().returning(|_, _| Ok(false));
        // No object_crc32c expectation: the checksum must not be fetched
        // for an absent object.

        let checksums = single(local("notes.txt"), 0xdeadbeef);
        let plan = build_plan(&store, "my-backups", "workbench", &checksums)
            .await
            .unwrap();

        assert_eq!(plan.required, vec![local("notes.txt")]);
        assert!(plan.ignored.is_empty());
    }

    #[tokio::test]
    async fn test_matching_checksum_is_ignored() {
        let mut store = MockObjectStore::new();
        store.expect_object_exists().returning(|_, _| Ok(true));
        store
            .expect_object_crc32c()
            .returning(|_, _| Ok(Some(Checksum(0xdeadbeef))));

        let checksums = single(local("notes.txt"), 0xdeadbeef);
        let plan = build_plan(&store, "my-backups", "workbench", &checksums)
            .await
            .unwrap();

        assert!(plan.required.is_empty());
        assert_eq!(plan.ignored, vec![local("notes.txt")]);
    }

    #[tokio::test]
    async fn test_differing_checksum_is_required() {
        let mut store = MockObjectStore::new();
        store.expect_object_exists().returning(|_, _| Ok(true));
        store
            .expect_object_crc32c()
            .returning(|_, _| Ok(Some(Checksum(0x11111111))));

        let checksums = single(local("notes.txt"), 0x22222222);
        let plan = build_plan(&store, "my-backups", "workbench", &checksums)
            .await
            .unwrap();

        assert_eq!(plan.required, vec![local("notes.txt")]);
    }

    #[tokio::test]
    async fn test_missing_stored_checksum_is_required() {
        let mut store = MockObjectStore::new();
        store.expect_object_exists().returning(|_, _| Ok(true));
        store.expect_object_crc32c().returning(|_, _| Ok(None));

        let checksums = single(local("notes.txt"), 0xdeadbeef);
        let plan = build_plan(&store, "my-backups", "workbench", &checksums)
            .await
            .unwrap();

        assert_eq!(plan.required, vec![local("notes.txt")]);
    }

    #[tokio::test]
    async fn test_partition_covers_input_set() {
        let mut store = MockObjectStore::new();
        store
            .expect_object_exists()
            .withf(|_, key| key == "workbench/absent.txt")
            .returning(|_, _| Ok(false));
        store
            .expect_object_exists()
            .withf(|_, key| key != "workbench/absent.txt")
            .returning(|_, _| Ok(true));
        store
            .expect_object_crc32c()
            .withf(|_, key| key == "workbench/same.txt")
            .returning(|_, _| Ok(Some(Checksum(1))));
        store
            .expect_object_crc32c()
            .withf(|_, key| key == "workbench/changed.txt")
            .returning(|_, _| Ok(Some(Checksum(99))));

        let checksums = HashMap::from([
            (local("absent.txt"), Checksum(1)),
            (local("same.txt"), Checksum(1)),
            (local("changed.txt"), Checksum(1)),
        ]);
        let plan = build_plan(&store, "my-backups", "workbench", &checksums)
            .await
            .unwrap();

        assert_eq!(plan.required.len() + plan.ignored.len(), 3);
        assert!(plan.required.contains(&local("absent.txt")));
        assert!(plan.required.contains(&local("changed.txt")));
        assert_eq!(plan.ignored, vec![local("same.txt")]);
    }

    #[tokio::test]
    async fn test_store_failure_aborts_with_file_context() {
        let mut store = MockObjectStore::new();
        store
            .expect_object_exists()
            .returning(|_, _| Err(Error::Network("connection reset".into())));

        let checksums = single(local("notes.txt"), 0xdeadbeef);
        let err = build_plan(&store, "my-backups", "workbench", &checksums)
            .await
            .unwrap_err();

        let text = err.to_string();
        assert!(
            text.contains("unable to determine if backup is required for file [/home/me/notes.txt]"),
            "unexpected message: {text}"
        );
        assert!(text.contains("connection reset"), "source lost: {text}");
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn test_store_queried_with_alias_prefixed_key() {
        let mut store = MockObjectStore::new();
        store
            .expect_object_exists()
            .withf(|bucket, key| bucket == "my-backups" && key == "workbench/docs/a.txt")
            .returning(|_, _| Ok(false));

        let checksums = single(local("docs/a.txt"), 7);
        build_plan(&store, "my-backups", "workbench", &checksums)
            .await
            .unwrap();
    }
}
