//! run command - Perform a backup pass
//!
//! Expands the configured paths from the home directory, fingerprints every
//! file with CRC32C, compares against the bucket's stored checksums, and
//! uploads the files that changed. With --dry-run the pass reports what it
//! would do without touching the store.

use std::path::{Path, PathBuf};

use clap::Args;
use gcsb_core::{
    build_plan, expand_paths, fingerprint, BackupPlan, Config, ConfigManager, Error, LocalFile,
    ObjectStore,
};
use gcsb_s3::StoreClient;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Run a backup pass
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Report what would be uploaded without uploading anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the run command
pub async fn execute(
    args: RunArgs,
    config_path: Option<PathBuf>,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let manager = match config_path {
        Some(path) => ConfigManager::with_path(path),
        None => match ConfigManager::new() {
            Ok(m) => m,
            Err(e) => {
                formatter.error(&e.to_string());
                return ExitCode::from_error(&e);
            }
        },
    };

    let config = match manager.load() {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    let home = match dirs::home_dir() {
        Some(h) => h,
        None => {
            formatter.error("Could not determine home directory");
            return ExitCode::GeneralError;
        }
    };

    let store = match StoreClient::connect(&config).await {
        Ok(s) => s,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    match run_backup(&store, &config, &home, args.dry_run, &formatter, &output_config).await {
        Ok(plan) => {
            tracing::debug!(
                required = plan.required.len(),
                ignored = plan.ignored.len(),
                dry_run = args.dry_run,
                "backup pass finished"
            );
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}

/// Perform one backup pass against the store
///
/// Separated from argument and configuration handling so tests can drive it
/// with a fake store and a fake home directory. Returns the plan that was
/// acted on.
pub async fn run_backup(
    store: &dyn ObjectStore,
    config: &Config,
    home: &Path,
    dry_run: bool,
    formatter: &Formatter,
    output: &OutputConfig,
) -> gcsb_core::Result<BackupPlan> {
    let accessible = store
        .bucket_exists(&config.bucket)
        .await
        .map_err(|e| Error::BucketCheck {
            bucket: config.bucket.clone(),
            source: Box::new(e),
        })?;
    if !accessible {
        return Err(Error::Bucket(format!(
            "bucket [gs://{}] is not accessible; check that the bucket exists and the account has access to it",
            config.bucket
        )));
    }

    let spinner = ProgressBar::spinner(output.clone(), "Scanning local paths...");
    let planned = async {
        let files = expand_paths(home, &config.paths)?;
        spinner.set_message("Fingerprinting local files...");
        let checksums = fingerprint(files)?;
        spinner.set_message("Comparing against stored checksums...");
        build_plan(store, &config.bucket, &config.machine_alias, &checksums).await
    }
    .await;
    spinner.finish_and_clear();
    let plan = planned?;

    if dry_run {
        for file in &plan.ignored {
            formatter.println(&ignored_line(file));
        }
    }

    for file in &plan.required {
        let key = file.object_key(&config.machine_alias);
        if dry_run {
            formatter.println(&would_copy_line(file, &config.bucket, &key));
        } else {
            upload_file(store, config, file, &key).await?;
            formatter.println(&copied_line(file, &config.bucket, &key));
        }
    }

    Ok(plan)
}

/// Upload a single file, wrapping any failure with file and target context
async fn upload_file(
    store: &dyn ObjectStore,
    config: &Config,
    file: &LocalFile,
    key: &str,
) -> gcsb_core::Result<()> {
    let upload = async {
        let data = std::fs::read(&file.absolute).map_err(Error::from)?;
        let content_type = mime_guess::from_path(&file.absolute)
            .first()
            .map(|m| m.essence_str().to_string());
        store
            .put_object(&config.bucket, key, data, content_type)
            .await
    }
    .await;

    upload.map_err(|e| Error::Upload {
        file: file.to_string(),
        target: format!("gs://{}/{}", config.bucket, key),
        source: Box::new(e),
    })
}

fn copied_line(file: &LocalFile, bucket: &str, key: &str) -> String {
    format!("Copied file [{file}] to bucket [gs://{bucket}/{key}]")
}

fn would_copy_line(file: &LocalFile, bucket: &str, key: &str) -> String {
    format!("File [{file}] would be copied to bucket [gs://{bucket}/{key}]")
}

fn ignored_line(file: &LocalFile) -> String {
    format!("Ignored path [{file}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(relative: &str) -> LocalFile {
        LocalFile {
            absolute: PathBuf::from("/home/me").join(relative),
            relative: relative.to_string(),
        }
    }

    #[test]
    fn test_copied_line() {
        let line = copied_line(&local("docs/notes.txt"), "my-backups", "workbench/docs/notes.txt");
        insta::assert_snapshot!(
            line,
            @"Copied file [/home/me/docs/notes.txt] to bucket [gs://my-backups/workbench/docs/notes.txt]"
        );
    }

    #[test]
    fn test_would_copy_line() {
        let line =
            would_copy_line(&local("docs/notes.txt"), "my-backups", "workbench/docs/notes.txt");
        insta::assert_snapshot!(
            line,
            @"File [/home/me/docs/notes.txt] would be copied to bucket [gs://my-backups/workbench/docs/notes.txt]"
        );
    }

    #[test]
    fn test_ignored_line() {
        insta::assert_snapshot!(
            ignored_line(&local("docs/notes.txt")),
            @"Ignored path [/home/me/docs/notes.txt]"
        );
    }
}
