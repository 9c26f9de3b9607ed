//! gcs-backup - Checksum-driven one-way backup to an object storage bucket
//!
//! Mirrors configured home-relative paths into a GCS (or any S3-compatible)
//! bucket, uploading only the files whose CRC32C changed.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gcs_backup::commands::{self, Cli};

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
