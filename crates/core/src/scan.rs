//! Local path expansion
//!
//! Expands configured path specs (file or directory paths relative to the
//! backup root) into the flat list of regular files they cover. Directories
//! are walked recursively; symbolic links and sockets are skipped silently,
//! as is any other non-regular entry. A spec that matches neither a file nor
//! a directory is an error, as is a file whose name is not valid UTF-8, but
//! expansion keeps going: failures are collected across all specs and
//! reported as one aggregate error so a single pass surfaces every bad
//! entry.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::LocalFile;

/// Expand path specs into the regular files they cover
pub fn expand_paths(root: &Path, specs: &[String]) -> Result<Vec<LocalFile>> {
    let mut files = Vec::new();
    let mut failures = Vec::new();

    for spec in specs {
        match expand_spec(root, spec) {
            Ok(mut found) => files.append(&mut found),
            Err(e) => failures.push(format!("unable to extract file paths from [{spec}]: {e}")),
        }
    }

    if !failures.is_empty() {
        return Err(Error::PathResolution(failures));
    }

    tracing::debug!(files = files.len(), specs = specs.len(), "expanded local paths");
    Ok(files)
}

fn expand_spec(root: &Path, spec: &str) -> Result<Vec<LocalFile>> {
    let candidate = root.join(spec);

    if candidate.is_dir() {
        let mut paths = Vec::new();
        collect_dir(&candidate, &mut paths)?;
        paths
            .into_iter()
            .map(|p| LocalFile::new(root, p))
            .collect()
    } else if candidate.is_file() {
        Ok(vec![LocalFile::new(root, candidate)?])
    } else {
        Err(Error::Config(format!(
            "path [{}] does not exist",
            candidate.display()
        )))
    }
}

/// Recursively collect regular files under `dir`
///
/// Entry types are inspected without following links: a symlink to a
/// directory is skipped, not traversed.
fn collect_dir(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;

        if file_type.is_symlink() {
            continue;
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if file_type.is_socket() {
                continue;
            }
        }
        if file_type.is_dir() {
            collect_dir(&entry.path(), out)?;
            continue;
        }
        if file_type.is_file() {
            out.push(entry.path());
        }
        // Remaining special types (fifos, devices) are skipped without error.
    }
    Ok(())
}
