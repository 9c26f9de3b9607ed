//! Local file paths and remote object keys
//!
//! A [`LocalFile`] pairs the absolute path of a discovered file with its
//! path relative to the backup root. The relative path is computed once at
//! discovery time and never recomputed mid-run; it always uses forward-slash
//! separators because it doubles as the object key suffix in the remote
//! store. File names that are not valid UTF-8 are rejected at discovery
//! time. The persisted key layout is `{machine_alias}/{relative_path}` and
//! must not change: prior backups are addressed under exactly this scheme.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A local file selected for backup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalFile {
    /// Absolute path on the local filesystem
    pub absolute: PathBuf,
    /// Path relative to the backup root, forward-slash separated
    pub relative: String,
}

impl LocalFile {
    /// Create a LocalFile for `absolute`, deriving its relative path from `root`
    ///
    /// Object keys are UTF-8; a name that cannot be represented is rejected
    /// rather than mapped lossily.
    pub fn new(root: &Path, absolute: PathBuf) -> Result<Self> {
        let relative = absolute.strip_prefix(root).map_err(|_| {
            Error::Config(format!(
                "unable to determine relative path of local file [{}]",
                absolute.display()
            ))
        })?;
        let relative = relative.to_str().ok_or_else(|| {
            Error::Config(format!("path [{}] is not valid UTF-8", absolute.display()))
        })?;
        let relative = relative.replace('\\', "/");
        Ok(Self { absolute, relative })
    }

    /// Remote object key for this file: `{machine_alias}/{relative}`
    pub fn object_key(&self, machine_alias: &str) -> String {
        format!("{machine_alias}/{}", self.relative)
    }
}

impl std::fmt::Display for LocalFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.absolute.display())
    }
}
