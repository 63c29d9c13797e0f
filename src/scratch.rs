//! Scratch directory for inline-image materialization.
//!
//! The body renderer writes attachment bytes to disk only so the
//! rewritten HTML can reference them by `file:///` path. One
//! [`ScratchDir`] exists per loaded message; replacing or closing the
//! message releases it, which unlinks every created file best-effort.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::{MsgError, Result};

/// Owned temporary directory plus the list of files written into it.
///
/// Dropping the value removes the directory tree; [`release`]
/// additionally issues one unlink per tracked file first, so every
/// file gets an explicit deletion attempt even if the recursive
/// removal later fails. Deletion failures are logged at debug level
/// and otherwise ignored.
///
/// [`release`]: Self::release
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
    files: Vec<PathBuf>,
}

impl ScratchDir {
    /// Create a fresh scratch directory under the system temp dir.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("msgshell-").tempdir()?;
        Ok(Self {
            dir,
            files: Vec::new(),
        })
    }

    /// Write `bytes` to a file named after `name` and return its path.
    ///
    /// Only the final path component of `name` is used, and an existing
    /// file with the same name gets a numeric prefix instead of being
    /// overwritten (two attachments may share a filename).
    pub fn write_file(&mut self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let safe = sanitize_name(name);
        let mut path = self.dir.path().join(&safe);
        let mut counter = 1;
        while path.exists() {
            path = self.dir.path().join(format!("{counter}_{safe}"));
            counter += 1;
        }
        fs::write(&path, bytes).map_err(|e| MsgError::io(&path, e))?;
        self.files.push(path.clone());
        Ok(path)
    }

    /// Paths of every file written so far, in creation order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The directory all files live under.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Delete the tracked files and the directory now.
    pub fn release(self) {
        let ScratchDir { dir, files } = self;
        for file in &files {
            if let Err(e) = fs::remove_file(file) {
                debug!(path = %file.display(), error = %e, "Scratch file not removed");
            }
        }
        if let Err(e) = dir.close() {
            debug!(error = %e, "Scratch directory not fully removed");
        }
    }
}

/// Reduce an attachment name to a bare file name so a crafted name
/// cannot point outside the scratch directory.
fn sanitize_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "inline.bin".to_string())
}
