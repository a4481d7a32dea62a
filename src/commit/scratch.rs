//! Transient prompt file read by the AI provider.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Fixed name of the prompt file inside the working directory.
pub const SCRATCH_FILE_NAME: &str = "git_diff.txt";

/// Prompt file that removes itself when dropped.
///
/// Only one may exist per working directory at a time; concurrent runs in the
/// same directory race on the name.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
    removed: bool,
}

impl ScratchFile {
    /// Write `contents` to `dir/git_diff.txt`, replacing any existing file.
    pub fn create(dir: &Path, contents: &str) -> std::io::Result<Self> {
        let path = dir.join(SCRATCH_FILE_NAME);
        fs::write(&path, contents)?;
        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(Self {
            path,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file. Errors are logged and otherwise ignored.
    pub fn remove(mut self) {
        self.remove_inner();
    }

    fn remove_inner(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        if let Err(e) = fs::remove_file(&self.path) {
            debug!("Ignoring failure to remove {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        self.remove_inner();
    }
}
