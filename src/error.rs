//! Error types for git-commit-m modules using thiserror.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors from running an external command.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("'{0}' not found. Make sure it is installed and on your PATH")]
    NotInstalled(String),

    #[error("Failed to spawn {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with code {code}: {stderr}")]
    NonZeroExit {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("{program} timed out after {limit:?}")]
    Timeout { program: String, limit: Duration },
}

/// Fatal errors from the commit pipeline.
///
/// Failures the pipeline recovers from (diff retrieval, message generation,
/// scratch file cleanup) never appear here.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Failed to stage changes: {0}")]
    StagingFailed(#[source] CommandError),

    #[error("Failed to read diff file {}: {source}", path.display())]
    DiffReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write prompt file {}: {source}", path.display())]
    ScratchWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] CommandError),
}
