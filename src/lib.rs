//! git-commit-m - Stage changes, let an AI CLI summarize the diff, and commit.
//!
//! # Overview
//!
//! git-commit-m runs `git add .`, writes the staged diff together with a short
//! instruction to `git_diff.txt`, hands that file to an external AI tool
//! (`gemini -p @git_diff.txt` by default), and commits with whatever the tool
//! prints. Every external command goes through [`runner::CommandRunner`] so the
//! whole flow can be driven by fakes in tests.

pub mod commit;
pub mod error;
pub mod git;
pub mod runner;

// Re-export commonly used types
pub use commit::{CommitPipeline, Options, Outcome};
pub use error::{CommandError, CommitError};
pub use runner::{CommandRunner, Invocation, SystemRunner};
