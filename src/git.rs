//! Git operations used by the commit pipeline.
//!
//! All operations shell out to the system `git` binary through a
//! [`CommandRunner`], inheriting the user's existing git config and hooks.

use crate::error::CommandError;
use crate::runner::{CommandRunner, Invocation};

/// Default version-control executable.
pub const DEFAULT_VCS: &str = "git";

/// Thin wrapper around the VCS command line.
pub struct Vcs<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    program: String,
}

impl<'a, R: CommandRunner + ?Sized> Vcs<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self::with_program(runner, DEFAULT_VCS)
    }

    pub fn with_program(runner: &'a R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// `git add .` - stage every working-tree change.
    pub async fn stage_all(&self) -> Result<(), CommandError> {
        self.git(["add", "."]).await.map(|_| ())
    }

    /// `git diff --cached` - diff of staged content.
    pub async fn staged_diff(&self) -> Result<String, CommandError> {
        self.git(["diff", "--cached"]).await
    }

    /// `git commit -m <message>`.
    pub async fn commit(&self, message: &str) -> Result<(), CommandError> {
        self.git(["commit", "-m", message]).await.map(|_| ())
    }

    async fn git<const N: usize>(&self, args: [&str; N]) -> Result<String, CommandError> {
        let invocation = Invocation::new(&self.program).args(args);
        self.runner.run(&invocation).await
    }
}
