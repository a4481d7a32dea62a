//! Process spawning behind a mockable trait.

use std::env;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::error::CommandError;

use super::invocation::Invocation;

/// Trait for executing external commands.
///
/// This abstraction allows replacing `git` and the AI provider with fakes in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion and return its captured stdout.
    async fn run(&self, invocation: &Invocation) -> Result<String, CommandError>;
}

/// Runner that spawns real processes in a fixed working directory.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    workdir: PathBuf,
}

impl SystemRunner {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<String, CommandError> {
        let program = &invocation.program;

        // Resolve against PATH the same way the shell would, relative to workdir
        let resolved = which::which_in(program, env::var_os("PATH"), &self.workdir)
            .map_err(|_| CommandError::NotInstalled(program.clone()))?;

        debug!("Running `{}` in {}", invocation, self.workdir.display());

        let mut command = Command::new(&resolved);
        command
            .args(&invocation.args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let spawn_failed = |source| CommandError::SpawnFailed {
            program: program.clone(),
            source,
        };

        let output = match invocation.timeout {
            Some(limit) => timeout(limit, command.output())
                .await
                .map_err(|_| CommandError::Timeout {
                    program: program.clone(),
                    limit,
                })?
                .map_err(spawn_failed)?,
            None => command.output().await.map_err(spawn_failed)?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            return Err(CommandError::NonZeroExit {
                program: program.clone(),
                code,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
