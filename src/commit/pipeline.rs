//! End-to-end commit flow: stage, diff, generate, commit.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use colored::Colorize;
use tracing::{debug, warn};

use crate::commit::generator::{DEFAULT_PROMPT_FLAG, DEFAULT_PROVIDER, Generator};
use crate::commit::message::{build_prompt, from_output, with_signature};
use crate::commit::scratch::{SCRATCH_FILE_NAME, ScratchFile};
use crate::error::{CommandError, CommitError};
use crate::git::{DEFAULT_VCS, Vcs};
use crate::runner::CommandRunner;

/// Per-invocation settings, derived from CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Skip `git add .`.
    pub skip_staging: bool,
    /// Flag passed to the provider ahead of the `@file` argument.
    pub prompt_flag: String,
    /// Provider executable name.
    pub provider: String,
    /// Read the diff from this file instead of git. Also suppresses the commit.
    pub diff_file: Option<PathBuf>,
    /// Generate and print the message but do not commit.
    pub skip_commit: bool,
    /// Leave the signature trailer off.
    pub skip_signature: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            skip_staging: false,
            prompt_flag: DEFAULT_PROMPT_FLAG.to_string(),
            provider: DEFAULT_PROVIDER.to_string(),
            diff_file: None,
            skip_commit: false,
            skip_signature: false,
        }
    }
}

/// How a pipeline run ended, short of a fatal error.
#[derive(Debug)]
pub enum Outcome {
    /// A commit was created with `message`.
    Committed { message: String },
    /// `--no-commit` was given.
    DryRun { message: String },
    /// The diff came from a file, so there was nothing to commit against.
    DiffFileProvided { message: String },
    /// The diff was empty or whitespace-only. The provider was never called.
    NothingToCommit,
    /// The provider failed or produced no text. `error` is `None` for empty output.
    GenerationFailed { error: Option<CommandError> },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Committed { .. } | Outcome::DryRun { .. } | Outcome::DiffFileProvided { .. }
        )
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }

    /// The final message, signature included, if one was generated.
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Committed { message }
            | Outcome::DryRun { message }
            | Outcome::DiffFileProvided { message } => Some(message),
            Outcome::NothingToCommit | Outcome::GenerationFailed { .. } => None,
        }
    }
}

/// Runs the commit flow against an injected [`CommandRunner`].
pub struct CommitPipeline<R: CommandRunner> {
    runner: R,
    workdir: PathBuf,
    vcs_program: String,
}

impl<R: CommandRunner> CommitPipeline<R> {
    /// Create a pipeline that keeps its prompt file in `workdir`.
    pub fn new(runner: R, workdir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            workdir: workdir.into(),
            vcs_program: DEFAULT_VCS.to_string(),
        }
    }

    /// Use a different VCS executable than `git`.
    pub fn with_vcs_program(mut self, program: impl Into<String>) -> Self {
        self.vcs_program = program.into();
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run the full flow once.
    ///
    /// Steps:
    /// 1. `git add .` unless staging is skipped or a diff file is given
    /// 2. Read the diff from the file, or `git diff --cached` (failure = empty)
    /// 3. Stop with [`Outcome::NothingToCommit`] on a blank diff
    /// 4. Write prompt + diff to `git_diff.txt`
    /// 5. Run the provider (failure = empty message)
    /// 6. Delete the prompt file
    /// 7. Stop with [`Outcome::GenerationFailed`] on an empty message
    /// 8. Append the signature
    /// 9. `git commit -m` unless a diff file or `--no-commit` was given
    ///
    /// Staging, diff-file and commit failures are returned as errors.
    pub async fn run(&self, options: &Options) -> Result<Outcome, CommitError> {
        let start = Instant::now();
        let vcs = Vcs::with_program(&self.runner, &self.vcs_program);

        if !options.skip_staging && options.diff_file.is_none() {
            println!("{}", "Adding all changes to git...".blue().bold());
            vcs.stage_all().await.map_err(CommitError::StagingFailed)?;
        }

        let diff = match &options.diff_file {
            Some(file) => {
                let path = self.workdir.join(file);
                println!(
                    "{} {}...",
                    "Reading diff from file:".blue().bold(),
                    file.display().to_string().green().bold()
                );
                // Non-UTF-8 bytes are replaced, matching the git-sourced diff
                let bytes = fs::read(&path)
                    .map_err(|source| CommitError::DiffReadFailed { path, source })?;
                String::from_utf8_lossy(&bytes).into_owned()
            }
            None => vcs.staged_diff().await.unwrap_or_else(|e| {
                warn!("Could not read staged diff: {}", e);
                String::new()
            }),
        };

        if diff.trim().is_empty() {
            println!("{}", "No changes to commit.".yellow().bold());
            return Ok(Outcome::NothingToCommit);
        }

        let scratch = ScratchFile::create(&self.workdir, &build_prompt(&diff)).map_err(
            |source| CommitError::ScratchWriteFailed {
                path: self.workdir.join(SCRATCH_FILE_NAME),
                source,
            },
        )?;

        let generator = Generator::new(&options.provider, &options.prompt_flag);
        println!(
            "{} {}...",
            "Generating commit message with".blue().bold(),
            generator.provider.green().bold()
        );
        let generated = generator.generate(&self.runner, scratch.path()).await;
        scratch.remove();

        let (message, error) = match generated {
            Ok(raw) => (from_output(&raw), None),
            Err(e) => {
                warn!("Provider {} failed: {}", generator.provider, e);
                print_provider_error(&generator, &e);
                (None, Some(e))
            }
        };

        let Some(mut message) = message else {
            print_generation_help(&generator);
            return Ok(Outcome::GenerationFailed { error });
        };

        if !options.skip_signature {
            message = with_signature(&message);
        }

        println!("{} {}", "Commit message:".green().bold(), message.green());

        let outcome = if options.diff_file.is_none() && !options.skip_commit {
            vcs.commit(&message).await.map_err(CommitError::CommitFailed)?;
            println!("{}", "Changes committed successfully.".blue().bold());
            Outcome::Committed { message }
        } else if options.skip_commit {
            println!("{}", "Note: No commit was made (dry run mode).".blue().bold());
            Outcome::DryRun { message }
        } else {
            println!(
                "{}",
                "Note: No commit was made as a diff file was provided.".blue().bold()
            );
            Outcome::DiffFileProvided { message }
        };

        let elapsed = start.elapsed();
        debug!("Pipeline finished in {:?}", elapsed);
        println!(
            "{} {} {}",
            "Successfully processed in".green().bold(),
            format!("{:.2}", elapsed.as_secs_f64()).blue().bold(),
            "seconds.".green().bold()
        );

        Ok(outcome)
    }
}

fn print_provider_error(generator: &Generator, error: &CommandError) {
    eprintln!(
        "{} {}.",
        "Failed to generate commit message with".red().bold(),
        generator.provider.bold()
    );
    eprintln!("{}", "Make sure the AI tool is installed and accessible.".red());
    eprintln!("{} {}", "Error details:".dimmed(), error.to_string().dimmed());
}

fn print_generation_help(generator: &Generator) {
    eprintln!("{}", "Failed to generate commit message.".red().bold());
    eprintln!("{}", "Please make sure:".red());
    if !generator.is_installed() {
        eprintln!(
            "{}",
            format!("  - `{}` was not found on your PATH", generator.provider).red()
        );
    }
    eprintln!(
        "{}",
        "  - The AI provider (codex, gemini, etc.) is installed".red()
    );
    eprintln!("{}", "  - You have network connectivity".red());
    eprintln!(
        "{}",
        "  - Your API keys or authentication are configured".red()
    );
    eprintln!(
        "{}",
        format!(
            "  - The AI provider is working correctly (test by running `{}` in the console)",
            generator.provider
        )
        .red()
    );
    eprintln!("{}", "Exiting without committing changes.".red().bold());
}
