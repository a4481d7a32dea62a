//! git-commit-m - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use git_commit_m::commit::generator::{DEFAULT_PROMPT_FLAG, DEFAULT_PROVIDER};
use git_commit_m::{CommitPipeline, Options, Outcome, SystemRunner};

/// Generate a commit message from the staged diff with an AI CLI and commit.
#[derive(Parser, Debug)]
#[command(name = "git-commit-m")]
#[command(about = "CLI tool that automatically generates commit messages using AI and commits changes")]
#[command(version)]
struct Cli {
    /// Skip the "git add ." step
    #[arg(short = 'n', long = "no-add-dot")]
    no_add_dot: bool,

    /// Prompt argument to pass to the AI tool
    #[arg(
        short = 'p',
        long = "prompt-arg",
        value_name = "ARG",
        default_value = DEFAULT_PROMPT_FLAG,
        allow_hyphen_values = true
    )]
    prompt_arg: String,

    /// AI provider to use (gemini, qwen, claude, codex, continue, or any executable)
    #[arg(long, value_name = "PROVIDER", default_value = DEFAULT_PROVIDER)]
    provider: String,

    /// Diff file to use instead of generating one from git (implies no commit)
    #[arg(long, value_name = "FILE")]
    diff: Option<PathBuf>,

    /// Dry run - generate the commit message without committing
    #[arg(long)]
    no_commit: bool,

    /// Do not add the signature to the commit message
    #[arg(long)]
    no_signature: bool,

    /// Show debug logs, including every command that is run
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        Options {
            skip_staging: cli.no_add_dot,
            prompt_flag: cli.prompt_arg,
            provider: cli.provider,
            diff_file: cli.diff,
            skip_commit: cli.no_commit,
            skip_signature: cli.no_signature,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("git_commit_m=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.into()).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), format!("{:#}", e).red());
            ExitCode::FAILURE
        }
    }
}

async fn run(options: Options) -> Result<Outcome> {
    let workdir = std::env::current_dir().context("Failed to determine working directory")?;
    let pipeline = CommitPipeline::new(SystemRunner::new(&workdir), workdir);

    let outcome = pipeline
        .run(&options)
        .await
        .context("Commit pipeline failed")?;

    Ok(outcome)
}
