//! AI provider invocation.

use std::env;
use std::path::Path;
use std::time::Duration;

use tracing::warn;

use crate::error::CommandError;
use crate::runner::{CommandRunner, Invocation};

/// Default provider executable.
pub const DEFAULT_PROVIDER: &str = "gemini";

/// Default flag telling the provider to read its prompt from the next argument.
pub const DEFAULT_PROMPT_FLAG: &str = "-p";

/// Default timeout for provider execution (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Environment variable to override the default timeout.
pub const TIMEOUT_ENV_VAR: &str = "GIT_COMMIT_M_TIMEOUT";

/// Get the configured timeout.
///
/// Reads from GIT_COMMIT_M_TIMEOUT if set, otherwise uses 300 seconds.
/// A value of `0` disables the timeout entirely.
///
/// Logs a warning if the environment variable is set but contains
/// an invalid value (non-numeric or negative).
pub fn get_timeout() -> Option<Duration> {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(0) => None,
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            }
        },
        _ => Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
    }
}

/// An external AI CLI selected by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    pub provider: String,
    pub prompt_flag: String,
    pub timeout: Option<Duration>,
}

impl Generator {
    pub fn new(provider: impl Into<String>, prompt_flag: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            prompt_flag: prompt_flag.into(),
            timeout: get_timeout(),
        }
    }

    /// `<provider> <prompt_flag> @<prompt_file>`.
    ///
    /// The `@path` form asks the provider to read the prompt from the file.
    pub fn invocation(&self, prompt_file: &Path) -> Invocation {
        Invocation::new(&self.provider)
            .arg(&self.prompt_flag)
            .arg(format!("@{}", prompt_file.display()))
            .timeout(self.timeout)
    }

    /// Run the provider and return its raw stdout.
    pub async fn generate<R: CommandRunner + ?Sized>(
        &self,
        runner: &R,
        prompt_file: &Path,
    ) -> Result<String, CommandError> {
        runner.run(&self.invocation(prompt_file)).await
    }

    /// Whether the provider executable can be found on PATH.
    pub fn is_installed(&self) -> bool {
        which::which(&self.provider).is_ok()
    }
}

impl Default for Generator {
    fn default() -> Self {
        Generator::new(DEFAULT_PROVIDER, DEFAULT_PROMPT_FLAG)
    }
}
