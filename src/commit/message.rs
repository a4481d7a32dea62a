//! Prompt text and commit message assembly.

/// Instruction placed ahead of the diff in the prompt file.
pub const PROMPT_INSTRUCTION: &str = "Summarize this git diff into a clear commit message:";

/// Attribution trailer appended to generated messages.
pub const SIGNATURE: &str = "Generated using @missb/git-commit-m";

/// Build the prompt handed to the AI provider: instruction, newline, diff.
pub fn build_prompt(diff: &str) -> String {
    format!("{PROMPT_INSTRUCTION}\n{diff}")
}

/// Append a blank line and the signature trailer to `message`.
pub fn with_signature(message: &str) -> String {
    format!("{message}\n\n{SIGNATURE}")
}

/// Normalize raw provider output into a commit message.
///
/// Returns `None` when nothing but whitespace came back.
pub fn from_output(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
