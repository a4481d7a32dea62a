//! External command description.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

/// A single external command: program name plus argument vector.
///
/// Arguments are handed to the child process as-is, never through a shell,
/// so message text with quotes or newlines arrives unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Upper bound on how long the command may run. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// True if the command is `program` followed by exactly `args`.
    pub fn is(&self, program: &str, args: &[&str]) -> bool {
        self.program == program && self.args.iter().map(String::as_str).eq(args.iter().copied())
    }
}

impl fmt::Display for Invocation {
    /// Renders a shell-style command line, e.g. `git commit -m "He said \"hi\""`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote_arg(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote_arg(arg))?;
        }
        Ok(())
    }
}

/// Quote an argument for display if a shell would split or reinterpret it.
///
/// Embedded `"` and `\` are backslash-escaped inside the double quotes.
fn quote_arg(arg: &str) -> Cow<'_, str> {
    let needs_quotes = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\' | '$' | '`'));

    if !needs_quotes {
        return Cow::Borrowed(arg);
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_args_render_unquoted() {
        let inv = Invocation::new("git").args(["diff", "--cached"]);
        assert_eq!(inv.to_string(), "git diff --cached");
    }

    #[test]
    fn test_embedded_quotes_are_escaped() {
        let inv = Invocation::new("git").args(["commit", "-m", r#"He said "hi""#]);
        assert_eq!(inv.to_string(), r#"git commit -m "He said \"hi\"""#);
    }

    #[test]
    fn test_escaping_leaves_argument_untouched() {
        let message = r#"He said "hi""#;
        let inv = Invocation::new("git").args(["commit", "-m", message]);
        assert_eq!(inv.args[2], message);
    }

    #[test]
    fn test_backslash_is_escaped() {
        assert_eq!(quote_arg(r"C:\tmp dir"), r#""C:\\tmp dir""#);
    }

    #[test]
    fn test_empty_arg_is_quoted() {
        assert_eq!(quote_arg(""), r#""""#);
    }

    #[test]
    fn test_is_matches_program_and_args() {
        let inv = Invocation::new("git").args(["add", "."]);
        assert!(inv.is("git", &["add", "."]));
        assert!(!inv.is("git", &["add"]));
        assert!(!inv.is("hg", &["add", "."]));
    }
}
