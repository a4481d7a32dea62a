//! External command execution.

pub mod invocation;
pub mod subprocess;

pub use invocation::Invocation;
pub use subprocess::{CommandRunner, SystemRunner};

#[cfg(test)]
pub use subprocess::MockCommandRunner;
