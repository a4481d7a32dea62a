//! AI-generated commit messages from the staged diff.

pub mod generator;
pub mod message;
pub mod pipeline;
pub mod scratch;

pub use generator::Generator;
pub use message::{PROMPT_INSTRUCTION, SIGNATURE, build_prompt, with_signature};
pub use pipeline::{CommitPipeline, Options, Outcome};
pub use scratch::{SCRATCH_FILE_NAME, ScratchFile};
