//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{Repository, Signature};

use git_commit_m::{CommandError, CommandRunner, Invocation};

type Responder = Box<dyn Fn(&Invocation) -> Result<String, CommandError> + Send + Sync>;

/// Fake runner that records every invocation and answers from a closure.
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    respond: Responder,
}

impl RecordingRunner {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&Invocation) -> Result<String, CommandError> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    /// Runner where `git diff --cached` prints `diff` and the provider prints `message`.
    pub fn with_diff_and_message(diff: &str, message: &str) -> Self {
        let diff = diff.to_string();
        let message = message.to_string();
        Self::new(move |inv| {
            if inv.is("git", &["diff", "--cached"]) {
                Ok(diff.clone())
            } else if inv.program == "git" {
                Ok(String::new())
            } else {
                Ok(message.clone())
            }
        })
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, program: &str, args: &[&str]) -> bool {
        self.calls().iter().any(|c| c.is(program, args))
    }

    pub fn called_program(&self, program: &str) -> bool {
        self.calls().iter().any(|c| c.program == program)
    }

    /// The message passed to `git commit -m`, if a commit was attempted.
    pub fn commit_message(&self) -> Option<String> {
        self.calls()
            .into_iter()
            .find(|c| c.program == "git" && c.args.first().is_some_and(|a| a == "commit"))
            .map(|c| c.args[2].clone())
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> Result<String, CommandError> {
        self.calls.lock().unwrap().push(invocation.clone());
        (self.respond)(invocation)
    }
}

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write an executable shell script into `dir` and return its path.
#[cfg(unix)]
pub fn create_mock_script(dir: &Path, name: &str, script_content: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script_path = dir.join(name);

    let mut file = File::create(&script_path).expect("Failed to create mock script");
    file.write_all(script_content.as_bytes())
        .expect("Failed to write mock script");

    // Make executable
    let mut perms = fs::metadata(&script_path)
        .expect("Failed to get metadata")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script_path, perms).expect("Failed to set permissions");

    script_path
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new repository with an initial commit and a local identity.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
            config.set_bool("commit.gpgsign", false).unwrap();
        }

        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        {
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
                .expect("Failed to create initial commit");
        }

        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file into the working tree without staging it.
    pub fn write(&self, name: &str, contents: &str) {
        fs::write(self.dir.path().join(name), contents).expect("Failed to write test file");
    }

    /// Message of the commit HEAD points at.
    pub fn head_message(&self) -> String {
        let commit = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD");
        commit.message().expect("Commit message is not UTF-8").to_string()
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        let mut walk = self.repo.revwalk().expect("Failed to create revwalk");
        walk.push_head().expect("Failed to push HEAD");
        walk.count()
    }
}
