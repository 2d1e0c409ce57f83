//! Git command abstractions
//!
//! Thin typed layer over [`CommandExecutor`] for the `git` binary. It knows
//! git's exit-code conventions but nothing about workflows.

use super::command::{CommandError, CommandExecutor, CommandOutput};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

pub type BranchName = String;
pub type CommitHash = String;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GitError {
    #[error("Command execution error: {source}")]
    CommandError {
        #[from]
        source: CommandError,
    },
    #[error("`git {command}` exited with status {status_code}: {diagnostic}")]
    GitCommandFailed {
        command: String,
        status_code: i32,
        diagnostic: String,
    },
}

impl GitError {
    pub fn diagnostic(&self) -> String {
        match self {
            GitError::CommandError { source } => source.to_string(),
            GitError::GitCommandFailed { diagnostic, .. } => diagnostic.clone(),
        }
    }
}

/// Markers git prints when a rebase, merge, revert or pull stops on
/// conflicting hunks.
const CONFLICT_MARKERS: &[&str] = &[
    "CONFLICT",
    "could not apply",
    "Merge conflict",
    "fix conflicts",
];

pub fn has_conflict(output: &CommandOutput) -> bool {
    CONFLICT_MARKERS
        .iter()
        .any(|marker| output.stdout.contains(marker) || output.stderr.contains(marker))
}

/// Git client bound to one executor (and therefore one working tree)
#[derive(Clone)]
pub struct GitClient {
    executor: Arc<dyn CommandExecutor>,
    program: String,
}

impl GitClient {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self::with_program(executor, "git")
    }

    pub fn with_program(executor: Arc<dyn CommandExecutor>, program: impl Into<String>) -> Self {
        Self {
            executor,
            program: program.into(),
        }
    }

    /// Run git and hand back the raw output, whatever the exit code.
    pub async fn run(&self, args: &[&str]) -> Result<CommandOutput, GitError> {
        debug!(command = %args.join(" "), "git");
        let output = self.executor.execute(&self.program, args).await?;
        debug!(command = %args.join(" "), status = output.status_code, "git finished");
        Ok(output)
    }

    /// Run git, treating any non-zero exit as failure. Returns trimmed stdout.
    pub async fn run_checked(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.run(args).await?;
        if !output.success() {
            return Err(Self::failure(args, &output));
        }
        Ok(output.stdout.trim().to_string())
    }

    /// Exit 0 is `true`, exit 1 is `false`, anything else is an error.
    pub async fn probe(&self, args: &[&str]) -> Result<bool, GitError> {
        let output = self.run(args).await?;
        match output.status_code {
            0 => Ok(true),
            1 => Ok(false),
            _ => Err(Self::failure(args, &output)),
        }
    }

    pub async fn ref_exists(&self, refname: &str) -> Result<bool, GitError> {
        self.probe(&["show-ref", "--verify", "--quiet", refname]).await
    }

    pub fn failure(args: &[&str], output: &CommandOutput) -> GitError {
        GitError::GitCommandFailed {
            command: args.join(" "),
            status_code: output.status_code,
            diagnostic: output.diagnostic(),
        }
    }
}
