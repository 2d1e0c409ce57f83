use crate::external::{CommandError, GitError};
use thiserror::Error;

/// Classified failures of the workflow operations.
///
/// Every variant keeps the diagnostic text git printed so the caller can show
/// it verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("invalid branch name '{name}': {reason}")]
    InvalidBranchName { name: String, reason: String },

    #[error("failed to create branch '{branch}': {diagnostic}")]
    BranchCreationFailed { branch: String, diagnostic: String },

    #[error("failed to commit: {diagnostic}")]
    CommitFailed { diagnostic: String },

    #[error("failed to push '{target}': {diagnostic}")]
    PushFailed { target: String, diagnostic: String },

    #[error("reverting {commit} stopped on conflicts; resolve them and run `git revert --continue`: {diagnostic}")]
    RevertConflict { commit: String, diagnostic: String },

    #[error("tag '{tag}' failed: {diagnostic}")]
    TagFailed { tag: String, diagnostic: String },

    #[error("uncommitted changes detected. Please commit or stash your changes before syncing")]
    UncommittedChanges,

    #[error("staged changes detected. Please commit or unstage them before syncing")]
    StagedChanges,

    #[error("local branch is {count} commit(s) ahead of remote. Please push your changes first")]
    LocalAheadOfRemote { count: u32 },

    #[error("no default branch found (tried: {})", candidates.join(", "))]
    NoDefaultBranch { candidates: Vec<String> },

    #[error("{operation} onto {target} stopped on conflicts; resolve them manually and continue: {diagnostic}")]
    ConflictUnresolved {
        operation: String,
        target: String,
        diagnostic: String,
    },

    #[error("unexpected output from `git {command}`: {output:?}")]
    UnexpectedOutput { command: String, output: String },

    #[error("failed to fetch from {remote}: {diagnostic}")]
    FetchFailed { remote: String, diagnostic: String },

    #[error("`git {command}` failed: {diagnostic}")]
    GitCommandFailed { command: String, diagnostic: String },

    #[error("git did not finish within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("could not run git: {diagnostic}")]
    ToolInvocationFailed { diagnostic: String },
}

impl From<GitError> for WorkflowError {
    fn from(err: GitError) -> Self {
        match err {
            GitError::CommandError {
                source: CommandError::Timeout { timeout_ms },
            } => WorkflowError::Timeout { timeout_ms },
            GitError::CommandError { source } => WorkflowError::ToolInvocationFailed {
                diagnostic: source.to_string(),
            },
            GitError::GitCommandFailed {
                command, diagnostic, ..
            } => WorkflowError::GitCommandFailed { command, diagnostic },
        }
    }
}

impl WorkflowError {
    /// Re-classify a git failure, keeping runner-level failures (missing
    /// binary, timeout) as they are.
    pub(crate) fn classify(err: GitError, classified: impl FnOnce(String) -> WorkflowError) -> Self {
        match err {
            GitError::GitCommandFailed { diagnostic, .. } => classified(diagnostic),
            other => other.into(),
        }
    }
}
