//! External tool abstractions
//!
//! Trait-based seams around the `git` binary so the workflow layer can be
//! driven by scripted outputs in tests instead of real processes.

pub mod command;
pub mod git;

pub use command::{CommandError, CommandExecutor, CommandOutput, ProcessCommandExecutor};
pub use git::{has_conflict, BranchName, CommitHash, GitClient, GitError};
