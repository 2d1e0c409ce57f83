use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::workflow::{BranchType, NamingConvention};

pub mod commands;

#[derive(Parser)]
#[command(name = "story-flow", version)]
#[command(about = "Story-driven git branch, commit and sync workflows")]
#[command(long_about = "story-flow wraps the everyday git moves of a story-based workflow: \
                       start a story branch off the default branch, commit with a conventional message, \
                       push, keep the branch in sync, and undo or tag safely. Start with 'story-flow example'.")]
pub struct Cli {
    /// Explicit configuration file (TOML)
    #[arg(long, global = true, help = "Read configuration from this TOML file instead of story-flow.toml")]
    pub config: Option<PathBuf>,

    /// Log every git invocation
    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    pub verbose: bool,

    /// Structured logs
    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    /// Override the configured branch naming convention
    #[arg(long, global = true, value_enum, help = "Branch naming convention: story (W-123-slug) or typed (feat/slug)")]
    pub convention: Option<NamingConvention>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a story branch off the freshly pulled default branch
    StoryStart {
        /// Story ID
        #[arg(long, help = "Story ID, e.g. 123")]
        id: String,
        /// Short description, slugified into the branch name
        #[arg(long, help = "Story description, e.g. \"Add Login\"")]
        description: Option<String>,
    },
    /// Stage all changes and commit as feat(<scope>): <description>
    StoryCommit {
        #[arg(long, help = "Commit scope, e.g. auth")]
        scope: String,
        #[arg(long, help = "Commit description")]
        description: String,
    },
    /// Push the current branch upstream with tracking
    StoryPush,
    /// Undo the last commit
    Undo {
        /// Discard the changes instead of keeping them in the working tree
        #[arg(long, help = "Discard changes (default: keep changes)")]
        hard: bool,
    },
    /// Create a commit that reverts another commit
    Revert {
        #[arg(long, help = "Commit hash to revert")]
        commit: String,
    },
    /// Create an annotated tag at HEAD
    Tag {
        #[arg(long, help = "Version number, e.g. v1.0.3")]
        version: String,
        #[arg(long, help = "Tag message")]
        message: String,
        #[arg(long, help = "Push the tag to the remote after creating it")]
        push: bool,
    },
    /// Push every local tag to the remote
    PushTags,
    /// Sync the current branch (or the default branch) with the remote
    Sync {
        #[arg(long, help = "Sync the default branch instead of the current branch")]
        main: bool,
    },
    /// Integrate the remote default branch into the current branch
    Resolve {
        #[arg(long, default_value_t = true, num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set, help = "Rebase onto the default branch (--rebase=false merges instead)")]
        rebase: bool,
    },
    /// Create a branch from a full name or from a type and description
    Branch {
        #[arg(long, conflicts_with_all = ["kind", "description"], help = "Full branch name, validated against the naming convention")]
        name: Option<String>,
        #[arg(long = "type", value_enum, requires = "description", help = "Branch type: feat, bugfix or chore")]
        kind: Option<BranchType>,
        #[arg(long, requires = "kind", help = "Branch description")]
        description: Option<String>,
    },
    /// Check out a branch and publish it for a pull request
    Pr {
        #[arg(long, help = "Branch to publish (default: current branch)")]
        branch: Option<String>,
    },
    /// Check a branch name against the naming convention
    CheckBranch {
        name: String,
    },
    /// Stage, commit with a free-form message, and push
    Checkin {
        #[arg(short = 'a', long = "all", help = "Stage all modified, deleted and new files first")]
        all: bool,
        #[arg(short = 'm', long, help = "Commit message; opens $EDITOR when omitted")]
        message: Option<String>,
        #[arg(long, help = "Do not push after committing")]
        no_push: bool,
    },
    /// Print a worked example of the story workflow
    Example,
}
