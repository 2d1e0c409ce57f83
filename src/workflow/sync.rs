//! Synchronisation with the remote and conflict resolution
//!
//! `sync_with_remote` is the only workflow with real branching:
//!
//! ```text
//! fetch -> dirty? -> ABORT
//!       -> remote branch missing? -> DONE (nothing to sync)
//!       -> ahead > 0 -> ABORT (push first)
//!       -> behind > 0 -> pull --rebase -> DONE | ABORT
//!       -> DONE
//! ```
//!
//! Every ABORT happens before anything mutates HEAD.

use super::error::WorkflowError;
use super::manager::WorkflowManager;
use crate::external::{has_conflict, BranchName, GitClient};
use tracing::{info, warn};

/// Commits only on the local branch vs. only on its remote-tracking branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Divergence {
    pub ahead: u32,
    pub behind: u32,
}

impl Divergence {
    /// Parse `rev-list --left-right --count <local>...<remote>` output: two
    /// whitespace-separated integers, local-only count first.
    pub fn parse(output: &str) -> Option<Self> {
        let parts: Vec<&str> = output.split_whitespace().collect();
        match parts.as_slice() {
            [ahead, behind] => Some(Self {
                ahead: ahead.parse().ok()?,
                behind: behind.parse().ok()?,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The branch was never pushed; there is nothing to compare against.
    NoRemoteBranch { branch: BranchName },
    UpToDate { branch: BranchName },
    Rebased { branch: BranchName, behind: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStrategy {
    Rebase,
    Merge,
}

impl ResolveStrategy {
    fn as_str(&self) -> &'static str {
        match self {
            ResolveStrategy::Rebase => "rebase",
            ResolveStrategy::Merge => "merge",
        }
    }
}

impl WorkflowManager {
    /// First candidate with a local branch wins.
    pub async fn default_branch(&self) -> Result<BranchName, WorkflowError> {
        for candidate in &self.settings.default_branch_candidates {
            if self.git.ref_exists(&format!("refs/heads/{candidate}")).await? {
                return Ok(candidate.clone());
            }
        }
        Err(WorkflowError::NoDefaultBranch {
            candidates: self.settings.default_branch_candidates.clone(),
        })
    }

    /// Same probe against remote-tracking refs; returns `<remote>/<branch>`.
    async fn remote_default_branch(&self) -> Result<String, WorkflowError> {
        let remote = &self.settings.remote;
        for candidate in &self.settings.default_branch_candidates {
            if self.git.ref_exists(&format!("refs/remotes/{remote}/{candidate}")).await? {
                return Ok(format!("{remote}/{candidate}"));
            }
        }
        Err(WorkflowError::NoDefaultBranch {
            candidates: self
                .settings
                .default_branch_candidates
                .iter()
                .map(|candidate| format!("{remote}/{candidate}"))
                .collect(),
        })
    }

    async fn fetch(&self) -> Result<(), WorkflowError> {
        let remote = &self.settings.remote;
        self.git.run_checked(&["fetch", remote.as_str()]).await.map_err(|e| {
            WorkflowError::classify(e, |diagnostic| WorkflowError::FetchFailed {
                remote: remote.clone(),
                diagnostic,
            })
        })?;
        Ok(())
    }

    async fn ensure_clean_tree(&self) -> Result<(), WorkflowError> {
        // Stat-only changes (touched files) would otherwise read as dirty.
        // The refresh itself exits 1 when files really differ, which the
        // probes below report.
        self.git.run(&["update-index", "-q", "--refresh"]).await?;
        if !self.git.probe(&["diff-files", "--quiet"]).await? {
            return Err(WorkflowError::UncommittedChanges);
        }
        if !self.git.probe(&["diff-index", "--quiet", "--cached", "HEAD"]).await? {
            return Err(WorkflowError::StagedChanges);
        }
        Ok(())
    }

    async fn divergence(&self, branch: &str) -> Result<Divergence, WorkflowError> {
        let range = format!("{branch}...{}/{branch}", self.settings.remote);
        let args = ["rev-list", "--left-right", "--count", range.as_str()];
        let output = self.git.run_checked(&args).await?;
        Divergence::parse(&output).ok_or_else(|| WorkflowError::UnexpectedOutput {
            command: args.join(" "),
            output,
        })
    }

    /// Bring the current branch up to date with its remote counterpart.
    ///
    /// Refuses to run on a dirty tree and refuses when the branch has
    /// unpushed commits, so the only mutation it ever performs is a
    /// rebase-pull of a branch that is strictly behind.
    pub async fn sync_with_remote(&self) -> Result<SyncOutcome, WorkflowError> {
        self.traced("sync_with_remote", async {
            self.fetch().await?;
            let branch = self.current_branch().await?;
            self.ensure_clean_tree().await?;

            let remote_ref = format!("refs/remotes/{}/{branch}", self.settings.remote);
            if !self.git.ref_exists(&remote_ref).await? {
                info!(branch = %branch, "no remote branch yet, nothing to sync");
                return Ok(SyncOutcome::NoRemoteBranch { branch });
            }

            let Divergence { ahead, behind } = self.divergence(&branch).await?;
            info!(branch = %branch, ahead, behind, "compared with remote");

            if ahead > 0 {
                return Err(WorkflowError::LocalAheadOfRemote { count: ahead });
            }
            if behind == 0 {
                return Ok(SyncOutcome::UpToDate { branch });
            }

            let args = ["pull", "--rebase", self.settings.remote.as_str(), branch.as_str()];
            let output = self.git.run(&args).await?;
            if !output.success() {
                if has_conflict(&output) {
                    return Err(WorkflowError::ConflictUnresolved {
                        operation: "pull --rebase".to_string(),
                        target: format!("{}/{branch}", self.settings.remote),
                        diagnostic: output.diagnostic(),
                    });
                }
                return Err(GitClient::failure(&args, &output).into());
            }

            info!(branch = %branch, behind, "rebased onto remote");
            Ok(SyncOutcome::Rebased { branch, behind })
        })
        .await
    }

    /// Check out the default branch and pull it. Returns the branch name.
    pub async fn sync_main_branch(&self) -> Result<BranchName, WorkflowError> {
        self.traced("sync_main_branch", async {
            let default_branch = self.default_branch().await?;
            self.git.run_checked(&["checkout", &default_branch]).await?;
            self.git
                .run_checked(&["pull", "--ff-only", &self.settings.remote, &default_branch])
                .await?;
            info!(branch = %default_branch, "default branch synced");
            Ok(default_branch)
        })
        .await
    }

    pub async fn resolve_conflicts_rebase(&self) -> Result<String, WorkflowError> {
        self.resolve_conflicts(ResolveStrategy::Rebase).await
    }

    pub async fn resolve_conflicts_merge(&self) -> Result<String, WorkflowError> {
        self.resolve_conflicts(ResolveStrategy::Merge).await
    }

    /// Fetch and integrate the remote default branch into the current one.
    /// Conflicts are surfaced, never resolved; the repository is left in the
    /// paused rebase/merge state for the operator. Returns the target ref.
    pub async fn resolve_conflicts(&self, strategy: ResolveStrategy) -> Result<String, WorkflowError> {
        self.traced("resolve_conflicts", async {
            self.fetch().await?;
            let target = self.remote_default_branch().await?;

            let args: Vec<&str> = match strategy {
                ResolveStrategy::Rebase => vec!["rebase", target.as_str()],
                ResolveStrategy::Merge => vec!["merge", "--no-edit", target.as_str()],
            };
            let output = self.git.run(&args).await?;
            if output.success() {
                info!(strategy = strategy.as_str(), target = %target, "integrated default branch");
                return Ok(target);
            }
            if has_conflict(&output) {
                warn!(strategy = strategy.as_str(), target = %target, "stopped on conflicts");
                return Err(WorkflowError::ConflictUnresolved {
                    operation: strategy.as_str().to_string(),
                    target,
                    diagnostic: output.diagnostic(),
                });
            }
            Err(GitClient::failure(&args, &output).into())
        })
        .await
    }
}
