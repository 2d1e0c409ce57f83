use super::error::WorkflowError;
use super::naming::{BranchType, NamingConvention};
use crate::external::{has_conflict, BranchName, CommitHash, GitClient};
use crate::telemetry::{create_workflow_span, generate_correlation_id};
use std::future::Future;
use tracing::{info, warn, Instrument};

/// Knobs the orchestrator needs from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    pub remote: String,
    pub naming: NamingConvention,
    /// Probed in order; the first existing branch is the default branch.
    pub default_branch_candidates: Vec<String>,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            naming: NamingConvention::default(),
            default_branch_candidates: vec!["main".to_string(), "master".to_string()],
        }
    }
}

/// Orchestrates branch lifecycle operations over a [`GitClient`]
pub struct WorkflowManager {
    pub(super) git: GitClient,
    pub(super) settings: WorkflowSettings,
}

impl WorkflowManager {
    pub fn new(git: GitClient, settings: WorkflowSettings) -> Self {
        Self { git, settings }
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Run one operation inside its own span and log refusals.
    pub(super) async fn traced<T, F>(&self, operation: &'static str, fut: F) -> Result<T, WorkflowError>
    where
        F: Future<Output = Result<T, WorkflowError>>,
    {
        let span = create_workflow_span(operation, &generate_correlation_id());
        async move {
            let result = fut.await;
            if let Err(e) = &result {
                warn!(error = %e, "{} failed", operation);
            }
            result
        }
        .instrument(span)
        .await
    }

    pub async fn current_branch(&self) -> Result<BranchName, WorkflowError> {
        let args = ["rev-parse", "--abbrev-ref", "HEAD"];
        let branch = self.git.run_checked(&args).await?;
        if branch.is_empty() || branch == "HEAD" {
            return Err(WorkflowError::UnexpectedOutput {
                command: args.join(" "),
                output: branch,
            });
        }
        Ok(branch)
    }

    pub async fn last_commit_hash(&self) -> Result<CommitHash, WorkflowError> {
        Ok(self.git.run_checked(&["rev-parse", "HEAD"]).await?)
    }

    pub fn validate_branch_name(&self, name: &str) -> Result<(), WorkflowError> {
        self.settings.naming.validate(name)
    }

    /// Checkout the default branch, pull it and branch off. Returns the new
    /// branch name.
    pub async fn create_story_branch(&self, story_id: &str, description: &str) -> Result<BranchName, WorkflowError> {
        self.traced("create_story_branch", async {
            let name = self.settings.naming.story_branch_name(story_id, description)?;
            self.branch_from_default(&name).await?;
            Ok(name)
        })
        .await
    }

    pub async fn create_feature_branch(&self, name: &str) -> Result<(), WorkflowError> {
        self.traced("create_feature_branch", async {
            self.validate_branch_name(name)?;
            self.branch_from_default(name).await
        })
        .await
    }

    /// `<type>/<description>` only makes sense under the typed convention, so
    /// it is checked against that one whatever the configured policy is.
    pub async fn create_branch_with_type(&self, kind: BranchType, description: &str) -> Result<BranchName, WorkflowError> {
        self.traced("create_branch_with_type", async {
            let name = NamingConvention::typed_branch_name(kind, description);
            NamingConvention::Typed.validate(&name)?;
            self.branch_from_default(&name).await?;
            Ok(name)
        })
        .await
    }

    async fn branch_from_default(&self, name: &str) -> Result<(), WorkflowError> {
        let creation_failed = |diagnostic| WorkflowError::BranchCreationFailed {
            branch: name.to_string(),
            diagnostic,
        };

        if self.git.ref_exists(&format!("refs/heads/{name}")).await? {
            return Err(creation_failed(format!("a branch named '{name}' already exists")));
        }

        let default_branch = self.default_branch().await?;
        info!(branch = name, base = %default_branch, "creating branch from default branch");

        self.git
            .run_checked(&["checkout", &default_branch])
            .await
            .map_err(|e| WorkflowError::classify(e, creation_failed))?;
        self.git
            .run_checked(&["pull", "--ff-only", &self.settings.remote, &default_branch])
            .await
            .map_err(|e| WorkflowError::classify(e, creation_failed))?;
        self.git
            .run_checked(&["checkout", "-b", name])
            .await
            .map_err(|e| WorkflowError::classify(e, creation_failed))?;

        info!(branch = name, "switched to new branch");
        Ok(())
    }

    /// Stage everything and commit as `feat(<scope>): <description>`.
    pub async fn commit_changes(&self, scope: &str, description: &str) -> Result<String, WorkflowError> {
        self.traced("commit_changes", async {
            let message = commit_message(scope, description)?;
            self.commit_all(&message).await?;
            Ok(message)
        })
        .await
    }

    async fn commit_all(&self, message: &str) -> Result<(), WorkflowError> {
        let commit_failed = |diagnostic| WorkflowError::CommitFailed { diagnostic };

        self.git
            .run_checked(&["add", "--all"])
            .await
            .map_err(|e| WorkflowError::classify(e, commit_failed))?;
        self.commit(message).await
    }

    async fn commit(&self, message: &str) -> Result<(), WorkflowError> {
        self.git
            .run_checked(&["commit", "-m", message])
            .await
            .map_err(|e| WorkflowError::classify(e, |diagnostic| WorkflowError::CommitFailed { diagnostic }))?;
        info!(commit_message = message, "committed");
        Ok(())
    }

    pub async fn push_story_branch(&self) -> Result<BranchName, WorkflowError> {
        self.traced("push_story_branch", async {
            let branch = self.current_branch().await?;
            self.push_upstream(&branch).await?;
            Ok(branch)
        })
        .await
    }

    /// Check out `branch` and publish it with upstream tracking so a pull
    /// request can be opened from it.
    pub async fn prepare_pull_request(&self, branch: &str) -> Result<(), WorkflowError> {
        self.traced("prepare_pull_request", async {
            self.git.run_checked(&["checkout", branch]).await?;
            self.push_upstream(branch).await
        })
        .await
    }

    async fn push_upstream(&self, branch: &str) -> Result<(), WorkflowError> {
        self.git
            .run_checked(&["push", "-u", &self.settings.remote, branch])
            .await
            .map_err(|e| {
                WorkflowError::classify(e, |diagnostic| WorkflowError::PushFailed {
                    target: branch.to_string(),
                    diagnostic,
                })
            })?;
        info!(branch, remote = %self.settings.remote, "pushed with upstream tracking");
        Ok(())
    }

    /// Move HEAD back one commit and keep its changes in the working tree.
    pub async fn undo_last_commit(&self) -> Result<(), WorkflowError> {
        self.traced("undo_last_commit", async {
            self.git.run_checked(&["reset", "HEAD~1"]).await?;
            info!("moved HEAD back one commit, changes kept");
            Ok(())
        })
        .await
    }

    /// Move HEAD back one commit and discard its changes. Destroys work.
    pub async fn undo_last_commit_hard(&self) -> Result<(), WorkflowError> {
        self.traced("undo_last_commit_hard", async {
            warn!("discarding last commit and working tree changes");
            self.git.run_checked(&["reset", "--hard", "HEAD~1"]).await?;
            Ok(())
        })
        .await
    }

    pub async fn revert_commit(&self, commit: &str) -> Result<(), WorkflowError> {
        self.traced("revert_commit", async {
            let args = ["revert", "--no-edit", commit];
            let output = self.git.run(&args).await?;
            if output.success() {
                info!(commit, "reverted");
                return Ok(());
            }
            if has_conflict(&output) {
                return Err(WorkflowError::RevertConflict {
                    commit: commit.to_string(),
                    diagnostic: output.diagnostic(),
                });
            }
            Err(GitClient::failure(&args, &output).into())
        })
        .await
    }

    pub async fn create_tag(&self, version: &str, message: &str) -> Result<(), WorkflowError> {
        self.traced("create_tag", async {
            let tag_failed = |diagnostic| WorkflowError::TagFailed {
                tag: version.to_string(),
                diagnostic,
            };
            if version.trim().is_empty() {
                return Err(tag_failed("tag name cannot be empty".to_string()));
            }
            if message.trim().is_empty() {
                return Err(tag_failed("annotated tags need a message".to_string()));
            }
            self.git
                .run_checked(&["tag", "-a", version, "-m", message])
                .await
                .map_err(|e| WorkflowError::classify(e, tag_failed))?;
            info!(tag = version, "created annotated tag");
            Ok(())
        })
        .await
    }

    pub async fn push_tag(&self, version: &str) -> Result<(), WorkflowError> {
        self.traced("push_tag", async {
            let refspec = format!("refs/tags/{version}");
            self.git
                .run_checked(&["push", &self.settings.remote, &refspec])
                .await
                .map_err(|e| {
                    WorkflowError::classify(e, |diagnostic| WorkflowError::TagFailed {
                        tag: version.to_string(),
                        diagnostic,
                    })
                })?;
            info!(tag = version, remote = %self.settings.remote, "pushed tag");
            Ok(())
        })
        .await
    }

    pub async fn push_all_tags(&self) -> Result<(), WorkflowError> {
        self.traced("push_all_tags", async {
            self.git
                .run_checked(&["push", &self.settings.remote, "--tags"])
                .await
                .map_err(|e| {
                    WorkflowError::classify(e, |diagnostic| WorkflowError::TagFailed {
                        tag: "all tags".to_string(),
                        diagnostic,
                    })
                })?;
            Ok(())
        })
        .await
    }

    /// Commit with a verbatim message, optionally staging everything first
    /// and pushing afterwards.
    pub async fn check_in(&self, message: &str, stage_all: bool, push: bool) -> Result<(), WorkflowError> {
        self.traced("check_in", async {
            if message.trim().is_empty() {
                return Err(WorkflowError::CommitFailed {
                    diagnostic: "aborting commit due to empty commit message".to_string(),
                });
            }
            if stage_all {
                self.commit_all(message).await?;
            } else {
                self.commit(message).await?;
            }
            if push {
                self.git.run_checked(&["push"]).await.map_err(|e| {
                    WorkflowError::classify(e, |diagnostic| WorkflowError::PushFailed {
                        target: "upstream".to_string(),
                        diagnostic,
                    })
                })?;
                info!("pushed to upstream");
            }
            Ok(())
        })
        .await
    }
}

/// `feat(<scope>): <description>`
pub fn commit_message(scope: &str, description: &str) -> Result<String, WorkflowError> {
    let (scope, description) = (scope.trim(), description.trim());
    if scope.is_empty() || description.is_empty() {
        return Err(WorkflowError::CommitFailed {
            diagnostic: "commit scope and description are both required".to_string(),
        });
    }
    Ok(format!("feat({scope}): {description}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_message_format() {
        assert_eq!(
            commit_message("auth", "implement basic login flow").unwrap(),
            "feat(auth): implement basic login flow"
        );
    }

    #[test]
    fn test_commit_message_requires_both_parts() {
        assert!(matches!(
            commit_message("", "something"),
            Err(WorkflowError::CommitFailed { .. })
        ));
        assert!(matches!(
            commit_message("auth", "   "),
            Err(WorkflowError::CommitFailed { .. })
        ));
    }

    #[test]
    fn test_default_settings() {
        let settings = WorkflowSettings::default();
        assert_eq!(settings.remote, "origin");
        assert_eq!(settings.naming, NamingConvention::Story);
        assert_eq!(settings.default_branch_candidates, vec!["main", "master"]);
    }
}
