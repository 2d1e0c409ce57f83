use crate::workflow::{ResolveStrategy, SyncOutcome, WorkflowManager};
use anyhow::Result;

pub struct SyncCommand {
    pub main: bool,
}

impl SyncCommand {
    pub async fn execute(&self, manager: &WorkflowManager) -> Result<()> {
        if self.main {
            let branch = manager.sync_main_branch().await?;
            println!("🔄 Synced {branch} with remote");
            return Ok(());
        }

        match manager.sync_with_remote().await? {
            SyncOutcome::NoRemoteBranch { branch } => {
                println!("🆕 {branch} has no remote branch yet - nothing to sync");
                println!("   → Publish it with: story-flow story-push");
            }
            SyncOutcome::UpToDate { branch } => {
                println!("✅ {branch} is already up to date with remote");
            }
            SyncOutcome::Rebased { branch, behind } => {
                println!("🔄 Rebased {branch} onto {behind} new remote commit(s)");
            }
        }
        Ok(())
    }
}

pub struct ResolveCommand {
    pub strategy: ResolveStrategy,
}

impl ResolveCommand {
    pub async fn execute(&self, manager: &WorkflowManager) -> Result<()> {
        let target = manager.resolve_conflicts(self.strategy).await?;
        match self.strategy {
            ResolveStrategy::Rebase => println!("🔀 Rebased onto {target}"),
            ResolveStrategy::Merge => println!("🔀 Merged {target}"),
        }
        Ok(())
    }
}
