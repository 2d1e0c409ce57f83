use crate::workflow::WorkflowManager;
use anyhow::Result;

pub struct UndoCommand {
    pub hard: bool,
}

impl UndoCommand {
    pub async fn execute(&self, manager: &WorkflowManager) -> Result<()> {
        if self.hard {
            manager.undo_last_commit_hard().await?;
            println!("↩️  Undid last commit and discarded changes");
        } else {
            manager.undo_last_commit().await?;
            println!("↩️  Undid last commit, changes are in working directory");
        }
        Ok(())
    }
}

pub struct RevertCommand {
    pub commit: String,
}

impl RevertCommand {
    pub async fn execute(&self, manager: &WorkflowManager) -> Result<()> {
        manager.revert_commit(&self.commit).await?;
        println!("⏪ Reverted commit {}", self.commit);
        Ok(())
    }
}
