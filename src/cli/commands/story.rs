use crate::workflow::WorkflowManager;
use anyhow::Result;

pub struct StoryStartCommand {
    pub story_id: String,
    pub description: Option<String>,
}

impl StoryStartCommand {
    pub async fn execute(&self, manager: &WorkflowManager) -> Result<()> {
        let description = self.description.as_deref().unwrap_or_default();
        let branch = manager.create_story_branch(&self.story_id, description).await?;
        println!("✅ Created and switched to branch: {branch}");
        Ok(())
    }
}

pub struct StoryCommitCommand {
    pub scope: String,
    pub description: String,
}

impl StoryCommitCommand {
    pub async fn execute(&self, manager: &WorkflowManager) -> Result<()> {
        let message = manager.commit_changes(&self.scope, &self.description).await?;
        println!("✅ Committed changes: {message}");
        Ok(())
    }
}

pub struct StoryPushCommand;

impl StoryPushCommand {
    pub async fn execute(&self, manager: &WorkflowManager) -> Result<()> {
        let branch = manager.push_story_branch().await?;
        println!("📤 Pushed {branch} to {}", manager.settings().remote);
        Ok(())
    }
}
