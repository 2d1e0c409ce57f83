use crate::workflow::WorkflowManager;
use anyhow::Result;

pub struct TagCommand {
    pub version: String,
    pub message: String,
    pub push: bool,
}

impl TagCommand {
    pub async fn execute(&self, manager: &WorkflowManager) -> Result<()> {
        manager.create_tag(&self.version, &self.message).await?;
        println!("🏷️  Created tag {}: {}", self.version, self.message);

        if self.push {
            manager.push_tag(&self.version).await?;
            println!("📤 Pushed tag {} to {}", self.version, manager.settings().remote);
        }
        Ok(())
    }
}

pub struct PushTagsCommand;

impl PushTagsCommand {
    pub async fn execute(&self, manager: &WorkflowManager) -> Result<()> {
        manager.push_all_tags().await?;
        println!("📤 Pushed all tags to {}", manager.settings().remote);
        Ok(())
    }
}
