use crate::workflow::{BranchType, WorkflowManager};
use anyhow::{bail, Result};

pub struct BranchCommand {
    pub name: Option<String>,
    pub kind: Option<BranchType>,
    pub description: Option<String>,
}

impl BranchCommand {
    pub async fn execute(&self, manager: &WorkflowManager) -> Result<()> {
        let branch = match (&self.name, self.kind, &self.description) {
            (Some(name), _, _) => {
                manager.create_feature_branch(name).await?;
                name.clone()
            }
            (None, Some(kind), Some(description)) => manager.create_branch_with_type(kind, description).await?,
            _ => bail!("either --name or both --type and --description are required"),
        };
        println!("✅ Created and switched to branch: {branch}");
        Ok(())
    }
}

pub struct PullRequestCommand {
    pub branch: Option<String>,
}

impl PullRequestCommand {
    pub async fn execute(&self, manager: &WorkflowManager) -> Result<()> {
        let branch = match &self.branch {
            Some(branch) => branch.clone(),
            None => manager.current_branch().await?,
        };
        manager.prepare_pull_request(&branch).await?;
        println!("📤 Pushed {branch} to {} - ready for a pull request", manager.settings().remote);
        Ok(())
    }
}

pub struct CheckBranchCommand {
    pub name: String,
}

impl CheckBranchCommand {
    pub fn execute(&self, manager: &WorkflowManager) -> Result<()> {
        manager.validate_branch_name(&self.name)?;
        println!("✅ {} follows the {} naming convention", self.name, manager.settings().naming);
        Ok(())
    }
}
