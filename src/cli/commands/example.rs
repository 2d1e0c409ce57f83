use crate::workflow::NamingConvention;
use anyhow::Result;

pub struct ExampleCommand {
    pub naming: NamingConvention,
}

impl ExampleCommand {
    pub fn execute(&self) -> Result<()> {
        print!("{}", self.render()?);
        Ok(())
    }

    /// Walkthrough text; branch names follow the active convention.
    pub fn render(&self) -> Result<String> {
        let branch = self.naming.story_branch_name("123", "Add Login")?;
        let mut out = String::new();

        out.push_str("📖 Example story workflow\n");
        out.push_str("──────────────────────────\n\n");
        out.push_str("1. Start the story from an up-to-date default branch:\n");
        out.push_str("   story-flow story-start --id 123 --description \"Add Login\"\n");
        out.push_str(&format!("   → creates and switches to {branch}\n\n"));
        out.push_str("2. Commit as you go (stages everything):\n");
        out.push_str("   story-flow story-commit --scope auth --description \"implement basic login flow\"\n");
        out.push_str("   → feat(auth): implement basic login flow\n\n");
        out.push_str("3. Publish the branch:\n");
        out.push_str("   story-flow story-push\n\n");
        out.push_str("4. Pick up teammates' commits on the same branch:\n");
        out.push_str("   story-flow sync\n");
        out.push_str("   → refuses with a dirty tree or unpushed commits, rebases when behind\n\n");
        out.push_str("5. Bring in the default branch when it moved on:\n");
        out.push_str("   story-flow resolve              # rebase onto origin/main\n");
        out.push_str("   story-flow resolve --rebase=false  # merge instead\n\n");
        out.push_str("6. Oops:\n");
        out.push_str("   story-flow undo                 # keep the changes\n");
        out.push_str("   story-flow undo --hard          # discard them\n");
        out.push_str("   story-flow revert --commit <sha>\n\n");
        out.push_str("7. Release:\n");
        out.push_str("   story-flow tag --version v1.0.0 --message \"First release\" --push\n");
        Ok(out)
    }
}
