use crate::workflow::WorkflowManager;
use anyhow::{bail, Context, Result};
use std::process::Command;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

/// Source of a commit message when none was given on the command line
#[cfg_attr(any(test, feature = "testing"), automock)]
pub trait CommitMessageEditor {
    fn compose(&self) -> Result<String>;
}

/// Opens `$EDITOR` (default `vi`) on a temporary file
pub struct ExternalEditor {
    editor: String,
}

impl ExternalEditor {
    pub fn from_env() -> Self {
        let editor = std::env::var("EDITOR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "vi".to_string());
        Self { editor }
    }
}

impl CommitMessageEditor for ExternalEditor {
    fn compose(&self) -> Result<String> {
        let file = tempfile::Builder::new()
            .prefix("STORY_FLOW_")
            .suffix(".txt")
            .tempfile()
            .context("Failed to create temp file for commit message")?;

        // EDITOR may carry flags, e.g. "code --wait"
        let mut parts = self.editor.split_whitespace();
        let program = parts.next().unwrap_or("vi");
        let status = Command::new(program)
            .args(parts)
            .arg(file.path())
            .status()
            .with_context(|| format!("Failed to launch editor '{}'", self.editor))?;
        if !status.success() {
            bail!("{} exited with {}", self.editor, status);
        }

        let contents = std::fs::read_to_string(file.path()).context("Failed to read commit message")?;
        Ok(strip_comment_lines(&contents))
    }
}

/// Drop lines starting with `#`, as git does for its own message template.
pub fn strip_comment_lines(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn resolve_message(flag: Option<&str>, editor: &dyn CommitMessageEditor) -> Result<String> {
    let message = match flag {
        Some(message) if !message.trim().is_empty() => message.to_string(),
        _ => editor.compose()?,
    };
    if message.trim().is_empty() {
        bail!("Aborting commit due to empty commit message.");
    }
    Ok(message)
}

/// A check-in whose message is already settled.
///
/// `$EDITOR` is an interactive blocking child, so callers run
/// [`resolve_message`] before entering the async runtime.
pub struct CheckinCommand {
    pub stage_all: bool,
    pub message: String,
    pub no_push: bool,
}

impl CheckinCommand {
    pub async fn execute(&self, manager: &WorkflowManager) -> Result<()> {
        manager.check_in(&self.message, self.stage_all, !self.no_push).await?;

        let summary = self.message.lines().next().unwrap_or_default();
        if self.no_push {
            println!("✅ Committed: {summary}");
        } else {
            println!("✅ Committed and pushed: {summary}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_message_skips_editor() {
        let mut editor = MockCommitMessageEditor::new();
        editor.expect_compose().times(0);

        let message = resolve_message(Some("fix: typo in README"), &editor).unwrap();
        assert_eq!(message, "fix: typo in README");
    }

    #[test]
    fn test_missing_message_opens_editor() {
        let mut editor = MockCommitMessageEditor::new();
        editor
            .expect_compose()
            .times(1)
            .returning(|| Ok("chore: bump deps\n\nbody".to_string()));

        let message = resolve_message(None, &editor).unwrap();
        assert_eq!(message, "chore: bump deps\n\nbody");
    }

    #[test]
    fn test_blank_editor_message_aborts() {
        let mut editor = MockCommitMessageEditor::new();
        editor.expect_compose().returning(|| Ok("  \n".to_string()));

        let err = resolve_message(Some("   "), &editor).unwrap_err();
        assert!(err.to_string().contains("empty commit message"));
    }

    #[test]
    fn test_editor_leaving_file_empty_aborts() {
        // Runs the real editor process outside any async runtime.
        let editor = ExternalEditor {
            editor: "true".to_string(),
        };
        let err = resolve_message(None, &editor).unwrap_err();
        assert!(err.to_string().contains("empty commit message"));
    }

    #[test]
    fn test_strip_comment_lines() {
        let raw = "feat(ui): add dark mode\n# Please enter the commit message\n\nDetails here\n# trailing";
        assert_eq!(strip_comment_lines(raw), "feat(ui): add dark mode\n\nDetails here");
    }
}
