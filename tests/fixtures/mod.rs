//! Shared fixtures for workflow integration tests

#![allow(dead_code, unused_imports)]

pub mod git_sandbox;
pub mod scripted_executor;

use std::sync::Arc;
use story_flow::{GitClient, NamingConvention, WorkflowManager, WorkflowSettings};

pub use scripted_executor::ScriptedExecutor;

/// Manager over a scripted executor with default settings and the given
/// naming convention
pub fn scripted_manager(executor: &Arc<ScriptedExecutor>, naming: NamingConvention) -> WorkflowManager {
    let settings = WorkflowSettings {
        naming,
        ..WorkflowSettings::default()
    };
    WorkflowManager::new(GitClient::new(executor.clone()), settings)
}
