// story-flow library - story-driven git workflows
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod external;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use config::StoryFlowConfig;
pub use external::{CommandError, CommandExecutor, CommandOutput, GitClient, GitError, ProcessCommandExecutor};
pub use telemetry::{create_workflow_span, generate_correlation_id, init_telemetry};
pub use workflow::{
    BranchType, Divergence, NamingConvention, ResolveStrategy, SyncOutcome, WorkflowError, WorkflowManager,
    WorkflowSettings,
};
