use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use story_flow::cli::commands::{
    branch::{BranchCommand, CheckBranchCommand, PullRequestCommand},
    checkin::{resolve_message, CheckinCommand, ExternalEditor},
    example::ExampleCommand,
    history::{RevertCommand, UndoCommand},
    show_how_to_get_started,
    story::{StoryCommitCommand, StoryPushCommand, StoryStartCommand},
    sync::{ResolveCommand, SyncCommand},
    tag::{PushTagsCommand, TagCommand},
};
use story_flow::cli::{Cli, Commands};
use story_flow::{
    init_telemetry, GitClient, ProcessCommandExecutor, ResolveStrategy, StoryFlowConfig, WorkflowManager,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    StoryFlowConfig::load_env_file()?;
    let mut config = StoryFlowConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        config.observability.log_level = "debug".to_string();
    }
    if cli.json_logs {
        config.observability.json_logs = true;
    }
    if let Some(convention) = cli.convention {
        config.git.naming_convention = convention;
    }

    init_telemetry(&config.observability)?;

    let mut executor = ProcessCommandExecutor::new();
    if let Some(dir) = &config.git.working_dir {
        executor = executor.with_working_dir(dir);
    }
    if let Some(timeout) = config.git.command_timeout() {
        executor = executor.with_timeout(timeout);
    }
    let git = GitClient::with_program(Arc::new(executor), config.git.program.clone());
    let manager = WorkflowManager::new(git, config.git.workflow_settings());

    // Git invocations against one working tree must not overlap, so a
    // single-threaded runtime is all this needs.
    // $EDITOR blocks on the terminal, so the check-in message is settled
    // before the runtime starts.
    let command = match cli.command {
        Some(Commands::Checkin { all, message, no_push }) => {
            let message = resolve_message(message.as_deref(), &ExternalEditor::from_env())?;
            Some(Commands::Checkin {
                all,
                message: Some(message),
                no_push,
            })
        }
        other => other,
    };

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(dispatch(command, &manager))
}

async fn dispatch(command: Option<Commands>, manager: &WorkflowManager) -> Result<()> {
    match command {
        None => {
            show_how_to_get_started();
            Ok(())
        }
        Some(Commands::StoryStart { id, description }) => {
            StoryStartCommand { story_id: id, description }.execute(manager).await
        }
        Some(Commands::StoryCommit { scope, description }) => {
            StoryCommitCommand { scope, description }.execute(manager).await
        }
        Some(Commands::StoryPush) => StoryPushCommand.execute(manager).await,
        Some(Commands::Undo { hard }) => UndoCommand { hard }.execute(manager).await,
        Some(Commands::Revert { commit }) => RevertCommand { commit }.execute(manager).await,
        Some(Commands::Tag { version, message, push }) => {
            TagCommand { version, message, push }.execute(manager).await
        }
        Some(Commands::PushTags) => PushTagsCommand.execute(manager).await,
        Some(Commands::Sync { main }) => SyncCommand { main }.execute(manager).await,
        Some(Commands::Resolve { rebase }) => {
            let strategy = if rebase { ResolveStrategy::Rebase } else { ResolveStrategy::Merge };
            ResolveCommand { strategy }.execute(manager).await
        }
        Some(Commands::Branch { name, kind, description }) => {
            BranchCommand { name, kind, description }.execute(manager).await
        }
        Some(Commands::Pr { branch }) => PullRequestCommand { branch }.execute(manager).await,
        Some(Commands::CheckBranch { name }) => CheckBranchCommand { name }.execute(manager),
        Some(Commands::Checkin { all, message, no_push }) => {
            let message = message.unwrap_or_default();
            CheckinCommand { stage_all: all, message, no_push }.execute(manager).await
        }
        Some(Commands::Example) => ExampleCommand { naming: manager.settings().naming }.execute(),
    }
}
