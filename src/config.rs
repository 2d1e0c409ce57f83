use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::workflow::{NamingConvention, WorkflowSettings};

/// Main configuration structure for story-flow
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StoryFlowConfig {
    /// Git invocation and workflow policy
    pub git: GitConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GitConfig {
    /// Git binary to invoke
    pub program: String,
    /// Remote every workflow talks to
    pub remote: String,
    /// Probed in order when resolving the default branch
    pub default_branch_candidates: Vec<String>,
    /// Branch naming convention (story or typed)
    pub naming_convention: NamingConvention,
    /// Upper bound for a single git invocation; unset waits forever
    pub command_timeout_seconds: Option<u64>,
    /// Repository to operate on; defaults to the current directory
    pub working_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            remote: "origin".to_string(),
            default_branch_candidates: vec!["main".to_string(), "master".to_string()],
            naming_convention: NamingConvention::Story,
            command_timeout_seconds: None,
            working_dir: None,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}

impl GitConfig {
    pub fn workflow_settings(&self) -> WorkflowSettings {
        WorkflowSettings {
            remote: self.remote.clone(),
            naming: self.naming_convention,
            default_branch_candidates: self.default_branch_candidates.clone(),
        }
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_seconds.map(Duration::from_secs)
    }
}

impl StoryFlowConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (story-flow.toml, .story-flow-rc, or an explicit path)
    /// 3. Environment variables (STORY_FLOW_GIT__REMOTE=upstream)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        match explicit {
            Some(path) => {
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
            }
            None => {
                if Path::new("story-flow.toml").exists() {
                    builder = builder.add_source(File::with_name("story-flow"));
                }
                if Path::new(".story-flow-rc").exists() {
                    builder = builder.add_source(File::new(".story-flow-rc", FileFormat::Toml));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("STORY_FLOW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to read configuration")?;
        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::debug!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}
