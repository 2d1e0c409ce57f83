//! Branch naming conventions
//!
//! Two conventions are supported and they are not interchangeable, so the
//! active one is always an explicit [`NamingConvention`] value:
//!
//! - `Story`: `W-<storyID>` optionally followed by `-<slug>` (`W-123-add-login`)
//! - `Typed`: `<type>/<description>` with type one of `feat`, `bugfix`, `chore`
//!   (`feat/story-456-chat-ui`)

use super::error::WorkflowError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const STORY_PREFIX: &str = "W-";

static STORY_BRANCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^W-([^-\s]+)(?:-(\S+))?$").expect("story branch pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NamingConvention {
    #[default]
    Story,
    Typed,
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingConvention::Story => f.write_str("story"),
            NamingConvention::Typed => f.write_str("typed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BranchType {
    Feat,
    Bugfix,
    Chore,
}

impl BranchType {
    pub const ALL: [BranchType; 3] = [BranchType::Feat, BranchType::Bugfix, BranchType::Chore];

    pub fn as_str(&self) -> &'static str {
        match self {
            BranchType::Feat => "feat",
            BranchType::Bugfix => "bugfix",
            BranchType::Chore => "chore",
        }
    }
}

impl fmt::Display for BranchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BranchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BranchType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("invalid branch type: {s}. Must be one of: feat, bugfix, chore"))
    }
}

/// Lower-case the description and turn spaces into hyphens.
pub fn slugify(description: &str) -> String {
    description.trim().to_lowercase().replace(' ', "-")
}

fn invalid(name: &str, reason: impl Into<String>) -> WorkflowError {
    WorkflowError::InvalidBranchName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

impl NamingConvention {
    /// Branch name for a story. An empty description yields the bare
    /// story-ID form.
    pub fn story_branch_name(&self, story_id: &str, description: &str) -> Result<String, WorkflowError> {
        let story_id = story_id.trim();
        let slug = slugify(description);

        let name = match (self, slug.is_empty()) {
            (NamingConvention::Story, true) => format!("{STORY_PREFIX}{story_id}"),
            (NamingConvention::Story, false) => format!("{STORY_PREFIX}{story_id}-{slug}"),
            (NamingConvention::Typed, true) => format!("{}/story-{story_id}", BranchType::Feat),
            (NamingConvention::Typed, false) => format!("{}/story-{story_id}-{slug}", BranchType::Feat),
        };

        if story_id.is_empty() {
            return Err(invalid(&name, "story ID cannot be empty"));
        }
        self.validate(&name)?;
        Ok(name)
    }

    pub fn typed_branch_name(kind: BranchType, description: &str) -> String {
        format!("{kind}/{description}")
    }

    pub fn validate(&self, name: &str) -> Result<(), WorkflowError> {
        match self {
            NamingConvention::Story => validate_story(name),
            NamingConvention::Typed => validate_typed(name),
        }
    }
}

fn validate_story(name: &str) -> Result<(), WorkflowError> {
    if !name.starts_with(STORY_PREFIX) {
        return Err(invalid(
            name,
            "branch name must follow the format: W-<storyID>[-description] (e.g., W-123-add-login)",
        ));
    }
    if STORY_BRANCH.is_match(name) {
        return Ok(());
    }

    let rest = &name[STORY_PREFIX.len()..];
    let (story_id, slug) = match rest.split_once('-') {
        Some((story_id, slug)) => (story_id, Some(slug)),
        None => (rest, None),
    };
    let reason = if story_id.is_empty() {
        "story ID cannot be empty"
    } else if story_id.chars().any(char::is_whitespace) {
        "story ID cannot contain whitespace"
    } else if slug.is_some_and(str::is_empty) {
        "description cannot be empty after the story ID"
    } else {
        "description cannot contain spaces"
    };
    Err(invalid(name, reason))
}

fn validate_typed(name: &str) -> Result<(), WorkflowError> {
    let parts: Vec<&str> = name.split('/').collect();
    if parts.len() != 2 {
        return Err(invalid(
            name,
            "branch name must follow the format: type/description (e.g., feat/login-button)",
        ));
    }
    parts[0].parse::<BranchType>().map_err(|reason| invalid(name, reason))?;
    if parts[1].is_empty() {
        return Err(invalid(name, "branch description cannot be empty"));
    }
    Ok(())
}
