/// Real git repositories in a temporary directory: a bare `origin`, a
/// working clone and an optional teammate clone pushing to the same origin.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use story_flow::{GitClient, ProcessCommandExecutor, WorkflowManager, WorkflowSettings};
use tempfile::TempDir;

pub struct GitSandbox {
    _root: TempDir,
    pub origin: PathBuf,
    pub work: PathBuf,
    root_path: PathBuf,
}

pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git is installed");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn configure_identity(dir: &Path) {
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
    git(dir, &["config", "tag.gpgsign", "false"]);
}

impl GitSandbox {
    /// Origin with one commit on `main`, cloned into `work`
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let root_path = root.path().to_path_buf();

        let seed = root_path.join("seed");
        fs::create_dir_all(&seed).unwrap();
        git(&seed, &["init", "--quiet"]);
        git(&seed, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        configure_identity(&seed);
        fs::write(seed.join("README.md"), "# Sandbox\n").unwrap();
        git(&seed, &["add", "README.md"]);
        git(&seed, &["commit", "--quiet", "-m", "initial commit"]);

        let origin = root_path.join("origin.git");
        git(&root_path, &["clone", "--quiet", "--bare", "seed", "origin.git"]);

        let work = root_path.join("work");
        git(&root_path, &["clone", "--quiet", "origin.git", "work"]);
        configure_identity(&work);

        Self {
            _root: root,
            origin,
            work,
            root_path,
        }
    }

    /// Another clone of origin, as a teammate would have
    pub fn teammate(&self) -> PathBuf {
        let path = self.root_path.join("teammate");
        if !path.exists() {
            git(&self.root_path, &["clone", "--quiet", "origin.git", "teammate"]);
            configure_identity(&path);
        }
        path
    }

    pub fn commit_file(dir: &Path, file: &str, contents: &str, message: &str) {
        fs::write(dir.join(file), contents).unwrap();
        git(dir, &["add", file]);
        git(dir, &["commit", "--quiet", "-m", message]);
    }

    pub fn head(&self) -> String {
        git(&self.work, &["rev-parse", "HEAD"])
    }

    pub fn manager(&self, settings: WorkflowSettings) -> WorkflowManager {
        let executor = ProcessCommandExecutor::new().with_working_dir(&self.work);
        WorkflowManager::new(GitClient::new(Arc::new(executor)), settings)
    }
}
