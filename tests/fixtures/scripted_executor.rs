/// Command executor that replays canned git outputs and records every call
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use story_flow::{CommandError, CommandExecutor, CommandOutput};

#[derive(Default)]
pub struct ScriptedExecutor {
    responses: Mutex<HashMap<String, VecDeque<Result<CommandOutput, CommandError>>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `git <args>`. Repeated calls to the same
    /// command consume queued responses in order.
    pub fn on(self, args: &[&str], status_code: i32, stdout: &str, stderr: &str) -> Self {
        self.push(
            args,
            Ok(CommandOutput {
                status_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }),
        )
    }

    pub fn ok(self, args: &[&str]) -> Self {
        self.on(args, 0, "", "")
    }

    pub fn on_error(self, args: &[&str], error: CommandError) -> Self {
        self.push(args, Err(error))
    }

    fn push(self, args: &[&str], response: Result<CommandOutput, CommandError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(args.join(" "))
            .or_default()
            .push_back(response);
        self
    }

    /// Every invocation so far, as space-joined git arguments
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls_starting_with(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|call| call.starts_with(prefix)).count()
    }

    pub fn called(&self, args: &[&str]) -> bool {
        let wanted = args.join(" ");
        self.calls().iter().any(|call| *call == wanted)
    }

    /// True when nothing that can move HEAD or touch the working tree ran
    pub fn no_mutating_calls(&self) -> bool {
        const MUTATING: &[&str] = &["pull", "rebase", "merge", "reset", "checkout", "commit", "revert"];
        !self
            .calls()
            .iter()
            .any(|call| MUTATING.iter().any(|verb| call.split(' ').next() == Some(*verb)))
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        assert_eq!(program, "git", "only git is ever invoked");
        let key = args.join(" ");
        self.calls.lock().unwrap().push(key.clone());

        self.responses
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| {
                Err(CommandError::ExecutionFailed {
                    message: format!("unscripted command: git {key}"),
                })
            })
    }
}
