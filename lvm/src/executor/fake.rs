use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{Error, Executor, Result};

#[derive(Default)]
struct Script {
    responses: VecDeque<Result<String>>,
    executions: Vec<Vec<String>>,
}

/// `FakeExecutor` records every argument vector it receives and answers with
/// scripted responses, in order. Once the script runs out it answers with an empty
/// successful output.
///
/// Clones share the same script, so a test can keep a handle after giving one to a
/// `VolumeManager`.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    script: Arc<Mutex<Script>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful invocation printing `output`.
    pub fn succeed(self, output: &str) -> Self {
        self.push(Ok(output.to_string()))
    }

    /// Queue a failed invocation exiting with `code` after printing `output`.
    pub fn fail(self, code: i32, output: &str) -> Self {
        self.push(Err(Error::Exit {
            code: Some(code),
            output: output.to_string(),
        }))
    }

    fn push(self, response: Result<String>) -> Self {
        self.script.lock().unwrap().responses.push_back(response);
        self
    }

    /// Every argument vector executed so far.
    pub fn executions(&self) -> Vec<Vec<String>> {
        self.script.lock().unwrap().executions.clone()
    }
}

impl Executor for FakeExecutor {
    fn exec_combined_output(&self, args: &[String]) -> Result<String> {
        let mut script = self.script.lock().unwrap();
        script.executions.push(args.to_vec());
        script
            .responses
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

/// Build an argument vector from string literals.
pub fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}
