// Copyright 2026 Thomas Johannesson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Recording runner for unit tests

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::Result;

use super::{CommandOutput, CommandRunner, GitCommand};

type Handler = Box<dyn Fn(&GitCommand) -> CommandOutput>;

/// Answers git commands from canned outputs keyed by subcommand and records
/// every call it receives.
#[derive(Default)]
pub struct FakeRunner {
    canned: RefCell<HashMap<String, VecDeque<CommandOutput>>>,
    handlers: HashMap<String, Handler>,
    calls: RefCell<Vec<GitCommand>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an output for the next call of `subcommand`. Calls without a
    /// queued output succeed with empty output.
    pub fn respond(self, subcommand: &str, output: CommandOutput) -> Self {
        self.canned
            .borrow_mut()
            .entry(subcommand.to_string())
            .or_default()
            .push_back(output);
        self
    }

    /// Compute the output for `subcommand` with a closure, e.g. to play the
    /// part of git calling the editor hooks.
    pub fn handle(
        mut self,
        subcommand: &str,
        handler: impl Fn(&GitCommand) -> CommandOutput + 'static,
    ) -> Self {
        self.handlers
            .insert(subcommand.to_string(), Box::new(handler));
        self
    }

    pub fn calls(&self) -> Vec<GitCommand> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls whose first argument is `subcommand`.
    pub fn count(&self, subcommand: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.args()[0] == subcommand)
            .count()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &GitCommand) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(command.clone());
        let subcommand = &command.args()[0];

        if let Some(handler) = self.handlers.get(subcommand) {
            return Ok(handler(command));
        }
        let queued = self
            .canned
            .borrow_mut()
            .get_mut(subcommand)
            .and_then(VecDeque::pop_front);
        Ok(queued.unwrap_or_else(|| ok("")))
    }
}

pub fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

pub fn failed(code: i32, stderr: &str) -> CommandOutput {
    CommandOutput {
        code: Some(code),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}
