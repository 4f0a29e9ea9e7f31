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

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::Result;

use super::{CommandOutput, CommandRunner, GitCommand};

/// Concrete runner that spawns the git executable as a subprocess.
///
/// Construct with [`ProcessRunner::new`]; then use through the
/// [`CommandRunner`] trait.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
}

impl ProcessRunner {
    /// Runner for the given git executable (a bare name is looked up on
    /// `PATH`).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &GitCommand) -> Result<CommandOutput> {
        let args = command.full_args();
        debug!(program = %self.program.display(), args = ?args, "running git");

        let mut cmd = Command::new(&self.program);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in command.env() {
            cmd.env(key, value);
        }

        let output = cmd.output()?;
        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.success() {
            debug!(code = ?result.code, stderr = %result.stderr.trim(), "git exited unsuccessfully");
        }
        Ok(result)
    }
}
