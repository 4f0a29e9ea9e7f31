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

//! Editor callbacks run by git during a rewrite.
//!
//! git launches `GIT_SEQUENCE_EDITOR` once with the path of its todo file and
//! `GIT_EDITOR` once per `reword` step with the path of the message file.
//! Both are pointed at this crate's binary, which dispatches here. Each
//! invocation is a fresh process, so all state travels through the files
//! prepared by [`crate::rewrite`].

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::plan::MessageQueue;
use crate::{Result, RewordError};

/// Hidden subcommand git runs as the sequence editor.
pub const PLAN_SUBCOMMAND: &str = "inject-plan";
/// Hidden subcommand git runs as the commit message editor.
pub const MESSAGE_SUBCOMMAND: &str = "inject-message";

/// Replace git's default todo list at `todo_path` with the prepared plan.
pub fn inject_plan(plan_file: &Path, todo_path: &Path) -> Result<()> {
    let plan = fs::read_to_string(plan_file)?;
    fs::write(todo_path, plan)?;
    debug!(todo = %todo_path.display(), "injected rewrite plan");
    Ok(())
}

/// Hand the next queued message to git by writing it to `message_path`.
///
/// The queue is read whole, its head popped and the remainder stored back
/// before returning. An empty queue leaves `message_path` untouched and
/// fails with [`RewordError::QueueExhausted`].
pub fn inject_message(queue_file: &Path, message_path: &Path) -> Result<()> {
    let mut queue = MessageQueue::load(queue_file)?;
    let message = queue.pop().ok_or(RewordError::QueueExhausted)?;

    fs::write(message_path, &message)?;
    queue.store(queue_file)?;
    debug!(remaining = queue.len(), "injected commit message");
    Ok(())
}
