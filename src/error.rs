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

//! Error types for commit rewording.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RewordError>;

/// Errors raised while reading history or rewriting commit messages.
#[derive(Debug, Error)]
pub enum RewordError {
    /// A log line could not be split into hash and message.
    #[error("invalid log line {line:?}: expected '<hash> <message>'")]
    Parse { line: String },

    /// Caller supplied inconsistent or empty arguments.
    #[error("invalid arguments: {0}")]
    Argument(String),

    /// One or more target commits are not part of the current history.
    #[error("commit(s) not found in history: {}", missing.join(", "))]
    NotFound { missing: Vec<String> },

    /// A git invocation exited unsuccessfully.
    #[error("git {} failed (exit code {code:?}): {stderr}", args.join(" "))]
    ExternalTool {
        args: Vec<String>,
        code: Option<i32>,
        stderr: String,
    },

    /// The rebase stopped before completing. The repository is left
    /// mid-rebase until the caller aborts it.
    #[error(
        "rewrite stopped after {applied} of {total} message(s) were applied; \
         resolve manually or abort the rewrite: {stderr}"
    )]
    RewriteFailed {
        applied: usize,
        total: usize,
        stderr: String,
    },

    /// The reword steps and the message queue disagree: the rebase either
    /// finished with messages left over or asked for one the queue lacked.
    #[error("rewrite plan and message queue disagree ({remaining} message(s) left unused)")]
    PlanMismatch { remaining: usize },

    /// A rebase is already running in the repository.
    #[error("a rebase is already in progress in {0}; abort it first")]
    RewriteInProgress(String),

    /// The selected range cannot be expressed as a linear todo list.
    #[error("unsupported history: {0}")]
    UnsupportedHistory(String),

    /// The message callback ran with nothing left to hand out.
    #[error("message queue is empty; more reword steps than queued messages")]
    QueueExhausted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Git2(#[from] git2::Error),
}
