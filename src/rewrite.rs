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

//! Rewriting commit messages through `git rebase -i`.
//!
//! [`Rewriter`] is the entry point used by the CLI and the TUI. A rename
//! reads the log, selects the minimal range, builds the todo list and the
//! message queue, and then runs an interactive rebase whose two editors are
//! the injector subcommands of this crate's binary.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, error, info, warn};

use crate::batch::replace_in_messages;
use crate::git::{self, shell_quote, CommandRunner, GitCommand};
use crate::inject::{MESSAGE_SUBCOMMAND, PLAN_SUBCOMMAND};
use crate::plan::{build_plan, MessageQueue, RenameRequest, RewritePlan};
use crate::range::select_range;
use crate::{log, Commit, Result, RewordError, DEFAULT_ABBREV_LEN};

const PLAN_FILE: &str = "git-rebase-todo";
const QUEUE_FILE: &str = "messages.json";

/// Settings shared by every operation of a [`Rewriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewordConfig {
    /// Hash prefix length used to match targets against the log.
    pub abbrev_len: usize,
    /// Executable that implements the injector subcommands.
    pub injector: PathBuf,
}

impl RewordConfig {
    pub fn new(injector: impl Into<PathBuf>) -> Self {
        Self {
            abbrev_len: DEFAULT_ABBREV_LEN,
            injector: injector.into(),
        }
    }

    /// Configuration using the running executable as injector.
    pub fn from_current_exe() -> Result<Self> {
        Ok(Self::new(std::env::current_exe()?))
    }

    pub fn with_abbrev_len(mut self, abbrev_len: usize) -> Self {
        self.abbrev_len = abbrev_len;
        self
    }

    fn editor_command(&self, subcommand: &str, file: &Path) -> String {
        format!(
            "{} {} {}",
            shell_quote(&self.injector.to_string_lossy()),
            subcommand,
            shell_quote(&file.to_string_lossy())
        )
    }
}

/// Outcome of a completed rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Commits that received a new message.
    pub reworded: usize,
    /// Commits replayed by the rebase, reworded ones included.
    pub replayed: usize,
}

/// Lifecycle of a single rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    PlanBuilt,
    FilesWritten,
    RewriteRunning,
    Completed,
    Failed,
    CleanedUp,
}

impl Phase {
    /// Whether `next` may follow `self`. Every phase before the rebase
    /// starts may fail straight to cleanup.
    pub fn can_advance_to(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Idle, PlanBuilt)
                | (PlanBuilt, FilesWritten)
                | (FilesWritten, RewriteRunning)
                | (RewriteRunning, Completed)
                | (RewriteRunning, Failed)
                | (Completed, CleanedUp)
                | (Failed, CleanedUp)
                | (PlanBuilt, CleanedUp)
                | (FilesWritten, CleanedUp)
        )
    }
}

struct Session {
    phase: Phase,
}

impl Session {
    fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "invalid transition {:?} -> {:?}",
            self.phase,
            next
        );
        debug!(from = ?self.phase, to = ?next, "rewrite phase");
        self.phase = next;
    }
}

/// Reads history and rewrites commit messages in a repository.
pub struct Rewriter<R> {
    runner: R,
    config: RewordConfig,
}

impl<R: CommandRunner> Rewriter<R> {
    pub fn new(runner: R, config: RewordConfig) -> Self {
        Self { runner, config }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn config(&self) -> &RewordConfig {
        &self.config
    }

    /// Whether the git executable can be launched.
    pub fn check_tool_installed(&self) -> bool {
        let Ok(command) = GitCommand::new(["--version"]) else {
            return false;
        };
        match self.runner.run(&command) {
            Ok(output) => output.success(),
            Err(e) => {
                debug!(error = %e, "git is not available");
                false
            }
        }
    }

    /// Whether `path` is a directory inside a git work tree.
    pub fn is_valid_repository(&self, path: &Path) -> bool {
        if !path.is_dir() {
            return false;
        }
        let Ok(command) = GitCommand::new(["rev-parse", "--is-inside-work-tree"]) else {
            return false;
        };
        match self.runner.run(&command.in_dir(path)) {
            Ok(output) => output.success() && output.stdout.trim() == "true",
            Err(e) => {
                debug!(error = %e, "repository check failed");
                false
            }
        }
    }

    /// Whether a rebase is currently stopped in the repository at `path`.
    pub fn rewrite_in_progress(&self, path: &Path) -> bool {
        git::rebase_in_progress(path)
    }

    /// History of the repository at `path`, newest first.
    ///
    /// Fails when `path` does not exist. A failing log query yields an
    /// empty list.
    pub fn list_commits(&self, path: &Path) -> Result<Vec<Commit>> {
        if !path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("repository path {} does not exist", path.display()),
            )
            .into());
        }
        log::read_log(&self.runner, path, self.config.abbrev_len)
    }

    /// Give the commit `hash` the message `message`.
    pub fn rename_one(&self, path: &Path, hash: &str, message: &str) -> Result<RewriteSummary> {
        self.rename_many(path, &[hash], &[message])
    }

    /// Give each commit in `hashes` the message at the same position in
    /// `messages`, in a single rebase.
    ///
    /// Argument and lookup errors are raised before git is asked to change
    /// anything. If the rebase stops part-way the repository is left
    /// mid-rebase and [`RewordError::RewriteFailed`] is returned; call
    /// [`Rewriter::abort_rewrite`] to restore the original history. When git
    /// refuses to start (a dirty work tree, say) nothing is left to abort and
    /// the refusal comes back as [`RewordError::ExternalTool`].
    pub fn rename_many<H, M>(
        &self,
        path: &Path,
        hashes: &[H],
        messages: &[M],
    ) -> Result<RewriteSummary>
    where
        H: AsRef<str>,
        M: AsRef<str>,
    {
        let mut session = Session::new();
        let request = RenameRequest::from_pairs(hashes, messages, self.config.abbrev_len)?;

        let log = self.list_commits(path)?;
        let range = select_range(&log, request.targets(), self.config.abbrev_len)?;
        let (plan, queue) = build_plan(&range, &request);
        session.advance(Phase::PlanBuilt);

        let result = self.run_plan(&mut session, path, &plan, queue);
        if session.phase != Phase::CleanedUp {
            session.advance(Phase::CleanedUp);
        }
        result
    }

    /// Replace each of `words` with `replacement` in every commit message
    /// that contains it, rewriting all affected commits at once.
    pub fn replace_in_history<S: AsRef<str>>(
        &self,
        path: &Path,
        words: &[S],
        replacement: &str,
    ) -> Result<RewriteSummary> {
        let log = self.list_commits(path)?;
        let edits = replace_in_messages(&log, words, replacement)?;
        if edits.is_empty() {
            info!("no commit message matched; nothing to rewrite");
            return Ok(RewriteSummary::default());
        }

        let hashes: Vec<&str> = edits.iter().map(|e| e.hash.as_str()).collect();
        let messages: Vec<&str> = edits.iter().map(|e| e.new_message.as_str()).collect();
        self.rename_many(path, &hashes, &messages)
    }

    /// Cancel the rebase in progress and restore the pre-rewrite history.
    pub fn abort_rewrite(&self, path: &Path) -> Result<()> {
        let command = GitCommand::new(["rebase", "--abort"])?.in_dir(path);
        self.runner.run(&command)?.check(&command)?;
        info!(path = %path.display(), "aborted rewrite");
        Ok(())
    }

    fn run_plan(
        &self,
        session: &mut Session,
        path: &Path,
        plan: &RewritePlan,
        queue: MessageQueue,
    ) -> Result<RewriteSummary> {
        if self.rewrite_in_progress(path) {
            return Err(RewordError::RewriteInProgress(path.display().to_string()));
        }
        let base = self.rebase_base(path, plan)?;

        let workdir = tempfile::Builder::new().prefix("grw-").tempdir()?;
        let result = self.execute(session, path, plan, queue, base.as_deref(), &workdir);

        let location = workdir.path().to_path_buf();
        if let Err(e) = workdir.close() {
            error!(dir = %location.display(), error = %e, "failed to remove rewrite files");
        }
        session.advance(Phase::CleanedUp);
        result
    }

    /// Revision to pass to `git rebase -i`, `None` meaning `--root`.
    ///
    /// Also rejects ranges that contain merge commits, which a linear todo
    /// list would flatten or drop.
    fn rebase_base(&self, path: &Path, plan: &RewritePlan) -> Result<Option<String>> {
        let oldest = plan
            .oldest()
            .ok_or_else(|| RewordError::Argument("empty rewrite plan".into()))?;
        let parent = format!("{}^", oldest.hash());

        let probe =
            GitCommand::new(["rev-parse", "--verify", "--quiet", parent.as_str()])?.in_dir(path);
        let base = self.runner.run(&probe)?.success().then_some(parent);

        let span = match &base {
            Some(parent) => format!("{parent}..HEAD"),
            None => "HEAD".to_string(),
        };
        let merges = GitCommand::new(["rev-list", "--min-parents=2", "--count", span.as_str()])?
            .in_dir(path);
        let output = self.runner.run(&merges)?.check(&merges)?;
        let count: usize = output
            .stdout
            .trim()
            .parse()
            .map_err(|_| RewordError::ExternalTool {
                args: merges.full_args(),
                code: output.code,
                stderr: format!("unexpected merge count {:?}", output.stdout.trim()),
            })?;
        if count > 0 {
            return Err(RewordError::UnsupportedHistory(format!(
                "{count} merge commit(s) between {} and HEAD",
                oldest.hash()
            )));
        }
        Ok(base)
    }

    fn execute(
        &self,
        session: &mut Session,
        path: &Path,
        plan: &RewritePlan,
        queue: MessageQueue,
        base: Option<&str>,
        workdir: &TempDir,
    ) -> Result<RewriteSummary> {
        let plan_file = workdir.path().join(PLAN_FILE);
        let queue_file = workdir.path().join(QUEUE_FILE);
        std::fs::write(&plan_file, plan.to_string())?;
        queue.store(&queue_file)?;
        session.advance(Phase::FilesWritten);

        let total = queue.len();
        let command = GitCommand::new(["rebase", "-i", base.unwrap_or("--root")])?
            .in_dir(path)
            .with_config("commit.cleanup", "whitespace")
            .with_env(
                "GIT_SEQUENCE_EDITOR",
                self.config.editor_command(PLAN_SUBCOMMAND, &plan_file),
            )?
            .with_env(
                "GIT_EDITOR",
                self.config.editor_command(MESSAGE_SUBCOMMAND, &queue_file),
            )?;

        session.advance(Phase::RewriteRunning);
        info!(
            path = %path.display(),
            steps = plan.steps.len(),
            rewords = total,
            "starting rewrite"
        );
        let output = self.runner.run(&command);

        let remaining = match MessageQueue::load(&queue_file) {
            Ok(left) => left.len(),
            Err(e) => {
                warn!(error = %e, "could not read back message queue");
                total
            }
        };

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                session.advance(Phase::Failed);
                return Err(e);
            }
        };

        if !output.success() {
            session.advance(Phase::Failed);
            let stderr = output.stderr.trim().to_string();

            if remaining == 0 && stderr.contains(&RewordError::QueueExhausted.to_string()) {
                error!(total, "reword steps outnumbered queued messages");
                return Err(RewordError::PlanMismatch { remaining });
            }
            // git can refuse before replaying anything, e.g. on a dirty
            // work tree. There is nothing to abort then.
            if !self.rewrite_in_progress(path) {
                warn!(code = ?output.code, stderr = %stderr, "git refused to start the rewrite");
                return Err(RewordError::ExternalTool {
                    args: command.full_args(),
                    code: output.code,
                    stderr,
                });
            }

            let applied = total.saturating_sub(remaining);
            error!(applied, total, stderr = %stderr, "rewrite stopped");
            return Err(RewordError::RewriteFailed {
                applied,
                total,
                stderr,
            });
        }

        session.advance(Phase::Completed);
        if remaining > 0 {
            return Err(RewordError::PlanMismatch { remaining });
        }

        info!(reworded = total, "rewrite complete");
        Ok(RewriteSummary {
            reworded: total,
            replayed: plan.steps.len(),
        })
    }
}
