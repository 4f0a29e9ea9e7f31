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

// Rebase todo list and message queue construction

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{abbreviate, Commit, Result, RewordError};

/// Requested new messages keyed by abbreviated commit hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    abbrev_len: usize,
    messages: BTreeMap<String, String>,
}

impl RenameRequest {
    /// Pair up `hashes` and `messages` position by position.
    ///
    /// Both sequences must have the same, non-zero length. When two hashes
    /// abbreviate to the same key, the later pair wins.
    pub fn from_pairs<H, M>(hashes: &[H], messages: &[M], abbrev_len: usize) -> Result<Self>
    where
        H: AsRef<str>,
        M: AsRef<str>,
    {
        if hashes.len() != messages.len() {
            return Err(RewordError::Argument(format!(
                "{} commit(s) but {} message(s)",
                hashes.len(),
                messages.len()
            )));
        }
        if hashes.is_empty() {
            return Err(RewordError::Argument("no commits to rename".into()));
        }

        let mut map = BTreeMap::new();
        for (hash, message) in hashes.iter().zip(messages) {
            let key = abbreviate(hash.as_ref(), abbrev_len).to_string();
            if let Some(previous) = map.insert(key.clone(), message.as_ref().to_string()) {
                warn!(hash = %key, discarded = %previous, "duplicate target; keeping the last message");
            }
        }

        Ok(Self {
            abbrev_len,
            messages: map,
        })
    }

    pub fn abbrev_len(&self) -> usize {
        self.abbrev_len
    }

    /// Abbreviated target hashes.
    pub fn targets(&self) -> impl Iterator<Item = &String> {
        self.messages.keys()
    }

    /// New message for `commit`, if it is a target.
    pub fn message_for(&self, commit: &Commit) -> Option<&str> {
        self.messages
            .get(commit.abbrev(self.abbrev_len))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// One todo list instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Replay the commit unchanged (`pick`).
    Keep { hash: String, message: String },
    /// Replay the commit and stop for a new message (`reword`).
    Reword { hash: String, message: String },
}

impl Step {
    pub fn verb(&self) -> &'static str {
        match self {
            Step::Keep { .. } => "pick",
            Step::Reword { .. } => "reword",
        }
    }

    pub fn hash(&self) -> &str {
        match self {
            Step::Keep { hash, .. } | Step::Reword { hash, .. } => hash,
        }
    }

    pub fn is_reword(&self) -> bool {
        matches!(self, Step::Reword { .. })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Step::Keep { hash, message } | Step::Reword { hash, message }) = self;
        write!(f, "{} {} {}", self.verb(), hash, message)
    }
}

/// Oldest-first todo list for `git rebase -i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewritePlan {
    pub steps: Vec<Step>,
}

impl RewritePlan {
    /// The commit the rebase starts from: the oldest step.
    pub fn oldest(&self) -> Option<&Step> {
        self.steps.first()
    }

    pub fn reword_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_reword()).count()
    }
}

impl fmt::Display for RewritePlan {
    /// One instruction per line, in the format git reads back from the
    /// todo file.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }
        Ok(())
    }
}

/// Replacement messages in the order the reword steps will ask for them.
///
/// Persisted as a JSON array of strings. Each pop rewrites the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageQueue(VecDeque<String>);

impl MessageQueue {
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push_back(message.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.0.pop_front()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Replace the file at `path` with this queue.
    ///
    /// Written to a temporary sibling first and renamed into place, so an
    /// interrupted write never leaves a truncated queue behind.
    pub fn store(&self, path: &Path) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut tmp, self)?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for MessageQueue {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Turn a newest-first range into an oldest-first plan and its queue.
///
/// Commits named in `request` become `reword` steps, all others `pick`.
/// The queue receives one message per reword step in plan order, so the
/// i-th reword consumes the i-th message regardless of the order the caller
/// listed the targets in.
pub fn build_plan(range: &[Commit], request: &RenameRequest) -> (RewritePlan, MessageQueue) {
    let mut plan = RewritePlan::default();
    let mut queue = MessageQueue::default();

    for commit in range.iter().rev() {
        let hash = commit.hash.clone();
        let message = commit.message.clone();
        match request.message_for(commit) {
            Some(new_message) => {
                queue.push(new_message);
                plan.steps.push(Step::Reword { hash, message });
            }
            None => plan.steps.push(Step::Keep { hash, message }),
        }
    }

    (plan, queue)
}
