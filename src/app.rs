// TUI application state management

use crate::Commit;

/// Which screen has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    CommitList,
    EditMessage,
    Help,
}

/// Severity of the footer message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Outcome of the last operation, shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

/// A confirmed message edit waiting to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRename {
    pub hash: String,
    pub message: String,
}

/// Application state for the TUI.
///
/// Commits are kept newest-first, as the log reports them, so index 0 is
/// HEAD and sits at the top of the list.
pub struct AppState {
    pub should_quit: bool,
    pub commits: Vec<Commit>,
    pub selection_index: usize,
    pub mode: AppMode,
    pub previous_mode: Option<AppMode>,
    /// Text being typed in the message dialog.
    pub input: String,
    pub status: Option<Status>,
    /// Rows available to the list in the last render, used for paging.
    pub commit_list_visible_height: usize,
}

impl AppState {
    /// Create a new AppState with default values.
    pub fn new() -> Self {
        Self {
            should_quit: false,
            commits: Vec::new(),
            selection_index: 0,
            mode: AppMode::CommitList,
            previous_mode: None,
            input: String::new(),
            status: None,
            commit_list_visible_height: 0,
        }
    }

    pub fn with_commits(commits: Vec<Commit>) -> Self {
        Self {
            commits,
            ..Self::new()
        }
    }

    pub fn selected_commit(&self) -> Option<&Commit> {
        self.commits.get(self.selection_index)
    }

    /// Move the selection towards HEAD.
    pub fn move_up(&mut self) {
        self.selection_index = self.selection_index.saturating_sub(1);
    }

    /// Move the selection towards the root commit.
    pub fn move_down(&mut self) {
        if self.selection_index + 1 < self.commits.len() {
            self.selection_index += 1;
        }
    }

    pub fn page_up(&mut self, page: usize) {
        self.selection_index = self.selection_index.saturating_sub(page.max(1));
    }

    pub fn page_down(&mut self, page: usize) {
        let last = self.commits.len().saturating_sub(1);
        self.selection_index = (self.selection_index + page.max(1)).min(last);
    }

    /// Replace the commit list, keeping the selection in range.
    pub fn set_commits(&mut self, commits: Vec<Commit>) {
        self.commits = commits;
        let last = self.commits.len().saturating_sub(1);
        self.selection_index = self.selection_index.min(last);
    }

    /// Open the message dialog for the selected commit, prefilled with its
    /// current message. Does nothing when the list is empty.
    pub fn begin_edit(&mut self) {
        if let Some(commit) = self.selected_commit() {
            self.input = commit.message.clone();
            self.mode = AppMode::EditMessage;
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    pub fn cancel_edit(&mut self) {
        self.input.clear();
        self.mode = AppMode::CommitList;
    }

    /// Close the dialog and hand back the edit to apply.
    ///
    /// Returns `None`, leaving the dialog open, while the input is blank.
    pub fn submit_edit(&mut self) -> Option<PendingRename> {
        let message = self.input.trim().to_string();
        if message.is_empty() {
            return None;
        }
        let hash = self.selected_commit()?.hash.clone();
        self.input.clear();
        self.mode = AppMode::CommitList;
        Some(PendingRename { hash, message })
    }

    pub fn toggle_help(&mut self) {
        if self.mode == AppMode::Help {
            self.close_help();
        } else {
            self.previous_mode = Some(self.mode);
            self.mode = AppMode::Help;
        }
    }

    pub fn close_help(&mut self) {
        self.mode = self.previous_mode.take().unwrap_or(AppMode::CommitList);
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
