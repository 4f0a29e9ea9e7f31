// Git invocation plumbing

#[cfg(test)]
pub(crate) mod fake;
mod process_impl;

pub use process_impl::ProcessRunner;

use std::path::{Path, PathBuf};

use crate::{Result, RewordError};

/// A fully described git invocation.
///
/// Holds the ordered argument list, an optional repository directory passed
/// as `-C`, per-invocation `-c key=value` overrides and environment
/// overrides. Arguments and environment keys are validated when the value is
/// built, so a runner never sees a malformed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    dir: Option<PathBuf>,
    config: Vec<(String, String)>,
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl GitCommand {
    pub fn new<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        if args.is_empty() {
            return Err(RewordError::Argument("git command without arguments".into()));
        }
        if let Some(bad) = args.iter().find(|a| a.contains('\0')) {
            return Err(RewordError::Argument(format!(
                "git argument contains a NUL byte: {bad:?}"
            )));
        }
        Ok(Self {
            dir: None,
            config: Vec::new(),
            args,
            env: Vec::new(),
        })
    }

    /// Run the command against the repository at `dir` (`git -C <dir>`).
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Add a one-shot configuration override (`git -c key=value`).
    pub fn with_config(mut self, key: &str, value: &str) -> Self {
        self.config.push((key.to_string(), value.to_string()));
        self
    }

    /// Add an environment variable for the spawned process only.
    pub fn with_env(mut self, key: &str, value: impl Into<String>) -> Result<Self> {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            return Err(RewordError::Argument(format!(
                "invalid environment variable name {key:?}"
            )));
        }
        self.env.push((key.to_string(), value.into()));
        Ok(self)
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// The subcommand arguments, without `-C`/`-c` prefixes.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    /// Look up an environment override by name.
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The complete argument vector handed to the git executable.
    pub fn full_args(&self) -> Vec<String> {
        let mut full = Vec::with_capacity(self.args.len() + 2 + self.config.len() * 2);
        if let Some(dir) = &self.dir {
            full.push("-C".to_string());
            full.push(dir.to_string_lossy().into_owned());
        }
        for (key, value) in &self.config {
            full.push("-c".to_string());
            full.push(format!("{key}={value}"));
        }
        full.extend(self.args.iter().cloned());
        full
    }
}

/// Captured result of one git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Convert a non-zero exit into [`RewordError::ExternalTool`].
    pub fn check(self, command: &GitCommand) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(RewordError::ExternalTool {
                args: command.full_args(),
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Executes git commands.
///
/// The production implementation is [`ProcessRunner`]; tests substitute a
/// recording fake so no subprocess is spawned.
pub trait CommandRunner {
    /// Run the command to completion. Only failure to launch is an error;
    /// a non-zero exit is reported through [`CommandOutput::code`].
    fn run(&self, command: &GitCommand) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &GitCommand) -> Result<CommandOutput> {
        (**self).run(command)
    }
}

/// Whether the repository containing `path` is in the middle of a rebase.
///
/// `path` may be any directory inside the work tree. Paths outside a
/// repository report `false`; the git invocation that follows surfaces the
/// real problem.
pub fn rebase_in_progress(path: &Path) -> bool {
    match git2::Repository::discover(path) {
        Ok(repo) => matches!(
            repo.state(),
            git2::RepositoryState::Rebase
                | git2::RepositoryState::RebaseInteractive
                | git2::RepositoryState::RebaseMerge
        ),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "could not open repository");
            false
        }
    }
}

/// Quote a string for the POSIX shell git uses to launch editors.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
