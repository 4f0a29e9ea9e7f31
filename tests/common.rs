use git2::{Repository, Signature};
use git_reword::git::ProcessRunner;
use git_reword::rewrite::{RewordConfig, Rewriter};
use git_reword::Commit;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Shared git repository fixture for integration tests.
///
/// Keeps a `git2::Repository` for low-level setup and inspection, and
/// exposes [`rewriter()`][TestRepo::rewriter] to obtain a `Rewriter` that
/// drives the real git executable with this crate's binary as editor.
pub struct TestRepo {
    pub _temp_dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();

        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
        config.set_bool("commit.gpgsign", false).unwrap();

        Self {
            _temp_dir: temp_dir,
            repo,
        }
    }

    pub fn path(&self) -> &Path {
        self._temp_dir.path()
    }

    /// A `Rewriter` using the built `grw` binary as injector.
    pub fn rewriter(&self) -> Rewriter<ProcessRunner> {
        Rewriter::new(
            ProcessRunner::default(),
            RewordConfig::new(env!("CARGO_BIN_EXE_grw")),
        )
    }

    pub fn commit_file(&self, path: &str, content: &str, message: &str) -> git2::Oid {
        let repo_path = self.repo.workdir().unwrap();
        let file_path = repo_path.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        fs::write(&file_path, content).unwrap();

        let mut index = self.repo.index().unwrap();
        index.add_path(std::path::Path::new(path)).unwrap();
        index.write().unwrap();

        let tree_oid = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_oid).unwrap();

        let sig = Signature::now("Test User", "test@example.com").unwrap();

        let parent_commit = if let Ok(head) = self.repo.head() {
            Some(self.repo.find_commit(head.target().unwrap()).unwrap())
        } else {
            None
        };

        let parents: Vec<&git2::Commit> = parent_commit.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    /// Commit `count` changes to one file, returning their OIDs oldest first.
    #[allow(dead_code)]
    pub fn commit_series(&self, count: usize) -> Vec<git2::Oid> {
        (1..=count)
            .map(|i| self.commit_file("file.txt", &format!("v{i}\n"), &format!("Commit {i}")))
            .collect()
    }

    /// OIDs reachable from HEAD, newest first.
    #[allow(dead_code)]
    pub fn history(&self) -> Vec<git2::Oid> {
        let mut revwalk = self.repo.revwalk().unwrap();
        revwalk.push_head().unwrap();
        revwalk.map(|oid| oid.unwrap()).collect()
    }

    /// Commit subjects reachable from HEAD, newest first.
    #[allow(dead_code)]
    pub fn subjects(&self) -> Vec<String> {
        self.history()
            .into_iter()
            .map(|oid| {
                let commit = self.repo.find_commit(oid).unwrap();
                commit.summary().unwrap_or("").to_string()
            })
            .collect()
    }

    /// Install an executable hook script (Unix only).
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn install_hook(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let hooks = self.repo.path().join("hooks");
        fs::create_dir_all(&hooks).unwrap();
        let hook = hooks.join(name);
        fs::write(&hook, script).unwrap();
        fs::set_permissions(&hook, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

/// Abbreviated form of `oid`, as the log reports it.
#[allow(dead_code)]
pub fn short(oid: git2::Oid) -> String {
    oid.to_string()[..7].to_string()
}

/// Whether the git executable is available; rewrite tests skip otherwise.
#[allow(dead_code)]
pub fn git_available() -> bool {
    let found = Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    if !found {
        eprintln!("git not found on PATH; skipping");
    }
    found
}

#[allow(dead_code)]
pub fn create_test_commit(hash: &str, message: &str) -> Commit {
    Commit::new(hash, message)
}
