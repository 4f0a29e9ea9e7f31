// Commit log reading

use std::path::Path;

use tracing::warn;

use crate::git::{CommandRunner, GitCommand};
use crate::{Commit, Result};

/// Read the history of the repository at `path`, newest first.
///
/// Asks git for one `"<hash> <subject>"` line per commit, with hashes
/// abbreviated to at least `abbrev_len` characters (git extends them when a
/// prefix would be ambiguous). A query that exits unsuccessfully yields an
/// empty list, so an empty result means either "no commits" or "query
/// failed". Only a failure to launch git is returned as an error.
pub fn read_log(
    runner: &impl CommandRunner,
    path: &Path,
    abbrev_len: usize,
) -> Result<Vec<Commit>> {
    let command = GitCommand::new([
        "log".to_string(),
        format!("--abbrev={abbrev_len}"),
        "--pretty=format:%h %s".to_string(),
    ])?
    .in_dir(path);

    let output = runner.run(&command)?;
    if !output.success() {
        warn!(
            path = %path.display(),
            code = ?output.code,
            stderr = %output.stderr.trim(),
            "log query failed; treating history as empty"
        );
        return Ok(Vec::new());
    }

    Ok(parse_log(&output.stdout))
}

/// Parse log output line by line, skipping lines that are not
/// `"<hash> <message>"`.
pub fn parse_log(stdout: &str) -> Vec<Commit> {
    stdout
        .lines()
        .filter_map(|line| match line.parse::<Commit>() {
            Ok(commit) => Some(commit),
            Err(e) => {
                warn!("skipping log line: {e}");
                None
            }
        })
        .collect()
}
