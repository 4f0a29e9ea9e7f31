// Minimal rewrite range selection

use std::collections::BTreeSet;

use crate::{abbreviate, Commit, Result, RewordError};

/// Select the shortest newest-first prefix of `log` containing every target.
///
/// Walks from HEAD towards the root and stops at the oldest target, so
/// commits older than every target never take part in the rewrite. Targets
/// and log hashes are compared on their first `abbrev_len` characters.
/// Returns [`RewordError::NotFound`] naming every target absent from the
/// log.
pub fn select_range<'a, I, S>(
    log: &[Commit],
    targets: I,
    abbrev_len: usize,
) -> Result<Vec<Commit>>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    let mut pending: BTreeSet<String> = targets
        .into_iter()
        .map(|t| abbreviate(t.as_ref(), abbrev_len).to_string())
        .collect();

    let mut range = Vec::new();
    for commit in log {
        if pending.is_empty() {
            break;
        }
        pending.remove(commit.abbrev(abbrev_len));
        range.push(commit.clone());
    }

    if !pending.is_empty() {
        return Err(RewordError::NotFound {
            missing: pending.into_iter().collect(),
        });
    }
    Ok(range)
}
