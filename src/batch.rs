// Find/replace over commit messages

use crate::{Commit, Result, RewordError};

/// A commit whose message changes under a find/replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEdit {
    pub hash: String,
    pub old_message: String,
    pub new_message: String,
}

/// Compute the message edits produced by replacing every occurrence of each
/// word in `words` with `replacement`.
///
/// A word only applies to messages that contained it before any replacement
/// was made. Commits whose message ends up unchanged are left out. The
/// result keeps the log's newest-first order.
pub fn replace_in_messages<S: AsRef<str>>(
    log: &[Commit],
    words: &[S],
    replacement: &str,
) -> Result<Vec<MessageEdit>> {
    if words.is_empty() {
        return Err(RewordError::Argument("no words to replace".into()));
    }
    if words.iter().any(|w| w.as_ref().is_empty()) {
        return Err(RewordError::Argument("cannot replace an empty word".into()));
    }

    let edits = log
        .iter()
        .filter_map(|commit| {
            let new_message = words
                .iter()
                .map(|word| word.as_ref())
                .filter(|word| commit.message.contains(word))
                .fold(commit.message.clone(), |message, word| {
                    message.replace(word, replacement)
                });

            (new_message != commit.message).then(|| MessageEdit {
                hash: commit.hash.clone(),
                old_message: commit.message.clone(),
                new_message,
            })
        })
        .collect();

    Ok(edits)
}
