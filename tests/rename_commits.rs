// End-to-end rewrites against real repositories.

mod common;

use git_reword::RewordError;

#[test]
fn rename_one_rewrites_only_the_target_message() {
    if !common::git_available() {
        return;
    }
    let test = common::TestRepo::new();
    let oids = test.commit_series(4);

    let summary = test
        .rewriter()
        .rename_one(test.path(), &common::short(oids[1]), "Renamed second")
        .unwrap();

    assert_eq!(summary.reworded, 1);
    assert_eq!(summary.replayed, 3);
    assert_eq!(
        test.subjects(),
        ["Commit 4", "Commit 3", "Renamed second", "Commit 1"]
    );

    // Commits older than the target are untouched.
    let history = test.history();
    assert_eq!(history[3], oids[0]);
    assert_ne!(history[2], oids[1]);
}

#[test]
fn rename_keeps_tree_content() {
    if !common::git_available() {
        return;
    }
    let test = common::TestRepo::new();
    let oids = test.commit_series(3);
    let tree_before = test.repo.find_commit(oids[2]).unwrap().tree_id();

    test.rewriter()
        .rename_one(test.path(), &common::short(oids[1]), "Message only")
        .unwrap();

    let head = test.history()[0];
    assert_eq!(test.repo.find_commit(head).unwrap().tree_id(), tree_before);
}

#[test]
fn rename_to_same_message_leaves_older_history_alone() {
    if !common::git_available() {
        return;
    }
    let test = common::TestRepo::new();
    let oids = test.commit_series(3);

    test.rewriter()
        .rename_one(test.path(), &common::short(oids[1]), "Commit 2")
        .unwrap();

    assert_eq!(test.subjects(), ["Commit 3", "Commit 2", "Commit 1"]);
    assert_eq!(test.history()[2], oids[0]);
}

#[test]
fn batch_rename_applies_messages_regardless_of_caller_order() {
    if !common::git_available() {
        return;
    }
    let test = common::TestRepo::new();
    let oids = test.commit_series(4);

    let summary = test
        .rewriter()
        .rename_many(
            test.path(),
            &[common::short(oids[2]), common::short(oids[0])],
            &["New third", "New first"],
        )
        .unwrap();

    assert_eq!(summary.reworded, 2);
    assert_eq!(summary.replayed, 4);
    assert_eq!(
        test.subjects(),
        ["Commit 4", "New third", "Commit 2", "New first"]
    );
}

#[test]
fn rename_root_commit() {
    if !common::git_available() {
        return;
    }
    let test = common::TestRepo::new();
    let oids = test.commit_series(2);

    test.rewriter()
        .rename_one(test.path(), &common::short(oids[0]), "Initial import")
        .unwrap();

    assert_eq!(test.subjects(), ["Commit 2", "Initial import"]);
}

#[test]
fn message_starting_with_hash_sign_is_kept() {
    if !common::git_available() {
        return;
    }
    let test = common::TestRepo::new();
    let oids = test.commit_series(2);

    test.rewriter()
        .rename_one(test.path(), &common::short(oids[1]), "#42 fix the parser")
        .unwrap();

    assert_eq!(test.subjects(), ["#42 fix the parser", "Commit 1"]);
}

#[test]
fn replace_in_history_rewords_matching_commits() {
    if !common::git_available() {
        return;
    }
    let test = common::TestRepo::new();
    test.commit_file("a.txt", "a", "wip: add a");
    test.commit_file("b.txt", "b", "Add b");
    test.commit_file("c.txt", "c", "wip: add c");

    let summary = test
        .rewriter()
        .replace_in_history(test.path(), &["wip"], "feat")
        .unwrap();

    assert_eq!(summary.reworded, 2);
    assert_eq!(test.subjects(), ["feat: add c", "Add b", "feat: add a"]);
}

#[test]
fn mismatched_lengths_change_nothing() {
    if !common::git_available() {
        return;
    }
    let test = common::TestRepo::new();
    let oids = test.commit_series(3);
    let before = test.history();

    let err = test
        .rewriter()
        .rename_many(
            test.path(),
            &[common::short(oids[0]), common::short(oids[1]), common::short(oids[2])],
            &["a", "b"],
        )
        .unwrap_err();

    assert!(matches!(err, RewordError::Argument(_)));
    assert_eq!(test.history(), before);
}

#[test]
fn unknown_hash_changes_nothing() {
    if !common::git_available() {
        return;
    }
    let test = common::TestRepo::new();
    test.commit_series(2);
    let before = test.history();

    let err = test
        .rewriter()
        .rename_one(test.path(), "0000000", "Nope")
        .unwrap_err();

    assert!(matches!(err, RewordError::NotFound { .. }));
    assert_eq!(test.history(), before);
}

#[cfg(unix)]
#[test]
fn failed_rewrite_stops_and_abort_restores_history() {
    if !common::git_available() {
        return;
    }
    let test = common::TestRepo::new();
    let oids = test.commit_series(3);
    let before = test.history();
    test.install_hook("commit-msg", "#!/bin/sh\necho 'rejected by hook' >&2\nexit 1\n");

    let rewriter = test.rewriter();
    let err = rewriter
        .rename_one(test.path(), &common::short(oids[1]), "Will not stick")
        .unwrap_err();

    match err {
        RewordError::RewriteFailed { applied, total, .. } => {
            assert_eq!(total, 1);
            assert!(applied <= total);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(rewriter.rewrite_in_progress(test.path()));
    let sub = test.path().join("sub");
    std::fs::create_dir(&sub).unwrap();
    assert!(rewriter.rewrite_in_progress(&sub));

    // A second rewrite is refused while the first is stopped, from anywhere
    // in the work tree.
    for dir in [test.path(), sub.as_path()] {
        let err = rewriter
            .rename_one(dir, &common::short(oids[0]), "Also no")
            .unwrap_err();
        assert!(matches!(err, RewordError::RewriteInProgress(_)));
    }

    rewriter.abort_rewrite(test.path()).unwrap();
    assert!(!rewriter.rewrite_in_progress(test.path()));
    assert_eq!(test.history(), before);
}

#[test]
fn dirty_work_tree_is_refused_without_stopping() {
    if !common::git_available() {
        return;
    }
    let test = common::TestRepo::new();
    let oids = test.commit_series(3);
    test.repo
        .config()
        .unwrap()
        .set_bool("rebase.autoStash", false)
        .unwrap();
    std::fs::write(test.path().join("file.txt"), "uncommitted\n").unwrap();
    let before = test.history();

    let rewriter = test.rewriter();
    let err = rewriter
        .rename_one(test.path(), &common::short(oids[1]), "Not now")
        .unwrap_err();

    assert!(matches!(err, RewordError::ExternalTool { .. }), "{err:?}");
    assert!(!rewriter.rewrite_in_progress(test.path()));
    assert_eq!(test.history(), before);
}

#[test]
fn abort_without_rewrite_is_an_error() {
    if !common::git_available() {
        return;
    }
    let test = common::TestRepo::new();
    test.commit_series(1);

    let err = test.rewriter().abort_rewrite(test.path()).unwrap_err();

    assert!(matches!(err, RewordError::ExternalTool { .. }));
}
