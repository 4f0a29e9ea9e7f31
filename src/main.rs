// Command line and TUI entry point

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use git_reword::{
    app::{AppMode, AppState},
    batch, event, inject, logging,
    git::ProcessRunner,
    rewrite::{RewordConfig, Rewriter},
    views, RewordError,
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Rewrite commit messages in git history without driving a rebase by hand.
#[derive(Parser)]
#[command(name = "grw", version)]
struct Cli {
    /// Repository to operate on.
    #[arg(short = 'C', long, global = true, default_value = ".")]
    repo: PathBuf,

    /// Git executable to run.
    #[arg(long, global = true, env = "GRW_GIT", default_value = "git")]
    git: PathBuf,

    /// Number of hash characters used to match commits.
    #[arg(
        long,
        global = true,
        env = "GRW_ABBREV",
        default_value_t = 7,
        value_parser = clap::value_parser!(u16).range(4..=40)
    )]
    abbrev: u16,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Browse commits and reword them interactively (default).
    Tui,
    /// List commits, newest first.
    List,
    /// Give one commit a new message.
    Reword {
        /// Commit hash (abbreviated or full).
        hash: String,
        /// The new commit message.
        message: String,
    },
    /// Give several commits new messages in a single rewrite.
    Batch {
        /// Commit hashes, paired in order with --message.
        #[arg(long = "hash", required = true, num_args = 1..)]
        hashes: Vec<String>,
        /// New messages, paired in order with --hash.
        #[arg(long = "message", required = true, num_args = 1..)]
        messages: Vec<String>,
    },
    /// Replace words in every commit message that contains them.
    Replace {
        /// Words to replace.
        #[arg(required = true)]
        words: Vec<String>,
        /// Replacement text.
        #[arg(long = "with")]
        replacement: String,
        /// Only show which messages would change.
        #[arg(long)]
        dry_run: bool,
    },
    /// Abort a rewrite that stopped part-way.
    Abort,
    /// Report git availability and repository state.
    Check,
    #[command(name = "inject-plan", hide = true)]
    InjectPlan { plan: PathBuf, todo: PathBuf },
    #[command(name = "inject-message", hide = true)]
    InjectMessage { queue: PathBuf, target: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Tui);

    // Logging to stderr would draw over the alternate screen.
    let interactive = matches!(command, Command::Tui);
    if !interactive || std::env::var_os("RUST_LOG").is_some() {
        logging::init(logging::level_for(cli.verbose))?;
    }

    match command {
        Command::InjectPlan { plan, todo } => {
            return inject::inject_plan(&plan, &todo).context("Failed to inject rewrite plan");
        }
        Command::InjectMessage { queue, target } => {
            return inject::inject_message(&queue, &target)
                .context("Failed to inject commit message");
        }
        _ => {}
    }

    let config = RewordConfig::from_current_exe()
        .context("Failed to locate the grw executable")?
        .with_abbrev_len(cli.abbrev as usize);
    let rewriter = Rewriter::new(ProcessRunner::new(&cli.git), config);
    let repo = cli.repo.as_path();

    match command {
        Command::Tui => run_tui(&rewriter, repo),
        Command::List => {
            let commits = rewriter.list_commits(repo)?;
            if commits.is_empty() {
                eprintln!("No commits found in {}", repo.display());
            }
            for commit in commits {
                println!("{commit}");
            }
            Ok(())
        }
        Command::Reword { hash, message } => {
            let summary = rewriter
                .rename_one(repo, &hash, &message)
                .map_err(|e| with_abort_hint(&rewriter, repo, e))?;
            println!(
                "Reworded {} commit(s), {} replayed",
                summary.reworded, summary.replayed
            );
            Ok(())
        }
        Command::Batch { hashes, messages } => {
            let summary = rewriter
                .rename_many(repo, &hashes, &messages)
                .map_err(|e| with_abort_hint(&rewriter, repo, e))?;
            println!(
                "Reworded {} commit(s), {} replayed",
                summary.reworded, summary.replayed
            );
            Ok(())
        }
        Command::Replace {
            words,
            replacement,
            dry_run,
        } => {
            if dry_run {
                let commits = rewriter.list_commits(repo)?;
                let edits = batch::replace_in_messages(&commits, &words, &replacement)?;
                for edit in &edits {
                    println!("{} {} -> {}", edit.hash, edit.old_message, edit.new_message);
                }
                println!("{} commit(s) would be reworded", edits.len());
                return Ok(());
            }
            let summary = rewriter
                .replace_in_history(repo, &words, &replacement)
                .map_err(|e| with_abort_hint(&rewriter, repo, e))?;
            if summary.reworded == 0 {
                println!("No commit message matched");
            } else {
                println!(
                    "Reworded {} commit(s), {} replayed",
                    summary.reworded, summary.replayed
                );
            }
            Ok(())
        }
        Command::Abort => {
            rewriter
                .abort_rewrite(repo)
                .context("Failed to abort the rewrite")?;
            println!("Rewrite aborted; history restored");
            Ok(())
        }
        Command::Check => {
            let found = |ok: bool| if ok { "found" } else { "not found" };
            println!("git: {}", found(rewriter.check_tool_installed()));
            println!(
                "repository {}: {}",
                repo.display(),
                found(rewriter.is_valid_repository(repo))
            );
            if rewriter.rewrite_in_progress(repo) {
                println!("a rebase is in progress; run `grw abort` to cancel it");
            }
            Ok(())
        }
        Command::InjectPlan { .. } | Command::InjectMessage { .. } => Ok(()),
    }
}

/// Point the user at `grw abort` when the rewrite left a stopped rebase.
fn with_abort_hint(
    rewriter: &Rewriter<ProcessRunner>,
    repo: &Path,
    e: RewordError,
) -> anyhow::Error {
    if rewriter.rewrite_in_progress(repo) {
        anyhow::Error::new(e).context("Rewrite stopped; run `grw abort` to restore history")
    } else {
        e.into()
    }
}

fn run_tui(rewriter: &Rewriter<ProcessRunner>, repo: &Path) -> Result<()> {
    if !rewriter.is_valid_repository(repo) {
        anyhow::bail!("{} is not a git repository", repo.display());
    }
    let commits = rewriter.list_commits(repo)?;

    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::with_commits(commits);
    if rewriter.rewrite_in_progress(repo) {
        app.set_error("A rebase is in progress; press 'a' to abort it");
    }

    let result = event_loop(&mut terminal, &mut app, rewriter, repo);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    app: &mut AppState,
    rewriter: &Rewriter<ProcessRunner>,
    repo: &Path,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            views::commit_list::render(app, frame);
            match app.mode {
                AppMode::EditMessage => views::message_input::render(app, frame),
                AppMode::Help => views::help::render(frame),
                AppMode::CommitList => {}
            }
        })?;

        let event = event::read()?;
        match event::parse_key_event(event, app.mode) {
            event::AppAction::MoveUp => app.move_up(),
            event::AppAction::MoveDown => app.move_down(),
            event::AppAction::PageUp => app.page_up(app.commit_list_visible_height),
            event::AppAction::PageDown => app.page_down(app.commit_list_visible_height),
            event::AppAction::Edit => {
                if app.mode == AppMode::CommitList {
                    app.begin_edit();
                }
            }
            event::AppAction::ShowHelp => app.toggle_help(),
            event::AppAction::Reload => {
                if app.mode == AppMode::CommitList {
                    reload(app, rewriter, repo);
                }
            }
            event::AppAction::Abort => {
                if app.mode == AppMode::CommitList {
                    match rewriter.abort_rewrite(repo) {
                        Ok(()) => app.set_info("Rewrite aborted; history restored"),
                        Err(e) => app.set_error(e.to_string()),
                    }
                    reload(app, rewriter, repo);
                }
            }
            event::AppAction::Input(c) => app.input_char(c),
            event::AppAction::Backspace => app.input_backspace(),
            event::AppAction::Cancel => app.cancel_edit(),
            event::AppAction::Submit => {
                if let Some(pending) = app.submit_edit() {
                    match rewriter.rename_one(repo, &pending.hash, &pending.message) {
                        Ok(summary) => app.set_info(format!(
                            "Reworded {} ({} commit(s) replayed)",
                            pending.hash, summary.replayed
                        )),
                        Err(e) if rewriter.rewrite_in_progress(repo) => {
                            app.set_error(format!("{e}; press 'a' to abort"))
                        }
                        Err(e) => app.set_error(e.to_string()),
                    }
                    reload(app, rewriter, repo);
                }
            }
            event::AppAction::Quit => match app.mode {
                AppMode::Help => app.close_help(),
                AppMode::EditMessage => app.cancel_edit(),
                AppMode::CommitList => app.should_quit = true,
            },
            event::AppAction::None => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Re-read history after it may have changed. A failed read shows an empty
/// list instead of leaving the TUI.
fn reload(app: &mut AppState, rewriter: &Rewriter<ProcessRunner>, repo: &Path) {
    match rewriter.list_commits(repo) {
        Ok(commits) => app.set_commits(commits),
        Err(e) => {
            app.set_commits(Vec::new());
            app.set_error(e.to_string());
        }
    }
}
