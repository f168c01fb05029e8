//! Squash the trailing run of checkpoint commits into one clean commit.
//!
//! A session leaves a run of identical checkpoint commits behind, capped by
//! the final hand-authored commit. `run` replays those commits with
//! `git rebase -i`, substituting this binary for both rebase editors: the
//! sequence editor folds everything after the first checkpoint into it, and
//! the message editor comments the checkpoint placeholders out of the
//! combined commit message so only the authored message survives.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::git::{Git, HistoryQuery};

/// Whether a commit subject is the checkpoint placeholder. Exact match only;
/// a checkpoint message that was hand-edited counts as authored.
pub fn is_wip_commit(subject: &str, config: &Config) -> bool {
    subject == config.wip_commit_message
}

/// Subjects of the commits on the current branch that are not on the base
/// branch, newest first. Empty when the session has no local commits yet.
pub fn commits_on_session_branch(
    history: &dyn HistoryQuery,
    config: &Config,
) -> Result<Vec<String>> {
    history
        .subjects_since(&config.base_branch)
        .with_context(|| format!("failed to inspect history since {}", config.base_branch))
}

/// True iff the newest session-local commit is a checkpoint commit.
pub fn ends_with_wip_commit(commits: &[String], config: &Config) -> bool {
    commits
        .first()
        .map(|subject| is_wip_commit(subject, config))
        .unwrap_or(false)
}

enum ScanState {
    Searching,
    Squashing,
}

/// Rewrite a rebase todo list so that every commit after the first checkpoint
/// commit is squashed into it. Commits before the first checkpoint, comments,
/// and blank lines pass through untouched; with no checkpoint in the list the
/// output equals the input.
pub fn mark_post_wip_commits_for_squashing(todo: &str, config: &Config) -> String {
    let mut state = ScanState::Searching;
    let mut out = Vec::new();
    for line in todo.split('\n') {
        match pick_line_rest(line) {
            Some(rest) => match state {
                ScanState::Searching => {
                    if pick_subject(rest) == Some(config.wip_commit_message.as_str()) {
                        state = ScanState::Squashing;
                    }
                    out.push(line.to_string());
                }
                ScanState::Squashing => out.push(format!("squash {}", rest)),
            },
            None => out.push(line.to_string()),
        }
    }
    out.join("\n")
}

/// Everything after the action keyword of a `pick` line. A fresh todo list
/// contains only `pick` actions; comments, blank lines, and anything else
/// yield None and are left alone.
fn pick_line_rest(line: &str) -> Option<&str> {
    line.strip_prefix("pick ")
}

/// The commit subject of an action line: everything after `<short-hash> `.
fn pick_subject(rest: &str) -> Option<&str> {
    rest.split_once(' ').map(|(_hash, subject)| subject)
}

/// Rewrite a combined squash commit message so that every line consisting of
/// exactly the checkpoint message becomes a comment. Git drops comment lines
/// from the final message, leaving only the authored text.
pub fn comment_wip_commits(message: &str, config: &Config) -> String {
    message
        .split('\n')
        .map(|line| {
            if is_wip_commit(line, config) {
                format!("# {}", line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// GIT_SEQUENCE_EDITOR entry point: rewrite the rebase todo file in place.
pub fn rewrite_todo_file(path: &Path, config: &Config) -> Result<()> {
    let todo = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rebase todo {}", path.display()))?;
    std::fs::write(path, mark_post_wip_commits_for_squashing(&todo, config))
        .with_context(|| format!("failed to write rebase todo {}", path.display()))?;
    Ok(())
}

/// GIT_EDITOR entry point: rewrite the squash commit message file in place.
pub fn rewrite_message_file(path: &Path, config: &Config) -> Result<()> {
    let message = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read commit message {}", path.display()))?;
    std::fs::write(path, comment_wip_commits(&message, config))
        .with_context(|| format!("failed to write commit message {}", path.display()))?;
    Ok(())
}

/// Squash the checkpoint commits on the current branch, if there are any.
///
/// No-op when the branch has no checkpoint commits. When the newest commit is
/// itself a checkpoint, squashing would leave an empty commit message, so the
/// user is asked to record their final commit first.
pub fn run(git: &Git, config: &Config) -> Result<()> {
    let commits = commits_on_session_branch(git, config)?;
    if !commits.iter().any(|subject| is_wip_commit(subject, config)) {
        eprintln!("No checkpoint commits on this branch, nothing to squash.");
        return Ok(());
    }
    if ends_with_wip_commit(&commits, config) {
        eprintln!("The newest commit is a checkpoint. Record your final commit, then squash.");
        return Ok(());
    }

    let merge_base = git.merge_base(&config.base_branch)?;
    let exe = std::env::current_exe().context("failed to resolve the handoff executable")?;
    let exe = exe.display();
    git.rebase_interactive(
        &merge_base,
        &format!("\"{}\" squash-wip --git-sequence-editor", exe),
        &format!("\"{}\" squash-wip --git-editor", exe),
    )?;
    eprintln!("Squashed checkpoint commits into the final commit.");
    Ok(())
}
