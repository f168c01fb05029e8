use anyhow::Result;

use crate::config::Config;
use crate::git::Git;
use crate::squash;

/// Print the current branch and the session-local commits, newest first,
/// with checkpoint commits marked.
pub fn run(git: &Git, config: &Config) -> Result<()> {
    if !git.in_work_tree() {
        anyhow::bail!("not inside a git work tree, run handoff from a repository");
    }

    let branch = git.current_branch()?;
    if branch == config.session_branch() {
        println!("On session branch {}", branch);
    } else {
        println!("On branch {} (session branch is {})", branch, config.session_branch());
    }

    let commits = squash::commits_on_session_branch(git, config)?;
    if commits.is_empty() {
        println!("No commits beyond {}.", config.base_branch);
        return Ok(());
    }
    for subject in &commits {
        if squash::is_wip_commit(subject, config) {
            println!("  [wip] {}", subject);
        } else {
            println!("        {}", subject);
        }
    }
    Ok(())
}
