use anyhow::Result;

use crate::config::Config;
use crate::git::Git;

/// Record a checkpoint commit with everything in the working tree, so the
/// next typist can pick the session up from here.
pub fn run(git: &Git, config: &Config) -> Result<()> {
    if !git.in_work_tree() {
        anyhow::bail!("not inside a git work tree, run handoff from a repository");
    }
    let branch = git.current_branch()?;
    if branch != config.session_branch() {
        anyhow::bail!("on branch {}, not the session branch. Run handoff start first", branch);
    }

    if !git.has_changes()? {
        eprintln!("Nothing to hand over, the working tree is clean.");
        return Ok(());
    }

    git.add_all()?;
    git.commit_no_verify(&config.wip_commit_message)?;
    eprintln!("Recorded checkpoint, ready for the next typist.");
    Ok(())
}
