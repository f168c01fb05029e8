use anyhow::Result;

use crate::config::Config;
use crate::git::Git;
use crate::squash;

/// End the session: collapse the checkpoint commits on the session branch
/// into the final hand-authored commit.
pub fn run(git: &Git, config: &Config) -> Result<()> {
    if !git.in_work_tree() {
        anyhow::bail!("not inside a git work tree, run handoff from a repository");
    }
    let branch = git.current_branch()?;
    if branch != config.session_branch() {
        anyhow::bail!("on branch {}, not the session branch. Nothing to finish", branch);
    }
    if git.has_changes()? {
        anyhow::bail!("uncommitted changes in the working tree. Commit your final work first");
    }
    squash::run(git, config)
}
