use anyhow::Result;

use crate::config::Config;
use crate::git::Git;

/// Create or join the session branch for the configured base branch.
pub fn run(git: &Git, config: &Config) -> Result<()> {
    if !git.in_work_tree() {
        anyhow::bail!("not inside a git work tree, run handoff from a repository");
    }

    let session_branch = config.session_branch();
    if git.current_branch()? == session_branch {
        eprintln!("Already on session branch {}", session_branch);
        return Ok(());
    }

    if git.branch_exists(&session_branch) {
        git.checkout(&session_branch)?;
        eprintln!("Joined session branch {}", session_branch);
    } else {
        git.checkout_new(&session_branch, &config.base_branch)?;
        eprintln!(
            "Created session branch {} from {}",
            session_branch, config.base_branch
        );
    }
    Ok(())
}
