use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

/// Git process handle — supports an explicit working directory for testing.
#[derive(Debug, Clone, Default)]
pub struct Git {
    /// If set, runs every git command inside this directory.
    work_dir: Option<PathBuf>,
}

impl Git {
    /// Target the repository in the process working directory (the user's repo).
    pub fn current_dir() -> Self {
        Git::default()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new("git");
        if let Some(ref dir) = self.work_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run a git command and return its stdout, failing on nonzero exit.
    fn output(&self, args: &[&str]) -> Result<String> {
        let output = self
            .cmd()
            .args(args)
            .output()
            .with_context(|| format!("failed to run git {}", args.join(" ")))?;
        if !output.status.success() {
            anyhow::bail!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Check if we're inside a git work tree.
    pub fn in_work_tree(&self) -> bool {
        self.cmd()
            .args(["rev-parse", "--is-inside-work-tree"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    pub fn current_branch(&self) -> Result<String> {
        Ok(self
            .output(&["rev-parse", "--abbrev-ref", "HEAD"])?
            .trim()
            .to_string())
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.cmd()
            .args(["rev-parse", "--verify", "--quiet", &format!("refs/heads/{}", name)])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    pub fn checkout(&self, branch: &str) -> Result<()> {
        let status = self
            .cmd()
            .args(["checkout", "-q", branch])
            .status()
            .context("failed to run git checkout")?;
        if !status.success() {
            anyhow::bail!("failed to switch to branch {}", branch);
        }
        Ok(())
    }

    /// Create `branch` at `start_point` and switch to it.
    pub fn checkout_new(&self, branch: &str, start_point: &str) -> Result<()> {
        let status = self
            .cmd()
            .args(["checkout", "-q", "-b", branch, start_point])
            .status()
            .context("failed to run git checkout -b")?;
        if !status.success() {
            anyhow::bail!("failed to create branch {} from {}", branch, start_point);
        }
        Ok(())
    }

    /// True if the working tree has staged, unstaged, or untracked changes.
    pub fn has_changes(&self) -> Result<bool> {
        Ok(!self.output(&["status", "--porcelain"])?.trim().is_empty())
    }

    pub fn add_all(&self) -> Result<()> {
        let status = self
            .cmd()
            .args(["add", "--all"])
            .status()
            .context("failed to run git add")?;
        if !status.success() {
            anyhow::bail!("git add --all failed");
        }
        Ok(())
    }

    /// Commit the index with a fixed message. Skips hooks.
    pub fn commit_no_verify(&self, message: &str) -> Result<()> {
        let status = self
            .cmd()
            .args(["commit", "-q", "-m", message, "--no-verify"])
            .status()
            .context("failed to run git commit")?;
        if !status.success() {
            anyhow::bail!("git commit failed");
        }
        Ok(())
    }

    /// Merge base of HEAD and the given ref.
    pub fn merge_base(&self, other: &str) -> Result<String> {
        Ok(self.output(&["merge-base", "HEAD", other])?.trim().to_string())
    }

    /// Replay the commits since `onto` with `git rebase -i`, substituting the
    /// given commands for the sequence editor and the commit-message editor.
    /// `--keep-empty` so checkpoint commits that became empty still show up
    /// in the todo list.
    pub fn rebase_interactive(&self, onto: &str, sequence_editor: &str, editor: &str) -> Result<()> {
        let status = self
            .cmd()
            .args(["rebase", "-i", "--keep-empty", onto])
            .env("GIT_SEQUENCE_EDITOR", sequence_editor)
            .env("GIT_EDITOR", editor)
            .status()
            .context("failed to run git rebase")?;
        if !status.success() {
            anyhow::bail!("git rebase -i onto {} failed", onto);
        }
        Ok(())
    }
}

/// Narrow history capability: subjects of commits reachable from HEAD but not
/// from `base`, newest first. Lets the squash logic be driven by a fake in tests.
pub trait HistoryQuery {
    fn subjects_since(&self, base: &str) -> Result<Vec<String>>;
}

impl HistoryQuery for Git {
    fn subjects_since(&self, base: &str) -> Result<Vec<String>> {
        let range = format!("{}..HEAD", base);
        let stdout = self
            .output(&["log", "--pretty=format:%s", &range])
            .with_context(|| format!("failed to list commits in {}", range))?;
        Ok(stdout.lines().map(str::to_string).collect())
    }
}

/// Test-only methods on Git.
#[cfg(test)]
impl Git {
    /// Target a repository at an explicit path, independent of the process CWD.
    pub fn in_dir(dir: &std::path::Path) -> Self {
        Git {
            work_dir: Some(dir.to_path_buf()),
        }
    }

    /// Run an arbitrary git command in the repository (test fixtures only).
    pub fn raw(&self, args: &[&str]) -> Result<()> {
        let status = self.cmd().args(args).status()?;
        if !status.success() {
            anyhow::bail!("git {} failed", args.join(" "));
        }
        Ok(())
    }
}
