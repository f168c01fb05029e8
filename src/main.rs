mod config;
mod done;
mod git;
mod next;
mod squash;
mod start;
mod status;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::git::Git;

#[derive(Parser)]
#[command(name = "handoff", version, about = "Pair and mob programming sessions on top of git")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or join the session branch
    Start,
    /// Record a checkpoint commit and hand the keyboard over
    Next,
    /// End the session: squash checkpoints into the final commit
    Done,
    /// Show the session branch and its commits
    Status,
    /// Squash trailing checkpoint commits on the current branch
    SquashWip {
        /// Rewrite a rebase todo list in place (invoked by git)
        #[arg(long, hide = true, value_name = "FILE")]
        git_sequence_editor: Option<PathBuf>,
        /// Rewrite a squash commit message in place (invoked by git)
        #[arg(long, hide = true, value_name = "FILE")]
        git_editor: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load()?;
    let git = Git::current_dir();

    match cli.command {
        Commands::Start => start::run(&git, &config),
        Commands::Next => next::run(&git, &config),
        Commands::Done => done::run(&git, &config),
        Commands::Status => status::run(&git, &config),
        Commands::SquashWip {
            git_sequence_editor,
            git_editor,
        } => match (git_sequence_editor, git_editor) {
            (Some(todo), None) => squash::rewrite_todo_file(&todo, &config),
            (None, Some(message)) => squash::rewrite_message_file(&message, &config),
            (None, None) => squash::run(&git, &config),
            (Some(_), Some(_)) => {
                anyhow::bail!("--git-sequence-editor and --git-editor are mutually exclusive")
            }
        },
    }
}
