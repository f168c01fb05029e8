use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Exact first-line message of every checkpoint commit.
    #[serde(default = "default_wip_commit_message")]
    pub wip_commit_message: String,
    /// Branch the session branch is created from and measured against.
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            wip_commit_message: default_wip_commit_message(),
            base_branch: default_base_branch(),
        }
    }
}

impl Config {
    /// Name of the session branch for the configured base branch.
    pub fn session_branch(&self) -> String {
        format!("handoff/{}", self.base_branch)
    }
}

fn default_wip_commit_message() -> String {
    "handoff next [ci-skip] [ci skip] [skip ci]".to_string()
}

fn default_base_branch() -> String {
    "main".to_string()
}

/// Load config from ~/.config/handoff/config.toml, or return defaults.
pub fn load() -> Result<Config> {
    let path = config_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    } else {
        Ok(Config::default())
    }
}

fn config_path() -> PathBuf {
    dirs_config_dir().join("handoff").join("config.toml")
}

fn dirs_config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        })
}
