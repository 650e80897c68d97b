/// Shell detection logic
///
/// Works out which history file to read when the caller doesn't name one.

use crate::error::{OnboardError, Result};
use std::env;
use std::path::PathBuf;

/// Shells whose history files we know how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
}

impl Shell {
    /// Get the shell name as a string
    pub fn name(&self) -> &str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
        }
    }

    /// Get the history file name for this shell
    pub fn history_filename(&self) -> &str {
        match self {
            Shell::Bash => ".bash_history",
            Shell::Zsh => ".zsh_history",
        }
    }

    /// Get the history file path for this shell
    pub fn history_file_path(&self) -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            OnboardError::Config("Could not determine home directory".to_string())
        })?;

        Ok(home.join(self.history_filename()))
    }

    /// Parse a `$SHELL` value such as `/usr/bin/zsh`
    pub fn from_shell_path(shell_path: &str) -> Option<Shell> {
        let shell_name = shell_path.rsplit('/').next().unwrap_or("").to_lowercase();

        match shell_name.as_str() {
            "bash" => Some(Shell::Bash),
            "zsh" => Some(Shell::Zsh),
            _ => None,
        }
    }
}

impl std::fmt::Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Shell detector
pub struct ShellDetector;

impl ShellDetector {
    /// Default transcript location for this user
    ///
    /// `$HISTFILE` wins when exported, then the detected shell's history
    /// file, then `~/.zsh_history`.
    pub fn default_history_path() -> Result<PathBuf> {
        let histfile = env::var("HISTFILE").ok();
        let shell = env::var("SHELL").ok();
        Self::resolve_history_path(histfile.as_deref(), shell.as_deref())
    }

    /// Resolution behind [`default_history_path`](Self::default_history_path).
    /// Tests pass values directly instead of mutating env vars.
    pub fn resolve_history_path(histfile: Option<&str>, shell: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = histfile.map(str::trim).filter(|p| !p.is_empty()) {
            return Ok(crate::config::expand_home(path));
        }

        shell
            .and_then(Shell::from_shell_path)
            .unwrap_or(Shell::Zsh)
            .history_file_path()
    }
}
