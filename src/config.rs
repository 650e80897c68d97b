// Settings for the onboarding CLI
//
// Read from $HISTORY_ONBOARD_CONFIG, or config/default.toml when it exists in
// the working directory. HISTORY_ONBOARD_* env vars then override single
// keys. Every key is optional.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{OnboardError, Result};
use crate::logger;

const CONFIG_PATH_ENV: &str = "HISTORY_ONBOARD_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Fully-resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root of the per-user profile directories (already expanded, no `~`).
    pub profiles_dir: PathBuf,
    /// Transcript to read; `None` means detect from `$HISTFILE` / `$SHELL`.
    pub history_file: Option<PathBuf>,
    /// Replace undecodable bytes instead of failing ingestion.
    pub lossy_utf8: bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profiles_dir: PathBuf::from(default_profiles_dir()),
            history_file: None,
            lossy_utf8: false,
            log_level: default_log_level(),
        }
    }
}

/// Env-var overrides, passed explicitly so tests don't touch the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub profiles_dir: Option<String>,
    pub history_file: Option<String>,
    pub log_level: Option<String>,
}

impl Overrides {
    pub fn from_env() -> Self {
        Self {
            profiles_dir: env::var("HISTORY_ONBOARD_PROFILES_DIR").ok(),
            history_file: env::var("HISTORY_ONBOARD_HISTORY_FILE").ok(),
            log_level: env::var("HISTORY_ONBOARD_LOG_LEVEL").ok(),
        }
    }
}

/// Raw TOML shape, the `serde` target before resolution.
#[derive(Deserialize, Default)]
struct RawSettings {
    #[serde(default)]
    store: RawStore,
    #[serde(default)]
    history: RawHistory,
    #[serde(default)]
    log: RawLog,
}

#[derive(Deserialize)]
struct RawStore {
    #[serde(default = "default_profiles_dir")]
    profiles_dir: String,
}

#[derive(Deserialize, Default)]
struct RawHistory {
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    lossy_utf8: bool,
}

#[derive(Deserialize)]
struct RawLog {
    #[serde(default = "default_log_level")]
    level: String,
}

impl Default for RawStore {
    fn default() -> Self {
        Self { profiles_dir: default_profiles_dir() }
    }
}

impl Default for RawLog {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_profiles_dir() -> String { "profiles".to_string() }
fn default_log_level() -> String { "warn".to_string() }

/// Load settings from the configured file (if any), then apply env overrides.
pub fn load() -> Result<Settings> {
    let path = match env::var(CONFIG_PATH_ENV) {
        Ok(explicit) => Some(PathBuf::from(explicit)),
        Err(_) => Some(PathBuf::from(DEFAULT_CONFIG_PATH)).filter(|p| p.exists()),
    };

    load_from(path.as_deref(), &Overrides::from_env())
}

/// Load from an explicit path with explicit overrides.
/// A `None` path means built-in defaults.
pub fn load_from(path: Option<&Path>, overrides: &Overrides) -> Result<Settings> {
    let raw = match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                OnboardError::Config(format!("cannot read {}: {e}", path.display()))
            })?;
            toml::from_str::<RawSettings>(&text).map_err(|e| {
                OnboardError::Config(format!("parse error in {}: {e}", path.display()))
            })?
        }
        None => RawSettings::default(),
    };

    let profiles_dir = overrides
        .profiles_dir
        .as_deref()
        .unwrap_or(&raw.store.profiles_dir);

    let history_file = overrides
        .history_file
        .as_deref()
        .or(raw.history.file.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(expand_home);

    let log_level = overrides
        .log_level
        .clone()
        .unwrap_or(raw.log.level);
    logger::parse_level(&log_level)?;

    Ok(Settings {
        profiles_dir: expand_home(profiles_dir),
        history_file,
        lossy_utf8: raw.history.lossy_utf8,
        log_level,
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
