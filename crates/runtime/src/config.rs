//! Session configuration and storage locations.
use std::env;
use std::path::PathBuf;

/// Name of the stored session document. Fixed; not user-configurable.
pub const STORAGE_KEY: &str = "bummerl-storage";

/// Application name used for platform directories.
pub const APP_NAME: &str = "bummerl";

/// Configuration for opening a [`Session`](crate::Session).
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    /// Directory holding the session document. Platform data dir if unset.
    pub data_dir: Option<PathBuf>,
    /// Persist in the background after every mutation.
    pub auto_persist: bool,
}

impl SessionConfig {
    pub const fn new() -> Self {
        Self {
            data_dir: None,
            auto_persist: false,
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_auto_persist(mut self, enabled: bool) -> Self {
        self.auto_persist = enabled;
        self
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BUMMERL_DATA_DIR` - Directory for the session document (default: platform-specific)
    /// - `BUMMERL_AUTO_PERSIST` - Persist after every change (default: false).
    ///   `1/true/yes/on` or an empty value enable it, `0/false/no/off` disable it.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.data_dir = lookup("BUMMERL_DATA_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        if let Some(raw) = lookup("BUMMERL_AUTO_PERSIST") {
            match parse_flag(&raw) {
                Some(enable) => config.auto_persist = enable,
                None => tracing::warn!(value = %raw, "ignoring unrecognised BUMMERL_AUTO_PERSIST"),
            }
        }

        config
    }

    /// Directory the file repository should use.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(data_dir)
    }
}

/// Get the platform-specific data directory
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/bummerl`
/// - Linux: `~/.local/share/bummerl` (or `$XDG_DATA_HOME/bummerl`)
/// - Windows: `%APPDATA%\bummerl`
/// - Fallback: `./save_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
