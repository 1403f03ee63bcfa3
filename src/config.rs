//! Runtime configuration - directories, timeout and history size

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::constants::{
    DEFAULT_TIMEOUT_SECS, HOME_ENV_VAR, LOG_FILE_NAME, MAX_HISTORY, TIMEOUT_ENV_VAR,
};

/// Where tinypost keeps its files and how it talks to the network
#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub request_timeout: Duration,
    pub history_capacity: usize,
    /// Overrides that were set but could not be used, as `(variable, value)`
    pub rejected_overrides: Vec<(String, String)>,
}

impl Config {
    /// Build a config rooted at `data_dir` with default settings
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            history_capacity: MAX_HISTORY,
            rejected_overrides: Vec::new(),
        }
    }

    /// Read overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from a variable lookup.
    ///
    /// `TINYPOST_HOME` replaces the data directory (`~/.tinypost` otherwise)
    /// and `TINYPOST_TIMEOUT_SECS` the request timeout. A timeout that is not
    /// a positive integer keeps the default and lands in `rejected_overrides`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup(HOME_ENV_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".tinypost")
            });

        let mut config = Config::with_data_dir(data_dir);

        if let Some(raw) = lookup(TIMEOUT_ENV_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => config
                    .rejected_overrides
                    .push((TIMEOUT_ENV_VAR.to_string(), raw)),
            }
        }

        config
    }

    pub fn environments_dir(&self) -> PathBuf {
        self.data_dir.join("environments")
    }

    pub fn collections_dir(&self) -> PathBuf {
        self.data_dir.join("collections")
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }

    /// Create the data, environments and collections directories
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.environments_dir(), self.collections_dir()] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_are_under_data_dir() {
        let config = Config::with_data_dir("/tmp/tp");
        assert_eq!(config.environments_dir(), PathBuf::from("/tmp/tp/environments"));
        assert_eq!(config.collections_dir(), PathBuf::from("/tmp/tp/collections"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.history_capacity, 20);
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_home_override_replaces_data_dir() {
        let config = Config::from_lookup(lookup(&[(HOME_ENV_VAR, "/srv/tp")]));
        assert_eq!(config.data_dir, PathBuf::from("/srv/tp"));
        assert_eq!(config.collections_dir(), PathBuf::from("/srv/tp/collections"));
        assert!(config.rejected_overrides.is_empty());
    }

    #[test]
    fn test_default_data_dir_without_override() {
        let config = Config::from_lookup(lookup(&[]));
        assert!(config.data_dir.ends_with(".tinypost"));
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_timeout_override() {
        let config = Config::from_lookup(lookup(&[(TIMEOUT_ENV_VAR, " 5 ")]));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.rejected_overrides.is_empty());
    }

    #[test]
    fn test_bad_timeout_falls_back_to_default() {
        for raw in ["0", "soon", "-3", ""] {
            let config = Config::from_lookup(lookup(&[(TIMEOUT_ENV_VAR, raw)]));
            assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
            assert_eq!(
                config.rejected_overrides,
                vec![(TIMEOUT_ENV_VAR.to_string(), raw.to_string())]
            );
        }
    }

    #[test]
    fn test_ensure_dirs_creates_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_data_dir(tmp.path().join("home"));
        config.ensure_dirs().unwrap();
        assert!(config.environments_dir().is_dir());
        assert!(config.collections_dir().is_dir());
    }
}
