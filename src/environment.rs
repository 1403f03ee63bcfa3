//! Variable environments - loading by name and the active-environment store

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_ENV_NAME};
use crate::models::Environment;

/// Somewhere environments can be listed and read by name
pub trait EnvironmentSource {
    /// Names of every environment that can be loaded, sorted
    fn list_available(&self) -> Vec<String>;

    /// Raw bytes of an environment, `None` when there is no such source
    fn read(&self, name: &str) -> Option<Vec<u8>>;
}

/// Environments stored as `<name>.json` files in one directory
#[derive(Clone, Debug)]
pub struct DirEnvironmentSource {
    dir: PathBuf,
}

impl DirEnvironmentSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirEnvironmentSource { dir: dir.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Write `default.json` with a `base_url` when the directory has no
    /// environments yet. Returns true when a file was created.
    pub fn seed_default(&self) -> Result<bool> {
        if !self.list_available().is_empty() {
            return Ok(false);
        }
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;

        let path = self.path_for(DEFAULT_ENV_NAME);
        let seed = serde_json::json!({ "base_url": DEFAULT_BASE_URL });
        let content = crate::storage::to_pretty_json(&seed)?;
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;

        tracing::info!(path = %path.display(), "Seeded default environment");
        Ok(true)
    }
}

impl EnvironmentSource for DirEnvironmentSource {
    fn list_available(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("json"))
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        names.sort();
        names
    }

    fn read(&self, name: &str) -> Option<Vec<u8>> {
        fs::read(self.path_for(name)).ok()
    }
}

/// Parse environment bytes as a flat JSON object of strings.
///
/// Malformed input yields an empty environment. Non-string values are
/// skipped so every variable is a plain string.
pub fn parse_environment(name: &str, bytes: &[u8]) -> Environment {
    let mut env = Environment::new(name);

    let object = match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(object)) => object,
        Ok(other) => {
            tracing::warn!(env = name, kind = json_kind(&other), "Environment is not a JSON object");
            return env;
        }
        Err(e) => {
            tracing::warn!(env = name, error = %e, "Malformed environment JSON");
            return env;
        }
    };

    for (key, value) in object {
        match value {
            Value::String(s) => {
                env.variables.insert(key, s);
            }
            other => {
                tracing::warn!(env = name, key = %key, kind = json_kind(&other), "Skipping non-string variable");
            }
        }
    }

    env
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Holds the active environment; a switch replaces it wholesale
#[derive(Clone, Debug, Default)]
pub struct EnvironmentStore {
    active: Environment,
}

impl EnvironmentStore {
    pub fn new(active: Environment) -> Self {
        EnvironmentStore { active }
    }

    /// Load an environment by name; a missing source gives an empty one
    pub fn load(source: &dyn EnvironmentSource, name: &str) -> Environment {
        match source.read(name) {
            Some(bytes) => parse_environment(name, &bytes),
            None => {
                tracing::debug!(env = name, "No environment source, using empty variables");
                Environment::new(name)
            }
        }
    }

    /// Load `name` and make it the active environment
    pub fn switch(&mut self, source: &dyn EnvironmentSource, name: &str) -> &Environment {
        let loaded = Self::load(source, name);
        tracing::info!(env = name, variables = loaded.variables.len(), "Switched environment");
        self.replace(loaded)
    }

    pub fn replace(&mut self, env: Environment) -> &Environment {
        self.active = env;
        &self.active
    }

    pub fn active(&self) -> &Environment {
        &self.active
    }

    pub fn substitute(&self, template: &str) -> String {
        self.active.substitute(template)
    }
}

/// In-memory source, handy when environments do not come from disk
impl EnvironmentSource for HashMap<String, Vec<u8>> {
    fn list_available(&self) -> Vec<String> {
        let mut names: Vec<String> = self.keys().cloned().collect();
        names.sort();
        names
    }

    fn read(&self, name: &str) -> Option<Vec<u8>> {
        self.get(name).cloned()
    }
}
