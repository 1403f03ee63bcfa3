use crate::models::RequestSnapshot;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::PathBuf;

/// Serialize as JSON indented with four spaces
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes request snapshots into the collections directory
#[derive(Clone, Debug)]
pub struct CollectionStore {
    dir: PathBuf,
}

impl CollectionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CollectionStore { dir: dir.into() }
    }

    /// Default file name for a snapshot, derived from its timestamp
    pub fn default_name(snapshot: &RequestSnapshot) -> String {
        format!("req_{}", snapshot.timestamp.replace(':', "-"))
    }

    /// Save a snapshot as `<name>.json`, returning the written path.
    /// Without a name the timestamp-derived default is used.
    pub fn save(&self, snapshot: &RequestSnapshot, name: Option<&str>) -> Result<PathBuf> {
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => Self::default_name(snapshot),
        };

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;

        let path = self.dir.join(format!("{}.json", name));
        let content = to_pretty_json(snapshot)?;
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;

        tracing::info!(path = %path.display(), method = %snapshot.method, "Saved request to collection");
        Ok(path)
    }
}
