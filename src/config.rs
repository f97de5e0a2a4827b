//! Application settings loader describing where each tile collection lives.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{RelinkError, Result};
use crate::index::CollectionRoot;

/// Directory, below the installation path, that relative collection paths are anchored to.
pub const BUNDLED_COLLECTIONS_DIR: [&str; 2] = ["resources", "app.asar.unpacked"];

/// Collection entries read from the settings file, in file order.
#[derive(Debug, Clone, Default)]
pub struct CollectionSettings {
    collections: Vec<CollectionEntry>,
}

/// One visible collection as configured by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEntry {
    /// Collection name used in tile sources.
    pub name: String,
    /// Configured path, absolute or relative to the bundled collections directory.
    pub path: String,
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    tiles: Option<IndexMap<String, Value>>,
}

impl CollectionSettings {
    /// Read and parse a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| RelinkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents, &path.display().to_string())
    }

    /// Parse settings JSON; `origin` names the source in error messages.
    ///
    /// Collections flagged `"hidden": true` are dropped. Any other `hidden` value is ignored.
    pub fn from_json(contents: &str, origin: &str) -> Result<Self> {
        let file: SettingsFile =
            serde_json::from_str(contents).map_err(|err| RelinkError::json(origin, err))?;
        let tiles = file.tiles.ok_or_else(|| RelinkError::MissingField {
            field: "tiles",
            context: origin.to_string(),
        })?;

        let mut collections = Vec::with_capacity(tiles.len());
        for (name, entry) in tiles {
            let Value::Object(fields) = entry else {
                return Err(invalid(&name, "the entry is not an object"));
            };

            if matches!(fields.get("hidden"), Some(Value::Bool(true))) {
                continue;
            }

            let path = match fields.get("path") {
                Some(Value::String(path)) => path.clone(),
                Some(_) => return Err(invalid(&name, "the path is not a string")),
                None => return Err(invalid(&name, "no path")),
            };
            collections.push(CollectionEntry { name, path });
        }

        Ok(Self { collections })
    }

    /// Visible collections in settings order.
    pub fn collections(&self) -> &[CollectionEntry] {
        &self.collections
    }

    /// Turn the configured collections into scan roots.
    ///
    /// Absolute paths are used as-is; relative ones are joined below
    /// `<installation>/resources/app.asar.unpacked`.
    pub fn collection_roots(&self, installation: &Path) -> Vec<CollectionRoot> {
        self
            .collections
            .iter()
            .map(|entry| {
                CollectionRoot::new(&entry.name, resolve_collection_path(installation, &entry.path))
            })
            .collect()
    }
}

fn resolve_collection_path(installation: &Path, configured: &str) -> PathBuf {
    let configured = Path::new(configured);
    if configured.is_absolute() {
        return configured.to_path_buf();
    }

    BUNDLED_COLLECTIONS_DIR
        .iter()
        .fold(installation.to_path_buf(), |acc, segment| acc.join(segment))
        .join(configured)
}

fn invalid(name: &str, reason: &str) -> RelinkError {
    RelinkError::InvalidCollection {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
