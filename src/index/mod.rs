//! Asset index construction from collection roots on disk.

mod scanning;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::asset_paths::IMAGE_EXTENSION;
use crate::error::{RelinkError, Result};
use crate::models::AssetIndex;

pub use scanning::collect_images_recursively;

/// A named collection and the directory holding its images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRoot {
    /// Logical collection identifier used in tile sources.
    pub name: String,
    /// Directory scanned for images.
    pub path: PathBuf,
}

impl CollectionRoot {
    /// Pair a collection name with its directory.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Use the final directory component as the collection name.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| RelinkError::InvalidCollection {
                name: path.display().to_string(),
                reason: "the directory has no usable name".into(),
            })?;
        Ok(Self::new(name, path))
    }
}

/// Scans collection roots into an [`AssetIndex`].
#[derive(Debug, Clone)]
pub struct AssetIndexBuilder {
    roots: Vec<CollectionRoot>,
    extension: String,
}

impl Default for AssetIndexBuilder {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            extension: IMAGE_EXTENSION.into(),
        }
    }
}

impl AssetIndexBuilder {
    /// Create a builder that indexes `.png` files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add several roots; they are scanned in the given order.
    pub fn with_roots(mut self, roots: impl IntoIterator<Item = CollectionRoot>) -> Self {
        self.roots.extend(roots);
        self
    }

    /// Add a single root after the existing ones.
    pub fn add_root(&mut self, root: CollectionRoot) -> &mut Self {
        self.roots.push(root);
        self
    }

    /// Override the indexed file extension (case-sensitive, including the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Roots that will be scanned.
    pub fn roots(&self) -> &[CollectionRoot] {
        &self.roots
    }

    /// Walk every root and merge the results in root order.
    ///
    /// Each root is collected into its own list first; any filesystem error aborts the build.
    pub fn build(&self) -> Result<AssetIndex> {
        let mut index = AssetIndex::new();

        for root in &self.roots {
            let mut found = Vec::new();
            collect_images_recursively(&root.name, &root.path, "", &self.extension, &mut found)?;
            debug!(
                collection = %root.name,
                path = %root.path.display(),
                images = found.len(),
                "scanned collection"
            );
            index.merge(found.into_iter().collect());
        }

        info!(
            collections = self.roots.len(),
            file_names = index.len(),
            locations = index.location_count(),
            "asset index built"
        );
        Ok(index)
    }
}
