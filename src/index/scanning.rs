//! Directory scanning utilities for harvesting tile images from a collection root.

use std::fs;
use std::path::Path;

use crate::asset_paths::is_tile_image;
use crate::error::{RelinkError, Result};
use crate::models::Location;

/// Walk a collection directory, appending `(file name, location)` pairs for every image.
///
/// Entries are visited in lexical order so repeated scans of the same tree produce the same
/// candidate order. A symbolic link named like an image is indexed as found; linked
/// directories are not descended into.
pub fn collect_images_recursively(
    collection: &str,
    dir: &Path,
    relative_root: &str,
    extension: &str,
    found: &mut Vec<(String, Location)>,
) -> Result<()> {
    let walk_error = |source| RelinkError::Walk {
        collection: collection.to_string(),
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(walk_error)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(walk_error)?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let file_name = entry.file_name();
        let name_str = file_name.to_string_lossy();
        let next_relative = if relative_root.is_empty() {
            name_str.to_string()
        } else {
            format!("{relative_root}/{name_str}")
        };

        let file_type = entry.file_type().map_err(walk_error)?;
        if file_type.is_dir() {
            collect_images_recursively(collection, &entry.path(), &next_relative, extension, found)?;
        } else if (file_type.is_file() || file_type.is_symlink())
            && is_tile_image(&name_str, extension)
        {
            found.push((name_str.to_string(), Location::new(collection, next_relative)));
        }
    }

    Ok(())
}
