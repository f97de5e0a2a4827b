//! Data structures shared between the index builder, the resolver and the map patcher.

use std::collections::BTreeMap;
use std::fmt;

/// Where a tile image lives: a logical collection plus a `/`-separated path from its root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
  /// Logical collection identifier (not a filesystem path).
  pub collection: String,
  /// Forward-slash relative path from the collection root.
  pub path: String,
}

impl Location {
  /// Build a location from its two parts.
  pub fn new(collection: impl Into<String>, path: impl Into<String>) -> Self {
    Self {
      collection: collection.into(),
      path: path.into(),
    }
  }

  /// Canonical tile source string written back into maps.
  pub fn to_source(&self) -> String {
    format!("{}://{}", self.collection, self.path)
  }

  /// Whether this location refers to the same place as a parsed reference.
  pub fn matches(&self, reference: &Reference) -> bool {
    self.collection == reference.collection && self.path == reference.path
  }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_source())
  }
}

/// File-name keyed lookup of every image discovered across all collection roots.
///
/// Candidate order is the insertion order of the directory walk and only matters for
/// tie-breaking between equally scored candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetIndex {
  entries: BTreeMap<String, Vec<Location>>,
}

impl AssetIndex {
  /// Create an empty index.
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a location under the given bare file name.
  pub fn insert(&mut self, file_name: impl Into<String>, location: Location) {
    self.entries.entry(file_name.into()).or_default().push(location);
  }

  /// Append every entry of `other`, keeping its candidate order after the existing ones.
  pub fn merge(&mut self, other: AssetIndex) {
    for (file_name, locations) in other.entries {
      self.entries.entry(file_name).or_default().extend(locations);
    }
  }

  /// Candidates recorded for a file name, in index order.
  pub fn candidates(&self, file_name: &str) -> Option<&[Location]> {
    self.entries.get(file_name).map(Vec::as_slice)
  }

  /// Number of distinct file names.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when nothing has been indexed.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Total number of indexed locations across all file names.
  pub fn location_count(&self) -> usize {
    self.entries.values().map(Vec::len).sum()
  }
}

impl<S: Into<String>> FromIterator<(S, Location)> for AssetIndex {
  fn from_iter<I: IntoIterator<Item = (S, Location)>>(iter: I) -> Self {
    let mut index = AssetIndex::new();
    for (file_name, location) in iter {
      index.insert(file_name, location);
    }
    index
  }
}

/// A tile source split into its collection token, path token and bare file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
  /// Text before the collection separator.
  pub collection: String,
  /// Text after the separator, kept exactly as found.
  pub path: String,
  /// Trailing path segment used as the index key.
  pub file_name: String,
}

/// Outcome of parsing a raw tile source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedSource {
  /// The tile is intentionally empty and must not be resolved.
  Blank,
  /// A regular collection reference.
  Reference(Reference),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_canonical_source() {
    let location = Location::new("forest", "v2/deep/tree.png");
    assert_eq!(location.to_source(), "forest://v2/deep/tree.png");
    assert_eq!(location.to_string(), "forest://v2/deep/tree.png");
  }

  #[test]
  fn merge_appends_after_existing_candidates() {
    let mut index: AssetIndex = [("a.png", Location::new("x", "a.png"))].into_iter().collect();
    let other: AssetIndex = [
      ("a.png", Location::new("y", "deep/a.png")),
      ("b.png", Location::new("y", "b.png")),
    ]
    .into_iter()
    .collect();

    index.merge(other);

    assert_eq!(index.candidates("a.png").unwrap(), &[
      Location::new("x", "a.png"),
      Location::new("y", "deep/a.png"),
    ]);
    assert_eq!(index.len(), 2);
    assert_eq!(index.location_count(), 3);
  }

  #[test]
  fn unknown_file_has_no_candidates() {
    let index = AssetIndex::new();
    assert!(index.is_empty());
    assert!(index.candidates("missing.png").is_none());
  }
}
