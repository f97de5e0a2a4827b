//! Selection of the most plausible replacement location for a tile reference.

use std::fmt;

use crate::models::{AssetIndex, Location, Reference};

/// Score bonus applied to candidates from the reference's own collection.
///
/// Any same-collection candidate outranks every cross-collection candidate as long as
/// indexed relative paths stay under this many bytes. Deeper trees would let a long
/// foreign path beat a short local one.
pub const SAME_COLLECTION_BIAS: usize = 256;

/// Why no location could be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Miss {
    /// The file name is absent from the index.
    UnknownFile,
    /// Candidates exist but none carries both a collection and a path.
    NoPlausibleCandidate,
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFile => f.write_str("unknown file"),
            Self::NoPlausibleCandidate => f.write_str("no plausible candidate"),
        }
    }
}

/// Result of resolving a reference against the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The referenced location still exists; nothing should be rewritten.
    Current(&'a Location),
    /// The asset is found elsewhere; the reference should point here.
    Moved(&'a Location),
    /// No replacement could be chosen.
    NotFound(Miss),
}

impl<'a> Resolution<'a> {
    /// The selected location, whether or not it differs from the reference.
    pub fn location(&self) -> Option<&'a Location> {
        match self {
            Self::Current(location) | Self::Moved(location) => Some(location),
            Self::NotFound(_) => None,
        }
    }
}

/// Resolve a reference in a single pass over the candidates for its file name.
///
/// An exact collection and path match wins immediately. Otherwise same-collection
/// candidates score `path length + SAME_COLLECTION_BIAS`, others score their path length,
/// and the strictly highest score is kept, so the first candidate wins a tie.
pub fn resolve<'a>(index: &'a AssetIndex, reference: &Reference) -> Resolution<'a> {
    let Some(candidates) = index.candidates(&reference.file_name) else {
        return Resolution::NotFound(Miss::UnknownFile);
    };

    let mut best_score = 0;
    let mut selected: Option<&Location> = None;

    for candidate in candidates {
        if candidate.matches(reference) {
            return Resolution::Current(candidate);
        }

        let score = if candidate.collection == reference.collection {
            candidate.path.len() + SAME_COLLECTION_BIAS
        } else {
            candidate.path.len()
        };

        if score > best_score {
            best_score = score;
            selected = Some(candidate);
        }
    }

    match selected {
        Some(location) if !location.collection.is_empty() && !location.path.is_empty() => {
            Resolution::Moved(location)
        }
        _ => Resolution::NotFound(Miss::NoPlausibleCandidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(collection: &str, path: &str) -> Reference {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        Reference {
            collection: collection.into(),
            path: path.into(),
            file_name: file_name.into(),
        }
    }

    fn indexed(file_name: &str, locations: &[(&str, &str)]) -> AssetIndex {
        locations
            .iter()
            .map(|(collection, path)| (file_name, Location::new(*collection, *path)))
            .collect()
    }

    #[test]
    fn prefers_longest_path_within_collection() {
        let index = indexed("tree.png", &[
            ("forest", "v1/tree.png"),
            ("forest", "v2/deep/tree.png"),
        ]);

        let resolution = resolve(&index, &reference("forest", "v0/tree.png"));

        assert_eq!(
            resolution,
            Resolution::Moved(&Location::new("forest", "v2/deep/tree.png"))
        );
    }

    #[test]
    fn exact_match_is_returned_unchanged() {
        let index = indexed("tree.png", &[
            ("forest", "a/very/long/path/to/tree.png"),
            ("forest", "v1/tree.png"),
            ("other", "v1/tree.png"),
        ]);

        let resolution = resolve(&index, &reference("forest", "v1/tree.png"));

        assert_eq!(
            resolution,
            Resolution::Current(&Location::new("forest", "v1/tree.png"))
        );
    }

    #[test]
    fn same_collection_beats_longer_foreign_path() {
        let index = indexed("b.png", &[("y", "a/very/long/nested/path/b.png"), ("x", "a/b.png")]);

        let resolution = resolve(&index, &reference("x", "old/b.png"));

        assert_eq!(resolution, Resolution::Moved(&Location::new("x", "a/b.png")));
    }

    #[test]
    fn falls_back_to_longest_foreign_path() {
        let index = indexed("b.png", &[("y", "b.png"), ("z", "nested/b.png")]);

        let resolution = resolve(&index, &reference("x", "b.png"));

        assert_eq!(
            resolution,
            Resolution::Moved(&Location::new("z", "nested/b.png"))
        );
    }

    #[test]
    fn first_candidate_wins_equal_scores() {
        // Tie-breaking depends on index order.
        let index = indexed("b.png", &[("x", "one/b.png"), ("x", "two/b.png")]);
        let resolution = resolve(&index, &reference("x", "old/b.png"));
        assert_eq!(resolution, Resolution::Moved(&Location::new("x", "one/b.png")));

        let index = indexed("b.png", &[("x", "two/b.png"), ("x", "one/b.png")]);
        let resolution = resolve(&index, &reference("x", "old/b.png"));
        assert_eq!(resolution, Resolution::Moved(&Location::new("x", "two/b.png")));
    }

    #[test]
    fn bias_is_a_scaling_boundary_for_very_long_paths() {
        let long_path = format!("{}/b.png", "d".repeat(SAME_COLLECTION_BIAS + 10));
        let index = indexed("b.png", &[("x", "b.png"), ("y", long_path.as_str())]);

        let resolution = resolve(&index, &reference("x", "old/b.png"));

        assert_eq!(
            resolution,
            Resolution::Moved(&Location::new("y", long_path.as_str()))
        );
    }

    #[test]
    fn unknown_file_is_not_found() {
        let index = indexed("tree.png", &[("forest", "tree.png")]);
        let resolution = resolve(&index, &reference("forest", "rock.png"));
        assert_eq!(resolution, Resolution::NotFound(Miss::UnknownFile));
        assert_eq!(resolution.location(), None);
    }

    #[test]
    fn empty_candidate_fields_are_not_plausible() {
        let index = indexed("tree.png", &[("", "tree.png")]);
        let resolution = resolve(&index, &reference("forest", "v0/tree.png"));
        assert_eq!(resolution, Resolution::NotFound(Miss::NoPlausibleCandidate));

        let index = AssetIndex::from_iter([("tree.png", Location::new("forest", ""))]);
        let resolution = resolve(&index, &reference("other", "v0/tree.png"));
        assert_eq!(resolution, Resolution::NotFound(Miss::NoPlausibleCandidate));
    }

    #[test]
    fn resolving_does_not_touch_the_index() {
        let index = indexed("tree.png", &[("forest", "v1/tree.png")]);
        let before = index.clone();
        let _ = resolve(&index, &reference("forest", "v0/tree.png"));
        assert_eq!(index, before);
    }
}
