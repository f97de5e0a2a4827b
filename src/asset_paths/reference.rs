use regex::Regex;
use thiserror::Error;

use super::filters::is_blank_source;
use crate::models::{ParsedSource, Reference};

/// Failure to split a tile source into collection and path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// No `:` separator between collection and path.
    #[error("missing separator in source ({0})")]
    MissingSeparator(String),
}

fn collection_separator() -> &'static Regex {
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r":/{0,2}").expect("invalid collection separator regex"))
}

/// Parse a raw tile source such as `forest:v1/tree.png` or `forest://v1/tree.png`.
///
/// The string is split on the first colon together with up to two following slashes. The
/// path token is returned untouched because the resolver compares it byte-for-byte with
/// indexed locations.
pub fn parse_source(raw: &str) -> Result<ParsedSource, ReferenceError> {
    if is_blank_source(raw) {
        return Ok(ParsedSource::Blank);
    }

    let separator = collection_separator()
        .find(raw)
        .ok_or_else(|| ReferenceError::MissingSeparator(raw.to_string()))?;
    let collection = &raw[..separator.start()];
    let path = &raw[separator.end()..];

    let file_name = match raw.rfind(['/', '\\']) {
        Some(pos) if pos >= separator.end() => &raw[pos + 1..],
        _ => path,
    };

    Ok(ParsedSource::Reference(Reference {
        collection: collection.to_string(),
        path: path.to_string(),
        file_name: file_name.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(raw: &str) -> Reference {
        match parse_source(raw).unwrap() {
            ParsedSource::Reference(reference) => reference,
            ParsedSource::Blank => panic!("{raw} parsed as blank"),
        }
    }

    #[test]
    fn splits_single_colon_sources() {
        let parsed = reference("forest:v0/tree.png");
        assert_eq!(parsed.collection, "forest");
        assert_eq!(parsed.path, "v0/tree.png");
        assert_eq!(parsed.file_name, "tree.png");
    }

    #[test]
    fn splits_url_style_sources() {
        let parsed = reference("forest://v2/deep/tree.png");
        assert_eq!(parsed.collection, "forest");
        assert_eq!(parsed.path, "v2/deep/tree.png");
        assert_eq!(parsed.file_name, "tree.png");
    }

    #[test]
    fn consumes_at_most_two_slashes() {
        let parsed = reference("forest:///abs/tree.png");
        assert_eq!(parsed.path, "/abs/tree.png");
    }

    #[test]
    fn takes_file_name_after_last_backslash() {
        let parsed = reference("Old Maps:terrain\\hills\\hill.png");
        assert_eq!(parsed.collection, "Old Maps");
        assert_eq!(parsed.path, "terrain\\hills\\hill.png");
        assert_eq!(parsed.file_name, "hill.png");
    }

    #[test]
    fn mixed_separators_use_the_last_one() {
        let parsed = reference("c:a\\b/c\\d.png");
        assert_eq!(parsed.file_name, "d.png");
    }

    #[test]
    fn whole_path_is_the_file_name_without_segments() {
        let parsed = reference("forest:tree.png");
        assert_eq!(parsed.path, "tree.png");
        assert_eq!(parsed.file_name, "tree.png");
    }

    #[test]
    fn blank_prefix_short_circuits() {
        assert_eq!(parse_source("Blank:Blank/blank.png"), Ok(ParsedSource::Blank));
        assert_eq!(parse_source("Blank:"), Ok(ParsedSource::Blank));
    }

    #[test]
    fn rejects_sources_without_separator() {
        assert_eq!(
            parse_source("tree.png"),
            Err(ReferenceError::MissingSeparator("tree.png".into()))
        );
        assert_eq!(
            parse_source("").unwrap_err().to_string(),
            "missing separator in source ()"
        );
    }
}
