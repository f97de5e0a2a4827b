//! Map document loading and tile source patching.

mod document;
mod patch;

pub use document::{MapDocument, RawObject};
pub use patch::{PatchReport, TileIssue, TilePosition, TileWarning, patch_document};

use crate::error::Result;
use crate::models::AssetIndex;

/// Patch a JSON map held in memory, returning the repaired JSON and the run report.
pub fn patch_json(contents: &str, index: &AssetIndex) -> Result<(String, PatchReport)> {
    let mut document = MapDocument::from_json(contents)?;
    let report = patch_document(&mut document, index)?;
    Ok((document.to_json()?, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    #[test]
    fn repairs_the_forest_scenario() {
        let index: AssetIndex = [
            ("tree.png", Location::new("forest", "v1/tree.png")),
            ("tree.png", Location::new("forest", "v2/deep/tree.png")),
        ]
        .into_iter()
        .collect();

        let (output, report) =
            patch_json(r#"{"layers":[{"tiles":[{"source":"forest:v0/tree.png"}]}]}"#, &index)
                .unwrap();

        assert_eq!(
            output,
            r#"{"layers":[{"tiles":[{"source":"forest://v2/deep/tree.png"}]}]}"#
        );
        assert_eq!(
            report.to_string(),
            "1 rewritten, 0 unchanged, 0 blank, 0 empty, 0 unresolved"
        );
    }
}
