/// Prefix reserved for tiles that intentionally reference no image.
pub const BLANK_SOURCE_PREFIX: &str = "Blank:";

/// File extension of the tile images collected into the index.
pub const IMAGE_EXTENSION: &str = ".png";

/// Determine whether a tile source denotes an intentionally empty tile.
///
/// Blank tiles are skipped before parsing so they never reach the resolver.
pub fn is_blank_source(value: &str) -> bool {
    value.starts_with(BLANK_SOURCE_PREFIX)
}

/// Determine whether a file name should be recorded in the asset index.
///
/// The comparison is case-sensitive: `tile.PNG` is not indexed.
pub fn is_tile_image(file_name: &str, extension: &str) -> bool {
    file_name.ends_with(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_blank_sources() {
        assert!(is_blank_source("Blank:Blank/blank.png"));
        assert!(is_blank_source("Blank:"));
        assert!(!is_blank_source("blank:grass.png"));
        assert!(!is_blank_source("Forest:Blank:odd.png"));
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        assert!(is_tile_image("tree.png", IMAGE_EXTENSION));
        assert!(!is_tile_image("tree.PNG", IMAGE_EXTENSION));
        assert!(!is_tile_image("tree.png.bak", IMAGE_EXTENSION));
    }
}
