//! Rewrites tile sources in a map document against the asset index.

use std::fmt;

use serde_json::value::RawValue;
use thiserror::Error;
use tracing::{debug, warn};

use super::document::{MapDocument, RawObject, decode, encode};
use crate::asset_paths::{Miss, ReferenceError, Resolution, parse_source, resolve};
use crate::error::{RelinkError, Result};
use crate::models::{AssetIndex, Location, ParsedSource};

const LAYERS_KEY: &str = "layers";
const TILES_KEY: &str = "tiles";
const SOURCE_KEY: &str = "source";

/// A tile that could not be repaired. The tile is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileIssue {
    /// The tile object has no `source` key.
    #[error("no tile source found")]
    MissingSource,
    /// The `source` value is not a JSON string.
    #[error("incorrect tile source (not a string)")]
    SourceNotString,
    /// The source has no collection separator.
    #[error(transparent)]
    Unparseable(#[from] ReferenceError),
    /// No indexed image carries the referenced file name.
    #[error("unknown tile {file_name} ({raw})")]
    UnknownFile {
        /// Bare file name looked up in the index.
        file_name: String,
        /// Raw tile source.
        raw: String,
    },
    /// Images with the file name exist but none is usable.
    #[error("no plausible candidate for {raw}")]
    NoCandidate {
        /// Raw tile source.
        raw: String,
    },
}

/// One-based position of a tile within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePosition {
    /// Layer number.
    pub layer: usize,
    /// Tile number within the layer.
    pub tile: usize,
}

impl fmt::Display for TilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer {} tile {}", self.layer, self.tile)
    }
}

/// A recoverable issue together with the tile it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileWarning {
    /// Where the tile sits.
    pub position: TilePosition,
    /// What went wrong.
    pub issue: TileIssue,
}

impl fmt::Display for TileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.issue)
    }
}

/// Summary of a patch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Tiles whose source was rewritten.
    pub rewritten: usize,
    /// Tiles already pointing at an indexed location.
    pub unchanged: usize,
    /// Blank tiles that were skipped.
    pub blank: usize,
    /// Empty grid cells (`null` entries).
    pub empty: usize,
    /// Tiles left untouched because of an issue.
    pub warnings: Vec<TileWarning>,
    /// Whether the document changed.
    pub modified: bool,
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rewritten, {} unchanged, {} blank, {} empty, {} unresolved",
            self.rewritten,
            self.unchanged,
            self.blank,
            self.empty,
            self.warnings.len()
        )
    }
}

enum TileAction<'a> {
    Blank,
    Keep,
    Rewrite { from: String, to: &'a Location },
}

/// Visit every tile of every layer and point moved sources at their best indexed match.
///
/// Missing `layers` or `tiles` keys and malformed JSON are fatal. Per-tile problems are
/// logged, recorded in the report and skipped. Only modified tiles, layers and the
/// `layers` array are re-encoded; every other value keeps its original bytes.
pub fn patch_document(document: &mut MapDocument, index: &AssetIndex) -> Result<PatchReport> {
    let layers_raw = document
        .field(LAYERS_KEY)
        .ok_or_else(|| RelinkError::MissingField {
            field: LAYERS_KEY,
            context: "map document".into(),
        })?;
    let mut layers: Vec<Box<RawValue>> = decode(layers_raw, LAYERS_KEY)?;

    let mut report = PatchReport::default();
    for (position, layer) in layers.iter_mut().enumerate() {
        if let Some(updated) = patch_layer(layer, position + 1, index, &mut report)? {
            *layer = updated;
            report.modified = true;
        }
    }

    if report.modified {
        document.set_field(LAYERS_KEY, encode(&layers, LAYERS_KEY)?);
    }
    Ok(report)
}

fn patch_layer(
    raw: &RawValue,
    layer: usize,
    index: &AssetIndex,
    report: &mut PatchReport,
) -> Result<Option<Box<RawValue>>> {
    let context = format!("layer {layer}");
    let mut fields: RawObject = decode(raw, &context)?;
    let tiles_raw = fields
        .get(TILES_KEY)
        .ok_or_else(|| RelinkError::MissingField {
            field: TILES_KEY,
            context: context.clone(),
        })?;
    let mut tiles: Vec<Box<RawValue>> = decode(tiles_raw, &format!("{context} tiles"))?;

    let mut modified = false;
    for (offset, tile_raw) in tiles.iter_mut().enumerate() {
        let position = TilePosition {
            layer,
            tile: offset + 1,
        };
        let tile: Option<RawObject> = decode(tile_raw, &position.to_string())?;
        let Some(mut tile) = tile else {
            report.empty += 1;
            continue;
        };

        match inspect_tile(&tile, index) {
            Ok(TileAction::Blank) => report.blank += 1,
            Ok(TileAction::Keep) => report.unchanged += 1,
            Ok(TileAction::Rewrite { from, to }) => {
                debug!(%position, from = %from, to = %to, "rewriting tile source");
                let context = position.to_string();
                tile.insert(SOURCE_KEY.into(), encode(&to.to_source(), &context)?);
                *tile_raw = encode(&tile, &context)?;
                report.rewritten += 1;
                modified = true;
            }
            Err(issue) => {
                let warning = TileWarning { position, issue };
                warn!("{warning}");
                report.warnings.push(warning);
            }
        }
    }

    if !modified {
        return Ok(None);
    }
    fields.insert(TILES_KEY.into(), encode(&tiles, &context)?);
    encode(&fields, &context).map(Some)
}

fn inspect_tile<'a>(
    tile: &RawObject,
    index: &'a AssetIndex,
) -> std::result::Result<TileAction<'a>, TileIssue> {
    let raw = tile.get(SOURCE_KEY).ok_or(TileIssue::MissingSource)?;
    let source: String =
        serde_json::from_str(raw.get()).map_err(|_| TileIssue::SourceNotString)?;

    let reference = match parse_source(&source)? {
        ParsedSource::Blank => return Ok(TileAction::Blank),
        ParsedSource::Reference(reference) => reference,
    };

    match resolve(index, &reference) {
        Resolution::Current(_) => Ok(TileAction::Keep),
        Resolution::Moved(location) => Ok(TileAction::Rewrite {
            from: source,
            to: location,
        }),
        Resolution::NotFound(Miss::UnknownFile) => Err(TileIssue::UnknownFile {
            file_name: reference.file_name,
            raw: source,
        }),
        Resolution::NotFound(Miss::NoPlausibleCandidate) => {
            Err(TileIssue::NoCandidate { raw: source })
        }
    }
}
