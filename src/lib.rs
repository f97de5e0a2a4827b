#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod config;
pub mod discovery;
pub mod error;
pub mod index;
pub mod logging;
pub mod map;
pub mod models;

pub use asset_paths::{Resolution, parse_source, resolve};
pub use config::CollectionSettings;
pub use discovery::{PlatformLocator, SettingsLocator, locate_settings};
pub use error::{RelinkError, Result};
pub use index::{AssetIndexBuilder, CollectionRoot};
pub use map::{MapDocument, PatchReport, patch_document, patch_json};
pub use models::{AssetIndex, Location, ParsedSource, Reference};
