//! Helpers for parsing tile sources and resolving them against the asset index.
//!
//! The responsibilities are split into focused submodules so that filtering sources,
//! splitting references and scoring candidates can be tested independently. Nothing in
//! here touches the filesystem.

mod filters;
mod reference;
mod resolve;

pub use filters::{BLANK_SOURCE_PREFIX, IMAGE_EXTENSION, is_blank_source, is_tile_image};
pub use reference::{ReferenceError, parse_source};
pub use resolve::{Miss, Resolution, SAME_COLLECTION_BIAS, resolve};
