//! Raw JSON envelope for map documents.
//!
//! Objects are decoded one level at a time into ordered maps of raw values, so untouched
//! keys and values are written back exactly as they were read.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::error::{RelinkError, Result};

/// JSON object whose values are kept undecoded, in document key order.
pub type RawObject = IndexMap<String, Box<RawValue>>;

/// A loaded map document.
#[derive(Debug)]
pub struct MapDocument {
    original: String,
    fields: RawObject,
    modified: bool,
}

impl MapDocument {
    /// Read a map document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| RelinkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(contents)
    }

    /// Parse a map document from JSON text. The top level must be an object.
    pub fn from_json(contents: impl Into<String>) -> Result<Self> {
        let original = contents.into();
        let fields: RawObject = serde_json::from_str(&original)
            .map_err(|err| RelinkError::json("map document", err))?;
        Ok(Self {
            original,
            fields,
            modified: false,
        })
    }

    /// Raw value stored under a top-level key.
    pub fn field(&self, key: &str) -> Option<&RawValue> {
        self.fields.get(key).map(|value| &**value)
    }

    /// Replace a top-level value, keeping its position in the key order.
    pub fn set_field(&mut self, key: &str, value: Box<RawValue>) {
        self.fields.insert(key.to_string(), value);
        self.modified = true;
    }

    /// Whether any top-level value has been replaced since loading.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Serialise the document.
    ///
    /// An unmodified document is returned exactly as it was read.
    pub fn to_json(&self) -> Result<String> {
        if !self.modified {
            return Ok(self.original.clone());
        }
        serde_json::to_string(&self.fields).map_err(|err| RelinkError::json("map document", err))
    }
}

pub(crate) fn decode<T: DeserializeOwned>(raw: &RawValue, context: &str) -> Result<T> {
    serde_json::from_str(raw.get()).map_err(|err| RelinkError::json(context, err))
}

pub(crate) fn encode<T: Serialize + ?Sized>(value: &T, context: &str) -> Result<Box<RawValue>> {
    serde_json::value::to_raw_value(value).map_err(|err| RelinkError::json(context, err))
}
