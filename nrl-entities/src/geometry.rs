use std::{fmt, str::FromStr};

use thiserror::Error;

/// A serialized GeoJSON document (point, line or polygon) as drawn on the map.
///
/// The registry treats the content as opaque. Parsing only guarantees that
/// the document is a non-empty, syntactically valid JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryParseError {
    #[error("The geometry is empty")]
    Empty,
    #[error("The geometry is not a JSON object")]
    NotAnObject,
    #[error("Malformed geometry: {0}")]
    Malformed(String),
}

impl Geometry {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Geometry {
    type Err = GeometryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(GeometryParseError::Empty);
        }
        let value: serde_json::Value = serde_json::from_str(trimmed)
            .map_err(|err| GeometryParseError::Malformed(err.to_string()))?;
        if !value.is_object() {
            return Err(GeometryParseError::NotAnObject);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl From<Geometry> for String {
    fn from(from: Geometry) -> Self {
        from.0
    }
}

// Stored documents have been validated on insert.
impl From<String> for Geometry {
    fn from(from: String) -> Self {
        let res = Self(from);
        debug_assert!(res.0.parse::<Geometry>().is_ok());
        res
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
