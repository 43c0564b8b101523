//! Junction identifiers and catalog entries.
//!
//! Identifiers show up in two shapes: bare integers (`1`) as the backend
//! expects them, and junction codes (`"J001"`) as typed by users. Both are
//! parsed into a single [`JunctionId`] at the edge.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canonical junction identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JunctionId(u32);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid junction id '{0}'")]
pub struct InvalidJunctionId(pub String);

impl JunctionId {
    /// Returns `None` for zero, which no junction uses.
    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// The integer form sent to the backend.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Reads an id out of a JSON value: either an integer or a string code.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .and_then(Self::new),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl FromStr for JunctionId {
    type Err = InvalidJunctionId;

    /// Accepts `"3"`, `"J3"`, `"j03"` and `"J003"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('J')
            .or_else(|| trimmed.strip_prefix('j'))
            .unwrap_or(trimmed);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidJunctionId(s.to_string()));
        }

        digits
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| InvalidJunctionId(s.to_string()))
    }
}

impl fmt::Display for JunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "J{}", self.0)
    }
}

impl Serialize for JunctionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

/// A named traffic intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Junction {
    pub id: JunctionId,
    pub name: String,
}

impl Junction {
    pub fn new(id: JunctionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// A junction known only by its number.
    pub fn unnamed(id: JunctionId) -> Self {
        Self::new(id, format!("Junction {}", id.get()))
    }

    /// Parses one catalog entry.
    ///
    /// The backend lists bare integers; other sources use objects with an
    /// `id` (or `junction_id`) and an optional `name`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        if let Some(id) = JunctionId::from_json(value) {
            return Some(Self::unnamed(id));
        }

        let id = JunctionId::from_json(&value["id"])
            .or_else(|| JunctionId::from_json(&value["junction_id"]))?;

        match value["name"].as_str().map(str::trim) {
            Some(name) if !name.is_empty() => Some(Self::new(id, name)),
            _ => Some(Self::unnamed(id)),
        }
    }
}
