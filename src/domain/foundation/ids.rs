//! Strongly-typed identifier value objects.
//!
//! Identifiers are assigned by the record store; the domain never mints
//! them for persisted records; `new()` exists for store adapters and tests.
//! A store may key its tables by integer identity columns or by UUIDs, so
//! both shapes are accepted and written back the way they were read.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// An identifier that is neither an integer nor a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid record identifier '{0}'")]
pub struct InvalidRecordKey(pub String);

/// Primary key of a stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// Integer identity column (`bigint generated ... as identity`).
    Int(i64),
    Uuid(Uuid),
}

impl RecordKey {
    fn random() -> Self {
        RecordKey::Uuid(Uuid::new_v4())
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Int(n) => write!(f, "{}", n),
            RecordKey::Uuid(uuid) => write!(f, "{}", uuid),
        }
    }
}

impl FromStr for RecordKey {
    type Err = InvalidRecordKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(RecordKey::Int(n));
        }
        Uuid::parse_str(trimmed)
            .map(RecordKey::Uuid)
            .map_err(|_| InvalidRecordKey(s.to_string()))
    }
}

impl Serialize for RecordKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordKey::Int(n) => serializer.serialize_i64(*n),
            RecordKey::Uuid(uuid) => serializer.collect_str(uuid),
        }
    }
}

/// Key as it appears in a JSON row: a number or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Int(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for RecordKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawKey::deserialize(deserializer)? {
            RawKey::Int(n) => Ok(RecordKey::Int(n)),
            RawKey::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Unique identifier for a prospect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProspectId(RecordKey);

impl ProspectId {
    /// Creates a new random ProspectId.
    pub fn new() -> Self {
        Self(RecordKey::random())
    }

    pub fn from_key(key: RecordKey) -> Self {
        Self(key)
    }

    pub fn key(&self) -> RecordKey {
        self.0
    }
}

impl Default for ProspectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProspectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProspectId {
    type Err = InvalidRecordKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier for a logged activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(RecordKey);

impl ActivityId {
    /// Creates a new random ActivityId.
    pub fn new() -> Self {
        Self(RecordKey::random())
    }

    pub fn from_key(key: RecordKey) -> Self {
        Self(key)
    }

    pub fn key(&self) -> RecordKey {
        self.0
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ActivityId {
    type Err = InvalidRecordKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
