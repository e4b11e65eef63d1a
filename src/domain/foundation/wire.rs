//! Serde helpers for values as the record store holds them.

use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// A scalar cell: foreign keys come back as numbers from integer columns.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Text(String),
}

/// Decodes an optional field where the store uses `""` or `null` for "not selected".
///
/// Any other string, or an integer, must parse into `T`.
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = match Option::<Scalar>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Scalar::Int(n)) => n.to_string(),
        Some(Scalar::Text(text)) => text,
    };
    match raw.trim() {
        "" => Ok(None),
        value => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Decodes a text column that may come back as `null`.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
