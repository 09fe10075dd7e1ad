//! Lenient deserializers for records coming back from the CMS API.
//!
//! The API omits fields freely and sometimes sends `null` where an object or
//! string is expected; loaded forms must still bind to concrete values.

use serde::{Deserialize, Deserializer};

use crate::rating::Rating;

/// `null` becomes `T::default()`. Pair with `#[serde(default)]` for absent keys.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn default_true() -> bool { true }

/// `null` becomes `true`. Pair with `#[serde(default = "default_true")]`.
pub fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRating {
    Number(f64),
    Text(String),
}

/// Ratings arrive as numbers or numeric strings; empty, `null` and values off
/// the half-point scale leave the rating unset.
pub fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<Rating>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawRating>::deserialize(deserializer)?;
    let value = match raw {
        None => return Ok(None),
        Some(RawRating::Number(n)) => n,
        Some(RawRating::Text(s)) => match s.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => return Ok(None),
        },
    };
    Ok(Rating::try_from(value).ok())
}
