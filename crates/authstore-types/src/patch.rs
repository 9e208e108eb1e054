//! Serde support for nullable patch fields.
//!
//! A patch field of type `Option<Option<T>>` has three states: absent
//! (`None`, column untouched), `null` (`Some(None)`, column cleared) and a
//! value (`Some(Some(v))`, column set). Plain `Option` deserialisation folds
//! the first two together, so nullable patch fields route through
//! [`deserialize_nullable`] and carry `#[serde(default)]`.

use serde::{Deserialize, Deserializer};

/// Deserialises a present field (value or `null`) as `Some(..)`.
pub(crate) fn deserialize_nullable<'de, D, T>(
    deserializer: D,
) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
