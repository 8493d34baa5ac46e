//! Custom serde helpers for edge node wire formats.

/// Deserializes `null` as `T::default()`.
///
/// The edge nodes send `null` for empty metadata strings and for hashes that
/// have no entries yet.
pub mod null_default {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
