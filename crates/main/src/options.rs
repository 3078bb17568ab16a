//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`SignatureRegistry`](crate::SignatureRegistry).
///
/// Deserializable from JSON; missing keys take their defaults.
///
/// ```rust
/// use tysig::Options;
///
/// let options = Options::from_json(r#"{"registry_shards": 8}"#).unwrap();
/// assert_eq!(options.shard_amount(), Some(8));
/// assert_eq!(options.registry_capacity, 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Options {
    /// Number of map shards. Rounded up to a power of two, at least 2.
    /// `None` lets the map pick from the available parallelism.
    pub registry_shards: Option<usize>,
    /// Number of type pairs to reserve room for up front.
    pub registry_capacity: usize,
}

impl Options {
    #[must_use]
    /// Use a fixed number of registry shards.
    pub fn with_registry_shards(mut self, shards: usize) -> Self {
        self.registry_shards = Some(shards);
        self
    }

    #[must_use]
    /// Let the registry pick its shard count.
    pub fn without_registry_shards(mut self) -> Self {
        self.registry_shards = None;
        self
    }

    #[must_use]
    /// Reserve room for `capacity` type pairs.
    pub fn with_registry_capacity(mut self, capacity: usize) -> Self {
        self.registry_capacity = capacity;
        self
    }

    /// Shard count as the map requires it: a power of two greater than one.
    #[must_use]
    pub fn shard_amount(&self) -> Option<usize> {
        self.registry_shards
            .map(|shards| shards.max(2).next_power_of_two())
    }

    /// Decode options from JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
