//! Insertion-ordered parameter map with unique keys.

use deal_query_shared::{ErrorCode, ErrorEnvelope};
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;
use url::Url;

/// Failures while building a [`ParameterMap`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterMapError {
    /// A key was inserted twice.
    #[error("An item with the same key has already been added. Key: {key}")]
    DuplicateKey {
        /// Key that collided.
        key: String,
    },
}

impl From<ParameterMapError> for ErrorEnvelope {
    fn from(error: ParameterMapError) -> Self {
        let message = error.to_string();
        match error {
            ParameterMapError::DuplicateKey { key } => Self::expected(
                ErrorCode::new("domain", "duplicate_parameter_key"),
                message,
            )
            .with_metadata("key", key),
        }
    }
}

/// Ordered `key -> value` entries; keys are unique (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    entries: Vec<(String, String)>,
}

impl ParameterMap {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry, rejecting keys already present.
    pub fn try_insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ParameterMapError> {
        let index = self.entries.len();
        self.try_insert_at(index, key, value)
    }

    /// Insert an entry at `index` (clamped to the end), rejecting duplicates.
    pub(crate) fn try_insert_at(
        &mut self,
        index: usize,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ParameterMapError> {
        let key = key.into();
        if self.contains_key(&key) {
            return Err(ParameterMapError::DuplicateKey { key });
        }
        let index = index.min(self.entries.len());
        self.entries.insert(index, (key, value.into()));
        Ok(())
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Render as an `application/x-www-form-urlencoded` query string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Copy `base`, replacing its query with these entries.
    #[must_use]
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if self.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&self.to_query_string()));
        }
        url
    }
}

impl IntoIterator for ParameterMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for ParameterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Lower-case the first character, leaving the rest untouched.
#[must_use]
pub fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}
