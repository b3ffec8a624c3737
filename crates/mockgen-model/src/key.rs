//! Entity keys
//!
//! Provides [`EntityKey`] for attributing generated output to its source entity.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Stable identifier of a resolved entity
///
/// Usually the fully qualified declaration path, e.g. `storage.BlobStore`.
/// Keys are compared and ordered as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    /// Create key from any string-like value
    ///
    /// No validation is performed; use [`FromStr`] to reject blank keys.
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EntityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntityKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl FromStr for EntityKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(KeyError::Empty);
        }
        if trimmed.split('.').any(str::is_empty) {
            return Err(KeyError::EmptySegment(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Entity key parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// Key is blank
    #[error("entity key cannot be empty")]
    Empty,

    /// Key contains an empty `.` segment
    #[error("entity key has an empty segment: '{0}'")]
    EmptySegment(String),
}
