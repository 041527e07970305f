//! Cache key type shared by the item cache port and its adapters.

use thiserror::Error;

use crate::domain::item::ItemId;

/// Namespace prefix for every inventory cache entry.
const KEY_PREFIX: &str = "items";

/// Cache key addressing either the full item collection or a single item.
///
/// # Examples
/// ```
/// use stockroom::domain::ports::CacheKey;
///
/// let key = CacheKey::collection();
/// assert_eq!(key.as_str(), "items:all");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for the cached serialized list of all items.
    pub fn collection() -> Self {
        Self(format!("{KEY_PREFIX}:all"))
    }

    /// Key for a single cached item.
    pub fn item(id: &ItemId) -> Self {
        Self(format!("{KEY_PREFIX}:{id}"))
    }

    /// Construct a key from a raw string, validating shape.
    ///
    /// Adapters normally use the [`CacheKey::collection`] and
    /// [`CacheKey::item`] constructors; this exists for tests and tooling.
    pub fn parse(value: impl Into<String>) -> Result<Self, CacheKeyValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(CacheKeyValidationError::Empty);
        }
        if raw.trim() != raw || raw.chars().any(char::is_whitespace) {
            return Err(CacheKeyValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`CacheKey`] from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheKeyValidationError {
    /// Key is empty after trimming whitespace.
    #[error("cache key must not be empty")]
    Empty,
    /// Key contains whitespace.
    #[error("cache key must not contain whitespace")]
    ContainsWhitespace,
}
