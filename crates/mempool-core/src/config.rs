//! Pool configuration, validated at construction.

use crate::error::PoolCreationError;

/// Configuration for a [`crate::Pool`].
///
/// Validated once at construction; both fields are immutable afterward.
/// `capacity` bounds the arena size; `name` is purely diagnostic and shows
/// up in [`crate::PoolStats`] and `Debug` output.
#[derive(Clone, Debug)]
pub struct PoolConfig {
    capacity: usize,
    name: String,
}

impl PoolConfig {
    /// Default diagnostic name when none is supplied.
    pub const DEFAULT_NAME: &'static str = "Memory Pool";

    /// Build a config for the given capacity with the default name.
    ///
    /// `capacity` must be a positive `i64` so that accidental negative
    /// sizes (e.g. from an unchecked subtraction upstream) are rejected
    /// by type-correct validation rather than silently wrapping through
    /// `usize`.
    pub fn new(capacity: i64) -> Result<Self, PoolCreationError> {
        Self::with_name(capacity, Self::DEFAULT_NAME)
    }

    /// Build a config for the given capacity and diagnostic name.
    pub fn with_name(
        capacity: i64,
        name: impl Into<String>,
    ) -> Result<Self, PoolCreationError> {
        if capacity <= 0 {
            return Err(PoolCreationError::InvalidCapacity { capacity });
        }
        Ok(Self {
            capacity: capacity as usize,
            name: name.into(),
        })
    }

    /// The validated arena capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        let err = PoolConfig::new(0).unwrap_err();
        assert_eq!(err, PoolCreationError::InvalidCapacity { capacity: 0 });
    }

    #[test]
    fn negative_capacity_is_rejected() {
        let err = PoolConfig::new(-5).unwrap_err();
        assert_eq!(err, PoolCreationError::InvalidCapacity { capacity: -5 });
    }

    #[test]
    fn positive_capacity_is_accepted() {
        let config = PoolConfig::new(100).unwrap();
        assert_eq!(config.capacity(), 100);
        assert_eq!(config.name(), PoolConfig::DEFAULT_NAME);
    }

    #[test]
    fn custom_name_is_preserved() {
        let config = PoolConfig::with_name(64, "spill-pool").unwrap();
        assert_eq!(config.name(), "spill-pool");
    }
}
