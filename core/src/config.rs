//! Buffer configuration for capacity limits and growth behavior.
//!
//! This module provides [`BufferConfig`] for controlling how a
//! [`ByteAccumulator`](crate::ByteAccumulator) allocates its storage.
//!
//! # Growth
//!
//! A buffer starts at `initial_capacity` bytes and only ever grows, by
//! doubling, when an append cannot fit even after already-consumed bytes
//! have been reclaimed. The default start of 64 KiB comfortably holds a
//! typical network read or file block, so most streams never grow at all.
//!
//! # Example
//!
//! ```ignore
//! use feedkit_core::config::BufferConfig;
//!
//! // 64 KiB to start, unbounded growth
//! let config = BufferConfig::default();
//!
//! // Small start, refuse to buffer more than 1 MiB of unread input
//! let config = BufferConfig::new()
//!     .with_initial_capacity(4 * 1024)
//!     .with_max_capacity(1024 * 1024);
//! ```

/// Default initial capacity of a stream buffer (64 KiB).
pub const DEFAULT_CAPACITY: usize = 64 * 1024;

/// Configuration for stream buffer allocation.
///
/// # Default Values
///
/// | Setting | Default | Rationale |
/// |---------|---------|-----------|
/// | `initial_capacity` | 64 KiB | Holds a typical read without growing |
/// | `max_capacity` | `usize::MAX` | No limit by default |
///
/// # Security Considerations
///
/// Without a ceiling, a producer that feeds faster than the scanner drains
/// grows the buffer without bound. Set `max_capacity` when chunks come from
/// an untrusted peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferConfig {
    /// Capacity allocated when the buffer is created.
    ///
    /// Values below 1 are treated as 1 so that doubling always makes
    /// progress.
    ///
    /// Default: 64 KiB
    pub initial_capacity: usize,

    /// Largest capacity the buffer may grow to.
    ///
    /// An append that would need more fails with
    /// [`StreamError::CapacityExceeded`](crate::StreamError::CapacityExceeded).
    ///
    /// Default: `usize::MAX` (no limit)
    pub max_capacity: usize,
}

impl Default for BufferConfig {
    /// Returns the default configuration.
    ///
    /// - `initial_capacity`: 64 KiB
    /// - `max_capacity`: `usize::MAX`
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BufferConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        initial_capacity: DEFAULT_CAPACITY,
        max_capacity: usize::MAX,
    };

    /// Creates a new configuration with default values.
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Configuration for short inputs such as single messages (4 KiB start).
    pub const fn small() -> Self {
        Self::DEFAULT.with_initial_capacity(4 * 1024)
    }

    /// Configuration for bulk inputs (1 MiB start).
    pub const fn large() -> Self {
        Self::DEFAULT.with_initial_capacity(1024 * 1024)
    }

    /// Sets the initial capacity.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Bytes to allocate up front. Clamped to at least 1.
    #[inline]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the maximum capacity.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Growth ceiling in bytes. Use `usize::MAX` to disable.
    #[inline]
    pub const fn with_max_capacity(mut self, capacity: usize) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Initial capacity actually allocated.
    #[inline]
    pub(crate) const fn effective_initial_capacity(&self) -> usize {
        if self.initial_capacity == 0 {
            1
        } else {
            self.initial_capacity
        }
    }
}

/// Configuration for a [`Driver`](crate::driver::Driver).
///
/// Scanner and parser settings belong to those types; the driver itself
/// only owns a stream buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverConfig {
    /// Configuration of the driver's stream buffer.
    pub buffer: BufferConfig,
}

impl DriverConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        buffer: BufferConfig::DEFAULT,
    };

    /// Creates a new configuration with default values.
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the buffer configuration.
    #[inline]
    pub const fn with_buffer(mut self, buffer: BufferConfig) -> Self {
        self.buffer = buffer;
        self
    }
}

impl Default for DriverConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_config_defaults() {
        let config = BufferConfig::default();
        assert_eq!(config.initial_capacity, 64 * 1024);
        assert_eq!(config.max_capacity, usize::MAX);
    }

    #[test]
    fn test_buffer_config_builder() {
        let config = BufferConfig::new()
            .with_initial_capacity(512)
            .with_max_capacity(4096);

        assert_eq!(config.initial_capacity, 512);
        assert_eq!(config.max_capacity, 4096);
    }

    #[test]
    fn test_buffer_config_presets() {
        assert_eq!(BufferConfig::small().initial_capacity, 4 * 1024);
        assert_eq!(BufferConfig::large().initial_capacity, 1024 * 1024);
        assert_eq!(BufferConfig::large().max_capacity, usize::MAX);
    }

    #[test]
    fn test_zero_initial_capacity_clamps() {
        let config = BufferConfig::new().with_initial_capacity(0);
        assert_eq!(config.effective_initial_capacity(), 1);
    }

    #[test]
    fn test_driver_config_carries_buffer() {
        let config = DriverConfig::new().with_buffer(BufferConfig::small());
        assert_eq!(config.buffer, BufferConfig::small());
        assert_eq!(DriverConfig::default().buffer, BufferConfig::DEFAULT);
    }
}
