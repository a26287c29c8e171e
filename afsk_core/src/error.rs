//! Error type shared by the lock-free FIFO and stack-allocated buffers.

use core::fmt;

/// Error conditions raised by `afsk_core`'s primitives.
///
/// This is a leaf `no_std` crate, so it uses a small `#[repr(C)]` enum with
/// a hand-written `Display` rather than pulling in a derive-macro crate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CoreError {
    /// A push was attempted against a full ring buffer or stack vector.
    Full,
    /// A pop/read was attempted against an empty ring buffer.
    Empty,
    /// The requested capacity is not a power of two (required for the
    /// ring buffer's masking arithmetic).
    CapacityNotPowerOfTwo,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Full => write!(f, "buffer full"),
            CoreError::Empty => write!(f, "buffer empty"),
            CoreError::CapacityNotPowerOfTwo => write!(f, "capacity is not a power of two"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}

/// Result type alias for `afsk_core` operations.
pub type Result<T> = core::result::Result<T, CoreError>;
