//! Error type for the AX.25 emitter's fallible operations.
//!
//! The parser itself never returns this type: malformed frames and CRC
//! mismatches are dropped silently per spec, optionally logged at debug
//! level when the `log` feature is enabled.

/// Result type alias for `ax25` operations.
pub type Result<T> = core::result::Result<T, Ax25Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Ax25Error {
    /// Too many repeater addresses were supplied to the emitter.
    #[error("too many repeater addresses (max {max})")]
    TooManyRepeaters { max: usize },

    /// The payload, once framed with addresses/control/PID/FCS, would not
    /// fit in the caller-provided output buffer.
    #[error("encoded frame does not fit in the output buffer")]
    FrameTooLarge,

    /// The underlying byte sink reported it could not accept a byte
    /// (mirrors the modulator's TX-FIFO-full condition).
    #[error("byte sink rejected a write mid-frame")]
    SinkRejected,
}
