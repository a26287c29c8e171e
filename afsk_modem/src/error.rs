//! Error type for the modem's foreground-facing operations.

/// Result type alias for `afsk_modem` operations.
pub type Result<T> = core::result::Result<T, ModemError>;

/// Errors surfaced to foreground callers of the modem's byte-stream interface.
///
/// The two ISR step functions (`Demodulator::process_sample`,
/// `Modulator::next_sample`) never return this type — the hot path has no
/// panic/error path and instead reports trouble through the sticky status
/// bitmap (see [`crate::context::RXFIFO_OVERRUN`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ModemError {
    /// The RX byte FIFO overran: the demodulator dropped at least one byte.
    #[error("RX FIFO overrun")]
    RxOverrun,

    /// The TX FIFO emptied in the middle of an escape sequence, stranding
    /// the modulator mid-byte. This is an accepted, unrecoverable race
    /// rather than one papered over with retries.
    #[error("TX FIFO starved during an escape sequence; transmission aborted")]
    TxEscapeStarved,
}
