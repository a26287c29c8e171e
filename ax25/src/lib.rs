//! AX.25 packet-radio link layer: address codec, CRC-16-CCITT FCS, and a
//! byte-driven frame parser/emitter riding on top of a modem's byte-stream
//! interface.
//!
//! This crate has no dependency on `afsk_modem` — the parser and emitter
//! are fed and drained through plain closures, so any byte source/sink
//! (a real modem, a KISS TNC, a test fixture) can supply them.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod callsign;
pub mod constants;
pub mod crc;
pub mod emitter;
pub mod error;
pub mod fmt;
pub mod message;
pub mod parser;

pub use callsign::{Address, Callsign};
pub use emitter::{encode_ui_frame, send_ui_frame};
pub use error::{Ax25Error, Result};
pub use message::Ax25Message;
pub use parser::Ax25Parser;
