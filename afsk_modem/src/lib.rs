//! 1200 baud AFSK soft modem: DDS modulator, IIR-discriminator demodulator,
//! and the HDLC bit framer sitting between them.
//!
//! This crate implements the DSP + framing core only; the AX.25 link-layer
//! parser/emitter that rides on top of the byte-stream interface lives in
//! the sibling `ax25` crate.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod config;
pub mod context;
pub mod demodulator;
pub mod error;
pub mod filter;
pub mod hal;
pub mod hdlc;
pub mod modulator;
pub mod stream;

pub use config::ModemConfig;
pub use context::ModemContext;
pub use error::{ModemError, Result};
pub use stream::ModemStream;
