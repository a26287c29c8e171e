//! Core, allocation-free primitives shared by the AFSK modem and AX.25 stack.
//!
//! This crate has no dependency on `afsk_modem` or `ax25`; it exists so that
//! both can share the same lock-free FIFO, stack-allocated vector, and DDS
//! sine generator without either one depending on the other.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod dds;
pub mod error;
pub mod spsc;
pub mod stack_vec;

pub use dds::Dds;
pub use error::{CoreError, Result};
pub use spsc::Fifo;
pub use stack_vec::StackVec;
