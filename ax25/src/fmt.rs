//! Text rendering of a decoded message in the standard monitor form:
//! `SRC[-SSID]>DST[-SSID][,RPT1[-SSID][*][,…]]:payload\n`.
//!
//! Formatting needs a `core::fmt::Write` sink rather than an allocator, so
//! this works the same whether or not the `std`/`alloc` feature is enabled.

use core::fmt::{self, Write};

use crate::message::Ax25Message;

/// Writes `msg` in the standard monitor text form to `out`.
///
/// The payload is written as raw bytes reinterpreted lossily as UTF-8
/// (`core::str::from_utf8_lossy` is `alloc`-only, so non-UTF-8 bytes are
/// substituted with `?` one at a time instead of the usual replacement
/// character, to stay allocation-free).
pub fn write_message(out: &mut dyn Write, msg: &Ax25Message<'_>) -> fmt::Result {
    write!(out, "{}", msg.source)?;
    write!(out, ">{}", msg.destination)?;
    for rpt in msg.repeaters() {
        write!(out, ",{}", rpt.callsign)?;
        if rpt.has_repeated {
            out.write_char('*')?;
        }
    }
    out.write_char(':')?;
    for &byte in msg.payload {
        match byte {
            0x20..=0x7E => out.write_char(byte as char)?,
            _ => out.write_char('?')?,
        }
    }
    out.write_char('\n')
}
