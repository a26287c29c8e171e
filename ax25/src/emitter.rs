//! AX.25 UI-frame emitter.
//!
//! Two entry points: [`encode_ui_frame`] builds a complete frame (addresses
//! through FCS, no HDLC flags) into a caller-provided buffer, and
//! [`send_ui_frame`] streams the same bytes — flags included — through a
//! byte-sink closure, updating the running CRC as it goes rather than
//! building the frame in memory first.

use crate::callsign::Address;
use crate::constants::{AX25_CTRL_UI, AX25_ESC, AX25_MAX_RPT, AX25_PID_NOLAYER3, HDLC_FLAG, HDLC_RESET};
use crate::crc;
use crate::error::{Ax25Error, Result};

/// `true` if `byte` collides with a framing marker and must be preceded by
/// an [`AX25_ESC`] byte before it reaches the modulator's TX FIFO — mirrors
/// `Modulator::next_sample`'s escape handling (`afsk_modem::modulator`) on
/// the receiving end.
#[inline]
fn needs_escape(byte: u8) -> bool {
    matches!(byte, HDLC_FLAG | HDLC_RESET | AX25_ESC)
}

/// Writes `byte` to `out[*offset]`, preceded by an escape byte if `byte`
/// collides with a framing marker. Returns `Err(FrameTooLarge)` if `out`
/// doesn't have room for the (possibly escaped) byte.
#[inline]
fn push_escaped(out: &mut [u8], offset: &mut usize, byte: u8) -> Result<()> {
    if needs_escape(byte) {
        *out.get_mut(*offset).ok_or(Ax25Error::FrameTooLarge)? = AX25_ESC;
        *offset += 1;
    }
    *out.get_mut(*offset).ok_or(Ax25Error::FrameTooLarge)? = byte;
    *offset += 1;
    Ok(())
}

/// Encodes a UI frame (destination, source, up to [`AX25_MAX_RPT`]
/// repeaters, control `0x03`, PID `0xF0`, payload, FCS) into `out`,
/// returning the number of bytes written. Does not emit HDLC flags — the
/// byte-stream writer or [`send_ui_frame`] is responsible for those.
///
/// Every address/control/PID/payload/FCS byte that collides with
/// `HDLC_FLAG`, `HDLC_RESET`, or `AX25_ESC` is preceded by an `AX25_ESC`
/// byte, matching the escape the modulator's TX FIFO consumer expects
/// (`afsk_modem::modulator`); this can make the encoded frame longer than
/// the unescaped field sum, so `out` should be sized with headroom.
pub fn encode_ui_frame(destination: Address, source: Address, repeaters: &[Address], payload: &[u8], out: &mut [u8]) -> Result<usize> {
    if repeaters.len() > AX25_MAX_RPT {
        return Err(Ax25Error::TooManyRepeaters { max: AX25_MAX_RPT });
    }

    let mut offset = 0;
    let mut emit_address = |addr: Address, is_last: bool, out: &mut [u8], offset: &mut usize| -> Result<()> {
        for &b in &addr.encode(is_last) {
            push_escaped(out, offset, b)?;
        }
        Ok(())
    };

    emit_address(destination, false, out, &mut offset)?;
    emit_address(source, repeaters.is_empty(), out, &mut offset)?;
    for (i, &rpt) in repeaters.iter().enumerate() {
        emit_address(rpt, i + 1 == repeaters.len(), out, &mut offset)?;
    }

    push_escaped(out, &mut offset, AX25_CTRL_UI)?;
    push_escaped(out, &mut offset, AX25_PID_NOLAYER3)?;
    for &b in payload {
        push_escaped(out, &mut offset, b)?;
    }

    // CRC is computed over the *logical* (unescaped) bytes, so recompute it
    // from the original fields rather than trust the escaped buffer. The FCS
    // bytes themselves still pass through the same TX FIFO as everything
    // else, so they're escaped too, same as any other byte.
    let crc_value = crc_over_fields(destination, source, repeaters, payload);
    let [fcs_lo, fcs_hi] = crc::fcs_bytes(crc_value);
    push_escaped(out, &mut offset, fcs_lo)?;
    push_escaped(out, &mut offset, fcs_hi)?;

    Ok(offset)
}

/// Computes the FCS-input CRC over the logical (unescaped) address/control/
/// PID/payload bytes, independent of however those bytes end up laid out
/// (with or without escapes) on the wire.
fn crc_over_fields(destination: Address, source: Address, repeaters: &[Address], payload: &[u8]) -> u16 {
    let mut crc_reg = crc::CRC_INIT;
    for &b in &destination.encode(false) {
        crc_reg = crc::update(crc_reg, b);
    }
    for &b in &source.encode(repeaters.is_empty()) {
        crc_reg = crc::update(crc_reg, b);
    }
    for (i, &rpt) in repeaters.iter().enumerate() {
        for &b in &rpt.encode(i + 1 == repeaters.len()) {
            crc_reg = crc::update(crc_reg, b);
        }
    }
    crc_reg = crc::update(crc_reg, AX25_CTRL_UI);
    crc_reg = crc::update(crc_reg, AX25_PID_NOLAYER3);
    for &b in payload {
        crc_reg = crc::update(crc_reg, b);
    }
    crc_reg
}

/// Streams a UI frame through `write_byte`, surrounded by opening and
/// closing HDLC flags, computing the FCS incrementally rather than
/// buffering the whole frame. `write_byte` returns `false` if the sink
/// rejected the byte (mirrors a modulator TX FIFO that refuses to accept
/// more data); in that case the send aborts immediately with
/// [`Ax25Error::SinkRejected`].
///
/// Like [`encode_ui_frame`], every address/control/PID/payload/FCS byte that
/// collides with `HDLC_FLAG`, `HDLC_RESET`, or `AX25_ESC` is preceded by an
/// `AX25_ESC` byte; the CRC folds in the logical byte only, never the
/// escape itself.
pub fn send_ui_frame(destination: Address, source: Address, repeaters: &[Address], payload: &[u8], mut write_byte: impl FnMut(u8) -> bool) -> Result<()> {
    if repeaters.len() > AX25_MAX_RPT {
        return Err(Ax25Error::TooManyRepeaters { max: AX25_MAX_RPT });
    }

    if !write_byte(HDLC_FLAG) {
        return Err(Ax25Error::SinkRejected);
    }

    let mut crc_reg = crc::CRC_INIT;
    let mut put_escaped = |byte: u8| -> Result<()> {
        if needs_escape(byte) && !write_byte(AX25_ESC) {
            return Err(Ax25Error::SinkRejected);
        }
        if write_byte(byte) {
            Ok(())
        } else {
            Err(Ax25Error::SinkRejected)
        }
    };
    let mut put = |byte: u8, crc_reg: &mut u16| -> Result<()> {
        *crc_reg = crc::update(*crc_reg, byte);
        put_escaped(byte)
    };

    let addresses_done = repeaters.is_empty();
    for &b in &destination.encode(false) {
        put(b, &mut crc_reg)?;
    }
    for &b in &source.encode(addresses_done) {
        put(b, &mut crc_reg)?;
    }
    for (i, &rpt) in repeaters.iter().enumerate() {
        for &b in &rpt.encode(i + 1 == repeaters.len()) {
            put(b, &mut crc_reg)?;
        }
    }

    put(AX25_CTRL_UI, &mut crc_reg)?;
    put(AX25_PID_NOLAYER3, &mut crc_reg)?;
    for &b in payload {
        put(b, &mut crc_reg)?;
    }

    let [fcs_lo, fcs_hi] = crc::fcs_bytes(crc_reg);
    put_escaped(fcs_lo)?;
    put_escaped(fcs_hi)?;

    if !write_byte(HDLC_FLAG) {
        return Err(Ax25Error::SinkRejected);
    }

    Ok(())
}
