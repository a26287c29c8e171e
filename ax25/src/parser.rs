//! Byte-driven AX.25 frame parser.
//!
//! Fed one byte at a time — typically drained from the modem's byte-stream
//! interface by [`Ax25Parser::poll`] — this reassembles HDLC-flag-delimited
//! frames, verifies the FCS, and decodes the address/control/PID/payload
//! structure of UI frames.
//!
//! Holds the whole frame in a fixed buffer and recomputes the CRC over the
//! non-FCS prefix once at close, rather than folding one byte at a time into
//! a running register — simpler to verify correct, at the cost of
//! rescanning up to `BUF_LEN` bytes per frame.

use crate::callsign::{Address, Callsign};
use crate::constants::{AX25_CTRL_UI, AX25_ESC, AX25_MAX_RPT, AX25_MIN_FRAME_LEN, HDLC_FLAG};
use crate::crc;
use crate::message::Ax25Message;

/// Fixed-capacity AX.25 frame reassembly buffer and parser state.
///
/// `BUF_LEN` must be at least [`AX25_MIN_FRAME_LEN`] to ever decode a frame,
/// and large enough to hold the largest frame the application expects.
pub struct Ax25Parser<const BUF_LEN: usize> {
    buffer: [u8; BUF_LEN],
    frame_len: usize,
    ready_len: Option<usize>,
    escape_seen: bool,
    sync: bool,
}

impl<const BUF_LEN: usize> Ax25Parser<BUF_LEN> {
    pub const fn new() -> Self {
        Self { buffer: [0u8; BUF_LEN], frame_len: 0, ready_len: None, escape_seen: false, sync: false }
    }

    /// Feeds one byte from the modem's byte-stream interface. Returns
    /// `true` if a verified frame is now ready — the caller should
    /// immediately call [`Ax25Parser::take`] before feeding more bytes, or
    /// the frame's buffer contents may be overwritten.
    ///
    /// An `AX25_ESC` byte the HDLC unstuffer inserted ahead of a literal
    /// `HDLC_FLAG`/`HDLC_RESET`/`AX25_ESC` marks the *next* byte as data
    /// regardless of its value — the flag/escape checks below only fire
    /// when no escape is pending, mirroring the ground-truth `!escape &&
    /// c == HDLC_FLAG` ordering.
    pub fn feed_byte(&mut self, byte: u8) -> bool {
        if self.escape_seen {
            self.escape_seen = false;
            return self.store_literal(byte);
        }
        if byte == HDLC_FLAG {
            return self.on_flag();
        }
        if byte == AX25_ESC {
            self.escape_seen = true;
            return false;
        }
        self.store_literal(byte)
    }

    /// Appends `byte` to the frame buffer if a frame is in progress
    /// (`sync`) and there's room; desyncs on overflow rather than decoding a
    /// truncated, definitely-invalid frame. Never reports a frame ready.
    fn store_literal(&mut self, byte: u8) -> bool {
        if !self.sync {
            return false;
        }
        if self.frame_len < BUF_LEN {
            self.buffer[self.frame_len] = byte;
            self.frame_len += 1;
        } else {
            self.sync = false;
            self.frame_len = 0;
        }
        false
    }

    fn on_flag(&mut self) -> bool {
        let mut ready = false;
        if self.sync && self.frame_len >= AX25_MIN_FRAME_LEN {
            let data_len = self.frame_len - 2;
            let fcs_lo = self.buffer[data_len];
            let fcs_hi = self.buffer[data_len + 1];
            if crc::verify(&self.buffer[..data_len], fcs_lo, fcs_hi) {
                self.ready_len = Some(data_len);
                ready = true;
            } else {
                #[cfg(feature = "log")]
                log::debug!("ax25: dropping frame with FCS mismatch ({data_len} bytes)");
            }
        }
        self.sync = true;
        self.frame_len = 0;
        self.escape_seen = false;
        ready
    }

    /// Decodes the most recently completed frame, if one is pending and
    /// hasn't already been taken.
    pub fn take(&mut self) -> Option<Ax25Message<'_>> {
        let len = self.ready_len.take()?;
        decode_frame(&self.buffer[..len])
    }

    /// Drains bytes from `next_byte` until it returns `None`, invoking
    /// `on_message` for each frame that passes FCS verification.
    pub fn poll(&mut self, mut next_byte: impl FnMut() -> Option<u8>, mut on_message: impl FnMut(Ax25Message<'_>)) {
        while let Some(byte) = next_byte() {
            if self.feed_byte(byte) {
                if let Some(msg) = self.take() {
                    on_message(msg);
                }
            }
        }
    }
}

impl<const BUF_LEN: usize> Default for Ax25Parser<BUF_LEN> {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_frame(data: &[u8]) -> Option<Ax25Message<'_>> {
    if data.len() < 7 + 7 + 1 {
        return None;
    }

    let dest_chunk: [u8; 7] = data[0..7].try_into().ok()?;
    let (destination, dest_is_last) = Address::decode(&dest_chunk);
    if dest_is_last {
        // A frame needs at least destination + source.
        return None;
    }

    let src_chunk: [u8; 7] = data[7..14].try_into().ok()?;
    let (source, mut is_last) = Address::decode(&src_chunk);

    let mut repeaters = [Address::new(Callsign::new(b"", 0), false); AX25_MAX_RPT];
    let mut repeater_count = 0;
    let mut offset = 14;
    while !is_last {
        if repeater_count >= AX25_MAX_RPT || offset + 7 > data.len() {
            return None;
        }
        let chunk: [u8; 7] = data[offset..offset + 7].try_into().ok()?;
        let (addr, last) = Address::decode(&chunk);
        repeaters[repeater_count] = addr;
        repeater_count += 1;
        is_last = last;
        offset += 7;
    }

    if offset >= data.len() {
        return None;
    }
    let control = data[offset];
    offset += 1;

    let pid = if control == AX25_CTRL_UI {
        let p = *data.get(offset)?;
        offset += 1;
        p
    } else {
        0
    };

    let payload = &data[offset..];
    Some(Ax25Message::new(destination, source, repeaters, repeater_count, control, pid, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::AX25_PID_NOLAYER3;
    use crate::emitter::encode_ui_frame;

    #[test]
    fn unsynced_bytes_before_the_first_flag_are_ignored() {
        let mut parser: Ax25Parser<64> = Ax25Parser::new();
        assert!(!parser.feed_byte(0x11));
        assert!(!parser.feed_byte(0x22));
        assert_eq!(parser.frame_len, 0);
    }

    #[test]
    fn single_ui_frame_round_trips_through_emit_and_parse() {
        let dst = Address::new(Callsign::new(b"ABCDEF", 0), false);
        let src = Address::new(Callsign::new(b"123456", 1), false);
        let payload: Vec<u8> = (0u8..=255).collect();

        let mut wire_buf = [0u8; 300];
        let wire_len = encode_ui_frame(dst, src, &[], &payload, &mut wire_buf).unwrap();

        let mut parser: Ax25Parser<300> = Ax25Parser::new();
        let mut received = 0;
        parser.feed_byte(HDLC_FLAG);
        for &b in &wire_buf[..wire_len] {
            if parser.feed_byte(b) {
                let msg = parser.take().expect("verified frame decodes");
                assert_eq!(msg.source, src);
                assert_eq!(msg.destination, dst);
                assert_eq!(msg.control, AX25_CTRL_UI);
                assert_eq!(msg.pid, AX25_PID_NOLAYER3);
                assert_eq!(msg.payload, payload.as_slice());
                received += 1;
            }
        }
        parser.feed_byte(HDLC_FLAG);
        assert_eq!(received, 1);
    }

    #[test]
    fn back_to_back_frames_are_each_delivered_once() {
        let dst = Address::new(Callsign::new(b"DEST", 0), false);
        let src = Address::new(Callsign::new(b"SRC", 0), false);

        let mut buf_a = [0u8; 64];
        let len_a = encode_ui_frame(dst, src, &[], b"first", &mut buf_a).unwrap();
        let mut buf_b = [0u8; 64];
        let len_b = encode_ui_frame(dst, src, &[], b"second", &mut buf_b).unwrap();

        let mut parser: Ax25Parser<128> = Ax25Parser::new();
        let mut frames: Vec<Vec<u8>> = Vec::new();

        parser.feed_byte(HDLC_FLAG);
        for &b in &buf_a[..len_a] {
            if parser.feed_byte(b) {
                frames.push(parser.take().unwrap().payload.to_vec());
            }
        }
        parser.feed_byte(HDLC_FLAG);
        for &b in &buf_b[..len_b] {
            if parser.feed_byte(b) {
                frames.push(parser.take().unwrap().payload.to_vec());
            }
        }
        parser.feed_byte(HDLC_FLAG);

        assert_eq!(frames, vec![b"first".to_vec(), b"second".to_vec()]);
    }

    #[test]
    fn corrupted_payload_byte_fails_fcs_and_nothing_is_delivered() {
        let dst = Address::new(Callsign::new(b"DEST", 0), false);
        let src = Address::new(Callsign::new(b"SRC", 0), false);
        let mut buf = [0u8; 64];
        let len = encode_ui_frame(dst, src, &[], b"payload", &mut buf).unwrap();
        buf[20] ^= 0x01;

        let mut parser: Ax25Parser<128> = Ax25Parser::new();
        let mut received = 0;
        parser.feed_byte(HDLC_FLAG);
        for &b in &buf[..len] {
            if parser.feed_byte(b) {
                if parser.take().is_some() {
                    received += 1;
                }
            }
        }
        parser.feed_byte(HDLC_FLAG);
        assert_eq!(received, 0);
    }

    #[test]
    fn frame_shorter_than_minimum_length_is_dropped() {
        let mut parser: Ax25Parser<64> = Ax25Parser::new();
        parser.feed_byte(HDLC_FLAG);
        for b in [0x01, 0x02, 0x03] {
            assert!(!parser.feed_byte(b));
        }
        assert!(!parser.feed_byte(HDLC_FLAG));
    }
}
