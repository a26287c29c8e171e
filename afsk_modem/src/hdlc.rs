//! HDLC bit-level unstuffer: turns a decoded NRZI bitstream into framed bytes.
//!
//! Bytes emitted by this state machine (including the `HDLC_FLAG` delimiter
//! and any `AX25_ESC` escapes ahead of a literal that collides with a
//! framing byte) are pushed into the RX byte FIFO for the AX.25 layer to
//! reassemble.

use afsk_core::Fifo;

/// HDLC opening/closing flag: `0111 1110`.
pub const HDLC_FLAG: u8 = 0x7E;
/// Seven or more consecutive 1-bits: an abort/reset pattern.
pub const HDLC_RESET: u8 = 0x7F;
/// In-band escape byte the unstuffer inserts ahead of a literal
/// `HDLC_FLAG`/`HDLC_RESET`/`AX25_ESC` byte in the decoded stream.
pub const AX25_ESC: u8 = 0x1B;

/// Bit-level HDLC unstuffing state machine.
///
/// Owned exclusively by the demodulator ISR: foreground code must never
/// touch this directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct HdlcUnstuffer {
    demod_bits: u8,
    currchar: u8,
    bit_idx: u8,
    rxstart: bool,
}

impl HdlcUnstuffer {
    pub const fn new() -> Self {
        Self { demod_bits: 0, currchar: 0, bit_idx: 0, rxstart: false }
    }

    /// Feeds one NRZI-decoded bit through the unstuffer, pushing completed
    /// bytes (and the flag/escape markers) into `fifo`.
    ///
    /// Returns `false` if a push failed because `fifo` was full — the caller
    /// (the demodulator) is responsible for setting the RX overrun status
    /// bit when this happens.
    pub fn push_bit<const N: usize>(&mut self, bit: bool, fifo: &Fifo<N>) -> bool {
        self.demod_bits = (self.demod_bits << 1) | (bit as u8);

        if self.demod_bits == HDLC_FLAG {
            #[cfg(feature = "log")]
            log::trace!("hdlc: flag");
            let ok = fifo.try_push(HDLC_FLAG).is_ok();
            self.rxstart = ok;
            self.currchar = 0;
            self.bit_idx = 0;
            return ok;
        }

        if (self.demod_bits & HDLC_RESET) == HDLC_RESET {
            #[cfg(feature = "log")]
            log::trace!("hdlc: reset pattern, desyncing");
            self.rxstart = false;
            return true;
        }

        if !self.rxstart {
            return true;
        }

        // Stuffed 0 after five consecutive 1s: drop it, don't shift into currchar.
        if (self.demod_bits & 0x3F) == 0x3E {
            return true;
        }

        if self.demod_bits & 0x01 != 0 {
            self.currchar |= 0x80;
        }

        self.bit_idx += 1;
        if self.bit_idx >= 8 {
            let mut ok = true;
            if self.currchar == HDLC_FLAG || self.currchar == HDLC_RESET || self.currchar == AX25_ESC {
                if fifo.try_push(AX25_ESC).is_err() {
                    self.rxstart = false;
                    ok = false;
                }
            }
            if ok {
                #[cfg(feature = "log")]
                log::trace!("hdlc: byte {:#04x}", self.currchar);
                if fifo.try_push(self.currchar).is_err() {
                    self.rxstart = false;
                    ok = false;
                }
            }
            self.currchar = 0;
            self.bit_idx = 0;
            ok
        } else {
            self.currchar >>= 1;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_byte_lsb_first(hdlc: &mut HdlcUnstuffer, byte: u8, fifo: &Fifo<32>) {
        for i in 0..8 {
            hdlc.push_bit((byte >> i) & 1 != 0, fifo);
        }
    }

    #[test]
    fn flag_opens_frame_and_is_pushed_verbatim() {
        let fifo: Fifo<32> = Fifo::new();
        let mut hdlc = HdlcUnstuffer::new();
        push_byte_lsb_first(&mut hdlc, HDLC_FLAG, &fifo);
        assert_eq!(fifo.try_pop(), Some(HDLC_FLAG));
        assert!(hdlc.rxstart);
    }

    #[test]
    fn reset_pattern_closes_rxstart_without_emitting() {
        let fifo: Fifo<32> = Fifo::new();
        let mut hdlc = HdlcUnstuffer::new();
        push_byte_lsb_first(&mut hdlc, HDLC_FLAG, &fifo);
        fifo.try_pop();
        for _ in 0..7 {
            hdlc.push_bit(true, &fifo);
        }
        assert!(!hdlc.rxstart);
        assert_eq!(fifo.try_pop(), None);
    }

    #[test]
    fn ordinary_byte_round_trips_after_flag() {
        let fifo: Fifo<32> = Fifo::new();
        let mut hdlc = HdlcUnstuffer::new();
        push_byte_lsb_first(&mut hdlc, HDLC_FLAG, &fifo);
        assert_eq!(fifo.try_pop(), Some(HDLC_FLAG));

        push_byte_lsb_first(&mut hdlc, 0x42, &fifo);
        assert_eq!(fifo.try_pop(), Some(0x42));
    }

    #[test]
    fn currchar_colliding_with_framing_byte_is_escaped() {
        let fifo: Fifo<32> = Fifo::new();
        let mut hdlc = HdlcUnstuffer::new();
        hdlc.rxstart = true;

        push_byte_lsb_first(&mut hdlc, AX25_ESC, &fifo);

        // The unstuffer must push an escape ahead of the literal byte so the
        // AX.25 layer knows the next byte is data, not a framing marker.
        assert_eq!(fifo.try_pop(), Some(AX25_ESC));
        assert_eq!(fifo.try_pop(), Some(AX25_ESC));
        assert_eq!(fifo.try_pop(), None);
    }

    #[test]
    fn bits_before_rxstart_are_ignored() {
        let fifo: Fifo<32> = Fifo::new();
        let mut hdlc = HdlcUnstuffer::new();
        push_byte_lsb_first(&mut hdlc, 0xAA, &fifo);
        assert_eq!(fifo.try_pop(), None);
    }
}
