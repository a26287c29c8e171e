//! Callsign and AX.25 address-field codec.
//!
//! Six ASCII characters, space-padded, plus a 0..15 SSID. On the wire each
//! of the six callsign bytes is left-shifted by one bit; the seventh byte
//! packs the SSID together with the command/has-repeated bit and the
//! end-of-address marker.

use core::fmt;

/// A bare callsign: six space-padded ASCII characters plus an SSID.
///
/// Does not carry the "has-been-repeated" bit — that only applies to
/// digipeater [`Address`] entries, never to the destination or source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Callsign {
    chars: [u8; 6],
    ssid: u8,
}

impl Callsign {
    /// Builds a callsign from a string of up to 6 uppercase alphanumeric
    /// characters (shorter calls are space-padded) and an SSID in 0..=15.
    ///
    /// Panics if `call` is longer than 6 bytes or `ssid` exceeds 15 — both
    /// are programmer errors at the call site, not runtime conditions.
    pub const fn new(call: &[u8], ssid: u8) -> Self {
        assert!(call.len() <= 6, "callsign must be at most 6 characters");
        assert!(ssid <= 15, "SSID must be in 0..=15");

        let mut chars = [b' '; 6];
        let mut i = 0;
        while i < call.len() {
            chars[i] = call[i];
            i += 1;
        }
        Self { chars, ssid }
    }

    /// The six-character, space-padded callsign.
    pub const fn chars(&self) -> [u8; 6] {
        self.chars
    }

    /// The callsign trimmed of trailing padding, as a `&str`. Callers that
    /// need an owned `String` can do so on the `std`/`alloc` side; this
    /// crate stays allocation-free.
    pub fn as_str(&self) -> &str {
        let len = self.chars.iter().rposition(|&c| c != b' ').map_or(0, |i| i + 1);
        core::str::from_utf8(&self.chars[..len]).unwrap_or("")
    }

    pub const fn ssid(&self) -> u8 {
        self.ssid
    }
}

impl fmt::Display for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ssid == 0 {
            write!(f, "{}", self.as_str())
        } else {
            write!(f, "{}-{}", self.as_str(), self.ssid)
        }
    }
}

/// One 7-byte address-field entry: a callsign plus, for digipeater
/// entries, the "has-been-repeated" bit (the `*` suffix in text form).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    pub callsign: Callsign,
    /// Command bit for source/destination, or has-repeated for a digipeater.
    pub has_repeated: bool,
}

impl Address {
    pub const fn new(callsign: Callsign, has_repeated: bool) -> Self {
        Self { callsign, has_repeated }
    }

    /// Encodes this address into its 7-byte wire form. `is_last` sets the
    /// end-of-address LSB on the SSID byte (`CRR SSID E`).
    pub fn encode(&self, is_last: bool) -> [u8; 7] {
        let mut out = [0u8; 7];
        for (i, &c) in self.callsign.chars().iter().enumerate() {
            out[i] = c << 1;
        }
        let c_bit = if self.has_repeated { 0x80 } else { 0x00 };
        let reserved = 0x60;
        let ssid_bits = (self.callsign.ssid() & 0x0F) << 1;
        let e_bit = if is_last { 0x01 } else { 0x00 };
        out[6] = c_bit | reserved | ssid_bits | e_bit;
        out
    }

    /// Decodes a 7-byte address field. Returns the address and whether this
    /// was the final address in the field (the `E` bit).
    pub fn decode(raw: &[u8; 7]) -> (Self, bool) {
        let mut chars = [0u8; 6];
        for (i, slot) in chars.iter_mut().enumerate() {
            *slot = raw[i] >> 1;
        }
        let ssid_byte = raw[6];
        let ssid = (ssid_byte >> 1) & 0x0F;
        let has_repeated = ssid_byte & 0x80 != 0;
        let is_last = ssid_byte & 0x01 != 0;
        let callsign = Callsign::new(&chars, ssid);
        (Self::new(callsign, has_repeated), is_last)
    }
}
