//! Compile-time modem configuration.
//!
//! A plain data struct of sample/bit rate, tone, and timing parameters,
//! checked with Rust `const` assertions rather than left as runtime-mutable
//! fields, since these are fixed for the lifetime of a modem instance.

/// Discriminator LPF variant, selected at modem construction.
///
/// Chebyshev (the simpler `y>>1` approximation, despite the textbook-sounding
/// name) is the canonical default; Butterworth is the non-default option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// `f(y) = (y>>1) + (y>>3) + (y>>5)`, approximating `y * 0.668`.
    Butterworth,
    /// `f(y) = y>>1`, approximating `y * 0.438`. The canonical default.
    Chebyshev,
}

/// RX byte-stream read timeout policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxTimeout {
    /// Return immediately with whatever is already buffered.
    NonBlocking,
    /// Block forever, one byte at a time, yielding via `cpu_relax`-style hints.
    Infinite,
    /// Per-byte deadline in milliseconds, measured from the call's entry.
    Millis(u32),
}

/// Modem configuration: sample/bit rate, tone frequencies, filter choice,
/// and the framing timing parameters.
///
/// All fields are immutable once the modem context is constructed: fixed
/// at init, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModemConfig {
    pub sample_rate_hz: u32,
    pub bit_rate_baud: u32,
    pub mark_hz: u32,
    pub space_hz: u32,
    pub filter: FilterKind,
    pub rx_timeout: RxTimeout,
    pub preamble_ms: u32,
    pub trailer_ms: u32,
}

impl ModemConfig {
    /// The canonical 1200-baud AFSK1200 configuration: 9600 Hz sample rate,
    /// 1200/2200 Hz mark/space tones, Chebyshev discriminator filter,
    /// non-blocking reads, 300 ms preamble / 50 ms trailer.
    pub const fn afsk1200() -> Self {
        Self {
            sample_rate_hz: 9600,
            bit_rate_baud: 1200,
            mark_hz: 1200,
            space_hz: 2200,
            filter: FilterKind::Chebyshev,
            rx_timeout: RxTimeout::NonBlocking,
            preamble_ms: 300,
            trailer_ms: 50,
        }
    }

    /// Samples per bit period; the sample rate MUST be an integer multiple
    /// of the bit rate.
    pub const fn samples_per_bit(&self) -> u32 {
        assert!(
            self.sample_rate_hz % self.bit_rate_baud == 0,
            "sample rate must be an integer multiple of the bit rate"
        );
        self.sample_rate_hz / self.bit_rate_baud
    }

    /// Number of HDLC flag bytes to shift out as preamble, derived from
    /// `preamble_ms` as `round(preamble_ms * bit_rate_baud / 8000)`.
    pub const fn preamble_len_bytes(&self) -> u32 {
        afsk_core::dds::div_round(self.preamble_ms * self.bit_rate_baud, 8000)
    }

    /// Number of trailer flag bytes, derived from `trailer_ms`.
    pub const fn trailer_len_bytes(&self) -> u32 {
        afsk_core::dds::div_round(self.trailer_ms * self.bit_rate_baud, 8000)
    }

    /// DDS phase increment for the mark tone at this sample rate.
    pub const fn mark_phase_inc(&self) -> u16 {
        afsk_core::dds::Dds::phase_inc_for(self.mark_hz, self.sample_rate_hz)
    }

    /// DDS phase increment for the space tone at this sample rate.
    pub const fn space_phase_inc(&self) -> u16 {
        afsk_core::dds::Dds::phase_inc_for(self.space_hz, self.sample_rate_hz)
    }
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self::afsk1200()
    }
}

/// Canonical AFSK1200 parameters, asserted at compile time rather than left
/// as a runtime invariant that could silently drift.
pub const SAMPLE_RATE_HZ: u32 = 9600;
pub const BIT_RATE_BAUD: u32 = 1200;
pub const SAMPLES_PER_BIT: u32 = SAMPLE_RATE_HZ / BIT_RATE_BAUD;

const _: () = assert!(SAMPLE_RATE_HZ % BIT_RATE_BAUD == 0, "sample rate must be a multiple of bit rate");
const _: () = assert!(SAMPLES_PER_BIT == 8, "demodulator majority-of-3 slicer assumes 8 samples per bit");

/// Phase-tracker constants used by the demodulator's bit-sampling PLL.
pub const PHASE_BIT: u8 = 8;
pub const PHASE_MAX: u16 = SAMPLES_PER_BIT as u16 * PHASE_BIT as u16;
pub const PHASE_THRES: u16 = PHASE_MAX / 2;
pub const PHASE_INC: u16 = 1;
