//! `ModemContext`: the single allocation-free struct bundling everything a
//! modem instance needs.

use core::sync::atomic::{AtomicU8, Ordering};

use afsk_core::Fifo;

use crate::config::{ModemConfig, SAMPLES_PER_BIT};
use crate::demodulator::Demodulator;
use crate::modulator::Modulator;

/// Sticky status bitmap. Currently only bit 0 is defined.
pub const RXFIFO_OVERRUN: u8 = 1 << 0;

const DELAY_LEN: usize = (SAMPLES_PER_BIT / 2) as usize;

/// A complete AFSK1200 modem instance: demodulator, modulator, RX/TX FIFOs,
/// and the status bitmap, all embedded with no heap allocation.
///
/// `RX_LEN`/`TX_LEN` are the byte-FIFO capacities (32 or more is a sane
/// default); both must be powers of two (required by [`afsk_core::Fifo`]'s
/// masking arithmetic).
pub struct ModemContext<const RX_LEN: usize, const TX_LEN: usize> {
    rx_fifo: Fifo<RX_LEN>,
    tx_fifo: Fifo<TX_LEN>,
    demodulator: Demodulator<DELAY_LEN>,
    modulator: Modulator,
    status: AtomicU8,
}

impl<const RX_LEN: usize, const TX_LEN: usize> ModemContext<RX_LEN, TX_LEN> {
    /// Builds a new modem context from `config`. Logs the resolved
    /// `MARK_INC`/`SPACE_INC` phase increments at debug level.
    pub fn new(config: ModemConfig) -> Self {
        let mark_inc = config.mark_phase_inc();
        let space_inc = config.space_phase_inc();

        #[cfg(feature = "log")]
        log::debug!("MARK_INC {mark_inc}, SPACE_INC {space_inc}");

        Self {
            rx_fifo: Fifo::new(),
            tx_fifo: Fifo::new(),
            demodulator: Demodulator::new(config.filter),
            modulator: Modulator::new(
                mark_inc,
                space_inc,
                config.samples_per_bit(),
                config.preamble_len_bytes(),
                config.trailer_len_bytes(),
            ),
            status: AtomicU8::new(0),
        }
    }

    /// Feeds one ADC sample to the demodulator (called from ISR context at
    /// the configured sample rate). Sets [`RXFIFO_OVERRUN`] on the status
    /// bitmap if a decoded byte could not be pushed.
    pub fn process_adc_sample(&mut self, sample: i8) {
        if !self.demodulator.process_sample(sample, &self.rx_fifo) {
            self.status.fetch_or(RXFIFO_OVERRUN, Ordering::Relaxed);
        }
    }

    /// Produces the next DAC sample (called from ISR context at the
    /// configured sample rate). Returns `128` (DC midpoint) and `false` when
    /// the modulator has nothing to send — the caller should then disable
    /// the DAC interrupt.
    pub fn process_dac_sample(&mut self) -> (u8, bool) {
        match self.modulator.next_sample(&self.tx_fifo) {
            Some(sample) => (sample, true),
            None => (128, false),
        }
    }

    /// `true` while the modulator is actively transmitting.
    pub fn is_sending(&self) -> bool {
        self.modulator.is_sending()
    }

    /// Pushes one byte to the TX FIFO and arms the modulator, invoking
    /// `start_sink` if it was idle. Returns `Err(byte)` if the FIFO is full
    /// (the byte-stream layer busy-waits on this).
    pub fn write_byte(&mut self, byte: u8, start_sink: impl FnOnce()) -> Result<(), u8> {
        self.tx_fifo.try_push_locked(byte)?;
        self.modulator.tx_start(start_sink);
        Ok(())
    }

    /// Pops one byte from the RX FIFO, if any is available.
    pub fn read_byte(&self) -> Option<u8> {
        self.rx_fifo.try_pop_locked()
    }

    /// `true` if the RX FIFO currently holds no bytes.
    pub fn rx_is_empty(&self) -> bool {
        self.rx_fifo.is_empty()
    }

    /// Reads and clears the status bitmap atomically.
    pub fn take_status(&self) -> u8 {
        self.status.swap(0, Ordering::Relaxed)
    }

    /// Reads the status bitmap without clearing it.
    pub fn status(&self) -> u8 {
        self.status.load(Ordering::Relaxed)
    }
}
