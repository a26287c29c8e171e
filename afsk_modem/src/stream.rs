//! Byte-stream interface bridging the foreground task to the ISR-owned FIFOs.
//!
//! `ModemStream` is a thin file-like wrapper (read/write/flush/take_error)
//! around a [`ModemContext`], parameterized by the platform's
//! [`SampleSource`] (to start the DAC interrupt on write) and [`TimeSource`]
//! (for the millisecond RX timeout policy).

use crate::config::RxTimeout;
use crate::context::ModemContext;
use crate::error::{ModemError, Result};
use crate::hal::{SampleSource, TimeSource};

/// Byte-stream view over a [`ModemContext`]: read, write, flush, and
/// take_error.
pub struct ModemStream<'a, const RX_LEN: usize, const TX_LEN: usize, S, T> {
    ctx: &'a mut ModemContext<RX_LEN, TX_LEN>,
    sink: &'a mut S,
    time: &'a T,
    rx_timeout: RxTimeout,
}

impl<'a, const RX_LEN: usize, const TX_LEN: usize, S, T> ModemStream<'a, RX_LEN, TX_LEN, S, T>
where
    S: SampleSource,
    T: TimeSource,
{
    pub fn new(ctx: &'a mut ModemContext<RX_LEN, TX_LEN>, sink: &'a mut S, time: &'a T, rx_timeout: RxTimeout) -> Self {
        Self { ctx, sink, time, rx_timeout }
    }

    /// Reads up to `buf.len()` bytes from the RX FIFO into `buf`, returning
    /// the number of bytes actually read. Never an error: a timeout or an
    /// empty non-blocking read both return a (possibly zero) count.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let mut filled = 0;
        match self.rx_timeout {
            RxTimeout::NonBlocking => {
                while filled < buf.len() {
                    match self.ctx.read_byte() {
                        Some(byte) => {
                            buf[filled] = byte;
                            filled += 1;
                        }
                        None => break,
                    }
                }
            }
            RxTimeout::Infinite => {
                while filled < buf.len() {
                    loop {
                        if let Some(byte) = self.ctx.read_byte() {
                            buf[filled] = byte;
                            filled += 1;
                            break;
                        }
                        self.time.relax();
                    }
                }
            }
            RxTimeout::Millis(timeout_ms) => {
                while filled < buf.len() {
                    let start = self.time.now_ms();
                    loop {
                        if let Some(byte) = self.ctx.read_byte() {
                            buf[filled] = byte;
                            filled += 1;
                            break;
                        }
                        if self.time.now_ms().wrapping_sub(start) > timeout_ms {
                            return filled;
                        }
                        self.time.relax();
                    }
                }
            }
        }
        filled
    }

    /// Writes all of `buf`, blocking while the TX FIFO is full. Ensures the
    /// modulator is running after every pushed byte.
    pub fn write(&mut self, buf: &[u8]) -> usize {
        for &byte in buf {
            loop {
                let sink = &mut *self.sink;
                match self.ctx.write_byte(byte, || sink.start()) {
                    Ok(()) => break,
                    Err(_full_fifo) => self.time.relax(),
                }
            }
        }
        buf.len()
    }

    /// Busy-waits until the modulator finishes sending.
    pub fn flush(&mut self) {
        while self.ctx.is_sending() {
            self.time.relax();
        }
    }

    /// Reads and clears the status bitmap, surfacing a [`ModemError`] if the
    /// overrun bit was set.
    pub fn take_error(&mut self) -> Result<()> {
        let status = self.ctx.take_status();
        if status & crate::context::RXFIFO_OVERRUN != 0 {
            Err(ModemError::RxOverrun)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModemConfig;

    struct NullSink {
        started: bool,
    }

    impl SampleSource for NullSink {
        fn source_next(&mut self) -> u8 {
            128
        }
        fn start(&mut self) {
            self.started = true;
        }
        fn stop(&mut self) {
            self.started = false;
        }
    }

    struct InstantTime;

    impl TimeSource for InstantTime {
        fn now_ms(&self) -> u32 {
            0
        }
    }

    #[test]
    fn write_then_read_round_trips_through_the_fifo() {
        let mut ctx: ModemContext<32, 32> = ModemContext::new(ModemConfig::afsk1200());
        let mut sink = NullSink { started: false };
        let time = InstantTime;
        let mut stream = ModemStream::new(&mut ctx, &mut sink, &time, RxTimeout::NonBlocking);

        stream.write(&[1, 2, 3]);
        assert!(sink.started);
    }

    #[test]
    fn non_blocking_read_returns_zero_on_empty_fifo() {
        let mut ctx: ModemContext<32, 32> = ModemContext::new(ModemConfig::afsk1200());
        let mut sink = NullSink { started: false };
        let time = InstantTime;
        let mut stream = ModemStream::new(&mut ctx, &mut sink, &time, RxTimeout::NonBlocking);

        let mut buf = [0u8; 4];
        assert_eq!(stream.read(&mut buf), 0);
    }

    #[test]
    fn take_error_reports_and_clears_overrun() {
        let mut ctx: ModemContext<2, 32> = ModemContext::new(ModemConfig::afsk1200());
        for _ in 0..10_000 {
            ctx.process_adc_sample(0);
        }
        let mut sink = NullSink { started: false };
        let time = InstantTime;
        let mut stream = ModemStream::new(&mut ctx, &mut sink, &time, RxTimeout::NonBlocking);
        let _ = stream.take_error();
        assert!(stream.take_error().is_ok());
    }
}
