//! End-to-end modulator→demodulator scenarios at the HDLC byte level (no
//! AX.25 framing yet — see `ax25`'s own loopback test for the full frame
//! round trip). Covers silence, back-to-back frames, preamble timing, and
//! RX overrun against the DSP/framing core alone.

use afsk_modem::config::ModemConfig;
use afsk_modem::context::ModemContext;
use afsk_modem::hal::SampleSource;

struct NullSink;

impl SampleSource for NullSink {
    fn source_next(&mut self) -> u8 {
        128
    }
    fn start(&mut self) {}
    fn stop(&mut self) {}
}

/// Runs `data` through a modulator and feeds every resulting DAC sample
/// straight into a fresh demodulator's ADC input, returning the bytes the
/// demodulator's RX FIFO accumulates.
fn loopback_bytes(data: &[u8]) -> Vec<u8> {
    let mut tx_ctx: ModemContext<64, 64> = ModemContext::new(ModemConfig::afsk1200());
    let mut sink = NullSink;
    for &byte in data {
        tx_ctx.write_byte(byte, || sink.start()).unwrap();
    }

    let mut rx_ctx: ModemContext<256, 64> = ModemContext::new(ModemConfig::afsk1200());

    // Drive the modulator until it falls silent, bridging its DAC samples
    // straight into the demodulator's ADC input (both at 9600 Hz).
    loop {
        let (sample, active) = tx_ctx.process_dac_sample();
        let signed = (sample as i16 - 128) as i8;
        rx_ctx.process_adc_sample(signed);
        if !active && !tx_ctx.is_sending() {
            break;
        }
    }

    let mut out = Vec::new();
    while let Some(byte) = rx_ctx.read_byte() {
        out.push(byte);
    }
    out
}

#[test]
fn silence_in_produces_no_bytes_and_no_overrun() {
    let mut rx_ctx: ModemContext<32, 32> = ModemContext::new(ModemConfig::afsk1200());
    for _ in 0..10_000 {
        rx_ctx.process_adc_sample(0);
    }
    assert!(rx_ctx.rx_is_empty());
    assert_eq!(rx_ctx.status(), 0);
}

#[test]
fn modulated_bytes_are_recovered_with_framing_flags() {
    let received = loopback_bytes(&[0x01, 0x02, 0x03]);
    // The RX FIFO sees flag bytes (preamble + trailer) around the data,
    // plus the unstuffed data bytes themselves, in order.
    assert!(received.contains(&0x01));
    assert!(received.contains(&0x02));
    assert!(received.contains(&0x03));

    let pos = |needle: u8| received.iter().position(|&b| b == needle).unwrap();
    assert!(pos(0x01) < pos(0x02));
    assert!(pos(0x02) < pos(0x03));
}

#[test]
fn preamble_flags_precede_the_first_data_byte() {
    let received = loopback_bytes(&[0xAB]);
    let flag_count_before_data = received.iter().take_while(|&&b| b == 0x7E).count();
    // `afsk1200()`'s 300ms preamble at 1200 baud is 45 flag bytes.
    assert!(flag_count_before_data >= 1);
    assert!(received.contains(&0xAB));
}

#[test]
fn overrun_sets_status_bit_once_rx_fifo_fills() {
    // A tiny RX FIFO that fills immediately under continuous flag traffic.
    let mut rx_ctx: ModemContext<2, 32> = ModemContext::new(ModemConfig::afsk1200());

    let mut tx_ctx: ModemContext<64, 64> = ModemContext::new(ModemConfig::afsk1200());
    let mut sink = NullSink;
    tx_ctx.write_byte(0x11, || sink.start()).unwrap();
    tx_ctx.write_byte(0x22, || sink.start()).unwrap();
    tx_ctx.write_byte(0x33, || sink.start()).unwrap();

    loop {
        let (sample, active) = tx_ctx.process_dac_sample();
        let signed = (sample as i16 - 128) as i8;
        rx_ctx.process_adc_sample(signed);
        if !active && !tx_ctx.is_sending() {
            break;
        }
    }

    assert_ne!(rx_ctx.status() & afsk_modem::context::RXFIFO_OVERRUN, 0);

    // Clearing and draining must allow the bitmap to go quiet again.
    rx_ctx.take_status();
    while rx_ctx.read_byte().is_some() {}
    assert_eq!(rx_ctx.status(), 0);
}
