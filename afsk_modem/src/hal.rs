//! Platform boundary: sample sink/source traits and the single-instance ISR
//! trampoline.
//!
//! The ADC/DAC interrupt vectors a board integration owns are bound to the
//! modem through a trait object boundary plus an `AtomicPtr` trampoline —
//! one modem instance per process is the accepted restriction in exchange
//! for not threading a context pointer through every interrupt vector.

use core::sync::atomic::{AtomicPtr, Ordering};

/// Implemented by the platform integration that owns the ADC/DAC hardware.
///
/// `sink_ready` is invoked once per incoming sample at the configured sample
/// rate; `source_next` once per outgoing sample. Both must be non-blocking.
pub trait SampleSink {
    /// Called by the platform each time a new ADC sample is available.
    /// Returns a signed 8-bit sample centered at 0.
    fn sink_ready(&mut self) -> i8;
}

/// Implemented by the platform integration driving the DAC.
pub trait SampleSource {
    /// Called by the platform each time the DAC can accept a new sample.
    /// Returns an unsigned 8-bit sample centered at 128.
    fn source_next(&mut self) -> u8;

    /// Enables the DAC sample interrupt.
    fn start(&mut self);

    /// Disables the DAC sample interrupt.
    fn stop(&mut self);
}

/// A monotonic millisecond time base, used only by the byte-stream `read`
/// timeout. The broader task/scheduling kernel a full platform would sit on
/// is intentionally kept out of scope; platform integrations provide their
/// own tick source here.
pub trait TimeSource {
    /// Current time in milliseconds, monotonically increasing; wraps are
    /// the caller's concern (elapsed-time comparisons use wrapping subtraction).
    fn now_ms(&self) -> u32;

    /// Yields the CPU briefly while busy-waiting. The default
    /// implementation does nothing.
    #[inline]
    fn relax(&self) {}
}

/// Optional debug-pin toggles bracketing the ISR bodies, for
/// oscilloscope-based timing measurement. The blanket default implementation
/// is a no-op; board integrations override it to wire an actual GPIO.
pub trait Strobe {
    #[inline]
    fn strobe_on(&mut self) {}
    #[inline]
    fn strobe_off(&mut self) {}
}

impl<T> Strobe for T {}

/// Converts a 10-bit unsigned ADC reading into the signed 8-bit,
/// zero-centered sample the demodulator expects.
#[inline]
pub fn adc10_to_signed8(raw: u16) -> i8 {
    ((raw >> 2) as i16 - 128) as i8
}

/// Single global modem-context pointer, set once by [`install`] and read by
/// the platform's ISR trampoline functions. There is intentionally no way to
/// uninstall: the modem instance lives for the remainder of the program.
static MODEM_CTX: AtomicPtr<()> = AtomicPtr::new(core::ptr::null_mut());

/// Installs `ctx` (typically a `&'static mut ModemContext<...>`) as the
/// single modem instance the ISR trampoline dispatches to.
///
/// # Safety
///
/// `ctx` must remain valid for the remainder of the program and must not be
/// aliased mutably anywhere else; callers typically pass a `'static`
/// reference obtained once at boot.
pub unsafe fn install<T>(ctx: *mut T) {
    MODEM_CTX.store(ctx as *mut (), Ordering::SeqCst);
}

/// Retrieves the pointer installed by [`install`], or `None` if nothing has
/// been installed yet.
///
/// # Safety
///
/// The caller must only dereference the returned pointer following the same
/// aliasing discipline documented on [`install`].
pub unsafe fn instance<T>() -> Option<*mut T> {
    let ptr = MODEM_CTX.load(Ordering::SeqCst);
    if ptr.is_null() {
        None
    } else {
        Some(ptr as *mut T)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adc_conversion_centers_on_midscale() {
        assert_eq!(adc10_to_signed8(512), 0);
        assert_eq!(adc10_to_signed8(0), -128);
        assert_eq!(adc10_to_signed8(1023), 127);
    }

    #[test]
    fn instance_is_none_before_install() {
        // Each test gets a fresh process in `cargo test`'s default
        // process-per-binary model, but this static is shared within a
        // binary; only assert the shape of the API here.
        let _ = unsafe { instance::<u8>() };
    }
}
