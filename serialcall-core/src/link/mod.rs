//! Byte-level link handling: sync probe and frame reads
//!
//! Both stages busy-poll the transport's available count. The sync wait
//! has no deadline because no request is in flight yet; every later read
//! is bounded by a deadline from [`crate::EngineConfig`].

pub mod reader;
pub mod sync;

use core::hint::spin_loop;

use serialcall_hal::{elapsed_ms, Clock, Transport};

use crate::error::{Fault, IoResultExt, Phase, Stop};

/// Wait until `count` bytes are buffered or `timeout_ms` elapses
pub(crate) fn expect_bytes<T: Transport, C: Clock>(
    transport: &mut T,
    clock: &C,
    count: usize,
    timeout_ms: u32,
    phase: Phase,
) -> Result<(), Stop<T::Error>> {
    let start = clock.now_ms();
    while transport.bytes_available().io()? < count {
        if elapsed_ms(start, clock.now_ms()) >= timeout_ms {
            // One last look: bytes may have landed while the clock was read
            if transport.bytes_available().io()? >= count {
                return Ok(());
            }
            return Err(Fault::Timeout(phase).into());
        }
        spin_loop();
    }
    Ok(())
}

/// Wait with no deadline until `count` bytes are buffered
pub(crate) fn block_for_bytes<T: Transport>(
    transport: &mut T,
    count: usize,
) -> Result<(), Stop<T::Error>> {
    while transport.bytes_available().io()? < count {
        spin_loop();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedTransport, SteppingClock};

    #[test]
    fn test_expect_bytes_already_buffered() {
        let mut transport = ScriptedTransport::with_rx(&[1, 2, 3]);
        let clock = SteppingClock::new(1);
        assert!(expect_bytes(&mut transport, &clock, 3, 10, Phase::Header).is_ok());
        assert_eq!(transport.reads(), 0);
    }

    #[test]
    fn test_expect_bytes_waits_for_late_bytes() {
        let mut transport = ScriptedTransport::with_rx(&[]);
        transport.trickle(&[1, 2, 3]);
        let clock = SteppingClock::new(1);
        assert!(expect_bytes(&mut transport, &clock, 3, 100, Phase::Header).is_ok());
    }

    #[test]
    fn test_expect_bytes_times_out() {
        let mut transport = ScriptedTransport::with_rx(&[1, 2]);
        let clock = SteppingClock::new(5);
        let result = expect_bytes(&mut transport, &clock, 3, 50, Phase::Body);
        assert!(matches!(result, Err(Stop::Fault(Fault::Timeout(Phase::Body)))));
        // Nothing is consumed while waiting
        assert_eq!(transport.pending(), 2);
    }

    #[test]
    fn test_expect_bytes_handles_clock_wrap() {
        let mut transport = ScriptedTransport::with_rx(&[]);
        let clock = SteppingClock::starting_at(u32::MAX - 3, 2);
        let result = expect_bytes(&mut transport, &clock, 1, 20, Phase::Terminator);
        assert!(matches!(
            result,
            Err(Stop::Fault(Fault::Timeout(Phase::Terminator)))
        ));
        assert!(clock.now_ms() < 100);
    }
}
