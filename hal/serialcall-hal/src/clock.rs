//! Monotonic time source

/// Millisecond clock
///
/// The counter is free running and may wrap; callers measure intervals
/// with [`elapsed_ms`].
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds between `start` and `now`, correct across counter wrap
pub fn elapsed_ms(start: u32, now: u32) -> u32 {
    now.wrapping_sub(start)
}
