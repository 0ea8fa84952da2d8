use core::ops::Add;

use ufmt_macros::uDebug;

/// Time in microseconds.
#[derive(Debug, uDebug, PartialEq, PartialOrd, Eq, Ord, Copy, Clone)]
pub struct MicroSeconds(u32);
impl MicroSeconds {
    /// Creates a new `MicroSeconds`.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the value as a `u32`.
    pub fn get_value(&self) -> u32 {
        self.0
    }
}

/// Time in milliseconds.
#[derive(Debug, uDebug, PartialEq, PartialOrd, Eq, Ord, Copy, Clone)]
pub struct MilliSeconds(u32);
impl MilliSeconds {
    /// Creates a new `MilliSeconds`.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Creates a new `MilliSeconds` from a whole number of seconds.
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs * 1000)
    }

    /// Returns the value as a `u32`.
    pub fn get_value(&self) -> u32 {
        self.0
    }
}

impl Add for MilliSeconds {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        MilliSeconds::new(self.0.wrapping_add(rhs.0))
    }
}

/// A point on the monotonic millisecond clock.
///
/// The underlying counter wraps at `u32::MAX` (about 49 days). Comparisons
/// between instants are done on the wrapped difference, so they remain
/// correct across a wrap as long as the two instants are less than about
/// 24 days apart.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub struct Instant(u32);
impl Instant {
    /// The instant at which the clock started.
    pub const ZERO: Instant = Instant(0);

    /// Creates an instant `millis` milliseconds after the clock started.
    pub const fn from_millis(millis: u32) -> Self {
        Self(millis)
    }

    /// Returns the raw millisecond count.
    pub fn get_value(&self) -> u32 {
        self.0
    }

    /// Returns `true` once this instant is at or beyond `deadline`.
    pub fn has_reached(&self, deadline: Instant) -> bool {
        (self.0.wrapping_sub(deadline.0) as i32) >= 0
    }
}

impl Add<MilliSeconds> for Instant {
    type Output = Self;

    fn add(self, rhs: MilliSeconds) -> Self::Output {
        Instant(self.0.wrapping_add(rhs.get_value()))
    }
}

/// Monotonic time source.
pub trait Clock {
    /// Returns the current instant.
    fn now(&mut self) -> Instant;
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_has_reached() {
        let deadline = Instant::from_millis(100);
        assert!(!Instant::from_millis(99).has_reached(deadline));
        assert!(Instant::from_millis(100).has_reached(deadline));
        assert!(Instant::from_millis(101).has_reached(deadline));
    }

    #[test]
    fn test_has_reached_across_wrap() {
        let start = Instant::from_millis(u32::MAX - 10);
        let deadline = start + MilliSeconds::new(100);
        assert_eq!(89, deadline.get_value());
        assert!(!start.has_reached(deadline));
        assert!(Instant::from_millis(89).has_reached(deadline));
    }

    proptest! {
        #[test]
        fn test_offset_is_reached(
            start: u32,
            offset in 0u32..(i32::MAX as u32)
        ) {
            let start = Instant::from_millis(start);
            let deadline = start + MilliSeconds::new(offset);
            assert!(deadline.has_reached(start));
            assert!(deadline.has_reached(deadline));
            if offset > 0 {
                assert!(!start.has_reached(deadline));
            }
        }
    }
}
