use arduino_hal::pac::TC1;
use moonfocus::{Clock, Instant};

/// Millisecond clock read from Timer/Counter 1.
///
/// The timer runs free at 16 MHz / 1024, one count every 64 µs, and wraps
/// about every 4.2 s. Nothing is done on overflow: the elapsed count is
/// picked up each time the clock is read, so it must be read more often
/// than the timer wraps. The scheduler reads it once per tick, and a tick
/// lasts well under a second.
pub struct TimerClock {
    timer: TC1,
    /// Counter value at the previous read.
    last_count: u16,
    millis: u32,
    /// Microseconds elapsed but not yet counted in `millis`.
    micros_remainder: u32,
}
impl TimerClock {
    const MICROS_PER_COUNT: u32 = 64;

    /// Creates a new `TimerClock`, starting the timer.
    ///
    /// # Parameters
    ///
    /// - `timer`: Timer/Counter 1, which the clock takes over entirely.
    pub fn new(timer: TC1) -> Self {
        // Normal mode (the reset default of TCCR1A) with the slowest
        // prescaler.
        timer.tccr1b.write(|w| w.cs1().prescale_1024());
        let last_count = timer.tcnt1.read().bits();
        Self {
            timer,
            last_count,
            millis: 0,
            micros_remainder: 0,
        }
    }
}

impl Clock for TimerClock {
    fn now(&mut self) -> Instant {
        let count = self.timer.tcnt1.read().bits();
        let elapsed = count.wrapping_sub(self.last_count) as u32;
        self.last_count = count;

        self.micros_remainder += elapsed * Self::MICROS_PER_COUNT;
        self.millis = self.millis.wrapping_add(self.micros_remainder / 1000);
        self.micros_remainder %= 1000;

        Instant::from_millis(self.millis)
    }
}
