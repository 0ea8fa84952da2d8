use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::config::{
    SHUTTER_BURST_GAP, SHUTTER_PULSES_PER_BURST, SHUTTER_PULSE_WIDTH,
    SHUTTER_SETTLE,
};

/// Camera shutter release.
pub trait Shutter {
    /// Sends the trigger signal. The same signal opens and closes the
    /// shutter of a camera in bulb mode.
    fn trigger(&mut self);

    /// Shows whether the shutter is open on an indicator, if there is one.
    fn set_indicator(&mut self, open: bool);
}

/// Infrared shutter release on an output pin, with an indicator LED.
///
/// The trigger is two bursts of short pulses separated by a gap, as
/// understood by Canon infrared remote receivers.
///
/// # Type Parameters
///
/// - `T`: trigger pin (drives the infrared LED)
/// - `L`: indicator LED pin
/// - `DL`: delay provider
pub struct PinShutter<T, L, DL> {
    pin_trigger: T,
    pin_indicator: L,
    delay: DL,
}

impl<T, L, DL> PinShutter<T, L, DL>
where
    T: OutputPin,
    L: OutputPin,
    DL: DelayNs,
{
    /// Creates a new `PinShutter`, with both lines low.
    pub fn new(pin_trigger: T, pin_indicator: L, delay: DL) -> Self {
        let mut shutter = Self {
            pin_trigger,
            pin_indicator,
            delay,
        };
        shutter.pin_trigger.set_low().ok();
        shutter.pin_indicator.set_low().ok();
        shutter
    }

    /// One burst of trigger pulses.
    fn burst(&mut self) {
        let width = SHUTTER_PULSE_WIDTH.get_value();
        for _ in 0..SHUTTER_PULSES_PER_BURST {
            self.pin_trigger.set_high().ok();
            self.delay.delay_us(width);
            self.pin_trigger.set_low().ok();
            self.delay.delay_us(width);
        }
    }
}

impl<T, L, DL> Shutter for PinShutter<T, L, DL>
where
    T: OutputPin,
    L: OutputPin,
    DL: DelayNs,
{
    fn trigger(&mut self) {
        self.delay.delay_us(SHUTTER_SETTLE.get_value());
        self.burst();
        self.delay.delay_us(SHUTTER_BURST_GAP.get_value());
        self.burst();
    }

    fn set_indicator(&mut self, open: bool) {
        self.pin_indicator.set_state(PinState::from(open)).ok();
    }
}
