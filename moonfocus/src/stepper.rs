use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::MicroSeconds;

/// Stepper motor driver.
///
/// This is the seam between the motion controller and the hardware; the
/// motion controller decides what to do, the driver only toggles lines.
pub trait StepperDriver {
    /// Energizes (`true`) or de-energizes (`false`) the motor.
    fn set_enabled(&mut self, enabled: bool);

    /// Sets the level of the direction line.
    ///
    /// # Parameters
    ///
    /// - `level`: Level to drive on the direction line.
    fn set_direction(&mut self, level: PinState);

    /// Issues a single step pulse, blocking for the duration of the pulse.
    fn step(&mut self);
}

/// Stepper driver board wired to three output pins.
///
/// # Type Parameters
///
/// - `P`: pulse pin
/// - `D`: direction pin
/// - `E`: enable pin (active low)
/// - `DL`: delay provider
pub struct PinStepper<P, D, E, DL> {
    /// Pin to use for pulses.
    pin_pulse: P,
    /// Pin to use for direction indication.
    pin_direction: D,
    /// Pin which enables the driver when low.
    pin_enable: E,
    /// Blocking delay used for pulse timing.
    delay: DL,
    /// Level currently driven on the direction pin.
    direction: PinState,
    /// Width of each half of a pulse.
    pulse_width: MicroSeconds,
    /// Settling time around a direction change.
    direction_settle: MicroSeconds,
}

impl<P, D, E, DL> PinStepper<P, D, E, DL>
where
    P: OutputPin,
    D: OutputPin,
    E: OutputPin,
    DL: DelayNs,
{
    /// Creates a new `PinStepper`.
    ///
    /// The driver starts disabled, with the direction line low and the
    /// pulse line idle.
    ///
    /// # Parameters
    ///
    /// - `pin_pulse`: Pin to use for pulse signals.
    /// - `pin_direction`: Pin to use for direction signals.
    /// - `pin_enable`: Active-low enable pin of the driver.
    /// - `delay`: Blocking delay provider.
    /// - `pulse_width`: Width of each half of a step pulse.
    /// - `direction_settle`: Delay around direction changes.
    pub fn new(
        pin_pulse: P,
        pin_direction: D,
        pin_enable: E,
        delay: DL,
        pulse_width: MicroSeconds,
        direction_settle: MicroSeconds,
    ) -> Self {
        let direction = PinState::Low;
        let mut stepper = Self {
            pin_pulse,
            pin_direction,
            pin_enable,
            delay,
            direction,
            pulse_width,
            direction_settle,
        };

        // Make sure the pins agree with what we think they are.
        stepper.pin_pulse.set_low().ok();
        stepper.force_set_direction(direction);
        stepper.set_enabled(false);

        stepper
    }

    /// Force set the direction.
    ///
    /// This sets the direction pin even if the level already matches. This
    /// is useful on initialization.
    fn force_set_direction(&mut self, level: PinState) {
        self.delay.delay_us(self.direction_settle.get_value());
        self.pin_direction.set_state(level).ok();
        self.direction = level;
        self.delay.delay_us(self.direction_settle.get_value());
    }
}

impl<P, D, E, DL> StepperDriver for PinStepper<P, D, E, DL>
where
    P: OutputPin,
    D: OutputPin,
    E: OutputPin,
    DL: DelayNs,
{
    fn set_enabled(&mut self, enabled: bool) {
        // Enable is active low.
        self.pin_enable.set_state(PinState::from(!enabled)).ok();
    }

    fn set_direction(&mut self, level: PinState) {
        if level != self.direction {
            self.force_set_direction(level);
        }
    }

    fn step(&mut self) {
        self.pin_pulse.set_high().ok();
        self.delay.delay_us(self.pulse_width.get_value());
        self.pin_pulse.set_low().ok();
        self.delay.delay_us(self.pulse_width.get_value());
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sim::{SimClock, TestPin};

    fn stepper(
        clock: &SimClock,
    ) -> (PinStepper<TestPin, TestPin, TestPin, SimClock>, [TestPin; 3]) {
        let pulse = TestPin::new(clock);
        let direction = TestPin::new(clock);
        let enable = TestPin::new(clock);
        let stepper = PinStepper::new(
            pulse.clone(),
            direction.clone(),
            enable.clone(),
            clock.clone(),
            MicroSeconds::new(2000),
            MicroSeconds::new(10),
        );
        (stepper, [pulse, direction, enable])
    }

    #[test]
    fn test_new_starts_disabled() {
        let clock = SimClock::new();
        let (_stepper, [pulse, direction, enable]) = stepper(&clock);
        assert!(!pulse.is_set_high());
        assert!(!direction.is_set_high());
        // Disabled means the active-low enable line is high.
        assert!(enable.is_set_high());
    }

    #[test]
    fn test_enable_is_active_low() {
        let clock = SimClock::new();
        let (mut stepper, [_, _, enable]) = stepper(&clock);
        stepper.set_enabled(true);
        assert!(!enable.is_set_high());
        stepper.set_enabled(false);
        assert!(enable.is_set_high());
    }

    #[test]
    fn test_step_pulse_timing() {
        let clock = SimClock::new();
        let (mut stepper, [pulse, _, _]) = stepper(&clock);
        let start = clock.now_us();
        stepper.step();
        stepper.step();

        assert_eq!(2, pulse.rising_edges());
        assert_eq!(8000, clock.now_us() - start);
        assert!(!pulse.is_set_high());
    }

    #[test]
    fn test_direction_only_changes_when_needed() {
        let clock = SimClock::new();
        let (mut stepper, [_, direction, _]) = stepper(&clock);
        let start = clock.now_us();

        stepper.set_direction(PinState::Low);
        assert_eq!(start, clock.now_us());

        stepper.set_direction(PinState::High);
        assert!(direction.is_set_high());
        assert_eq!(20, clock.now_us() - start);
    }
}
