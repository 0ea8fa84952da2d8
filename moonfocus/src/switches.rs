//! Manual switches: two nudge buttons and the intervalometer switch.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin};
use ufmt::uWrite;
use ufmt_macros::uDebug;

use crate::config::{
    clamp_position, NUDGE_REPEAT_DELAY, NUDGE_STEPS, SWITCH_DEBOUNCE,
};
use crate::log::debug;
use crate::motion::go_to_target;
use crate::{
    Direction, FocuserState, ImagingState, Instant, MilliSeconds,
    StepperDriver,
};

/// One reading of all the switches, after debouncing.
#[derive(Debug, uDebug, PartialEq, Clone, Copy, Default)]
pub struct SwitchSample {
    /// Increase button is pressed.
    pub increase: bool,
    /// Decrease button is pressed.
    pub decrease: bool,
    /// Intervalometer switch is on.
    pub imaging: bool,
}

/// Source of switch samples.
pub trait SwitchInputs {
    /// Samples every switch once.
    fn sample(&mut self, now: Instant) -> SwitchSample;
}

/// Minimum-assertion filter for a bouncing contact.
///
/// A switch only counts as engaged once it has read engaged continuously
/// for the debounce time. A single disengaged reading resets it.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Debouncer {
    engaged_since: Option<Instant>,
    min_assertion: MilliSeconds,
}
impl Debouncer {
    /// Creates a new `Debouncer`, initially disengaged.
    pub fn new(min_assertion: MilliSeconds) -> Self {
        Self {
            engaged_since: None,
            min_assertion,
        }
    }

    /// Feeds a raw reading, returning the filtered one.
    pub fn update(&mut self, raw_engaged: bool, now: Instant) -> bool {
        if !raw_engaged {
            self.engaged_since = None;
            return false;
        }
        let since = *self.engaged_since.get_or_insert(now);
        now.has_reached(since + self.min_assertion)
    }
}

/// Switch wired between an input pin (with pull-up) and ground.
///
/// An engaged switch pulls the line low. A pin that cannot be read counts
/// as released.
///
/// # Type Parameters
///
/// - `P`: pin
pub struct Switch<P> {
    pin: P,
    debouncer: Debouncer,
}
impl<P: InputPin> Switch<P> {
    /// Creates a new `Switch`.
    ///
    /// # Parameters
    ///
    /// - `pin`: Pin to use for the switch.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            debouncer: Debouncer::new(SWITCH_DEBOUNCE),
        }
    }

    /// Reads the debounced state of the switch.
    pub fn is_engaged(&mut self, now: Instant) -> bool {
        let raw = self.pin.is_low().unwrap_or(false);
        self.debouncer.update(raw, now)
    }
}

/// Stand-in input for a switch that is not fitted. Always released.
pub struct Unwired;

impl ErrorType for Unwired {
    type Error = Infallible;
}

impl InputPin for Unwired {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

/// The three switches of the focuser.
///
/// # Type Parameters
///
/// - `I`: increase button pin
/// - `D`: decrease button pin
/// - `M`: imaging switch pin
pub struct Switches<I, D, M> {
    increase: Switch<I>,
    decrease: Switch<D>,
    imaging: Switch<M>,
}
impl<I: InputPin, D: InputPin, M: InputPin> Switches<I, D, M> {
    /// Creates a new `Switches`.
    pub fn new(increase: I, decrease: D, imaging: M) -> Self {
        Self {
            increase: Switch::new(increase),
            decrease: Switch::new(decrease),
            imaging: Switch::new(imaging),
        }
    }
}

impl<I: InputPin, D: InputPin, M: InputPin> SwitchInputs for Switches<I, D, M> {
    fn sample(&mut self, now: Instant) -> SwitchSample {
        SwitchSample {
            increase: self.increase.is_engaged(now),
            decrease: self.decrease.is_engaged(now),
            imaging: self.imaging.is_engaged(now),
        }
    }
}

/// Acts on a switch sample.
///
/// The imaging switch takes priority: while it is on, the nudge buttons
/// are ignored. Otherwise exactly one pressed nudge button moves the
/// target a few steps from the current position, through the same
/// go-to-target transition as the host command, followed by a short pause
/// so a single press does not repeat too quickly.
pub fn handle_switches<S, DL, W>(
    sample: SwitchSample,
    state: &mut FocuserState,
    imaging: &mut ImagingState,
    stepper: &mut S,
    delay: &mut DL,
    out: &mut W,
) where
    S: StepperDriver,
    DL: DelayNs,
    W: uWrite + ?Sized,
{
    imaging.enabled = sample.imaging;
    if sample.imaging {
        return;
    }

    let direction = match (sample.increase, sample.decrease) {
        (true, false) => Direction::Positive,
        (false, true) => Direction::Negative,
        _ => return,
    };
    let nudged = state.current_position + direction.unit() * NUDGE_STEPS;
    state.target_position = clamp_position(nudged);
    debug!(state, out, "Nudge {:?} to {}", direction, state.target_position);
    go_to_target(state, stepper, out);

    delay.delay_ms(NUDGE_REPEAT_DELAY.get_value());
}
