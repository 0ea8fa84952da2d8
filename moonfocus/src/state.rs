use crate::config::DIRECTION_POLARITY;
use crate::{Instant, Polarity};

/// Everything the focuser knows about its motion.
///
/// Created once at startup. Written by the dispatcher, the switch handler
/// and the motion controller, which the scheduler runs one after another
/// within each tick.
#[derive(Debug, PartialEq, Clone)]
pub struct FocuserState {
    /// Absolute step count, always within the travel range.
    pub current_position: i32,
    /// Desired step count. Not range checked when set by the host.
    pub target_position: i32,
    /// The motion controller drives toward the target while this is set.
    pub active_target: bool,
    /// Motion status reported to the host.
    pub moving: bool,
    /// Whether the motor driver is energized.
    pub stepper_enabled: bool,
    /// Once reached, with the motor settled, the driver is disabled. `None`
    /// while travelling or with the driver already off.
    pub cooling_deadline: Option<Instant>,
    /// Reported to the host only; it does not affect timing.
    pub step_delay: i16,
    /// Gates diagnostic logging.
    pub debug_enabled: bool,
    /// Set by the re-zero gesture: travel with the opposite polarity.
    pub direction_reversed: bool,
}
impl FocuserState {
    /// Creates the startup state: at zero, at rest, driver disabled.
    pub fn new() -> Self {
        Self {
            current_position: 0,
            target_position: 0,
            active_target: false,
            moving: false,
            stepper_enabled: false,
            cooling_deadline: None,
            step_delay: 0,
            debug_enabled: false,
            direction_reversed: false,
        }
    }

    /// Direction line polarity currently in force.
    pub fn polarity(&self) -> Polarity {
        if self.direction_reversed {
            DIRECTION_POLARITY.flipped()
        } else {
            DIRECTION_POLARITY
        }
    }
}

impl Default for FocuserState {
    fn default() -> Self {
        Self::new()
    }
}

/// State of the intervalometer.
#[derive(Debug, PartialEq, Clone)]
pub struct ImagingState {
    /// Mirror of the imaging switch.
    pub enabled: bool,
    /// Whether the shutter is open.
    pub active: bool,
    /// When the shutter next opens. `None` means as soon as the switch is
    /// on.
    pub open_deadline: Option<Instant>,
    /// When the open shutter closes.
    pub close_deadline: Instant,
}
impl ImagingState {
    /// Creates the startup state: switch off, shutter closed, first
    /// opening due immediately.
    pub fn new() -> Self {
        Self {
            enabled: false,
            active: false,
            open_deadline: None,
            close_deadline: Instant::ZERO,
        }
    }
}

impl Default for ImagingState {
    fn default() -> Self {
        Self::new()
    }
}
