//! Fixed tunables of the focuser.

use crate::{MicroSeconds, MilliSeconds, Polarity};

/// Lowest position the focuser may be driven to.
pub const MIN_POSITION: i32 = 0;
/// Highest position the focuser may be driven to.
pub const MAX_POSITION: i32 = 30000;

/// Most steps issued in a single scheduler tick.
pub const MAX_STEPS_PER_TICK: i32 = 20;
/// Width of each half (high, then low) of a step pulse.
pub const STEP_PULSE_WIDTH: MicroSeconds = MicroSeconds::new(2000);
/// Settling time after the direction line changes level.
pub const DIRECTION_SETTLE: MicroSeconds = MicroSeconds::new(10);
/// How long the driver stays energized after reaching a target.
pub const STEPPER_COOLDOWN: MilliSeconds = MilliSeconds::new(2000);

/// Direction line polarity of the driver board.
pub const DIRECTION_POLARITY: Polarity = Polarity::Normal;

/// Steps moved by one press of a nudge switch.
pub const NUDGE_STEPS: i32 = 5;
/// Pause after acting on a nudge switch.
pub const NUDGE_REPEAT_DELAY: MilliSeconds = MilliSeconds::new(10);
/// Minimum time a switch must read engaged before it counts.
pub const SWITCH_DEBOUNCE: MilliSeconds = MilliSeconds::new(20);

/// Time the shutter is held open.
pub const EXPOSURE_DURATION: MilliSeconds = MilliSeconds::from_secs(60);
/// Time between closing the shutter and opening it again, so the camera
/// can save the image.
pub const INTER_SHOT_PAUSE: MilliSeconds = MilliSeconds::from_secs(8);
/// Quiet time before a shutter trigger sequence.
pub const SHUTTER_SETTLE: MicroSeconds = MicroSeconds::new(200);
/// Width of each half of a shutter trigger pulse.
pub const SHUTTER_PULSE_WIDTH: MicroSeconds = MicroSeconds::new(15);
/// Pulses in each of the two bursts of a shutter trigger.
pub const SHUTTER_PULSES_PER_BURST: u8 = 16;
/// Gap between the two bursts of a shutter trigger.
pub const SHUTTER_BURST_GAP: MicroSeconds = MicroSeconds::new(7300);

/// Position assumed by the re-zero gesture before it backs off to zero.
pub const RE_ZERO_POSITION: i32 = 1000;

/// Firmware version reported to the host.
pub const VERSION: &str = "10";

/// Longest frame payload kept, after leading zeros of the argument are
/// collapsed; further bytes are dropped.
pub const FRAME_CAPACITY: usize = 16;

/// Clamps a position into the travel range.
pub fn clamp_position(position: i32) -> i32 {
    position.clamp(MIN_POSITION, MAX_POSITION)
}
