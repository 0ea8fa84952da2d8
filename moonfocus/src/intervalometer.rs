//! Camera intervalometer.
//!
//! While the imaging switch is on, the shutter is opened, held open for
//! [EXPOSURE_DURATION], closed, and opened again after [INTER_SHOT_PAUSE].
//! The camera is expected to be in bulb mode, where the same trigger
//! signal both opens and closes the shutter.
//!
//! Turning the switch off never cuts an exposure short: an open shutter is
//! still closed on schedule, but no new exposure starts.

use ufmt::uWrite;

use crate::config::{EXPOSURE_DURATION, INTER_SHOT_PAUSE};
use crate::log::debug;
use crate::{FocuserState, ImagingState, Instant, Shutter};

/// Advances the intervalometer by one tick.
///
/// `state` is only read, to decide whether to log.
pub fn advance<S, W>(
    imaging: &mut ImagingState,
    shutter: &mut S,
    now: Instant,
    state: &FocuserState,
    out: &mut W,
) where
    S: Shutter,
    W: uWrite + ?Sized,
{
    if imaging.active {
        if now.has_reached(imaging.close_deadline) {
            shutter.trigger();
            imaging.active = false;
            shutter.set_indicator(false);
            debug!(state, out, "Shutter closed");
        }
        return;
    }

    let due = match imaging.open_deadline {
        Some(deadline) => now.has_reached(deadline),
        None => true,
    };
    if !due {
        return;
    }
    if !imaging.enabled {
        // The pause is over. Forget it, so that a deadline left behind by a
        // long idle spell cannot wrap round and look like the future.
        imaging.open_deadline = None;
        return;
    }

    shutter.trigger();
    imaging.close_deadline = now + EXPOSURE_DURATION;
    imaging.open_deadline = Some(imaging.close_deadline + INTER_SHOT_PAUSE);
    imaging.active = true;
    shutter.set_indicator(true);
    debug!(state, out, "Shutter open");
}
