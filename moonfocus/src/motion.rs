//! Incremental motion toward the target position.
//!
//! Motion is spread over scheduler ticks: each tick issues at most
//! [MAX_STEPS_PER_TICK] steps so that serial input keeps being serviced
//! during a long move. Once the target is reached the driver stays
//! energized for [STEPPER_COOLDOWN], so that a run of manual nudges does
//! not switch the motor on and off for every press.
//!
//! The controller is in one of three states:
//!
//! - idle: driver disabled.
//! - seeking: `active_target` set, position short of the target.
//! - cooling: driver enabled but not stepping, either at the target or
//!   because the host withdrew it, waiting for `cooling_deadline`.

use ufmt::uWrite;

use crate::config::{clamp_position, MAX_STEPS_PER_TICK, STEPPER_COOLDOWN};
use crate::log::debug;
use crate::{Direction, FocuserState, Instant, StepperDriver};

/// Position the controller actually drives toward.
///
/// A target commanded by the host is stored as given, but travel never
/// leaves the range.
fn goal(state: &FocuserState) -> i32 {
    clamp_position(state.target_position)
}

/// Starts (or continues) travel to the target position.
///
/// This is the single entry point for motion requests, whether they come
/// from the host or from the nudge switches.
pub fn go_to_target<S, W>(state: &mut FocuserState, stepper: &mut S, out: &mut W)
where
    S: StepperDriver,
    W: uWrite + ?Sized,
{
    state.active_target = true;
    if state.current_position == goal(state) {
        debug!(state, out, "At target {}", state.current_position);
        return;
    }
    debug!(
        state,
        out,
        "Moving from {} to {}",
        state.current_position,
        state.target_position
    );
    if !state.stepper_enabled {
        enable(state, stepper, out);
    }
    state.moving = true;
}

/// Emergency stop.
///
/// Freezes the target at the current position and de-energizes the motor
/// immediately, regardless of any cooldown.
pub fn halt<S, W>(state: &mut FocuserState, stepper: &mut S, out: &mut W)
where
    S: StepperDriver,
    W: uWrite + ?Sized,
{
    state.active_target = false;
    state.moving = false;
    state.target_position = state.current_position;
    disable(state, stepper, out);
    debug!(state, out, "Halted at {}", state.current_position);
}

/// Advances motion by one tick.
///
/// While seeking, sets the direction line and then issues up to
/// [MAX_STEPS_PER_TICK] steps. Otherwise, disables the driver once `now`
/// reaches the cooling deadline, starting the cooldown first if it is not
/// already running.
pub fn advance<S, W>(
    state: &mut FocuserState,
    stepper: &mut S,
    now: Instant,
    out: &mut W,
) where
    S: StepperDriver,
    W: uWrite + ?Sized,
{
    let goal = goal(state);
    let direction = if state.active_target {
        Direction::between(state.current_position, goal)
    } else {
        None
    };
    let Some(direction) = direction else {
        state.moving = false;
        cool_down(state, stepper, now, out);
        return;
    };

    state.moving = true;
    state.cooling_deadline = None;
    stepper.set_direction(state.polarity().level(direction));
    let steps = (goal - state.current_position).abs().min(MAX_STEPS_PER_TICK);
    for _ in 0..steps {
        stepper.step();
    }
    state.current_position += direction.unit() * steps;

    if state.current_position == goal {
        state.cooling_deadline = Some(now + STEPPER_COOLDOWN);
        state.moving = false;
        debug!(state, out, "Arrived at {}", state.current_position);
    }
}

fn cool_down<S, W>(
    state: &mut FocuserState,
    stepper: &mut S,
    now: Instant,
    out: &mut W,
) where
    S: StepperDriver,
    W: uWrite + ?Sized,
{
    if !state.stepper_enabled {
        state.active_target = false;
        return;
    }
    let deadline = *state
        .cooling_deadline
        .get_or_insert(now + STEPPER_COOLDOWN);
    if now.has_reached(deadline) {
        state.active_target = false;
        disable(state, stepper, out);
        debug!(state, out, "Cooldown over");
    }
}

fn enable<S, W>(state: &mut FocuserState, stepper: &mut S, out: &mut W)
where
    S: StepperDriver,
    W: uWrite + ?Sized,
{
    stepper.set_enabled(true);
    state.stepper_enabled = true;
    state.cooling_deadline = None;
    debug!(state, out, "Stepper enabled");
}

fn disable<S, W>(state: &mut FocuserState, stepper: &mut S, out: &mut W)
where
    S: StepperDriver,
    W: uWrite + ?Sized,
{
    stepper.set_enabled(false);
    state.stepper_enabled = false;
    state.cooling_deadline = None;
    debug!(state, out, "Stepper disabled");
}
