//! Command dispatch.

use ufmt::uWrite;

use crate::config::{RE_ZERO_POSITION, VERSION};
use crate::log::debug;
use crate::motion::{go_to_target, halt};
use crate::protocol::{respond, respond_hex2, respond_hex4, ActionCode, Command};
use crate::{FocuserState, StepperDriver, Thermometer};

/// Carries out a command.
///
/// Queries write exactly one response to `out` and change nothing.
/// Setters change state and write nothing. Reserved and unrecognized codes
/// do nothing at all.
///
/// # Returns
///
/// - `Err(error)`: if writing a response failed. State changes have
///   already been made.
pub fn dispatch<S, T, W>(
    command: Command,
    state: &mut FocuserState,
    stepper: &mut S,
    thermometer: &mut T,
    out: &mut W,
) -> Result<(), W::Error>
where
    S: StepperDriver,
    T: Thermometer,
    W: uWrite + ?Sized,
{
    use ActionCode::*;
    debug!(state, out, "Command {:?} {}", command.action, command.value);
    match command.action {
        SetDebug => {
            state.debug_enabled = command.value > 0;
            debug!(state, out, "Debugging on");
        }
        Halt => halt(state, stepper, out),
        GoToTarget => go_to_target(state, stepper, out),
        HalfStepStatus => respond(out, "00")?,
        TempCoefficient => respond(out, "00")?,
        MovingStatus => respond(out, if state.moving { "01" } else { "00" })?,
        TargetPosition => respond_hex4(out, state.target_position)?,
        CurrentPosition => respond_hex4(out, state.current_position)?,
        Temperature => {
            // The host halves this, which gets half-degree resolution
            // through an integer field.
            let doubled = i32::from(thermometer.read_celsius()) * 2;
            respond_hex4(out, doubled)?
        }
        Version => respond(out, VERSION)?,
        StepDelay => respond_hex2(out, i32::from(state.step_delay))?,
        SetStepDelay => state.step_delay = command.value as i16,
        FullStep => state.direction_reversed = false,
        HalfStep => re_zero(state, stepper, out),
        SetTarget => {
            state.target_position = command.value;
            state.active_target = false;
            state.moving = false;
        }
        SetPosition | SetMaxTravel | SetBacklash | Backlash | MaxSteps
        | AverageTemperature | Unrecognized => {}
    }
    Ok(())
}

/// Re-zero gesture, for when the focuser was powered down away from zero.
///
/// Declares the current position to be [RE_ZERO_POSITION] and sets off
/// toward zero with the direction reversed. The user watches the focuser
/// and halts it at the right place.
fn re_zero<S, W>(state: &mut FocuserState, stepper: &mut S, out: &mut W)
where
    S: StepperDriver,
    W: uWrite + ?Sized,
{
    state.current_position = RE_ZERO_POSITION;
    state.target_position = 0;
    state.direction_reversed = true;
    debug!(state, out, "Re-zero from {}", RE_ZERO_POSITION);
    go_to_target(state, stepper, out);
}
