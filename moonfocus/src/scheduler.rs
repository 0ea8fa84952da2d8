//! The cooperative control loop.
//!
//! Everything the focuser does happens inside [Scheduler::tick], in a fixed
//! order:
//!
//! 1. drain buffered serial input, dispatching each complete command;
//! 2. sample the switches and act on them;
//! 3. advance the intervalometer;
//! 4. advance the motion controller.
//!
//! Each step runs to completion before the next begins, so every piece of
//! state has a single writer at a time. The only blocking is in step and
//! shutter pulses and the pause after a nudge, all of which are short and
//! bounded.

use embedded_hal::delay::DelayNs;
use embedded_hal_v0::serial;
use ufmt::uWrite;

use crate::log::debug;
use crate::protocol::{Decoder, Frame};
use crate::switches::{handle_switches, SwitchInputs};
use crate::{
    dispatch, intervalometer, motion, Clock, FocuserState, ImagingState,
    Instant, Shutter, StepperDriver, Thermometer,
};

/// Owner of all focuser state and hardware.
///
/// # Type Parameters
///
/// - `S`: stepper driver
/// - `SH`: shutter
/// - `SW`: switches
/// - `T`: thermometer
/// - `DL`: delay used for the pause after a nudge
pub struct Scheduler<S, SH, SW, T, DL> {
    state: FocuserState,
    imaging: ImagingState,
    decoder: Decoder,
    stepper: S,
    shutter: SH,
    switches: SW,
    thermometer: T,
    delay: DL,
}

impl<S, SH, SW, T, DL> Scheduler<S, SH, SW, T, DL>
where
    S: StepperDriver,
    SH: Shutter,
    SW: SwitchInputs,
    T: Thermometer,
    DL: DelayNs,
{
    /// Creates a new `Scheduler` in the startup state.
    ///
    /// The motor driver is forced off and the shutter indicator cleared,
    /// whatever state the hardware was handed over in.
    pub fn new(
        mut stepper: S,
        mut shutter: SH,
        switches: SW,
        thermometer: T,
        delay: DL,
    ) -> Self {
        stepper.set_enabled(false);
        shutter.set_indicator(false);
        Self {
            state: FocuserState::new(),
            imaging: ImagingState::new(),
            decoder: Decoder::new(),
            stepper,
            shutter,
            switches,
            thermometer,
            delay,
        }
    }

    /// Returns the focuser state.
    pub fn state(&self) -> &FocuserState {
        &self.state
    }

    /// Returns the intervalometer state.
    pub fn imaging(&self) -> &ImagingState {
        &self.imaging
    }

    /// Runs one pass of the control loop.
    ///
    /// # Parameters
    ///
    /// - `now`: The current instant; used for every deadline in this tick.
    /// - `port`: Serial port to read commands from and write responses to.
    pub fn tick<P>(&mut self, now: Instant, port: &mut P)
    where
        P: serial::Read<u8> + uWrite,
    {
        self.drain_serial(port);

        let sample = self.switches.sample(now);
        handle_switches(
            sample,
            &mut self.state,
            &mut self.imaging,
            &mut self.stepper,
            &mut self.delay,
            port,
        );

        intervalometer::advance(
            &mut self.imaging,
            &mut self.shutter,
            now,
            &self.state,
            port,
        );

        motion::advance(&mut self.state, &mut self.stepper, now, port);
    }

    /// Runs the control loop forever.
    pub fn run<C, P>(mut self, clock: &mut C, port: &mut P) -> !
    where
        C: Clock,
        P: serial::Read<u8> + uWrite,
    {
        loop {
            let now = clock.now();
            self.tick(now, port);
        }
    }

    /// Feeds every byte waiting on the port to the decoder, dispatching
    /// each complete frame. Returns as soon as the port has nothing more.
    fn drain_serial<P>(&mut self, port: &mut P)
    where
        P: serial::Read<u8> + uWrite,
    {
        loop {
            match port.read() {
                Ok(byte) => {
                    if let Some(frame) = self.decoder.feed(byte) {
                        self.handle_frame(frame, port);
                    }
                }
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(_)) => {
                    debug!(self.state, port, "Serial read error");
                    break;
                }
            }
        }
    }

    fn handle_frame<P>(&mut self, frame: Frame, port: &mut P)
    where
        P: uWrite,
    {
        if let Some(error) = frame.error {
            debug!(self.state, port, "Frame error: {:?}", error);
        }
        // A failed write loses the response; there is nobody to tell.
        dispatch(
            frame.command,
            &mut self.state,
            &mut self.stepper,
            &mut self.thermometer,
            port,
        )
        .ok();
    }
}
