//! Simulated hardware for tests.
//!
//! Every double here is cheap to clone, and clones share their state, so a
//! test can hand one copy to the code under test and keep another to
//! inspect afterwards.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::string::String;
use std::sync::{Arc, Mutex};
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin, PinState};
use embedded_hal_v0::serial;
use ufmt::uWrite;

use crate::config::DIRECTION_POLARITY;
use crate::switches::{SwitchInputs, SwitchSample};
use crate::{
    Clock, Direction, Instant, Shutter, StepperDriver, Thermometer,
};

/// Virtual time, advanced only by delays (or explicitly by a test).
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    nanos: Arc<Mutex<u64>>,
}
impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed virtual time in microseconds.
    pub fn now_us(&self) -> u64 {
        *self.nanos.lock().unwrap() / 1_000
    }

    pub fn advance_ms(&self, millis: u32) {
        *self.nanos.lock().unwrap() += millis as u64 * 1_000_000;
    }

    pub fn set_ms(&self, millis: u32) {
        *self.nanos.lock().unwrap() = millis as u64 * 1_000_000;
    }
}

impl DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        *self.nanos.lock().unwrap() += ns as u64;
    }
}

impl Clock for SimClock {
    fn now(&mut self) -> Instant {
        let millis = *self.nanos.lock().unwrap() / 1_000_000;
        Instant::from_millis(millis as u32)
    }
}

#[derive(Debug)]
struct PinInner {
    high: bool,
    rising_edges: Vec<u64>,
}

/// Digital pin that can be driven by the code under test or by the test.
///
/// Rising edges are stamped with the time on the [SimClock] it was made
/// with.
#[derive(Debug, Clone)]
pub struct TestPin {
    inner: Arc<Mutex<PinInner>>,
    clock: SimClock,
}
impl TestPin {
    /// Creates a new `TestPin`, initially low.
    pub fn new(clock: &SimClock) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PinInner {
                high: false,
                rising_edges: Vec::new(),
            })),
            clock: clock.clone(),
        }
    }

    /// Drives the pin from outside, as a switch would.
    pub fn set_level(&self, high: bool) {
        self.inner.lock().unwrap().high = high;
    }

    pub fn is_set_high(&self) -> bool {
        self.inner.lock().unwrap().high
    }

    pub fn rising_edges(&self) -> usize {
        self.inner.lock().unwrap().rising_edges.len()
    }

    /// Times of every rising edge, in microseconds.
    pub fn rising_edge_times(&self) -> Vec<u64> {
        self.inner.lock().unwrap().rising_edges.clone()
    }

    fn drive(&mut self, high: bool) {
        let now = self.clock.now_us();
        let mut inner = self.inner.lock().unwrap();
        if high && !inner.high {
            inner.rising_edges.push(now);
        }
        inner.high = high;
    }
}

impl ErrorType for TestPin {
    type Error = Infallible;
}

impl OutputPin for TestPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

impl InputPin for TestPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_set_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_set_high())
    }
}

#[derive(Debug, Default)]
struct StepperInner {
    enabled: bool,
    enable_count: usize,
    direction: Option<PinState>,
    steps_per_call: Vec<usize>,
    step_levels: Vec<PinState>,
}

/// Stepper driver that records what it was told to do.
#[derive(Debug, Clone, Default)]
pub struct TestStepper {
    inner: Arc<Mutex<StepperInner>>,
}
impl TestStepper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.lock().unwrap().enabled
    }

    /// Number of times the driver was switched on.
    pub fn enable_count(&self) -> usize {
        self.inner.lock().unwrap().enable_count
    }

    /// Last level set on the direction line.
    pub fn direction(&self) -> Option<PinState> {
        self.inner.lock().unwrap().direction
    }

    pub fn total_steps(&self) -> usize {
        self.inner.lock().unwrap().step_levels.len()
    }

    /// Steps issued after each direction setting.
    pub fn steps_per_call(&self) -> Vec<usize> {
        self.inner.lock().unwrap().steps_per_call.clone()
    }

    /// Direction level in force at each step.
    pub fn step_levels(&self) -> Vec<PinState> {
        self.inner.lock().unwrap().step_levels.clone()
    }

    /// Net steps, counting a step as positive when the direction line had
    /// the nominal increasing level.
    pub fn position(&self) -> i32 {
        let increasing = DIRECTION_POLARITY.level(Direction::Positive);
        self.inner
            .lock()
            .unwrap()
            .step_levels
            .iter()
            .map(|level| if *level == increasing { 1 } else { -1 })
            .sum()
    }
}

impl StepperDriver for TestStepper {
    fn set_enabled(&mut self, enabled: bool) {
        let mut inner = self.inner.lock().unwrap();
        if enabled && !inner.enabled {
            inner.enable_count += 1;
        }
        inner.enabled = enabled;
    }

    fn set_direction(&mut self, level: PinState) {
        let mut inner = self.inner.lock().unwrap();
        inner.direction = Some(level);
        inner.steps_per_call.push(0);
    }

    fn step(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        let level = inner
            .direction
            .expect("TestStepper stepped before its direction was set!");
        inner.step_levels.push(level);
        if let Some(count) = inner.steps_per_call.last_mut() {
            *count += 1;
        }
    }
}

#[derive(Debug, Default)]
struct ShutterInner {
    trigger_count: usize,
    indicator: Option<bool>,
}

/// Shutter that counts its triggers.
#[derive(Debug, Clone, Default)]
pub struct TestShutter {
    inner: Arc<Mutex<ShutterInner>>,
}
impl TestShutter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger_count(&self) -> usize {
        self.inner.lock().unwrap().trigger_count
    }

    /// Last indicator state, or `None` if it was never set.
    pub fn indicator(&self) -> Option<bool> {
        self.inner.lock().unwrap().indicator
    }
}

impl Shutter for TestShutter {
    fn trigger(&mut self) {
        self.inner.lock().unwrap().trigger_count += 1;
    }

    fn set_indicator(&mut self, open: bool) {
        self.inner.lock().unwrap().indicator = Some(open);
    }
}

/// Switches whose (already debounced) readings are set by the test.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSwitches {
    sample: Arc<Mutex<SwitchSample>>,
}
impl ScriptedSwitches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, sample: SwitchSample) {
        *self.sample.lock().unwrap() = sample;
    }
}

impl SwitchInputs for ScriptedSwitches {
    fn sample(&mut self, _now: Instant) -> SwitchSample {
        *self.sample.lock().unwrap()
    }
}

/// Serial port with a scripted input queue and captured output.
#[derive(Debug, Default)]
pub struct TestSerial {
    input: VecDeque<u8>,
    output: String,
}
impl TestSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_input(&mut self, input: &str) {
        self.input.extend(input.bytes());
    }

    /// Returns everything written so far, clearing it.
    pub fn take_output(&mut self) -> String {
        core::mem::take(&mut self.output)
    }
}

impl serial::Read<u8> for TestSerial {
    type Error = Infallible;

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        self.input.pop_front().ok_or(nb::Error::WouldBlock)
    }
}

impl uWrite for TestSerial {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.output.push_str(s);
        Ok(())
    }
}

/// Thermometer stuck at one reading.
#[derive(Debug, Clone, Copy)]
pub struct FixedThermometer {
    celsius: i16,
}
impl FixedThermometer {
    pub fn new(celsius: i16) -> Self {
        Self { celsius }
    }
}

impl Thermometer for FixedThermometer {
    fn read_celsius(&mut self) -> i16 {
        self.celsius
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clock_follows_delays() {
        let mut clock = SimClock::new();
        clock.delay_us(1500);
        assert_eq!(1500, clock.now_us());
        assert_eq!(Instant::from_millis(1), clock.now());
        clock.advance_ms(10);
        assert_eq!(Instant::from_millis(11), clock.now());
    }

    #[test]
    fn test_serial_reads_until_empty() {
        let mut port = TestSerial::new();
        port.push_input(":GP#");
        let mut read = Vec::new();
        while let Ok(byte) = serial::Read::read(&mut port) {
            read.push(byte);
        }
        assert_eq!(b":GP#".to_vec(), read);
        assert!(matches!(
            serial::Read::read(&mut port),
            Err(nb::Error::WouldBlock)
        ));
    }
}
