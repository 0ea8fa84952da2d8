use crate::devices::{ChipThermometer, TimerClock};
use arduino_hal::{
    adc::{AdcSettings, ReferenceVoltage},
    default_serial,
    hal::port::{PD0, PD1},
    pac::USART0,
    pins,
    port::{
        mode::{Input, Output, PullUp},
        Pin, D13, D2, D3, D4, D5, D6, D8,
    },
    Adc, Delay, Peripherals, Pins, Usart,
};
use moonfocus::{
    config::{DIRECTION_SETTLE, STEP_PULSE_WIDTH},
    PinShutter, PinStepper, Scheduler, Switches,
};

#[cfg(feature = "imaging")]
type ImagingPin = Pin<Input<PullUp>, arduino_hal::port::D7>;
#[cfg(not(feature = "imaging"))]
type ImagingPin = moonfocus::Unwired;

type Focuser = Scheduler<
    PinStepper<Pin<Output, D2>, Pin<Output, D3>, Pin<Output, D4>, Delay>,
    PinShutter<Pin<Output, D8>, Pin<Output, D13>, Delay>,
    Switches<Pin<Input<PullUp>, D5>, Pin<Input<PullUp>, D6>, ImagingPin>,
    ChipThermometer,
    Delay,
>;

/// The focuser board: an Arduino Uno driving a step/direction stepper
/// driver, with two nudge buttons, an intervalometer switch and an infrared
/// shutter release.
///
/// | Pin | Use |
/// |-----|-----|
/// | D2  | stepper pulse |
/// | D3  | stepper direction |
/// | D4  | stepper enable (active low) |
/// | D5  | increase button (to ground) |
/// | D6  | decrease button (to ground) |
/// | D7  | intervalometer switch (to ground) |
/// | D8  | infrared LED |
/// | D13 | shutter indicator LED |
pub struct Machine {
    focuser: Focuser,
    clock: TimerClock,
    serial: Usart<USART0, Pin<Input, PD0>, Pin<Output, PD1>>,
}

impl Machine {
    /// Host software expects the speed of the commercial focuser.
    const BAUD_RATE: u32 = 9600;

    pub fn new() -> Self {
        let peripherals: Peripherals = unsafe { Peripherals::steal() };
        let pins: Pins = pins!(peripherals);
        let serial = default_serial!(peripherals, pins, Self::BAUD_RATE);

        let stepper = PinStepper::new(
            pins.d2.into_output(),
            pins.d3.into_output(),
            pins.d4.into_output(),
            Delay::new(),
            STEP_PULSE_WIDTH,
            DIRECTION_SETTLE,
        );
        let shutter = PinShutter::new(
            pins.d8.into_output(),
            pins.d13.into_output(),
            Delay::new(),
        );

        #[cfg(feature = "imaging")]
        let imaging_pin = pins.d7.into_pull_up_input();
        #[cfg(not(feature = "imaging"))]
        let imaging_pin = moonfocus::Unwired;
        let switches = Switches::new(
            pins.d5.into_pull_up_input(),
            pins.d6.into_pull_up_input(),
            imaging_pin,
        );

        let adc = Adc::new(
            peripherals.ADC,
            AdcSettings {
                ref_voltage: ReferenceVoltage::Internal,
                ..Default::default()
            },
        );
        let thermometer = ChipThermometer::new(adc);

        let focuser =
            Scheduler::new(stepper, shutter, switches, thermometer, Delay::new());
        let clock = TimerClock::new(peripherals.TC1);

        Self {
            focuser,
            clock,
            serial,
        }
    }

    /// Runs the focuser forever.
    pub fn run(self) -> ! {
        let Self {
            focuser,
            mut clock,
            mut serial,
        } = self;
        focuser.run(&mut clock, &mut serial)
    }
}
