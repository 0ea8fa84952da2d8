#![cfg_attr(not(test), no_std)]

pub mod config;
mod direction;
mod dispatch;
mod intervalometer;
mod log;
mod motion;
pub mod protocol;
mod scheduler;
mod shutter;
mod state;
mod stepper;
mod switches;
mod thermometer;
mod time;

#[cfg(test)]
mod sim;

pub use direction::Direction;
pub use direction::Polarity;
pub use dispatch::dispatch;
pub use scheduler::Scheduler;
pub use shutter::PinShutter;
pub use shutter::Shutter;
pub use state::FocuserState;
pub use state::ImagingState;
pub use stepper::PinStepper;
pub use stepper::StepperDriver;
pub use switches::Debouncer;
pub use switches::SwitchInputs;
pub use switches::SwitchSample;
pub use switches::Switches;
pub use switches::Unwired;
pub use thermometer::Thermometer;
pub use time::Clock;
pub use time::Instant;
pub use time::MicroSeconds;
pub use time::MilliSeconds;
