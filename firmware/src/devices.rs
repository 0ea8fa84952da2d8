mod clock;
mod thermometer;

pub use clock::TimerClock;
pub use thermometer::ChipThermometer;
