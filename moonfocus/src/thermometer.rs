/// Ambient temperature sensor.
pub trait Thermometer {
    /// Reads the temperature in whole degrees Celsius.
    fn read_celsius(&mut self) -> i16;
}
