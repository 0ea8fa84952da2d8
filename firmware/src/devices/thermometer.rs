use arduino_hal::{adc::channel, Adc};
use moonfocus::Thermometer;

/// The ATmega328P's on-chip temperature sensor.
///
/// Uncalibrated: the datasheet gives about 1.22 LSB per degree around an
/// offset of 324 LSB at 0 °C, and individual chips vary by several
/// degrees.
pub struct ChipThermometer {
    adc: Adc,
}
impl ChipThermometer {
    /// ADC reading at 0 °C.
    const OFFSET: i32 = 324;
    /// Hundredths of an LSB per degree.
    const CENTI_LSB_PER_DEGREE: i32 = 122;

    /// Creates a new `ChipThermometer`.
    ///
    /// # Parameters
    ///
    /// - `adc`: ADC configured with the internal 1.1 V reference, which the
    ///   temperature channel requires.
    pub fn new(adc: Adc) -> Self {
        Self { adc }
    }
}

impl Thermometer for ChipThermometer {
    fn read_celsius(&mut self) -> i16 {
        let raw = self.adc.read_blocking(&channel::Temperature) as i32;
        ((raw - Self::OFFSET) * 100 / Self::CENTI_LSB_PER_DEGREE) as i16
    }
}
