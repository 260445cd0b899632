use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

/// Subtraction of absolute temperatures.
///
/// [`uom`] does not define `ThermodynamicTemperature − ThermodynamicTemperature`
/// as a [`TemperatureInterval`] (see uom issues #289 and #380), so compressor
/// temperature rises and similar differences go through [`minus`](Self::minus).
pub trait TemperatureDifference {
    /// Returns `self − other` as an interval.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(self.get::<kelvin>() - other.get::<kelvin>())
    }
}
