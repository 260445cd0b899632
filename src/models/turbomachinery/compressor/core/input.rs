use uom::si::f64::{
    MassRate, Power, Pressure, TemperatureInterval, ThermodynamicTemperature,
};

use crate::{support::units::SpecificEnthalpy, thermo::FlashResult};

/// Compressor inlet state.
#[derive(Debug, Clone, PartialEq)]
pub enum Inlet {
    /// Conditions resolved with a `(T, P)` flash.
    Conditions {
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    },
    /// A state already resolved by the same flasher.
    Flashed(FlashResult),
}

/// Input to the compressor model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressorInput {
    pub inlet: Inlet,
    pub outlet_pressure: Pressure,
    pub mass_flow: MassRate,
}

/// Output of the compressor model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressorOutput {
    pub inlet: FlashResult,
    pub outlet: FlashResult,
    /// Outlet of an ideal machine at the same pressure ratio.
    pub isentropic_outlet: FlashResult,
    /// Enthalpy rise of the fluid per unit mass.
    pub specific_work: SpecificEnthalpy,
    pub shaft_power: Power,
    pub temperature_rise: TemperatureInterval,
}
