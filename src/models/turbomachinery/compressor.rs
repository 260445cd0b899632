//! Adiabatic compressor.
//!
//! The outlet state follows from an isentropic `(P, S)` flash scaled by the
//! isentropic efficiency and a final `(P, H)` flash. Shaft power adds the
//! mechanical efficiency.

mod core;

pub use self::core::{CompressionError, CompressorConfig, CompressorInput, CompressorOutput, Inlet};

use twine_core::Model;

use crate::thermo::Flasher;

/// A [`Model`] compressing a fluid described by a [`Flasher`].
///
/// # Example
///
/// ```
/// use twine_core::Model;
/// use twine_flash::{
///     models::turbomachinery::compressor::{Compressor, CompressorConfig, CompressorInput, Inlet},
///     thermo::{ComponentLibrary, Flasher, Fluid},
/// };
/// use uom::si::{
///     f64::{MassRate, Pressure, ThermodynamicTemperature},
///     mass_rate::kilogram_per_second,
///     power::kilowatt,
///     pressure::bar,
///     thermodynamic_temperature::degree_celsius,
/// };
///
/// let oxygen = Fluid::from_provider(&ComponentLibrary::standard(), &[("O2", 1.0)]).unwrap();
/// let compressor = Compressor::new(
///     Flasher::ideal_gas(oxygen).unwrap(),
///     CompressorConfig::new(0.75, 0.95).unwrap(),
/// );
///
/// let output = compressor
///     .call(&CompressorInput {
///         inlet: Inlet::Conditions {
///             temperature: ThermodynamicTemperature::new::<degree_celsius>(25.0),
///             pressure: Pressure::new::<bar>(1.0),
///         },
///         outlet_pressure: Pressure::new::<bar>(10.0),
///         mass_flow: MassRate::new::<kilogram_per_second>(250.0 / 3600.0),
///     })
///     .unwrap();
///
/// assert!((output.shaft_power.get::<kilowatt>() - 24.3).abs() < 0.3);
/// ```
#[derive(Debug, Clone)]
pub struct Compressor {
    flasher: Flasher,
    config: CompressorConfig,
}

impl Compressor {
    #[must_use]
    pub fn new(flasher: Flasher, config: CompressorConfig) -> Self {
        Self { flasher, config }
    }

    #[must_use]
    pub fn flasher(&self) -> &Flasher {
        &self.flasher
    }

    #[must_use]
    pub fn config(&self) -> CompressorConfig {
        self.config
    }
}

impl Model for Compressor {
    type Input = CompressorInput;
    type Output = CompressorOutput;
    type Error = CompressionError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self::core::compress(&self.flasher, self.config, input)
    }
}
