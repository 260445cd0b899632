use twine_solvers::equation::bisection;
use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

/// Solver settings for [`Flasher`](super::Flasher).
///
/// Residuals of the temperature searches are dimensionless: enthalpy is
/// scaled by `R·Tc`, entropy by `R`, and volume relative to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashConfig {
    /// Maximum iteration count for each temperature bisection.
    pub max_iters: usize,

    /// Absolute tolerance on the temperature search variable.
    pub temperature_tol: TemperatureInterval,

    /// Normalized residual at which a temperature search stops.
    pub residual_tol: f64,

    /// Largest normalized residual accepted once the temperature bracket
    /// has collapsed below `temperature_tol`.
    pub max_residual: f64,

    /// Lower bound of the temperature search.
    pub min_temperature: ThermodynamicTemperature,

    /// Upper bound of the temperature search.
    pub max_temperature: ThermodynamicTemperature,

    /// Iteration limit of the saturation-pressure substitution.
    pub saturation_max_iters: usize,

    /// Tolerance on `|ln φ_liquid − ln φ_gas|` at saturation.
    pub saturation_tol: f64,

    /// Reduced-temperature window `[Tr_min, Tr_max]` searched for a
    /// saturation temperature.
    pub saturation_reduced_temperatures: [f64; 2],
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            temperature_tol: TemperatureInterval::new::<delta_kelvin>(1e-9),
            residual_tol: 1e-10,
            max_residual: 1e-6,
            min_temperature: ThermodynamicTemperature::new::<kelvin>(20.0),
            max_temperature: ThermodynamicTemperature::new::<kelvin>(2000.0),
            saturation_max_iters: 500,
            saturation_tol: 1e-12,
            saturation_reduced_temperatures: [0.25, 0.999],
        }
    }
}

impl FlashConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.temperature_tol.get::<delta_kelvin>(),
            x_rel_tol: 0.0,
            residual_tol: self.residual_tol,
        }
    }

    /// Temperature search bounds in kelvin.
    pub(super) fn temperature_bounds(&self) -> [f64; 2] {
        [
            self.min_temperature.get::<kelvin>(),
            self.max_temperature.get::<kelvin>(),
        ]
    }
}
