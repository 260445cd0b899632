//! Enthalpy-of-vaporization correlations.
//!
//! These are quick estimates from critical constants, independent of any
//! equation of state. For the value consistent with a phase model use
//! [`Flasher::enthalpy_of_vaporization`](super::Flasher::enthalpy_of_vaporization).
//! Every correlation returns zero at and above the critical temperature.

use uom::si::{
    f64::{MolarEnergy, Pressure, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use super::{GAS_CONSTANT as R, component::FluidConstants};

/// Watson's temperature exponent.
pub const WATSON_EXPONENT: f64 = 0.38;

/// Pitzer acentric-factor correlation.
///
/// `ΔHvap = R·Tc·(7.08·(1 − Tr)^0.354 + 10.95·ω·(1 − Tr)^0.456)`
///
/// # Example
///
/// ```
/// use twine_flash::thermo::{ComponentLibrary, ComponentProvider, vaporization};
/// use uom::si::{
///     f64::ThermodynamicTemperature, molar_energy::joule_per_mole,
///     thermodynamic_temperature::kelvin,
/// };
///
/// let water = ComponentLibrary::standard().component("water").unwrap();
/// let t = ThermodynamicTemperature::new::<kelvin>(373.15);
/// let hvap = vaporization::pitzer(t, water.constants());
/// assert!((hvap.get::<joule_per_mole>() - 41_799.0).abs() < 5.0);
/// ```
#[must_use]
pub fn pitzer(temperature: ThermodynamicTemperature, constants: &FluidConstants) -> MolarEnergy {
    let tc = constants.tc();
    let tau = 1.0 - temperature.get::<kelvin>() / tc;
    if tau <= 0.0 {
        return MolarEnergy::new::<joule_per_mole>(0.0);
    }
    let omega = constants.omega();
    MolarEnergy::new::<joule_per_mole>(
        R * tc * (7.08 * tau.powf(0.354) + 10.95 * omega * tau.powf(0.456)),
    )
}

/// Watson extrapolation of a known enthalpy of vaporization.
///
/// `ΔH₂ = ΔH₁·((1 − Tr₂)/(1 − Tr₁))^0.38`
#[must_use]
pub fn watson(
    known: MolarEnergy,
    known_temperature: ThermodynamicTemperature,
    temperature: ThermodynamicTemperature,
    critical_temperature: ThermodynamicTemperature,
) -> MolarEnergy {
    watson_with_exponent(
        known,
        known_temperature,
        temperature,
        critical_temperature,
        WATSON_EXPONENT,
    )
}

/// [`watson`] with a fluid-specific exponent.
#[must_use]
pub fn watson_with_exponent(
    known: MolarEnergy,
    known_temperature: ThermodynamicTemperature,
    temperature: ThermodynamicTemperature,
    critical_temperature: ThermodynamicTemperature,
    exponent: f64,
) -> MolarEnergy {
    let tc = critical_temperature.get::<kelvin>();
    let tau = 1.0 - temperature.get::<kelvin>() / tc;
    let tau_known = 1.0 - known_temperature.get::<kelvin>() / tc;
    if tau <= 0.0 || tau_known <= 0.0 {
        return MolarEnergy::new::<joule_per_mole>(0.0);
    }
    known * (tau / tau_known).powf(exponent)
}

/// Clausius-Clapeyron estimate anchored at the critical point.
///
/// Integrating `d ln P / d(1/T) = −ΔH/(R·ΔZ)` between the saturation point
/// and the critical point gives
/// `ΔHvap = R·T·ΔZ·ln(Pc/Psat)/(1 − Tr)`, where `ΔZ = Z_gas − Z_liquid`
/// (close to 1 at low pressure).
#[must_use]
pub fn clapeyron(
    temperature: ThermodynamicTemperature,
    saturation_pressure: Pressure,
    compressibility_change: f64,
    constants: &FluidConstants,
) -> MolarEnergy {
    let t = temperature.get::<kelvin>();
    let tau = 1.0 - t / constants.tc();
    if tau <= 0.0 {
        return MolarEnergy::new::<joule_per_mole>(0.0);
    }
    let ln_ratio = (constants.pc() / saturation_pressure.get::<pascal>()).ln();
    MolarEnergy::new::<joule_per_mole>(R * t * compressibility_change * ln_ratio / tau)
}
