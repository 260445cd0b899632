use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{
        MassDensity, MolarEnergy, MolarHeatCapacity, MolarMass, MolarVolume, Pressure,
        SpecificHeatCapacity, ThermodynamicTemperature,
    },
    mass_density::kilogram_per_cubic_meter,
    molar_energy::joule_per_mole,
    molar_heat_capacity::joule_per_kelvin_mole,
    molar_mass::kilogram_per_mole,
    molar_volume::cubic_meter_per_mole,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::{
    JouleThomsonCoefficient, MolarEntropy, SpecificEnthalpy, SpecificEntropy,
};

use super::{
    GAS_CONSTANT as R,
    error::PropertyError,
    flash::FlashSpec,
    phase::{PhaseKind, PhaseState},
};

/// Phases present at a resolved state.
#[derive(Debug, Clone, PartialEq)]
pub enum Phases {
    Gas(PhaseState),
    Liquid(PhaseState),
    /// Coexisting phases with molar vapor fraction `β`.
    TwoPhase {
        gas: PhaseState,
        liquid: PhaseState,
        vapor_fraction: f64,
    },
}

impl Phases {
    pub(crate) fn single(state: PhaseState) -> Self {
        match state.kind() {
            PhaseKind::Gas => Self::Gas(state),
            PhaseKind::Liquid => Self::Liquid(state),
        }
    }
}

/// Immutable snapshot of a resolved flash.
///
/// Two-phase enthalpy, entropy and volume are vapor-fraction weighted.
/// Properties defined by derivatives along a single phase (`cp`, `cv`,
/// Joule-Thomson) are undefined strictly inside the two-phase region.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashResult {
    spec: FlashSpec,
    phases: Phases,
    molar_mass: f64,
    iters: usize,
}

impl FlashResult {
    pub(crate) fn new(spec: FlashSpec, phases: Phases, molar_mass: MolarMass, iters: usize) -> Self {
        Self {
            spec,
            phases,
            molar_mass: molar_mass.get::<kilogram_per_mole>(),
            iters,
        }
    }

    /// The specification pair that produced this result.
    #[must_use]
    pub fn spec(&self) -> FlashSpec {
        self.spec
    }

    /// Outer iterations spent, summed over every search.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iters
    }

    #[must_use]
    pub fn phases(&self) -> &Phases {
        &self.phases
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(self.reference().t())
    }

    #[must_use]
    pub fn pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.reference().p())
    }

    /// Molar vapor fraction: 1 for gas, 0 for liquid.
    #[must_use]
    pub fn vapor_fraction(&self) -> f64 {
        match &self.phases {
            Phases::Gas(_) => 1.0,
            Phases::Liquid(_) => 0.0,
            Phases::TwoPhase { vapor_fraction, .. } => *vapor_fraction,
        }
    }

    /// The gas phase, if present.
    #[must_use]
    pub fn gas(&self) -> Option<&PhaseState> {
        match &self.phases {
            Phases::Gas(gas) | Phases::TwoPhase { gas, .. } => Some(gas),
            Phases::Liquid(_) => None,
        }
    }

    /// The liquid phase, if present.
    #[must_use]
    pub fn liquid(&self) -> Option<&PhaseState> {
        match &self.phases {
            Phases::Liquid(liquid) | Phases::TwoPhase { liquid, .. } => Some(liquid),
            Phases::Gas(_) => None,
        }
    }

    #[must_use]
    pub fn enthalpy(&self) -> MolarEnergy {
        MolarEnergy::new::<joule_per_mole>(self.weighted(PhaseState::h))
    }

    #[must_use]
    pub fn entropy(&self) -> MolarEntropy {
        MolarHeatCapacity::new::<joule_per_kelvin_mole>(self.weighted(PhaseState::s))
    }

    #[must_use]
    pub fn molar_volume(&self) -> MolarVolume {
        MolarVolume::new::<cubic_meter_per_mole>(self.weighted(PhaseState::v))
    }

    /// Overall `PV/RT`.
    #[must_use]
    pub fn compressibility(&self) -> f64 {
        let state = self.reference();
        state.p() * self.weighted(PhaseState::v) / (R * state.t())
    }

    /// Isobaric heat capacity.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Undefined`] inside the two-phase region.
    pub fn cp(&self) -> Result<MolarHeatCapacity, PropertyError> {
        self.single_phase("isobaric heat capacity")
            .map(PhaseState::cp)
    }

    /// Isochoric heat capacity.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Undefined`] inside the two-phase region.
    pub fn cv(&self) -> Result<MolarHeatCapacity, PropertyError> {
        self.single_phase("isochoric heat capacity")
            .map(PhaseState::cv)
    }

    /// Joule-Thomson coefficient `(∂T/∂P)_H`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Undefined`] inside the two-phase region.
    pub fn joule_thomson(&self) -> Result<JouleThomsonCoefficient, PropertyError> {
        self.single_phase("Joule-Thomson coefficient")
            .map(PhaseState::joule_thomson)
    }

    #[must_use]
    pub fn molar_mass(&self) -> MolarMass {
        MolarMass::new::<kilogram_per_mole>(self.molar_mass)
    }

    #[must_use]
    pub fn enthalpy_mass(&self) -> SpecificEnthalpy {
        SpecificEnthalpy::new::<joule_per_kilogram>(self.weighted(PhaseState::h) / self.molar_mass)
    }

    #[must_use]
    pub fn entropy_mass(&self) -> SpecificEntropy {
        SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
            self.weighted(PhaseState::s) / self.molar_mass,
        )
    }

    /// Isobaric heat capacity per unit mass.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Undefined`] inside the two-phase region.
    pub fn cp_mass(&self) -> Result<SpecificHeatCapacity, PropertyError> {
        let state = self.single_phase("isobaric heat capacity")?;
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
            state.cp_si() / self.molar_mass,
        ))
    }

    #[must_use]
    pub fn density_mass(&self) -> MassDensity {
        MassDensity::new::<kilogram_per_cubic_meter>(
            self.molar_mass / self.weighted(PhaseState::v),
        )
    }

    /// The state carrying T and P; both phases share them when two are present.
    fn reference(&self) -> &PhaseState {
        match &self.phases {
            Phases::Gas(state) | Phases::Liquid(state) => state,
            Phases::TwoPhase { gas, .. } => gas,
        }
    }

    fn weighted(&self, property: impl Fn(&PhaseState) -> f64) -> f64 {
        match &self.phases {
            Phases::Gas(state) | Phases::Liquid(state) => property(state),
            Phases::TwoPhase {
                gas,
                liquid,
                vapor_fraction,
            } => vapor_fraction * property(gas) + (1.0 - vapor_fraction) * property(liquid),
        }
    }

    /// The phase a single-phase property is taken from.
    ///
    /// Saturated endpoints (`β` of exactly 0 or 1) resolve to that phase.
    fn single_phase(&self, property: &str) -> Result<&PhaseState, PropertyError> {
        match &self.phases {
            Phases::Gas(state) | Phases::Liquid(state) => Ok(state),
            Phases::TwoPhase {
                gas, vapor_fraction, ..
            } if *vapor_fraction >= 1.0 => Ok(gas),
            Phases::TwoPhase {
                liquid,
                vapor_fraction,
                ..
            } if *vapor_fraction <= 0.0 => Ok(liquid),
            Phases::TwoPhase { vapor_fraction, .. } => Err(PropertyError::Undefined {
                context: format!("{property} inside the two-phase region (β = {vapor_fraction})"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::thermo::{ComponentLibrary, CubicEos, Flasher, Fluid, Specification};

    fn flasher() -> Flasher {
        let fluid = Fluid::from_provider(&ComponentLibrary::standard(), &[("oxygen", 1.0)]).unwrap();
        Flasher::cubic(fluid, CubicEos::Srk).unwrap()
    }

    fn two_phase(beta: f64) -> FlashResult {
        flasher()
            .flash(
                Specification::Temperature(ThermodynamicTemperature::new::<kelvin>(90.0)),
                Specification::VaporFraction(beta),
            )
            .unwrap()
    }

    #[test]
    fn two_phase_properties_are_weighted() {
        let result = two_phase(0.25);
        let gas = result.gas().unwrap();
        let liquid = result.liquid().unwrap();

        assert_relative_eq!(
            result.enthalpy().get::<joule_per_mole>(),
            0.25 * gas.h() + 0.75 * liquid.h(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            result.molar_volume().get::<cubic_meter_per_mole>(),
            0.25 * gas.v() + 0.75 * liquid.v(),
            max_relative = 1e-12
        );
        assert_relative_eq!(result.pressure().get::<pascal>(), gas.p());
    }

    #[test]
    fn heat_capacity_is_undefined_inside_the_dome() {
        let result = two_phase(0.5);
        assert!(matches!(result.cp(), Err(PropertyError::Undefined { .. })));
        assert!(result.cv().is_err());
        assert!(result.joule_thomson().is_err());
        assert!(result.cp_mass().is_err());
    }

    #[test]
    fn saturated_endpoints_take_the_matching_phase() {
        let bubble = two_phase(0.0);
        assert_eq!(bubble.cp().unwrap(), bubble.liquid().unwrap().cp());

        let dew = two_phase(1.0);
        assert_eq!(dew.cp().unwrap(), dew.gas().unwrap().cp());
    }

    #[test]
    fn mass_basis_divides_by_molar_mass() {
        let result = flasher()
            .flash(
                Specification::Temperature(ThermodynamicTemperature::new::<kelvin>(300.0)),
                Specification::Pressure(Pressure::new::<pascal>(101_325.0)),
            )
            .unwrap();
        let mw = result.molar_mass().get::<kilogram_per_mole>();

        assert_relative_eq!(
            result.density_mass().get::<kilogram_per_cubic_meter>(),
            mw / result.molar_volume().get::<cubic_meter_per_mole>(),
        );
        assert_relative_eq!(
            result.cp_mass().unwrap().get::<joule_per_kilogram_kelvin>() * mw,
            result.cp().unwrap().get::<joule_per_kelvin_mole>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(result.compressibility(), result.gas().unwrap().z(), max_relative = 1e-12);
        assert!(result.enthalpy_mass().get::<joule_per_kilogram>().is_finite());
    }
}
