//! Pure-component records and the provider seam that supplies them.

mod heat_capacity;
mod library;

use uom::si::{
    f64::{MolarMass, MolarVolume, Pressure, ThermodynamicTemperature},
    molar_mass::kilogram_per_mole,
    molar_volume::cubic_meter_per_mole,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use crate::support::constraint::StrictlyPositive;

use super::error::{ConstantsError, UnknownComponentError};

pub use heat_capacity::HeatCapacityCorrelation;
pub use library::ComponentLibrary;

/// Supplies one [`Component`] record per identifier.
///
/// Implementations might wrap a property database, a file, or a fixed table.
pub trait ComponentProvider {
    /// Returns the record for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownComponentError`] if the provider has no record for `id`.
    fn component(&self, id: &str) -> Result<Component, UnknownComponentError>;
}

/// Critical constants and acentric factor of a pure component.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct FluidConstants {
    tc: f64,
    pc: f64,
    vc: f64,
    omega: f64,
}

impl FluidConstants {
    /// Creates validated constants.
    ///
    /// # Errors
    ///
    /// Returns [`ConstantsError`] if `Tc`, `Pc` or `Vc` is not strictly positive,
    /// or if the acentric factor is not finite.
    pub fn new(
        critical_temperature: ThermodynamicTemperature,
        critical_pressure: Pressure,
        critical_volume: MolarVolume,
        acentric_factor: f64,
    ) -> Result<Self, ConstantsError> {
        let tc = positive("critical temperature", critical_temperature.get::<kelvin>())?;
        let pc = positive("critical pressure", critical_pressure.get::<pascal>())?;
        let vc = positive("critical volume", critical_volume.get::<cubic_meter_per_mole>())?;
        if !acentric_factor.is_finite() {
            return Err(ConstantsError::AcentricFactor(acentric_factor));
        }
        Ok(Self {
            tc,
            pc,
            vc,
            omega: acentric_factor,
        })
    }

    #[must_use]
    pub fn critical_temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(self.tc)
    }

    #[must_use]
    pub fn critical_pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.pc)
    }

    #[must_use]
    pub fn critical_volume(&self) -> MolarVolume {
        MolarVolume::new::<cubic_meter_per_mole>(self.vc)
    }

    #[must_use]
    pub fn acentric_factor(&self) -> f64 {
        self.omega
    }

    pub(crate) fn tc(&self) -> f64 {
        self.tc
    }

    pub(crate) fn pc(&self) -> f64 {
        self.pc
    }

    pub(crate) fn vc(&self) -> f64 {
        self.vc
    }

    pub(crate) fn omega(&self) -> f64 {
        self.omega
    }
}

/// A pure component: identifier, constants, molar mass and ideal-gas `Cp`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct Component {
    id: String,
    constants: FluidConstants,
    molar_mass: f64,
    heat_capacity: HeatCapacityCorrelation,
}

impl Component {
    /// Creates a component record.
    ///
    /// # Errors
    ///
    /// Returns [`ConstantsError`] if the molar mass is not strictly positive or
    /// the heat capacity polynomial is empty.
    pub fn new(
        id: impl Into<String>,
        constants: FluidConstants,
        molar_mass: MolarMass,
        heat_capacity: HeatCapacityCorrelation,
    ) -> Result<Self, ConstantsError> {
        let molar_mass = positive("molar mass", molar_mass.get::<kilogram_per_mole>())?;
        if heat_capacity.is_empty() {
            return Err(ConstantsError::EmptyHeatCapacity);
        }
        Ok(Self {
            id: id.into(),
            constants,
            molar_mass,
            heat_capacity,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn constants(&self) -> &FluidConstants {
        &self.constants
    }

    #[must_use]
    pub fn molar_mass(&self) -> MolarMass {
        MolarMass::new::<kilogram_per_mole>(self.molar_mass)
    }

    #[must_use]
    pub fn heat_capacity(&self) -> &HeatCapacityCorrelation {
        &self.heat_capacity
    }

    /// Molar mass in kg/mol.
    pub(crate) fn mw(&self) -> f64 {
        self.molar_mass
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ConstantsError> {
    StrictlyPositive::new(value)
        .map(|v| v.into_inner())
        .map_err(|source| ConstantsError::Invalid { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::constraint::ConstraintError;

    fn constants(tc: f64, pc: f64) -> Result<FluidConstants, ConstantsError> {
        FluidConstants::new(
            ThermodynamicTemperature::new::<kelvin>(tc),
            Pressure::new::<pascal>(pc),
            MolarVolume::new::<cubic_meter_per_mole>(90.1e-6),
            0.037,
        )
    }

    #[test]
    fn rejects_non_positive_criticals() {
        assert_eq!(
            constants(0.0, 3.4e6),
            Err(ConstantsError::Invalid {
                field: "critical temperature",
                source: ConstraintError::Zero
            })
        );
        assert_eq!(
            constants(126.2, -1.0),
            Err(ConstantsError::Invalid {
                field: "critical pressure",
                source: ConstraintError::Negative
            })
        );
    }

    #[test]
    fn rejects_nan_acentric_factor() {
        let err = FluidConstants::new(
            ThermodynamicTemperature::new::<kelvin>(126.2),
            Pressure::new::<pascal>(3.398e6),
            MolarVolume::new::<cubic_meter_per_mole>(90.1e-6),
            f64::NAN,
        )
        .unwrap_err();
        assert!(matches!(err, ConstantsError::AcentricFactor(_)));
    }

    #[test]
    fn component_checks_molar_mass_and_cp() {
        let c = constants(126.2, 3.398e6).unwrap();
        let cp = HeatCapacityCorrelation::Constant(29.1);

        let zero_mass = Component::new("n2", c, MolarMass::new::<kilogram_per_mole>(0.0), cp);
        assert!(zero_mass.is_err());

        let empty = Component::new(
            "n2",
            c,
            MolarMass::new::<kilogram_per_mole>(0.028),
            HeatCapacityCorrelation::Polynomial(vec![]),
        );
        assert_eq!(empty, Err(ConstantsError::EmptyHeatCapacity));
    }
}
