use std::fmt;

use uom::si::{
    f64::{MolarEnergy, MolarVolume, Pressure, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    molar_volume::cubic_meter_per_mole,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use crate::{
    support::{
        constraint::{StrictlyPositive, UnitInterval},
        units::MolarEntropy,
    },
    thermo::error::SpecificationError,
};

/// One fixed variable handed to [`Flasher::flash`](super::Flasher::flash).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum Specification {
    Temperature(ThermodynamicTemperature),
    Pressure(Pressure),
    Enthalpy(MolarEnergy),
    Entropy(MolarEntropy),
    Volume(MolarVolume),
    /// Molar vapor fraction, `0 ≤ β ≤ 1`.
    VaporFraction(f64),
}

impl Specification {
    /// The variable this specification fixes.
    #[must_use]
    pub fn variable(&self) -> Variable {
        match self {
            Self::Temperature(_) => Variable::Temperature,
            Self::Pressure(_) => Variable::Pressure,
            Self::Enthalpy(_) => Variable::Enthalpy,
            Self::Entropy(_) => Variable::Entropy,
            Self::Volume(_) => Variable::Volume,
            Self::VaporFraction(_) => Variable::VaporFraction,
        }
    }

    /// SI magnitude of the specified value.
    fn si(&self) -> f64 {
        match self {
            Self::Temperature(t) => t.get::<kelvin>(),
            Self::Pressure(p) => p.get::<pascal>(),
            Self::Enthalpy(h) => h.get::<joule_per_mole>(),
            Self::Entropy(s) => s.value,
            Self::Volume(v) => v.get::<cubic_meter_per_mole>(),
            Self::VaporFraction(beta) => *beta,
        }
    }

    fn check_range(&self) -> Result<(), SpecificationError> {
        let value = self.si();
        let valid = match self {
            Self::Temperature(_) | Self::Pressure(_) | Self::Volume(_) => {
                value.is_finite() && StrictlyPositive::new(value).is_ok()
            }
            Self::Enthalpy(_) | Self::Entropy(_) => value.is_finite(),
            Self::VaporFraction(_) => UnitInterval::new(value).is_ok(),
        };
        if valid {
            Ok(())
        } else {
            Err(SpecificationError::OutOfRange {
                variable: self.variable(),
                value,
            })
        }
    }
}

/// Names of the state variables a flash can fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum Variable {
    Temperature,
    Pressure,
    Enthalpy,
    Entropy,
    Volume,
    VaporFraction,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::Enthalpy => "enthalpy",
            Self::Entropy => "entropy",
            Self::Volume => "volume",
            Self::VaporFraction => "vapor fraction",
        })
    }
}

/// A validated, supported pair of specifications.
///
/// Built from two [`Specification`]s in either order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum FlashSpec {
    TemperaturePressure {
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    },
    PressureEnthalpy {
        pressure: Pressure,
        enthalpy: MolarEnergy,
    },
    PressureEntropy {
        pressure: Pressure,
        entropy: MolarEntropy,
    },
    PressureVolume {
        pressure: Pressure,
        volume: MolarVolume,
    },
    TemperatureVaporFraction {
        temperature: ThermodynamicTemperature,
        vapor_fraction: f64,
    },
    PressureVaporFraction {
        pressure: Pressure,
        vapor_fraction: f64,
    },
}

impl FlashSpec {
    /// Pairs two specifications.
    ///
    /// # Errors
    ///
    /// Returns [`SpecificationError::Duplicate`] when both fix the same
    /// variable, [`SpecificationError::Unsupported`] for any other pair not
    /// listed on [`FlashSpec`], and [`SpecificationError::OutOfRange`] for a
    /// non-finite, non-positive (T, P, V) or out-of-`[0, 1]` (β) value.
    pub fn new(a: Specification, b: Specification) -> Result<Self, SpecificationError> {
        use Specification as S;

        if a.variable() == b.variable() {
            return Err(SpecificationError::Duplicate(a.variable()));
        }

        let spec = match (a, b) {
            (S::Temperature(temperature), S::Pressure(pressure))
            | (S::Pressure(pressure), S::Temperature(temperature)) => Self::TemperaturePressure {
                temperature,
                pressure,
            },
            (S::Pressure(pressure), S::Enthalpy(enthalpy))
            | (S::Enthalpy(enthalpy), S::Pressure(pressure)) => {
                Self::PressureEnthalpy { pressure, enthalpy }
            }
            (S::Pressure(pressure), S::Entropy(entropy))
            | (S::Entropy(entropy), S::Pressure(pressure)) => {
                Self::PressureEntropy { pressure, entropy }
            }
            (S::Pressure(pressure), S::Volume(volume))
            | (S::Volume(volume), S::Pressure(pressure)) => Self::PressureVolume { pressure, volume },
            (S::Temperature(temperature), S::VaporFraction(vapor_fraction))
            | (S::VaporFraction(vapor_fraction), S::Temperature(temperature)) => {
                Self::TemperatureVaporFraction {
                    temperature,
                    vapor_fraction,
                }
            }
            (S::Pressure(pressure), S::VaporFraction(vapor_fraction))
            | (S::VaporFraction(vapor_fraction), S::Pressure(pressure)) => {
                Self::PressureVaporFraction {
                    pressure,
                    vapor_fraction,
                }
            }
            _ => {
                return Err(SpecificationError::Unsupported {
                    first: a.variable(),
                    second: b.variable(),
                });
            }
        };

        a.check_range()?;
        b.check_range()?;
        Ok(spec)
    }

    /// Specified temperature, if this pair fixes one.
    #[must_use]
    pub fn temperature(&self) -> Option<ThermodynamicTemperature> {
        match self {
            Self::TemperaturePressure { temperature, .. }
            | Self::TemperatureVaporFraction { temperature, .. } => Some(*temperature),
            _ => None,
        }
    }

    /// Specified pressure, if this pair fixes one.
    #[must_use]
    pub fn pressure(&self) -> Option<Pressure> {
        match self {
            Self::TemperaturePressure { pressure, .. }
            | Self::PressureEnthalpy { pressure, .. }
            | Self::PressureEntropy { pressure, .. }
            | Self::PressureVolume { pressure, .. }
            | Self::PressureVaporFraction { pressure, .. } => Some(*pressure),
            Self::TemperatureVaporFraction { .. } => None,
        }
    }

    /// Specified vapor fraction, if this pair fixes one.
    #[must_use]
    pub fn vapor_fraction(&self) -> Option<f64> {
        match self {
            Self::TemperatureVaporFraction { vapor_fraction, .. }
            | Self::PressureVaporFraction { vapor_fraction, .. } => Some(*vapor_fraction),
            _ => None,
        }
    }
}

impl fmt::Display for FlashSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = |p: &Pressure| p.get::<pascal>();
        let t = |t: &ThermodynamicTemperature| t.get::<kelvin>();
        match self {
            Self::TemperaturePressure {
                temperature,
                pressure,
            } => write!(f, "TP flash (T = {} K, P = {} Pa)", t(temperature), p(pressure)),
            Self::PressureEnthalpy { pressure, enthalpy } => write!(
                f,
                "PH flash (P = {} Pa, H = {} J/mol)",
                p(pressure),
                enthalpy.get::<joule_per_mole>()
            ),
            Self::PressureEntropy { pressure, entropy } => write!(
                f,
                "PS flash (P = {} Pa, S = {} J/(mol·K))",
                p(pressure),
                entropy.value
            ),
            Self::PressureVolume { pressure, volume } => write!(
                f,
                "PV flash (P = {} Pa, V = {} m³/mol)",
                p(pressure),
                volume.get::<cubic_meter_per_mole>()
            ),
            Self::TemperatureVaporFraction {
                temperature,
                vapor_fraction,
            } => write!(f, "Tβ flash (T = {} K, β = {vapor_fraction})", t(temperature)),
            Self::PressureVaporFraction {
                pressure,
                vapor_fraction,
            } => write!(f, "Pβ flash (P = {} Pa, β = {vapor_fraction})", p(pressure)),
        }
    }
}
