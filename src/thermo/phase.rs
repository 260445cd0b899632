//! Equation-of-state phase models.
//!
//! A [`PhaseModel`] evaluates one candidate phase (gas or liquid) of a
//! [`Fluid`] at a given temperature, pressure and composition, producing a
//! [`PhaseState`]. The equation of state is a closed set of variants:
//!
//! - [`Eos::IdealGas`]: `PV = RT`
//! - [`Eos::Cubic`]: van der Waals, Soave-Redlich-Kwong or Peng-Robinson
//! - [`Eos::Virial`]: `Z = 1 + B/V + C/V²` with Tsonopoulos `B`
//!
//! Evaluation is stateless; nothing is cached between calls.

mod cubic;
mod residual;
mod state;
mod virial;

use std::fmt;

use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use super::{
    GAS_CONSTANT as R,
    error::{ModelError, NumericConvergenceError, PhaseError},
    fluid::Fluid,
};

use cubic::CubicParameters;
use residual::Residual;
use virial::VirialParameters;

pub use cubic::{CubicEos, select_root};
pub use state::PhaseState;
pub use virial::{ThirdVirial, VirialEos};

/// Which root of the equation of state a model represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum PhaseKind {
    Gas,
    Liquid,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gas => f.write_str("gas"),
            Self::Liquid => f.write_str("liquid"),
        }
    }
}

/// Equation-of-state family.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum Eos {
    IdealGas,
    Cubic(CubicEos),
    Virial(VirialEos),
}

impl Eos {
    fn name(self) -> &'static str {
        match self {
            Self::IdealGas => "ideal gas",
            Self::Cubic(cubic) => cubic.name(),
            Self::Virial(_) => "virial",
        }
    }
}

impl From<CubicEos> for Eos {
    fn from(eos: CubicEos) -> Self {
        Self::Cubic(eos)
    }
}

impl From<VirialEos> for Eos {
    fn from(eos: VirialEos) -> Self {
        Self::Virial(eos)
    }
}

/// Per-component parameters derived once from the fluid's constants.
#[derive(Debug, Clone, PartialEq)]
enum Parameters {
    IdealGas,
    Cubic(CubicParameters),
    Virial(VirialParameters),
}

/// One candidate phase of a fluid under a chosen equation of state.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseModel {
    kind: PhaseKind,
    eos: Eos,
    fluid: Fluid,
    parameters: Parameters,
}

impl PhaseModel {
    /// Creates a phase model for `fluid`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedPhase`] for a liquid under the ideal-gas
    /// or virial equations of state, which only have a gas root.
    pub fn new(kind: PhaseKind, eos: impl Into<Eos>, fluid: &Fluid) -> Result<Self, ModelError> {
        let eos = eos.into();
        let parameters = match eos {
            Eos::IdealGas | Eos::Virial(_) if kind == PhaseKind::Liquid => {
                return Err(ModelError::UnsupportedPhase {
                    eos: eos.name(),
                    kind,
                });
            }
            Eos::IdealGas => Parameters::IdealGas,
            Eos::Cubic(cubic) => Parameters::Cubic(CubicParameters::new(cubic, fluid)),
            Eos::Virial(virial) => Parameters::Virial(VirialParameters::new(virial, fluid)),
        };
        Ok(Self {
            kind,
            eos,
            fluid: fluid.clone(),
            parameters,
        })
    }

    /// Creates a gas-phase model.
    ///
    /// # Errors
    ///
    /// Never fails today; returns `Result` for symmetry with [`PhaseModel::liquid`].
    pub fn gas(eos: impl Into<Eos>, fluid: &Fluid) -> Result<Self, ModelError> {
        Self::new(PhaseKind::Gas, eos, fluid)
    }

    /// Creates a liquid-phase model.
    ///
    /// # Errors
    ///
    /// See [`PhaseModel::new`].
    pub fn liquid(eos: impl Into<Eos>, fluid: &Fluid) -> Result<Self, ModelError> {
        Self::new(PhaseKind::Liquid, eos, fluid)
    }

    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        self.kind
    }

    #[must_use]
    pub fn eos(&self) -> Eos {
        self.eos
    }

    #[must_use]
    pub fn fluid(&self) -> &Fluid {
        &self.fluid
    }

    /// Evaluates the phase at `(T, P, z)`.
    ///
    /// The composition is normalized before use.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::Model`] for an invalid composition and
    /// [`PhaseError::Numeric`] if the volume root cannot be found.
    pub fn evaluate(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        composition: &[f64],
    ) -> Result<PhaseState, PhaseError> {
        let z = self.fluid.composition(composition)?;
        Ok(self.state(temperature.get::<kelvin>(), pressure.get::<pascal>(), &z)?)
    }

    /// Critical volume implied by the equation of state, `Zc·R·Tc/Pc`.
    ///
    /// Separates liquid-like from gas-like single cubic roots. Mixtures use
    /// pseudo-critical constants.
    pub(crate) fn critical_volume(&self) -> f64 {
        let zc = match self.eos {
            Eos::Cubic(cubic) => cubic.critical_compressibility(),
            Eos::IdealGas | Eos::Virial(_) => 1.0,
        };
        zc * R * self.fluid.tc() / self.fluid.pc()
    }

    /// Evaluates at SI `(T, P)` with a composition already checked against the fluid.
    pub(crate) fn state(&self, t: f64, p: f64, z: &[f64]) -> Result<PhaseState, NumericConvergenceError> {
        let residual = match &self.parameters {
            Parameters::IdealGas => Residual::ideal_gas(t, p, z.len()),
            Parameters::Cubic(params) => params.residual(self.kind, t, p, z)?,
            Parameters::Virial(params) => params.residual(t, p, z)?,
        };
        PhaseState::new(self.kind, &self.fluid, t, p, z, residual)
    }
}
