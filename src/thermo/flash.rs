//! Equilibrium flash calculations.
//!
//! A [`Flasher`] owns a [`Fluid`], a gas [`PhaseModel`] and an optional
//! liquid [`PhaseModel`]. Given two [`Specification`]s it resolves the
//! equilibrium state:
//!
//! - `(T, P)`: the phase with the lower Gibbs departure.
//! - `(P, H)`, `(P, S)`, `(P, V)`: a temperature search at fixed pressure,
//!   split on the saturation temperature of a pure fluid.
//! - `(T, β)`, `(P, β)`: a saturation solve for a pure fluid.
//!
//! Every call is independent and uses only call-local state, so one
//! `Flasher` can be shared across threads.

mod config;
mod isobaric;
mod problem;
mod saturation;
mod spec;
mod stage;

pub use config::FlashConfig;
pub use saturation::Saturation;
pub use spec::{FlashSpec, Specification, Variable};
pub use stage::FlashStage;

use log::debug;
use uom::si::{
    f64::{MolarEnergy, Pressure, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    molar_volume::cubic_meter_per_mole,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use super::{
    error::{FlashError, ModelError, NumericConvergenceError, SpecificationError},
    fluid::Fluid,
    phase::{CubicEos, Eos, PhaseModel, PhaseState, VirialEos},
    result::{FlashResult, Phases},
};

use problem::Target;
use saturation::{SaturationSearch, same_root};
use stage::Progress;

/// Resolves equilibrium states of one fluid.
#[derive(Debug, Clone, PartialEq)]
pub struct Flasher {
    fluid: Fluid,
    gas: PhaseModel,
    liquid: Option<PhaseModel>,
    config: FlashConfig,
}

impl Flasher {
    /// Creates a flasher from a gas model and an optional liquid model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnsupportedPhase`] if `liquid` names an equation
    /// of state with no liquid root.
    pub fn new(fluid: Fluid, gas: impl Into<Eos>, liquid: Option<Eos>) -> Result<Self, ModelError> {
        let gas = PhaseModel::gas(gas, &fluid)?;
        let liquid = liquid
            .map(|eos| PhaseModel::liquid(eos, &fluid))
            .transpose()?;
        Ok(Self {
            fluid,
            gas,
            liquid,
            config: FlashConfig::default(),
        })
    }

    /// Gas and liquid from the same cubic equation of state.
    ///
    /// # Errors
    ///
    /// Never fails for a valid fluid; see [`Flasher::new`].
    pub fn cubic(fluid: Fluid, eos: CubicEos) -> Result<Self, ModelError> {
        Self::new(fluid, eos, Some(eos.into()))
    }

    /// Gas-only virial flasher.
    ///
    /// # Errors
    ///
    /// See [`Flasher::new`].
    pub fn virial(fluid: Fluid, eos: VirialEos) -> Result<Self, ModelError> {
        Self::new(fluid, eos, None)
    }

    /// Gas-only ideal-gas flasher.
    ///
    /// # Errors
    ///
    /// See [`Flasher::new`].
    pub fn ideal_gas(fluid: Fluid) -> Result<Self, ModelError> {
        Self::new(fluid, Eos::IdealGas, None)
    }

    /// Replaces the solver configuration.
    #[must_use]
    pub fn with_config(self, config: FlashConfig) -> Self {
        Self { config, ..self }
    }

    #[must_use]
    pub fn fluid(&self) -> &Fluid {
        &self.fluid
    }

    #[must_use]
    pub fn gas_model(&self) -> &PhaseModel {
        &self.gas
    }

    #[must_use]
    pub fn liquid_model(&self) -> Option<&PhaseModel> {
        self.liquid.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &FlashConfig {
        &self.config
    }

    /// Resolves the equilibrium state fixed by `a` and `b`.
    ///
    /// # Errors
    ///
    /// - [`FlashError::Specification`] for an invalid pair, before any iteration.
    /// - [`FlashError::Numeric`] if an equation-of-state evaluation fails.
    /// - [`FlashError::Convergence`] if an outer search cannot bracket or converge.
    pub fn flash(&self, a: Specification, b: Specification) -> Result<FlashResult, FlashError> {
        let spec = FlashSpec::new(a, b)?;
        self.check(&spec)?;

        let mut progress = Progress::new(spec);
        let phases = match spec {
            FlashSpec::TemperaturePressure {
                temperature,
                pressure,
            } => {
                let (t, p) = (temperature.get::<kelvin>(), pressure.get::<pascal>());
                Phases::single(self.stable_state(t, p).map_err(|err| progress.numeric(err))?)
            }
            FlashSpec::PressureEnthalpy { pressure, enthalpy } => self.isobaric(
                &mut progress,
                pressure.get::<pascal>(),
                Target::Enthalpy(enthalpy.get::<joule_per_mole>()),
            )?,
            FlashSpec::PressureEntropy { pressure, entropy } => self.isobaric(
                &mut progress,
                pressure.get::<pascal>(),
                Target::Entropy(entropy.value),
            )?,
            FlashSpec::PressureVolume { pressure, volume } => self.isobaric(
                &mut progress,
                pressure.get::<pascal>(),
                Target::Volume(volume.get::<cubic_meter_per_mole>()),
            )?,
            FlashSpec::TemperatureVaporFraction {
                temperature,
                vapor_fraction,
            } => {
                let saturation = self.saturation_tracked(&mut progress, temperature.get::<kelvin>())?;
                let (liquid, gas) = saturation.into_states();
                Phases::TwoPhase {
                    gas,
                    liquid,
                    vapor_fraction,
                }
            }
            FlashSpec::PressureVaporFraction {
                pressure,
                vapor_fraction,
            } => {
                let liquid_model = self.require_saturation()?;
                let saturation = match self.saturation_temperature_at(
                    &mut progress,
                    liquid_model,
                    pressure.get::<pascal>(),
                )? {
                    SaturationSearch::Found(saturation) => saturation,
                    SaturationSearch::Unbracketed {
                        temperature,
                        residual,
                    } => return Err(progress.fail(temperature, residual).into()),
                };
                let (liquid, gas) = saturation.into_states();
                Phases::TwoPhase {
                    gas,
                    liquid,
                    vapor_fraction,
                }
            }
        };

        progress.converged();
        Ok(FlashResult::new(
            spec,
            phases,
            self.fluid.molar_mass(),
            progress.iters(),
        ))
    }

    /// Saturation pressure of a pure fluid at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecificationError::RequiresSaturation`] for a mixture or a
    /// gas-only flasher, [`SpecificationError::OutOfRange`] at or above the
    /// critical temperature, and a numeric or convergence error if the
    /// fugacity iteration fails.
    pub fn saturation_pressure(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<Saturation, FlashError> {
        let spec = FlashSpec::TemperatureVaporFraction {
            temperature,
            vapor_fraction: 0.0,
        };
        self.check(&spec)?;
        let mut progress = Progress::new(spec);
        let saturation = self.saturation_tracked(&mut progress, temperature.get::<kelvin>())?;
        progress.converged();
        Ok(saturation)
    }

    /// Saturation temperature of a pure fluid at `pressure`.
    ///
    /// # Errors
    ///
    /// As for [`Flasher::saturation_pressure`]; a pressure outside the
    /// searched temperature window gives a
    /// [`FlashStage::RootBracketing`] convergence error.
    pub fn saturation_temperature(&self, pressure: Pressure) -> Result<Saturation, FlashError> {
        let spec = FlashSpec::PressureVaporFraction {
            pressure,
            vapor_fraction: 0.0,
        };
        self.check(&spec)?;
        let liquid = self.require_saturation()?;
        let mut progress = Progress::new(spec);
        match self.saturation_temperature_at(&mut progress, liquid, pressure.get::<pascal>())? {
            SaturationSearch::Found(saturation) => {
                progress.converged();
                Ok(saturation)
            }
            SaturationSearch::Unbracketed {
                temperature,
                residual,
            } => Err(progress.fail(temperature, residual).into()),
        }
    }

    /// `H_gas − H_liquid` at saturation.
    ///
    /// # Errors
    ///
    /// See [`Flasher::saturation_pressure`].
    pub fn enthalpy_of_vaporization(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<MolarEnergy, FlashError> {
        Ok(self.saturation_pressure(temperature)?.enthalpy_of_vaporization())
    }

    /// Evaluates both phases and keeps the stable one.
    pub(crate) fn stable_state(&self, t: f64, p: f64) -> Result<PhaseState, NumericConvergenceError> {
        let z = self.fluid.mole_fractions();
        let gas = self.gas.state(t, p, z)?;
        let Some(liquid_model) = &self.liquid else {
            return Ok(gas);
        };
        let liquid = liquid_model.state(t, p, z)?;

        if self.shares_eos() && same_root(&gas, &liquid) {
            let liquid_like = t < self.fluid.tc() && gas.v() < self.gas.critical_volume();
            return Ok(if liquid_like { liquid } else { gas });
        }

        if liquid.g_res() < gas.g_res() {
            debug!("liquid stable at {t} K, {p} Pa");
            Ok(liquid)
        } else {
            Ok(gas)
        }
    }

    /// Liquid model usable for saturation, if the fluid is pure.
    fn saturation_liquid(&self) -> Option<&PhaseModel> {
        self.liquid.as_ref().filter(|_| self.fluid.is_pure())
    }

    fn require_saturation(&self) -> Result<&PhaseModel, SpecificationError> {
        self.saturation_liquid()
            .ok_or(SpecificationError::RequiresSaturation)
    }

    /// Validation that depends on the fluid rather than the pair alone.
    fn check(&self, spec: &FlashSpec) -> Result<(), SpecificationError> {
        match *spec {
            FlashSpec::TemperatureVaporFraction { temperature, .. } => {
                self.require_saturation()?;
                let t = temperature.get::<kelvin>();
                if !(t > 0.0 && t < self.fluid.tc()) {
                    return Err(SpecificationError::OutOfRange {
                        variable: Variable::Temperature,
                        value: t,
                    });
                }
            }
            FlashSpec::PressureVaporFraction { pressure, .. } => {
                self.require_saturation()?;
                let p = pressure.get::<pascal>();
                if !(p > 0.0 && p < self.fluid.pc()) {
                    return Err(SpecificationError::OutOfRange {
                        variable: Variable::Pressure,
                        value: p,
                    });
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Saturation pressure with failures mapped onto the flash stages.
    fn saturation_tracked(&self, progress: &mut Progress, t: f64) -> Result<Saturation, FlashError> {
        let liquid = self.require_saturation()?;
        progress.enter(FlashStage::Iterating);
        match self.saturation_at(liquid, t) {
            Ok(saturation) => {
                progress.add_iters(saturation.iterations());
                Ok(saturation)
            }
            Err(NumericConvergenceError::SaturationPressure {
                pressure,
                iters,
                residual,
                ..
            }) => {
                progress.add_iters(iters);
                Err(progress.fail(pressure, residual).into())
            }
            Err(err) => Err(progress.numeric(err)),
        }
    }
}
