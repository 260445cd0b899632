//! Bisection problems for the temperature searches.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::thermo::{
    GAS_CONSTANT as R,
    error::NumericConvergenceError,
    phase::{PhaseModel, PhaseState},
};

use super::{Flasher, Saturation};

/// Halvings used to locate where an evaluation starts to succeed.
const VALIDITY_STEPS: usize = 60;

/// Walks an unevaluable bound `bad` toward the evaluable `good` and returns
/// the lowest point found to evaluate, with its value.
///
/// Assumes evaluations succeed on one side of a single threshold.
pub(super) fn lowest_valid<T, E>(
    mut bad: f64,
    mut good: (f64, T),
    eval: impl Fn(f64) -> Result<T, E>,
) -> (f64, T) {
    for _ in 0..VALIDITY_STEPS {
        let mid = 0.5 * (bad + good.0);
        match eval(mid) {
            Ok(value) => good = (mid, value),
            Err(_) => bad = mid,
        }
    }
    good
}

/// Phase evaluated at each temperature of an isobaric search.
#[derive(Debug, Clone, Copy)]
pub(super) enum Branch<'a> {
    /// A single phase model, stable or not.
    Phase(&'a PhaseModel),
    /// Whichever phase has the lower Gibbs energy.
    Stable,
}

/// Model adapter for isobaric searches.
///
/// Exposes temperature as the sole input at fixed pressure.
pub(super) struct IsobaricModel<'a> {
    flasher: &'a Flasher,
    pressure: f64,
    branch: Branch<'a>,
}

impl<'a> IsobaricModel<'a> {
    pub(super) fn new(flasher: &'a Flasher, pressure: f64, branch: Branch<'a>) -> Self {
        Self {
            flasher,
            pressure,
            branch,
        }
    }

    pub(super) fn at(&self, t: f64) -> Result<PhaseState, NumericConvergenceError> {
        let z = self.flasher.fluid().mole_fractions();
        match self.branch {
            Branch::Phase(model) => model.state(t, self.pressure, z),
            Branch::Stable => self.flasher.stable_state(t, self.pressure),
        }
    }
}

impl Model for IsobaricModel<'_> {
    type Input = ThermodynamicTemperature;
    type Output = PhaseState;
    type Error = NumericConvergenceError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.at(input.get::<kelvin>())
    }
}

/// Property held fixed alongside pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Target {
    /// J/mol.
    Enthalpy(f64),
    /// J/(mol·K).
    Entropy(f64),
    /// m³/mol.
    Volume(f64),
}

impl Target {
    /// Value of the targeted property in `state`.
    pub(super) fn of(&self, state: &PhaseState) -> f64 {
        match self {
            Self::Enthalpy(_) => state.h(),
            Self::Entropy(_) => state.s(),
            Self::Volume(_) => state.v(),
        }
    }

    pub(super) fn value(&self) -> f64 {
        match *self {
            Self::Enthalpy(value) | Self::Entropy(value) | Self::Volume(value) => value,
        }
    }
}

/// Equation problem for isobaric searches.
///
/// The residual is `(property − target) / scale` with a scale of `R·Tc`,
/// `R` or the target volume.
pub(super) struct IsobaricProblem {
    target: Target,
    scale: f64,
}

impl IsobaricProblem {
    pub(super) fn new(target: Target, critical_temperature: f64) -> Self {
        let scale = match target {
            Target::Enthalpy(_) => R * critical_temperature,
            Target::Entropy(_) => R,
            Target::Volume(volume) => volume,
        };
        Self { target, scale }
    }

    pub(super) fn residual(&self, state: &PhaseState) -> f64 {
        (self.target.of(state) - self.target.value()) / self.scale
    }
}

impl EquationProblem<1> for IsobaricProblem {
    type Input = ThermodynamicTemperature;
    type Output = PhaseState;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermodynamicTemperature::new::<kelvin>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([self.residual(output)])
    }
}

/// Model adapter mapping temperature to the saturated state.
pub(super) struct SaturationModel<'a> {
    flasher: &'a Flasher,
    liquid: &'a PhaseModel,
}

impl<'a> SaturationModel<'a> {
    pub(super) fn new(flasher: &'a Flasher, liquid: &'a PhaseModel) -> Self {
        Self { flasher, liquid }
    }

    pub(super) fn at(&self, t: f64) -> Result<Saturation, NumericConvergenceError> {
        self.flasher.saturation_at(self.liquid, t)
    }
}

impl Model for SaturationModel<'_> {
    type Input = ThermodynamicTemperature;
    type Output = Saturation;
    type Error = NumericConvergenceError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.at(input.get::<kelvin>())
    }
}

/// Equation problem for the saturation temperature at a fixed pressure.
///
/// The residual is `ln(Psat(T) / P)`, increasing in temperature.
pub(super) struct SaturationProblem {
    ln_pressure: f64,
}

impl SaturationProblem {
    pub(super) fn new(pressure: f64) -> Self {
        Self {
            ln_pressure: pressure.ln(),
        }
    }

    pub(super) fn residual(&self, saturation: &Saturation) -> f64 {
        saturation.p().ln() - self.ln_pressure
    }
}

impl EquationProblem<1> for SaturationProblem {
    type Input = ThermodynamicTemperature;
    type Output = Saturation;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermodynamicTemperature::new::<kelvin>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([self.residual(output)])
    }
}
