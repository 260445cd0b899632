use log::{debug, trace};
use twine_solvers::equation::bisection;
use uom::si::{
    f64::{MolarEnergy, Pressure, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::thermo::{
    error::{FlashError, NumericConvergenceError},
    phase::{PhaseModel, PhaseState},
};

use super::{
    FlashStage, Flasher,
    problem::{SaturationModel, SaturationProblem, lowest_valid},
    stage::Progress,
};

/// Coexisting saturated liquid and vapor of a pure fluid.
#[derive(Debug, Clone, PartialEq)]
pub struct Saturation {
    liquid: PhaseState,
    gas: PhaseState,
    iters: usize,
}

impl Saturation {
    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(self.gas.t())
    }

    #[must_use]
    pub fn pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.p())
    }

    #[must_use]
    pub fn liquid(&self) -> &PhaseState {
        &self.liquid
    }

    #[must_use]
    pub fn gas(&self) -> &PhaseState {
        &self.gas
    }

    /// Iterations spent locating this saturation point.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iters
    }

    /// `H_gas − H_liquid` at saturation.
    #[must_use]
    pub fn enthalpy_of_vaporization(&self) -> MolarEnergy {
        MolarEnergy::new::<joule_per_mole>(self.gas.h() - self.liquid.h())
    }

    pub(super) fn p(&self) -> f64 {
        self.gas.p()
    }

    pub(super) fn into_states(self) -> (PhaseState, PhaseState) {
        (self.liquid, self.gas)
    }
}

/// Outcome of a saturation-temperature search.
#[derive(Debug)]
pub(super) enum SaturationSearch {
    Found(Saturation),
    /// The pressure lies outside the saturation curve over the search window.
    Unbracketed { temperature: f64, residual: f64 },
}

/// Roots closer than this (relative) are the same root.
const SAME_ROOT_TOL: f64 = 1e-10;

impl Flasher {
    /// Solves `ln φ_liquid = ln φ_gas` at fixed temperature.
    ///
    /// Starts from the Wilson estimate and takes Newton steps on `ln P`,
    /// `ln P ← ln P + (ln φ_l − ln φ_g)/(Z_g − Z_l)`, keeping a bracket
    /// `[lo, hi]` that falls back to bisection whenever a step leaves it or
    /// the cubic has a single root.
    pub(super) fn saturation_at(
        &self,
        liquid: &PhaseModel,
        t: f64,
    ) -> Result<Saturation, NumericConvergenceError> {
        let z = self.fluid.mole_fractions();
        let (tc, pc) = (self.fluid.tc(), self.fluid.pc());
        let omega = self.fluid.acentric_factor();
        let vc = self.gas.critical_volume();
        let shares_eos = self.shares_eos();

        let mut p = pc * (5.373 * (1.0 + omega) * (1.0 - tc / t)).exp();
        if !(p > 0.0 && p < pc) {
            p = 0.5 * pc;
        }
        let (mut lo, mut hi) = (0.0, pc);
        let mut residual = f64::NAN;

        for iter in 1..=self.config.saturation_max_iters {
            let gas = self.gas.state(t, p, z)?;
            let liq = liquid.state(t, p, z)?;

            let proposal = if shares_eos && same_root(&gas, &liq) {
                if gas.v() < vc {
                    hi = p;
                } else {
                    lo = p;
                }
                f64::NAN
            } else {
                residual = liq.ln_phi()[0] - gas.ln_phi()[0];
                trace!("saturation at {t} K: iter {iter}, P = {p} Pa, residual {residual:e}");
                if residual.abs() <= self.config.saturation_tol {
                    return Ok(Saturation {
                        liquid: liq,
                        gas,
                        iters: iter,
                    });
                }
                if residual > 0.0 {
                    lo = p;
                } else {
                    hi = p;
                }
                p * (residual / (gas.z() - liq.z())).exp()
            };

            p = if proposal > lo && proposal < hi {
                proposal
            } else if lo == 0.0 {
                0.5 * hi
            } else {
                (lo * hi).sqrt()
            };
        }

        Err(NumericConvergenceError::SaturationPressure {
            temperature: t,
            pressure: p,
            iters: self.config.saturation_max_iters,
            residual,
        })
    }

    /// Finds the saturation temperature at `p` by bisection on `ln(Psat/P)`.
    ///
    /// Both coexisting states are re-evaluated at exactly `p`.
    pub(super) fn saturation_temperature_at(
        &self,
        progress: &mut Progress,
        liquid: &PhaseModel,
        p: f64,
    ) -> Result<SaturationSearch, FlashError> {
        let tc = self.fluid.tc();
        let [tr_lo, tr_hi] = self.config.saturation_reduced_temperatures;
        let (t_lo, t_hi) = (tr_lo * tc, tr_hi * tc);

        progress.enter(FlashStage::RootBracketing);
        let model = SaturationModel::new(self, liquid);
        let problem = SaturationProblem::new(p);

        let hi = model.at(t_hi).map_err(|err| progress.numeric(err))?;
        let (t_lo, lo) = match model.at(t_lo) {
            Ok(lo) => (t_lo, lo),
            Err(err) => {
                debug!("{}: no saturation at {t_lo} K ({err}), raising the bound", progress.spec());
                lowest_valid(t_lo, (t_hi, hi.clone()), |t| model.at(t))
            }
        };
        let (r_lo, r_hi) = (problem.residual(&lo), problem.residual(&hi));
        if r_lo > 0.0 || r_hi < 0.0 {
            let (temperature, residual) = if r_lo > 0.0 { (t_lo, r_lo) } else { (t_hi, r_hi) };
            return Ok(SaturationSearch::Unbracketed {
                temperature,
                residual,
            });
        }

        progress.enter(FlashStage::Iterating);
        let spec = progress.spec();
        let solution = bisection::solve(
            &model,
            &problem,
            [t_lo, t_hi],
            &self.config.bisection(),
            |event: &bisection::Event<'_, _, _>| {
                trace!("{spec}: saturation T = {} K", event.x());
                None
            },
        )
        .map_err(|err| progress.solver(err, t_lo))?;

        if solution.status != bisection::Status::Converged {
            return Err(progress.fail(solution.x, solution.residual).into());
        }

        let saturation = solution.snapshot.output;
        progress.add_iters(saturation.iters + solution.iters);

        let t = solution.x;
        let z = self.fluid.mole_fractions();
        let states = liquid
            .state(t, p, z)
            .and_then(|liq| Ok((liq, self.gas.state(t, p, z)?)));
        match states {
            Ok((liquid, gas)) => Ok(SaturationSearch::Found(Saturation {
                liquid,
                gas,
                iters: saturation.iters + solution.iters,
            })),
            Err(err) => Err(progress.numeric(err)),
        }
    }

    /// Whether liquid and gas share one equation of state, so a single
    /// cubic root is shared between them.
    pub(super) fn shares_eos(&self) -> bool {
        self.liquid
            .as_ref()
            .is_some_and(|liquid| liquid.eos() == self.gas.eos())
    }
}

/// Whether two states sit on the same volume root.
pub(super) fn same_root(gas: &PhaseState, liquid: &PhaseState) -> bool {
    (gas.v() - liquid.v()).abs() <= SAME_ROOT_TOL * gas.v()
}
