use log::{debug, trace, warn};
use twine_solvers::equation::bisection;

use crate::thermo::{error::FlashError, phase::PhaseState, result::Phases};

use super::{
    FlashStage, Flasher,
    problem::{Branch, IsobaricModel, IsobaricProblem, Target, lowest_valid},
    saturation::SaturationSearch,
    stage::Progress,
};

impl Flasher {
    /// Resolves a flash at fixed pressure and one fixed property.
    ///
    /// A pure fluid with a liquid model is first split on its saturation
    /// temperature: targets between the saturated liquid and vapor values
    /// give a two-phase state by the lever rule, others are searched on the
    /// liquid or gas side only. Everything else is searched on the stable
    /// phase over the configured temperature bounds.
    pub(super) fn isobaric(
        &self,
        progress: &mut Progress,
        p: f64,
        target: Target,
    ) -> Result<Phases, FlashError> {
        let [t_min, t_max] = self.config.temperature_bounds();

        if let Some(liquid) = self.saturation_liquid()
            && p < self.fluid.pc()
        {
            match self.saturation_temperature_at(progress, liquid, p)? {
                SaturationSearch::Found(saturation) => {
                    let t_sat = saturation.gas().t();
                    let (liq, gas) = saturation.into_states();
                    let (lo, hi) = (target.of(&liq), target.of(&gas));
                    let value = target.value();

                    if (lo..=hi).contains(&value) {
                        let vapor_fraction = (value - lo) / (hi - lo);
                        debug!("{}: two-phase at {t_sat} K, β = {vapor_fraction}", progress.spec());
                        return Ok(Phases::TwoPhase {
                            gas,
                            liquid: liq,
                            vapor_fraction,
                        });
                    }

                    let state = if value < lo {
                        self.bisect(progress, p, Branch::Phase(liquid), target, [t_min, t_sat])?
                    } else {
                        self.bisect(progress, p, Branch::Phase(&self.gas), target, [t_sat, t_max])?
                    };
                    return Ok(Phases::single(state));
                }
                SaturationSearch::Unbracketed { temperature, .. } => {
                    warn!(
                        "{}: no saturation temperature in range (nearest {temperature} K), searching the stable phase",
                        progress.spec()
                    );
                }
            }
        }

        let state = self.bisect(progress, p, Branch::Stable, target, [t_min, t_max])?;
        Ok(Phases::single(state))
    }

    /// Bisects temperature on one branch.
    ///
    /// If the branch cannot be evaluated at the lower bound, the bound is
    /// raised to the lowest temperature where it can.
    fn bisect(
        &self,
        progress: &mut Progress,
        p: f64,
        branch: Branch<'_>,
        target: Target,
        [t_lo, t_hi]: [f64; 2],
    ) -> Result<PhaseState, FlashError> {
        progress.enter(FlashStage::RootBracketing);
        let model = IsobaricModel::new(self, p, branch);
        let problem = IsobaricProblem::new(target, self.fluid.tc());

        let hi = model.at(t_hi).map_err(|err| progress.numeric(err))?;
        let r_hi = problem.residual(&hi);

        let (t_lo, r_lo) = match model.at(t_lo) {
            Ok(lo) => (t_lo, problem.residual(&lo)),
            Err(err) => {
                debug!("{}: no state at {t_lo} K ({err}), raising the bound", progress.spec());
                let (t, state) = lowest_valid(t_lo, (t_hi, hi.clone()), |t| model.at(t));
                (t, problem.residual(&state))
            }
        };

        if r_lo == 0.0 {
            return model.at(t_lo).map_err(|err| progress.numeric(err));
        }
        if r_hi == 0.0 {
            return Ok(hi);
        }
        if r_lo.signum() == r_hi.signum() {
            let (t, r) = if r_lo.abs() < r_hi.abs() { (t_lo, r_lo) } else { (t_hi, r_hi) };
            return Err(progress.fail(t, r).into());
        }

        progress.enter(FlashStage::Iterating);
        let spec = progress.spec();
        let solution = bisection::solve(
            &model,
            &problem,
            [t_lo, t_hi],
            &self.config.bisection(),
            |event: &bisection::Event<'_, _, _>| {
                let residual = event.result().as_ref().ok().map(|eval| eval.residuals[0]);
                trace!("{spec}: T = {} K, residual {residual:?}", event.x());
                None
            },
        )
        .map_err(|err| progress.solver(err, t_lo))?;

        progress.add_iters(solution.iters);
        if solution.status != bisection::Status::Converged
            || solution.residual.abs() > self.config.max_residual
        {
            return Err(progress.fail(solution.x, solution.residual).into());
        }
        Ok(solution.snapshot.output)
    }
}
