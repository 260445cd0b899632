use std::fmt;

use log::{debug, warn};
use twine_solvers::equation::bisection;

use crate::thermo::error::{FlashConvergenceError, FlashError, NumericConvergenceError};

use super::FlashSpec;

/// Lifecycle of a single flash calculation.
///
/// `Initialized → RootBracketing → Iterating → Converged`, with `Failed`
/// reachable from any stage. Nothing persists between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlashStage {
    Initialized,
    RootBracketing,
    Iterating,
    Converged,
    Failed,
}

impl fmt::Display for FlashStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Initialized => "initialization",
            Self::RootBracketing => "root bracketing",
            Self::Iterating => "iteration",
            Self::Converged => "convergence",
            Self::Failed => "failure",
        })
    }
}

/// Call-local state machine for one flash.
#[derive(Debug)]
pub(super) struct Progress {
    spec: FlashSpec,
    stage: FlashStage,
    iters: usize,
}

impl Progress {
    pub(super) fn new(spec: FlashSpec) -> Self {
        debug!("{spec}: {}", FlashStage::Initialized);
        Self {
            spec,
            stage: FlashStage::Initialized,
            iters: 0,
        }
    }

    pub(super) fn spec(&self) -> FlashSpec {
        self.spec
    }

    pub(super) fn iters(&self) -> usize {
        self.iters
    }

    pub(super) fn add_iters(&mut self, iters: usize) {
        self.iters += iters;
    }

    pub(super) fn enter(&mut self, stage: FlashStage) {
        if stage != self.stage {
            debug!("{}: {} -> {}", self.spec, self.stage, stage);
            self.stage = stage;
        }
    }

    pub(super) fn converged(&mut self) {
        self.enter(FlashStage::Converged);
    }

    /// Ends the flash with a convergence failure at the current stage.
    pub(super) fn fail(&mut self, last_iterate: f64, residual: f64) -> FlashConvergenceError {
        let err = FlashConvergenceError {
            spec: self.spec,
            stage: self.stage,
            last_iterate,
            residual,
            iters: self.iters,
        };
        warn!("{err}");
        self.enter(FlashStage::Failed);
        err
    }

    /// Ends the flash because an inner solve failed.
    pub(super) fn numeric(&mut self, source: NumericConvergenceError) -> FlashError {
        warn!("{}: inner solve failed during {}: {source}", self.spec, self.stage);
        self.enter(FlashStage::Failed);
        FlashError::Numeric {
            spec: self.spec,
            source,
        }
    }

    /// Maps a bisection failure, unwrapping model errors to the inner cause.
    pub(super) fn solver(&mut self, err: bisection::Error, last_iterate: f64) -> FlashError {
        match err {
            bisection::Error::Model(source) => match source.downcast::<NumericConvergenceError>() {
                Ok(inner) => self.numeric(*inner),
                Err(other) => {
                    warn!("{}: unexpected model error: {other}", self.spec);
                    self.fail(last_iterate, f64::NAN).into()
                }
            },
            other => {
                warn!("{}: bisection failed: {other}", self.spec);
                self.fail(last_iterate, f64::NAN).into()
            }
        }
    }
}
