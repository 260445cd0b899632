use thiserror::Error;

use crate::thermo::FlashError;

/// Errors that can occur while compressing a fluid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompressionError {
    /// An efficiency is outside `(0, 1]`.
    #[error("{name} efficiency must lie in (0, 1], got {value}")]
    Efficiency { name: &'static str, value: f64 },

    /// The outlet pressure is below the inlet pressure.
    #[error("outlet pressure {outlet} Pa is below inlet pressure {inlet} Pa")]
    PressureRatio { inlet: f64, outlet: f64 },

    /// The mass flow is negative or not finite.
    #[error("mass flow must be finite and non-negative, got {0} kg/s")]
    MassFlow(f64),

    /// The inlet state could not be resolved.
    #[error("inlet flash failed")]
    Inlet(#[source] FlashError),

    /// The isentropic outlet state could not be resolved.
    #[error("isentropic outlet flash failed")]
    Isentropic(#[source] FlashError),

    /// The actual outlet state could not be resolved.
    #[error("outlet flash failed")]
    Outlet(#[source] FlashError),
}
