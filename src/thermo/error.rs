use thiserror::Error;

use crate::support::constraint::ConstraintError;

use super::{
    flash::{FlashSpec, FlashStage, Variable},
    phase::PhaseKind,
};

/// Errors that may occur when querying a derived property of a flash result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property is undefined at the resolved state.
    ///
    /// For example, the heat capacity of a pure fluid inside the vapor dome.
    #[error("undefined property: {context}")]
    Undefined { context: String },
}

/// An inner numerical solve failed.
///
/// Values are SI (K, Pa, m³/mol).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericConvergenceError {
    /// The cubic has no root with a volume above the co-volume.
    #[error("no physical volume root at T = {temperature} K, P = {pressure} Pa")]
    NoPhysicalRoot { temperature: f64, pressure: f64 },

    /// The virial volume iteration hit its iteration limit.
    #[error("virial volume did not converge after {iters} iterations (last V = {volume} m³/mol)")]
    VirialVolume { iters: usize, volume: f64 },

    /// The fugacity-equality iteration hit its iteration limit.
    #[error("saturation pressure at T = {temperature} K did not converge after {iters} iterations")]
    SaturationPressure {
        temperature: f64,
        /// Last pressure iterate.
        pressure: f64,
        iters: usize,
        /// Last value of `ln φ_liquid − ln φ_gas`.
        residual: f64,
    },

    /// An intermediate value was NaN or infinite.
    #[error("non-finite {quantity} at T = {temperature} K, P = {pressure} Pa")]
    NonFinite {
        quantity: &'static str,
        temperature: f64,
        pressure: f64,
    },
}

/// Invalid pair or value of flash specifications.
///
/// Always raised before any iteration starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecificationError {
    #[error("{0} was specified twice")]
    Duplicate(Variable),

    #[error("unsupported specification pair ({first}, {second})")]
    Unsupported { first: Variable, second: Variable },

    #[error("{variable} = {value} is out of range")]
    OutOfRange { variable: Variable, value: f64 },

    /// Vapor-fraction specifications need a pure fluid and a liquid model.
    #[error("vapor-fraction specification needs a pure fluid with a liquid phase model")]
    RequiresSaturation,
}

/// An outer iteration failed to bracket or converge.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{spec} failed during {stage} after {iters} iterations: last iterate {last_iterate}, residual {residual:e}")]
pub struct FlashConvergenceError {
    pub spec: FlashSpec,
    pub stage: FlashStage,
    /// Last value of the search variable (K for temperature searches).
    pub last_iterate: f64,
    /// Normalized residual at `last_iterate`.
    pub residual: f64,
    pub iters: usize,
}

/// A component identifier the provider has no record for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown component `{id}`")]
pub struct UnknownComponentError {
    pub id: String,
}

/// Component constants that violate their invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstantsError {
    #[error("invalid {field}: {source}")]
    Invalid {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },

    #[error("acentric factor must be finite, got {0}")]
    AcentricFactor(f64),

    #[error("heat capacity correlation has no coefficients")]
    EmptyHeatCapacity,
}

/// Invalid fluid or flasher setup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("a fluid needs at least one component")]
    EmptyFluid,

    #[error("invalid mole fraction {value} for component `{id}`")]
    MoleFraction { id: String, value: f64 },

    #[error("binary interaction ({i}, {j}) is invalid for {len} components")]
    InteractionIndex { i: usize, j: usize, len: usize },

    #[error("{eos} cannot represent a {kind} phase")]
    UnsupportedPhase { eos: &'static str, kind: PhaseKind },

    #[error("composition has {found} entries but the fluid has {expected} components")]
    Composition { expected: usize, found: usize },

    #[error(transparent)]
    UnknownComponent(#[from] UnknownComponentError),
}

/// Errors returned by [`Flasher::flash`](super::Flasher::flash).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlashError {
    #[error(transparent)]
    Specification(#[from] SpecificationError),

    /// An inner root-find failed while resolving `spec`.
    #[error("{spec}: inner solve failed")]
    Numeric {
        spec: FlashSpec,
        #[source]
        source: NumericConvergenceError,
    },

    #[error(transparent)]
    Convergence(#[from] FlashConvergenceError),
}

/// Errors returned by [`PhaseModel::evaluate`](super::PhaseModel::evaluate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhaseError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Numeric(#[from] NumericConvergenceError),
}
