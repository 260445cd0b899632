//! Thermodynamic property and flash engine.
//!
//! The pieces fit together as a pipeline:
//!
//! 1. A [`ComponentProvider`] (such as [`ComponentLibrary`]) supplies
//!    [`Component`] records: critical constants, acentric factor, molar mass
//!    and an ideal-gas heat capacity correlation.
//! 2. A [`Fluid`] combines components with an overall composition.
//! 3. [`PhaseModel`]s evaluate a gas or liquid phase of the fluid under an
//!    [`Eos`]: ideal gas, a [`CubicEos`] or a [`VirialEos`].
//! 4. A [`Flasher`] resolves two [`Specification`]s into a [`FlashResult`].
//!
//! Public values are [`uom`] quantities. Numerics run on SI `f64`.
//!
//! # Example
//!
//! ```
//! use twine_flash::thermo::{ComponentLibrary, CubicEos, Flasher, Fluid, Specification};
//! use uom::si::{
//!     f64::{Pressure, ThermodynamicTemperature},
//!     pressure::atmosphere,
//!     thermodynamic_temperature::kelvin,
//! };
//!
//! let nitrogen = Fluid::from_provider(&ComponentLibrary::standard(), &[("N2", 1.0)]).unwrap();
//! let flasher = Flasher::cubic(nitrogen, CubicEos::Srk).unwrap();
//!
//! let result = flasher
//!     .flash(
//!         Specification::Temperature(ThermodynamicTemperature::new::<kelvin>(150.0)),
//!         Specification::Pressure(Pressure::new::<atmosphere>(10.0)),
//!     )
//!     .unwrap();
//!
//! assert_eq!(result.vapor_fraction(), 1.0);
//! assert!((result.compressibility() - 0.9387).abs() < 1e-3);
//! ```

mod component;
mod constants;
mod error;
mod flash;
mod fluid;
mod phase;
mod result;
pub mod vaporization;

pub use component::{
    Component, ComponentLibrary, ComponentProvider, FluidConstants, HeatCapacityCorrelation,
};
pub use constants::{GAS_CONSTANT, REFERENCE_PRESSURE, REFERENCE_TEMPERATURE};
pub use error::{
    ConstantsError, FlashConvergenceError, FlashError, ModelError, NumericConvergenceError,
    PhaseError, PropertyError, SpecificationError, UnknownComponentError,
};
pub use flash::{
    FlashConfig, FlashSpec, FlashStage, Flasher, Saturation, Specification, Variable,
};
pub use fluid::Fluid;
pub use phase::{
    CubicEos, Eos, PhaseKind, PhaseModel, PhaseState, ThirdVirial, VirialEos, select_root,
};
pub use result::{FlashResult, Phases};
