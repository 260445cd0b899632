//! # Twine Flash
//!
//! Equation-of-state phase models and equilibrium flash calculations for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`thermo`]: Components, fluids, phase models (ideal gas, cubic, virial)
//!   and the [`Flasher`](thermo::Flasher) that resolves equilibrium states.
//! - [`models`]: [`twine_core::Model`] implementations built on the flasher,
//!   such as the adiabatic compressor.
//! - [`support`]: Supporting utilities (unit extensions, numeric constraints).
//!
//! ## Stability
//!
//! [`thermo`] is the primary public API. Modules in [`support`] are public
//! because they're useful, but their APIs may change as needs emerge.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: `debug` for flash stage
//! transitions, `trace` for individual iterations and `warn` for failures.
//! No logger is installed.

pub mod models;
pub mod support;
pub mod thermo;
