//! Extensions to [`uom`].
//!
//! Every public boundary of this crate speaks [`uom`] quantities. This module
//! adds the few quantities and helpers that [`uom`] does not ship.
//!
//! ## Quantities
//!
//! - [`SpecificEnthalpy`] and [`SpecificEntropy`] for mass-basis results.
//! - [`MolarEntropy`] for flash specifications and results.
//! - [`JouleThomsonCoefficient`], the isenthalpic `(∂T/∂P)_H` in K/Pa.
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait subtracts one absolute temperature from
//! another to get a temperature interval:
//!
//! ```
//! use uom::si::{
//!     f64::ThermodynamicTemperature, temperature_interval::kelvin as delta_kelvin,
//!     thermodynamic_temperature::kelvin,
//! };
//! use twine_flash::support::units::TemperatureDifference;
//!
//! let outlet = ThermodynamicTemperature::new::<kelvin>(643.0);
//! let inlet = ThermodynamicTemperature::new::<kelvin>(298.15);
//! let rise = outlet.minus(inlet);
//! assert!((rise.get::<delta_kelvin>() - 344.85).abs() < 1e-9);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::{JouleThomsonCoefficient, MolarEntropy, SpecificEnthalpy, SpecificEntropy};
pub use temperature_difference::TemperatureDifference;
