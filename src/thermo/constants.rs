//! Physical constants and the ideal-gas reference state.
//!
//! All values are SI. Ideal-gas enthalpy and entropy are zero at
//! [`REFERENCE_TEMPERATURE`] and [`REFERENCE_PRESSURE`].

/// Molar gas constant, J/(mol·K).
pub const GAS_CONSTANT: f64 = 8.314_462_618;

/// Reference temperature for ideal-gas enthalpy and entropy, K.
pub const REFERENCE_TEMPERATURE: f64 = 298.15;

/// Reference pressure for ideal-gas entropy, Pa.
pub const REFERENCE_PRESSURE: f64 = 101_325.0;
