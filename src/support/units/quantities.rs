use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, P1, P2, Z0},
};

/// Specific enthalpy, J/kg in SI.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Specific entropy, J/kg·K in SI.
pub type SpecificEntropy = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Molar entropy, J/mol·K in SI.
///
/// Dimensionally identical to [`uom::si::f64::MolarHeatCapacity`].
pub type MolarEntropy = Quantity<ISQ<P2, P1, N2, Z0, N1, N1, Z0>, SI<f64>, f64>;

/// Joule-Thomson coefficient, K/Pa in SI.
pub type JouleThomsonCoefficient = Quantity<ISQ<P1, N1, P2, Z0, P1, Z0, Z0>, SI<f64>, f64>;
