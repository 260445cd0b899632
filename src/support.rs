//! Supporting utilities used by the thermodynamics and models.

pub mod constraint;
pub mod units;
