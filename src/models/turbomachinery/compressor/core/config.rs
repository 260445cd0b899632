use crate::support::constraint::{Constrained, UnitInterval};

use super::CompressionError;

/// Machine efficiencies of a compressor.
///
/// Both lie in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorConfig {
    /// Ideal over actual enthalpy rise.
    pub isentropic_efficiency: Constrained<f64, UnitInterval>,

    /// Fluid power over shaft power.
    pub mechanical_efficiency: Constrained<f64, UnitInterval>,
}

impl CompressorConfig {
    /// Creates a configuration from raw efficiencies.
    ///
    /// # Errors
    ///
    /// Returns [`CompressionError::Efficiency`] if either value is outside `(0, 1]`.
    pub fn new(isentropic: f64, mechanical: f64) -> Result<Self, CompressionError> {
        Ok(Self {
            isentropic_efficiency: efficiency("isentropic", isentropic)?,
            mechanical_efficiency: efficiency("mechanical", mechanical)?,
        })
    }

    pub(super) fn validate(&self) -> Result<(f64, f64), CompressionError> {
        let eta_s = efficiency("isentropic", self.isentropic_efficiency.into_inner())?;
        let eta_m = efficiency("mechanical", self.mechanical_efficiency.into_inner())?;
        Ok((eta_s.into_inner(), eta_m.into_inner()))
    }
}

/// An ideal machine.
impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            isentropic_efficiency: Constrained::one(),
            mechanical_efficiency: Constrained::one(),
        }
    }
}

fn efficiency(
    name: &'static str,
    value: f64,
) -> Result<Constrained<f64, UnitInterval>, CompressionError> {
    match UnitInterval::new(value) {
        Ok(eta) if value > 0.0 => Ok(eta),
        _ => Err(CompressionError::Efficiency { name, value }),
    }
}
