use crate::thermo::GAS_CONSTANT as R;

/// Departure quantities produced by an equation of state at `(T, P, z)`.
///
/// Departures are relative to the ideal gas at the same temperature and
/// pressure. Values are SI molar quantities.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Residual {
    pub z: f64,
    pub v: f64,
    pub h: f64,
    pub s: f64,
    /// Residual isochoric heat capacity, `Cv − Cv_ig`.
    pub cv: f64,
    /// `(∂P/∂T)_V`
    pub dp_dt: f64,
    /// `(∂P/∂V)_T`
    pub dp_dv: f64,
    pub ln_phi: Vec<f64>,
}

impl Residual {
    pub(super) fn ideal_gas(t: f64, p: f64, n: usize) -> Self {
        let v = R * t / p;
        Self {
            z: 1.0,
            v,
            h: 0.0,
            s: 0.0,
            cv: 0.0,
            dp_dt: R / v,
            dp_dv: -R * t / (v * v),
            ln_phi: vec![0.0; n],
        }
    }
}
