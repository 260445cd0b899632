//! Corresponding-states correlations for the second and third virial coefficients.

/// `Σ c·Tr^(−n)` with analytic derivatives in `Tr`.
pub(super) struct InversePowerSeries(&'static [(f64, f64)]);

impl InversePowerSeries {
    /// Returns `[f, df/dTr, d²f/dTr²]`.
    pub(super) fn eval(&self, tr: f64) -> [f64; 3] {
        self.0.iter().fold([0.0; 3], |[f, d1, d2], &(c, n)| {
            [
                f + c * tr.powf(-n),
                d1 - n * c * tr.powf(-n - 1.0),
                d2 + n * (n + 1.0) * c * tr.powf(-n - 2.0),
            ]
        })
    }
}

/// Tsonopoulos simple-fluid term, `B·Pc/(R·Tc)` at `ω = 0`.
pub(super) const TSONOPOULOS_F0: InversePowerSeries = InversePowerSeries(&[
    (0.1445, 0.0),
    (-0.330, 1.0),
    (-0.1385, 2.0),
    (-0.0121, 3.0),
    (-0.000_607, 8.0),
]);

/// Tsonopoulos acentric correction.
pub(super) const TSONOPOULOS_F1: InversePowerSeries = InversePowerSeries(&[
    (0.0637, 0.0),
    (0.331, 2.0),
    (-0.423, 3.0),
    (-0.008, 8.0),
]);

/// Orbey-Vera simple-fluid term, `C·(Pc/(R·Tc))²` at `ω = 0`.
pub(super) const ORBEY_VERA_G0: InversePowerSeries = InversePowerSeries(&[
    (0.01407, 0.0),
    (0.02432, 2.8),
    (-0.00313, 10.5),
]);

/// Orbey-Vera acentric correction.
pub(super) const ORBEY_VERA_G1: InversePowerSeries = InversePowerSeries(&[
    (-0.02676, 0.0),
    (0.01770, 2.8),
    (0.040, 3.0),
    (-0.003, 6.0),
    (-0.00228, 10.5),
]);
