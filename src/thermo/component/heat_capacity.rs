use uom::si::{
    f64::{MolarHeatCapacity, ThermodynamicTemperature},
    molar_heat_capacity::joule_per_kelvin_mole,
    thermodynamic_temperature::kelvin,
};

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

/// Ideal-gas isobaric heat capacity as a function of temperature.
///
/// Coefficients are in J/(mol·K) with temperature in K.
/// `Polynomial(c)` evaluates `c[0] + c[1]·T + c[2]·T² + …`, the form used by
/// the Poling/Reid/Prausnitz tables and the Joback group-contribution method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum HeatCapacityCorrelation {
    Constant(f64),
    Polynomial(Vec<f64>),
}

impl HeatCapacityCorrelation {
    /// Returns the ideal-gas heat capacity at `temperature`.
    ///
    /// # Example
    ///
    /// ```
    /// use twine_flash::thermo::HeatCapacityCorrelation;
    /// use uom::si::{
    ///     f64::ThermodynamicTemperature, molar_heat_capacity::joule_per_kelvin_mole,
    ///     thermodynamic_temperature::kelvin,
    /// };
    ///
    /// // Joback estimate for acetone.
    /// let cp = HeatCapacityCorrelation::Polynomial(vec![7.52, 0.26084, -1.207e-4, 1.546e-8]);
    /// let t = ThermodynamicTemperature::new::<kelvin>(300.0);
    /// assert!((cp.heat_capacity(t).get::<joule_per_kelvin_mole>() - 75.32642).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn heat_capacity(&self, temperature: ThermodynamicTemperature) -> MolarHeatCapacity {
        MolarHeatCapacity::new::<joule_per_kelvin_mole>(self.cp(temperature.get::<kelvin>()))
    }

    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Self::Polynomial(c) if c.is_empty())
    }

    /// `Cp(T)` in J/(mol·K).
    pub(crate) fn cp(&self, t: f64) -> f64 {
        match self {
            Self::Constant(cp) => *cp,
            // Horner
            Self::Polynomial(c) => c.iter().rev().fold(0.0, |acc, &ck| acc * t + ck),
        }
    }

    /// `∫ Cp dT` from `t1` to `t2`, J/mol.
    pub(crate) fn integral(&self, t1: f64, t2: f64) -> f64 {
        match self {
            Self::Constant(cp) => cp * (t2 - t1),
            Self::Polynomial(c) => c
                .iter()
                .enumerate()
                .map(|(k, &ck)| {
                    let n = k as i32 + 1;
                    ck * (t2.powi(n) - t1.powi(n)) / f64::from(n)
                })
                .sum(),
        }
    }

    /// `∫ Cp/T dT` from `t1` to `t2`, J/(mol·K).
    pub(crate) fn integral_over_t(&self, t1: f64, t2: f64) -> f64 {
        match self {
            Self::Constant(cp) => cp * (t2 / t1).ln(),
            Self::Polynomial(c) => c
                .iter()
                .enumerate()
                .map(|(k, &ck)| {
                    if k == 0 {
                        ck * (t2 / t1).ln()
                    } else {
                        let n = k as i32;
                        ck * (t2.powi(n) - t1.powi(n)) / f64::from(n)
                    }
                })
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn nitrogen() -> HeatCapacityCorrelation {
        HeatCapacityCorrelation::Polynomial(vec![31.15, -1.357e-2, 2.680e-5, -1.168e-8])
    }

    #[test]
    fn constant_integrals() {
        let cp = HeatCapacityCorrelation::Constant(29.0);
        assert_relative_eq!(cp.cp(500.0), 29.0);
        assert_relative_eq!(cp.integral(300.0, 400.0), 2900.0);
        assert_relative_eq!(cp.integral_over_t(300.0, 600.0), 29.0 * 2.0_f64.ln());
    }

    #[test]
    fn polynomial_value() {
        assert_relative_eq!(nitrogen().cp(150.0), 29.678, max_relative = 1e-4);
    }

    #[test]
    fn integrals_match_trapezoid() {
        let cp = nitrogen();
        let (t1, t2) = (150.0, 900.0);
        let n = 20_000;
        let dt = (t2 - t1) / f64::from(n);
        let (mut h, mut s) = (0.0, 0.0);
        for i in 0..n {
            let a = t1 + dt * f64::from(i);
            let b = a + dt;
            h += 0.5 * dt * (cp.cp(a) + cp.cp(b));
            s += 0.5 * dt * (cp.cp(a) / a + cp.cp(b) / b);
        }
        assert_relative_eq!(cp.integral(t1, t2), h, max_relative = 1e-7);
        assert_relative_eq!(cp.integral_over_t(t1, t2), s, max_relative = 1e-7);
    }

    #[test]
    fn reversed_limits_change_sign() {
        let cp = nitrogen();
        assert_relative_eq!(cp.integral(400.0, 300.0), -cp.integral(300.0, 400.0));
        assert_relative_eq!(
            cp.integral_over_t(400.0, 300.0),
            -cp.integral_over_t(300.0, 400.0)
        );
    }
}
