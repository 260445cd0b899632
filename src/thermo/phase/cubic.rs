//! Generic two-parameter cubic equations of state.
//!
//! All three families share the form
//!
//! ```text
//! P = RT/(V − b) − a(T) / ((V + δ₁b)(V + δ₂b))
//! ```
//!
//! with `a(T) = a_c·α(T)` and Soave's `α = (1 + m(1 − √Tr))²`.
//! Mixtures use the van der Waals one-fluid rules:
//! `a = ΣΣ z_i z_j (1 − k_ij)√(a_i a_j)` and `b = Σ z_i b_i`.

mod roots;

use std::f64::consts::SQRT_2;

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use crate::thermo::{GAS_CONSTANT as R, error::NumericConvergenceError, fluid::Fluid};

use super::{PhaseKind, residual::Residual};

pub use roots::select_root;

/// Cubic equation-of-state family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum CubicEos {
    /// van der Waals: `δ = (0, 0)`, `α = 1`.
    VanDerWaals,
    /// Soave-Redlich-Kwong: `δ = (1, 0)`.
    Srk,
    /// Peng-Robinson: `δ = (1 + √2, 1 − √2)`.
    PengRobinson,
}

impl CubicEos {
    pub(super) fn name(self) -> &'static str {
        match self {
            Self::VanDerWaals => "van der Waals",
            Self::Srk => "Soave-Redlich-Kwong",
            Self::PengRobinson => "Peng-Robinson",
        }
    }

    fn omega_a(self) -> f64 {
        match self {
            Self::VanDerWaals => 27.0 / 64.0,
            Self::Srk => 0.42748,
            Self::PengRobinson => 0.45724,
        }
    }

    fn omega_b(self) -> f64 {
        match self {
            Self::VanDerWaals => 1.0 / 8.0,
            Self::Srk => 0.08664,
            Self::PengRobinson => 0.07780,
        }
    }

    fn deltas(self) -> (f64, f64) {
        match self {
            Self::VanDerWaals => (0.0, 0.0),
            Self::Srk => (1.0, 0.0),
            Self::PengRobinson => (1.0 + SQRT_2, 1.0 - SQRT_2),
        }
    }

    /// `Zc` implied by the equation of state.
    pub(crate) fn critical_compressibility(self) -> f64 {
        match self {
            Self::VanDerWaals => 0.375,
            Self::Srk => 1.0 / 3.0,
            Self::PengRobinson => 0.30740,
        }
    }

    /// Slope `m(ω)` of the Soave alpha function.
    fn kappa(self, omega: f64) -> f64 {
        match self {
            Self::VanDerWaals => 0.0,
            Self::Srk => 0.480 + 1.574 * omega - 0.176 * omega * omega,
            Self::PengRobinson => 0.37464 + 1.54226 * omega - 0.26992 * omega * omega,
        }
    }
}

/// `a(T)` and its first two temperature derivatives.
#[derive(Debug, Clone, Copy, Default)]
struct Attraction {
    a: f64,
    da: f64,
    d2a: f64,
}

/// Per-component cubic parameters for one fluid.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CubicParameters {
    eos: CubicEos,
    ac: Vec<f64>,
    b: Vec<f64>,
    m: Vec<f64>,
    tc: Vec<f64>,
    kij: Vec<f64>,
}

impl CubicParameters {
    pub(super) fn new(eos: CubicEos, fluid: &Fluid) -> Self {
        let n = fluid.len();
        let mut params = Self {
            eos,
            ac: Vec::with_capacity(n),
            b: Vec::with_capacity(n),
            m: Vec::with_capacity(n),
            tc: Vec::with_capacity(n),
            kij: Vec::with_capacity(n * n),
        };
        for c in fluid.components() {
            let k = c.constants();
            params.ac.push(eos.omega_a() * (R * k.tc()).powi(2) / k.pc());
            params.b.push(eos.omega_b() * R * k.tc() / k.pc());
            params.m.push(eos.kappa(k.omega()));
            params.tc.push(k.tc());
        }
        for i in 0..n {
            for j in 0..n {
                params.kij.push(fluid.kij(i, j));
            }
        }
        params
    }

    fn attraction(&self, i: usize, t: f64) -> Attraction {
        let (ac, m, tc) = (self.ac[i], self.m[i], self.tc[i]);
        let s = 1.0 + m * (1.0 - (t / tc).sqrt());
        Attraction {
            a: ac * s * s,
            da: -ac * m * s / (t * tc).sqrt(),
            d2a: ac * m * (1.0 + m) * (tc / t).sqrt() / (2.0 * t * tc),
        }
    }

    /// Mixture attraction and, per component, `Σ_j z_j a_ij`.
    fn mix(&self, t: f64, z: &[f64]) -> (Attraction, Vec<f64>) {
        let n = z.len();
        let pure: Vec<Attraction> = (0..n).map(|i| self.attraction(i, t)).collect();
        let mut mix = Attraction::default();
        let mut partial = vec![0.0; n];

        for (i, ai) in pure.iter().enumerate() {
            for (j, aj) in pure.iter().enumerate() {
                let g = (ai.a * aj.a).sqrt();
                if g <= 0.0 {
                    continue;
                }
                let k = 1.0 - self.kij[i * n + j];
                let cross = ai.da * aj.a + ai.a * aj.da;
                let dg = cross / (2.0 * g);
                let d2g = (ai.d2a * aj.a + 2.0 * ai.da * aj.da + ai.a * aj.d2a) / (2.0 * g)
                    - cross * cross / (4.0 * g.powi(3));
                let zz = z[i] * z[j] * k;
                mix.a += zz * g;
                mix.da += zz * dg;
                mix.d2a += zz * d2g;
                partial[i] += z[j] * k * g;
            }
        }
        (mix, partial)
    }

    pub(super) fn residual(
        &self,
        kind: PhaseKind,
        t: f64,
        p: f64,
        z: &[f64],
    ) -> Result<Residual, NumericConvergenceError> {
        let (d1, d2) = self.eos.deltas();
        let (att, partial) = self.mix(t, z);
        let a = att.a;
        let b: f64 = z.iter().zip(&self.b).map(|(zi, bi)| zi * bi).sum();

        let rt = R * t;
        let big_a = a * p / (rt * rt);
        let big_b = b * p / rt;

        let roots = roots::real_roots(
            (d1 + d2 - 1.0) * big_b - 1.0,
            big_a + d1 * d2 * big_b * big_b - (d1 + d2) * big_b * (big_b + 1.0),
            -(big_a * big_b + d1 * d2 * big_b * big_b * (big_b + 1.0)),
        );
        let physical: Vec<f64> = roots.into_iter().filter(|&zr| zr > big_b).collect();
        let zc = select_root(&physical, kind).ok_or(NumericConvergenceError::NoPhysicalRoot {
            temperature: t,
            pressure: p,
        })?;

        let v = zc * rt / p;
        let (qa, qb) = (v + d1 * b, v + d2 * b);
        let distinct = (d1 - d2).abs() > f64::EPSILON;
        let integral = if distinct {
            (qa / qb).ln() / (b * (d1 - d2))
        } else {
            1.0 / qa
        };
        let ln_free = (1.0 - b / v).ln();

        let a_res = -rt * ln_free - a * integral;
        let s_res = R * ln_free + att.da * integral;

        let ln_phi = (0..z.len())
            .map(|i| {
                let bi = self.b[i] / b;
                if distinct {
                    bi * (zc - 1.0) - (zc - big_b).ln()
                        - big_a / (big_b * (d1 - d2))
                            * (2.0 * partial[i] / a - bi)
                            * ((zc + d1 * big_b) / (zc + d2 * big_b)).ln()
                } else {
                    self.b[i] / (v - b) - (zc - big_b).ln() - 2.0 * partial[i] / (rt * v)
                }
            })
            .collect();

        Ok(Residual {
            z: zc,
            v,
            h: a_res + t * s_res + p * v - rt,
            s: s_res + R * zc.ln(),
            cv: t * att.d2a * integral,
            dp_dt: R / (v - b) - att.da / (qa * qb),
            dp_dv: -rt / (v - b).powi(2) + a * (2.0 * v + (d1 + d2) * b) / (qa * qb).powi(2),
            ln_phi,
        })
    }
}
