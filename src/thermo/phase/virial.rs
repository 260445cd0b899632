//! Truncated virial equation of state, `Z = 1 + B/V + C/V²`.
//!
//! `B` comes from the Tsonopoulos correlation (non-polar form) and `C` either
//! from Orbey-Vera or is taken as zero. Cross coefficients use the Tsonopoulos
//! combining rules:
//!
//! ```text
//! Tc_ij = √(Tc_i·Tc_j)·(1 − k_ij)     Vc_ij = ((Vc_i^⅓ + Vc_j^⅓)/2)³
//! Zc_ij = (Zc_i + Zc_j)/2             Pc_ij = Zc_ij·R·Tc_ij / Vc_ij
//! ω_ij  = (ω_i + ω_j)/2               C_ijk = (C_ij·C_jk·C_ik)^⅓
//! ```
//!
//! The model has a gas root only.

mod correlations;

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use crate::thermo::{GAS_CONSTANT as R, error::NumericConvergenceError, fluid::Fluid};

use super::residual::Residual;

use correlations::{
    InversePowerSeries, ORBEY_VERA_G0, ORBEY_VERA_G1, TSONOPOULOS_F0, TSONOPOULOS_F1,
};

const MAX_ITERS: usize = 100;
const VOLUME_TOL: f64 = 1e-10;

/// Third virial coefficient policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum ThirdVirial {
    /// Truncate after `B`.
    #[default]
    Zero,
    /// Orbey-Vera correlation.
    OrbeyVera,
}

/// Virial equation-of-state settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct VirialEos {
    pub third: ThirdVirial,
}

impl VirialEos {
    /// Virial model with the given third-coefficient policy.
    #[must_use]
    pub fn new(third: ThirdVirial) -> Self {
        Self { third }
    }
}

/// Critical constants of one (possibly cross) interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Critical {
    tc: f64,
    pc: f64,
    omega: f64,
}

impl Critical {
    /// `[X, dX/dT, d²X/dT²]` for `X = (R·Tc/Pc)^power·(f0 + ω·f1)`.
    fn coefficient(
        self,
        t: f64,
        power: i32,
        f0: &InversePowerSeries,
        f1: &InversePowerSeries,
    ) -> [f64; 3] {
        let scale = (R * self.tc / self.pc).powi(power);
        let tr = t / self.tc;
        let [a0, a1, a2] = f0.eval(tr);
        let [b0, b1, b2] = f1.eval(tr);
        [
            scale * (a0 + self.omega * b0),
            scale * (a1 + self.omega * b1) / self.tc,
            scale * (a2 + self.omega * b2) / (self.tc * self.tc),
        ]
    }
}

/// Mixture `B` and `C` with derivatives, plus per-component partial sums.
struct Coefficients {
    b: [f64; 3],
    c: [f64; 3],
    /// `Σ_j z_j B_ij`
    partial_b: Vec<f64>,
    /// `Σ_jk z_j z_k C_ijk`
    partial_c: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct VirialParameters {
    third: ThirdVirial,
    n: usize,
    pairs: Vec<Critical>,
}

impl VirialParameters {
    pub(super) fn new(eos: VirialEos, fluid: &Fluid) -> Self {
        let n = fluid.len();
        let constants: Vec<_> = fluid.components().iter().map(|c| *c.constants()).collect();
        let mut pairs = Vec::with_capacity(n * n);
        for (i, ci) in constants.iter().enumerate() {
            for (j, cj) in constants.iter().enumerate() {
                let tc = (ci.tc() * cj.tc()).sqrt() * (1.0 - fluid.kij(i, j));
                let vc = ((ci.vc().cbrt() + cj.vc().cbrt()) / 2.0).powi(3);
                let zc_i = ci.pc() * ci.vc() / (R * ci.tc());
                let zc_j = cj.pc() * cj.vc() / (R * cj.tc());
                let zc = (zc_i + zc_j) / 2.0;
                pairs.push(Critical {
                    tc,
                    pc: zc * R * tc / vc,
                    omega: (ci.omega() + cj.omega()) / 2.0,
                });
            }
        }
        Self {
            third: eos.third,
            n,
            pairs,
        }
    }

    fn coefficients(&self, t: f64, z: &[f64]) -> Coefficients {
        let n = self.n;
        let bij: Vec<[f64; 3]> = self
            .pairs
            .iter()
            .map(|k| k.coefficient(t, 1, &TSONOPOULOS_F0, &TSONOPOULOS_F1))
            .collect();

        let mut b = [0.0; 3];
        let mut partial_b = vec![0.0; n];
        for i in 0..n {
            for j in 0..n {
                let x = bij[i * n + j];
                for d in 0..3 {
                    b[d] += z[i] * z[j] * x[d];
                }
                partial_b[i] += z[j] * x[0];
            }
        }

        let mut c = [0.0; 3];
        let mut partial_c = vec![0.0; n];
        if self.third == ThirdVirial::OrbeyVera {
            let cij: Vec<[f64; 3]> = self
                .pairs
                .iter()
                .map(|k| k.coefficient(t, 2, &ORBEY_VERA_G0, &ORBEY_VERA_G1))
                .collect();
            for i in 0..n {
                for j in 0..n {
                    for k in 0..n {
                        let x = if n == 1 {
                            cij[0]
                        } else {
                            cube_root_rule(cij[i * n + j], cij[j * n + k], cij[i * n + k])
                        };
                        for d in 0..3 {
                            c[d] += z[i] * z[j] * z[k] * x[d];
                        }
                        partial_c[i] += z[j] * z[k] * x[0];
                    }
                }
            }
        }

        Coefficients {
            b,
            c,
            partial_b,
            partial_c,
        }
    }

    /// Solves `P·V³ − RT·(V² + B·V + C) = 0` by Newton from the ideal-gas volume.
    fn volume(&self, t: f64, p: f64, b: f64, c: f64) -> Result<f64, NumericConvergenceError> {
        let rt = R * t;
        let mut v = rt / p;
        for _ in 0..MAX_ITERS {
            let f = p * v.powi(3) - rt * (v * v + b * v + c);
            let df = 3.0 * p * v * v - rt * (2.0 * v + b);
            let next = v - f / df;
            if !next.is_finite() || next <= 0.0 {
                return Err(NumericConvergenceError::NoPhysicalRoot {
                    temperature: t,
                    pressure: p,
                });
            }
            let step = (next - v).abs();
            v = next;
            if step <= VOLUME_TOL * v {
                return Ok(v);
            }
        }
        Err(NumericConvergenceError::VirialVolume {
            iters: MAX_ITERS,
            volume: v,
        })
    }

    pub(super) fn residual(
        &self,
        t: f64,
        p: f64,
        z: &[f64],
    ) -> Result<Residual, NumericConvergenceError> {
        let Coefficients {
            b: [b, db, d2b],
            c: [c, dc, d2c],
            partial_b,
            partial_c,
        } = self.coefficients(t, z);

        let v = self.volume(t, p, b, c)?;
        let rt = R * t;
        let zc = p * v / rt;

        // Helmholtz departure per RT and its temperature derivatives (at fixed V).
        let x = b / v + c / (2.0 * v * v);
        let dx = db / v + dc / (2.0 * v * v);
        let d2x = d2b / v + d2c / (2.0 * v * v);

        let a_res = rt * x;
        let s_res = -R * x - rt * dx;

        let ln_phi = partial_b
            .iter()
            .zip(&partial_c)
            .map(|(pb, pc)| 2.0 * pb / v + 1.5 * pc / (v * v) - zc.ln())
            .collect();

        Ok(Residual {
            z: zc,
            v,
            h: a_res + t * s_res + p * v - rt,
            s: s_res + R * zc.ln(),
            cv: -t * (2.0 * R * dx + rt * d2x),
            dp_dt: R * (1.0 / v + b / (v * v) + c / v.powi(3)) + rt * (db / (v * v) + dc / v.powi(3)),
            dp_dv: -rt * (1.0 / (v * v) + 2.0 * b / v.powi(3) + 3.0 * c / v.powi(4)),
            ln_phi,
        })
    }
}

/// `C_ijk = (C_ij·C_jk·C_ik)^⅓` with derivatives.
fn cube_root_rule(x: [f64; 3], y: [f64; 3], w: [f64; 3]) -> [f64; 3] {
    let prod = x[0] * y[0] * w[0];
    let value = prod.cbrt();
    if value == 0.0 {
        return [0.0; 3];
    }
    let d_prod = x[1] * y[0] * w[0] + x[0] * y[1] * w[0] + x[0] * y[0] * w[1];
    let d2_prod = x[2] * y[0] * w[0]
        + x[0] * y[2] * w[0]
        + x[0] * y[0] * w[2]
        + 2.0 * (x[1] * y[1] * w[0] + x[1] * y[0] * w[1] + x[0] * y[1] * w[1]);
    let first = d_prod / (3.0 * value * value);
    let second = (d2_prod - 6.0 * value * first * first) / (3.0 * value * value);
    [value, first, second]
}
