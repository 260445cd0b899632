use std::f64::consts::PI;

use crate::thermo::phase::PhaseKind;

const POLISH_STEPS: usize = 8;

/// Real roots of the monic cubic `x³ + c2·x² + c1·x + c0`, ascending.
///
/// The largest-magnitude root comes from the closed-form Cardano or
/// trigonometric solution and is polished by Newton steps. The remaining
/// quadratic is solved in its cancellation-free form, so roots many orders
/// of magnitude smaller than the first (a liquid at very low pressure) keep
/// their relative accuracy.
pub(super) fn real_roots(c2: f64, c1: f64, c0: f64) -> Vec<f64> {
    let Some(first) = closed_form(c2, c1, c0)
        .into_iter()
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
    else {
        return Vec::new();
    };
    let r = polish(first, c2, c1, c0);

    // x³ + c2·x² + c1·x + c0 = (x − r)(x² + b·x + c)
    let b = c2 + r;
    let c = if r == 0.0 { c1 } else { -c0 / r };
    let disc = b * b - 4.0 * c;

    let mut roots = vec![r];
    if disc >= 0.0 {
        let q = -0.5 * (b + b.signum() * disc.sqrt());
        let other = if q == 0.0 { 0.0 } else { c / q };
        roots.extend([q, other].map(|x| polish(x, c2, c1, c0)));
    }

    roots.sort_by(f64::total_cmp);
    roots
}

fn closed_form(c2: f64, c1: f64, c0: f64) -> Vec<f64> {
    let shift = c2 / 3.0;
    let p = c1 - c2 * c2 / 3.0;
    let q = 2.0 * c2.powi(3) / 27.0 - c2 * c1 / 3.0 + c0;
    let disc = (q / 2.0).powi(2) + (p / 3.0).powi(3);

    if disc > 0.0 {
        let sq = disc.sqrt();
        let u = (-q / 2.0 + sq).cbrt();
        let v = (-q / 2.0 - sq).cbrt();
        vec![u + v - shift]
    } else if p == 0.0 {
        vec![-shift]
    } else {
        let r = 2.0 * (-p / 3.0).sqrt();
        let arg = (3.0 * q / (2.0 * p) * (-3.0 / p).sqrt()).clamp(-1.0, 1.0);
        let phi = arg.acos() / 3.0;
        (0..3)
            .map(|k| r * (phi - 2.0 * PI * f64::from(k) / 3.0).cos() - shift)
            .collect()
    }
}

/// Newton steps on the cubic, kept only while they reduce `|f|`.
fn polish(mut x: f64, c2: f64, c1: f64, c0: f64) -> f64 {
    let f = |x: f64| ((x + c2) * x + c1) * x + c0;
    let mut fx = f(x);
    for _ in 0..POLISH_STEPS {
        let df = (3.0 * x + 2.0 * c2) * x + c1;
        if fx == 0.0 || df == 0.0 {
            break;
        }
        let next = x - fx / df;
        let f_next = f(next);
        if !(next.is_finite() && f_next.abs() < fx.abs()) {
            break;
        }
        x = next;
        fx = f_next;
    }
    x
}

/// Picks the physically relevant root for a phase.
///
/// A liquid takes the smallest root (densest packing), a gas the largest.
/// `roots` may be compressibility factors or molar volumes, already filtered
/// to the physical domain. Non-finite entries are ignored; returns `None` if
/// nothing remains.
///
/// # Example
///
/// ```
/// use twine_flash::thermo::{PhaseKind, select_root};
///
/// let roots = [0.0042, 0.031, 0.82];
/// assert_eq!(select_root(&roots, PhaseKind::Liquid), Some(0.0042));
/// assert_eq!(select_root(&roots, PhaseKind::Gas), Some(0.82));
/// assert_eq!(select_root(&[], PhaseKind::Gas), None);
/// ```
#[must_use]
pub fn select_root(roots: &[f64], kind: PhaseKind) -> Option<f64> {
    let finite = roots.iter().copied().filter(|r| r.is_finite());
    match kind {
        PhaseKind::Liquid => finite.min_by(f64::total_cmp),
        PhaseKind::Gas => finite.max_by(f64::total_cmp),
    }
}
