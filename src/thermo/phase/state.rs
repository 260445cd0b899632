use uom::si::{
    f64::{
        MolarEnergy, MolarHeatCapacity, MolarVolume, Pressure, TemperatureInterval,
        ThermodynamicTemperature,
    },
    molar_energy::joule_per_mole,
    molar_heat_capacity::joule_per_kelvin_mole,
    molar_volume::cubic_meter_per_mole,
    pressure::pascal,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{
    support::units::{JouleThomsonCoefficient, MolarEntropy},
    thermo::{GAS_CONSTANT as R, error::NumericConvergenceError, fluid::Fluid},
};

use super::{PhaseKind, residual::Residual};

/// One evaluated phase: volumetric, caloric and fugacity properties.
///
/// Enthalpy and entropy are absolute (ideal-gas reference plus departure).
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseState {
    kind: PhaseKind,
    t: f64,
    p: f64,
    composition: Vec<f64>,
    residual: Residual,
    h: f64,
    s: f64,
    cp: f64,
    cv: f64,
}

impl PhaseState {
    pub(super) fn new(
        kind: PhaseKind,
        fluid: &Fluid,
        t: f64,
        p: f64,
        z: &[f64],
        residual: Residual,
    ) -> Result<Self, NumericConvergenceError> {
        let cp_ig = fluid.ideal_cp(t, z);
        let cv = cp_ig - R + residual.cv;
        let cp = cv - t * residual.dp_dt.powi(2) / residual.dp_dv;
        let state = Self {
            kind,
            t,
            p,
            composition: z.to_vec(),
            h: fluid.ideal_enthalpy(t, z) + residual.h,
            s: fluid.ideal_entropy(t, p, z) + residual.s,
            cp,
            cv,
            residual,
        };
        state.check_finite()?;
        Ok(state)
    }

    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        self.kind
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(self.t)
    }

    #[must_use]
    pub fn pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.p)
    }

    #[must_use]
    pub fn composition(&self) -> &[f64] {
        &self.composition
    }

    #[must_use]
    pub fn compressibility(&self) -> f64 {
        self.residual.z
    }

    #[must_use]
    pub fn molar_volume(&self) -> MolarVolume {
        MolarVolume::new::<cubic_meter_per_mole>(self.residual.v)
    }

    #[must_use]
    pub fn enthalpy(&self) -> MolarEnergy {
        MolarEnergy::new::<joule_per_mole>(self.h)
    }

    #[must_use]
    pub fn entropy(&self) -> MolarEntropy {
        MolarEntropy::new::<joule_per_kelvin_mole>(self.s)
    }

    /// Enthalpy departure from the ideal gas at the same `T` and `P`.
    #[must_use]
    pub fn enthalpy_departure(&self) -> MolarEnergy {
        MolarEnergy::new::<joule_per_mole>(self.residual.h)
    }

    /// Entropy departure from the ideal gas at the same `T` and `P`.
    #[must_use]
    pub fn entropy_departure(&self) -> MolarEntropy {
        MolarEntropy::new::<joule_per_kelvin_mole>(self.residual.s)
    }

    /// Molar Gibbs departure, `RT Σ z_i ln φ_i`.
    ///
    /// Phases of equal composition are compared on this quantity.
    #[must_use]
    pub fn gibbs_departure(&self) -> MolarEnergy {
        MolarEnergy::new::<joule_per_mole>(self.g_res())
    }

    /// Natural logarithms of the fugacity coefficients, one per component.
    #[must_use]
    pub fn ln_fugacity_coefficients(&self) -> &[f64] {
        &self.residual.ln_phi
    }

    #[must_use]
    pub fn fugacity_coefficients(&self) -> Vec<f64> {
        self.residual.ln_phi.iter().map(|x| x.exp()).collect()
    }

    #[must_use]
    pub fn cp(&self) -> MolarHeatCapacity {
        MolarHeatCapacity::new::<joule_per_kelvin_mole>(self.cp)
    }

    #[must_use]
    pub fn cv(&self) -> MolarHeatCapacity {
        MolarHeatCapacity::new::<joule_per_kelvin_mole>(self.cv)
    }

    /// Thermal expansion at constant pressure, `(∂V/∂T)_P` in m³/(mol·K).
    ///
    /// From implicit differentiation of the equation of state.
    #[must_use]
    pub fn dv_dt(&self) -> f64 {
        -self.residual.dp_dt / self.residual.dp_dv
    }

    /// Joule-Thomson coefficient, `(T·(∂V/∂T)_P − V) / Cp`.
    #[must_use]
    pub fn joule_thomson(&self) -> JouleThomsonCoefficient {
        TemperatureInterval::new::<delta_kelvin>(self.mu_jt()) / Pressure::new::<pascal>(1.0)
    }

    pub(crate) fn t(&self) -> f64 {
        self.t
    }

    pub(crate) fn p(&self) -> f64 {
        self.p
    }

    pub(crate) fn z(&self) -> f64 {
        self.residual.z
    }

    pub(crate) fn v(&self) -> f64 {
        self.residual.v
    }

    pub(crate) fn h(&self) -> f64 {
        self.h
    }

    pub(crate) fn s(&self) -> f64 {
        self.s
    }

    pub(crate) fn cp_si(&self) -> f64 {
        self.cp
    }

    pub(crate) fn ln_phi(&self) -> &[f64] {
        &self.residual.ln_phi
    }

    pub(crate) fn g_res(&self) -> f64 {
        let sum: f64 = self
            .composition
            .iter()
            .zip(&self.residual.ln_phi)
            .map(|(zi, lp)| zi * lp)
            .sum();
        R * self.t * sum
    }

    /// Joule-Thomson coefficient, K/Pa.
    pub(crate) fn mu_jt(&self) -> f64 {
        (self.t * self.dv_dt() - self.residual.v) / self.cp
    }

    fn check_finite(&self) -> Result<(), NumericConvergenceError> {
        let values = [
            ("compressibility", self.residual.z),
            ("volume", self.residual.v),
            ("enthalpy", self.h),
            ("entropy", self.s),
            ("heat capacity", self.cp),
            ("fugacity coefficient", self.residual.ln_phi.iter().sum()),
        ];
        match values.iter().find(|(_, value)| !value.is_finite()) {
            Some(&(quantity, _)) => Err(NumericConvergenceError::NonFinite {
                quantity,
                temperature: self.t,
                pressure: self.p,
            }),
            None => Ok(()),
        }
    }
}
