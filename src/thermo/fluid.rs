//! Fluids: one or more components with an overall composition.

use uom::si::{
    f64::{MolarMass, ThermodynamicTemperature},
    molar_mass::kilogram_per_mole,
    thermodynamic_temperature::kelvin,
};

use super::{
    GAS_CONSTANT as R, REFERENCE_PRESSURE, REFERENCE_TEMPERATURE,
    component::{Component, ComponentProvider},
    error::ModelError,
};

/// A pure fluid or mixture with fixed overall mole fractions.
///
/// The fluid also owns the symmetric binary interaction parameters `k_ij`
/// shared by the cubic and virial mixing rules, and the ideal-gas reference
/// calculations every phase model builds on.
#[derive(Debug, Clone, PartialEq)]
pub struct Fluid {
    components: Vec<Component>,
    mole_fractions: Vec<f64>,
    kij: Vec<f64>,
}

impl Fluid {
    /// Creates a single-component fluid.
    #[must_use]
    pub fn pure(component: Component) -> Self {
        Self {
            components: vec![component],
            mole_fractions: vec![1.0],
            kij: vec![0.0],
        }
    }

    /// Creates a mixture from `(component, amount)` pairs.
    ///
    /// Amounts are normalized to mole fractions.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the list is empty, an amount is negative or
    /// not finite, or the amounts sum to zero.
    pub fn mixture(parts: impl IntoIterator<Item = (Component, f64)>) -> Result<Self, ModelError> {
        let (components, amounts): (Vec<_>, Vec<_>) = parts.into_iter().unzip();
        let mole_fractions = normalize(&components, &amounts)?;
        let n = components.len();
        Ok(Self {
            components,
            mole_fractions,
            kij: vec![0.0; n * n],
        })
    }

    /// Builds a fluid from identifiers resolved through `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownComponent`] for the first identifier the
    /// provider does not know, or any error from [`Fluid::mixture`].
    pub fn from_provider<P: ComponentProvider + ?Sized>(
        provider: &P,
        parts: &[(&str, f64)],
    ) -> Result<Self, ModelError> {
        let resolved = parts
            .iter()
            .map(|&(id, amount)| provider.component(id).map(|c| (c, amount)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::mixture(resolved)
    }

    /// Sets the binary interaction parameter between components `i` and `j`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InteractionIndex`] if either index is out of range
    /// or `i == j`.
    pub fn with_interaction(mut self, i: usize, j: usize, kij: f64) -> Result<Self, ModelError> {
        let n = self.len();
        if i >= n || j >= n || i == j {
            return Err(ModelError::InteractionIndex { i, j, len: n });
        }
        self.kij[i * n + j] = kij;
        self.kij[j * n + i] = kij;
        Ok(self)
    }

    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    #[must_use]
    pub fn mole_fractions(&self) -> &[f64] {
        &self.mole_fractions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    #[must_use]
    pub fn is_pure(&self) -> bool {
        self.components.len() == 1
    }

    /// Mole-fraction weighted molar mass.
    #[must_use]
    pub fn molar_mass(&self) -> MolarMass {
        MolarMass::new::<kilogram_per_mole>(self.mw(&self.mole_fractions))
    }

    /// Critical temperature, or Kay's-rule pseudo-critical for a mixture.
    #[must_use]
    pub fn critical_temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(self.tc())
    }

    pub(crate) fn kij(&self, i: usize, j: usize) -> f64 {
        self.kij[i * self.len() + j]
    }

    pub(crate) fn mw(&self, z: &[f64]) -> f64 {
        self.weighted(z, |c| c.mw())
    }

    /// Kay's-rule pseudo-critical temperature, K.
    pub(crate) fn tc(&self) -> f64 {
        self.weighted(&self.mole_fractions, |c| c.constants().tc())
    }

    /// Kay's-rule pseudo-critical pressure, Pa.
    pub(crate) fn pc(&self) -> f64 {
        self.weighted(&self.mole_fractions, |c| c.constants().pc())
    }

    /// Mole-fraction weighted acentric factor.
    pub(crate) fn acentric_factor(&self) -> f64 {
        self.weighted(&self.mole_fractions, |c| c.constants().omega())
    }

    /// Validates and normalizes a caller-supplied composition.
    pub(crate) fn composition(&self, z: &[f64]) -> Result<Vec<f64>, ModelError> {
        if z.len() != self.len() {
            return Err(ModelError::Composition {
                expected: self.len(),
                found: z.len(),
            });
        }
        normalize(&self.components, z)
    }

    /// Ideal-gas heat capacity, J/(mol·K).
    pub(crate) fn ideal_cp(&self, t: f64, z: &[f64]) -> f64 {
        self.weighted(z, |c| c.heat_capacity().cp(t))
    }

    /// Ideal-gas enthalpy relative to the reference state, J/mol.
    pub(crate) fn ideal_enthalpy(&self, t: f64, z: &[f64]) -> f64 {
        self.weighted(z, |c| {
            c.heat_capacity().integral(REFERENCE_TEMPERATURE, t)
        })
    }

    /// Ideal-gas entropy relative to the reference state, J/(mol·K).
    ///
    /// Includes the ideal entropy of mixing.
    pub(crate) fn ideal_entropy(&self, t: f64, p: f64, z: &[f64]) -> f64 {
        let thermal = self.weighted(z, |c| {
            c.heat_capacity()
                .integral_over_t(REFERENCE_TEMPERATURE, t)
        });
        let mixing: f64 = z.iter().filter(|&&zi| zi > 0.0).map(|zi| zi * zi.ln()).sum();
        thermal - R * (p / REFERENCE_PRESSURE).ln() - R * mixing
    }

    fn weighted(&self, z: &[f64], f: impl Fn(&Component) -> f64) -> f64 {
        self.components.iter().zip(z).map(|(c, zi)| zi * f(c)).sum()
    }
}

fn normalize(components: &[Component], amounts: &[f64]) -> Result<Vec<f64>, ModelError> {
    if components.is_empty() {
        return Err(ModelError::EmptyFluid);
    }
    for (c, &value) in components.iter().zip(amounts) {
        if !value.is_finite() || value < 0.0 {
            return Err(ModelError::MoleFraction {
                id: c.id().to_owned(),
                value,
            });
        }
    }
    let total: f64 = amounts.iter().sum();
    if total <= 0.0 {
        return Err(ModelError::MoleFraction {
            id: components[0].id().to_owned(),
            value: total,
        });
    }
    Ok(amounts.iter().map(|a| a / total).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::thermo::ComponentLibrary;

    fn air() -> Fluid {
        Fluid::from_provider(&ComponentLibrary::standard(), &[("nitrogen", 79.0), ("oxygen", 21.0)])
            .unwrap()
    }

    #[test]
    fn mixture_normalizes_amounts() {
        let fluid = air();
        assert_relative_eq!(fluid.mole_fractions()[0], 0.79);
        assert_relative_eq!(fluid.mole_fractions()[1], 0.21);
        assert_relative_eq!(
            fluid.molar_mass().get::<kilogram_per_mole>(),
            0.79 * 0.028014 + 0.21 * 0.031999,
            max_relative = 1e-12
        );
    }

    #[test]
    fn rejects_bad_amounts() {
        let library = ComponentLibrary::standard();
        assert!(matches!(
            Fluid::from_provider(&library, &[("nitrogen", -1.0), ("oxygen", 2.0)]),
            Err(ModelError::MoleFraction { .. })
        ));
        assert!(matches!(
            Fluid::from_provider(&library, &[("nitrogen", 0.0)]),
            Err(ModelError::MoleFraction { .. })
        ));
        assert_eq!(
            Fluid::mixture(Vec::new()),
            Err(ModelError::EmptyFluid)
        );
        assert!(matches!(
            Fluid::from_provider(&library, &[("argon", 1.0)]),
            Err(ModelError::UnknownComponent(_))
        ));
    }

    #[test]
    fn interaction_is_symmetric() {
        let fluid = air().with_interaction(0, 1, -0.012).unwrap();
        assert_eq!(fluid.kij(1, 0), -0.012);
        assert_eq!(fluid.kij(0, 1), -0.012);
        assert!(air().with_interaction(0, 2, 0.1).is_err());
        assert!(air().with_interaction(1, 1, 0.1).is_err());
    }

    #[test]
    fn ideal_reference_state_is_zero() {
        let fluid = Fluid::from_provider(&ComponentLibrary::standard(), &[("oxygen", 1.0)]).unwrap();
        let z = fluid.mole_fractions().to_vec();
        assert_relative_eq!(fluid.ideal_enthalpy(REFERENCE_TEMPERATURE, &z), 0.0);
        assert_relative_eq!(
            fluid.ideal_entropy(REFERENCE_TEMPERATURE, REFERENCE_PRESSURE, &z),
            0.0
        );
    }

    #[test]
    fn mixing_entropy() {
        let fluid = air();
        let z = fluid.mole_fractions().to_vec();
        let expected = -R * (0.79 * 0.79_f64.ln() + 0.21 * 0.21_f64.ln());
        assert_relative_eq!(
            fluid.ideal_entropy(REFERENCE_TEMPERATURE, REFERENCE_PRESSURE, &z),
            expected,
            max_relative = 1e-12
        );
    }
}
