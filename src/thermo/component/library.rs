use std::collections::BTreeMap;

use super::{Component, ComponentProvider, FluidConstants, HeatCapacityCorrelation};
use crate::thermo::error::UnknownComponentError;

/// An in-memory [`ComponentProvider`].
///
/// Lookups ignore ASCII case and surrounding whitespace and accept either the
/// record identifier or one of its aliases (formula, CAS number).
///
/// # Example
///
/// ```
/// use twine_flash::thermo::{ComponentLibrary, ComponentProvider};
///
/// let library = ComponentLibrary::standard();
/// let oxygen = library.component("O2").unwrap();
/// assert_eq!(oxygen.id(), "oxygen");
/// assert!(library.component("unobtainium").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComponentLibrary {
    records: BTreeMap<String, Component>,
    aliases: BTreeMap<String, String>,
}

/// Tc [K], Pc [Pa], Vc [m³/mol], ω, M [g/mol], ideal-gas Cp polynomial.
///
/// Critical constants and Cp coefficients from Poling, Prausnitz & O'Connell.
type Record = (&'static str, &'static [&'static str], [f64; 5], [f64; 4]);

const STANDARD: &[Record] = &[
    (
        "nitrogen",
        &["n2", "7727-37-9"],
        [126.2, 3.398e6, 90.1e-6, 0.037, 28.014],
        [31.15, -1.357e-2, 2.680e-5, -1.168e-8],
    ),
    (
        "oxygen",
        &["o2", "7782-44-7"],
        [154.58, 5.043e6, 73.37e-6, 0.022, 31.999],
        [28.11, -3.680e-6, 1.746e-5, -1.065e-8],
    ),
    (
        "water",
        &["h2o", "7732-18-5"],
        [647.14, 22.064e6, 55.95e-6, 0.344, 18.015],
        [32.24, 1.924e-3, 1.055e-5, -3.596e-9],
    ),
    (
        "methane",
        &["ch4", "74-82-8"],
        [190.56, 4.599e6, 98.6e-6, 0.011, 16.043],
        [19.25, 5.213e-2, 1.197e-5, -1.132e-8],
    ),
    (
        "carbon dioxide",
        &["co2", "124-38-9"],
        [304.12, 7.374e6, 94.07e-6, 0.225, 44.010],
        [19.80, 7.344e-2, -5.602e-5, 1.715e-8],
    ),
    (
        "propane",
        &["c3h8", "74-98-6"],
        [369.83, 4.248e6, 200.0e-6, 0.152, 44.097],
        [-4.224, 0.3063, -1.586e-4, 3.215e-8],
    ),
];

impl ComponentLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a library holding nitrogen, oxygen, water, methane,
    /// carbon dioxide and propane.
    #[must_use]
    pub fn standard() -> Self {
        let mut library = Self::new();
        for &(id, aliases, [tc, pc, vc, omega, mw], cp) in STANDARD {
            let component = Component {
                id: id.to_owned(),
                constants: FluidConstants { tc, pc, vc, omega },
                molar_mass: mw * 1e-3,
                heat_capacity: HeatCapacityCorrelation::Polynomial(cp.to_vec()),
            };
            library.insert(component);
            for alias in aliases {
                library.alias(alias, id);
            }
        }
        library
    }

    /// Adds or replaces a record, keyed by its identifier.
    pub fn insert(&mut self, component: Component) {
        self.records.insert(key(component.id()), component);
    }

    /// Registers `alias` as another name for the record `id`.
    pub fn alias(&mut self, alias: &str, id: &str) {
        self.aliases.insert(key(alias), key(id));
    }

    /// Records in identifier order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.records.values()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ComponentProvider for ComponentLibrary {
    fn component(&self, id: &str) -> Result<Component, UnknownComponentError> {
        let id_key = key(id);
        let resolved = self.aliases.get(&id_key).unwrap_or(&id_key);
        self.records
            .get(resolved)
            .cloned()
            .ok_or_else(|| UnknownComponentError { id: id.to_owned() })
    }
}

fn key(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        molar_mass::gram_per_mole, molar_volume::cubic_meter_per_mole, pressure::pascal,
        thermodynamic_temperature::kelvin,
    };

    #[test]
    fn standard_records_pass_validation() {
        let library = ComponentLibrary::standard();
        assert_eq!(library.len(), 6);
        let ids: Vec<&str> = library.components().map(Component::id).collect();
        assert_eq!(ids.first(), Some(&"carbon dioxide"));
        assert_eq!(ids.len(), 6);

        for &(id, _, _, _) in STANDARD {
            let c = library.component(id).unwrap();
            let k = c.constants();
            let checked = FluidConstants::new(
                k.critical_temperature(),
                k.critical_pressure(),
                k.critical_volume(),
                k.acentric_factor(),
            );
            assert_eq!(checked.as_ref(), Ok(k));
            assert!(Component::new(id, *k, c.molar_mass(), c.heat_capacity().clone()).is_ok());
        }
    }

    #[test]
    fn lookup_by_alias_and_case() {
        let library = ComponentLibrary::standard();
        let water = library.component(" H2O ").unwrap();
        assert_eq!(water.id(), "water");
        assert!((water.molar_mass().get::<gram_per_mole>() - 18.015).abs() < 1e-9);

        let co2 = library.component("124-38-9").unwrap();
        assert_eq!(co2.constants().critical_temperature().get::<kelvin>(), 304.12);
    }

    #[test]
    fn unknown_identifier() {
        let library = ComponentLibrary::standard();
        assert_eq!(
            library.component("helium"),
            Err(UnknownComponentError {
                id: "helium".to_owned()
            })
        );
    }

    #[test]
    fn insert_replaces_record() {
        let mut library = ComponentLibrary::standard();
        let custom = Component::new(
            "Nitrogen",
            FluidConstants::new(
                uom::si::f64::ThermodynamicTemperature::new::<kelvin>(126.19),
                uom::si::f64::Pressure::new::<pascal>(3.3958e6),
                uom::si::f64::MolarVolume::new::<cubic_meter_per_mole>(89.4e-6),
                0.0372,
            )
            .unwrap(),
            uom::si::f64::MolarMass::new::<gram_per_mole>(28.0134),
            HeatCapacityCorrelation::Constant(29.12),
        )
        .unwrap();
        library.insert(custom);

        assert_eq!(library.len(), 6);
        let n2 = library.component("n2").unwrap();
        assert_eq!(n2.constants().acentric_factor(), 0.0372);
    }
}
