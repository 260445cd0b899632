//! Saturation benchmarks and enthalpy-of-vaporization consistency.

use approx::assert_relative_eq;
use twine_flash::thermo::{
    Component, ComponentLibrary, ComponentProvider, CubicEos, Flasher, Fluid, FluidConstants,
    GAS_CONSTANT, HeatCapacityCorrelation, PhaseModel, PhaseState, vaporization,
};
use uom::si::{
    f64::{MolarMass, MolarVolume, Pressure, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    molar_mass::gram_per_mole,
    molar_volume::cubic_meter_per_mole,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

const TC: f64 = 300.0;
const PC: f64 = 4e6;

/// A made-up fluid for reduced-property checks.
fn reduced_fluid() -> Fluid {
    let constants = FluidConstants::new(
        ThermodynamicTemperature::new::<kelvin>(TC),
        Pressure::new::<pascal>(PC),
        MolarVolume::new::<cubic_meter_per_mole>(2e-4),
        0.0,
    )
    .unwrap();
    Fluid::pure(
        Component::new(
            "reduced",
            constants,
            MolarMass::new::<gram_per_mole>(30.0),
            HeatCapacityCorrelation::Constant(3.5 * GAS_CONSTANT),
        )
        .unwrap(),
    )
}

fn water() -> Fluid {
    Fluid::from_provider(&ComponentLibrary::standard(), &[("water", 1.0)]).unwrap()
}

fn kelvins(t: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<kelvin>(t)
}

#[test]
fn van_der_waals_reduced_saturation() {
    let flasher = Flasher::cubic(reduced_fluid(), CubicEos::VanDerWaals).unwrap();
    let saturation = flasher.saturation_pressure(kelvins(0.9 * TC)).unwrap();

    let vc = 0.375 * GAS_CONSTANT * TC / PC;
    let volume = |state: &PhaseState| {
        state.molar_volume().get::<cubic_meter_per_mole>() / vc
    };

    assert_relative_eq!(saturation.pressure().get::<pascal>() / PC, 0.6470, epsilon = 1e-4);
    assert_relative_eq!(volume(saturation.liquid()), 0.6034, epsilon = 1e-3);
    assert_relative_eq!(volume(saturation.gas()), 2.3488, epsilon = 1e-3);
}

#[test]
fn van_der_waals_critical_point_is_a_triple_root() {
    let fluid = reduced_fluid();
    for model in [
        PhaseModel::gas(CubicEos::VanDerWaals, &fluid).unwrap(),
        PhaseModel::liquid(CubicEos::VanDerWaals, &fluid).unwrap(),
    ] {
        let state = model
            .evaluate(kelvins(TC), Pressure::new::<pascal>(PC), &[1.0])
            .unwrap();
        assert_relative_eq!(state.compressibility(), 0.375, epsilon = 1e-3);
    }
}

#[test]
fn water_normal_boiling_point() {
    let srk = Flasher::cubic(water(), CubicEos::Srk).unwrap();
    let pr = Flasher::cubic(water(), CubicEos::PengRobinson).unwrap();

    let srk_sat = srk.saturation_pressure(kelvins(373.15)).unwrap();
    let pr_sat = pr.saturation_pressure(kelvins(373.15)).unwrap();

    assert_relative_eq!(srk_sat.pressure().get::<pascal>(), 92_742.0, max_relative = 1e-3);
    assert_relative_eq!(pr_sat.pressure().get::<pascal>(), 96_399.0, max_relative = 1e-3);
    assert_relative_eq!(
        srk_sat.enthalpy_of_vaporization().get::<joule_per_mole>(),
        42_967.0,
        max_relative = 2e-3
    );
}

#[test]
fn eos_enthalpy_of_vaporization_satisfies_clapeyron() {
    let flasher = Flasher::cubic(water(), CubicEos::Srk).unwrap();
    let t = 400.0;
    let dt = 0.01;

    let psat = |t: f64| {
        flasher
            .saturation_pressure(kelvins(t))
            .unwrap()
            .pressure()
            .get::<pascal>()
    };
    let slope = (psat(t + dt) - psat(t - dt)) / (2.0 * dt);

    let saturation = flasher.saturation_pressure(kelvins(t)).unwrap();
    let dv = saturation.gas().molar_volume() - saturation.liquid().molar_volume();
    let clapeyron = t * dv.get::<cubic_meter_per_mole>() * slope;

    assert_relative_eq!(
        saturation.enthalpy_of_vaporization().get::<joule_per_mole>(),
        clapeyron,
        max_relative = 1e-5
    );
}

#[test]
fn correlations_track_the_equation_of_state() {
    let flasher = Flasher::cubic(water(), CubicEos::Srk).unwrap();
    let constants = *ComponentLibrary::standard()
        .component("water")
        .unwrap()
        .constants();
    let eos = flasher
        .enthalpy_of_vaporization(kelvins(373.15))
        .unwrap()
        .get::<joule_per_mole>();

    let pitzer = vaporization::pitzer(kelvins(373.15), &constants).get::<joule_per_mole>();
    assert_relative_eq!(pitzer, eos, max_relative = 0.05);

    let saturation = flasher.saturation_pressure(kelvins(373.15)).unwrap();
    let dz = saturation.gas().compressibility() - saturation.liquid().compressibility();
    let clapeyron =
        vaporization::clapeyron(kelvins(373.15), saturation.pressure(), dz, &constants)
            .get::<joule_per_mole>();
    assert_relative_eq!(clapeyron, eos, max_relative = 0.15);

    let watson = vaporization::watson(
        flasher.enthalpy_of_vaporization(kelvins(373.15)).unwrap(),
        kelvins(373.15),
        kelvins(450.0),
        kelvins(constants.critical_temperature().get::<kelvin>()),
    )
    .get::<joule_per_mole>();
    let direct = flasher
        .enthalpy_of_vaporization(kelvins(450.0))
        .unwrap()
        .get::<joule_per_mole>();
    assert_relative_eq!(watson, direct, max_relative = 0.1);
}
