//! Flash round trips and specification handling.

use std::thread;

use approx::assert_relative_eq;
use twine_flash::thermo::{
    ComponentLibrary, CubicEos, FlashError, FlashResult, FlashStage, Flasher, Fluid, PhaseModel,
    SpecificationError, Specification, Variable,
};
use uom::si::{
    f64::{MolarEnergy, Pressure, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

fn fluid(parts: &[(&str, f64)]) -> Fluid {
    Fluid::from_provider(&ComponentLibrary::standard(), parts).unwrap()
}

fn nitrogen(eos: CubicEos) -> Flasher {
    Flasher::cubic(fluid(&[("nitrogen", 1.0)]), eos).unwrap()
}

fn t(value: f64) -> Specification {
    Specification::Temperature(ThermodynamicTemperature::new::<kelvin>(value))
}

fn p(value: f64) -> Specification {
    Specification::Pressure(Pressure::new::<pascal>(value))
}

fn tp(flasher: &Flasher, temperature: f64, pressure: f64) -> FlashResult {
    flasher.flash(t(temperature), p(pressure)).unwrap()
}

fn assert_ph_recovers(flasher: &Flasher, temperature: f64, pressure: f64) {
    let reference = tp(flasher, temperature, pressure);
    let result = flasher
        .flash(p(pressure), Specification::Enthalpy(reference.enthalpy()))
        .unwrap();

    assert_relative_eq!(
        result.temperature().get::<kelvin>(),
        temperature,
        max_relative = 1e-6
    );
    assert_eq!(result.vapor_fraction(), reference.vapor_fraction());
}

#[test]
fn pressure_enthalpy_recovers_gas_temperature() {
    assert_ph_recovers(&nitrogen(CubicEos::Srk), 300.0, 1e6);
    assert_ph_recovers(&nitrogen(CubicEos::PengRobinson), 150.0, 2e6);
}

#[test]
fn pressure_enthalpy_recovers_liquid_temperature() {
    assert_ph_recovers(&nitrogen(CubicEos::PengRobinson), 80.0, 1e6);
}

#[test]
fn pressure_enthalpy_recovers_supercritical_temperature() {
    assert_ph_recovers(&nitrogen(CubicEos::Srk), 140.0, 5e6);
}

#[test]
fn pressure_enthalpy_recovers_mixture_temperature() {
    let air = Flasher::cubic(fluid(&[("nitrogen", 0.79), ("oxygen", 0.21)]), CubicEos::Srk)
        .unwrap();
    assert_ph_recovers(&air, 300.0, 1e5);
}

#[test]
fn every_library_fluid_round_trips_on_every_cubic() {
    let library = ComponentLibrary::standard();
    for component in library.components() {
        let fluid = Fluid::pure(component.clone());
        let tc = component.constants().critical_temperature().get::<kelvin>();
        let pc = component.constants().critical_pressure().get::<pascal>();

        for eos in [CubicEos::VanDerWaals, CubicEos::Srk, CubicEos::PengRobinson] {
            let flasher = Flasher::cubic(fluid.clone(), eos).unwrap();
            let psat = flasher
                .saturation_pressure(ThermodynamicTemperature::new::<kelvin>(0.7 * tc))
                .unwrap()
                .pressure()
                .get::<pascal>();

            let states = [
                ("subcritical liquid", 0.7 * tc, 1.5 * psat),
                ("subcritical vapor", 0.7 * tc, 0.5 * psat),
                ("supercritical", 1.3 * tc, 2.0 * pc),
                ("near-critical", 1.05 * tc, 0.99 * pc),
            ];
            for (label, temperature, pressure) in states {
                let reference = tp(&flasher, temperature, pressure);
                let targets = [
                    Specification::Enthalpy(reference.enthalpy()),
                    Specification::Entropy(reference.entropy()),
                ];
                for target in targets {
                    let result = flasher.flash(p(pressure), target).unwrap_or_else(|err| {
                        panic!("{} {eos:?} {label}: {err}", component.id())
                    });
                    assert_relative_eq!(
                        result.temperature().get::<kelvin>(),
                        temperature,
                        max_relative = 1e-6
                    );
                }
            }
        }
    }
}

#[test]
fn pressure_enthalpy_splits_two_phase() {
    let flasher = nitrogen(CubicEos::PengRobinson);
    let reference = flasher
        .flash(t(90.0), Specification::VaporFraction(0.4))
        .unwrap();
    let pressure = reference.pressure().get::<pascal>();

    let result = flasher
        .flash(p(pressure), Specification::Enthalpy(reference.enthalpy()))
        .unwrap();

    assert_relative_eq!(result.temperature().get::<kelvin>(), 90.0, max_relative = 1e-6);
    assert_relative_eq!(result.vapor_fraction(), 0.4, epsilon = 1e-6);
    assert!(result.cp().is_err());
}

#[test]
fn pressure_entropy_is_isentropic() {
    let flasher = nitrogen(CubicEos::Srk);
    let inlet = tp(&flasher, 300.0, 1e5);

    let outlet = flasher
        .flash(p(1e6), Specification::Entropy(inlet.entropy()))
        .unwrap();

    assert_relative_eq!(outlet.entropy().value, inlet.entropy().value, epsilon = 1e-6);
    assert!(outlet.temperature() > inlet.temperature());
}

#[test]
fn pressure_volume_recovers_liquid_temperature() {
    let flasher = nitrogen(CubicEos::PengRobinson);
    let reference = tp(&flasher, 85.0, 2e6);

    let result = flasher
        .flash(p(2e6), Specification::Volume(reference.molar_volume()))
        .unwrap();

    assert_relative_eq!(result.temperature().get::<kelvin>(), 85.0, max_relative = 1e-6);
    assert_eq!(result.vapor_fraction(), 0.0);
}

#[test]
fn subcritical_branches_are_deterministic() {
    let flasher = nitrogen(CubicEos::Srk);

    let liquid = tp(&flasher, 80.0, 5e5);
    assert_eq!(liquid.vapor_fraction(), 0.0);
    assert_eq!(liquid, tp(&flasher, 80.0, 5e5));

    let gas = tp(&flasher, 100.0, 5e5);
    assert_eq!(gas.vapor_fraction(), 1.0);
    assert_eq!(gas, tp(&flasher, 100.0, 5e5));
}

#[test]
fn bubble_and_dew_points() {
    let flasher = nitrogen(CubicEos::Srk);
    let bubble = flasher
        .flash(p(101_325.0), Specification::VaporFraction(0.0))
        .unwrap();
    let dew = flasher
        .flash(Specification::VaporFraction(1.0), p(101_325.0))
        .unwrap();

    assert_relative_eq!(
        bubble.temperature().get::<kelvin>(),
        dew.temperature().get::<kelvin>(),
        max_relative = 1e-12
    );
    assert_relative_eq!(bubble.temperature().get::<kelvin>(), 77.4, epsilon = 0.5);
    assert!(bubble.molar_volume() < dew.molar_volume());
    assert!(bubble.cp().is_ok());
}

#[test]
fn invalid_pairs_fail_before_iterating() {
    let flasher = nitrogen(CubicEos::Srk);

    assert_eq!(
        flasher.flash(p(1e5), p(2e5)),
        Err(FlashError::Specification(SpecificationError::Duplicate(
            Variable::Pressure
        )))
    );
    assert_eq!(
        flasher.flash(
            t(300.0),
            Specification::Enthalpy(MolarEnergy::new::<joule_per_mole>(0.0))
        ),
        Err(FlashError::Specification(SpecificationError::Unsupported {
            first: Variable::Temperature,
            second: Variable::Enthalpy,
        }))
    );
    assert_eq!(
        flasher.flash(t(300.0), p(-1.0)),
        Err(FlashError::Specification(SpecificationError::OutOfRange {
            variable: Variable::Pressure,
            value: -1.0,
        }))
    );

    let air = Flasher::cubic(fluid(&[("nitrogen", 0.79), ("oxygen", 0.21)]), CubicEos::Srk)
        .unwrap();
    assert_eq!(
        air.flash(t(80.0), Specification::VaporFraction(0.5)),
        Err(FlashError::Specification(
            SpecificationError::RequiresSaturation
        ))
    );
}

#[test]
fn unattainable_enthalpy_fails_to_bracket() {
    let flasher = nitrogen(CubicEos::Srk);
    let err = flasher
        .flash(
            p(1e5),
            Specification::Enthalpy(MolarEnergy::new::<joule_per_mole>(1e9)),
        )
        .unwrap_err();

    let FlashError::Convergence(err) = err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(err.stage, FlashStage::RootBracketing);
    assert!(err.residual > 0.0 || err.residual < 0.0);
}

#[test]
fn shared_flasher_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Flasher>();
    assert_send_sync::<PhaseModel>();
    assert_send_sync::<Fluid>();
    assert_send_sync::<FlashResult>();

    let flasher = &nitrogen(CubicEos::PengRobinson);
    let expected = tp(flasher, 120.0, 1e6);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || tp(flasher, 120.0, 1e6)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
