//! Oxygen compressor, 25 °C and 1 bar to 10 bar.

use approx::assert_relative_eq;
use twine_core::Model;
use twine_flash::{
    models::turbomachinery::compressor::{
        CompressionError, Compressor, CompressorConfig, CompressorInput, CompressorOutput, Inlet,
    },
    thermo::{ComponentLibrary, CubicEos, Flasher, Fluid, Specification},
};
use uom::si::{
    available_energy::kilojoule_per_kilogram,
    f64::{MassRate, Pressure, ThermodynamicTemperature},
    mass_rate::kilogram_per_hour,
    power::kilowatt,
    pressure::bar,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::{degree_celsius, kelvin},
};

fn oxygen() -> Fluid {
    Fluid::from_provider(&ComponentLibrary::standard(), &[("O2", 1.0)]).unwrap()
}

fn compressor(flasher: Flasher) -> Compressor {
    Compressor::new(flasher, CompressorConfig::new(0.75, 0.95).unwrap())
}

fn input() -> CompressorInput {
    CompressorInput {
        inlet: Inlet::Conditions {
            temperature: ThermodynamicTemperature::new::<degree_celsius>(25.0),
            pressure: Pressure::new::<bar>(1.0),
        },
        outlet_pressure: Pressure::new::<bar>(10.0),
        mass_flow: MassRate::new::<kilogram_per_hour>(250.0),
    }
}

fn run(flasher: Flasher) -> CompressorOutput {
    compressor(flasher).call(&input()).unwrap()
}

#[test]
fn srk_oxygen_compressor() {
    let output = run(Flasher::cubic(oxygen(), CubicEos::Srk).unwrap());

    assert_relative_eq!(output.shaft_power.get::<kilowatt>(), 24.4, max_relative = 1e-2);
    let t_out = output.outlet.temperature().get::<kelvin>();
    assert!((642.5..644.5).contains(&t_out), "outlet at {t_out} K");
    assert_relative_eq!(
        output.temperature_rise.get::<delta_kelvin>(),
        t_out - 298.15,
        epsilon = 1e-9
    );
    assert!(output.specific_work.get::<kilojoule_per_kilogram>() > 300.0);
    assert_eq!(output.outlet.vapor_fraction(), 1.0);
}

#[test]
fn srk_and_ideal_gas_agree() {
    let srk = run(Flasher::cubic(oxygen(), CubicEos::Srk).unwrap());
    let ideal = run(Flasher::ideal_gas(oxygen()).unwrap());

    assert_relative_eq!(
        srk.shaft_power.get::<kilowatt>(),
        ideal.shaft_power.get::<kilowatt>(),
        max_relative = 2e-3
    );
    assert_relative_eq!(
        srk.outlet.temperature().get::<kelvin>(),
        ideal.outlet.temperature().get::<kelvin>(),
        max_relative = 1e-3
    );
}

#[test]
fn accepts_an_already_flashed_inlet() {
    let flasher = Flasher::cubic(oxygen(), CubicEos::PengRobinson).unwrap();
    let inlet = flasher
        .flash(
            Specification::Temperature(ThermodynamicTemperature::new::<degree_celsius>(25.0)),
            Specification::Pressure(Pressure::new::<bar>(1.0)),
        )
        .unwrap();
    let model = compressor(flasher);

    let from_conditions = model.call(&input()).unwrap();
    let from_result = model
        .call(&CompressorInput {
            inlet: Inlet::Flashed(inlet),
            ..input()
        })
        .unwrap();

    assert_eq!(from_conditions, from_result);
}

#[test]
fn expansion_is_rejected() {
    let model = compressor(Flasher::ideal_gas(oxygen()).unwrap());
    let err = model
        .call(&CompressorInput {
            outlet_pressure: Pressure::new::<bar>(0.5),
            ..input()
        })
        .unwrap_err();
    assert!(matches!(err, CompressionError::PressureRatio { .. }));
}
