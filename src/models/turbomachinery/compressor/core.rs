mod config;
mod error;
mod input;

pub use config::CompressorConfig;
pub use error::CompressionError;
pub use input::{CompressorInput, CompressorOutput, Inlet};

use log::debug;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MolarEnergy, Power},
    mass_rate::kilogram_per_second,
    molar_energy::joule_per_mole,
    molar_mass::kilogram_per_mole,
    power::watt,
    pressure::pascal,
};

use crate::{
    support::units::{SpecificEnthalpy, TemperatureDifference},
    thermo::{Flasher, Specification},
};

/// Compresses `input` adiabatically to its outlet pressure.
///
/// The ideal enthalpy rise comes from a `(P, S)` flash at the inlet entropy.
/// The actual rise is the ideal one divided by the isentropic efficiency, and
/// a `(P, H)` flash resolves the outlet. Shaft power divides the fluid power
/// by the mechanical efficiency.
///
/// # Errors
///
/// Returns [`CompressionError`] for invalid efficiencies, an expansion, a
/// negative mass flow, or a failed flash.
pub(super) fn compress(
    flasher: &Flasher,
    config: CompressorConfig,
    input: &CompressorInput,
) -> Result<CompressorOutput, CompressionError> {
    let (eta_s, eta_m) = config.validate()?;

    let mass_flow = input.mass_flow.get::<kilogram_per_second>();
    if !(mass_flow.is_finite() && mass_flow >= 0.0) {
        return Err(CompressionError::MassFlow(mass_flow));
    }

    let inlet = match &input.inlet {
        Inlet::Conditions {
            temperature,
            pressure,
        } => flasher
            .flash(
                Specification::Temperature(*temperature),
                Specification::Pressure(*pressure),
            )
            .map_err(CompressionError::Inlet)?,
        Inlet::Flashed(result) => result.clone(),
    };

    let p_in = inlet.pressure().get::<pascal>();
    let p_out = input.outlet_pressure.get::<pascal>();
    if !(p_out >= p_in) {
        return Err(CompressionError::PressureRatio {
            inlet: p_in,
            outlet: p_out,
        });
    }

    let isentropic_outlet = flasher
        .flash(
            Specification::Pressure(input.outlet_pressure),
            Specification::Entropy(inlet.entropy()),
        )
        .map_err(CompressionError::Isentropic)?;

    let h_in = inlet.enthalpy().get::<joule_per_mole>();
    let ideal_rise = isentropic_outlet.enthalpy().get::<joule_per_mole>() - h_in;
    let actual_rise = ideal_rise / eta_s;
    debug!("compressor: ideal rise {ideal_rise} J/mol, actual rise {actual_rise} J/mol");

    let outlet = flasher
        .flash(
            Specification::Pressure(input.outlet_pressure),
            Specification::Enthalpy(MolarEnergy::new::<joule_per_mole>(h_in + actual_rise)),
        )
        .map_err(CompressionError::Outlet)?;

    let molar_mass = inlet.molar_mass().get::<kilogram_per_mole>();
    let specific_work = actual_rise / molar_mass;

    Ok(CompressorOutput {
        temperature_rise: outlet.temperature().minus(inlet.temperature()),
        specific_work: SpecificEnthalpy::new::<joule_per_kilogram>(specific_work),
        shaft_power: Power::new::<watt>(mass_flow * specific_work / eta_m),
        inlet,
        outlet,
        isentropic_outlet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{MassRate, Pressure, ThermodynamicTemperature},
        power::kilowatt,
        pressure::bar,
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::{degree_celsius, kelvin},
    };

    use crate::{
        support::constraint::{Constrained, UnitInterval},
        thermo::{ComponentLibrary, CubicEos, Fluid},
    };

    fn oxygen() -> Fluid {
        Fluid::from_provider(&ComponentLibrary::standard(), &[("oxygen", 1.0)]).unwrap()
    }

    fn input(outlet_bar: f64) -> CompressorInput {
        CompressorInput {
            inlet: Inlet::Conditions {
                temperature: ThermodynamicTemperature::new::<degree_celsius>(25.0),
                pressure: Pressure::new::<bar>(1.0),
            },
            outlet_pressure: Pressure::new::<bar>(outlet_bar),
            mass_flow: MassRate::new::<kilogram_per_second>(250.0 / 3600.0),
        }
    }

    #[test]
    fn ideal_gas_oxygen() {
        let flasher = Flasher::ideal_gas(oxygen()).unwrap();
        let config = CompressorConfig::new(0.75, 0.95).unwrap();

        let output = compress(&flasher, config, &input(10.0)).unwrap();

        assert_relative_eq!(
            output.isentropic_outlet.temperature().get::<kelvin>(),
            559.95,
            epsilon = 0.1
        );
        assert_relative_eq!(output.outlet.temperature().get::<kelvin>(), 642.86, epsilon = 0.1);
        assert_relative_eq!(output.shaft_power.get::<kilowatt>(), 24.32, epsilon = 0.05);
        assert_relative_eq!(
            output.temperature_rise.get::<delta_kelvin>(),
            output.outlet.temperature().get::<kelvin>() - 298.15,
            epsilon = 1e-9
        );
    }

    #[test]
    fn srk_agrees_with_ideal_gas() {
        let config = CompressorConfig::new(0.75, 0.95).unwrap();
        let ideal = compress(&Flasher::ideal_gas(oxygen()).unwrap(), config, &input(10.0)).unwrap();
        let srk = compress(
            &Flasher::cubic(oxygen(), CubicEos::Srk).unwrap(),
            config,
            &input(10.0),
        )
        .unwrap();

        assert_relative_eq!(
            srk.shaft_power.get::<watt>(),
            ideal.shaft_power.get::<watt>(),
            max_relative = 2e-3
        );
        assert_relative_eq!(srk.outlet.temperature().get::<kelvin>(), 643.03, epsilon = 0.2);
    }

    #[test]
    fn ideal_machine_is_isentropic() {
        let flasher = Flasher::ideal_gas(oxygen()).unwrap();
        let output = compress(&flasher, CompressorConfig::default(), &input(5.0)).unwrap();
        assert_relative_eq!(
            output.outlet.temperature().get::<kelvin>(),
            output.isentropic_outlet.temperature().get::<kelvin>(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn rejects_invalid_inputs() {
        let flasher = Flasher::ideal_gas(oxygen()).unwrap();

        assert_eq!(
            CompressorConfig::new(0.0, 0.95),
            Err(CompressionError::Efficiency {
                name: "isentropic",
                value: 0.0
            })
        );

        let zero = CompressorConfig {
            isentropic_efficiency: Constrained::one(),
            mechanical_efficiency: Constrained::<f64, UnitInterval>::new(0.0).unwrap(),
        };
        assert!(matches!(
            compress(&flasher, zero, &input(10.0)),
            Err(CompressionError::Efficiency { name: "mechanical", .. })
        ));

        assert!(matches!(
            compress(&flasher, CompressorConfig::default(), &input(0.5)),
            Err(CompressionError::PressureRatio { .. })
        ));

        let mut backwards = input(10.0);
        backwards.mass_flow = MassRate::new::<kilogram_per_second>(-1.0);
        assert_eq!(
            compress(&flasher, CompressorConfig::default(), &backwards),
            Err(CompressionError::MassFlow(-1.0))
        );
    }
}
