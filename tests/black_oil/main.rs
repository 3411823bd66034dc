use poroflash::black_oil::{self, BlackOilParameters};
use poroflash::parameter::{Parameter, ParameterError};
use poroflash::{FlashHint, FlashOptions, Mixture, MixtureState};
use std::sync::Arc;

mod derivatives;
mod flash;
mod parameters;
mod queries;

const PARAMETER_FILE: &str = "tests/black_oil/test_parameters.json";

fn load_parameters(regions: Vec<&str>) -> Result<Arc<BlackOilParameters>, ParameterError> {
    Ok(Arc::new(BlackOilParameters::from_json(
        regions,
        PARAMETER_FILE,
    )?))
}

/// Mixture of the SPE1 region with all checks enabled.
fn spe1() -> Box<dyn Mixture> {
    let parameters = load_parameters(vec!["spe1"]).unwrap();
    let options = FlashOptions::new().check_derivatives(true);
    black_oil::mixture(&parameters, 0, options).unwrap()
}

fn flash_state(mixture: &mut dyn Mixture, p: f64, ni: &[f64]) -> MixtureState {
    mixture
        .flash(p, 0.0, ni, FlashHint::default())
        .unwrap()
        .clone()
}

fn flash_deriv_state(mixture: &mut dyn Mixture, p: f64, ni: &[f64]) -> MixtureState {
    mixture
        .flash_deriv(p, 0.0, ni, FlashHint::default())
        .unwrap()
        .clone()
}
