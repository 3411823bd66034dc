use super::{flash_state, load_parameters, spe1};
use approx::assert_relative_eq;
use poroflash::black_oil;
use poroflash::consts::{CONV1, GRAVITY_FACTOR, MSCF};
use poroflash::{FlashError, FlashOptions};

#[test]
fn single_phase_densities() {
    let mixture = spe1();
    let p = 2300.0;
    let bg = 1.614 + (2300.0 - 2014.7) * (1.294 - 1.614) / 500.0;
    let bw = 1.0034 * (1.0 - 3.0e-6 * (2300.0 - 3600.0));
    assert_relative_eq!(
        mixture.xi_phase(p, 0.0, &[0.0, 1.0, 0.0]).unwrap(),
        1.0 / (CONV1 * bg),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        mixture.rho_phase(p, 0.0, &[0.0, 1.0, 0.0]).unwrap(),
        MSCF / CONV1 * 0.0649 / bg,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        mixture.xi_phase(p, 0.0, &[0.0, 0.0, 1.0]).unwrap(),
        1.0 / (CONV1 * bw),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        mixture.rho_phase(p, 0.0, &[0.0, 0.0, 1.0]).unwrap(),
        64.79 / bw,
        max_relative = 1e-12
    );
}

#[test]
fn oil_compositions_are_not_supported() {
    let mixture = spe1();
    for zi in [[1.0, 0.0, 0.0], [0.5, 0.5, 0.0], [0.2, 0.3, 0.5]] {
        assert!(matches!(
            mixture.xi_phase(2000.0, 0.0, &zi),
            Err(FlashError::UnsupportedComposition(_))
        ));
        assert!(matches!(
            mixture.rho_phase(2000.0, 0.0, &zi),
            Err(FlashError::UnsupportedComposition(_))
        ));
    }
    assert!(matches!(
        mixture.gamma_phase_og(2000.0, 0.0, &[0.5, 0.5, 0.0]),
        Err(FlashError::NotSupported(_))
    ));
}

#[test]
fn gravity_terms_match_flash_densities() {
    let mut mixture = spe1();
    let p = 400.0;
    let s = flash_state(mixture.as_mut(), p, &[100.0, 50.0, 50.0]);
    assert_relative_eq!(
        mixture.gamma_phase_o(p, p).unwrap(),
        s.rho[0] * GRAVITY_FACTOR,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        mixture.gamma_phase_g(p).unwrap(),
        s.rho[1] * GRAVITY_FACTOR,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        mixture.gamma_phase_w(p).unwrap(),
        s.rho[2] * GRAVITY_FACTOR,
        max_relative = 1e-12
    );
}

#[test]
fn compressed_oil_is_denser() {
    let mixture = spe1();
    let saturated = mixture.gamma_phase_o(2000.0, 2000.0).unwrap();
    let compressed = mixture.gamma_phase_o(4000.0, 2000.0).unwrap();
    assert!(compressed > saturated);
}

#[test]
fn missing_gas_table() {
    let parameters = load_parameters(vec!["dead gas cap"]).unwrap();
    let mixture = black_oil::mixture(&parameters, 0, FlashOptions::default()).unwrap();
    assert!(!mixture.has_gas_table());
    let err = mixture.gamma_phase_g(2000.0).unwrap_err();
    assert_eq!(err.to_string(), "Table PVDG is missing.");
    assert!(mixture.xi_phase(2000.0, 0.0, &[0.0, 1.0, 0.0]).is_err());
    assert!(mixture.gamma_phase_o(2000.0, 1500.0).is_ok());
}
