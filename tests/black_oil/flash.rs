use super::{flash_state, load_parameters, spe1};
use approx::assert_relative_eq;
use poroflash::black_oil::{self, BlackOilOdgw, PhaseRegime};
use poroflash::{FlashError, FlashHint, FlashOptions, Mixture, MixtureState};

const OIL: usize = 0;
const GAS: usize = 1;
const WATER: usize = 2;

fn assert_consistent(s: &MixtureState) {
    assert_relative_eq!(s.s.sum(), 1.0, max_relative = 1e-14);
    assert_eq!(s.vf, s.v.iter().sum::<f64>());
    for j in 0..3 {
        if s.phase_exist[j] {
            assert_relative_eq!(s.nj[j], s.xi[j] * s.v[j], max_relative = 1e-12);
            assert_relative_eq!(s.xij.row(j).sum(), 1.0, max_relative = 1e-14);
        } else {
            assert_eq!(s.s[j], 0.0);
            assert_eq!(s.v[j], 0.0);
        }
    }
}

#[test]
fn water_only() {
    let mut mixture = spe1();
    let s = flash_state(mixture.as_mut(), 3000.0, &[0.0, 0.0, 100.0]);
    assert_eq!(s.phase_exist.to_vec(), vec![false, false, true]);
    assert_eq!(s.s.to_vec(), vec![0.0, 0.0, 1.0]);
    assert_consistent(&s);
}

#[test]
fn undersaturated_oil() {
    let mut mixture = spe1();
    let s = flash_state(mixture.as_mut(), 3000.0, &[100.0, 5.0, 50.0]);
    assert_eq!(s.phase_exist.to_vec(), vec![true, false, true]);
    assert_eq!(s.nj[OIL], 105.0);
    assert_relative_eq!(s.xij[(OIL, OIL)], 100.0 / 105.0, max_relative = 1e-14);
    assert!(s.s[OIL] > 0.0 && s.s[WATER] > 0.0);
    assert_consistent(&s);
}

#[test]
fn saturated_oil_with_free_gas() {
    let mut mixture = spe1();
    let ni = [100.0, 50.0, 50.0];
    let s = flash_state(mixture.as_mut(), 300.0, &ni);
    assert_eq!(s.phase_exist.to_vec(), vec![true, true, true]);
    assert!(s.s.iter().all(|&s| s > 0.0));
    // all gas is either dissolved in oil or free
    assert_relative_eq!(
        s.nj[OIL] * s.xij[(OIL, GAS)] + s.nj[GAS],
        ni[GAS],
        max_relative = 1e-12
    );
    assert_relative_eq!(s.nj[OIL] * s.xij[(OIL, OIL)], ni[OIL], max_relative = 1e-12);
    assert_consistent(&s);
}

#[test]
fn free_gas_without_oil() {
    let mut mixture = spe1();
    let s = flash_state(mixture.as_mut(), 2300.0, &[0.0, 20.0, 100.0]);
    assert_eq!(s.phase_exist.to_vec(), vec![false, true, true]);
    assert_eq!(s.nj[GAS], 20.0);
    assert_consistent(&s);
}

#[test]
fn repeated_flash_gives_same_state() {
    let mut mixture = spe1();
    let first = flash_state(mixture.as_mut(), 1200.0, &[80.0, 60.0, 30.0]);
    flash_state(mixture.as_mut(), 3000.0, &[100.0, 5.0, 50.0]);
    let second = flash_state(mixture.as_mut(), 1200.0, &[80.0, 60.0, 30.0]);
    assert_eq!(first.s, second.s);
    assert_eq!(first.v, second.v);
    assert_eq!(first.xij, second.xij);
    assert_eq!(first.phase_exist, second.phase_exist);
}

#[test]
fn gas_at_saturation_stays_dissolved() {
    let parameters = load_parameters(vec!["spe1"]).unwrap();
    let rs = parameters.regions[0].oil.as_ref().unwrap().rs_sat(2300.0);
    let mut mixture = BlackOilOdgw::new(parameters, 0).unwrap();
    let s = mixture
        .flash(2300.0, 0.0, &[100.0, 100.0 * rs, 20.0], FlashHint::default())
        .unwrap();
    assert!(!s.phase_exist[GAS]);
    assert_eq!(s.s[GAS], 0.0);
    assert_eq!(mixture.regime(), Some(PhaseRegime::OilWater));
    let s = mixture
        .flash(2300.0, 0.0, &[100.0, 100.0 * rs + 1e-6, 20.0], FlashHint::default())
        .unwrap();
    assert!(s.phase_exist[GAS]);
    assert_eq!(mixture.regime(), Some(PhaseRegime::OilGasWater));
}

#[test]
fn negative_moles() {
    let mut mixture = spe1();
    let err = mixture
        .flash(3000.0, 0.0, &[100.0, -1.0, 50.0], FlashHint::default())
        .unwrap_err();
    assert!(matches!(err, FlashError::NegativeMoles { component: 1, .. }));
    assert!(mixture
        .flash_deriv(3000.0, 0.0, &[-1.0, 1.0, 50.0], FlashHint::default())
        .is_err());
}

#[test]
fn initialization_from_saturations() {
    let cases = [
        (3000.0, 2000.0, [0.0, 0.0, 1.0]),
        (2300.0, 2300.0, [0.0, 0.3, 0.7]),
        (3000.0, 2000.0, [0.8, 0.0, 0.2]),
        (2300.0, 2300.0, [0.6, 0.2, 0.2]),
    ];
    let vpore = 1000.0;
    for (p, pbb, sj) in cases {
        let mut mixture = spe1();
        let init = mixture
            .init_flash(p, pbb, 0.0, &sj, vpore, &[])
            .unwrap()
            .clone();
        assert_relative_eq!(init.vf, vpore, max_relative = 1e-12);
        for j in 0..3 {
            assert_relative_eq!(init.s[j], sj[j], epsilon = 1e-12);
        }
        let ni = init.ni.to_vec();
        let s = flash_state(mixture.as_mut(), p, &ni);
        assert_eq!(s.phase_exist, init.phase_exist);
        for j in 0..3 {
            assert_relative_eq!(s.s[j], init.s[j], epsilon = 1e-10);
        }
    }
}

#[test]
fn undersaturated_initialization_uses_bubble_point() {
    let mut mixture = spe1();
    let s = mixture
        .init_flash(3000.0, 1014.7, 0.0, &[0.8, 0.0, 0.2], 1000.0, &[])
        .unwrap();
    assert_relative_eq!(s.ni[GAS] / s.ni[OIL], 0.371, max_relative = 1e-12);
}

#[test]
fn water_region() {
    let parameters = load_parameters(vec!["aquifer"]).unwrap();
    let mut mixture = black_oil::mixture(&parameters, 0, FlashOptions::default()).unwrap();
    let s = mixture
        .flash(3000.0, 0.0, &[100.0], FlashHint::default())
        .unwrap();
    assert_eq!(s.s[0], 1.0);
    assert_relative_eq!(s.v[0], 5.61458 * 100.0 * 1.005, max_relative = 1e-12);
    assert!(matches!(
        mixture.flash(3000.0, 0.0, &[], FlashHint::default()),
        Err(FlashError::IncompatibleComponents(1, 0))
    ));
}
