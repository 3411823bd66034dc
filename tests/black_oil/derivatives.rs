use super::{flash_deriv_state, flash_state, spe1};
use approx::assert_relative_eq;
use poroflash::{FlashHint, Mixture, MixtureState, PreviousIterate};

const OIL: usize = 0;
const GAS: usize = 1;
const WATER: usize = 2;

/// Saturations followed by the mole fractions, in the row order of `dxs_dxp`.
fn secondary(s: &MixtureState) -> Vec<f64> {
    s.s.iter().chain(s.xij.iter()).copied().collect()
}

/// `x_ij xi_j / mu_j` in the order of the rows of `key_der`.
fn key_values(s: &MixtureState) -> Vec<f64> {
    [(OIL, OIL), (OIL, GAS), (GAS, OIL), (GAS, GAS), (WATER, WATER)]
        .iter()
        .map(|&(j, i)| {
            if s.phase_exist[j] {
                s.xij[(j, i)] * s.xi[j] / s.mu[j]
            } else {
                0.0
            }
        })
        .collect()
}

/// Central differences of `f` with respect to the pressure (`column == 0`)
/// or the moles of component `column - 1`.
fn central_difference<F>(
    mixture: &mut dyn Mixture,
    p: f64,
    ni: &[f64],
    column: usize,
    f: F,
) -> Vec<f64>
where
    F: Fn(&MixtureState) -> Vec<f64>,
{
    let (h, plus, minus) = if column == 0 {
        let h = 1e-3;
        (
            h,
            flash_state(mixture, p + h, ni),
            flash_state(mixture, p - h, ni),
        )
    } else {
        let k = column - 1;
        let h = 1e-6 * ni[k];
        let mut n_plus = ni.to_vec();
        let mut n_minus = ni.to_vec();
        n_plus[k] += h;
        n_minus[k] -= h;
        (
            h,
            flash_state(mixture, p, &n_plus),
            flash_state(mixture, p, &n_minus),
        )
    };
    f(&plus)
        .iter()
        .zip(f(&minus))
        .map(|(a, b)| (a - b) / (2.0 * h))
        .collect()
}

fn check_secondary_derivatives(p: f64, ni: &[f64], columns: &[usize]) {
    let mut mixture = spe1();
    let state = flash_deriv_state(mixture.as_mut(), p, ni);
    for &c in columns {
        let numerical = central_difference(mixture.as_mut(), p, ni, c, secondary);
        for (r, d) in numerical.iter().enumerate() {
            assert_relative_eq!(state.dxs_dxp[(r, c)], *d, max_relative = 1e-4, epsilon = 1e-9);
        }
    }
}

#[test]
fn secondary_derivatives_oil_gas_water() {
    check_secondary_derivatives(400.0, &[100.0, 50.0, 50.0], &[0, 1, 2, 3]);
}

#[test]
fn secondary_derivatives_oil_water() {
    check_secondary_derivatives(3200.0, &[100.0, 40.0, 50.0], &[0, 1, 2, 3]);
}

#[test]
fn secondary_derivatives_gas_water() {
    // without oil, only one-sided mole derivatives exist for the oil component
    check_secondary_derivatives(2300.0, &[0.0, 20.0, 100.0], &[0, 2, 3]);
}

#[test]
fn secondary_derivatives_water() {
    check_secondary_derivatives(3000.0, &[0.0, 0.0, 100.0], &[0, 3]);
}

#[test]
fn saturation_derivatives_sum_to_zero() {
    let cases = [
        (400.0, [100.0, 50.0, 50.0]),
        (3200.0, [100.0, 40.0, 50.0]),
        (2300.0, [0.0, 20.0, 100.0]),
    ];
    let mut mixture = spe1();
    for (p, ni) in cases {
        let s = flash_deriv_state(mixture.as_mut(), p, &ni);
        for c in 0..4 {
            let sum: f64 = (0..3).map(|j| s.dxs_dxp[(j, c)]).sum();
            assert_relative_eq!(sum, 0.0, epsilon = 1e-14);
        }
    }
}

#[test]
fn pressure_derivatives_of_properties() {
    let cases = [(400.0, [100.0, 50.0, 50.0]), (3200.0, [100.0, 40.0, 50.0])];
    let mut mixture = spe1();
    for (p, ni) in cases {
        let s = flash_deriv_state(mixture.as_mut(), p, &ni);
        let mu = central_difference(mixture.as_mut(), p, &ni, 0, |s| s.mu.to_vec());
        let xi = central_difference(mixture.as_mut(), p, &ni, 0, |s| s.xi.to_vec());
        let rho = central_difference(mixture.as_mut(), p, &ni, 0, |s| s.rho.to_vec());
        for j in 0..3 {
            assert_relative_eq!(s.mu_p[j], mu[j], max_relative = 1e-4, epsilon = 1e-12);
            assert_relative_eq!(s.xi_p[j], xi[j], max_relative = 1e-4, epsilon = 1e-12);
            assert_relative_eq!(s.rho_p[j], rho[j], max_relative = 1e-4, epsilon = 1e-12);
        }
    }
}

#[test]
fn mole_derivatives_of_undersaturated_oil() {
    let (p, ni) = (3200.0, [100.0, 40.0, 50.0]);
    let mut mixture = spe1();
    let s = flash_deriv_state(mixture.as_mut(), p, &ni);
    for k in 0..3 {
        let mu = central_difference(mixture.as_mut(), p, &ni, k + 1, |s| s.mu.to_vec());
        let xi = central_difference(mixture.as_mut(), p, &ni, k + 1, |s| s.xi.to_vec());
        let rho = central_difference(mixture.as_mut(), p, &ni, k + 1, |s| s.rho.to_vec());
        assert_relative_eq!(s.mu_n[(OIL, k)], mu[OIL], max_relative = 1e-4, epsilon = 1e-12);
        assert_relative_eq!(s.xi_n[(OIL, k)], xi[OIL], max_relative = 1e-4, epsilon = 1e-12);
        assert_relative_eq!(s.rho_n[(OIL, k)], rho[OIL], max_relative = 1e-4, epsilon = 1e-12);
    }
    assert!(s.mu_n[(OIL, GAS)] != 0.0);
}

#[test]
fn key_derivatives() {
    let cases = [(400.0, [100.0, 50.0, 50.0]), (3200.0, [100.0, 40.0, 50.0])];
    let mut mixture = spe1();
    for (p, ni) in cases {
        let previous = flash_state(mixture.as_mut(), p, &ni);
        let xij: Vec<f64> = previous.xij.iter().copied().collect();
        let phase_exist = previous.phase_exist.to_vec();
        let iterate = PreviousIterate {
            sj: previous.s.as_slice().unwrap(),
            xij: &xij,
            nj: previous.nj.as_slice().unwrap(),
            phase_exist: &phase_exist,
        };
        let s = mixture
            .flash_deriv_n(p, 0.0, &ni, iterate, FlashHint::default())
            .unwrap()
            .clone();
        assert!(s.res.iter().all(|&r| r == 0.0));
        for c in 0..4 {
            let numerical = central_difference(mixture.as_mut(), p, &ni, c, key_values);
            for (r, d) in numerical.iter().enumerate() {
                assert_relative_eq!(s.key_der[(r, c)], *d, max_relative = 1e-4, epsilon = 1e-10);
            }
        }
    }
}

#[test]
fn initialization_with_derivatives() {
    let mut mixture = spe1();
    let init = mixture
        .init_flash_der(2300.0, 2300.0, 0.0, &[0.6, 0.2, 0.2], 1000.0, &[])
        .unwrap()
        .clone();
    let ni = init.ni.to_vec();
    let s = flash_deriv_state(mixture.as_mut(), 2300.0, &ni);
    for (a, b) in init.dxs_dxp.iter().zip(s.dxs_dxp.iter()) {
        assert_relative_eq!(*a, *b, max_relative = 1e-8, epsilon = 1e-14);
    }
    let init = mixture
        .init_flash_der_n(2300.0, 2300.0, 0.0, &[0.6, 0.2, 0.2], 1000.0, &[])
        .unwrap();
    assert!(init.key_der.iter().any(|&k| k != 0.0));
}
