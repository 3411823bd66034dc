use ndarray::{Array1, Array2};

/// Phase state and derivatives produced by the flash calculations of a mixture.
///
/// Every flash call overwrites the fields it is responsible for; quantities
/// of absent phases are zero. Phase-component arrays are indexed
/// `[(phase, component)]`.
///
/// The secondary variables in `dxs_dxp` are ordered as the saturations of
/// all phases followed by the mole fractions `x_ij` in phase-major order.
/// The primary variables are the pressure followed by the moles of all
/// components, i.e. `dxs_dxp[(s, 0)]` is a pressure derivative and
/// `dxs_dxp[(s, 1 + k)]` the derivative with respect to `N_k`.
#[derive(Clone, Debug)]
pub struct MixtureState {
    /// Number of phases
    pub n_phase: usize,
    /// Number of components
    pub n_comp: usize,
    /// Pressure of the last flash
    pub pressure: f64,
    /// Temperature of the last flash
    pub temperature: f64,
    /// Moles of components `N_i`
    pub ni: Array1<f64>,
    /// Total moles `N_t`
    pub nt: f64,
    /// Existence of phases
    pub phase_exist: Array1<bool>,
    /// Saturations
    pub s: Array1<f64>,
    /// Phase volumes
    pub v: Array1<f64>,
    /// Phase moles
    pub nj: Array1<f64>,
    /// Molar densities
    pub xi: Array1<f64>,
    /// Mass densities
    pub rho: Array1<f64>,
    /// Viscosities
    pub mu: Array1<f64>,
    /// Mole fraction of component i in phase j
    pub xij: Array2<f64>,
    /// Total fluid volume
    pub vf: f64,

    /// dVf / dP
    pub vfp: f64,
    /// dVf / dN_i
    pub vfi: Array1<f64>,
    /// dv_j / dP
    pub vjp: Array1<f64>,
    /// dv_j / dN_i
    pub vji: Array2<f64>,
    /// dmu_j / dP
    pub mu_p: Array1<f64>,
    /// dxi_j / dP
    pub xi_p: Array1<f64>,
    /// drho_j / dP
    pub rho_p: Array1<f64>,
    /// dmu_j / dN_i
    pub mu_n: Array2<f64>,
    /// dxi_j / dN_i
    pub xi_n: Array2<f64>,
    /// drho_j / dN_i
    pub rho_n: Array2<f64>,
    /// dmu_j / dx_ij
    pub mux: Array2<f64>,
    /// dxi_j / dx_ij
    pub xix: Array2<f64>,
    /// drho_j / dx_ij
    pub rhox: Array2<f64>,
    /// Derivatives of secondary variables with respect to primary variables
    pub dxs_dxp: Array2<f64>,
    /// Number of components with a varying mole fraction per phase
    pub pe_num_com: Array1<usize>,
    /// Residuals of the phase equilibrium equations
    pub res: Array1<f64>,
    /// Precalculated capillary pressure term of the residual
    pub res_pc: f64,
    /// d(x_ij xi_j / mu_j) / dP and / dN_k, hydrocarbon pairs first, water last
    pub key_der: Array2<f64>,
}

impl MixtureState {
    /// Allocate all buffers for the given number of phases and components.
    pub fn new(n_phase: usize, n_comp: usize) -> Self {
        let n_sec = n_phase + n_phase * n_comp;
        let n_key = (n_phase.max(1) - 1) * (n_comp.max(1) - 1) + 1;
        Self {
            n_phase,
            n_comp,
            pressure: 0.0,
            temperature: 0.0,
            ni: Array1::zeros(n_comp),
            nt: 0.0,
            phase_exist: Array1::from_elem(n_phase, false),
            s: Array1::zeros(n_phase),
            v: Array1::zeros(n_phase),
            nj: Array1::zeros(n_phase),
            xi: Array1::zeros(n_phase),
            rho: Array1::zeros(n_phase),
            mu: Array1::zeros(n_phase),
            xij: Array2::zeros((n_phase, n_comp)),
            vf: 0.0,
            vfp: 0.0,
            vfi: Array1::zeros(n_comp),
            vjp: Array1::zeros(n_phase),
            vji: Array2::zeros((n_phase, n_comp)),
            mu_p: Array1::zeros(n_phase),
            xi_p: Array1::zeros(n_phase),
            rho_p: Array1::zeros(n_phase),
            mu_n: Array2::zeros((n_phase, n_comp)),
            xi_n: Array2::zeros((n_phase, n_comp)),
            rho_n: Array2::zeros((n_phase, n_comp)),
            mux: Array2::zeros((n_phase, n_comp)),
            xix: Array2::zeros((n_phase, n_comp)),
            rhox: Array2::zeros((n_phase, n_comp)),
            dxs_dxp: Array2::zeros((n_sec, n_comp + 1)),
            pe_num_com: Array1::zeros(n_phase),
            res: Array1::zeros(n_sec + 1),
            res_pc: 0.0,
            key_der: Array2::zeros((n_key, n_comp + 1)),
        }
    }

    /// Row of `dxs_dxp` holding the derivatives of `x_ij`.
    pub fn xij_row(&self, j: usize, i: usize) -> usize {
        self.n_phase + j * self.n_comp + i
    }

    /// Reset the phase state before a new flash.
    pub fn reset_phases(&mut self) {
        self.phase_exist.fill(false);
        self.s.fill(0.0);
        self.v.fill(0.0);
        self.nj.fill(0.0);
        self.xi.fill(0.0);
        self.rho.fill(0.0);
        self.mu.fill(0.0);
        self.xij.fill(0.0);
        self.vjp.fill(0.0);
        self.vji.fill(0.0);
    }

    /// Reset all derivative buffers before a new derivative flash.
    pub fn reset_derivatives(&mut self) {
        self.mu_p.fill(0.0);
        self.xi_p.fill(0.0);
        self.rho_p.fill(0.0);
        self.mu_n.fill(0.0);
        self.xi_n.fill(0.0);
        self.rho_n.fill(0.0);
        self.mux.fill(0.0);
        self.xix.fill(0.0);
        self.rhox.fill(0.0);
        self.dxs_dxp.fill(0.0);
        self.pe_num_com.fill(0);
        self.res.fill(0.0);
        self.res_pc = 0.0;
        self.key_der.fill(0.0);
    }

    /// Store the moles of the components and their sum.
    pub fn set_moles(&mut self, ni: &[f64]) {
        self.ni.iter_mut().zip(ni).for_each(|(n, &x)| *n = x);
        self.nt = self.ni.iter().sum();
    }

    /// Saturations as volume fractions of the current phase volumes.
    pub fn update_saturations(&mut self) {
        self.vf = self.v.iter().sum();
        let vf = self.vf;
        self.s.zip_mut_with(&self.v, |s, &v| *s = v / vf);
    }

    /// Saturation derivatives from the phase volume derivatives by the quotient rule
    /// `dS_j = (dv_j - S_j dVf) / Vf`.
    pub fn update_saturation_derivatives(&mut self) {
        let vf = self.vf;
        for j in 0..self.n_phase {
            let sj = self.s[j];
            self.dxs_dxp[(j, 0)] = (self.vjp[j] - sj * self.vfp) / vf;
            for k in 0..self.n_comp {
                self.dxs_dxp[(j, 1 + k)] = (self.vji[(j, k)] - sj * self.vfi[k]) / vf;
            }
        }
    }

    /// Total mole derivatives of the phase properties composed from the
    /// composition derivatives and the composition rows of `dxs_dxp`.
    pub fn update_property_mole_derivatives(&mut self) {
        for j in 0..self.n_phase {
            for k in 0..self.n_comp {
                let (mut dmu, mut dxi, mut drho) = (0.0, 0.0, 0.0);
                for i in 0..self.n_comp {
                    let dx = self.dxs_dxp[(self.xij_row(j, i), 1 + k)];
                    dmu += self.mux[(j, i)] * dx;
                    dxi += self.xix[(j, i)] * dx;
                    drho += self.rhox[(j, i)] * dx;
                }
                self.mu_n[(j, k)] = dmu;
                self.xi_n[(j, k)] = dxi;
                self.rho_n[(j, k)] = drho;
            }
        }
    }

    /// Total pressure derivative of molar density and viscosity of phase `j`.
    fn total_pressure_derivatives(&self, j: usize) -> (f64, f64) {
        let mut dxi = self.xi_p[j];
        let mut dmu = self.mu_p[j];
        for i in 0..self.n_comp {
            let dx = self.dxs_dxp[(self.xij_row(j, i), 0)];
            dxi += self.xix[(j, i)] * dx;
            dmu += self.mux[(j, i)] * dx;
        }
        (dxi, dmu)
    }

    /// Derivatives of `x_ij xi_j / mu_j` for the given (phase, component) pairs.
    ///
    /// Absent phases give zero rows.
    pub fn update_key_derivatives(&mut self, pairs: &[(usize, usize)]) {
        self.key_der.fill(0.0);
        for (r, &(j, i)) in pairs.iter().enumerate() {
            if !self.phase_exist[j] {
                continue;
            }
            let (x, xi, mu) = (self.xij[(j, i)], self.xi[j], self.mu[j]);
            let row = self.xij_row(j, i);
            let (dxi, dmu) = self.total_pressure_derivatives(j);
            let dx = self.dxs_dxp[(row, 0)];
            self.key_der[(r, 0)] = (dx * xi + x * dxi - x * xi * dmu / mu) / mu;
            for k in 0..self.n_comp {
                let dx = self.dxs_dxp[(row, 1 + k)];
                let (dxi, dmu) = (self.xi_n[(j, k)], self.mu_n[(j, k)]);
                self.key_der[(r, 1 + k)] = (dx * xi + x * dxi - x * xi * dmu / mu) / mu;
            }
        }
    }

    /// Name and position of the first non-finite derivative, if any.
    pub fn first_non_finite(&self) -> Option<(&'static str, usize, usize)> {
        let arrays: [(&'static str, &Array2<f64>); 5] = [
            ("dXsdXp", &self.dxs_dxp),
            ("muN", &self.mu_n),
            ("xiN", &self.xi_n),
            ("rhoN", &self.rho_n),
            ("keyDer", &self.key_der),
        ];
        arrays.iter().find_map(|(name, a)| {
            a.indexed_iter()
                .find(|(_, v)| !v.is_finite())
                .map(|((r, c), _)| (*name, r, c))
        })
    }
}
