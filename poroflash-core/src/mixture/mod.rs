//! The interface shared by all fluid models.
//!
//! A [Mixture] owns a [MixtureState] and performs the flash calculations
//! of one grid cell (or of one prototype cell that is reused for all
//! cells of a fluid region). Every flash call returns a read-only view
//! of the updated state.
use crate::errors::{FlashError, FlashResult};
use std::fmt;

mod state;
pub use state::MixtureState;

/// The fluid model realized by a mixture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MixtureType {
    /// Black oil model with water only.
    BlackOilWater,
    /// Black oil model with oil, dissolved gas, free gas and water.
    BlackOilOdgw,
}

impl fmt::Display for MixtureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlackOilWater => write!(f, "black oil (W)"),
            Self::BlackOilOdgw => write!(f, "black oil (ODGW)"),
        }
    }
}

/// Information from the previous nonlinear iteration that iterative
/// phase split calculations use as initial guess.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlashHint<'a> {
    /// Flash type used in the last iteration.
    pub ftype: usize,
    /// Number of phases found in the last iteration.
    pub last_np: usize,
    /// Equilibrium ratios of the last iteration.
    pub last_ks: Option<&'a [f64]>,
}

/// State of the previous nonlinear iteration a derivative flash is linearized around.
#[derive(Clone, Copy, Debug)]
pub struct PreviousIterate<'a> {
    /// Saturations
    pub sj: &'a [f64],
    /// Mole fractions, phase-major
    pub xij: &'a [f64],
    /// Phase moles
    pub nj: &'a [f64],
    /// Existence of phases
    pub phase_exist: &'a [bool],
}

/// Iteration statistics of phase split calculations.
///
/// Models without an iterative phase split report the default values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlashDiagnostics {
    pub ftype: usize,
    pub min_eigen_skip: f64,
    pub flag_skip: bool,
    pub surface_tension: f64,
    pub error_pec: f64,
    pub ssm_stability_iters: u64,
    pub nr_stability_iters: u64,
    pub ssm_split_iters: u64,
    pub nr_split_iters: u64,
    pub rr_iters: u64,
    pub ssm_stability_counts: u64,
    pub nr_stability_counts: u64,
    pub ssm_split_counts: u64,
    pub nr_split_counts: u64,
    pub rr_counts: u64,
}

/// Check that no component has negative moles.
pub fn check_moles(ni: &[f64]) -> FlashResult<()> {
    match ni.iter().position(|&n| n < 0.0) {
        Some(component) => Err(FlashError::NegativeMoles {
            component,
            value: ni[component],
        }),
        None => Ok(()),
    }
}

/// Flash calculations and phase property queries of a fluid model.
///
/// Pressures are in psia. Temperatures are part of the interface for
/// compositional models and may be ignored by black oil models.
pub trait Mixture: Send {
    /// The fluid model realized by the mixture.
    fn mixture_type(&self) -> MixtureType;

    /// The state of the last flash calculation.
    fn state(&self) -> &MixtureState;

    /// Number of phases.
    fn n_phase(&self) -> usize {
        self.state().n_phase
    }

    /// Number of components.
    fn n_comp(&self) -> usize {
        self.state().n_comp
    }

    /// Whether a dry gas table is available.
    fn has_gas_table(&self) -> bool {
        false
    }

    /// Flash calculation from the saturations of the phases in a pore volume `vpore`.
    fn init_flash(
        &mut self,
        p: f64,
        pbb: f64,
        t: f64,
        sj: &[f64],
        vpore: f64,
        zi: &[f64],
    ) -> FlashResult<&MixtureState>;

    /// [Mixture::init_flash] followed by the calculation of all derivatives.
    fn init_flash_der(
        &mut self,
        p: f64,
        pbb: f64,
        t: f64,
        sj: &[f64],
        vpore: f64,
        zi: &[f64],
    ) -> FlashResult<&MixtureState>;

    /// [Mixture::init_flash] followed by [Mixture::flash_deriv_n] around the initial state.
    fn init_flash_der_n(
        &mut self,
        p: f64,
        pbb: f64,
        t: f64,
        sj: &[f64],
        vpore: f64,
        zi: &[f64],
    ) -> FlashResult<&MixtureState>;

    /// Flash calculation from the moles of the components.
    fn flash(&mut self, p: f64, t: f64, ni: &[f64], hint: FlashHint)
        -> FlashResult<&MixtureState>;

    /// Flash calculation from the moles of the components including all derivatives.
    fn flash_deriv(
        &mut self,
        p: f64,
        t: f64,
        ni: &[f64],
        hint: FlashHint,
    ) -> FlashResult<&MixtureState>;

    /// Derivative flash linearized around the previous nonlinear iterate.
    fn flash_deriv_n(
        &mut self,
        p: f64,
        t: f64,
        ni: &[f64],
        previous: PreviousIterate,
        hint: FlashHint,
    ) -> FlashResult<&MixtureState>;

    /// Molar density of a single phase fluid with composition `zi`.
    fn xi_phase(&self, p: f64, t: f64, zi: &[f64]) -> FlashResult<f64>;

    /// Mass density of a single phase fluid with composition `zi`.
    fn rho_phase(&self, p: f64, t: f64, zi: &[f64]) -> FlashResult<f64>;

    /// Mass density of oil times the gravity factor for a bubble point pressure `pbb`.
    fn gamma_phase_o(&self, p: f64, pbb: f64) -> FlashResult<f64>;

    /// Mass density of water times the gravity factor.
    fn gamma_phase_w(&self, p: f64) -> FlashResult<f64>;

    /// Mass density of gas times the gravity factor.
    fn gamma_phase_g(&self, p: f64) -> FlashResult<f64>;

    /// Mass density of the hydrocarbon mixture times the gravity factor.
    fn gamma_phase_og(&self, p: f64, t: f64, zi: &[f64]) -> FlashResult<f64>;

    /// Iteration statistics of the last phase split.
    fn diagnostics(&self) -> FlashDiagnostics {
        FlashDiagnostics::default()
    }

    /// Check that no component has negative moles.
    fn check_ni(&self, ni: &[f64]) -> FlashResult<()> {
        check_moles(ni)
    }
}
