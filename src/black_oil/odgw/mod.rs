use super::parameters::{BlackOilParameters, BlackOilRegion};
use super::pvt::{DryGasPvt, LiveOilPvt};
use poroflash_core::consts::{CONV1, MSCF, TINY};
use poroflash_core::parameter::ParameterError;
use poroflash_core::{
    check_moles, log_iter, log_result, FlashError, FlashHint, FlashOptions, FlashResult, Mixture,
    MixtureState, MixtureType, PreviousIterate,
};
use std::fmt;
use std::sync::Arc;

mod derivatives;
mod flash;

pub(crate) const OIL: usize = 0;
pub(crate) const GAS: usize = 1;
pub(crate) const WATER: usize = 2;

/// Derivatives of `x_ij xi_j / mu_j` returned by [Mixture::flash_deriv_n].
const KEY_PAIRS: [(usize, usize); 5] = [
    (OIL, OIL),
    (OIL, GAS),
    (GAS, OIL),
    (GAS, GAS),
    (WATER, WATER),
];

/// The phases present in a black oil cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseRegime {
    /// Water only.
    Water,
    /// Free gas and water.
    GasWater,
    /// Undersaturated oil and water.
    OilWater,
    /// Saturated oil, free gas and water.
    OilGasWater,
}

impl PhaseRegime {
    /// Phase regime for the moles of oil, gas and water.
    ///
    /// Oil is undersaturated as long as the gas fits into the oil at the
    /// saturated solution gas ratio `rs_sat`.
    pub fn from_moles(ni: &[f64], rs_sat: f64) -> Self {
        let nt: f64 = ni.iter().sum();
        let undersaturated = ni[GAS] <= ni[OIL] * rs_sat;
        match (ni[OIL] < nt * TINY, undersaturated) {
            (true, true) => Self::Water,
            (true, false) => Self::GasWater,
            (false, true) => Self::OilWater,
            (false, false) => Self::OilGasWater,
        }
    }

    /// Phase regime for the saturations of oil, gas and water.
    pub fn from_saturations(sj: &[f64]) -> Self {
        let no_oil = 1.0 - sj[GAS] - sj[WATER] < TINY;
        let no_gas = sj[GAS] < TINY;
        match (no_oil, no_gas) {
            (true, true) => Self::Water,
            (true, false) => Self::GasWater,
            (false, true) => Self::OilWater,
            (false, false) => Self::OilGasWater,
        }
    }

    /// Existence of oil, gas and water.
    pub fn phase_exist(&self) -> [bool; 3] {
        match self {
            Self::Water => [false, false, true],
            Self::GasWater => [false, true, true],
            Self::OilWater => [true, false, true],
            Self::OilGasWater => [true, true, true],
        }
    }
}

impl fmt::Display for PhaseRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Water => write!(f, "W"),
            Self::GasWater => write!(f, "GW"),
            Self::OilWater => write!(f, "OW"),
            Self::OilGasWater => write!(f, "ODGW"),
        }
    }
}

/// Black oil mixture of oil, dissolved and free gas and water.
///
/// The components are stock tank oil (stb), gas (Mscf) and water (stb);
/// the phases are oil, gas and water, in that order.
pub struct BlackOilOdgw {
    parameters: Arc<BlackOilParameters>,
    region: usize,
    options: FlashOptions,
    state: MixtureState,
    regime: Option<PhaseRegime>,
}

impl BlackOilOdgw {
    pub fn new(parameters: Arc<BlackOilParameters>, region: usize) -> FlashResult<Self> {
        Self::with_options(parameters, region, FlashOptions::default())
    }

    /// Create the mixture of a fluid region. The region needs a PVCO table.
    pub fn with_options(
        parameters: Arc<BlackOilParameters>,
        region: usize,
        options: FlashOptions,
    ) -> FlashResult<Self> {
        let fluid = parameters.regions.get(region).ok_or_else(|| {
            ParameterError::RegionsNotFound(format!(
                "region {} of {}",
                region,
                parameters.regions.len()
            ))
        })?;
        if fluid.oil.is_none() {
            return Err(FlashError::MissingTable("PVCO".to_string()));
        }
        Ok(Self {
            parameters,
            region,
            options,
            state: MixtureState::new(3, 3),
            regime: None,
        })
    }

    /// Phase regime of the last flash.
    pub fn regime(&self) -> Option<PhaseRegime> {
        self.regime
    }

    fn fluid(&self) -> &BlackOilRegion {
        &self.parameters.regions[self.region]
    }

    fn oil(&self) -> FlashResult<&LiveOilPvt> {
        self.fluid()
            .oil
            .as_ref()
            .ok_or_else(|| FlashError::MissingTable("PVCO".to_string()))
    }

    fn gas(&self) -> FlashResult<&DryGasPvt> {
        self.fluid()
            .gas
            .as_ref()
            .ok_or_else(|| FlashError::MissingTable("PVDG".to_string()))
    }

    fn check_len(&self, x: &[f64]) -> FlashResult<()> {
        if x.len() != 3 {
            return Err(FlashError::IncompatibleComponents(3, x.len()));
        }
        Ok(())
    }

    fn log_regime(&mut self, regime: PhaseRegime) {
        let verbosity = self.options.verbosity;
        let s = &self.state;
        log_iter!(
            verbosity,
            " {:>4} | P = {:12.4} | N = [{:12.6e}, {:12.6e}, {:12.6e}]",
            regime,
            s.pressure,
            s.ni[OIL],
            s.ni[GAS],
            s.ni[WATER]
        );
        if let Some(old) = self.regime.filter(|&old| old != regime) {
            log_result!(
                verbosity,
                "Region {}: phase regime changed from {} to {} at P = {}",
                self.region,
                old,
                regime,
                s.pressure
            );
        }
        self.regime = Some(regime);
    }
}

impl fmt::Display for BlackOilOdgw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BlackOilOdgw(region={}, gas table={})",
            self.parameters.records[self.region].name,
            self.has_gas_table()
        )
    }
}

impl Mixture for BlackOilOdgw {
    fn mixture_type(&self) -> MixtureType {
        MixtureType::BlackOilOdgw
    }

    fn state(&self) -> &MixtureState {
        &self.state
    }

    fn has_gas_table(&self) -> bool {
        self.fluid().gas.is_some()
    }

    fn init_flash(
        &mut self,
        p: f64,
        pbb: f64,
        t: f64,
        sj: &[f64],
        vpore: f64,
        _zi: &[f64],
    ) -> FlashResult<&MixtureState> {
        self.check_len(sj)?;
        let properties = self.initial_properties(p, pbb, sj, vpore)?;
        self.store_phases(t, &properties)?;
        Ok(&self.state)
    }

    fn init_flash_der(
        &mut self,
        p: f64,
        pbb: f64,
        t: f64,
        sj: &[f64],
        vpore: f64,
        _zi: &[f64],
    ) -> FlashResult<&MixtureState> {
        self.check_len(sj)?;
        let properties = self.initial_properties(p, pbb, sj, vpore)?;
        self.store_phases(t, &properties)?;
        self.store_derivatives(&properties)?;
        Ok(&self.state)
    }

    fn init_flash_der_n(
        &mut self,
        p: f64,
        pbb: f64,
        t: f64,
        sj: &[f64],
        vpore: f64,
        zi: &[f64],
    ) -> FlashResult<&MixtureState> {
        self.init_flash_der(p, pbb, t, sj, vpore, zi)?;
        self.state.update_key_derivatives(&KEY_PAIRS);
        self.check_finite()?;
        Ok(&self.state)
    }

    fn flash(
        &mut self,
        p: f64,
        t: f64,
        ni: &[f64],
        _hint: FlashHint,
    ) -> FlashResult<&MixtureState> {
        self.check_len(ni)?;
        check_moles(ni)?;
        let properties = self.evaluate(p, ni)?;
        self.store_phases(t, &properties)?;
        Ok(&self.state)
    }

    fn flash_deriv(
        &mut self,
        p: f64,
        t: f64,
        ni: &[f64],
        _hint: FlashHint,
    ) -> FlashResult<&MixtureState> {
        self.check_len(ni)?;
        check_moles(ni)?;
        let properties = self.evaluate(p, ni)?;
        self.store_phases(t, &properties)?;
        self.store_derivatives(&properties)?;
        Ok(&self.state)
    }

    fn flash_deriv_n(
        &mut self,
        p: f64,
        t: f64,
        ni: &[f64],
        _previous: PreviousIterate,
        hint: FlashHint,
    ) -> FlashResult<&MixtureState> {
        self.flash_deriv(p, t, ni, hint)?;
        self.state.update_key_derivatives(&KEY_PAIRS);
        self.check_finite()?;
        Ok(&self.state)
    }

    fn xi_phase(&self, p: f64, _t: f64, zi: &[f64]) -> FlashResult<f64> {
        self.check_len(zi)?;
        if zi[GAS] > 1.0 - TINY {
            Ok(self.gas()?.eval(p).xi())
        } else if zi[WATER] > 1.0 - TINY {
            Ok(self.fluid().water.eval(p).xi())
        } else {
            Err(FlashError::UnsupportedComposition(format!("{:?}", zi)))
        }
    }

    fn rho_phase(&self, p: f64, _t: f64, zi: &[f64]) -> FlashResult<f64> {
        self.check_len(zi)?;
        let density = &self.fluid().density;
        if zi[GAS] > 1.0 - TINY {
            Ok(self.gas()?.eval(p).rho(density))
        } else if zi[WATER] > 1.0 - TINY {
            Ok(self.fluid().water.eval(p).rho(density))
        } else {
            Err(FlashError::UnsupportedComposition(format!("{:?}", zi)))
        }
    }

    fn gamma_phase_o(&self, p: f64, pbb: f64) -> FlashResult<f64> {
        let o = self.oil()?.at_bubble_point(pbb, p);
        let density = &self.fluid().density;
        Ok((density.gamma_oil() + MSCF / CONV1 * o.rs * density.gamma_gas()) / o.bo)
    }

    fn gamma_phase_w(&self, p: f64) -> FlashResult<f64> {
        Ok(self.fluid().density.gamma_water() / self.fluid().water.eval(p).bw)
    }

    fn gamma_phase_g(&self, p: f64) -> FlashResult<f64> {
        let g = self.gas()?.eval(p);
        Ok(self.fluid().density.gamma_gas() / g.scaled_bg())
    }

    fn gamma_phase_og(&self, _p: f64, _t: f64, _zi: &[f64]) -> FlashResult<f64> {
        Err(FlashError::NotSupported("gamma_phase_og".to_string()))
    }
}
