use super::parameters::{BlackOilParameters, BlackOilRegion};
use poroflash_core::consts::CONV1;
use poroflash_core::parameter::ParameterError;
use poroflash_core::{
    check_moles, log_iter, FlashError, FlashHint, FlashOptions, FlashResult, Mixture,
    MixtureState, MixtureType, PreviousIterate,
};
use std::sync::Arc;

/// Black oil mixture of a region that only contains water.
pub struct BlackOilWater {
    parameters: Arc<BlackOilParameters>,
    region: usize,
    options: FlashOptions,
    state: MixtureState,
}

impl BlackOilWater {
    pub fn new(parameters: Arc<BlackOilParameters>, region: usize) -> FlashResult<Self> {
        Self::with_options(parameters, region, FlashOptions::default())
    }

    pub fn with_options(
        parameters: Arc<BlackOilParameters>,
        region: usize,
        options: FlashOptions,
    ) -> FlashResult<Self> {
        if region >= parameters.regions.len() {
            return Err(ParameterError::RegionsNotFound(format!(
                "region {} of {}",
                region,
                parameters.regions.len()
            ))
            .into());
        }
        Ok(Self {
            parameters,
            region,
            options,
            state: MixtureState::new(1, 1),
        })
    }

    fn fluid(&self) -> &BlackOilRegion {
        &self.parameters.regions[self.region]
    }

    fn check_len(&self, x: &[f64]) -> FlashResult<()> {
        if x.is_empty() {
            return Err(FlashError::IncompatibleComponents(1, 0));
        }
        Ok(())
    }

    fn store(&mut self, p: f64, t: f64, nw: f64, derivatives: bool) -> FlashResult<()> {
        let w = self.fluid().water.eval(p);
        let density = self.fluid().density;
        let s = &mut self.state;
        s.reset_phases();
        s.pressure = p;
        s.temperature = t;
        s.set_moles(&[nw]);
        s.phase_exist[0] = true;
        s.v[0] = CONV1 * nw * w.bw;
        s.nj[0] = nw;
        s.xi[0] = w.xi();
        s.rho[0] = w.rho(&density);
        s.mu[0] = w.mu;
        s.xij[(0, 0)] = 1.0;
        s.update_saturations();
        s.vfp = CONV1 * nw * w.bw_p;
        s.vjp[0] = s.vfp;
        s.vfi[0] = CONV1 * w.bw;
        s.vji[(0, 0)] = s.vfi[0];
        log_iter!(
            self.options.verbosity,
            "    W | P = {:12.4} | N = [{:12.6e}]",
            p,
            nw
        );
        if !derivatives {
            return Ok(());
        }

        let s = &mut self.state;
        s.reset_derivatives();
        s.mu_p[0] = w.mu_p;
        s.xi_p[0] = w.xi_p();
        s.rho_p[0] = w.rho_p(&density);
        s.update_saturation_derivatives();
        s.update_property_mole_derivatives();
        s.update_key_derivatives(&[(0, 0)]);

        let (checks, _) = self.options.unwrap_or_default_checks();
        if let Some((name, i, j)) = self.state.first_non_finite().filter(|_| checks) {
            return Err(FlashError::NonFiniteDerivative(format!(
                "{}[{}][{}] in region {}",
                name, i, j, self.region
            )));
        }
        Ok(())
    }
}

impl Mixture for BlackOilWater {
    fn mixture_type(&self) -> MixtureType {
        MixtureType::BlackOilWater
    }

    fn state(&self) -> &MixtureState {
        &self.state
    }

    fn init_flash(
        &mut self,
        p: f64,
        _pbb: f64,
        t: f64,
        sj: &[f64],
        vpore: f64,
        _zi: &[f64],
    ) -> FlashResult<&MixtureState> {
        self.check_len(sj)?;
        let nw = vpore * sj[0] * self.fluid().water.eval(p).xi();
        self.store(p, t, nw, false)?;
        Ok(&self.state)
    }

    fn init_flash_der(
        &mut self,
        p: f64,
        _pbb: f64,
        t: f64,
        sj: &[f64],
        vpore: f64,
        _zi: &[f64],
    ) -> FlashResult<&MixtureState> {
        self.check_len(sj)?;
        let nw = vpore * sj[0] * self.fluid().water.eval(p).xi();
        self.store(p, t, nw, true)?;
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
        self.init_flash_der(p, pbb, t, sj, vpore, zi)
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
        self.store(p, t, ni[0], false)?;
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
        self.store(p, t, ni[0], true)?;
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
        self.flash_deriv(p, t, ni, hint)
    }

    fn xi_phase(&self, p: f64, _t: f64, _zi: &[f64]) -> FlashResult<f64> {
        Ok(self.fluid().water.eval(p).xi())
    }

    fn rho_phase(&self, p: f64, _t: f64, _zi: &[f64]) -> FlashResult<f64> {
        Ok(self.fluid().water.eval(p).rho(&self.fluid().density))
    }

    fn gamma_phase_o(&self, _p: f64, _pbb: f64) -> FlashResult<f64> {
        Err(FlashError::MissingTable("PVCO".to_string()))
    }

    fn gamma_phase_w(&self, p: f64) -> FlashResult<f64> {
        Ok(self.fluid().density.gamma_water() / self.fluid().water.eval(p).bw)
    }

    fn gamma_phase_g(&self, _p: f64) -> FlashResult<f64> {
        Err(FlashError::MissingTable("PVDG".to_string()))
    }

    fn gamma_phase_og(&self, _p: f64, _t: f64, _zi: &[f64]) -> FlashResult<f64> {
        Err(FlashError::NotSupported("gamma_phase_og".to_string()))
    }
}
