use super::flash::{FlashProperties, RegimeProperties};
use super::{BlackOilOdgw, GAS, OIL, WATER};
use poroflash_core::consts::{CONV1, MSCF};
use poroflash_core::{FlashError, FlashResult};

impl BlackOilOdgw {
    /// Derivatives of the total and phase volumes with respect to pressure and moles.
    pub(super) fn store_volume_derivatives(&mut self, properties: &FlashProperties) {
        let [no, ng, nw] = properties.ni;
        let w = &properties.water;

        let s = &mut self.state;
        s.vjp.fill(0.0);
        s.vji.fill(0.0);
        let vwp = CONV1 * nw * w.bw_p;
        s.vjp[WATER] = vwp;
        s.vfi[WATER] = CONV1 * w.bw;
        s.vji[(WATER, WATER)] = CONV1 * w.bw;

        match properties.hydrocarbon {
            RegimeProperties::Water { oil, gas } => {
                s.vfp = vwp;
                s.vfi[OIL] = CONV1 * oil.bo;
                // incipient phases
                s.vji[(OIL, OIL)] = CONV1 * oil.bo;
                // without PVDG incipient gas has no volume
                if let Some(gas) = gas {
                    let bg = gas.scaled_bg();
                    s.vfi[OIL] -= MSCF * oil.rs * bg;
                    s.vfi[GAS] = MSCF * bg;
                    s.vji[(GAS, GAS)] = MSCF * bg;
                } else {
                    s.vfi[GAS] = 0.0;
                }
            }
            RegimeProperties::GasWater { oil, gas } => {
                let (bg, bg_p) = (gas.scaled_bg(), gas.scaled_bg_p());
                let vgp = MSCF * ng * bg_p;
                s.vfp = vgp + vwp;
                s.vjp[GAS] = vgp;
                s.vfi[OIL] = CONV1 * oil.bo - MSCF * oil.rs * bg;
                s.vfi[GAS] = MSCF * bg;
                s.vji[(OIL, OIL)] = CONV1 * oil.bo;
                s.vji[(GAS, OIL)] = -MSCF * oil.rs * bg;
                s.vji[(GAS, GAS)] = MSCF * bg;
            }
            RegimeProperties::OilWater { oil } => {
                let vop = CONV1 * no * oil.bo_p;
                s.vfp = vop + vwp;
                s.vjp[OIL] = vop;
                s.vfi[OIL] = CONV1 * (oil.bo - oil.bo_rs * oil.rs);
                s.vfi[GAS] = CONV1 * oil.bo_rs;
                s.vji[(OIL, OIL)] = s.vfi[OIL];
                s.vji[(OIL, GAS)] = s.vfi[GAS];
            }
            RegimeProperties::OilGasWater { oil, gas } => {
                let (bg, bg_p) = (gas.scaled_bg(), gas.scaled_bg_p());
                let vop = CONV1 * no * oil.bo_p;
                let vgp = MSCF * ((ng - oil.rs * no) * bg_p - no * bg * oil.rs_p);
                s.vfp = vop + vgp + vwp;
                s.vjp[OIL] = vop;
                s.vjp[GAS] = vgp;
                s.vfi[OIL] = CONV1 * oil.bo - MSCF * oil.rs * bg;
                s.vfi[GAS] = MSCF * bg;
                s.vji[(OIL, OIL)] = CONV1 * oil.bo;
                s.vji[(GAS, OIL)] = -MSCF * oil.rs * bg;
                s.vji[(GAS, GAS)] = MSCF * bg;
            }
        }
    }

    /// Property derivatives and the derivatives of the secondary variables
    /// for the phases stored by the last flash.
    pub(super) fn store_derivatives(&mut self, properties: &FlashProperties) -> FlashResult<()> {
        let density = self.fluid().density;
        let [no, ng, _] = properties.ni;
        let w = &properties.water;

        let s = &mut self.state;
        s.reset_derivatives();
        s.mu_p[WATER] = w.mu_p;
        s.xi_p[WATER] = w.xi_p();
        s.rho_p[WATER] = w.rho_p(&density);

        let (r_oo, r_og) = (s.xij_row(OIL, OIL), s.xij_row(OIL, GAS));
        match properties.hydrocarbon {
            RegimeProperties::Water { .. } => (),
            RegimeProperties::GasWater { gas, .. } => {
                s.mu_p[GAS] = gas.mu_p;
                s.xi_p[GAS] = gas.xi_p();
                s.rho_p[GAS] = gas.rho_p(&density);
            }
            RegimeProperties::OilWater { oil } => {
                s.mu_p[OIL] = oil.mu_p;
                s.xi_p[OIL] = oil.xi_p();
                s.rho_p[OIL] = oil.rho_p(&density);

                let nh = no + ng;
                let nh2 = nh * nh;
                s.dxs_dxp[(r_oo, 1 + OIL)] = ng / nh2;
                s.dxs_dxp[(r_oo, 1 + GAS)] = -no / nh2;
                s.dxs_dxp[(r_og, 1 + OIL)] = -ng / nh2;
                s.dxs_dxp[(r_og, 1 + GAS)] = no / nh2;

                // the oil properties depend on the composition via Rs = x_og / x_oo
                let (x_oo, x_og) = (s.xij[(OIL, OIL)], s.xij[(OIL, GAS)]);
                let (drs_oo, drs_og) = (-x_og / (x_oo * x_oo), 1.0 / x_oo);
                let (mu_rs, xi_rs, rho_rs) = (oil.mu_rs, oil.xi_rs(), oil.rho_rs(&density));
                s.mux[(OIL, OIL)] = mu_rs * drs_oo;
                s.mux[(OIL, GAS)] = mu_rs * drs_og;
                s.xix[(OIL, OIL)] = xi_rs * drs_oo;
                s.xix[(OIL, GAS)] = xi_rs * drs_og;
                s.rhox[(OIL, OIL)] = rho_rs * drs_oo;
                s.rhox[(OIL, GAS)] = rho_rs * drs_og;
                s.pe_num_com[OIL] = 2;
            }
            RegimeProperties::OilGasWater { oil, gas } => {
                // saturated oil properties depend on pressure only
                s.mu_p[OIL] = oil.mu_p;
                s.xi_p[OIL] = oil.xi_p();
                s.rho_p[OIL] = oil.rho_p(&density);
                s.mu_p[GAS] = gas.mu_p;
                s.xi_p[GAS] = gas.xi_p();
                s.rho_p[GAS] = gas.rho_p(&density);

                let dx = -oil.rs_p / ((1.0 + oil.rs) * (1.0 + oil.rs));
                s.dxs_dxp[(r_oo, 0)] = dx;
                s.dxs_dxp[(r_og, 0)] = -dx;
                s.pe_num_com[OIL] = 2;
            }
        }

        s.update_saturation_derivatives();
        s.update_property_mole_derivatives();
        self.check_finite()
    }

    /// Reject non-finite derivatives if checks are enabled.
    pub(super) fn check_finite(&self) -> FlashResult<()> {
        let (checks, _) = self.options.unwrap_or_default_checks();
        if !checks {
            return Ok(());
        }
        match self.state.first_non_finite() {
            Some((name, i, j)) => Err(FlashError::NonFiniteDerivative(format!(
                "{}[{}][{}] in region {}",
                name, i, j, self.region
            ))),
            None => Ok(()),
        }
    }
}
