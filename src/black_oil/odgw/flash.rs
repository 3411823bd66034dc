use super::{BlackOilOdgw, PhaseRegime, GAS, OIL, WATER};
use crate::black_oil::parameters::SurfaceDensity;
use crate::black_oil::pvt::{GasProperties, SaturatedOil, UndersaturatedOil, WaterProperties};
use poroflash_core::consts::{CONV1, MSCF};
use poroflash_core::{check_moles, FlashError, FlashResult, MixtureState};

/// Hydrocarbon PVT properties of a phase regime.
///
/// Oil is evaluated at saturation whenever free gas can exist (and in
/// the water regime, where the saturated state describes incipient oil).
/// Incipient gas in the water regime is only described if a PVDG table
/// is available.
#[derive(Clone, Copy, Debug)]
pub(super) enum RegimeProperties {
    Water {
        oil: SaturatedOil,
        gas: Option<GasProperties>,
    },
    GasWater {
        oil: SaturatedOil,
        gas: GasProperties,
    },
    OilWater {
        oil: UndersaturatedOil,
    },
    OilGasWater {
        oil: SaturatedOil,
        gas: GasProperties,
    },
}

impl RegimeProperties {
    pub(super) fn regime(&self) -> PhaseRegime {
        match self {
            Self::Water { .. } => PhaseRegime::Water,
            Self::GasWater { .. } => PhaseRegime::GasWater,
            Self::OilWater { .. } => PhaseRegime::OilWater,
            Self::OilGasWater { .. } => PhaseRegime::OilGasWater,
        }
    }
}

/// Everything a flash needs to fill the mixture state.
#[derive(Clone, Copy, Debug)]
pub(super) struct FlashProperties {
    pub p: f64,
    pub ni: [f64; 3],
    pub water: WaterProperties,
    pub hydrocarbon: RegimeProperties,
}

impl BlackOilOdgw {
    /// PVT properties for the moles `ni` at pressure `p`.
    pub(super) fn evaluate(&self, p: f64, ni: &[f64]) -> FlashResult<FlashProperties> {
        let oil = self.oil()?;
        let saturated = oil.saturated(p);
        let hydrocarbon = match PhaseRegime::from_moles(ni, saturated.rs) {
            PhaseRegime::Water => RegimeProperties::Water {
                oil: saturated,
                gas: self.fluid().gas.as_ref().map(|g| g.eval(p)),
            },
            PhaseRegime::GasWater => RegimeProperties::GasWater {
                oil: saturated,
                gas: self.gas()?.eval(p),
            },
            PhaseRegime::OilWater => RegimeProperties::OilWater {
                oil: oil.undersaturated(ni[GAS] / ni[OIL], p),
            },
            PhaseRegime::OilGasWater => RegimeProperties::OilGasWater {
                oil: saturated,
                gas: self.gas()?.eval(p),
            },
        };
        Ok(FlashProperties {
            p,
            ni: [ni[OIL], ni[GAS], ni[WATER]],
            water: self.fluid().water.eval(p),
            hydrocarbon,
        })
    }

    /// PVT properties and moles that fill the pore volume `vpore` with the
    /// saturations `sj`. Undersaturated oil has the bubble point `pbb`.
    pub(super) fn initial_properties(
        &self,
        p: f64,
        pbb: f64,
        sj: &[f64],
        vpore: f64,
    ) -> FlashResult<FlashProperties> {
        let oil = self.oil()?;
        let water = self.fluid().water.eval(p);
        let (sg, sw) = (sj[GAS], sj[WATER]);
        let so = 1.0 - sg - sw;
        let nw = vpore * sw * water.xi();

        let (ni, hydrocarbon) = match PhaseRegime::from_saturations(sj) {
            PhaseRegime::Water => {
                let gas = self.fluid().gas.as_ref().map(|g| g.eval(p));
                let oil = oil.saturated(p);
                ([0.0, 0.0, nw], RegimeProperties::Water { oil, gas })
            }
            PhaseRegime::GasWater => {
                let gas = self.gas()?.eval(p);
                let oil = oil.saturated(p);
                let ng = vpore * sg * gas.xi();
                ([0.0, ng, nw], RegimeProperties::GasWater { oil, gas })
            }
            PhaseRegime::OilWater => {
                let oil = oil.at_bubble_point(pbb, p);
                let no = vpore * so / (CONV1 * oil.bo);
                ([no, no * oil.rs, nw], RegimeProperties::OilWater { oil })
            }
            PhaseRegime::OilGasWater => {
                let gas = self.gas()?.eval(p);
                let oil = oil.saturated(p);
                let no = vpore * so / (CONV1 * oil.bo);
                let ng = vpore * sg / (gas.scaled_bg() * MSCF) + no * oil.rs;
                ([no, ng, nw], RegimeProperties::OilGasWater { oil, gas })
            }
        };
        check_moles(&ni)?;
        Ok(FlashProperties {
            p,
            ni,
            water,
            hydrocarbon,
        })
    }

    /// Phase volumes, amounts, compositions and properties together with
    /// the volume derivatives.
    pub(super) fn store_phases(
        &mut self,
        t: f64,
        properties: &FlashProperties,
    ) -> FlashResult<()> {
        let (checks, _) = self.options.unwrap_or_default_checks();
        let density = self.fluid().density;
        let regime = properties.hydrocarbon.regime();
        let [no, ng, nw] = properties.ni;
        let w = &properties.water;

        let s = &mut self.state;
        s.reset_phases();
        s.pressure = properties.p;
        s.temperature = t;
        s.set_moles(&properties.ni);
        for (j, exist) in regime.phase_exist().into_iter().enumerate() {
            s.phase_exist[j] = exist;
        }

        s.v[WATER] = CONV1 * nw * w.bw;
        s.nj[WATER] = nw;
        s.xi[WATER] = w.xi();
        s.rho[WATER] = w.rho(&density);
        s.mu[WATER] = w.mu;
        s.xij[(WATER, WATER)] = 1.0;

        match properties.hydrocarbon {
            RegimeProperties::Water { .. } => (),
            RegimeProperties::GasWater { oil, gas } => {
                store_free_gas(s, ng - oil.rs * no, &gas, &density, checks)?;
            }
            RegimeProperties::OilWater { oil } => {
                s.v[OIL] = CONV1 * no * oil.bo;
                s.nj[OIL] = no + ng;
                s.xi[OIL] = oil.xi();
                s.rho[OIL] = oil.rho(&density);
                s.mu[OIL] = oil.mu;
                s.xij[(OIL, OIL)] = no / (no + ng);
                s.xij[(OIL, GAS)] = 1.0 - s.xij[(OIL, OIL)];
            }
            RegimeProperties::OilGasWater { oil, gas } => {
                s.v[OIL] = CONV1 * no * oil.bo;
                s.nj[OIL] = no * (1.0 + oil.rs);
                s.xi[OIL] = oil.xi();
                s.rho[OIL] = oil.rho(&density);
                s.mu[OIL] = oil.mu;
                s.xij[(OIL, OIL)] = 1.0 / (1.0 + oil.rs);
                s.xij[(OIL, GAS)] = 1.0 - s.xij[(OIL, OIL)];
                store_free_gas(s, ng - oil.rs * no, &gas, &density, checks)?;
            }
        }
        s.update_saturations();
        self.store_volume_derivatives(properties);
        self.log_regime(regime);
        Ok(())
    }
}

/// Free gas phase holding `nj` Mscf of gas.
fn store_free_gas(
    s: &mut MixtureState,
    nj: f64,
    gas: &GasProperties,
    density: &SurfaceDensity,
    checks: bool,
) -> FlashResult<()> {
    let v = MSCF * nj * gas.scaled_bg();
    if checks && v <= 0.0 {
        return Err(FlashError::InvalidPhaseVolume("gas".to_string(), v));
    }
    s.v[GAS] = v;
    s.nj[GAS] = nj;
    s.xi[GAS] = gas.xi();
    s.rho[GAS] = gas.rho(density);
    s.mu[GAS] = gas.mu;
    s.xij[(GAS, GAS)] = 1.0;
    Ok(())
}
