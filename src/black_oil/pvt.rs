//! Evaluation of the black oil PVT tables.
//!
//! Each table is wrapped in a type that knows the meaning of its columns
//! and returns the evaluated properties together with the pressure (and,
//! for undersaturated oil, solution gas ratio) derivatives the flash needs.
use super::parameters::SurfaceDensity;
use poroflash_core::consts::{CONV1, MSCF};
use poroflash_core::parameter::ParameterError;
use poroflash_core::table::PvtTable;

const PB: usize = 0;
const RS: usize = 1;
const BO: usize = 2;
const MUO: usize = 3;
const CO: usize = 4;
const CMUO: usize = 5;

/// Water formation volume factor and viscosity from a PVTW table.
#[derive(Clone, Debug)]
pub struct WaterPvt {
    table: PvtTable<5>,
}

/// Water properties at a given pressure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterProperties {
    /// Formation volume factor in rb/stb
    pub bw: f64,
    /// dBw / dP
    pub bw_p: f64,
    /// Viscosity in cP
    pub mu: f64,
    /// dmu / dP
    pub mu_p: f64,
}

impl WaterPvt {
    pub fn new(table: PvtTable<5>) -> Self {
        Self { table }
    }

    pub fn eval(&self, p: f64) -> WaterProperties {
        let row = self.table.eval_all(0, p);
        let [pref, bw0, cw, mu, _] = row.values;
        let s = row.slopes;
        let dp = p - pref;
        WaterProperties {
            bw: bw0 * (1.0 - cw * dp),
            bw_p: s[1] * (1.0 - cw * dp) - bw0 * (s[2] * dp + cw * (1.0 - s[0])),
            mu,
            mu_p: s[3],
        }
    }
}

impl WaterProperties {
    /// Molar density in stb/ft³.
    pub fn xi(&self) -> f64 {
        1.0 / (CONV1 * self.bw)
    }

    pub fn xi_p(&self) -> f64 {
        -self.bw_p / (self.bw * self.bw * CONV1)
    }

    /// Mass density in lb/ft³.
    pub fn rho(&self, density: &SurfaceDensity) -> f64 {
        density.water / self.bw
    }

    pub fn rho_p(&self, density: &SurfaceDensity) -> f64 {
        CONV1 * self.xi_p() * density.water
    }
}

/// Live oil properties from a PVCO table.
///
/// The table is indexed by the bubble point pressure for saturated oil
/// and by the solution gas ratio for undersaturated oil.
#[derive(Clone, Debug)]
pub struct LiveOilPvt {
    table: PvtTable<6>,
}

/// Properties of oil saturated with gas at a given pressure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaturatedOil {
    /// Solution gas ratio in Mscf/stb
    pub rs: f64,
    /// Formation volume factor in rb/stb
    pub bo: f64,
    /// dRs / dP
    pub rs_p: f64,
    /// dBo / dP
    pub bo_p: f64,
    /// Viscosity in cP
    pub mu: f64,
    /// dmu / dP
    pub mu_p: f64,
}

/// Properties of oil above its bubble point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UndersaturatedOil {
    /// Bubble point pressure
    pub pbb: f64,
    /// Formation volume factor at the bubble point
    pub bo_sat: f64,
    /// Viscosity at the bubble point
    pub mu_sat: f64,
    pub rs: f64,
    pub bo: f64,
    /// dBo / dP at constant Rs
    pub bo_p: f64,
    /// dBo / dRs at constant P
    pub bo_rs: f64,
    pub mu: f64,
    /// dmu / dP at constant Rs
    pub mu_p: f64,
    /// dmu / dRs at constant P
    pub mu_rs: f64,
}

impl LiveOilPvt {
    /// The solution gas ratio column has to be strictly increasing as well.
    pub fn new(table: PvtTable<6>) -> Result<Self, ParameterError> {
        table.check_increasing(RS)?;
        Ok(Self { table })
    }

    /// Solution gas ratio of saturated oil.
    pub fn rs_sat(&self, p: f64) -> f64 {
        self.table.eval(PB, p, RS)
    }

    pub fn saturated(&self, p: f64) -> SaturatedOil {
        let row = self.table.eval_all(PB, p);
        SaturatedOil {
            rs: row.values[RS],
            bo: row.values[BO],
            rs_p: row.slopes[RS],
            bo_p: row.slopes[BO],
            mu: row.values[MUO],
            mu_p: row.slopes[MUO],
        }
    }

    /// Oil with solution gas ratio `rs` at pressure `p`.
    pub fn undersaturated(&self, rs: f64, p: f64) -> UndersaturatedOil {
        let row = self.table.eval_all(RS, rs);
        Self::compressed(&row.values, &row.slopes, rs, p)
    }

    /// Oil with bubble point `pbb` at pressure `p`.
    ///
    /// The saturated state is taken from the pressure lookup, the
    /// solution gas ratio derivatives from the lookup in Rs.
    pub fn at_bubble_point(&self, pbb: f64, p: f64) -> UndersaturatedOil {
        let values = self.table.eval_all(PB, pbb).values;
        let slopes = self.table.eval_all(RS, values[RS]).slopes;
        Self::compressed(&values, &slopes, values[RS], p)
    }

    fn compressed(values: &[f64; 6], slopes: &[f64; 6], rs: f64, p: f64) -> UndersaturatedOil {
        let pbb = values[PB];
        let (bo_sat, mu_sat) = (values[BO], values[MUO]);
        let (c, cmu) = (values[CO], values[CMUO]);
        let dp = p - pbb;
        UndersaturatedOil {
            pbb,
            bo_sat,
            mu_sat,
            rs,
            bo: bo_sat * (1.0 - c * dp),
            bo_p: -bo_sat * c,
            bo_rs: (1.0 - c * dp) * slopes[BO] + bo_sat * (c * slopes[PB] - slopes[CO] * dp),
            mu: mu_sat * (1.0 + cmu * dp),
            mu_p: mu_sat * cmu,
            mu_rs: (1.0 + cmu * dp) * slopes[MUO] + mu_sat * (slopes[CMUO] * dp - cmu * slopes[PB]),
        }
    }
}

/// Mass density of oil with dissolved gas per reservoir volume of stock tank oil.
fn live_oil_mass(rs: f64, density: &SurfaceDensity) -> f64 {
    density.oil + MSCF / CONV1 * rs * density.gas
}

impl SaturatedOil {
    pub fn xi(&self) -> f64 {
        (1.0 + self.rs) / (CONV1 * self.bo)
    }

    pub fn xi_p(&self) -> f64 {
        (self.rs_p * self.bo - (1.0 + self.rs) * self.bo_p) / (self.bo * self.bo * CONV1)
    }

    pub fn rho(&self, density: &SurfaceDensity) -> f64 {
        live_oil_mass(self.rs, density) / self.bo
    }

    pub fn rho_p(&self, density: &SurfaceDensity) -> f64 {
        MSCF / CONV1 * density.gas * self.rs_p / self.bo
            - live_oil_mass(self.rs, density) * self.bo_p / (self.bo * self.bo)
    }
}

impl UndersaturatedOil {
    pub fn xi(&self) -> f64 {
        (1.0 + self.rs) / (CONV1 * self.bo)
    }

    pub fn xi_p(&self) -> f64 {
        -(1.0 + self.rs) * self.bo_p / (CONV1 * self.bo * self.bo)
    }

    pub fn xi_rs(&self) -> f64 {
        1.0 / (CONV1 * self.bo) - (1.0 + self.rs) * self.bo_rs / (CONV1 * self.bo * self.bo)
    }

    pub fn rho(&self, density: &SurfaceDensity) -> f64 {
        live_oil_mass(self.rs, density) / self.bo
    }

    pub fn rho_p(&self, density: &SurfaceDensity) -> f64 {
        -live_oil_mass(self.rs, density) * self.bo_p / (self.bo * self.bo)
    }

    pub fn rho_rs(&self, density: &SurfaceDensity) -> f64 {
        MSCF / CONV1 * density.gas / self.bo
            - live_oil_mass(self.rs, density) * self.bo_rs / (self.bo * self.bo)
    }
}

/// Dry gas formation volume factor and viscosity from a PVDG table.
#[derive(Clone, Debug)]
pub struct DryGasPvt {
    table: PvtTable<3>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GasProperties {
    /// Formation volume factor in rb/Mscf
    pub bg: f64,
    /// dBg / dP
    pub bg_p: f64,
    /// Viscosity in cP
    pub mu: f64,
    /// dmu / dP
    pub mu_p: f64,
}

impl DryGasPvt {
    pub fn new(table: PvtTable<3>) -> Self {
        Self { table }
    }

    pub fn eval(&self, p: f64) -> GasProperties {
        let row = self.table.eval_all(0, p);
        GasProperties {
            bg: row.values[1],
            bg_p: row.slopes[1],
            mu: row.values[2],
            mu_p: row.slopes[2],
        }
    }
}

impl GasProperties {
    /// Formation volume factor in ft³/scf.
    pub fn scaled_bg(&self) -> f64 {
        self.bg * CONV1 / MSCF
    }

    pub fn scaled_bg_p(&self) -> f64 {
        self.bg_p * CONV1 / MSCF
    }

    /// Molar density in Mscf/ft³.
    pub fn xi(&self) -> f64 {
        1.0 / (CONV1 * self.bg)
    }

    pub fn xi_p(&self) -> f64 {
        -self.bg_p / (CONV1 * self.bg * self.bg)
    }

    pub fn rho(&self, density: &SurfaceDensity) -> f64 {
        MSCF / CONV1 * density.gas / self.bg
    }

    pub fn rho_p(&self, density: &SurfaceDensity) -> f64 {
        MSCF * density.gas * self.xi_p()
    }
}
