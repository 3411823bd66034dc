use super::pvt::{DryGasPvt, LiveOilPvt, WaterPvt};
use poroflash_core::consts::GRAVITY_FACTOR;
use poroflash_core::parameter::{Parameter, ParameterError, RegionRecord};
use poroflash_core::table::PvtTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Densities of the fluids at standard conditions in lb/ft³.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDensity {
    pub oil: f64,
    pub water: f64,
    pub gas: f64,
}

impl Default for SurfaceDensity {
    fn default() -> Self {
        Self {
            oil: 37.457,
            water: 62.366,
            gas: 0.062428,
        }
    }
}

impl SurfaceDensity {
    /// Hydrostatic gradient of stock tank oil in psi/ft.
    pub fn gamma_oil(&self) -> f64 {
        self.oil * GRAVITY_FACTOR
    }

    /// Hydrostatic gradient of water at standard conditions in psi/ft.
    pub fn gamma_water(&self) -> f64 {
        self.water * GRAVITY_FACTOR
    }

    /// Hydrostatic gradient of gas at standard conditions in psi/ft.
    pub fn gamma_gas(&self) -> f64 {
        self.gas * GRAVITY_FACTOR
    }
}

/// Black oil PVT data of a single fluid region.
///
/// Rows of the tables:
/// * `pvtw`: reference pressure, Bw, water compressibility, water viscosity, viscosibility
/// * `pvco`: bubble point pressure, Rs, Bo, oil viscosity, oil compressibility, viscosibility
/// * `pvdg`: pressure, Bg, gas viscosity
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BlackOilRecord {
    pub pvtw: PvtTable<5>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pvco: Option<PvtTable<6>>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pvdg: Option<PvtTable<3>>,
    #[serde(default)]
    pub density: SurfaceDensity,
}

impl BlackOilRecord {
    /// Create a new record for a fluid region.
    pub fn new(
        pvtw: PvtTable<5>,
        pvco: Option<PvtTable<6>>,
        pvdg: Option<PvtTable<3>>,
        density: SurfaceDensity,
    ) -> Self {
        Self {
            pvtw,
            pvco,
            pvdg,
            density,
        }
    }
}

impl fmt::Display for BlackOilRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlackOilRecord(pvtw: {} row(s)", self.pvtw.len())?;
        if let Some(pvco) = &self.pvco {
            write!(f, ", pvco: {} row(s)", pvco.len())?;
        }
        if let Some(pvdg) = &self.pvdg {
            write!(f, ", pvdg: {} row(s)", pvdg.len())?;
        }
        write!(
            f,
            ", density=[{}, {}, {}])",
            self.density.oil, self.density.water, self.density.gas
        )
    }
}

/// The evaluated PVT functions of one fluid region.
#[derive(Debug, Clone)]
pub struct BlackOilRegion {
    pub water: WaterPvt,
    pub oil: Option<LiveOilPvt>,
    pub gas: Option<DryGasPvt>,
    pub density: SurfaceDensity,
}

/// Black oil parameters for one or more fluid regions.
pub struct BlackOilParameters {
    pub regions: Vec<BlackOilRegion>,
    pub records: Vec<RegionRecord<BlackOilRecord>>,
}

impl Parameter for BlackOilParameters {
    type Record = BlackOilRecord;

    fn from_records(records: Vec<RegionRecord<BlackOilRecord>>) -> Result<Self, ParameterError> {
        if records.is_empty() {
            return Err(ParameterError::IncompatibleParameters(
                "at least one fluid region is required.".to_string(),
            ));
        }
        let regions = records
            .iter()
            .map(|record| {
                let r = &record.model_record;
                Ok(BlackOilRegion {
                    water: WaterPvt::new(r.pvtw.clone()),
                    oil: r.pvco.clone().map(LiveOilPvt::new).transpose()?,
                    gas: r.pvdg.clone().map(DryGasPvt::new),
                    density: r.density,
                })
            })
            .collect::<Result<Vec<_>, ParameterError>>()?;
        Ok(Self { regions, records })
    }

    fn records(&self) -> &[RegionRecord<BlackOilRecord>] {
        &self.records
    }
}

impl fmt::Display for BlackOilParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.records.iter().try_for_each(|r| writeln!(f, "{}", r))
    }
}
