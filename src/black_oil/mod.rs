//! Black oil fluid model.
//!
//! Oil, gas and water are described by the PVT tables PVCO (live oil),
//! PVDG (dry gas) and PVTW (water). Gas dissolves in oil up to the
//! saturated solution gas ratio; excess gas forms a free gas phase. A
//! region without a PVCO table only contains water.
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

mod odgw;
mod parameters;
mod pvt;
mod water;

pub use odgw::{BlackOilOdgw, PhaseRegime};
pub use parameters::{BlackOilParameters, BlackOilRecord, BlackOilRegion, SurfaceDensity};
pub use pvt::{
    DryGasPvt, GasProperties, LiveOilPvt, SaturatedOil, UndersaturatedOil, WaterProperties,
    WaterPvt,
};
pub use water::BlackOilWater;

use poroflash_core::{FlashOptions, FlashResult, Mixture};
use std::sync::Arc;

/// Create the mixture of a fluid region.
///
/// Regions with a PVCO table give a [BlackOilOdgw], all other regions a [BlackOilWater].
pub fn mixture(
    parameters: &Arc<BlackOilParameters>,
    region: usize,
    options: FlashOptions,
) -> FlashResult<Box<dyn Mixture>> {
    let has_oil = parameters
        .regions
        .get(region)
        .is_some_and(|r| r.oil.is_some());
    if has_oil {
        Ok(Box::new(BlackOilOdgw::with_options(
            parameters.clone(),
            region,
            options,
        )?))
    } else {
        Ok(Box::new(BlackOilWater::with_options(
            parameters.clone(),
            region,
            options,
        )?))
    }
}
