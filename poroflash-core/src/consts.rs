//! Unit conversions and tolerances shared by all fluid models.
//!
//! Field units are used throughout: pressure in psia, liquid volumes in
//! reservoir barrels per stock tank barrel, gas volumes in reservoir barrels
//! per thousand standard cubic feet and densities in lb/ft³.

/// Cubic feet per barrel.
pub const CONV1: f64 = 5.61458;

/// Standard cubic feet per thousand standard cubic feet.
pub const MSCF: f64 = 1000.0;

/// Converts a mass density in lb/ft³ into a pressure gradient in psi/ft.
pub const GRAVITY_FACTOR: f64 = 0.00694444;

/// Threshold below which a mole amount or saturation is treated as absent.
pub const TINY: f64 = 1e-8;
