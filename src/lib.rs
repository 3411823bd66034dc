//! Poroflash - fluid models and flash calculations for reservoir simulation.
//!
//! The interface shared by all fluid models lives in [poroflash_core];
//! the models are behind features.
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

pub use poroflash_core::*;

#[cfg(feature = "black_oil")]
pub mod black_oil;
