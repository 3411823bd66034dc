#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::many_single_char_names)]

/// Print messages with level `Verbosity::Iter` or higher.
#[macro_export]
macro_rules! log_iter {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Iter {
            println!($($arg)*);
        }
    }
}

/// Print messages with level `Verbosity::Result` or higher.
#[macro_export]
macro_rules! log_result {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Result {
            println!($($arg)*);
        }
    }
}

pub mod consts;
mod errors;
mod mixture;
mod options;
pub mod parameter;
pub mod table;

pub use errors::{FlashError, FlashResult};
pub use mixture::{
    check_moles, FlashDiagnostics, FlashHint, Mixture, MixtureState, MixtureType, PreviousIterate,
};
pub use options::{FlashOptions, Verbosity};
