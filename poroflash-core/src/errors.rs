use crate::parameter::ParameterError;
use thiserror::Error;

/// Error type for invalid flash inputs and incomplete fluid descriptions.
#[derive(Error, Debug)]
pub enum FlashError {
    #[error("Moles of component {component} are negative: Ni[{component}] = {value}.")]
    NegativeMoles { component: usize, value: f64 },
    #[error("Non-finite value in {0}.")]
    NonFiniteDerivative(String),
    #[error("Table {0} is missing.")]
    MissingTable(String),
    #[error("Unsupported composition: {0}.")]
    UnsupportedComposition(String),
    #[error("Invalid phase volume in {0}: v = {1}.")]
    InvalidPhaseVolume(String, f64),
    #[error("Mixture is initialized for {0} components while the input specifies {1} components.")]
    IncompatibleComponents(usize, usize),
    #[error("`{0}` is not supported by this mixture.")]
    NotSupported(String),
    #[error(transparent)]
    ParameterError(#[from] ParameterError),
}

/// Convenience type for `Result<T, FlashError>`.
pub type FlashResult<T> = Result<T, FlashError>;
