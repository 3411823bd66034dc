/// Level of detail in the flash output.
#[derive(Copy, Clone, Debug, PartialOrd, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Do not print output.
    #[default]
    None,
    /// Print changes of the phase regime.
    Result,
    /// Print a line for every flash call.
    Iter,
}

/// Options for the flash calculations of a mixture.
///
/// If `check_derivatives` is [None], consistency checks are
/// active in debug builds only.
#[derive(Copy, Clone, Debug, Default)]
pub struct FlashOptions {
    /// Check derivatives for non-finite values and free gas volumes for positivity.
    pub check_derivatives: Option<bool>,
    /// Output indicated by the [Verbosity] enum.
    pub verbosity: Verbosity,
}

impl From<(Option<bool>, Option<Verbosity>)> for FlashOptions {
    fn from(options: (Option<bool>, Option<Verbosity>)) -> Self {
        Self {
            check_derivatives: options.0,
            verbosity: options.1.unwrap_or(Verbosity::None),
        }
    }
}

impl FlashOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_derivatives(mut self, check: bool) -> Self {
        self.check_derivatives = Some(check);
        self
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Resolve the options, falling back to the build profile for the checks.
    pub fn unwrap_or_default_checks(self) -> (bool, Verbosity) {
        (
            self.check_derivatives.unwrap_or(cfg!(debug_assertions)),
            self.verbosity,
        )
    }
}
