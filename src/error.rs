use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the gas engine.
///
/// Every failure is a caller mistake surfaced synchronously; nothing is raised mid-step.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction parameters or step size.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid argument to a particle constructor or a diagnostic query.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A windowed diagnostic found no recorded data to work with.
    #[error("insufficient samples: {0}")]
    DiagnosticInsufficientSamples(String),

    /// A particle was found outside the box.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
}
