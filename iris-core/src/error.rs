use thiserror::Error;

/// An Error enum capturing the errors produced by this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The image could not be loaded or has no pixels
    #[error("Could not load image: {0}")]
    LoadError(String),
    /// Two codes of different length were compared
    #[error("Iris codes must have the same length ({left} != {right})")]
    LengthMismatch { left: usize, right: usize },
    /// The code is already enrolled for another subject
    #[error("This iris is already enrolled for another subject")]
    DuplicateIrisError,
    /// The subject already has an enrolled code
    #[error("Subject is already enrolled")]
    DuplicateSubjectError,
    /// Textual code contains something other than '0' and '1'
    #[error("Invalid iris code: {0}")]
    InvalidCodeError(String),
    /// Config Error
    #[error("Invalid Configuration: {0}")]
    ConfigError(String),
}
