use crate::store::SubjectId;
use thiserror::Error;

/// An Error enum capturing the errors produced by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from the iris engine
    #[error(transparent)]
    IrisError(#[from] iris_core::Error),
    /// Database error
    #[error("Database error")]
    DatabaseError(#[from] rusqlite::Error),
    /// A IO error has occurred
    #[error("IO error")]
    IOError(#[from] std::io::Error),
    /// Config file could not be parsed
    #[error("Config parse error")]
    ConfigParseError(#[from] serde_yaml::Error),
    /// Nothing is enrolled yet
    #[error("No iris enrolled in the gallery")]
    EmptyGallery,
    /// The subject has no enrolled iris
    #[error("No iris enrolled for subject {0}")]
    UnknownSubject(SubjectId),
    /// The subject already has an enrolled iris
    #[error("Subject {0} is already enrolled")]
    SubjectAlreadyEnrolled(SubjectId),
    /// Some other error has occurred.
    #[error("Err: {0}")]
    Other(String),
}

impl Error {
    pub fn is_duplicate_iris(&self) -> bool {
        matches!(self, Error::IrisError(iris_core::Error::DuplicateIrisError))
    }
}

impl From<String> for Error {
    fn from(mes: String) -> Self {
        Self::Other(mes)
    }
}
impl From<&str> for Error {
    fn from(mes: &str) -> Self {
        Self::Other(mes.to_owned())
    }
}
