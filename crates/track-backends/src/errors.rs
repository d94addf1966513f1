use thiserror::Error;
use track_encoding::EncodeError;

/// Errors that can occur while configuring or using a backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The event could not be serialized.
    #[error("event serialization failed: {0}")]
    Encode(#[from] EncodeError),
    /// Configuration could not be loaded or is invalid.
    #[error("invalid backend configuration: {0}")]
    Config(Box<figment::Error>),
}

impl From<figment::Error> for BackendError {
    fn from(err: figment::Error) -> Self {
        BackendError::Config(Box::new(err))
    }
}
