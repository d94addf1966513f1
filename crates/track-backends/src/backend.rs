use track_encoding::EventValue;

use crate::errors::BackendError;

/// Destination for tracking events.
///
/// Implementations must not keep a reference to the event after `send`
/// returns, and must be usable from several threads at once.
pub trait Backend: Send + Sync {
    /// Stores one event.
    fn send(&self, event: &EventValue) -> Result<(), BackendError>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn send(&self, event: &EventValue) -> Result<(), BackendError> {
        (**self).send(event)
    }
}

impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    fn send(&self, event: &EventValue) -> Result<(), BackendError> {
        (**self).send(event)
    }
}
