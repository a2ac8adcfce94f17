//! Result helpers for shared error handling.

use crate::errors::ErrorEnvelope;

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

/// Boundary conversion from module-level errors into the shared envelope.
///
/// Domain modules return their own error enums; callers that need the
/// structured envelope convert once at the boundary instead of spelling
/// out `map_err` chains at every call site.
pub trait IntoEnvelope<T> {
    /// Convert the error side into an [`ErrorEnvelope`].
    fn into_envelope(self) -> Result<T>;

    /// Convert the error side into an [`ErrorEnvelope`] and attach one
    /// metadata entry describing the failing boundary.
    fn into_envelope_with(self, key: &str, value: &str) -> Result<T>;
}

impl<T, E> IntoEnvelope<T> for std::result::Result<T, E>
where
    E: Into<ErrorEnvelope>,
{
    fn into_envelope(self) -> Result<T> {
        self.map_err(Into::into)
    }

    fn into_envelope_with(self, key: &str, value: &str) -> Result<T> {
        self.map_err(|error| error.into().with_metadata(key, value))
    }
}
