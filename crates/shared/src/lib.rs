//! # tableside-shared
//!
//! Shared utilities, result types, and error handling for the tableside workspace.
//!
//! This crate provides foundational types that are used across all other crates:
//!
//! - Result and error envelope types
//! - Guest PII redaction helpers
//! - The structured reporting sink for domain rule evaluations
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - All public error types support serialization
//! 3. **PII never leaves the process unredacted** - metadata passes through
//!    the redaction helpers before being reported

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod redaction;
pub mod reporting;
pub mod result;

pub use errors::{ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata, redact_metadata};
pub use redaction::{REDACTED, is_pii_key, redact_if_pii};
pub use reporting::{record_evaluation, record_violation};
pub use result::{IntoEnvelope, Result};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::errors::{ErrorCode, ErrorEnvelope, ErrorKind};
    use super::result::{IntoEnvelope, Result};

    #[test]
    fn shared_error_types_are_available() {
        let error = ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid");
        assert_eq!(error.kind, ErrorKind::Expected);
    }

    #[test]
    fn shared_result_type_is_available() {
        let error = ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid");
        let value: std::result::Result<i32, ErrorEnvelope> = Err(error);

        let converted: Result<i32> = value.into_envelope_with("field", "hour");
        assert!(converted.is_err());
    }
}
