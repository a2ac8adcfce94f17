//! Structured reporting sink for domain rule evaluations.
//!
//! Domain types never log on their own; callers route rejected values and
//! rule outcomes through these helpers. PII metadata is redacted before
//! emission.

use crate::errors::{ErrorEnvelope, ErrorMetadata};
use crate::redaction::redact_if_pii;

/// Record a rejected domain value or violated business rule.
pub fn record_violation(envelope: &ErrorEnvelope) {
    let metadata = format_metadata(&envelope.metadata);
    tracing::warn!(
        kind = %envelope.kind,
        code = %envelope.code,
        metadata = %metadata,
        "{}",
        envelope.message
    );
}

/// Record the boolean outcome of a domain rule evaluation.
///
/// `subject` names the rule (e.g. `"time_window.is_open_at"`); `context`
/// carries key/value pairs describing the evaluated values.
pub fn record_evaluation(subject: &str, outcome: bool, context: &[(&str, &str)]) {
    let context = format_context(context);
    tracing::info!(subject, outcome, context = %context, "rule evaluated");
}

fn format_metadata(metadata: &ErrorMetadata) -> String {
    let mut parts = Vec::with_capacity(metadata.len());
    for (key, value) in metadata {
        parts.push(format!("{key}={}", redact_if_pii(key, value)));
    }

    parts.join(" ")
}

fn format_context(context: &[(&str, &str)]) -> String {
    let mut parts = Vec::with_capacity(context.len());
    for (key, value) in context {
        parts.push(format!("{key}={}", redact_if_pii(key, value)));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use crate::redaction::REDACTED;

    #[test]
    fn metadata_formatting_redacts_pii_keys() {
        let envelope = ErrorEnvelope::expected(ErrorCode::invalid_input(), "bad email")
            .with_metadata("email", "alice@example.com")
            .with_metadata("input_length", "17");

        let formatted = format_metadata(&envelope.metadata);
        assert!(formatted.contains(&format!("email={REDACTED}")));
        assert!(formatted.contains("input_length=17"));
        assert!(!formatted.contains("alice@example.com"));
    }

    #[test]
    fn context_formatting_preserves_order() {
        let formatted = format_context(&[("opens_at", "22"), ("closes_at", "6"), ("hour", "2")]);
        assert_eq!(formatted, "opens_at=22 closes_at=6 hour=2");
    }

    #[test]
    fn recording_helpers_accept_empty_context() {
        // Smoke check: no subscriber installed, events are dropped silently.
        record_evaluation("time_window.is_open_at", true, &[]);
        record_violation(&ErrorEnvelope::expected(
            ErrorCode::invalid_input(),
            "bad hour",
        ));
    }
}
