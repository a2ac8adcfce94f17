//! Guest PII detection and redaction utilities.
//!
//! Provides consistent logic for detecting personally identifying keys and
//! redacting their values in error metadata and reported events.

/// Checks if a metadata key likely refers to guest PII.
///
/// Uses case-insensitive pattern matching to detect common naming
/// conventions for contact details.
///
/// # Examples
///
/// ```
/// use tableside_shared::is_pii_key;
///
/// assert!(is_pii_key("email"));
/// assert!(is_pii_key("GUEST_PHONE"));
/// assert!(is_pii_key("customer_name"));
/// assert!(!is_pii_key("table_number"));
/// ```
pub fn is_pii_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("EMAIL")
        || key.contains("PHONE")
        || key.contains("GUEST_NAME")
        || key.contains("CUSTOMER_NAME")
        || key.contains("ADDRESS")
}

/// Redacts a value if the key is likely PII.
///
/// Returns `"[REDACTED]"` for PII keys, or the original value otherwise.
///
/// # Examples
///
/// ```
/// use tableside_shared::redact_if_pii;
///
/// assert_eq!(redact_if_pii("email", "alice@example.com"), "[REDACTED]");
/// assert_eq!(redact_if_pii("table_number", "5"), "5");
/// ```
pub fn redact_if_pii(key: &str, value: &str) -> String {
    if is_pii_key(key) {
        "[REDACTED]".to_string()
    } else {
        value.to_string()
    }
}

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_pii_patterns() {
        assert!(is_pii_key("email"));
        assert!(is_pii_key("EMAIL"));
        assert!(is_pii_key("contact_email"));

        assert!(is_pii_key("phone"));
        assert!(is_pii_key("GUEST_PHONE"));

        assert!(is_pii_key("guest_name"));
        assert!(is_pii_key("customer_name"));

        assert!(is_pii_key("delivery_address"));
    }

    #[test]
    fn rejects_non_pii_patterns() {
        assert!(!is_pii_key("table_number"));
        assert!(!is_pii_key("order_id"));
        assert!(!is_pii_key("opens_at"));
        assert!(!is_pii_key("quantity"));
        assert!(!is_pii_key("input_length"));
    }

    #[test]
    fn redacts_pii_values() {
        assert_eq!(redact_if_pii("email", "alice@example.com"), REDACTED);
        assert_eq!(redact_if_pii("guest_name", "Alice Smith"), REDACTED);
    }

    #[test]
    fn preserves_non_pii_values() {
        assert_eq!(redact_if_pii("table_number", "5"), "5");
        assert_eq!(redact_if_pii("quantity", "3"), "3");
    }
}
