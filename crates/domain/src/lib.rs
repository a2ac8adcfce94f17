//! # tableside-domain
//!
//! Domain entities, primitives, and value objects for restaurant ordering.
//!
//! This crate contains the core domain model with no infrastructure dependencies:
//!
//! - **Hours** - `Hour`, `TimeWindow` (daily open windows, midnight crossover)
//! - **Money** - `Money`, `Currency` (cents-based amounts)
//! - **Contact** - `Email`, `Phone`, `GuestName`, `Customer`
//! - **Order** - `OrderId`, `Quantity`, `OrderLine`, `Order`
//! - **Table** - `TableNumber`, `Table` (seating invariants)
//!
//! ## Dependency Rules
//!
//! - Depends only on the `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O
//!
//! ## Parse, don't validate
//!
//! Every type here is constructed from raw input exactly once, at the
//! boundary. Queries and arithmetic over already-constructed values never
//! re-check invariants and never fail for validation reasons.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// Re-export shared types for convenience
pub use tableside_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod contact;
pub mod hours;
pub mod money;
pub mod order;
pub mod table;

pub use contact::{ContactError, Customer, Email, GuestName, Phone};
pub use hours::{Hour, HoursError, TimeWindow};
pub use money::{Currency, MAX_MONEY_CENTS, Money, MoneyError};
pub use order::{
    MAX_QUANTITY, Order, OrderError, OrderId, OrderIdInput, OrderLine, Quantity, derive_order_id,
};
pub use table::{Table, TableError, TableNumber};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_crate_compiles() {
        let version = domain_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn domain_depends_on_shared() {
        let shared_version = shared_crate_version();
        assert!(!shared_version.is_empty());
    }
}
