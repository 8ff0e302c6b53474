//! Outbound adapters implementing domain ports for infrastructure concerns.
//!
//! Adapters translate between domain types and infrastructure-specific
//! representations; they contain no business logic.

pub mod persistence;
