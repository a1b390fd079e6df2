//! Outbound adapters implementing domain ports for infrastructure.
//!
//! This module follows the hexagonal architecture pattern: adapters are thin
//! translators between domain types and the backing store and contain no
//! business logic.
//!
//! - **persistence**: the in-process store implementing the repository ports.

pub mod persistence;
