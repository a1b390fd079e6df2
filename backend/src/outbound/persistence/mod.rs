//! In-process persistence adapters.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by process memory.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   stored records and domain types. No business logic resides here.
//! - **Strongly typed errors**: All storage failures are mapped to domain
//!   persistence error types; nothing here panics.
//!
//! # Example
//!
//! ```
//! use larder::outbound::persistence::MemoryStore;
//!
//! let store = MemoryStore::new();
//! # let _ = store;
//! ```

mod memory;

pub use memory::MemoryStore;
