//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such
//! as correlation identifiers.

pub mod correlation;

pub use correlation::Correlation;
