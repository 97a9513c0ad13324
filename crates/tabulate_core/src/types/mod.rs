//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for tabulated distribution operations
//!
//! # Re-exports
//!
//! - [`DistributionError`] from `error`

pub mod error;

pub use error::DistributionError;
