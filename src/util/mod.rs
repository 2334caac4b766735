//! Utility types and functions for Helix.
//!
//! This module contains fundamental types used throughout the library:
//! - [`Error`] / [`EncodeError`] / [`Result`] - Error handling
//! - [`Transform`] and math type re-exports from glam

mod error;
mod math;

pub use error::*;
pub use math::*;
