/// Shared types for the Tidepool position engine
///
/// This crate provides the data model, error taxonomy and protocol
/// constants used across the math, core and engine crates.

pub mod constants;
pub mod errors;
pub mod market;

// Re-export all public types
pub use constants::*;
pub use errors::*;
pub use market::*;
