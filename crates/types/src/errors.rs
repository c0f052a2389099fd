//! # Error Taxonomy
//!
//! Typed failures for the position engine. Domain errors halt a
//! computation and surface to the caller; soft conditions (out-of-range
//! position, degenerate tick book) are represented as zero-valued
//! results by the components themselves, never as error variants, so
//! the two are distinguishable by construction.

use thiserror::Error;

/// Errors that can occur while evaluating a position
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TidepoolError {
    // ========================================================================
    // Domain Errors
    // ========================================================================

    #[error("Price must be positive")]
    NonPositivePrice,

    #[error("Price range has zero width")]
    EmptyPriceRange,

    #[error("Price range lower bound exceeds upper bound")]
    InvalidPriceRange,

    #[error("Token USD price must be positive")]
    NonPositiveUsdPrice,

    // ========================================================================
    // Arithmetic Errors
    // ========================================================================

    #[error("Decimal overflow")]
    DecimalOverflow,

    #[error("Mul div overflow")]
    MulDivOverflow,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Square root of negative value")]
    NegativeSqrt,

    #[error("Conversion error")]
    ConversionError,

    // ========================================================================
    // Range Errors
    // ========================================================================

    #[error("Tick out of range")]
    TickOutOfRange,

    #[error("Sqrt price out of range")]
    SqrtPriceOutOfRange,

    #[error("Token decimals out of range")]
    TokenDecimalsOutOfRange,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

/// Result type using engine errors
pub type CoreResult<T> = std::result::Result<T, TidepoolError>;
