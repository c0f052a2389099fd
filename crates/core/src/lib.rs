/// Position economics for the Tidepool engine
///
/// Given a price range, a USD deposit, a pool's tick book and observed
/// volume, this crate derives the position's token split, liquidity
/// share, fee projections, and the delta/gamma figures that size a
/// squeeth-style hedge and its funding cost.

pub mod allocator;
pub mod book;
pub mod economics;
pub mod fees;
pub mod risk;

// Re-export the main entry points
pub use allocator::{amounts_to_liquidity, split_deposit};
pub use book::active_liquidity_at;
pub use economics::evaluate_position;
pub use fees::{estimate_fee, fee_tier_rate, FeeProjection};
pub use risk::{delta_and_gamma, funding_cost, HedgeSizing};
