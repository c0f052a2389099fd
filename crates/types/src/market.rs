//! # Market Data Model
//!
//! Immutable value types passed through the position engine. Everything
//! monetary is a `Decimal`; nothing here persists beyond a single
//! computation pass.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TOKEN_DECIMALS;

/// A boundary in the pool's liquidity curve. `liquidity_net` is the
/// signed liquidity added when price crosses this tick moving upward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub tick_idx: i32,
    pub liquidity_net: Decimal,
}

/// The position's chosen price bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub lower: Decimal,
    pub upper: Decimal,
}

impl PriceRange {
    pub fn new(lower: Decimal, upper: Decimal) -> Self {
        Self { lower, upper }
    }

    /// Whether a price sits inside the range, bounds inclusive
    pub fn contains(&self, price: Decimal) -> bool {
        self.lower <= price && price <= self.upper
    }
}

/// Decimal exponents normalizing raw on-chain integer amounts to human
/// units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(default = "default_token_decimals")]
    pub decimals0: u32,
    #[serde(default = "default_token_decimals")]
    pub decimals1: u32,
}

impl TokenPair {
    pub fn new(decimals0: u32, decimals1: u32) -> Self {
        Self { decimals0, decimals1 }
    }

    /// Exponent applied when normalizing a token0-quoted price:
    /// `decimals1 - decimals0`
    pub fn decimal_exponent_delta(&self) -> i32 {
        self.decimals1 as i32 - self.decimals0 as i32
    }
}

impl Default for TokenPair {
    fn default() -> Self {
        Self {
            decimals0: DEFAULT_TOKEN_DECIMALS,
            decimals1: DEFAULT_TOKEN_DECIMALS,
        }
    }
}

fn default_token_decimals() -> u32 {
    DEFAULT_TOKEN_DECIMALS
}

/// Pool-wide quantities the fee estimate is drawn from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub current_price: Decimal,
    pub active_liquidity: Decimal,
    pub fee_tier: Decimal,
    pub volume_24h: Decimal,
}

/// Fully explicit input record for one position evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionInput {
    /// Price assumption the whole evaluation is anchored on
    pub current_price: Decimal,

    /// Chosen position bounds
    pub range: PriceRange,

    /// USD value to be deposited across both tokens
    pub deposit_usd: Decimal,

    pub token0_price_usd: Decimal,
    pub token1_price_usd: Decimal,

    #[serde(default)]
    pub token_pair: TokenPair,

    /// Initialized ticks, pre-sorted ascending by `tick_idx`
    #[serde(default)]
    pub pool_ticks: Vec<Tick>,

    pub volume_24h: Decimal,

    /// Fee tier as a fraction (0.003) or a pool fee code in pips (3000)
    pub fee_tier: Decimal,

    /// Trading direction flag; when set the current tick is negated
    /// before the tick book is consulted
    #[serde(default)]
    pub swap_direction_inverted: bool,

    /// Periodic funding rate of the hedge instrument
    #[serde(default)]
    pub funding_rate: Decimal,
}

/// Derived position quantities, recomputed fully on every evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionBreakdown {
    /// Token0 amount the deposit buys at the anchor price
    pub amount0: Decimal,
    /// Token1 amount the deposit buys at the anchor price
    pub amount1: Decimal,
    /// Liquidity the two amounts mint over the chosen range
    pub liquidity_delta: Decimal,
    /// First derivative of position value with respect to price
    pub delta: Decimal,
    /// Magnitude of the second derivative; the position itself is
    /// short gamma
    pub gamma: Decimal,
}

/// Output record consumed by the display layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionEconomics {
    pub estimated_fee_24h: Decimal,
    pub estimated_fee_monthly: Decimal,
    pub estimated_fee_yearly: Decimal,
    pub apr_monthly_pct: Decimal,
    pub apr_yearly_pct: Decimal,
    pub position_gamma: Decimal,
    pub required_hedge_notional: Decimal,
    pub funding_cost: Decimal,
    /// Whether the anchor price sits inside the position's range
    pub in_range: bool,
    pub breakdown: PositionBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_range_contains_bounds() {
        let range = PriceRange::new(dec!(80), dec!(120));
        assert!(range.contains(dec!(80)));
        assert!(range.contains(dec!(120)));
        assert!(range.contains(dec!(100)));
        assert!(!range.contains(dec!(79.999999)));
        assert!(!range.contains(dec!(120.000001)));
    }

    #[test]
    fn test_token_pair_defaults() {
        let pair = TokenPair::default();
        assert_eq!(pair.decimals0, 18);
        assert_eq!(pair.decimals1, 18);
        assert_eq!(pair.decimal_exponent_delta(), 0);

        let pair = TokenPair::new(6, 18);
        assert_eq!(pair.decimal_exponent_delta(), 12);
    }

    #[test]
    fn test_position_input_serde_defaults() {
        let raw = r#"{
            "current_price": "100",
            "range": { "lower": "80", "upper": "120" },
            "deposit_usd": "10000",
            "token0_price_usd": "1",
            "token1_price_usd": "1",
            "volume_24h": "1000000",
            "fee_tier": "0.003"
        }"#;
        let input: PositionInput = serde_json::from_str(raw).unwrap();
        assert_eq!(input.token_pair, TokenPair::default());
        assert!(input.pool_ticks.is_empty());
        assert!(!input.swap_direction_inverted);
        assert_eq!(input.funding_rate, Decimal::ZERO);
    }
}
