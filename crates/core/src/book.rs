//! # Tick Book Aggregation
//!
//! Walks a pool's initialized ticks to find the liquidity active at
//! the current tick. The book arrives pre-sorted ascending by tick
//! index and is never re-sorted here.

use rust_decimal::Decimal;
use tidepool_types::Tick;

/// Total liquidity active at `current_tick`.
///
/// Accumulates `liquidity_net` from the bottom of the book, stopping
/// at the first window `[tick[i], tick[i+1]]` that brackets the
/// current tick. A book with fewer than two ticks carries no active
/// liquidity. If no window brackets the tick the fully accumulated
/// sum is returned; that is defined behavior for an inconsistent
/// snapshot, not an error.
pub fn active_liquidity_at(ticks: &[Tick], current_tick: i32) -> Decimal {
    if ticks.len() <= 1 {
        return Decimal::ZERO;
    }

    let mut liquidity = Decimal::ZERO;
    for window in ticks.windows(2) {
        liquidity = liquidity.saturating_add(window[0].liquidity_net);
        if window[0].tick_idx <= current_tick && current_tick <= window[1].tick_idx {
            break;
        }
    }
    liquidity
}
