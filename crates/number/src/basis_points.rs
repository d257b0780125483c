//! Basis point arithmetic. One basis point is 1/10_000 of the whole.

use alloy::primitives::U256;

/// The denominator of every basis point fraction.
pub const DENOMINATOR: u64 = 10_000;

/// Returns `amount * bps / 10_000`, rounding down, or `None` on overflow.
pub fn share(amount: U256, bps: U256) -> Option<U256> {
    amount
        .checked_mul(bps)
        .map(|product| product / U256::from(DENOMINATOR))
}

/// Returns whether `part` is at least `bps` basis points of `whole`.
///
/// Compared as `part * 10_000 >= whole * bps` so no precision is lost to
/// integer division. Values that overflow the comparison count as not
/// reaching the ratio.
pub fn reaches(part: U256, whole: U256, bps: U256) -> bool {
    match (
        part.checked_mul(U256::from(DENOMINATOR)),
        whole.checked_mul(bps),
    ) {
        (Some(lhs), Some(rhs)) => lhs >= rhs,
        (None, Some(_)) => true,
        _ => false,
    }
}
