//! Modular reduction for the Dilithium field (q = 8380417).

use crate::Q;

/// q^{-1} mod 2^{32}.
pub const QINV: i32 = 58_728_449;

/// 2^{32} mod q, centred.
pub const MONT: i32 = -4_186_625;

/// Montgomery reduction: `a * 2^{-32} mod q`.
///
/// For `|a| <= 2^{31} q` the result satisfies `|r| < q`.
#[inline]
#[must_use]
pub const fn montgomery_reduce(a: i64) -> i32 {
    let t = (a as i32).wrapping_mul(QINV);
    ((a - (t as i64) * (Q as i64)) >> 32) as i32
}

/// Shift-based partial reduction into `[-6283009, 6283008]`.
///
/// Input must be at most `2^{31} - 2^{22} - 1` so the rounding add cannot
/// overflow.
#[inline]
#[must_use]
pub const fn reduce32(a: i32) -> i32 {
    let t = (a + (1 << 22)) >> 23;
    a - t * Q
}

/// Add q if the input is negative.
#[inline]
#[must_use]
pub const fn caddq(a: i32) -> i32 {
    a + ((a >> 31) & Q)
}

/// Standard representative in `[0, q)`.
#[inline]
#[must_use]
pub const fn freeze(a: i32) -> i32 {
    caddq(reduce32(a))
}
