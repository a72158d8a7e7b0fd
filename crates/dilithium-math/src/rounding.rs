//! Rounding: `Power2Round`, `Decompose` and the hint functions, plus the
//! sealed gamma2 widths that select the high-bits encoding.

use crate::{D, N, Q};

mod sealed {
    pub trait Sealed {}
}

/// Split `a` (standard representative) into `(a1, a0)` with
/// `a = a1 * 2^D + a0` and `-2^{D-1} < a0 <= 2^{D-1}`.
#[inline]
#[must_use]
pub const fn power2round(a: i32) -> (i32, i32) {
    let a1 = (a + (1 << (D - 1)) - 1) >> D;
    (a1, a - (a1 << D))
}

/// Sealed trait for the low-order rounding range `gamma2`.
pub trait Gamma2Width: sealed::Sealed {
    const GAMMA2: i32;
    /// Packed size of a `w1` polynomial.
    const W1_POLY_BYTES: usize;

    /// Split `a` (standard representative) into high and low bits
    /// `(a1, a0)` with `a = a1 * 2 * gamma2 + a0 (mod q)`, except that
    /// `a1 = (q-1) / (2 gamma2)` wraps to 0 with `a0` shifted down by one.
    fn decompose(a: i32) -> (i32, i32);

    /// Correct the high bits of `a` according to a hint bit.
    fn use_hint(a: i32, hint: bool) -> i32;

    /// Pack high bits into `W1_POLY_BYTES` bytes.
    fn pack_w1(r: &mut [u8], a: &[i32; N]);

    /// Whether adding the low bits `a0` overflows into the high bits `a1`.
    #[inline]
    fn make_hint(a0: i32, a1: i32) -> bool {
        a0 > Self::GAMMA2 || a0 < -Self::GAMMA2 || (a0 == -Self::GAMMA2 && a1 != 0)
    }
}

/// `gamma2 = (q-1) / 88`; high bits live in `[0, 43]`.
#[derive(Debug, Clone, Copy)]
pub struct Gamma2Div88;

/// `gamma2 = (q-1) / 32`; high bits live in `[0, 15]`.
#[derive(Debug, Clone, Copy)]
pub struct Gamma2Div32;

#[inline]
const fn centre_low(a: i32, a1: i32, gamma2: i32) -> i32 {
    let mut a0 = a - a1 * 2 * gamma2;
    a0 -= (((Q - 1) / 2 - a0) >> 31) & Q;
    a0
}

impl sealed::Sealed for Gamma2Div88 {}
impl Gamma2Width for Gamma2Div88 {
    const GAMMA2: i32 = (Q - 1) / 88;
    const W1_POLY_BYTES: usize = 192;

    #[inline]
    fn decompose(a: i32) -> (i32, i32) {
        let mut a1 = (a + 127) >> 7;
        a1 = (a1 * 11275 + (1 << 23)) >> 24;
        a1 ^= ((43 - a1) >> 31) & a1;
        (a1, centre_low(a, a1, Self::GAMMA2))
    }

    #[inline]
    fn use_hint(a: i32, hint: bool) -> i32 {
        let (a1, a0) = Self::decompose(a);
        match (hint, a0 > 0) {
            (false, _) => a1,
            (true, true) if a1 == 43 => 0,
            (true, true) => a1 + 1,
            (true, false) if a1 == 0 => 43,
            (true, false) => a1 - 1,
        }
    }

    fn pack_w1(r: &mut [u8], a: &[i32; N]) {
        debug_assert!(r.len() >= Self::W1_POLY_BYTES);
        for (out, c) in r.chunks_exact_mut(3).zip(a.chunks_exact(4)) {
            out[0] = (c[0] | (c[1] << 6)) as u8;
            out[1] = ((c[1] >> 2) | (c[2] << 4)) as u8;
            out[2] = ((c[2] >> 4) | (c[3] << 2)) as u8;
        }
    }
}

impl sealed::Sealed for Gamma2Div32 {}
impl Gamma2Width for Gamma2Div32 {
    const GAMMA2: i32 = (Q - 1) / 32;
    const W1_POLY_BYTES: usize = 128;

    #[inline]
    fn decompose(a: i32) -> (i32, i32) {
        let mut a1 = (a + 127) >> 7;
        a1 = (a1 * 1025 + (1 << 21)) >> 22;
        a1 &= 15;
        (a1, centre_low(a, a1, Self::GAMMA2))
    }

    #[inline]
    fn use_hint(a: i32, hint: bool) -> i32 {
        let (a1, a0) = Self::decompose(a);
        match (hint, a0 > 0) {
            (false, _) => a1,
            (true, true) => (a1 + 1) & 15,
            (true, false) => (a1 - 1) & 15,
        }
    }

    fn pack_w1(r: &mut [u8], a: &[i32; N]) {
        debug_assert!(r.len() >= Self::W1_POLY_BYTES);
        for (out, c) in r.iter_mut().zip(a.chunks_exact(2)) {
            *out = (c[0] | (c[1] << 4)) as u8;
        }
    }
}
