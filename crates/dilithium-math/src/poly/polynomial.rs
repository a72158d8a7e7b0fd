use core::ops;

use super::NttPolynomial;
use crate::{
    N, Q, ntt, pack,
    pack::Gamma1Width,
    reduce::{caddq, reduce32},
    rounding::{self, Gamma2Width},
    sample::{self, EtaWidth},
};

/// Polynomial in standard (coefficient) form over `Z_q[X]/(X^{256}+1)`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Polynomial(pub(crate) [i32; N]);

impl Polynomial {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i32; N])
    }

    /// Consuming forward NTT. Coefficients are not reduced afterwards.
    #[must_use]
    pub fn ntt(mut self) -> NttPolynomial {
        ntt::forward_ntt(&mut self.0);
        NttPolynomial(self.0)
    }

    pub fn reduce(&mut self) {
        for c in &mut self.0 {
            *c = reduce32(*c);
        }
    }

    pub fn caddq(&mut self) {
        for c in &mut self.0 {
            *c = caddq(*c);
        }
    }

    /// Multiply by `2^D` without reduction.
    pub fn shift_left(&mut self) {
        for c in &mut self.0 {
            *c <<= crate::D;
        }
    }

    /// Split into `(t1, t0)` with `t = t1 * 2^D + t0`. Coefficients must be
    /// standard representatives.
    #[must_use]
    pub fn power2round(&self) -> (Self, Self) {
        let mut hi = Self::zero();
        let mut lo = Self::zero();
        for ((a, a1), a0) in self.0.iter().zip(hi.0.iter_mut()).zip(lo.0.iter_mut()) {
            (*a1, *a0) = rounding::power2round(*a);
        }
        (hi, lo)
    }

    /// Split into high and low bits `(w1, w0)`. Coefficients must be
    /// standard representatives.
    #[must_use]
    pub fn decompose<G: Gamma2Width>(&self) -> (Self, Self) {
        let mut hi = Self::zero();
        let mut lo = Self::zero();
        for ((a, a1), a0) in self.0.iter().zip(hi.0.iter_mut()).zip(lo.0.iter_mut()) {
            (*a1, *a0) = G::decompose(*a);
        }
        (hi, lo)
    }

    /// Hint polynomial for low bits `a0` and high bits `a1`, with the
    /// number of ones.
    #[must_use]
    pub fn make_hint<G: Gamma2Width>(a0: &Self, a1: &Self) -> (Self, usize) {
        let mut h = Self::zero();
        let mut weight = 0;
        for ((h, a0), a1) in h.0.iter_mut().zip(a0.0.iter()).zip(a1.0.iter()) {
            let bit = G::make_hint(*a0, *a1);
            *h = bit as i32;
            weight += bit as usize;
        }
        (h, weight)
    }

    /// Apply a hint polynomial to the high bits of `self`.
    #[must_use]
    pub fn use_hint<G: Gamma2Width>(&self, hint: &Self) -> Self {
        let mut r = Self::zero();
        for ((r, a), h) in r.0.iter_mut().zip(self.0.iter()).zip(hint.0.iter()) {
            *r = G::use_hint(*a, *h != 0);
        }
        r
    }

    /// Whether every coefficient (after `reduce`) has absolute value below
    /// `bound`. Bounds above `(q-1)/8` are always rejected.
    ///
    /// Stops at the first violating coefficient; which one fails does not
    /// depend on secret data.
    #[must_use]
    pub fn is_below(&self, bound: i32) -> bool {
        if bound > (Q - 1) / 8 {
            return false;
        }
        self.0.iter().all(|&a| {
            let t = a - ((a >> 31) & (2 * a));
            t < bound
        })
    }

    /// Sample coefficients in `[-eta, eta]` from SHAKE-256 blocks.
    #[must_use]
    pub fn sample_eta<E: EtaWidth>(fill: impl FnMut(&mut [u8])) -> Self {
        let mut p = Self::zero();
        sample::reject_eta::<E>(&mut p.0, fill);
        p
    }

    /// Sparse challenge with `tau` coefficients in `{-1, 1}`.
    #[must_use]
    pub fn challenge(tau: usize, fill: impl FnMut(&mut [u8])) -> Self {
        let mut p = Self::zero();
        sample::challenge(&mut p.0, tau, fill);
        p
    }

    pub fn pack_t1(&self, r: &mut [u8]) {
        pack::pack_t1(r, &self.0);
    }

    #[must_use]
    pub fn unpack_t1(a: &[u8]) -> Self {
        let mut p = Self::zero();
        pack::unpack_t1(&mut p.0, a);
        p
    }

    pub fn pack_t0(&self, r: &mut [u8]) {
        pack::pack_t0(r, &self.0);
    }

    #[must_use]
    pub fn unpack_t0(a: &[u8]) -> Self {
        let mut p = Self::zero();
        pack::unpack_t0(&mut p.0, a);
        p
    }

    pub fn pack_eta<E: EtaWidth>(&self, r: &mut [u8]) {
        E::pack(r, &self.0);
    }

    #[must_use]
    pub fn unpack_eta<E: EtaWidth>(a: &[u8]) -> Self {
        let mut p = Self::zero();
        E::unpack(&mut p.0, a);
        p
    }

    pub fn pack_z<G: Gamma1Width>(&self, r: &mut [u8]) {
        G::pack_z(r, &self.0);
    }

    /// Decode `z`; also used to expand the masking vector from
    /// `POLYZ_BYTES` of SHAKE-256 output.
    #[must_use]
    pub fn unpack_z<G: Gamma1Width>(a: &[u8]) -> Self {
        let mut p = Self::zero();
        G::unpack_z(&mut p.0, a);
        p
    }

    pub fn pack_w1<G: Gamma2Width>(&self, r: &mut [u8]) {
        G::pack_w1(r, &self.0);
    }

    #[must_use]
    pub const fn coeffs(&self) -> &[i32; N] {
        &self.0
    }

    #[must_use]
    pub const fn coeffs_mut(&mut self) -> &mut [i32; N] {
        &mut self.0
    }
}

impl From<[i32; N]> for Polynomial {
    #[inline]
    fn from(coeffs: [i32; N]) -> Self {
        Self(coeffs)
    }
}

impl Default for Polynomial {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl core::fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Polynomial")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl<'b> ops::Add<&'b Polynomial> for &Polynomial {
    type Output = Polynomial;
    #[inline]
    fn add(self, rhs: &'b Polynomial) -> Polynomial {
        let mut r = *self;
        r += rhs;
        r
    }
}

impl<'b> ops::Sub<&'b Polynomial> for &Polynomial {
    type Output = Polynomial;
    #[inline]
    fn sub(self, rhs: &'b Polynomial) -> Polynomial {
        let mut r = *self;
        r -= rhs;
        r
    }
}

impl ops::AddAssign<&Self> for Polynomial {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += *b;
        }
    }
}

impl ops::SubAssign<&Self> for Polynomial {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a -= *b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Gamma2Div32, reduce::freeze};

    fn ramp(scale: i32) -> Polynomial {
        Polynomial(core::array::from_fn(|i| (i as i32 * scale) % Q))
    }

    #[test]
    fn is_below_matches_absolute_value() {
        let mut p = Polynomial::zero();
        p.0[10] = -99;
        p.0[20] = 99;
        assert!(p.is_below(100));
        assert!(!p.is_below(99));
    }

    #[test]
    fn is_below_rejects_huge_bounds() {
        assert!(!Polynomial::zero().is_below((Q - 1) / 8 + 1));
        assert!(Polynomial::zero().is_below((Q - 1) / 8));
    }

    #[test]
    fn power2round_recombines() {
        let t = ramp(32_771);
        let (mut t1, t0) = t.power2round();
        t1.shift_left();
        assert_eq!(&t1 + &t0, t);
    }

    #[test]
    fn decompose_then_use_hint_without_hint() {
        let w = ramp(65_537);
        let (w1, _) = w.decompose::<Gamma2Div32>();
        assert_eq!(w.use_hint::<Gamma2Div32>(&Polynomial::zero()), w1);
    }

    #[test]
    fn make_hint_counts_ones() {
        let mut a0 = Polynomial::zero();
        a0.0[0] = Gamma2Div32::GAMMA2 + 1;
        a0.0[1] = -Gamma2Div32::GAMMA2 - 1;
        let (h, weight) = Polynomial::make_hint::<Gamma2Div32>(&a0, &Polynomial::zero());
        assert_eq!(weight, 2);
        assert_eq!(&h.0[..3], &[1, 1, 0]);
    }

    #[test]
    fn ntt_multiplication_commutes() {
        let a = ramp(7);
        let b = ramp(13);
        let mut ab = a.ntt().pointwise(&b.ntt()).ntt_inverse();
        let mut ba = b.ntt().pointwise(&a.ntt()).ntt_inverse();
        ab.reduce();
        ba.reduce();
        ab.caddq();
        ba.caddq();
        assert_eq!(ab, ba);
        assert!(ab.0.iter().all(|&c| c == freeze(c)));
    }
}
