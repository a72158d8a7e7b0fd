use core::ops;

use super::Polynomial;
use crate::{
    N, ntt,
    reduce::{montgomery_reduce, reduce32},
    sample,
};

/// Polynomial in NTT (bit-reversed) domain.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct NttPolynomial(pub(crate) [i32; N]);

impl NttPolynomial {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i32; N])
    }

    /// Inverse NTT; the result carries one Montgomery factor `2^{32}`,
    /// which cancels the `2^{-32}` left by [`Self::pointwise`].
    #[must_use]
    pub fn ntt_inverse(mut self) -> Polynomial {
        ntt::inverse_ntt(&mut self.0);
        Polynomial(self.0)
    }

    /// Sample a matrix entry uniformly from SHAKE-128 output, read directly
    /// as NTT-domain coefficients.
    #[must_use]
    pub fn sample_uniform(fill: impl FnMut(&mut [u8])) -> Self {
        let mut p = Self::zero();
        sample::reject_uniform(&mut p.0, fill);
        p
    }

    pub fn reduce(&mut self) {
        for c in &mut self.0 {
            *c = reduce32(*c);
        }
    }

    /// Coefficient-wise Montgomery product, leaving `2^{-32}`.
    #[must_use]
    pub fn pointwise(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for ((r, a), b) in r.0.iter_mut().zip(self.0.iter()).zip(other.0.iter()) {
            *r = montgomery_reduce(*a as i64 * *b as i64);
        }
        r
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

impl Default for NttPolynomial {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl core::fmt::Debug for NttPolynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NttPolynomial")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl ops::AddAssign<&Self> for NttPolynomial {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += *b;
        }
    }
}

impl ops::SubAssign<&Self> for NttPolynomial {
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
    use crate::{Q, reduce::freeze};

    #[test]
    fn sample_uniform_in_range() {
        let mut n = 0u8;
        let p = NttPolynomial::sample_uniform(|buf| {
            for b in buf.iter_mut() {
                n = n.wrapping_add(53);
                *b = n;
            }
        });
        assert!(p.0.iter().all(|c| (0..Q).contains(c)));
    }

    #[test]
    fn multiply_by_one() {
        // The constant polynomial 2^32 mod q in NTT form is the
        // multiplicative identity for `pointwise`.
        let mut one = Polynomial::zero();
        one.0[0] = crate::reduce::MONT;
        let one = one.ntt();

        let mut a = Polynomial::zero();
        for (i, c) in a.0.iter_mut().enumerate() {
            *c = (i as i32 * 1_000_003) % Q;
        }
        let back = a.ntt().pointwise(&one).ntt_inverse();
        for (x, y) in back.0.iter().zip(a.0.iter()) {
            let want = (*y as i64 * crate::reduce::MONT as i64).rem_euclid(Q as i64) as i32;
            assert_eq!(freeze(*x), want);
        }
    }
}
