use core::ops;

use super::Polynomial;
use crate::{
    N, encode, ntt,
    reduce::{MONT, barrett_reduce, fqmul},
    sample,
};

/// Polynomial in NTT (bit-reversed) domain.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct NttPolynomial(pub(crate) [i16; N]);

impl NttPolynomial {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i16; N])
    }

    /// Inverse NTT; the result carries one Montgomery factor `R`, which
    /// cancels the `R^{-1}` left by [`Self::basemul`].
    #[must_use]
    pub fn ntt_inverse(mut self) -> Polynomial {
        ntt::inverse_ntt(&mut self.0);
        Polynomial(self.0)
    }

    /// Sample a matrix entry uniformly from XOF output. The XOF output is
    /// interpreted directly as NTT-domain coefficients.
    #[must_use]
    pub fn sample_uniform(fill: impl FnMut(&mut [u8])) -> Self {
        let mut p = Self::zero();
        sample::reject_uniform(&mut p.0, fill);
        p
    }

    pub fn reduce(&mut self) {
        for c in &mut self.0 {
            *c = barrett_reduce(*c);
        }
    }

    /// Multiply every coefficient by `R = 2^{16}`.
    pub fn to_mont(&mut self) {
        const F: i16 = ((MONT as i32 * MONT as i32) % crate::Q as i32) as i16;
        for c in &mut self.0 {
            *c = fqmul(*c, F);
        }
    }

    /// Pointwise basemul: 128 degree-1 multiplications, leaving `R^{-1}`.
    #[must_use]
    pub fn basemul(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        let blocks = r
            .0
            .chunks_exact_mut(4)
            .zip(self.0.chunks_exact(4).zip(other.0.chunks_exact(4)));
        for (i, (out, (a, b))) in blocks.enumerate() {
            let zeta = ntt::ZETAS[64 + i];
            let lo = ntt::basemul([a[0], a[1]], [b[0], b[1]], zeta);
            let hi = ntt::basemul([a[2], a[3]], [b[2], b[3]], -zeta);
            out.copy_from_slice(&[lo[0], lo[1], hi[0], hi[1]]);
        }
        r
    }

    /// Serialize to bytes (12-bit packing, 384 bytes).
    pub fn to_bytes(&self, r: &mut [u8]) {
        encode::coeffs_to_bytes(r, &self.0);
    }

    /// Deserialize from bytes (12-bit unpacking).
    #[must_use]
    pub fn from_bytes(a: &[u8]) -> Self {
        let mut p = Self::zero();
        encode::bytes_to_coeffs(&mut p.0, a);
        p
    }

    #[must_use]
    pub const fn coeffs(&self) -> &[i16; N] {
        &self.0
    }

    #[must_use]
    pub const fn coeffs_mut(&mut self) -> &mut [i16; N] {
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

impl<'b> ops::Add<&'b NttPolynomial> for &NttPolynomial {
    type Output = NttPolynomial;
    #[inline]
    fn add(self, rhs: &'b NttPolynomial) -> NttPolynomial {
        let mut r = *self;
        r += rhs;
        r
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
