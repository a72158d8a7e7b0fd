use core::ops;

use super::NttPolynomial;
use crate::{
    N, SYMBYTES,
    compress::CompressWidth,
    encode, ntt,
    reduce::barrett_reduce,
    sample::CbdWidth,
};

/// Polynomial in standard (coefficient) form over `R_q = Z_q[X]/(X^{256}+1)`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Polynomial(pub(crate) [i16; N]);

impl Polynomial {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i16; N])
    }

    /// Consuming forward NTT; the result is Barrett-reduced.
    #[must_use]
    pub fn ntt(mut self) -> NttPolynomial {
        ntt::forward_ntt(&mut self.0);
        let mut p = NttPolynomial(self.0);
        p.reduce();
        p
    }

    pub fn reduce(&mut self) {
        for c in &mut self.0 {
            *c = barrett_reduce(*c);
        }
    }

    /// Compress to `D` bits and write to buffer.
    pub fn compress<D: CompressWidth>(&self, r: &mut [u8]) {
        D::compress_poly(r, &self.0);
    }

    /// Decompress from buffer with `D` bits.
    #[must_use]
    pub fn decompress<D: CompressWidth>(a: &[u8]) -> Self {
        let mut p = Self::zero();
        D::decompress_poly(&mut p.0, a);
        p
    }

    /// Decode a 32-byte message into a polynomial.
    #[must_use]
    pub fn from_message(msg: &[u8; SYMBYTES]) -> Self {
        let mut p = Self::zero();
        encode::message_to_coeffs(&mut p.0, msg);
        p
    }

    /// Encode polynomial to 32-byte message.
    #[must_use]
    pub fn to_message(&self) -> [u8; SYMBYTES] {
        let mut msg = [0u8; SYMBYTES];
        encode::coeffs_to_message(&mut msg, &self.0);
        msg
    }

    /// Sample noise from `CBD_eta` given `eta * N / 4` bytes of PRF output.
    #[must_use]
    pub fn sample_cbd<Eta: CbdWidth>(buf: &[u8]) -> Self {
        let mut p = Self::zero();
        Eta::sample(&mut p.0, buf);
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

impl From<[i16; N]> for Polynomial {
    #[inline]
    fn from(coeffs: [i16; N]) -> Self {
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
    use crate::{Q, compress::D4, sample::Eta2};

    #[test]
    fn add_sub_inverse() {
        let mut a = Polynomial::zero();
        let mut b = Polynomial::zero();
        for i in 0..N {
            a.0[i] = (i as i16) % Q;
            b.0[i] = ((N - i) as i16) % Q;
        }
        let sum = &a + &b;
        let recovered = &sum - &b;
        assert_eq!(a, recovered);
    }

    #[test]
    fn msg_roundtrip() {
        let msg: [u8; SYMBYTES] = core::array::from_fn(|i| (i * 37) as u8);
        let p = Polynomial::from_message(&msg);
        assert_eq!(msg, p.to_message());
    }

    #[test]
    fn message_survives_small_noise() {
        let msg: [u8; SYMBYTES] = core::array::from_fn(|i| (i * 11 + 5) as u8);
        let mut p = Polynomial::from_message(&msg);
        let noise = Polynomial::sample_cbd::<Eta2>(&[0x3Cu8; 128]);
        p += &noise;
        p.reduce();
        assert_eq!(p.to_message(), msg);
    }

    #[test]
    fn ntt_output_is_reduced() {
        let mut p = Polynomial::zero();
        for (i, c) in p.0.iter_mut().enumerate() {
            *c = ((i * 31) % 3329) as i16 - 1664;
        }
        let n = p.ntt();
        assert!(n.coeffs().iter().all(|c| c.abs() <= (Q - 1) / 2));
    }

    #[test]
    fn compress_roundtrip_via_polynomial() {
        let mut p = Polynomial::zero();
        for (i, c) in p.0.iter_mut().enumerate() {
            *c = ((i * 97) % 3329) as i16;
        }
        let mut buf = [0u8; 128];
        p.compress::<D4>(&mut buf);
        let q = Polynomial::decompress::<D4>(&buf);
        let mut again = [0u8; 128];
        q.compress::<D4>(&mut again);
        assert_eq!(buf, again);
    }
}
