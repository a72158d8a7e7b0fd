use core::ops;

use super::{NttPolynomial, Polynomial};
use crate::{
    POLYT0_PACKEDBYTES, POLYT1_PACKEDBYTES, pack, pack::Gamma1Width, rounding::Gamma2Width,
    sample::EtaWidth,
};

/// A vector of `K` polynomials in standard (coefficient) form.
#[derive(Clone, PartialEq, Eq)]
pub struct Vector<const K: usize> {
    pub(crate) polys: [Polynomial; K],
}

/// A vector of `K` polynomials in NTT domain.
#[derive(Clone, PartialEq, Eq)]
pub struct NttVector<const K: usize> {
    pub(crate) polys: [NttPolynomial; K],
}

impl<const K: usize> Vector<K> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            polys: [Polynomial::zero(); K],
        }
    }

    /// Build a vector entry by entry, in index order.
    #[must_use]
    pub fn from_fn(f: impl FnMut(usize) -> Polynomial) -> Self {
        Self {
            polys: core::array::from_fn(f),
        }
    }

    #[must_use]
    pub fn ntt(&self) -> NttVector<K> {
        NttVector {
            polys: self.polys.map(Polynomial::ntt),
        }
    }

    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    pub fn caddq(&mut self) {
        for p in &mut self.polys {
            p.caddq();
        }
    }

    pub fn shift_left(&mut self) {
        for p in &mut self.polys {
            p.shift_left();
        }
    }

    #[must_use]
    pub fn power2round(&self) -> (Self, Self) {
        let mut hi = Self::zero();
        let mut lo = Self::zero();
        for ((p, a1), a0) in self.polys.iter().zip(&mut hi.polys).zip(&mut lo.polys) {
            (*a1, *a0) = p.power2round();
        }
        (hi, lo)
    }

    #[must_use]
    pub fn decompose<G: Gamma2Width>(&self) -> (Self, Self) {
        let mut hi = Self::zero();
        let mut lo = Self::zero();
        for ((p, a1), a0) in self.polys.iter().zip(&mut hi.polys).zip(&mut lo.polys) {
            (*a1, *a0) = p.decompose::<G>();
        }
        (hi, lo)
    }

    /// Hint vector and its total number of ones.
    #[must_use]
    pub fn make_hint<G: Gamma2Width>(a0: &Self, a1: &Self) -> (Self, usize) {
        let mut h = Self::zero();
        let mut weight = 0;
        for ((h, a0), a1) in h.polys.iter_mut().zip(&a0.polys).zip(&a1.polys) {
            let (p, w) = Polynomial::make_hint::<G>(a0, a1);
            *h = p;
            weight += w;
        }
        (h, weight)
    }

    #[must_use]
    pub fn use_hint<G: Gamma2Width>(&self, hint: &Self) -> Self {
        Self::from_fn(|i| self.polys[i].use_hint::<G>(&hint.polys[i]))
    }

    /// See [`Polynomial::is_below`].
    #[must_use]
    pub fn is_below(&self, bound: i32) -> bool {
        self.polys.iter().all(|p| p.is_below(bound))
    }

    pub fn pack_t1(&self, r: &mut [u8]) {
        for (p, out) in self.polys.iter().zip(r.chunks_exact_mut(POLYT1_PACKEDBYTES)) {
            p.pack_t1(out);
        }
    }

    #[must_use]
    pub fn unpack_t1(a: &[u8]) -> Self {
        Self::unpack_each(a, POLYT1_PACKEDBYTES, Polynomial::unpack_t1)
    }

    pub fn pack_t0(&self, r: &mut [u8]) {
        for (p, out) in self.polys.iter().zip(r.chunks_exact_mut(POLYT0_PACKEDBYTES)) {
            p.pack_t0(out);
        }
    }

    #[must_use]
    pub fn unpack_t0(a: &[u8]) -> Self {
        Self::unpack_each(a, POLYT0_PACKEDBYTES, Polynomial::unpack_t0)
    }

    pub fn pack_eta<E: EtaWidth>(&self, r: &mut [u8]) {
        for (p, out) in self.polys.iter().zip(r.chunks_exact_mut(E::POLY_BYTES)) {
            p.pack_eta::<E>(out);
        }
    }

    #[must_use]
    pub fn unpack_eta<E: EtaWidth>(a: &[u8]) -> Self {
        Self::unpack_each(a, E::POLY_BYTES, Polynomial::unpack_eta::<E>)
    }

    pub fn pack_z<G: Gamma1Width>(&self, r: &mut [u8]) {
        for (p, out) in self.polys.iter().zip(r.chunks_exact_mut(G::POLYZ_BYTES)) {
            p.pack_z::<G>(out);
        }
    }

    #[must_use]
    pub fn unpack_z<G: Gamma1Width>(a: &[u8]) -> Self {
        Self::unpack_each(a, G::POLYZ_BYTES, Polynomial::unpack_z::<G>)
    }

    pub fn pack_w1<G: Gamma2Width>(&self, r: &mut [u8]) {
        for (p, out) in self.polys.iter().zip(r.chunks_exact_mut(G::W1_POLY_BYTES)) {
            p.pack_w1::<G>(out);
        }
    }

    /// See [`pack::pack_hint`].
    pub fn pack_hint(&self, r: &mut [u8], omega: usize) {
        pack::pack_hint(r, self, omega);
    }

    /// See [`pack::unpack_hint`].
    #[must_use]
    pub fn unpack_hint(a: &[u8], omega: usize) -> Option<Self> {
        pack::unpack_hint(a, omega)
    }

    fn unpack_each(a: &[u8], poly_bytes: usize, decode: impl Fn(&[u8]) -> Polynomial) -> Self {
        let mut v = Self::zero();
        for (p, chunk) in v.polys.iter_mut().zip(a.chunks_exact(poly_bytes)) {
            *p = decode(chunk);
        }
        v
    }

    #[must_use]
    pub const fn polys(&self) -> &[Polynomial; K] {
        &self.polys
    }

    #[must_use]
    pub const fn polys_mut(&mut self) -> &mut [Polynomial; K] {
        &mut self.polys
    }
}

impl<const K: usize> NttVector<K> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            polys: [NttPolynomial::zero(); K],
        }
    }

    #[must_use]
    pub fn ntt_inverse(self) -> Vector<K> {
        Vector {
            polys: self.polys.map(NttPolynomial::ntt_inverse),
        }
    }

    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    /// Multiply every entry by the same NTT-domain polynomial.
    #[must_use]
    pub fn scale(&self, c: &NttPolynomial) -> Self {
        Self {
            polys: core::array::from_fn(|i| c.pointwise(&self.polys[i])),
        }
    }

    /// `sum_i(self[i] * other[i])` in NTT domain, not reduced.
    #[must_use]
    pub fn inner_product(&self, other: &Self) -> NttPolynomial {
        let mut acc = NttPolynomial::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            acc += &a.pointwise(b);
        }
        acc
    }

    #[must_use]
    pub const fn polys(&self) -> &[NttPolynomial; K] {
        &self.polys
    }

    #[must_use]
    pub const fn polys_mut(&mut self) -> &mut [NttPolynomial; K] {
        &mut self.polys
    }
}

/// K x L matrix of NTT-domain polynomials, expanded from `rho` on use.
pub struct NttMatrix<const K: usize, const L: usize> {
    pub(crate) rows: [NttVector<L>; K],
}

impl<const K: usize, const L: usize> NttMatrix<K, L> {
    /// Expand the matrix cell by cell, row-major; `cell(i, j)` yields entry
    /// `(i, j)`.
    #[must_use]
    pub fn from_fn(mut cell: impl FnMut(usize, usize) -> NttPolynomial) -> Self {
        let mut rows: [NttVector<L>; K] = core::array::from_fn(|_| NttVector::zero());
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, p) in row.polys.iter_mut().enumerate() {
                *p = cell(i, j);
            }
        }
        Self { rows }
    }

    /// `A * v`, leaving `2^{-32}` on every entry; not reduced.
    #[must_use]
    pub fn mul_vec(&self, v: &NttVector<L>) -> NttVector<K> {
        NttVector {
            polys: core::array::from_fn(|i| self.rows[i].inner_product(v)),
        }
    }

    #[must_use]
    pub const fn rows(&self) -> &[NttVector<L>; K] {
        &self.rows
    }
}

impl<'b, const K: usize> ops::Add<&'b Vector<K>> for &Vector<K> {
    type Output = Vector<K>;
    fn add(self, rhs: &'b Vector<K>) -> Vector<K> {
        let mut r = self.clone();
        r += rhs;
        r
    }
}

impl<'b, const K: usize> ops::Sub<&'b Vector<K>> for &Vector<K> {
    type Output = Vector<K>;
    fn sub(self, rhs: &'b Vector<K>) -> Vector<K> {
        let mut r = self.clone();
        r -= rhs;
        r
    }
}

impl<const K: usize> ops::AddAssign<&Self> for Vector<K> {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a += b;
        }
    }
}

impl<const K: usize> ops::SubAssign<&Self> for Vector<K> {
    fn sub_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a -= b;
        }
    }
}

impl<const K: usize> ops::SubAssign<&Self> for NttVector<K> {
    fn sub_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a -= b;
        }
    }
}

impl<const K: usize> Default for Vector<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> Default for NttVector<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> core::fmt::Debug for Vector<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.polys.iter()).finish()
    }
}

impl<const K: usize> core::fmt::Debug for NttVector<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.polys.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Eta2, Gamma1Pow17, N, Q};

    #[test]
    fn matrix_cells_are_visited_row_major() {
        let m = NttMatrix::<2, 3>::from_fn(|i, j| {
            let mut p = NttPolynomial::zero();
            p.0[0] = (10 * i + j) as i32;
            p
        });
        let firsts: [[i32; 3]; 2] =
            core::array::from_fn(|i| core::array::from_fn(|j| m.rows()[i].polys()[j].coeffs()[0]));
        assert_eq!(firsts, [[0, 1, 2], [10, 11, 12]]);
    }

    #[test]
    fn t1_t0_vector_roundtrip() {
        let v = Vector::<2>::from_fn(|k| {
            Polynomial(core::array::from_fn(|i| ((k * N + i) as i32 * 3) & 0x3FF))
        });
        let mut buf = [0u8; 2 * POLYT1_PACKEDBYTES];
        v.pack_t1(&mut buf);
        assert_eq!(Vector::<2>::unpack_t1(&buf), v);

        let w = Vector::<2>::from_fn(|k| {
            Polynomial(core::array::from_fn(|i| ((k * N + i) as i32 % 8191) - 4095))
        });
        let mut buf = [0u8; 2 * POLYT0_PACKEDBYTES];
        w.pack_t0(&mut buf);
        assert_eq!(Vector::<2>::unpack_t0(&buf), w);
    }

    #[test]
    fn eta_and_z_vector_roundtrip() {
        let v = Vector::<3>::from_fn(|k| Polynomial(core::array::from_fn(|i| ((k + i) % 5) as i32 - 2)));
        let mut buf = [0u8; 3 * 96];
        v.pack_eta::<Eta2>(&mut buf);
        assert_eq!(Vector::<3>::unpack_eta::<Eta2>(&buf), v);

        let mut buf = [0u8; 3 * 576];
        v.pack_z::<Gamma1Pow17>(&mut buf);
        assert_eq!(Vector::<3>::unpack_z::<Gamma1Pow17>(&buf), v);
    }

    #[test]
    fn sub_then_add_restores() {
        let a = Vector::<2>::from_fn(|k| Polynomial([k as i32 + 1; N]));
        let b = Vector::<2>::from_fn(|_| Polynomial([Q - 5; N]));
        assert_eq!(&(&a - &b) + &b, a);
    }

    #[test]
    fn scale_by_ntt_one() {
        let mut one = Polynomial::zero();
        one.0[0] = crate::reduce::MONT;
        let one = one.ntt();
        let v = Vector::<2>::from_fn(|k| Polynomial([k as i32 * 100; N]));
        let mut back = v.ntt().scale(&one).ntt_inverse();
        back.reduce();
        back.caddq();
        // Inverse NTT adds a factor 2^32 mod q.
        for (p, q) in back.polys().iter().zip(v.polys()) {
            for (x, y) in p.coeffs().iter().zip(q.coeffs()) {
                assert_eq!(*x as i64, (*y as i64 * crate::reduce::MONT as i64).rem_euclid(Q as i64));
            }
        }
    }
}
