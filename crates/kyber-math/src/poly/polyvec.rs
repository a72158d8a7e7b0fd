use core::ops;

use super::{NttPolynomial, Polynomial};
use crate::{POLYBYTES, compress::CompressWidth};

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
    pub fn ntt(self) -> NttVector<K> {
        NttVector {
            polys: self.polys.map(Polynomial::ntt),
        }
    }

    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    pub fn compress<D: CompressWidth>(&self, r: &mut [u8]) {
        for (p, out) in self.polys.iter().zip(r.chunks_exact_mut(D::POLY_BYTES)) {
            p.compress::<D>(out);
        }
    }

    #[must_use]
    pub fn decompress<D: CompressWidth>(a: &[u8]) -> Self {
        let mut v = Self::zero();
        for (p, chunk) in v.polys.iter_mut().zip(a.chunks_exact(D::POLY_BYTES)) {
            *p = Polynomial::decompress::<D>(chunk);
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

    /// `sum_i(self[i] * other[i])` in NTT domain, Barrett-reduced.
    #[must_use]
    pub fn inner_product(&self, other: &Self) -> NttPolynomial {
        let mut acc = NttPolynomial::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            acc += &a.basemul(b);
        }
        acc.reduce();
        acc
    }

    /// Serialize to `K * 384` bytes (12-bit packing).
    pub fn to_bytes(&self, r: &mut [u8]) {
        for (p, out) in self.polys.iter().zip(r.chunks_exact_mut(POLYBYTES)) {
            p.to_bytes(out);
        }
    }

    #[must_use]
    pub fn from_bytes(a: &[u8]) -> Self {
        let mut v = Self::zero();
        for (p, chunk) in v.polys.iter_mut().zip(a.chunks_exact(POLYBYTES)) {
            *p = NttPolynomial::from_bytes(chunk);
        }
        v
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

/// K x K matrix of NTT-domain polynomials (public matrix A or its transpose).
///
/// Never serialised: it is re-expanded from its 32-byte seed on every use.
pub struct NttMatrix<const K: usize> {
    pub(crate) rows: [NttVector<K>; K],
}

impl<const K: usize> NttMatrix<K> {
    /// Expand the matrix cell by cell, row-major; `cell(i, j)` yields entry
    /// `(i, j)`.
    #[must_use]
    pub fn from_fn(mut cell: impl FnMut(usize, usize) -> NttPolynomial) -> Self {
        let mut rows: [NttVector<K>; K] = core::array::from_fn(|_| NttVector::zero());
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, p) in row.polys.iter_mut().enumerate() {
                *p = cell(i, j);
            }
        }
        Self { rows }
    }

    /// `A * v` with Montgomery conversion on each result row.
    #[must_use]
    pub fn mul_vec_tomont(&self, v: &NttVector<K>) -> NttVector<K> {
        let mut result = self.mul_vec(v);
        for p in &mut result.polys {
            p.to_mont();
        }
        result
    }

    /// `A * v` without Montgomery conversion.
    #[must_use]
    pub fn mul_vec(&self, v: &NttVector<K>) -> NttVector<K> {
        NttVector {
            polys: core::array::from_fn(|i| self.rows[i].inner_product(v)),
        }
    }

    #[must_use]
    pub const fn rows(&self) -> &[NttVector<K>; K] {
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

impl<const K: usize> ops::AddAssign<&Self> for Vector<K> {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a += b;
        }
    }
}

impl<const K: usize> ops::AddAssign<&Self> for NttVector<K> {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a += b;
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
