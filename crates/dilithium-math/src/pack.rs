//! Bit-packing of `t1`, `t0`, `z` and hint vectors, plus the sealed gamma1
//! widths that select the `z` encoding.

use crate::{D, N, POLYT0_PACKEDBYTES, POLYT1_PACKEDBYTES, poly::Vector};

mod sealed {
    pub trait Sealed {}
}

/// Sealed trait for the masking range `gamma1`.
pub trait Gamma1Width: sealed::Sealed {
    const GAMMA1: i32;
    /// Packed size of one `z` polynomial.
    const POLYZ_BYTES: usize;

    /// Pack coefficients in `(-gamma1, gamma1]`.
    fn pack_z(r: &mut [u8], a: &[i32; N]);

    /// Inverse of [`Gamma1Width::pack_z`]; every bit pattern decodes to a
    /// coefficient in `(-gamma1, gamma1]`.
    fn unpack_z(r: &mut [i32; N], a: &[u8]);
}

/// `gamma1 = 2^17`: 18 bits per coefficient.
#[derive(Debug, Clone, Copy)]
pub struct Gamma1Pow17;

/// `gamma1 = 2^19`: 20 bits per coefficient.
#[derive(Debug, Clone, Copy)]
pub struct Gamma1Pow19;

impl sealed::Sealed for Gamma1Pow17 {}
impl Gamma1Width for Gamma1Pow17 {
    const GAMMA1: i32 = 1 << 17;
    const POLYZ_BYTES: usize = 576;

    fn pack_z(r: &mut [u8], a: &[i32; N]) {
        debug_assert!(r.len() >= Self::POLYZ_BYTES);
        for (out, c) in r.chunks_exact_mut(9).zip(a.chunks_exact(4)) {
            let t: [u32; 4] = core::array::from_fn(|j| (Self::GAMMA1 - c[j]) as u32);
            out[0] = t[0] as u8;
            out[1] = (t[0] >> 8) as u8;
            out[2] = ((t[0] >> 16) | (t[1] << 2)) as u8;
            out[3] = (t[1] >> 6) as u8;
            out[4] = ((t[1] >> 14) | (t[2] << 4)) as u8;
            out[5] = (t[2] >> 4) as u8;
            out[6] = ((t[2] >> 12) | (t[3] << 6)) as u8;
            out[7] = (t[3] >> 2) as u8;
            out[8] = (t[3] >> 10) as u8;
        }
    }

    fn unpack_z(r: &mut [i32; N], a: &[u8]) {
        debug_assert!(a.len() >= Self::POLYZ_BYTES);
        for (out, b) in r.chunks_exact_mut(4).zip(a.chunks_exact(9)) {
            let b: [u32; 9] = core::array::from_fn(|j| b[j] as u32);
            let t = [
                b[0] | (b[1] << 8) | (b[2] << 16),
                (b[2] >> 2) | (b[3] << 6) | (b[4] << 14),
                (b[4] >> 4) | (b[5] << 4) | (b[6] << 12),
                (b[6] >> 6) | (b[7] << 2) | (b[8] << 10),
            ];
            for (c, t) in out.iter_mut().zip(t) {
                *c = Self::GAMMA1 - (t & 0x3_FFFF) as i32;
            }
        }
    }
}

impl sealed::Sealed for Gamma1Pow19 {}
impl Gamma1Width for Gamma1Pow19 {
    const GAMMA1: i32 = 1 << 19;
    const POLYZ_BYTES: usize = 640;

    fn pack_z(r: &mut [u8], a: &[i32; N]) {
        debug_assert!(r.len() >= Self::POLYZ_BYTES);
        for (out, c) in r.chunks_exact_mut(5).zip(a.chunks_exact(2)) {
            let t0 = (Self::GAMMA1 - c[0]) as u32;
            let t1 = (Self::GAMMA1 - c[1]) as u32;
            out[0] = t0 as u8;
            out[1] = (t0 >> 8) as u8;
            out[2] = ((t0 >> 16) | (t1 << 4)) as u8;
            out[3] = (t1 >> 4) as u8;
            out[4] = (t1 >> 12) as u8;
        }
    }

    fn unpack_z(r: &mut [i32; N], a: &[u8]) {
        debug_assert!(a.len() >= Self::POLYZ_BYTES);
        for (out, b) in r.chunks_exact_mut(2).zip(a.chunks_exact(5)) {
            let b: [u32; 5] = core::array::from_fn(|j| b[j] as u32);
            let t0 = (b[0] | (b[1] << 8) | (b[2] << 16)) & 0xF_FFFF;
            let t1 = (b[2] >> 4) | (b[3] << 4) | (b[4] << 12);
            out[0] = Self::GAMMA1 - t0 as i32;
            out[1] = Self::GAMMA1 - t1 as i32;
        }
    }
}

/// Pack `t1` (coefficients in `[0, 2^10)`) into 320 bytes.
pub fn pack_t1(r: &mut [u8], a: &[i32; N]) {
    debug_assert!(r.len() >= POLYT1_PACKEDBYTES);
    for (out, c) in r.chunks_exact_mut(5).zip(a.chunks_exact(4)) {
        out[0] = c[0] as u8;
        out[1] = ((c[0] >> 8) | (c[1] << 2)) as u8;
        out[2] = ((c[1] >> 6) | (c[2] << 4)) as u8;
        out[3] = ((c[2] >> 4) | (c[3] << 6)) as u8;
        out[4] = (c[3] >> 2) as u8;
    }
}

pub fn unpack_t1(r: &mut [i32; N], a: &[u8]) {
    debug_assert!(a.len() >= POLYT1_PACKEDBYTES);
    for (out, b) in r.chunks_exact_mut(4).zip(a.chunks_exact(5)) {
        let b: [u32; 5] = core::array::from_fn(|j| b[j] as u32);
        out[0] = ((b[0] | (b[1] << 8)) & 0x3FF) as i32;
        out[1] = (((b[1] >> 2) | (b[2] << 6)) & 0x3FF) as i32;
        out[2] = (((b[2] >> 4) | (b[3] << 4)) & 0x3FF) as i32;
        out[3] = (((b[3] >> 6) | (b[4] << 2)) & 0x3FF) as i32;
    }
}

const T0_OFFSET: i32 = 1 << (D - 1);

/// Pack `t0` (coefficients in `(-2^12, 2^12]`) into 416 bytes.
pub fn pack_t0(r: &mut [u8], a: &[i32; N]) {
    debug_assert!(r.len() >= POLYT0_PACKEDBYTES);
    for (out, c) in r.chunks_exact_mut(13).zip(a.chunks_exact(8)) {
        let t: [u32; 8] = core::array::from_fn(|j| (T0_OFFSET - c[j]) as u32);
        out[0] = t[0] as u8;
        out[1] = ((t[0] >> 8) | (t[1] << 5)) as u8;
        out[2] = (t[1] >> 3) as u8;
        out[3] = ((t[1] >> 11) | (t[2] << 2)) as u8;
        out[4] = ((t[2] >> 6) | (t[3] << 7)) as u8;
        out[5] = (t[3] >> 1) as u8;
        out[6] = ((t[3] >> 9) | (t[4] << 4)) as u8;
        out[7] = (t[4] >> 4) as u8;
        out[8] = ((t[4] >> 12) | (t[5] << 1)) as u8;
        out[9] = ((t[5] >> 7) | (t[6] << 6)) as u8;
        out[10] = (t[6] >> 2) as u8;
        out[11] = ((t[6] >> 10) | (t[7] << 3)) as u8;
        out[12] = (t[7] >> 5) as u8;
    }
}

pub fn unpack_t0(r: &mut [i32; N], a: &[u8]) {
    debug_assert!(a.len() >= POLYT0_PACKEDBYTES);
    for (out, b) in r.chunks_exact_mut(8).zip(a.chunks_exact(13)) {
        let b: [u32; 13] = core::array::from_fn(|j| b[j] as u32);
        let t = [
            b[0] | (b[1] << 8),
            (b[1] >> 5) | (b[2] << 3) | (b[3] << 11),
            (b[3] >> 2) | (b[4] << 6),
            (b[4] >> 7) | (b[5] << 1) | (b[6] << 9),
            (b[6] >> 4) | (b[7] << 4) | (b[8] << 12),
            (b[8] >> 1) | (b[9] << 7),
            (b[9] >> 6) | (b[10] << 2) | (b[11] << 10),
            (b[11] >> 3) | (b[12] << 5),
        ];
        for (c, t) in out.iter_mut().zip(t) {
            *c = T0_OFFSET - (t & 0x1FFF) as i32;
        }
    }
}

/// Pack a hint vector with at most `omega` ones into `omega + K` bytes:
/// the positions of the ones, then the running count after each
/// polynomial.
pub fn pack_hint<const K: usize>(r: &mut [u8], h: &Vector<K>, omega: usize) {
    debug_assert!(r.len() >= omega + K);
    r[..omega + K].fill(0);

    let mut k = 0;
    for (i, poly) in h.polys().iter().enumerate() {
        for (j, &c) in poly.coeffs().iter().enumerate() {
            if c != 0 {
                r[k] = j as u8;
                k += 1;
            }
        }
        r[omega + i] = k as u8;
    }
}

/// Decode a hint vector, rejecting every non-canonical encoding: counts
/// must be non-decreasing and at most `omega`, positions within one
/// polynomial strictly increasing and unused position slots zero.
///
/// Returns `None` on malformed input; never panics.
pub fn unpack_hint<const K: usize>(a: &[u8], omega: usize) -> Option<Vector<K>> {
    if a.len() < omega + K {
        return None;
    }

    let mut h = Vector::<K>::zero();
    let mut k = 0;
    for (i, poly) in h.polys_mut().iter_mut().enumerate() {
        let end = a[omega + i] as usize;
        if end < k || end > omega {
            return None;
        }
        for j in k..end {
            if j > k && a[j] <= a[j - 1] {
                return None;
            }
            poly.coeffs_mut()[a[j] as usize] = 1;
        }
        k = end;
    }

    a[k..omega].iter().all(|&b| b == 0).then_some(h)
}
