//! Sealed compression-width traits and compress/decompress operations.
//!
//! Each compression width (D = 1, 4, 5, 10, 11) is a zero-sized marker type
//! implementing [`CompressWidth`], so the parameter sets pick their widths at
//! compile time. Rounding `round(x * 2^d / q)` is done with a fixed-point
//! reciprocal of q; no division instruction is emitted on secret data.

use crate::{N, Q, SYMBYTES, reduce::csubq};

mod sealed {
    pub trait Sealed {}
}

pub trait CompressWidthParams: sealed::Sealed {
    const D: u32;
    const POLY_BYTES: usize;
}

pub trait CompressWidth: CompressWidthParams {
    fn compress_poly(r: &mut [u8], coeffs: &[i16; N]);
    fn decompress_poly(coeffs: &mut [i16; N], a: &[u8]);
}

macro_rules! compress_width {
    ($($name:ident: $d:expr, $poly_bytes:expr),*) => {
        $(
            #[doc = concat!("Compression to ", stringify!($d), " bits per coefficient.")]
            #[derive(Debug, Clone, Copy)]
            pub struct $name;
            impl sealed::Sealed for $name {}
            impl CompressWidthParams for $name {
                const D: u32 = $d;
                const POLY_BYTES: usize = $poly_bytes;
            }
        )*
    };
}

compress_width!(
    D1: 1, SYMBYTES,
    D4: 4, 128,
    D5: 5, 160,
    D10: 10, 320,
    D11: 11, 352
);

/// `ceil(2^40 / q)`; exact quotient for every dividend below 2^28.
const RECIP_SHIFT: u32 = 40;
const RECIP: u64 = ((1u64 << RECIP_SHIFT) + (Q as u64) - 1) / (Q as u64);

/// `floor(x / q)` for `x < 2^28`.
#[inline]
const fn div_q(x: u32) -> u32 {
    (((x as u64) * RECIP) >> RECIP_SHIFT) as u32
}

/// `round(x * 2^d / q) mod 2^d` for a coefficient in `-q < x < q`.
#[inline]
#[must_use]
pub const fn compress_coeff(x: i16, d: u32) -> u16 {
    let t = div_q(((csubq(x) as u32) << d) + (Q as u32) / 2);
    (t & ((1u32 << d) - 1)) as u16
}

/// `round(y * q / 2^d)`.
#[inline]
#[must_use]
pub const fn decompress_coeff(y: u16, d: u32) -> i16 {
    (((y as u32) * (Q as u32) + (1u32 << (d - 1))) >> d) as i16
}

fn compress_all(a: &[i16; N], d: u32) -> [u16; N] {
    a.map(|c| compress_coeff(c, d))
}

fn decompress_all(t: &[u16; N], d: u32) -> [i16; N] {
    t.map(|y| decompress_coeff(y, d))
}

impl CompressWidth for D1 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        let t = compress_all(a, 1);
        for (byte, chunk) in r.iter_mut().zip(t.chunks_exact(8)) {
            *byte = chunk
                .iter()
                .enumerate()
                .fold(0u8, |b, (j, &c)| b | ((c as u8) << j));
        }
    }

    fn decompress_poly(r: &mut [i16; N], msg: &[u8]) {
        for (chunk, &byte) in r.chunks_exact_mut(8).zip(msg) {
            for (j, c) in chunk.iter_mut().enumerate() {
                let mask = -(((byte >> j) & 1) as i16);
                *c = mask & ((Q + 1) / 2);
            }
        }
    }
}

impl CompressWidth for D4 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        let t = compress_all(a, 4);
        for (byte, pair) in r.iter_mut().zip(t.chunks_exact(2)) {
            *byte = (pair[0] as u8) | ((pair[1] as u8) << 4);
        }
    }

    fn decompress_poly(r: &mut [i16; N], a: &[u8]) {
        let mut t = [0u16; N];
        for (pair, &byte) in t.chunks_exact_mut(2).zip(a) {
            pair[0] = (byte & 0x0F) as u16;
            pair[1] = (byte >> 4) as u16;
        }
        *r = decompress_all(&t, 4);
    }
}

impl CompressWidth for D5 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        let t = compress_all(a, 5);
        for (o, s) in r.chunks_exact_mut(5).zip(t.chunks_exact(8)) {
            let s: [u8; 8] = core::array::from_fn(|j| s[j] as u8);
            o.copy_from_slice(&[
                s[0] | (s[1] << 5),
                (s[1] >> 3) | (s[2] << 2) | (s[3] << 7),
                (s[3] >> 1) | (s[4] << 4),
                (s[4] >> 4) | (s[5] << 1) | (s[6] << 6),
                (s[6] >> 2) | (s[7] << 3),
            ]);
        }
    }

    fn decompress_poly(r: &mut [i16; N], a: &[u8]) {
        let mut t = [0u16; N];
        for (o, b) in t.chunks_exact_mut(8).zip(a.chunks_exact(5)) {
            let v = [
                b[0] & 0x1F,
                (b[0] >> 5) | ((b[1] & 0x03) << 3),
                (b[1] >> 2) & 0x1F,
                (b[1] >> 7) | ((b[2] & 0x0F) << 1),
                (b[2] >> 4) | ((b[3] & 0x01) << 4),
                (b[3] >> 1) & 0x1F,
                (b[3] >> 6) | ((b[4] & 0x07) << 2),
                b[4] >> 3,
            ];
            for (dst, src) in o.iter_mut().zip(v) {
                *dst = src as u16;
            }
        }
        *r = decompress_all(&t, 5);
    }
}

impl CompressWidth for D10 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        let t = compress_all(a, 10);
        for (o, s) in r.chunks_exact_mut(5).zip(t.chunks_exact(4)) {
            o.copy_from_slice(&[
                s[0] as u8,
                ((s[0] >> 8) | (s[1] << 2)) as u8,
                ((s[1] >> 6) | (s[2] << 4)) as u8,
                ((s[2] >> 4) | (s[3] << 6)) as u8,
                (s[3] >> 2) as u8,
            ]);
        }
    }

    fn decompress_poly(r: &mut [i16; N], a: &[u8]) {
        let mut t = [0u16; N];
        for (o, b) in t.chunks_exact_mut(4).zip(a.chunks_exact(5)) {
            let b: [u16; 5] = core::array::from_fn(|j| b[j] as u16);
            o.copy_from_slice(&[
                (b[0] | (b[1] << 8)) & 0x3FF,
                ((b[1] >> 2) | (b[2] << 6)) & 0x3FF,
                ((b[2] >> 4) | (b[3] << 4)) & 0x3FF,
                ((b[3] >> 6) | (b[4] << 2)) & 0x3FF,
            ]);
        }
        *r = decompress_all(&t, 10);
    }
}

impl CompressWidth for D11 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        let t = compress_all(a, 11);
        for (o, s) in r.chunks_exact_mut(11).zip(t.chunks_exact(8)) {
            o.copy_from_slice(&[
                s[0] as u8,
                ((s[0] >> 8) | (s[1] << 3)) as u8,
                ((s[1] >> 5) | (s[2] << 6)) as u8,
                (s[2] >> 2) as u8,
                ((s[2] >> 10) | (s[3] << 1)) as u8,
                ((s[3] >> 7) | (s[4] << 4)) as u8,
                ((s[4] >> 4) | (s[5] << 7)) as u8,
                (s[5] >> 1) as u8,
                ((s[5] >> 9) | (s[6] << 2)) as u8,
                ((s[6] >> 6) | (s[7] << 5)) as u8,
                (s[7] >> 3) as u8,
            ]);
        }
    }

    fn decompress_poly(r: &mut [i16; N], a: &[u8]) {
        let mut t = [0u16; N];
        for (o, b) in t.chunks_exact_mut(8).zip(a.chunks_exact(11)) {
            let b: [u16; 11] = core::array::from_fn(|j| b[j] as u16);
            o.copy_from_slice(&[
                (b[0] | (b[1] << 8)) & 0x7FF,
                ((b[1] >> 3) | (b[2] << 5)) & 0x7FF,
                ((b[2] >> 6) | (b[3] << 2) | (b[4] << 10)) & 0x7FF,
                ((b[4] >> 1) | (b[5] << 7)) & 0x7FF,
                ((b[5] >> 4) | (b[6] << 4)) & 0x7FF,
                ((b[6] >> 7) | (b[7] << 1) | (b[8] << 9)) & 0x7FF,
                ((b[8] >> 2) | (b[9] << 6)) & 0x7FF,
                ((b[9] >> 5) | (b[10] << 3)) & 0x7FF,
            ]);
        }
        *r = decompress_all(&t, 11);
    }
}
