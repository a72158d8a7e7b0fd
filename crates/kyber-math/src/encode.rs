//! Polynomial byte-level encoding (12-bit packing) and message encode/decode.

use crate::{
    N, POLYBYTES, SYMBYTES,
    compress::{CompressWidth, D1},
    reduce::csubq,
};

/// Pack 256 coefficients in `(-q, q)` as canonical 12-bit values.
pub fn coeffs_to_bytes(r: &mut [u8], a: &[i16; N]) {
    debug_assert!(r.len() >= POLYBYTES);
    for (out, pair) in r.chunks_exact_mut(3).zip(a.chunks_exact(2)) {
        let t0 = csubq(pair[0]);
        let t1 = csubq(pair[1]);
        out[0] = t0 as u8;
        out[1] = ((t0 >> 8) | (t1 << 4)) as u8;
        out[2] = (t1 >> 4) as u8;
    }
}

/// Unpack 12-bit values. No range check against q is made.
pub fn bytes_to_coeffs(r: &mut [i16; N], a: &[u8]) {
    debug_assert!(a.len() >= POLYBYTES);
    for (pair, b) in r.chunks_exact_mut(2).zip(a.chunks_exact(3)) {
        let b = [b[0] as u16, b[1] as u16, b[2] as u16];
        pair[0] = (b[0] | ((b[1] & 0x0F) << 8)) as i16;
        pair[1] = ((b[1] >> 4) | (b[2] << 4)) as i16;
    }
}

pub fn coeffs_to_message(msg: &mut [u8; SYMBYTES], a: &[i16; N]) {
    D1::compress_poly(msg, a);
}

pub fn message_to_coeffs(r: &mut [i16; N], msg: &[u8; SYMBYTES]) {
    D1::decompress_poly(r, msg);
}
