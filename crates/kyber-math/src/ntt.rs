//! Number-Theoretic Transform and base multiplication in `Z_q[X]/(X^2 - zeta)`.
//!
//! - `forward_ntt`: forward NTT, standard order -> bit-reversed order.
//! - `inverse_ntt`: inverse NTT with Montgomery scaling.
//! - `basemul`: degree-1 multiplication in the NTT domain.

use crate::{
    N,
    reduce::{barrett_reduce, fqmul},
};

const Q64: i64 = crate::Q as i64;

const fn pow_mod(mut base: i64, mut exp: i64, modulus: i64) -> i64 {
    let mut result: i64 = 1;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        exp >>= 1;
        base = base * base % modulus;
    }
    result
}

const fn bitrev7(x: usize) -> usize {
    let mut r = 0;
    let mut i = 0;
    while i < 7 {
        r |= ((x >> i) & 1) << (6 - i);
        i += 1;
    }
    r
}

/// Centred representative of `val mod q` in `[-(q-1)/2, (q-1)/2]`.
const fn centred(val: i64) -> i16 {
    if val > Q64 / 2 {
        (val - Q64) as i16
    } else {
        val as i16
    }
}

/// Twiddle factors in Montgomery form, from the primitive 256th root of
/// unity zeta = 17, bit-reversed indexing.
///
/// `ZETAS[i] = zeta^{BitRev7(i)} * 2^16 (mod q)`, centred to signed.
pub const ZETAS: [i16; 128] = {
    const ZETA: i64 = 17;
    const MONT: i64 = 1 << 16;

    let mut zetas = [0i16; 128];
    let mut i = 0;
    while i < 128 {
        let val = pow_mod(ZETA, bitrev7(i) as i64, Q64) * MONT % Q64;
        zetas[i] = centred(val);
        i += 1;
    }
    zetas
};

/// Forward NTT (in-place). Standard order in, bit-reversed order out.
///
/// Inputs must be bounded by q in absolute value; outputs grow to at most
/// 8q and are not reduced.
pub fn forward_ntt(r: &mut [i16; N]) {
    let mut k = 1;
    let mut len = 128;
    while len >= 2 {
        for block in r.chunks_exact_mut(2 * len) {
            let zeta = ZETAS[k];
            k += 1;
            let (lo, hi) = block.split_at_mut(len);
            for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                let t = fqmul(zeta, *b);
                *b = *a - t;
                *a += t;
            }
        }
        len >>= 1;
    }
}

/// Inverse NTT (in-place). Bit-reversed in, standard order out,
/// each coefficient scaled by the Montgomery factor `R = 2^{16}`.
pub fn inverse_ntt(r: &mut [i16; N]) {
    // R^2 * 128^{-1} mod q
    const F: i16 = centred(pow_mod(2, 32, Q64) * pow_mod(128, Q64 - 2, Q64) % Q64);
    let mut k = 127;
    let mut len = 2;
    while len <= 128 {
        for block in r.chunks_exact_mut(2 * len) {
            let zeta = ZETAS[k];
            k -= 1;
            let (lo, hi) = block.split_at_mut(len);
            for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                let t = *a;
                *a = barrett_reduce(t + *b);
                *b -= t;
                *b = fqmul(zeta, *b);
            }
        }
        len <<= 1;
    }
    for c in r.iter_mut() {
        *c = fqmul(*c, F);
    }
}

/// Multiplication of `a0 + a1 X` and `b0 + b1 X` in `Z_q[X]/(X^2 - zeta)`.
#[inline]
#[must_use]
pub const fn basemul(a: [i16; 2], b: [i16; 2], zeta: i16) -> [i16; 2] {
    let r0 = fqmul(fqmul(a[1], b[1]), zeta) + fqmul(a[0], b[0]);
    let r1 = fqmul(a[0], b[1]) + fqmul(a[1], b[0]);
    [r0, r1]
}
