//! Number-Theoretic Transform over `Z_q[X]/(X^{256}+1)`, q = 8380417.
//!
//! The transform splits completely: the NTT domain holds 256 evaluations
//! and multiplication there is coefficient-wise.

use crate::{N, reduce::montgomery_reduce};

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

const fn bitrev8(x: usize) -> usize {
    let mut r = 0;
    let mut i = 0;
    while i < 8 {
        r |= ((x >> i) & 1) << (7 - i);
        i += 1;
    }
    r
}

const fn centred(val: i64) -> i32 {
    if val > Q64 / 2 {
        (val - Q64) as i32
    } else {
        val as i32
    }
}

/// Twiddle factors in Montgomery form from the primitive 512th root of
/// unity 1753: `ZETAS[i] = 1753^{BitRev8(i)} * 2^{32} (mod q)`, centred.
///
/// Index 0 is never read by the transforms.
pub const ZETAS: [i32; N] = {
    const ZETA: i64 = 1753;

    let mont = pow_mod(2, 32, Q64);
    let mut zetas = [0i32; N];
    let mut i = 0;
    while i < N {
        let val = pow_mod(ZETA, bitrev8(i) as i64, Q64) * mont % Q64;
        zetas[i] = centred(val);
        i += 1;
    }
    zetas
};

/// `2^{64} / 256 mod q`: undoes the 256 scaling of the inverse transform
/// and converts back out of the Montgomery domain.
const INV_NTT_SCALE: i64 = pow_mod(2, 64, Q64) * pow_mod(N as i64, Q64 - 2, Q64) % Q64;

/// Forward NTT (in-place). Standard order in, bit-reversed order out.
///
/// Coefficients grow by at most 8q and are not reduced.
pub fn forward_ntt(a: &mut [i32; N]) {
    let mut k = 0;
    let mut len = 128;
    while len > 0 {
        for block in a.chunks_exact_mut(2 * len) {
            k += 1;
            let zeta = ZETAS[k] as i64;
            let (lo, hi) = block.split_at_mut(len);
            for (x, y) in lo.iter_mut().zip(hi.iter_mut()) {
                let t = montgomery_reduce(zeta * *y as i64);
                *y = *x - t;
                *x += t;
            }
        }
        len >>= 1;
    }
}

/// Inverse NTT with multiplication by the Montgomery factor `2^{32}`.
///
/// Inputs must be bounded by q in absolute value; outputs are again
/// bounded by q.
pub fn inverse_ntt(a: &mut [i32; N]) {
    let mut k = N;
    let mut len = 1;
    while len < N {
        for block in a.chunks_exact_mut(2 * len) {
            k -= 1;
            let zeta = -(ZETAS[k] as i64);
            let (lo, hi) = block.split_at_mut(len);
            for (x, y) in lo.iter_mut().zip(hi.iter_mut()) {
                let t = *x;
                *x = t + *y;
                *y = montgomery_reduce(zeta * (t - *y) as i64);
            }
        }
        len <<= 1;
    }

    for c in a.iter_mut() {
        *c = montgomery_reduce(INV_NTT_SCALE * *c as i64);
    }
}
