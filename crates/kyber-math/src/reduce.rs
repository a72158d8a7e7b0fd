//! Montgomery and Barrett reduction for the Kyber field (q = 3329).

use crate::Q;

/// q^{-1} mod 2^{16}.
pub const QINV: i16 = -3327;

/// 2^{16} mod q, centred.
pub const MONT: i16 = -1044;

/// Montgomery reduction: computes `a * R^{-1} mod q` where R = 2^{16}.
///
/// Input: `a in {-q*2^{15}, ..., q*2^{15} - 1}`. Output: `r in {-q+1, ...,
/// q-1}` with `r == a*R^{-1} (mod q)`.
#[inline]
#[must_use]
pub const fn montgomery_reduce(a: i32) -> i16 {
    let t = (a as i16).wrapping_mul(QINV);
    ((a - (t as i32) * (Q as i32)) >> 16) as i16
}

/// Barrett reduction: centred representative of `a mod q`.
///
/// Output lies in `{-(q-1)/2, ..., (q-1)/2}` for every `i16` input.
#[inline]
#[must_use]
pub const fn barrett_reduce(a: i16) -> i16 {
    const V: i32 = ((1i32 << 26) + (Q as i32) / 2) / (Q as i32); // 20159
    let t = ((V * (a as i32) + (1 << 25)) >> 26) as i16;
    a.wrapping_sub(t.wrapping_mul(Q))
}

/// Field multiplication followed by Montgomery reduction: `a*b*R^{-1} mod q`.
#[inline]
#[must_use]
pub const fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce((a as i32) * (b as i32))
}

/// Map a centred or partially reduced value into `[0, q)`.
///
/// Input must satisfy `-q < a < q`.
#[inline]
#[must_use]
pub const fn csubq(a: i16) -> u16 {
    (a as u16).wrapping_add(((a >> 15) as u16) & (Q as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn montgomery_reduce_of_zero() {
        assert_eq!(montgomery_reduce(0), 0);
    }

    #[test]
    fn barrett_reduce_small_positive() {
        assert_eq!(barrett_reduce(42), 42);
    }

    #[test]
    fn barrett_reduce_wraps() {
        assert_eq!(barrett_reduce(Q), 0);
        assert_eq!(barrett_reduce(-Q), 0);
    }

    #[test]
    fn barrett_reduce_is_centred_over_full_range() {
        for a in i16::MIN..=i16::MAX {
            let r = barrett_reduce(a);
            assert!(r.abs() <= (Q - 1) / 2, "a={a} r={r}");
            assert_eq!((a as i32 - r as i32).rem_euclid(Q as i32), 0, "a={a}");
        }
    }

    #[test]
    fn fqmul_mont_identity() {
        // fqmul(a, MONT) = a * (R mod q) * R^-1 = a mod q
        assert_eq!(fqmul(1, MONT), 1);
        assert_eq!(fqmul(-7, MONT), -7);
    }

    #[test]
    fn csubq_maps_into_field() {
        assert_eq!(csubq(0), 0);
        assert_eq!(csubq(-1), (Q - 1) as u16);
        assert_eq!(csubq(Q - 1), (Q - 1) as u16);
        assert_eq!(csubq(-(Q - 1)), 1);
    }
}
