//! Constant-time comparison and conditional copy over byte slices.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time equality. Slices of different length compare unequal.
#[inline]
pub(crate) fn ct_eq(a: &[u8], b: &[u8]) -> Choice {
    a.ct_eq(b)
}

/// Overwrite `dst` with `src` when `choice` is set; leave it untouched
/// otherwise. Both slices must have the same length.
#[inline]
pub(crate) fn ct_assign(dst: &mut [u8], src: &[u8], choice: Choice) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        d.conditional_assign(s, choice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_equal() {
        assert!(bool::from(ct_eq(&[0u8; 64], &[0u8; 64])));
    }

    #[test]
    fn eq_differ_last_byte() {
        let a = [0u8; 64];
        let mut b = [0u8; 64];
        b[63] = 0x80;
        assert!(!bool::from(ct_eq(&a, &b)));
    }

    #[test]
    fn eq_length_mismatch() {
        assert!(!bool::from(ct_eq(&[0u8; 3], &[0u8; 4])));
    }

    #[test]
    fn assign_unset_is_noop() {
        let mut dst = [0xAA_u8; 32];
        ct_assign(&mut dst, &[0xBB; 32], Choice::from(0));
        assert!(dst.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn assign_set_copies() {
        let mut dst = [0xAA_u8; 32];
        ct_assign(&mut dst, &[0xBB; 32], Choice::from(1));
        assert!(dst.iter().all(|&b| b == 0xBB));
    }
}
