//! Deterministic sampling: sealed centred-binomial noise widths and uniform
//! rejection sampling for the public matrix.

use crate::{N, Q};

mod sealed {
    pub trait Sealed {}
}

/// Sealed trait for the centred binomial distribution `CBD_eta`.
pub trait CbdWidth: sealed::Sealed {
    const ETA: usize;
    /// PRF output consumed per polynomial (`eta * N / 4`).
    const BUF_BYTES: usize;

    fn sample(r: &mut [i16; N], buf: &[u8]);
}

/// `CBD_2`: four bits per coefficient.
#[derive(Debug, Clone, Copy)]
pub struct Eta2;

/// `CBD_3`: six bits per coefficient.
#[derive(Debug, Clone, Copy)]
pub struct Eta3;

impl sealed::Sealed for Eta2 {}
impl CbdWidth for Eta2 {
    const ETA: usize = 2;
    const BUF_BYTES: usize = 2 * N / 4;

    #[inline]
    fn sample(r: &mut [i16; N], buf: &[u8]) {
        debug_assert!(buf.len() >= Self::BUF_BYTES);
        for (out, word) in r.chunks_exact_mut(8).zip(buf.chunks_exact(4)) {
            let t = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
            let d = (t & 0x5555_5555) + ((t >> 1) & 0x5555_5555);
            for (j, c) in out.iter_mut().enumerate() {
                let a = ((d >> (4 * j)) & 3) as i16;
                let b = ((d >> (4 * j + 2)) & 3) as i16;
                *c = a - b;
            }
        }
    }
}

impl sealed::Sealed for Eta3 {}
impl CbdWidth for Eta3 {
    const ETA: usize = 3;
    const BUF_BYTES: usize = 3 * N / 4;

    #[inline]
    fn sample(r: &mut [i16; N], buf: &[u8]) {
        debug_assert!(buf.len() >= Self::BUF_BYTES);
        for (out, word) in r.chunks_exact_mut(4).zip(buf.chunks_exact(3)) {
            let t = u32::from_le_bytes([word[0], word[1], word[2], 0]);
            let d = (t & 0x0024_9249) + ((t >> 1) & 0x0024_9249) + ((t >> 2) & 0x0024_9249);
            for (j, c) in out.iter_mut().enumerate() {
                let a = ((d >> (6 * j)) & 7) as i16;
                let b = ((d >> (6 * j + 3)) & 7) as i16;
                *c = a - b;
            }
        }
    }
}

/// SHAKE-128 block size; the sampler squeezes one block per refill.
pub const SHAKE128_RATE: usize = 168;

/// Fill `r` with coefficients uniform in `[0, q)` by rejection on 12-bit
/// values. `fill` must keep producing fresh XOF output; there is no cap on
/// the number of refills. Returns the number of coefficients written.
pub fn reject_uniform(r: &mut [i16; N], mut fill: impl FnMut(&mut [u8])) -> usize {
    let mut ctr = 0;
    let mut buf = [0u8; SHAKE128_RATE];

    while ctr < N {
        fill(&mut buf);
        for chunk in buf.chunks_exact(3) {
            let val0 = (chunk[0] as u16 | ((chunk[1] as u16) << 8)) & 0x0FFF;
            let val1 = ((chunk[1] as u16) >> 4) | ((chunk[2] as u16) << 4);
            for val in [val0, val1] {
                if ctr < N && val < Q as u16 {
                    r[ctr] = val as i16;
                    ctr += 1;
                }
            }
            if ctr == N {
                break;
            }
        }
    }
    ctr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cbd2_output_range() {
        let buf = [0xA5u8; Eta2::BUF_BYTES];
        let mut r = [0i16; N];
        Eta2::sample(&mut r, &buf);
        assert!(r.iter().all(|c| (-2..=2).contains(c)));
    }

    #[test]
    fn cbd3_output_range() {
        let buf = [0x5Au8; Eta3::BUF_BYTES];
        let mut r = [0i16; N];
        Eta3::sample(&mut r, &buf);
        assert!(r.iter().all(|c| (-3..=3).contains(c)));
    }

    #[test]
    fn cbd2_zero_input() {
        let buf = [0u8; Eta2::BUF_BYTES];
        let mut r = [99i16; N];
        Eta2::sample(&mut r, &buf);
        assert!(r.iter().all(|&c| c == 0));
    }

    #[test]
    fn cbd3_all_ones_is_zero() {
        // Both halves have full Hamming weight.
        let buf = [0xFFu8; Eta3::BUF_BYTES];
        let mut r = [99i16; N];
        Eta3::sample(&mut r, &buf);
        assert!(r.iter().all(|&c| c == 0));
    }

    #[test]
    fn reject_uniform_fills_completely() {
        let mut counter = 0u8;
        let mut r = [0i16; N];
        let count = reject_uniform(&mut r, |buf| {
            for b in buf.iter_mut() {
                *b = counter;
                counter = counter.wrapping_add(1);
            }
        });
        assert_eq!(count, N);
        assert!(r.iter().all(|c| (0..Q).contains(c)));
    }

    #[test]
    fn reject_uniform_keeps_refilling() {
        // The first three blocks only hold rejected values.
        let mut calls = 0;
        let mut r = [0i16; N];
        reject_uniform(&mut r, |buf| {
            calls += 1;
            buf.fill(if calls <= 3 { 0xFF } else { 0x01 });
        });
        assert!(calls > 3);
        assert_eq!(r[0], 0x101);
    }
}
