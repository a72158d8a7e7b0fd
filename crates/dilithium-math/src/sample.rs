//! Deterministic sampling: uniform matrix entries, short secret
//! coefficients and the sparse challenge polynomial.

use crate::{N, Q};

mod sealed {
    pub trait Sealed {}
}

/// SHAKE-128 block size; the uniform sampler squeezes one block per refill.
pub const SHAKE128_RATE: usize = 168;

/// SHAKE-256 block size; the eta and challenge samplers squeeze one block
/// per refill.
pub const SHAKE256_RATE: usize = 136;

/// Sealed trait for the secret coefficient range `[-eta, eta]`.
pub trait EtaWidth: sealed::Sealed {
    const ETA: i32;
    /// Packed size of one polynomial with coefficients in `[-eta, eta]`.
    const POLY_BYTES: usize;

    /// Map a 4-bit sample to a coefficient, or reject it.
    fn accept(t: u32) -> Option<i32>;

    fn pack(r: &mut [u8], a: &[i32; N]);

    fn unpack(r: &mut [i32; N], a: &[u8]);
}

/// `eta = 2`: three bits per packed coefficient.
#[derive(Debug, Clone, Copy)]
pub struct Eta2;

/// `eta = 4`: four bits per packed coefficient.
#[derive(Debug, Clone, Copy)]
pub struct Eta4;

impl sealed::Sealed for Eta2 {}
impl EtaWidth for Eta2 {
    const ETA: i32 = 2;
    const POLY_BYTES: usize = 96;

    #[inline]
    fn accept(t: u32) -> Option<i32> {
        // t mod 5 without division.
        (t < 15).then(|| 2 - (t - ((205 * t) >> 10) * 5) as i32)
    }

    fn pack(r: &mut [u8], a: &[i32; N]) {
        debug_assert!(r.len() >= Self::POLY_BYTES);
        for (out, c) in r.chunks_exact_mut(3).zip(a.chunks_exact(8)) {
            let t: [u8; 8] = core::array::from_fn(|j| (Self::ETA - c[j]) as u8);
            out[0] = t[0] | (t[1] << 3) | (t[2] << 6);
            out[1] = (t[2] >> 2) | (t[3] << 1) | (t[4] << 4) | (t[5] << 7);
            out[2] = (t[5] >> 1) | (t[6] << 2) | (t[7] << 5);
        }
    }

    fn unpack(r: &mut [i32; N], a: &[u8]) {
        debug_assert!(a.len() >= Self::POLY_BYTES);
        for (out, b) in r.chunks_exact_mut(8).zip(a.chunks_exact(3)) {
            let t = [
                b[0],
                b[0] >> 3,
                (b[0] >> 6) | (b[1] << 2),
                b[1] >> 1,
                b[1] >> 4,
                (b[1] >> 7) | (b[2] << 1),
                b[2] >> 2,
                b[2] >> 5,
            ];
            for (c, t) in out.iter_mut().zip(t) {
                *c = Self::ETA - (t & 7) as i32;
            }
        }
    }
}

impl sealed::Sealed for Eta4 {}
impl EtaWidth for Eta4 {
    const ETA: i32 = 4;
    const POLY_BYTES: usize = 128;

    #[inline]
    fn accept(t: u32) -> Option<i32> {
        (t < 9).then(|| 4 - t as i32)
    }

    fn pack(r: &mut [u8], a: &[i32; N]) {
        debug_assert!(r.len() >= Self::POLY_BYTES);
        for (out, c) in r.iter_mut().zip(a.chunks_exact(2)) {
            let t0 = (Self::ETA - c[0]) as u8;
            let t1 = (Self::ETA - c[1]) as u8;
            *out = t0 | (t1 << 4);
        }
    }

    fn unpack(r: &mut [i32; N], a: &[u8]) {
        debug_assert!(a.len() >= Self::POLY_BYTES);
        for (out, &b) in r.chunks_exact_mut(2).zip(a.iter()) {
            out[0] = Self::ETA - (b & 0x0F) as i32;
            out[1] = Self::ETA - (b >> 4) as i32;
        }
    }
}

/// Fill `r` with coefficients uniform in `[0, q)` by rejection on 23-bit
/// values. `fill` must keep producing fresh XOF output. Returns the number
/// of coefficients written.
pub fn reject_uniform(r: &mut [i32; N], mut fill: impl FnMut(&mut [u8])) -> usize {
    let mut ctr = 0;
    let mut buf = [0u8; SHAKE128_RATE];

    while ctr < N {
        fill(&mut buf);
        for chunk in buf.chunks_exact(3) {
            let t = u32::from_le_bytes([chunk[0], chunk[1], chunk[2] & 0x7F, 0]);
            if t < Q as u32 {
                r[ctr] = t as i32;
                ctr += 1;
                if ctr == N {
                    break;
                }
            }
        }
    }
    ctr
}

/// Fill `r` with coefficients in `[-eta, eta]` by rejection on nibbles,
/// low nibble first. Returns the number of coefficients written.
pub fn reject_eta<E: EtaWidth>(r: &mut [i32; N], mut fill: impl FnMut(&mut [u8])) -> usize {
    let mut ctr = 0;
    let mut buf = [0u8; SHAKE256_RATE];

    while ctr < N {
        fill(&mut buf);
        for &b in buf.iter() {
            for t in [b as u32 & 0x0F, b as u32 >> 4] {
                if ctr < N
                    && let Some(c) = E::accept(t)
                {
                    r[ctr] = c;
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

/// Sample the challenge: `tau` coefficients in `{-1, 1}`, the rest zero.
///
/// The first 8 squeezed bytes supply the signs; positions come from
/// rejection sampling on the remaining stream.
pub fn challenge(r: &mut [i32; N], tau: usize, mut fill: impl FnMut(&mut [u8])) {
    let mut buf = [0u8; SHAKE256_RATE];
    fill(&mut buf);

    let mut signs = u64::from_le_bytes([
        buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
    ]);
    let mut pos = 8;

    r.fill(0);
    for i in N - tau..N {
        let b = loop {
            if pos >= SHAKE256_RATE {
                fill(&mut buf);
                pos = 0;
            }
            let b = buf[pos] as usize;
            pos += 1;
            if b <= i {
                break b;
            }
        };
        r[i] = r[b];
        r[b] = 1 - 2 * (signs & 1) as i32;
        signs >>= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_fill() -> impl FnMut(&mut [u8]) {
        let mut counter = 0u8;
        move |buf: &mut [u8]| {
            for b in buf.iter_mut() {
                *b = counter;
                counter = counter.wrapping_mul(37).wrapping_add(11);
            }
        }
    }

    #[test]
    fn reject_uniform_fills_completely() {
        let mut r = [0i32; N];
        assert_eq!(reject_uniform(&mut r, counter_fill()), N);
        assert!(r.iter().all(|c| (0..Q).contains(c)));
    }

    #[test]
    fn reject_uniform_masks_top_bit() {
        let mut r = [0i32; N];
        reject_uniform(&mut r, |buf| {
            for chunk in buf.chunks_exact_mut(3) {
                chunk.copy_from_slice(&[0x01, 0x00, 0x80]);
            }
        });
        assert!(r.iter().all(|&c| c == 1));
    }

    #[test]
    fn reject_uniform_skips_out_of_range() {
        let mut calls = 0;
        let mut r = [0i32; N];
        reject_uniform(&mut r, |buf| {
            calls += 1;
            buf.fill(if calls <= 2 { 0xFF } else { 0x02 });
        });
        assert!(calls > 2);
        assert_eq!(r[0], 0x02_0202);
    }

    #[test]
    fn reject_eta_ranges() {
        let mut r = [0i32; N];
        assert_eq!(reject_eta::<Eta2>(&mut r, counter_fill()), N);
        assert!(r.iter().all(|c| (-2..=2).contains(c)));
        assert_eq!(reject_eta::<Eta4>(&mut r, counter_fill()), N);
        assert!(r.iter().all(|c| (-4..=4).contains(c)));
    }

    #[test]
    fn reject_eta_low_nibble_first() {
        let mut r = [0i32; N];
        // 0x10: low nibble 0 -> 4, high nibble 1 -> 3.
        reject_eta::<Eta4>(&mut r, |buf| buf.fill(0x10));
        assert_eq!(&r[..4], &[4, 3, 4, 3]);
        // 0xF3: 3 -> 2 - 3 = -1, 15 rejected.
        reject_eta::<Eta2>(&mut r, |buf| buf.fill(0xF3));
        assert!(r.iter().all(|&c| c == -1));
    }

    #[test]
    fn eta_accept_tables() {
        let eta2: [Option<i32>; 16] = core::array::from_fn(|t| Eta2::accept(t as u32));
        for t in 0..15 {
            assert_eq!(eta2[t], Some(2 - (t as i32 % 5)));
        }
        assert_eq!(eta2[15], None);
        assert_eq!(Eta4::accept(8), Some(-4));
        assert_eq!(Eta4::accept(9), None);
    }

    fn check_eta_pack<E: EtaWidth>() {
        let mut a = [0i32; N];
        for (i, c) in a.iter_mut().enumerate() {
            *c = (i as i32 % (2 * E::ETA + 1)) - E::ETA;
        }
        let mut buf = [0u8; 128];
        E::pack(&mut buf, &a);
        let mut back = [0i32; N];
        E::unpack(&mut back, &buf);
        assert_eq!(a, back);
    }

    #[test]
    fn eta_pack_roundtrip() {
        check_eta_pack::<Eta2>();
        check_eta_pack::<Eta4>();
    }

    #[test]
    fn challenge_weight() {
        for tau in [39, 49, 60] {
            let mut c = [0i32; N];
            challenge(&mut c, tau, counter_fill());
            assert_eq!(c.iter().filter(|&&x| x != 0).count(), tau);
            assert!(c.iter().all(|&x| (-1..=1).contains(&x)));
        }
    }

    #[test]
    fn challenge_signs_from_prefix() {
        let mut c = [0i32; N];
        // Signs all negative; every position byte is zero.
        challenge(&mut c, 39, |buf| {
            buf.fill(0);
            buf[..8].fill(0xFF);
        });
        assert_eq!(c.iter().filter(|&&x| x == -1).count(), 39);
    }
}
