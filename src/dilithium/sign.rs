//! Dilithium key generation, signing and verification.

use dilithium_math::{
    CRHBYTES, EtaWidth, Gamma1Width, Gamma2Width, NttMatrix, NttPolynomial, Polynomial, SEEDBYTES,
    Vector,
};
use rand_core::CryptoRng;
use sha3::digest::XofReader;
use subtle::Choice;
use tracing::{debug, error, trace};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, transmute_ref};
use zeroize::Zeroize;

use super::{
    params::{DilithiumParams, MAX_POLYW1_PACKEDBYTES, MAX_POLYZ_BYTES},
    types::{PublicKey, SecretKey, Signature},
};
use crate::{ByteArray, Error, SigningMode, ct::ct_assign, hash};

/// Signing gives up after this many rejected attempts. The expected
/// number of attempts is between 4 and 5 for every parameter set.
pub const MAX_SIGN_ATTEMPTS: u16 = 500;

/// `SHAKE-256(seed)` split into its three roles.
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
struct ExpandedSeed {
    rho: [u8; SEEDBYTES],
    rhoprime: [u8; CRHBYTES],
    key: [u8; SEEDBYTES],
}

/// Run `$f::<P, K, L>` for the matrix shape of `P`.
macro_rules! dispatch {
    ($p:ty, $f:ident($($arg:expr),* $(,)?)) => {
        match (<$p>::K, <$p>::L) {
            (4, 4) => $f::<$p, 4, 4>($($arg),*),
            (6, 5) => $f::<$p, 6, 5>($($arg),*),
            (8, 7) => $f::<$p, 8, 7>($($arg),*),
            _ => unreachable!(),
        }
    };
}

/// Entry `(i, j)` of `A` is drawn from `SHAKE-128(rho || (i << 8) + j)`.
fn expand_matrix<const K: usize, const L: usize>(rho: &[u8; SEEDBYTES]) -> NttMatrix<K, L> {
    NttMatrix::from_fn(|i, j| {
        let mut xof = hash::stream128(rho, ((i << 8) + j) as u16);
        NttPolynomial::sample_uniform(|buf| xof.read(buf))
    })
}

/// Short secret vector; entry `i` uses nonce `offset + i`.
fn sample_short<P: DilithiumParams, const M: usize>(rhoprime: &[u8; CRHBYTES], offset: u16) -> Vector<M> {
    Vector::from_fn(|i| {
        let mut xof = hash::stream256(rhoprime, offset + i as u16);
        Polynomial::sample_eta::<P::Eta>(|buf| xof.read(buf))
    })
}

/// Masking vector for attempt `kappa`; entry `i` uses nonce `L * kappa + i`.
fn sample_mask<P: DilithiumParams, const L: usize>(rhoprime: &[u8; CRHBYTES], kappa: u16) -> Vector<L> {
    let bytes = <P::Gamma1 as Gamma1Width>::POLYZ_BYTES;
    Vector::from_fn(|i| {
        let mut buf = [0u8; MAX_POLYZ_BYTES];
        let buf = &mut buf[..bytes];
        hash::stream256(rhoprime, L as u16 * kappa + i as u16).read(buf);
        Polynomial::unpack_z::<P::Gamma1>(buf)
    })
}

fn challenge<P: DilithiumParams>(c_tilde: &[u8; SEEDBYTES]) -> Polynomial {
    let mut xof = hash::xof256(c_tilde);
    Polynomial::challenge(P::TAU, |buf| xof.read(buf))
}

/// `SHAKE-256(mu || pack_w1(w))` truncated to 32 bytes.
fn commitment_hash<P: DilithiumParams, const K: usize>(mu: &[u8; CRHBYTES], w: &Vector<K>) -> [u8; SEEDBYTES] {
    let mut packed = [0u8; MAX_POLYW1_PACKEDBYTES];
    let packed = &mut packed[..P::POLYW1_PACKEDBYTES];
    w.pack_w1::<P::Gamma2>(packed);
    let mut c_tilde = [0u8; SEEDBYTES];
    hash::shake256(&[mu, packed], &mut c_tilde);
    c_tilde
}

/// Deterministic key generation from a 32-byte seed.
#[must_use]
pub fn keypair_derand<P: DilithiumParams>(seed: &[u8; SEEDBYTES]) -> (PublicKey<P>, SecretKey<P>) {
    let mut pk = P::PkArray::zeroed();
    let mut sk = P::SkArray::zeroed();
    dispatch!(P, keypair_inner(pk.as_mut(), sk.as_mut(), seed));
    (PublicKey::from_bytes(pk), SecretKey::from_bytes(sk))
}

fn keypair_inner<P: DilithiumParams, const K: usize, const L: usize>(
    pk: &mut [u8], sk: &mut [u8], seed: &[u8; SEEDBYTES],
) {
    let mut expanded = [0u8; 2 * SEEDBYTES + CRHBYTES];
    hash::shake256(&[seed], &mut expanded);
    let ExpandedSeed { rho, rhoprime, key } = transmute_ref!(&expanded);

    let a = expand_matrix::<K, L>(rho);
    let s1 = sample_short::<P, L>(rhoprime, 0);
    let s2 = sample_short::<P, K>(rhoprime, L as u16);

    // t = A s1 + s2
    let mut t_hat = a.mul_vec(&s1.ntt());
    t_hat.reduce();
    let mut t = t_hat.ntt_inverse();
    t += &s2;
    t.caddq();
    let (t1, t0) = t.power2round();

    pk[..SEEDBYTES].copy_from_slice(rho);
    t1.pack_t1(&mut pk[SEEDBYTES..]);

    let eta_bytes = <P::Eta as EtaWidth>::POLY_BYTES;
    let (seeds, rest) = sk.split_at_mut(3 * SEEDBYTES);
    let (s1_bytes, rest) = rest.split_at_mut(L * eta_bytes);
    let (s2_bytes, t0_bytes) = rest.split_at_mut(K * eta_bytes);
    seeds[..SEEDBYTES].copy_from_slice(rho);
    seeds[SEEDBYTES..2 * SEEDBYTES].copy_from_slice(key);
    hash::shake256(&[pk], &mut seeds[2 * SEEDBYTES..]);
    s1.pack_eta::<P::Eta>(s1_bytes);
    s2.pack_eta::<P::Eta>(s2_bytes);
    t0.pack_t0(t0_bytes);

    expanded.zeroize();
}

/// Randomized key generation.
pub fn keypair<P: DilithiumParams>(rng: &mut impl CryptoRng) -> (PublicKey<P>, SecretKey<P>) {
    let mut seed = [0u8; SEEDBYTES];
    rng.fill_bytes(&mut seed);
    let keys = keypair_derand::<P>(&seed);
    seed.zeroize();
    keys
}

/// Deterministic signature: the masking seed is derived from the secret
/// key and the message.
///
/// # Errors
///
/// [`Error::SigningExhausted`] if every attempt is rejected.
pub fn sign_deterministic<P: DilithiumParams>(sk: &SecretKey<P>, msg: &[u8]) -> Result<Signature<P>, Error> {
    sign_internal(sk, msg, &[0u8; CRHBYTES], Choice::from(0))
}

/// Randomized signature: the masking seed is drawn from `rng`.
///
/// # Errors
///
/// [`Error::SigningExhausted`] if every attempt is rejected.
pub fn sign<P: DilithiumParams>(
    sk: &SecretKey<P>, msg: &[u8], rng: &mut impl CryptoRng,
) -> Result<Signature<P>, Error> {
    sign_with_mode(sk, msg, SigningMode::Randomized, rng)
}

/// Sign with the masking seed chosen by `mode`. `rng` is only read in
/// [`SigningMode::Randomized`].
///
/// # Errors
///
/// [`Error::SigningExhausted`] if every attempt is rejected.
pub fn sign_with_mode<P: DilithiumParams>(
    sk: &SecretKey<P>, msg: &[u8], mode: SigningMode, rng: &mut impl CryptoRng,
) -> Result<Signature<P>, Error> {
    let randomized = mode == SigningMode::Randomized;
    let mut rnd = [0u8; CRHBYTES];
    if randomized {
        rng.fill_bytes(&mut rnd);
    }
    let sig = sign_internal(sk, msg, &rnd, Choice::from(randomized as u8));
    rnd.zeroize();
    sig
}

fn sign_internal<P: DilithiumParams>(
    sk: &SecretKey<P>, msg: &[u8], rnd: &[u8; CRHBYTES], randomized: Choice,
) -> Result<Signature<P>, Error> {
    let mut sig = P::SigArray::zeroed();
    let attempts = dispatch!(P, sign_inner(sig.as_mut(), sk, msg, rnd, randomized))?;
    debug!(attempts, "signature produced");
    Ok(Signature::from_bytes(sig))
}

fn sign_inner<P: DilithiumParams, const K: usize, const L: usize>(
    sig: &mut [u8], sk: &SecretKey<P>, msg: &[u8], rnd: &[u8; CRHBYTES], randomized: Choice,
) -> Result<u16, Error> {
    let gamma1 = <P::Gamma1 as Gamma1Width>::GAMMA1;
    let gamma2 = <P::Gamma2 as Gamma2Width>::GAMMA2;

    let mut mu = [0u8; CRHBYTES];
    hash::shake256(&[sk.tr(), msg], &mut mu);

    let mut rhoprime = [0u8; CRHBYTES];
    hash::shake256(&[sk.key(), &mu], &mut rhoprime);
    ct_assign(&mut rhoprime, rnd, randomized);

    let a = expand_matrix::<K, L>(sk.public_seed());
    let s1_hat = Vector::<L>::unpack_eta::<P::Eta>(sk.s1_bytes()).ntt();
    let s2_hat = Vector::<K>::unpack_eta::<P::Eta>(sk.s2_bytes()).ntt();
    let t0_hat = Vector::<K>::unpack_t0(sk.t0_bytes()).ntt();

    let mut result = Err(Error::SigningExhausted {
        attempts: MAX_SIGN_ATTEMPTS,
    });
    for attempt in 0..MAX_SIGN_ATTEMPTS {
        let y = sample_mask::<P, L>(&rhoprime, attempt);

        // w = A y, split into high and low bits
        let mut w_hat = a.mul_vec(&y.ntt());
        w_hat.reduce();
        let mut w = w_hat.ntt_inverse();
        w.caddq();
        let (w1, w0) = w.decompose::<P::Gamma2>();

        let c_tilde = commitment_hash::<P, K>(&mu, &w1);
        if commitment_hash::<P, K>(&mu, &w0) == c_tilde {
            trace!(attempt, reason = "zero_check", "signing attempt rejected");
            continue;
        }
        let c_hat = challenge::<P>(&c_tilde).ntt();

        // z = y + c s1
        let mut z = s1_hat.scale(&c_hat).ntt_inverse();
        z += &y;
        z.reduce();
        if !z.is_below(gamma1 - P::BETA) {
            trace!(attempt, reason = "z_bound", "signing attempt rejected");
            continue;
        }

        // r0 = LowBits(w - c s2)
        let mut r0 = w0;
        r0 -= &s2_hat.scale(&c_hat).ntt_inverse();
        r0.reduce();
        if !r0.is_below(gamma2 - P::BETA) {
            trace!(attempt, reason = "r0_bound", "signing attempt rejected");
            continue;
        }

        let mut ct0 = t0_hat.scale(&c_hat).ntt_inverse();
        ct0.reduce();
        if !ct0.is_below(gamma2) {
            trace!(attempt, reason = "ct0_bound", "signing attempt rejected");
            continue;
        }

        r0 += &ct0;
        let (h, weight) = Vector::make_hint::<P::Gamma2>(&r0, &w1);
        if weight > P::OMEGA {
            trace!(attempt, reason = "hint_weight", weight, "signing attempt rejected");
            continue;
        }

        let (c_out, rest) = sig.split_at_mut(SEEDBYTES);
        let (z_out, h_out) = rest.split_at_mut(L * <P::Gamma1 as Gamma1Width>::POLYZ_BYTES);
        c_out.copy_from_slice(&c_tilde);
        z.pack_z::<P::Gamma1>(z_out);
        h.pack_hint(h_out, P::OMEGA);

        result = Ok(attempt + 1);
        break;
    }

    mu.zeroize();
    rhoprime.zeroize();
    if result.is_err() {
        error!(attempts = MAX_SIGN_ATTEMPTS, "signing exhausted its attempt budget");
    }
    result
}

/// Verify `sig` on `msg` under `pk`. Returns `false` for signatures of the
/// wrong length or with a malformed hint.
#[must_use]
pub fn verify<P: DilithiumParams>(pk: &PublicKey<P>, msg: &[u8], sig: &[u8]) -> bool {
    let sig = match Signature::<P>::try_from(sig) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    match dispatch!(P, verify_inner(pk, msg, &sig)) {
        Ok(()) => true,
        Err(reason) => {
            debug!(reason, "signature rejected");
            false
        }
    }
}

fn verify_inner<P: DilithiumParams, const K: usize, const L: usize>(
    pk: &PublicKey<P>, msg: &[u8], sig: &Signature<P>,
) -> Result<(), &'static str> {
    let gamma1 = <P::Gamma1 as Gamma1Width>::GAMMA1;

    let z = Vector::<L>::unpack_z::<P::Gamma1>(sig.z_bytes());
    let h = Vector::<K>::unpack_hint(sig.hint_bytes(), P::OMEGA).ok_or("malformed_hint")?;
    if !z.is_below(gamma1 - P::BETA) {
        return Err("z_bound");
    }

    let mut tr = [0u8; SEEDBYTES];
    hash::shake256(&[pk.as_bytes()], &mut tr);
    let mut mu = [0u8; CRHBYTES];
    hash::shake256(&[&tr, msg], &mut mu);

    let c_hat = challenge::<P>(sig.challenge_seed()).ntt();

    // w1' = UseHint(h, A z - c t1 2^d)
    let a = expand_matrix::<K, L>(pk.rho());
    let mut t1 = Vector::<K>::unpack_t1(pk.t1_bytes());
    t1.shift_left();
    let mut w_hat = a.mul_vec(&z.ntt());
    w_hat -= &t1.ntt().scale(&c_hat);
    w_hat.reduce();
    let mut w = w_hat.ntt_inverse();
    w.caddq();
    let w1 = w.use_hint::<P::Gamma2>(&h);

    if commitment_hash::<P, K>(&mu, &w1) == *sig.challenge_seed() {
        Ok(())
    } else {
        Err("challenge_mismatch")
    }
}
