//! IND-CPA public-key encryption, the inner scheme of the Kyber KEM.

use kyber_math::{
    N, NttMatrix, NttPolynomial, NttVector, Polynomial, SYMBYTES, Vector,
    sample::{CbdWidth, Eta2},
};
use sha3::digest::XofReader;
use zerocopy::transmute_ref;

use super::{
    params::KyberParams,
    types::{Ciphertext, PkeSecretKey, PublicKey},
};
use crate::{
    ByteArray,
    hash::{self, Sym2},
};

/// Noise polynomial from `PRF(seed, nonce)`.
fn sample_noise<E: CbdWidth>(seed: &[u8; SYMBYTES], nonce: u8) -> Polynomial {
    let mut buf = [0u8; 3 * N / 4];
    let buf = &mut buf[..E::BUF_BYTES];
    hash::prf(seed, nonce, buf);
    Polynomial::sample_cbd::<E>(buf)
}

/// Expand the public matrix `A` (or `A^T`) from `rho`. Entry `(i, j)` of
/// `A` is drawn from `XOF(rho || j || i)`.
fn expand_matrix<const K: usize>(rho: &[u8; SYMBYTES], transposed: bool) -> NttMatrix<K> {
    NttMatrix::from_fn(|i, j| {
        let (x, y) = if transposed {
            (i as u8, j as u8)
        } else {
            (j as u8, i as u8)
        };
        let mut xof = hash::xof_absorb(rho, x, y);
        NttPolynomial::sample_uniform(|buf| xof.read(buf))
    })
}

/// Deterministic key generation from the 32-byte seed `d`.
#[must_use]
pub fn keypair_derand<P: KyberParams>(d: &[u8; SYMBYTES]) -> (PublicKey<P>, PkeSecretKey<P>) {
    let mut pk = P::PkArray::zeroed();
    let mut sk = P::PkeSkArray::zeroed();
    match P::K {
        2 => keypair_inner::<P, 2>(pk.as_mut(), sk.as_mut(), d),
        3 => keypair_inner::<P, 3>(pk.as_mut(), sk.as_mut(), d),
        4 => keypair_inner::<P, 4>(pk.as_mut(), sk.as_mut(), d),
        _ => unreachable!(),
    }
    (PublicKey::from_bytes(pk), PkeSecretKey::from_bytes(sk))
}

fn keypair_inner<P: KyberParams, const K: usize>(pk: &mut [u8], sk: &mut [u8], d: &[u8; SYMBYTES]) {
    let g = hash::hash_g(d);
    let Sym2(rho, sigma) = transmute_ref!(&g);

    let a = expand_matrix::<K>(rho, false);
    let s = Vector::<K>::from_fn(|i| sample_noise::<P::Eta1>(sigma, i as u8));
    let e = Vector::<K>::from_fn(|i| sample_noise::<P::Eta1>(sigma, (K + i) as u8));

    let s_hat = s.ntt();
    let mut t_hat = a.mul_vec_tomont(&s_hat);
    t_hat += &e.ntt();
    t_hat.reduce();

    t_hat.to_bytes(&mut pk[..P::POLYVEC_BYTES]);
    pk[P::POLYVEC_BYTES..].copy_from_slice(rho);
    s_hat.to_bytes(sk);
}

/// Encrypt a 32-byte message under `pk` with explicit randomness `coins`.
#[must_use]
pub fn encrypt<P: KyberParams>(
    pk: &PublicKey<P>, msg: &[u8; SYMBYTES], coins: &[u8; SYMBYTES],
) -> Ciphertext<P> {
    let (t_bytes, rho) = pk.split();
    let mut ct = P::CtArray::zeroed();
    match P::K {
        2 => encrypt_inner::<P, 2>(ct.as_mut(), t_bytes, rho, msg, coins),
        3 => encrypt_inner::<P, 3>(ct.as_mut(), t_bytes, rho, msg, coins),
        4 => encrypt_inner::<P, 4>(ct.as_mut(), t_bytes, rho, msg, coins),
        _ => unreachable!(),
    }
    Ciphertext::from_bytes(ct)
}

fn encrypt_inner<P: KyberParams, const K: usize>(
    ct: &mut [u8], t_bytes: &[u8], rho: &[u8; SYMBYTES], msg: &[u8; SYMBYTES],
    coins: &[u8; SYMBYTES],
) {
    let t_hat = NttVector::<K>::from_bytes(t_bytes);
    let at = expand_matrix::<K>(rho, true);

    let r = Vector::<K>::from_fn(|i| sample_noise::<P::Eta1>(coins, i as u8));
    let e1 = Vector::<K>::from_fn(|i| sample_noise::<Eta2>(coins, (K + i) as u8));
    let e2 = sample_noise::<Eta2>(coins, (2 * K) as u8);

    let r_hat = r.ntt();

    // u = invNTT(A^T r) + e1
    let mut u = at.mul_vec(&r_hat).ntt_inverse();
    u += &e1;
    u.reduce();

    // v = invNTT(t^T r) + e2 + Decompress_1(m)
    let mut v = t_hat.inner_product(&r_hat).ntt_inverse();
    v += &e2;
    v += &Polynomial::from_message(msg);
    v.reduce();

    u.compress::<P::Du>(&mut ct[..P::POLYVEC_COMPRESSED_BYTES]);
    v.compress::<P::Dv>(&mut ct[P::POLYVEC_COMPRESSED_BYTES..]);
}

/// Recover the 32-byte message from `ct`.
#[must_use]
pub fn decrypt<P: KyberParams>(sk: &PkeSecretKey<P>, ct: &Ciphertext<P>) -> [u8; SYMBYTES] {
    decrypt_bytes::<P>(sk.as_bytes(), ct.as_bytes())
}

/// [`decrypt`] over raw byte sections, as embedded in a KEM secret key.
pub(crate) fn decrypt_bytes<P: KyberParams>(sk: &[u8], ct: &[u8]) -> [u8; SYMBYTES] {
    match P::K {
        2 => decrypt_inner::<P, 2>(sk, ct),
        3 => decrypt_inner::<P, 3>(sk, ct),
        4 => decrypt_inner::<P, 4>(sk, ct),
        _ => unreachable!(),
    }
}

fn decrypt_inner<P: KyberParams, const K: usize>(sk: &[u8], ct: &[u8]) -> [u8; SYMBYTES] {
    let u = Vector::<K>::decompress::<P::Du>(&ct[..P::POLYVEC_COMPRESSED_BYTES]);
    let v = Polynomial::decompress::<P::Dv>(&ct[P::POLYVEC_COMPRESSED_BYTES..]);
    let s_hat = NttVector::<K>::from_bytes(sk);

    // m = v - invNTT(s^T NTT(u))
    let mut m = &v - &s_hat.inner_product(&u.ntt()).ntt_inverse();
    m.reduce();
    m.to_message()
}
