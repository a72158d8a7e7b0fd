//! Kyber IND-CCA2 key encapsulation with implicit rejection.

use kyber_math::SYMBYTES;
use rand_core::CryptoRng;
use zerocopy::transmute_ref;
use zeroize::Zeroize;

use super::{
    params::KyberParams,
    pke,
    types::{Ciphertext, PublicKey, SecretKey, SharedSecret},
};
use crate::{
    ByteArray,
    ct::{ct_assign, ct_eq},
    hash::{self, Sym2},
};

/// Deterministic key generation from a 64-byte seed `d || z`.
#[must_use]
pub fn keypair_derand<P: KyberParams>(coins: &[u8; 2 * SYMBYTES]) -> (PublicKey<P>, SecretKey<P>) {
    let Sym2(d, z) = transmute_ref!(coins);

    let (pk, pke_sk) = pke::keypair_derand::<P>(d);

    let mut sk = P::SkArray::zeroed();
    let (indcpa_sk, rest) = sk.as_mut().split_at_mut(P::INDCPA_SK_BYTES);
    let (pk_copy, rest) = rest.split_at_mut(P::PK_BYTES);
    let (h_pk, z_copy) = rest.split_at_mut(SYMBYTES);
    indcpa_sk.copy_from_slice(pke_sk.as_bytes());
    pk_copy.copy_from_slice(pk.as_bytes());
    h_pk.copy_from_slice(&hash::hash_h(pk.as_bytes()));
    z_copy.copy_from_slice(z);

    (pk, SecretKey::from_bytes(sk))
}

/// Randomized key generation.
pub fn keypair<P: KyberParams>(rng: &mut impl CryptoRng) -> (PublicKey<P>, SecretKey<P>) {
    let mut coins = [0u8; 2 * SYMBYTES];
    rng.fill_bytes(&mut coins);
    let keys = keypair_derand::<P>(&coins);
    coins.zeroize();
    keys
}

/// Deterministic encapsulation with explicit 32-byte randomness.
#[must_use]
pub fn encapsulate_derand<P: KyberParams>(
    pk: &PublicKey<P>, coins: &[u8; SYMBYTES],
) -> (Ciphertext<P>, SharedSecret) {
    // Never expose raw system randomness.
    let mut buf = [0u8; 2 * SYMBYTES];
    buf[..SYMBYTES].copy_from_slice(&hash::hash_h(coins));
    buf[SYMBYTES..].copy_from_slice(&hash::hash_h(pk.as_bytes()));

    let mut kr = hash::hash_g(buf);
    let Sym2(m, _) = transmute_ref!(&buf);
    let Sym2(k_bar, r) = transmute_ref!(&kr);

    let ct = pke::encrypt::<P>(pk, m, r);
    let ss = hash::kdf(k_bar, &hash::hash_h(ct.as_bytes()));

    buf.zeroize();
    kr.zeroize();
    (ct, SharedSecret::from_bytes(ss))
}

/// Randomized encapsulation.
pub fn encapsulate<P: KyberParams>(
    pk: &PublicKey<P>, rng: &mut impl CryptoRng,
) -> (Ciphertext<P>, SharedSecret) {
    let mut coins = [0u8; SYMBYTES];
    rng.fill_bytes(&mut coins);
    let out = encapsulate_derand::<P>(pk, &coins);
    coins.zeroize();
    out
}

/// Decapsulation with implicit rejection: a ciphertext that does not
/// re-encrypt to itself yields a key derived from the secret `z` instead
/// of an error.
#[must_use]
pub fn decapsulate<P: KyberParams>(ct: &Ciphertext<P>, sk: &SecretKey<P>) -> SharedSecret {
    let mut buf = [0u8; 2 * SYMBYTES];
    buf[..SYMBYTES].copy_from_slice(&pke::decrypt_bytes::<P>(sk.indcpa_sk(), ct.as_bytes()));
    buf[SYMBYTES..].copy_from_slice(sk.hashed_public_key());

    let mut kr = hash::hash_g(buf);
    let Sym2(m, _) = transmute_ref!(&buf);
    let Sym2(k_bar, r) = transmute_ref!(&kr);

    let cmp = pke::encrypt::<P>(&sk.public_key(), m, r);
    let fail = !ct_eq(ct.as_bytes(), cmp.as_bytes());

    let mut k = *k_bar;
    ct_assign(&mut k, sk.rejection_secret(), fail);
    let ss = hash::kdf(&k, &hash::hash_h(ct.as_bytes()));

    buf.zeroize();
    kr.zeroize();
    k.zeroize();
    SharedSecret::from_bytes(ss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kyber::{Kyber512, Kyber768, Kyber1024};

    fn roundtrip<P: KyberParams>() {
        let (pk, sk) = keypair_derand::<P>(&[0x42; 2 * SYMBYTES]);
        let (ct, ss) = encapsulate_derand(&pk, &[0x17; SYMBYTES]);
        assert_eq!(decapsulate(&ct, &sk), ss);
    }

    #[test]
    fn roundtrip_512() {
        roundtrip::<Kyber512>();
    }

    #[test]
    fn roundtrip_768() {
        roundtrip::<Kyber768>();
    }

    #[test]
    fn roundtrip_1024() {
        roundtrip::<Kyber1024>();
    }

    #[test]
    fn secret_key_layout() {
        let mut seed = [0u8; 2 * SYMBYTES];
        seed[SYMBYTES..].fill(0xEE);
        let (pk, sk) = keypair_derand::<Kyber768>(&seed);
        assert_eq!(sk.public_key(), pk);
        assert_eq!(sk.hashed_public_key(), hash::hash_h(pk.as_bytes()));
        assert_eq!(sk.rejection_secret(), [0xEE; SYMBYTES]);
    }

    #[test]
    fn tampered_ciphertext_yields_rejection_key() {
        let (pk, sk) = keypair_derand::<Kyber512>(&[1u8; 2 * SYMBYTES]);
        let (ct, ss) = encapsulate_derand(&pk, &[2u8; SYMBYTES]);

        let mut bytes = ct.into_bytes();
        bytes[0] ^= 1;
        let bad = Ciphertext::<Kyber512>::from_bytes(bytes);
        let rejected = decapsulate(&bad, &sk);
        assert_ne!(rejected, ss);

        let expected = hash::kdf(&[1u8; SYMBYTES], &hash::hash_h(bad.as_bytes()));
        assert_eq!(rejected.as_bytes(), expected);
    }
}
