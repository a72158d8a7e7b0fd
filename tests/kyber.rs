//! Deterministic and randomized Kyber KEM behavior checks.

use std::collections::HashSet;

use crystals::{
    Error, KyberLevel,
    kyber::{
        Ciphertext, Kyber512, Kyber768, Kyber1024, KyberParams, PublicKey, SecretKey, decapsulate,
        encapsulate, encapsulate_derand, keypair, keypair_derand, pke,
    },
    kyber_math::{NttPolynomial, POLYBYTES, Polynomial, SYMBYTES},
};
use proptest::prelude::*;
use rand_core::{OsRng, TryRngCore};

fn fixed_keygen_coins(variant: u8) -> [u8; 64] {
    core::array::from_fn(|i| (i as u8).wrapping_add(variant.wrapping_mul(37)))
}

fn fixed_enc_coins(variant: u8) -> [u8; 32] {
    core::array::from_fn(|i| (i as u8).wrapping_add(variant.wrapping_mul(53)))
}

fn check_kem_roundtrip<P: KyberParams>() {
    let (pk, sk) = keypair_derand::<P>(&fixed_keygen_coins(0));
    let (ct, ss_enc) = encapsulate_derand::<P>(&pk, &fixed_enc_coins(0));
    let ss_dec = decapsulate::<P>(&ct, &sk);
    assert_eq!(ss_enc.as_bytes(), ss_dec.as_bytes());
}

fn check_determinism<P: KyberParams>() {
    let kp_coins = fixed_keygen_coins(1);
    let enc_coins = fixed_enc_coins(1);

    let (pk1, sk1) = keypair_derand::<P>(&kp_coins);
    let (pk2, sk2) = keypair_derand::<P>(&kp_coins);
    assert_eq!(pk1.as_bytes(), pk2.as_bytes());
    assert_eq!(sk1.as_bytes(), sk2.as_bytes());

    let (ct1, ss1) = encapsulate_derand::<P>(&pk1, &enc_coins);
    let (ct2, ss2) = encapsulate_derand::<P>(&pk2, &enc_coins);
    assert_eq!(ct1.as_bytes(), ct2.as_bytes());
    assert_eq!(ss1.as_bytes(), ss2.as_bytes());
}

fn check_implicit_rejection<P: KyberParams>() {
    let (pk, sk) = keypair_derand::<P>(&fixed_keygen_coins(2));
    let (ct, ss_good) = encapsulate_derand::<P>(&pk, &fixed_enc_coins(2));

    let mut bad_ct_bytes = ct.into_bytes();
    bad_ct_bytes.as_mut()[0] ^= 0xFF;
    let bad_ct = Ciphertext::<P>::from_bytes(bad_ct_bytes);

    let ss_bad = decapsulate::<P>(&bad_ct, &sk);
    assert_ne!(ss_good.as_bytes(), ss_bad.as_bytes());

    let ss_bad2 = decapsulate::<P>(&bad_ct, &sk);
    assert_eq!(ss_bad.as_bytes(), ss_bad2.as_bytes());
}

fn check_wrong_secret_key<P: KyberParams>() {
    let (pk, _) = keypair_derand::<P>(&fixed_keygen_coins(3));
    let (_, wrong_sk) = keypair_derand::<P>(&fixed_keygen_coins(4));
    let (ct, ss_enc) = encapsulate_derand::<P>(&pk, &fixed_enc_coins(3));
    let ss_wrong = decapsulate::<P>(&ct, &wrong_sk);
    assert_ne!(ss_enc.as_bytes(), ss_wrong.as_bytes());
}

fn check_sizes<P: KyberParams>() {
    let (pk, sk) = keypair_derand::<P>(&fixed_keygen_coins(5));
    let (ct, _) = encapsulate_derand::<P>(&pk, &fixed_enc_coins(5));
    assert_eq!(pk.as_bytes().len(), P::PK_BYTES);
    assert_eq!(sk.as_bytes().len(), P::SK_BYTES);
    assert_eq!(ct.as_bytes().len(), P::CT_BYTES);
    assert_eq!(sk.public_key().as_bytes(), pk.as_bytes());
}

fn check_randomized_roundtrip<P: KyberParams>() {
    let mut rng = OsRng.unwrap_err();
    let (pk, sk) = keypair::<P>(&mut rng);
    let (ct, ss_enc) = encapsulate::<P>(&pk, &mut rng);
    let ss_dec = decapsulate::<P>(&ct, &sk);
    assert_eq!(ss_enc.as_bytes(), ss_dec.as_bytes());
}

fn check_different_encaps<P: KyberParams>() {
    let (pk, sk) = keypair_derand::<P>(&fixed_keygen_coins(6));
    let (ct1, ss1) = encapsulate_derand::<P>(&pk, &fixed_enc_coins(10));
    let (ct2, ss2) = encapsulate_derand::<P>(&pk, &fixed_enc_coins(11));

    assert_ne!(ct1.as_bytes(), ct2.as_bytes());
    assert_ne!(ss1.as_bytes(), ss2.as_bytes());
    assert_eq!(ss1.as_bytes(), decapsulate::<P>(&ct1, &sk).as_bytes());
    assert_eq!(ss2.as_bytes(), decapsulate::<P>(&ct2, &sk).as_bytes());
}

fn check_pke_roundtrip<P: KyberParams>() {
    let (pk, sk) = pke::keypair_derand::<P>(&fixed_enc_coins(7));
    let msg: [u8; 32] = core::array::from_fn(|i| (i as u8).wrapping_mul(29) ^ 0xA5);
    let ct = pke::encrypt::<P>(&pk, &msg, &fixed_enc_coins(8));
    assert_eq!(pke::decrypt::<P>(&sk, &ct), msg);
}

fn check_wrong_length_inputs<P: KyberParams>() {
    let short = vec![0u8; P::PK_BYTES - 1];
    assert_eq!(
        PublicKey::<P>::try_from(short.as_slice()).err(),
        Some(Error::InvalidLength {
            expected: P::PK_BYTES,
            actual: P::PK_BYTES - 1,
        })
    );
    let long = vec![0u8; P::SK_BYTES + 1];
    assert!(SecretKey::<P>::try_from(long.as_slice()).is_err());
    let empty: &[u8] = &[];
    assert!(Ciphertext::<P>::try_from(empty).is_err());
}

/// Decode each `width`-byte chunk of `bytes`, encode it again and require
/// the same bytes back.
fn assert_repacks<T>(
    what: &str,
    bytes: &[u8],
    width: usize,
    unpack: impl Fn(&[u8]) -> T,
    pack: impl Fn(&T, &mut [u8]),
) {
    assert_eq!(bytes.len() % width, 0, "{what}");
    for (i, chunk) in bytes.chunks_exact(width).enumerate() {
        let mut out = vec![0u8; width];
        pack(&unpack(chunk), &mut out);
        assert_eq!(out, chunk, "{what}[{i}]");
    }
}

fn check_repack<P: KyberParams>() {
    let (pk, sk) = keypair_derand::<P>(&fixed_keygen_coins(12));
    let (ct, _) = encapsulate_derand::<P>(&pk, &fixed_enc_coins(12));

    let (t_hat, rho) = pk.as_bytes().split_at(P::POLYVEC_BYTES);
    assert_eq!(rho.len(), SYMBYTES);
    assert_repacks("t", t_hat, POLYBYTES, NttPolynomial::from_bytes, NttPolynomial::to_bytes);

    let s_hat = &sk.as_bytes()[..P::INDCPA_SK_BYTES];
    assert_repacks("s", s_hat, POLYBYTES, NttPolynomial::from_bytes, NttPolynomial::to_bytes);
    assert_eq!(&sk.as_bytes()[P::INDCPA_SK_BYTES..][..P::PK_BYTES], pk.as_bytes());

    let (u, v) = ct.as_bytes().split_at(P::POLYVEC_COMPRESSED_BYTES);
    assert_repacks(
        "u",
        u,
        P::POLYVEC_COMPRESSED_BYTES / P::K,
        Polynomial::decompress::<P::Du>,
        Polynomial::compress::<P::Du>,
    );
    assert_repacks(
        "v",
        v,
        P::POLY_COMPRESSED_BYTES,
        Polynomial::decompress::<P::Dv>,
        Polynomial::compress::<P::Dv>,
    );
}

/// Run a generic check once per parameter set, one test each.
macro_rules! check_for_param_set {
    ($fn_name:ident) => {
        mod $fn_name {
            use super::*;

            #[test]
            fn kyber512() {
                $fn_name::<Kyber512>();
            }

            #[test]
            fn kyber768() {
                $fn_name::<Kyber768>();
            }

            #[test]
            fn kyber1024() {
                $fn_name::<Kyber1024>();
            }
        }
    };
}

check_for_param_set!(check_kem_roundtrip);
check_for_param_set!(check_determinism);
check_for_param_set!(check_implicit_rejection);
check_for_param_set!(check_wrong_secret_key);
check_for_param_set!(check_sizes);
check_for_param_set!(check_randomized_roundtrip);
check_for_param_set!(check_different_encaps);
check_for_param_set!(check_pke_roundtrip);
check_for_param_set!(check_wrong_length_inputs);
check_for_param_set!(check_repack);

#[test]
fn distinct_seeds_give_distinct_outputs() {
    let mut public_keys = HashSet::new();
    let mut ciphertexts = HashSet::new();
    let mut secrets = HashSet::new();
    for i in 0u32..1000 {
        let mut coins = [0x5Au8; 64];
        coins[..4].copy_from_slice(&i.to_le_bytes());
        let mut enc_coins = [0xA5u8; 32];
        enc_coins[..4].copy_from_slice(&i.to_le_bytes());

        let (pk, _) = keypair_derand::<Kyber512>(&coins);
        let (ct, ss) = encapsulate_derand::<Kyber512>(&pk, &enc_coins);
        assert!(public_keys.insert(pk.as_bytes().to_vec()), "public key repeated at {i}");
        assert!(ciphertexts.insert(ct.as_bytes().to_vec()), "ciphertext repeated at {i}");
        assert!(secrets.insert(ss.as_bytes().to_vec()), "shared secret repeated at {i}");
    }
}

#[test]
fn level_sizes_match_parameter_sets() {
    let sizes = KyberLevel::Kyber768.sizes();
    assert_eq!(sizes.public_key, Kyber768::PK_BYTES);
    assert_eq!(sizes.secret_key, Kyber768::SK_BYTES);
    assert_eq!(sizes.ciphertext, Kyber768::CT_BYTES);
    assert_eq!(KyberLevel::Kyber512.sizes().ciphertext, 768);
    assert_eq!(KyberLevel::Kyber1024.sizes().public_key, 1568);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn any_coins_roundtrip(kp in any::<[u8; 32]>(), z in any::<[u8; 32]>(), m in any::<[u8; 32]>()) {
        let mut coins = [0u8; 64];
        coins[..32].copy_from_slice(&kp);
        coins[32..].copy_from_slice(&z);
        let (pk, sk) = keypair_derand::<Kyber768>(&coins);
        let (ct, ss) = encapsulate_derand::<Kyber768>(&pk, &m);
        let decapsulated = decapsulate::<Kyber768>(&ct, &sk);
        prop_assert_eq!(ss.as_bytes(), decapsulated.as_bytes());
    }

    #[test]
    fn any_bit_flip_is_rejected_implicitly(byte in 0usize..768, bit in 0u8..8) {
        let (pk, sk) = keypair_derand::<Kyber512>(&fixed_keygen_coins(9));
        let (ct, ss) = encapsulate_derand::<Kyber512>(&pk, &fixed_enc_coins(9));
        let mut bytes = ct.into_bytes();
        bytes[byte] ^= 1 << bit;
        let bad = decapsulate::<Kyber512>(&Ciphertext::from_bytes(bytes), &sk);
        prop_assert_ne!(ss.as_bytes(), bad.as_bytes());
    }
}
