//! Runtime selection of parameter sets and signing mode.
//!
//! The scheme APIs are generic over parameter markers; these enums let a
//! caller carry the choice as data (for example in a config file) and look
//! up the matching byte lengths.

#![deny(missing_docs)]

use serde::{Deserialize, Serialize};

use crate::{
    dilithium::{Dilithium2, Dilithium3, Dilithium5, DilithiumParams},
    kyber::{Kyber512, Kyber768, Kyber1024, KyberParams},
};

/// Byte lengths of one Kyber parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KemSizes {
    /// Encoded public key.
    pub public_key: usize,
    /// Encoded secret key, including the embedded public key, its hash and `z`.
    pub secret_key: usize,
    /// Ciphertext.
    pub ciphertext: usize,
    /// Shared secret, the same for every level.
    pub shared_secret: usize,
}

/// Byte lengths of one Dilithium parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSizes {
    /// `rho || t1`.
    pub public_key: usize,
    /// `rho || key || tr || s1 || s2 || t0`.
    pub secret_key: usize,
    /// `c~ || z || h`, without the message.
    pub signature: usize,
}

/// Kyber parameter set, named by its `k * 256` module rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KyberLevel {
    /// k = 2, NIST category 1.
    Kyber512,
    /// k = 3, NIST category 3.
    #[default]
    Kyber768,
    /// k = 4, NIST category 5.
    Kyber1024,
}

impl KyberLevel {
    const fn sizes_of<P: KyberParams>() -> KemSizes {
        KemSizes {
            public_key: P::PK_BYTES,
            secret_key: P::SK_BYTES,
            ciphertext: P::CT_BYTES,
            shared_secret: crate::kyber::SSBYTES,
        }
    }

    /// Byte lengths of this level's keys, ciphertext and shared secret.
    #[must_use]
    pub const fn sizes(self) -> KemSizes {
        match self {
            Self::Kyber512 => Self::sizes_of::<Kyber512>(),
            Self::Kyber768 => Self::sizes_of::<Kyber768>(),
            Self::Kyber1024 => Self::sizes_of::<Kyber1024>(),
        }
    }
}

/// Dilithium parameter set, named by its NIST security category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DilithiumLevel {
    /// 4x4 matrix.
    Dilithium2,
    /// 6x5 matrix.
    #[default]
    Dilithium3,
    /// 8x7 matrix.
    Dilithium5,
}

impl DilithiumLevel {
    const fn sizes_of<P: DilithiumParams>() -> SignatureSizes {
        SignatureSizes {
            public_key: P::PK_BYTES,
            secret_key: P::SK_BYTES,
            signature: P::SIG_BYTES,
        }
    }

    /// Byte lengths of this level's keys and signature.
    #[must_use]
    pub const fn sizes(self) -> SignatureSizes {
        match self {
            Self::Dilithium2 => Self::sizes_of::<Dilithium2>(),
            Self::Dilithium3 => Self::sizes_of::<Dilithium3>(),
            Self::Dilithium5 => Self::sizes_of::<Dilithium5>(),
        }
    }
}

/// How Dilithium derives its per-signature masking seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningMode {
    /// Seed derived from the secret key and the message; signing the same
    /// message twice gives the same signature.
    Deterministic,
    /// Seed drawn from the caller's RNG.
    #[default]
    Randomized,
}

/// Aggregate scheme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// KEM parameter set.
    pub kem: KyberLevel,
    /// Signature parameter set.
    pub signature: DilithiumLevel,
    /// Masking seed source used by [`crate::dilithium::sign_with_mode`].
    pub signing_mode: SigningMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.kem, KyberLevel::Kyber768);
        assert_eq!(c.signature, DilithiumLevel::Dilithium3);
        assert_eq!(c.signing_mode, SigningMode::Randomized);
    }

    #[test]
    fn kem_sizes() {
        assert_eq!(KyberLevel::Kyber512.sizes().public_key, 800);
        assert_eq!(KyberLevel::Kyber768.sizes().secret_key, 2400);
        assert_eq!(KyberLevel::Kyber1024.sizes().ciphertext, 1568);
    }

    #[test]
    fn signature_sizes() {
        assert_eq!(
            DilithiumLevel::Dilithium2.sizes(),
            SignatureSizes { public_key: 1312, secret_key: 2528, signature: 2420 }
        );
        assert_eq!(DilithiumLevel::Dilithium3.sizes().signature, 3293);
        assert_eq!(DilithiumLevel::Dilithium5.sizes().secret_key, 4864);
    }

    #[test]
    fn json_roundtrip_with_partial_input() {
        let c: Config =
            serde_json::from_str(r#"{"signing_mode":"deterministic"}"#).expect("valid json");
        assert_eq!(c.signing_mode, SigningMode::Deterministic);
        assert_eq!(c.kem, KyberLevel::Kyber768);

        let text = serde_json::to_string(&c).expect("serializable");
        assert_eq!(serde_json::from_str::<Config>(&text).expect("roundtrip"), c);
    }
}
