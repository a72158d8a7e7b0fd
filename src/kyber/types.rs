//! Kyber key, ciphertext and shared-secret newtypes. Secret types zeroize
//! on drop.

use kyber_math::SYMBYTES;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::params::{KyberParams, SSBYTES};
use crate::bytes::byte_newtype;

/// Kyber public (encapsulation) key: `Encode_12(t) || rho`.
pub struct PublicKey<P: KyberParams> {
    pub(crate) bytes: P::PkArray,
}

byte_newtype!(public PublicKey, KyberParams, PkArray, "kyber public key");

impl<P: KyberParams> PublicKey<P> {
    /// `(Encode_12(t), rho)`.
    pub(crate) fn split(&self) -> (&[u8], &[u8; SYMBYTES]) {
        match self.bytes.as_ref().split_last_chunk() {
            Some(parts) => parts,
            None => unreachable!("public keys end with the matrix seed"),
        }
    }

    /// Seed of the public matrix.
    #[must_use]
    pub fn rho(&self) -> &[u8; SYMBYTES] {
        self.split().1
    }
}

/// Kyber secret (decapsulation) key: `indcpa_sk || pk || H(pk) || z`.
pub struct SecretKey<P: KyberParams> {
    pub(crate) bytes: P::SkArray,
}

byte_newtype!(secret SecretKey, KyberParams, SkArray, "kyber secret key");

impl<P: KyberParams> SecretKey<P> {
    pub(crate) fn indcpa_sk(&self) -> &[u8] {
        &self.bytes.as_ref()[..P::INDCPA_SK_BYTES]
    }

    pub(crate) fn public_key_bytes(&self) -> &[u8] {
        &self.bytes.as_ref()[P::INDCPA_SK_BYTES..P::INDCPA_SK_BYTES + P::PK_BYTES]
    }

    /// Embedded copy of the public key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey<P> {
        let mut bytes = <P::PkArray as crate::ByteArray>::zeroed();
        bytes.as_mut().copy_from_slice(self.public_key_bytes());
        PublicKey { bytes }
    }

    pub(crate) fn hashed_public_key(&self) -> &[u8] {
        let start = P::INDCPA_SK_BYTES + P::PK_BYTES;
        &self.bytes.as_ref()[start..start + SYMBYTES]
    }

    pub(crate) fn rejection_secret(&self) -> &[u8] {
        &self.bytes.as_ref()[P::SK_BYTES - SYMBYTES..]
    }
}

/// Secret key of the inner public-key encryption: `Encode_12(s)`.
pub struct PkeSecretKey<P: KyberParams> {
    pub(crate) bytes: P::PkeSkArray,
}

byte_newtype!(secret PkeSecretKey, KyberParams, PkeSkArray, "kyber pke secret key");

/// Kyber ciphertext: `Compress_du(u) || Compress_dv(v)`.
pub struct Ciphertext<P: KyberParams> {
    pub(crate) bytes: P::CtArray,
}

byte_newtype!(public Ciphertext, KyberParams, CtArray, "kyber ciphertext");

/// Shared secret (always 32 bytes). Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    pub(crate) bytes: [u8; SSBYTES],
}

impl SharedSecret {
    /// Wrap a raw 32-byte array as a shared secret.
    #[inline]
    #[must_use]
    pub fn from_bytes(bytes: [u8; SSBYTES]) -> Self {
        Self { bytes }
    }

    /// View the secret as a byte slice.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        crate::ct::ct_eq(&self.bytes, &other.bytes).into()
    }
}

impl Eq for SharedSecret {}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, kyber::Kyber512};

    #[test]
    fn try_from_checks_length() {
        let err = PublicKey::<Kyber512>::try_from(&[0u8; 799][..]).unwrap_err();
        assert_eq!(err, Error::InvalidLength { expected: 800, actual: 799 });
        assert!(Ciphertext::<Kyber512>::try_from(&[0u8; 768][..]).is_ok());
    }

    #[test]
    fn secret_debug_is_redacted() {
        let sk = SecretKey::<Kyber512>::from_bytes([7u8; 1632]);
        assert_eq!(format!("{sk:?}"), "SecretKey([REDACTED])");
        let ss = SharedSecret::from_bytes([1u8; SSBYTES]);
        assert_eq!(format!("{ss:?}"), "SharedSecret([REDACTED])");
    }

    #[test]
    fn secret_key_sections() {
        let mut bytes = [0u8; 1632];
        bytes[768..1568].fill(1);
        bytes[1568..1600].fill(2);
        bytes[1600..].fill(3);
        let sk = SecretKey::<Kyber512>::from_bytes(bytes);
        assert!(sk.public_key().as_bytes().iter().all(|&b| b == 1));
        assert!(sk.hashed_public_key().iter().all(|&b| b == 2));
        assert!(sk.rejection_secret().iter().all(|&b| b == 3));
    }

    #[test]
    fn rho_is_public_key_tail() {
        let mut bytes = [0u8; 800];
        bytes[768..].fill(0x5A);
        assert_eq!(PublicKey::<Kyber512>::from_bytes(bytes).rho(), &[0x5A; SYMBYTES]);
    }
}
