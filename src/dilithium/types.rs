//! Dilithium key and signature newtypes with typed views over their packed
//! sections.

use dilithium_math::{EtaWidth, Gamma1Width, POLYT0_PACKEDBYTES, SEEDBYTES, Vector};

use super::params::DilithiumParams;
use crate::{Error, bytes::byte_newtype};

fn seed_at(bytes: &[u8], offset: usize) -> &[u8; SEEDBYTES] {
    match bytes[offset..].first_chunk() {
        Some(seed) => seed,
        None => unreachable!("packed layouts hold a full seed at {offset}"),
    }
}

/// Dilithium public key: `rho || t1`.
pub struct PublicKey<P: DilithiumParams> {
    pub(crate) bytes: P::PkArray,
}

byte_newtype!(public PublicKey, DilithiumParams, PkArray, "dilithium public key");

impl<P: DilithiumParams> PublicKey<P> {
    /// Seed of the public matrix.
    #[must_use]
    pub fn rho(&self) -> &[u8; SEEDBYTES] {
        seed_at(self.bytes.as_ref(), 0)
    }

    pub(crate) fn t1_bytes(&self) -> &[u8] {
        &self.bytes.as_ref()[SEEDBYTES..]
    }
}

/// Dilithium secret key: `rho || key || tr || s1 || s2 || t0`.
pub struct SecretKey<P: DilithiumParams> {
    pub(crate) bytes: P::SkArray,
}

byte_newtype!(secret SecretKey, DilithiumParams, SkArray, "dilithium secret key");

impl<P: DilithiumParams> SecretKey<P> {
    const S1_OFFSET: usize = 3 * SEEDBYTES;
    const S2_OFFSET: usize = Self::S1_OFFSET + P::L * <P::Eta as EtaWidth>::POLY_BYTES;
    const T0_OFFSET: usize = Self::S2_OFFSET + P::K * <P::Eta as EtaWidth>::POLY_BYTES;

    /// Seed of the public matrix, identical to [`PublicKey::rho`].
    #[must_use]
    pub fn public_seed(&self) -> &[u8; SEEDBYTES] {
        seed_at(self.bytes.as_ref(), 0)
    }

    /// Signing key mixed into the deterministic masking seed.
    pub(crate) fn key(&self) -> &[u8; SEEDBYTES] {
        seed_at(self.bytes.as_ref(), SEEDBYTES)
    }

    /// Hash of the public key.
    #[must_use]
    pub fn tr(&self) -> &[u8; SEEDBYTES] {
        seed_at(self.bytes.as_ref(), 2 * SEEDBYTES)
    }

    pub(crate) fn s1_bytes(&self) -> &[u8] {
        &self.bytes.as_ref()[Self::S1_OFFSET..Self::S2_OFFSET]
    }

    pub(crate) fn s2_bytes(&self) -> &[u8] {
        &self.bytes.as_ref()[Self::S2_OFFSET..Self::T0_OFFSET]
    }

    pub(crate) fn t0_bytes(&self) -> &[u8] {
        let t0 = &self.bytes.as_ref()[Self::T0_OFFSET..];
        debug_assert_eq!(t0.len(), P::K * POLYT0_PACKEDBYTES);
        t0
    }
}

/// Dilithium signature: `c~ || z || h`.
pub struct Signature<P: DilithiumParams> {
    pub(crate) bytes: P::SigArray,
}

byte_newtype!(public Signature, DilithiumParams, SigArray, "dilithium signature");

impl<P: DilithiumParams> Signature<P> {
    const Z_OFFSET: usize = SEEDBYTES;
    const H_OFFSET: usize = Self::Z_OFFSET + P::L * <P::Gamma1 as Gamma1Width>::POLYZ_BYTES;

    /// Commitment hash `c~`.
    #[must_use]
    pub fn challenge_seed(&self) -> &[u8; SEEDBYTES] {
        seed_at(self.bytes.as_ref(), 0)
    }

    pub(crate) fn z_bytes(&self) -> &[u8] {
        &self.bytes.as_ref()[Self::Z_OFFSET..Self::H_OFFSET]
    }

    pub(crate) fn hint_bytes(&self) -> &[u8] {
        &self.bytes.as_ref()[Self::H_OFFSET..]
    }

    /// Check that the hint section is canonically encoded.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedSignature`] if the hint offsets, positions or
    /// padding are invalid.
    pub fn check_encoding(&self) -> Result<(), Error> {
        let valid = match P::K {
            4 => Vector::<4>::unpack_hint(self.hint_bytes(), P::OMEGA).is_some(),
            6 => Vector::<6>::unpack_hint(self.hint_bytes(), P::OMEGA).is_some(),
            8 => Vector::<8>::unpack_hint(self.hint_bytes(), P::OMEGA).is_some(),
            _ => unreachable!(),
        };
        if valid {
            Ok(())
        } else {
            tracing::debug!("signature hint encoding is not canonical");
            Err(Error::MalformedSignature)
        }
    }
}
