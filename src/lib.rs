//! `crystals` -- CRYSTALS-Kyber (round 3) key encapsulation and
//! CRYSTALS-Dilithium (round 3.1) signatures.
//!
//! Both schemes are generic over marker types naming their parameter sets:
//! [`kyber::Kyber512`], [`kyber::Kyber768`], [`kyber::Kyber1024`] and
//! [`dilithium::Dilithium2`], [`dilithium::Dilithium3`],
//! [`dilithium::Dilithium5`]. Keys, ciphertexts and signatures are typed
//! byte arrays whose lengths follow from the parameter set.

#![deny(unsafe_code)]

mod bytes;
pub mod config;
mod ct;
pub mod dilithium;
mod hash;
pub mod kyber;

pub use bytes::ByteArray;
pub use config::{Config, DilithiumLevel, KyberLevel, SigningMode};
pub use dilithium_math;
pub use kyber_math;

/// Errors returned by fallible operations of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input byte slice has the wrong length for this parameter set.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },
    /// The signing rejection loop hit its attempt budget.
    #[error("signing gave up after {attempts} attempts")]
    SigningExhausted {
        /// Attempts made before giving up.
        attempts: u16,
    },
    /// Signature bytes carry a non-canonical hint encoding.
    #[error("malformed signature")]
    MalformedSignature,
}
