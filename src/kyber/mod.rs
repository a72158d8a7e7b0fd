//! CRYSTALS-Kyber, round 3: an IND-CPA public-key encryption scheme and the
//! IND-CCA2 key encapsulation built on it with the Fujisaki-Okamoto
//! transform and implicit rejection.

pub mod kem;
mod params;
pub mod pke;
mod types;

pub use kem::{decapsulate, encapsulate, encapsulate_derand, keypair, keypair_derand};
pub use params::{Kyber512, Kyber768, Kyber1024, KyberParams, SSBYTES};
pub use types::{Ciphertext, PkeSecretKey, PublicKey, SecretKey, SharedSecret};
