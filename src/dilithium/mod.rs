//! CRYSTALS-Dilithium, round 3.1: lattice signatures with the
//! Fiat-Shamir-with-aborts signing loop.

mod params;
mod sign;
mod types;

pub use params::{Dilithium2, Dilithium3, Dilithium5, DilithiumParams};
pub use sign::{
    MAX_SIGN_ATTEMPTS, keypair, keypair_derand, sign, sign_deterministic, sign_with_mode, verify,
};
pub use types::{PublicKey, SecretKey, Signature};
