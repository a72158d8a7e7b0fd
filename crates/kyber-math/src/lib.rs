//! `kyber-math` -- arithmetic core of CRYSTALS-Kyber (round 3).
//!
//! `no_std`, allocation-free polynomial arithmetic over `Z_q[X]/(X^{256}+1)`
//! with q = 3329. Sub-modules cover modular reduction, the Number-Theoretic
//! Transform, polynomial and vector arithmetic, lossy compression, 12-bit
//! packing and deterministic sampling. Hashing is not done here: samplers
//! take a `fill` closure that squeezes bytes from the caller's XOF.

#![no_std]
#![deny(unsafe_code)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]

pub mod compress;
pub mod encode;
pub mod ntt;
pub mod poly;
pub mod reduce;
pub mod sample;

pub use poly::{NttMatrix, NttPolynomial, NttVector, Polynomial, Vector};

/// Polynomial ring degree.
pub const N: usize = 256;

/// Field modulus.
pub const Q: i16 = 3329;

/// Size in bytes of hashes, seeds, messages and shared secrets.
pub const SYMBYTES: usize = 32;

/// Size in bytes of a serialised polynomial (12 bits * 256 / 8).
pub const POLYBYTES: usize = 384;
