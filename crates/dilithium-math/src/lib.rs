//! `dilithium-math` -- arithmetic core of CRYSTALS-Dilithium (round 3.1).
//!
//! `no_std`, allocation-free polynomial arithmetic over `Z_q[X]/(X^{256}+1)`
//! with q = 8380417: Montgomery and shift-based reduction, the full-split
//! Number-Theoretic Transform, power-of-two and gamma2 rounding with hints,
//! rejection samplers and every bit-packer used by keys and signatures.
//!
//! Parameter-dependent widths (eta, gamma1, gamma2) are sealed zero-sized
//! marker types so that a parameter set selects its encodings statically.

#![no_std]
#![deny(unsafe_code)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]

pub mod ntt;
pub mod pack;
pub mod poly;
pub mod reduce;
pub mod rounding;
pub mod sample;

pub use pack::{Gamma1Pow17, Gamma1Pow19, Gamma1Width};
pub use poly::{NttMatrix, NttPolynomial, NttVector, Polynomial, Vector};
pub use rounding::{Gamma2Div32, Gamma2Div88, Gamma2Width};
pub use sample::{Eta2, Eta4, EtaWidth};

/// Polynomial ring degree.
pub const N: usize = 256;

/// Field modulus.
pub const Q: i32 = 8_380_417;

/// Bits dropped from `t` by [`rounding::power2round`].
pub const D: u32 = 13;

/// Size in bytes of seeds and of the challenge hash.
pub const SEEDBYTES: usize = 32;

/// Size in bytes of `mu` and of the masking seed.
pub const CRHBYTES: usize = 64;

/// Packed size of a `t1` polynomial (10 bits per coefficient).
pub const POLYT1_PACKEDBYTES: usize = 320;

/// Packed size of a `t0` polynomial (13 bits per coefficient).
pub const POLYT0_PACKEDBYTES: usize = 416;
