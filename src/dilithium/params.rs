//! Dilithium parameter sets: the `DilithiumParams` trait and the markers
//! `Dilithium2`, `Dilithium3` and `Dilithium5`.

use dilithium_math::{
    Eta2, Eta4, EtaWidth, Gamma1Pow17, Gamma1Pow19, Gamma1Width, Gamma2Div32, Gamma2Div88,
    Gamma2Width, POLYT0_PACKEDBYTES, POLYT1_PACKEDBYTES, SEEDBYTES,
};

use crate::ByteArray;

/// Dilithium parameter set implemented by [`Dilithium2`], [`Dilithium3`]
/// and [`Dilithium5`].
pub trait DilithiumParams: 'static {
    /// Rows of the public matrix.
    const K: usize;
    /// Columns of the public matrix.
    const L: usize;
    /// Nonzero coefficients of the challenge.
    const TAU: usize;
    /// `tau * eta`, the bound on `||c s||`.
    const BETA: i32;
    /// Maximum number of ones in the hint.
    const OMEGA: usize;

    type Eta: EtaWidth;
    type Gamma1: Gamma1Width;
    type Gamma2: Gamma2Width;

    const POLYVECH_PACKEDBYTES: usize = Self::OMEGA + Self::K;
    const POLYW1_PACKEDBYTES: usize = Self::K * <Self::Gamma2 as Gamma2Width>::W1_POLY_BYTES;
    /// `rho || t1`.
    const PK_BYTES: usize = SEEDBYTES + Self::K * POLYT1_PACKEDBYTES;
    /// `rho || key || tr || s1 || s2 || t0`.
    const SK_BYTES: usize = 3 * SEEDBYTES
        + (Self::L + Self::K) * <Self::Eta as EtaWidth>::POLY_BYTES
        + Self::K * POLYT0_PACKEDBYTES;
    /// `c~ || z || h`.
    const SIG_BYTES: usize = SEEDBYTES
        + Self::L * <Self::Gamma1 as Gamma1Width>::POLYZ_BYTES
        + Self::POLYVECH_PACKEDBYTES;

    type PkArray: ByteArray;
    type SkArray: ByteArray;
    type SigArray: ByteArray;
}

/// Dilithium2 (NIST security level 2).
#[derive(Debug, Clone, Copy)]
pub struct Dilithium2;

impl DilithiumParams for Dilithium2 {
    const K: usize = 4;
    const L: usize = 4;
    const TAU: usize = 39;
    const BETA: i32 = 78;
    const OMEGA: usize = 80;

    type Eta = Eta2;
    type Gamma1 = Gamma1Pow17;
    type Gamma2 = Gamma2Div88;

    type PkArray = [u8; 1312];
    type SkArray = [u8; 2528];
    type SigArray = [u8; 2420];
}

/// Dilithium3 (NIST security level 3).
#[derive(Debug, Clone, Copy)]
pub struct Dilithium3;

impl DilithiumParams for Dilithium3 {
    const K: usize = 6;
    const L: usize = 5;
    const TAU: usize = 49;
    const BETA: i32 = 196;
    const OMEGA: usize = 55;

    type Eta = Eta4;
    type Gamma1 = Gamma1Pow19;
    type Gamma2 = Gamma2Div32;

    type PkArray = [u8; 1952];
    type SkArray = [u8; 4000];
    type SigArray = [u8; 3293];
}

/// Dilithium5 (NIST security level 5).
#[derive(Debug, Clone, Copy)]
pub struct Dilithium5;

impl DilithiumParams for Dilithium5 {
    const K: usize = 8;
    const L: usize = 7;
    const TAU: usize = 60;
    const BETA: i32 = 120;
    const OMEGA: usize = 75;

    type Eta = Eta2;
    type Gamma1 = Gamma1Pow19;
    type Gamma2 = Gamma2Div32;

    type PkArray = [u8; 2592];
    type SkArray = [u8; 4864];
    type SigArray = [u8; 4595];
}

/// Upper bound on `POLYW1_PACKEDBYTES` across parameter sets.
pub(crate) const MAX_POLYW1_PACKEDBYTES: usize = 8 * 128;

/// Upper bound on `POLYZ_BYTES` across gamma1 widths.
pub(crate) const MAX_POLYZ_BYTES: usize = 640;

const _: () = {
    macro_rules! check_params {
        ($t:ty) => {
            assert!(<$t>::BETA == <$t>::TAU as i32 * <<$t as DilithiumParams>::Eta as EtaWidth>::ETA);
            assert!(<<$t as DilithiumParams>::PkArray as ByteArray>::LEN == <$t>::PK_BYTES);
            assert!(<<$t as DilithiumParams>::SkArray as ByteArray>::LEN == <$t>::SK_BYTES);
            assert!(<<$t as DilithiumParams>::SigArray as ByteArray>::LEN == <$t>::SIG_BYTES);
            assert!(<$t>::POLYW1_PACKEDBYTES <= MAX_POLYW1_PACKEDBYTES);
            assert!(<<$t as DilithiumParams>::Gamma1 as Gamma1Width>::POLYZ_BYTES <= MAX_POLYZ_BYTES);
        };
    }
    check_params!(Dilithium2);
    check_params!(Dilithium3);
    check_params!(Dilithium5);

    // Round-3.1 reference api.h values.
    assert!(Dilithium2::PK_BYTES == 1312);
    assert!(Dilithium2::SK_BYTES == 2528);
    assert!(Dilithium2::SIG_BYTES == 2420);

    assert!(Dilithium3::PK_BYTES == 1952);
    assert!(Dilithium3::SK_BYTES == 4000);
    assert!(Dilithium3::SIG_BYTES == 3293);

    assert!(Dilithium5::PK_BYTES == 2592);
    assert!(Dilithium5::SK_BYTES == 4864);
    assert!(Dilithium5::SIG_BYTES == 4595);
};
