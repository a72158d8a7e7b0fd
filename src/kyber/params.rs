//! Kyber parameter sets: the `KyberParams` trait and the markers
//! `Kyber512`, `Kyber768` and `Kyber1024`.

use kyber_math::{
    N, POLYBYTES, SYMBYTES,
    compress::{CompressWidth, CompressWidthParams, D4, D5, D10, D11},
    sample::{CbdWidth, Eta2, Eta3},
};

use crate::ByteArray;

/// Size in bytes of the shared secret.
pub const SSBYTES: usize = 32;

/// Kyber parameter set implemented by [`Kyber512`], [`Kyber768`] and
/// [`Kyber1024`].
pub trait KyberParams: 'static {
    /// Module rank.
    const K: usize;
    /// Noise width for the secret, the key error and the encryption `r`.
    type Eta1: CbdWidth;
    /// Compression of the ciphertext vector `u`.
    type Du: CompressWidth;
    /// Compression of the ciphertext polynomial `v`.
    type Dv: CompressWidth;

    /// Serialised polynomial vector.
    const POLYVEC_BYTES: usize = Self::K * POLYBYTES;
    const POLYVEC_COMPRESSED_BYTES: usize = Self::K * <Self::Du as CompressWidthParams>::POLY_BYTES;
    const POLY_COMPRESSED_BYTES: usize = <Self::Dv as CompressWidthParams>::POLY_BYTES;
    const INDCPA_PK_BYTES: usize = Self::POLYVEC_BYTES + SYMBYTES;
    const INDCPA_SK_BYTES: usize = Self::POLYVEC_BYTES;
    const INDCPA_BYTES: usize = Self::POLYVEC_COMPRESSED_BYTES + Self::POLY_COMPRESSED_BYTES;
    const PK_BYTES: usize = Self::INDCPA_PK_BYTES;
    /// `indcpa_sk || pk || H(pk) || z`.
    const SK_BYTES: usize = Self::INDCPA_SK_BYTES + Self::PK_BYTES + 2 * SYMBYTES;
    const CT_BYTES: usize = Self::INDCPA_BYTES;

    type PkArray: ByteArray;
    type SkArray: ByteArray;
    type CtArray: ByteArray;
    type PkeSkArray: ByteArray;
}

/// Kyber512 (k = 2, NIST security level 1).
#[derive(Debug, Clone, Copy)]
pub struct Kyber512;

impl KyberParams for Kyber512 {
    const K: usize = 2;
    type Eta1 = Eta3;
    type Du = D10;
    type Dv = D4;

    type PkArray = [u8; 800];
    type SkArray = [u8; 1632];
    type CtArray = [u8; 768];
    type PkeSkArray = [u8; 768];
}

/// Kyber768 (k = 3, NIST security level 3).
#[derive(Debug, Clone, Copy)]
pub struct Kyber768;

impl KyberParams for Kyber768 {
    const K: usize = 3;
    type Eta1 = Eta2;
    type Du = D10;
    type Dv = D4;

    type PkArray = [u8; 1184];
    type SkArray = [u8; 2400];
    type CtArray = [u8; 1088];
    type PkeSkArray = [u8; 1152];
}

/// Kyber1024 (k = 4, NIST security level 5).
#[derive(Debug, Clone, Copy)]
pub struct Kyber1024;

impl KyberParams for Kyber1024 {
    const K: usize = 4;
    type Eta1 = Eta2;
    type Du = D11;
    type Dv = D5;

    type PkArray = [u8; 1568];
    type SkArray = [u8; 3168];
    type CtArray = [u8; 1568];
    type PkeSkArray = [u8; 1536];
}

const _: () = {
    macro_rules! check_params {
        ($t:ty) => {
            assert!(<$t>::POLY_COMPRESSED_BYTES == N * <<$t as KyberParams>::Dv as CompressWidthParams>::D as usize / 8);
            assert!(
                <$t>::POLYVEC_COMPRESSED_BYTES
                    == <$t>::K * N * <<$t as KyberParams>::Du as CompressWidthParams>::D as usize / 8
            );
            assert!(<<$t as KyberParams>::PkArray as ByteArray>::LEN == <$t>::PK_BYTES);
            assert!(<<$t as KyberParams>::SkArray as ByteArray>::LEN == <$t>::SK_BYTES);
            assert!(<<$t as KyberParams>::CtArray as ByteArray>::LEN == <$t>::CT_BYTES);
            assert!(<<$t as KyberParams>::PkeSkArray as ByteArray>::LEN == <$t>::INDCPA_SK_BYTES);
        };
    }
    check_params!(Kyber512);
    check_params!(Kyber768);
    check_params!(Kyber1024);

    // Round-3 reference api.h values.
    assert!(Kyber512::PK_BYTES == 800);
    assert!(Kyber512::SK_BYTES == 1632);
    assert!(Kyber512::CT_BYTES == 768);

    assert!(Kyber768::PK_BYTES == 1184);
    assert!(Kyber768::SK_BYTES == 2400);
    assert!(Kyber768::CT_BYTES == 1088);

    assert!(Kyber1024::PK_BYTES == 1568);
    assert!(Kyber1024::SK_BYTES == 3168);
    assert!(Kyber1024::CT_BYTES == 1568);
};
