//! Hash and extendable-output function adapters over the SHA-3 family.

use kyber_math::SYMBYTES;
use sha3::{
    Digest, Sha3_256, Sha3_512, Shake128, Shake256,
    digest::{ExtendableOutput, Update, XofReader},
};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Two consecutive 32-byte halves of a 64-byte hash output.
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub(crate) struct Sym2(pub [u8; SYMBYTES], pub [u8; SYMBYTES]);

/// H(input) = SHA3-256(input) -> 32 bytes.
#[inline]
pub(crate) fn hash_h(input: impl AsRef<[u8]>) -> [u8; 32] {
    Sha3_256::digest(input).into()
}

/// G(input) = SHA3-512(input) -> 64 bytes.
#[inline]
pub(crate) fn hash_g(input: impl AsRef<[u8]>) -> [u8; 64] {
    Sha3_512::digest(input).into()
}

/// `PRF(seed, nonce) = SHAKE-256(seed || nonce)`, squeezed into `output`.
pub(crate) fn prf(seed: &[u8; SYMBYTES], nonce: u8, output: &mut [u8]) {
    let mut buf = [0; SYMBYTES + 1];
    buf[..SYMBYTES].copy_from_slice(seed);
    buf[SYMBYTES] = nonce;
    Shake256::digest_xof(buf, output);
}

/// Kyber matrix XOF: SHAKE-128 absorbing `seed || x || y`.
#[must_use]
pub(crate) fn xof_absorb(seed: &[u8; SYMBYTES], x: u8, y: u8) -> impl XofReader {
    let mut buf = [0; SYMBYTES + 2];
    buf[..SYMBYTES].copy_from_slice(seed);
    buf[SYMBYTES..].copy_from_slice(&[x, y]);
    Shake128::default().chain(buf).finalize_xof()
}

/// Kyber KDF: SHAKE-256(key || hash) -> 32 bytes.
pub(crate) fn kdf(key: &[u8; SYMBYTES], hash: &[u8; SYMBYTES]) -> [u8; SYMBYTES] {
    let mut out = [0u8; SYMBYTES];
    shake256(&[key, hash], &mut out);
    out
}

/// SHAKE-256 over the concatenation of `inputs`, squeezed into `out`.
pub(crate) fn shake256(inputs: &[&[u8]], out: &mut [u8]) {
    let mut h = Shake256::default();
    for input in inputs {
        h.update(input);
    }
    h.finalize_xof().read(out);
}

/// SHAKE-256 reader over a single input.
#[must_use]
pub(crate) fn xof256(input: &[u8]) -> impl XofReader {
    Shake256::default().chain(input).finalize_xof()
}

/// Dilithium matrix stream: SHAKE-128 absorbing `seed || nonce_le16`.
#[must_use]
pub(crate) fn stream128(seed: &[u8; 32], nonce: u16) -> impl XofReader {
    Shake128::default()
        .chain(seed)
        .chain(nonce.to_le_bytes())
        .finalize_xof()
}

/// Dilithium secret stream: SHAKE-256 absorbing `seed || nonce_le16`.
#[must_use]
pub(crate) fn stream256(seed: &[u8; 64], nonce: u16) -> impl XofReader {
    Shake256::default()
        .chain(seed)
        .chain(nonce.to_le_bytes())
        .finalize_xof()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha3_256_empty() {
        assert_eq!(
            hex::encode(hash_h(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn shake256_split_input_matches_concatenation() {
        let mut a = [0u8; 48];
        let mut b = [0u8; 48];
        shake256(&[b"abc", b"def"], &mut a);
        shake256(&[b"abcdef"], &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn streams_are_continuous() {
        let seed = [9u8; 32];
        let mut whole = [0u8; 336];
        stream128(&seed, 0x0102).read(&mut whole);
        let mut reader = stream128(&seed, 0x0102);
        let mut first = [0u8; 168];
        let mut second = [0u8; 168];
        reader.read(&mut first);
        reader.read(&mut second);
        assert_eq!(&whole[..168], &first);
        assert_eq!(&whole[168..], &second);
    }

    #[test]
    fn prf_is_shake256_with_nonce_suffix() {
        let seed = [3u8; SYMBYTES];
        let mut a = [0u8; 64];
        let mut b = [0u8; 64];
        prf(&seed, 7, &mut a);
        shake256(&[&seed, &[7]], &mut b);
        assert_eq!(a, b);
    }
}
