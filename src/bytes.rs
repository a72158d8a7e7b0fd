//! Fixed-size byte storage shared by every key, ciphertext and signature
//! type, and the macro that gives those types their common surface.

use zeroize::Zeroize;

use crate::Error;

/// Fixed-size byte buffer usable as a key, ciphertext or signature backing
/// store.
pub trait ByteArray:
    AsRef<[u8]> + AsMut<[u8]> + Clone + core::fmt::Debug + Zeroize + Send + Sync + 'static {
    /// Array length in bytes.
    const LEN: usize;

    /// Return a zero-filled instance.
    fn zeroed() -> Self;
}

impl<const SIZE: usize> ByteArray for [u8; SIZE] {
    const LEN: usize = SIZE;

    #[inline]
    fn zeroed() -> Self {
        [0u8; SIZE]
    }
}

/// Copy `src` into a fresh array, failing unless the lengths match.
pub(crate) fn array_from_slice<A: ByteArray>(src: &[u8], what: &'static str) -> Result<A, Error> {
    if src.len() != A::LEN {
        tracing::debug!(what, expected = A::LEN, actual = src.len(), "rejecting wrong-length input");
        return Err(Error::InvalidLength {
            expected: A::LEN,
            actual: src.len(),
        });
    }
    let mut bytes = A::zeroed();
    bytes.as_mut().copy_from_slice(src);
    Ok(bytes)
}

/// Implement the shared surface of a byte-array newtype `$name<P>` whose
/// storage is `P::$arr`. Public values print their length; secret values
/// are redacted and zeroized on drop.
macro_rules! byte_newtype {
    (@common $name:ident, $params:ident, $arr:ident, $what:literal) => {
        impl<P: $params> $name<P> {
            /// Wrap an existing byte array.
            #[inline]
            pub fn from_bytes(bytes: P::$arr) -> Self {
                Self { bytes }
            }

            /// View as a byte slice.
            #[inline]
            pub fn as_bytes(&self) -> &[u8] {
                self.bytes.as_ref()
            }
        }

        impl<P: $params> AsRef<[u8]> for $name<P> {
            #[inline]
            fn as_ref(&self) -> &[u8] {
                self.bytes.as_ref()
            }
        }

        impl<P: $params> Clone for $name<P> {
            fn clone(&self) -> Self {
                Self {
                    bytes: self.bytes.clone(),
                }
            }
        }

        impl<P: $params> TryFrom<&[u8]> for $name<P> {
            type Error = $crate::Error;

            fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
                $crate::bytes::array_from_slice(value, $what).map(Self::from_bytes)
            }
        }
    };
    (public $name:ident, $params:ident, $arr:ident, $what:literal) => {
        $crate::bytes::byte_newtype!(@common $name, $params, $arr, $what);

        impl<P: $params> $name<P> {
            /// Consume the wrapper and return the inner byte array.
            #[inline]
            pub fn into_bytes(self) -> P::$arr {
                self.bytes
            }
        }

        impl<P: $params> PartialEq for $name<P> {
            fn eq(&self, other: &Self) -> bool {
                self.bytes.as_ref() == other.bytes.as_ref()
            }
        }

        impl<P: $params> Eq for $name<P> {}

        impl<P: $params> core::fmt::Debug for $name<P> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("len", &self.bytes.as_ref().len())
                    .finish_non_exhaustive()
            }
        }
    };
    (secret $name:ident, $params:ident, $arr:ident, $what:literal) => {
        $crate::bytes::byte_newtype!(@common $name, $params, $arr, $what);

        impl<P: $params> zeroize::Zeroize for $name<P> {
            fn zeroize(&mut self) {
                zeroize::Zeroize::zeroize(&mut self.bytes);
            }
        }

        impl<P: $params> Drop for $name<P> {
            fn drop(&mut self) {
                zeroize::Zeroize::zeroize(self);
            }
        }

        impl<P: $params> zeroize::ZeroizeOnDrop for $name<P> {}

        impl<P: $params> core::fmt::Debug for $name<P> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(concat!(stringify!($name), "([REDACTED])"))
            }
        }
    };
}

pub(crate) use byte_newtype;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_length_is_copied() {
        let a: [u8; 4] = array_from_slice(&[1, 2, 3, 4], "test").expect("exact length");
        assert_eq!(a, [1, 2, 3, 4]);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = array_from_slice::<[u8; 4]>(&[1, 2, 3], "test").unwrap_err();
        assert_eq!(err, Error::InvalidLength { expected: 4, actual: 3 });
    }
}
