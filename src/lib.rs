//! base32z: binary ⇄ z-base-32 text codec.
//!
//! z-base-32 is a base32 variant whose alphabet avoids visually ambiguous
//! characters. Encoding always produces lowercase; decoding accepts either
//! case. The format is unpadded: the byte count is implied by the symbol
//! count, and some symbol counts are impossible (see [`from_base32z_size`]).

pub(crate) const SYMBOLS: &[u8; 32] = b"ybndrfg8ejkmcpqxot1uwisza345h769";

mod dec;
mod enc;

pub use crate::dec::{from_base32z, is_base32z, Base32zDecoder};
pub use crate::enc::{to_base32z, Base32zEncoder};

#[doc(hidden)]
pub use crate::dec::{decode_const, is_base32z_const};

/// Number of symbols needed to encode `byte_count` bytes: ⌈bytes · 8 / 5⌉.
pub const fn to_base32z_size(byte_count: usize) -> usize {
    (byte_count * 8 + 4) / 5
}

/// Number of bytes a `symbol_count`-symbol string decodes to, or `None` if
/// no byte sequence encodes to that many symbols.
///
/// A final symbol carrying 5 or more unused bits could never have been
/// emitted by the encoder, so symbol counts of 1, 3, or 6 (mod 8) are
/// rejected.
pub const fn from_base32z_size(symbol_count: usize) -> Option<usize> {
    let bits = symbol_count * 5;
    if bits % 8 < 5 {
        Some(bits / 8)
    } else {
        None
    }
}

#[doc(hidden)]
pub const fn from_base32z_size_unchecked(symbol_count: usize) -> usize {
    symbol_count * 5 / 8
}

/// Decodes a base32z string literal at compile time, expanding to a
/// `&'static [u8; N]`. Invalid literals fail to compile.
///
/// ```
/// use base32z::base32z;
/// assert_eq!(base32z!("pb1sa5dx"), b"hello");
/// ```
#[macro_export]
macro_rules! base32z {
    ($s:expr) => {{
        const INPUT: &[u8] = $s.as_bytes();
        const _: () = assert!($crate::is_base32z_const(INPUT), "invalid base32z literal");
        const OUT: [u8; $crate::from_base32z_size_unchecked(INPUT.len())] =
            $crate::decode_const(INPUT);
        &OUT
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base32z_size() {
        assert_eq!(to_base32z_size(0), 0);
        assert_eq!(to_base32z_size(1), 2);
        assert_eq!(to_base32z_size(2), 4);
        assert_eq!(to_base32z_size(3), 5);
        assert_eq!(to_base32z_size(4), 7);
        assert_eq!(to_base32z_size(5), 8);
        assert_eq!(to_base32z_size(6), 10);
    }

    #[test]
    fn test_from_base32z_size() {
        assert_eq!(from_base32z_size(0), Some(0));
        assert_eq!(from_base32z_size(2), Some(1));
        assert_eq!(from_base32z_size(4), Some(2));
        assert_eq!(from_base32z_size(5), Some(3));
        assert_eq!(from_base32z_size(7), Some(4));
        assert_eq!(from_base32z_size(8), Some(5));
    }

    #[test]
    fn test_from_base32z_size_rejects_impossible_lengths() {
        for k in 0..256 {
            let expected_invalid = matches!(k % 8, 1 | 3 | 6);
            assert_eq!(
                from_base32z_size(k).is_none(),
                expected_invalid,
                "length {}",
                k
            );
        }
    }

    #[test]
    fn test_size_round_trip() {
        for n in 0..1000 {
            assert_eq!(from_base32z_size(to_base32z_size(n)), Some(n));
        }
    }

    #[test]
    fn test_literal_macro() {
        assert_eq!(base32z!("pb1sa5dx"), b"hello");
        assert_eq!(base32z!("yy"), &[0u8]);
        assert_eq!(base32z!("999o"), &[0xFF, 0xFF]);
    }
}
