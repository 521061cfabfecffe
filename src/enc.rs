use std::iter::FusedIterator;

use crate::{to_base32z_size, SYMBOLS};

/// Streaming base32z encoder: pulls bytes from an inner iterator and yields
/// one lowercase ASCII symbol per call to `next`.
///
/// The accumulator register holds the bits already read from the input but
/// not yet emitted; it always has at least 5 significant bits available
/// until the input is exhausted. The final symbol left-shifts any 1-4
/// leftover bits into the high position of its 5-bit group.
///
/// Single-pass and forward-only: re-encoding requires a fresh encoder over
/// the same source.
pub struct Base32zEncoder<I> {
    iter: I,
    buf: u16,
    bits: u8,
}

impl<I: Iterator<Item = u8>> Base32zEncoder<I> {
    pub fn new<T: IntoIterator<IntoIter = I>>(bytes: T) -> Self {
        let mut iter = bytes.into_iter();
        let (buf, bits) = match iter.next() {
            Some(b) => (b as u16, 8),
            None => (0, 0),
        };
        Base32zEncoder { iter, buf, bits }
    }
}

impl<I: Iterator<Item = u8>> Iterator for Base32zEncoder<I> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.bits == 0 {
            return None;
        }
        // Emit the 5 most significant buffered bits, then discard them.
        let value = (self.buf >> (self.bits - 5)) & 0x1F;
        self.bits -= 5;
        self.buf &= (1 << self.bits) - 1;
        if self.bits < 5 {
            if let Some(b) = self.iter.next() {
                self.buf = (self.buf << 8) | b as u16;
                self.bits += 8;
            } else if self.bits > 0 {
                // End of input: shift the remaining bits to the top of one
                // final 5-bit group, e.g. "11" encodes as "11000".
                self.buf <<= 5 - self.bits;
                self.bits = 5;
            }
        }
        Some(SYMBOLS[value as usize])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let symbols = |n: usize| (self.bits as usize + n * 8 + 4) / 5;
        let (lower, upper) = self.iter.size_hint();
        (symbols(lower), upper.map(symbols))
    }
}

impl<I: ExactSizeIterator<Item = u8>> ExactSizeIterator for Base32zEncoder<I> {}

impl<I: FusedIterator<Item = u8>> FusedIterator for Base32zEncoder<I> {}

/// Encodes the input as a lowercase base32z string.
pub fn to_base32z(input: impl AsRef<[u8]>) -> String {
    let input = input.as_ref();
    let mut out = Vec::with_capacity(to_base32z_size(input.len()));
    out.extend(Base32zEncoder::new(input.iter().copied()));
    String::from_utf8(out).expect("base32z symbols are ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty() {
        assert_eq!(to_base32z(b""), "");
    }

    #[test]
    fn test_encode_single_zero_byte() {
        assert_eq!(to_base32z(&[0x00]), "yy");
    }

    #[test]
    fn test_encode_known_vectors() {
        assert_eq!(to_base32z(b"f"), "ca");
        assert_eq!(to_base32z(b"fo"), "c3zo");
        assert_eq!(to_base32z(b"foo"), "c3zs6");
        assert_eq!(to_base32z(b"foob"), "c3zs6ao");
        assert_eq!(to_base32z(b"fooba"), "c3zs6aub");
        assert_eq!(to_base32z(b"foobar"), "c3zs6aubqe");
        assert_eq!(to_base32z(b"hello"), "pb1sa5dx");
        assert_eq!(to_base32z(&[0xF0, 0xBF, 0xC7]), "6n9hq");
        assert_eq!(to_base32z(&[0xD4, 0x7A, 0x04]), "4t7ye");
    }

    #[test]
    fn test_encode_all_ones() {
        // 16 data bits plus 4 padding bits; canonical padding is zero.
        assert_eq!(to_base32z(&[0xFF, 0xFF]), "999o");
    }

    #[test]
    fn test_encode_covers_whole_alphabet() {
        let bytes = [
            0x00, 0x44, 0x32, 0x14, 0xC7, 0x42, 0x54, 0xB6, 0x35, 0xCF, 0x84, 0x65, 0x3A, 0x56,
            0xD7, 0xC6, 0x75, 0xBE, 0x77, 0xDF,
        ];
        assert_eq!(to_base32z(&bytes), "ybndrfg8ejkmcpqxot1uwisza345h769");
    }

    #[test]
    fn test_encode_output_length() {
        for n in 0..100 {
            let src = vec![0xA5u8; n];
            assert_eq!(to_base32z(&src).len(), to_base32z_size(n), "input length {}", n);
        }
    }

    #[test]
    fn test_encoder_size_hint_is_exact() {
        for n in 0..40 {
            let src = vec![0x3Cu8; n];
            let mut enc = Base32zEncoder::new(src.iter().copied());
            let mut remaining = to_base32z_size(n);
            loop {
                assert_eq!(enc.size_hint(), (remaining, Some(remaining)));
                if enc.next().is_none() {
                    break;
                }
                remaining -= 1;
            }
            assert_eq!(remaining, 0);
        }
    }

    #[test]
    fn test_encoder_is_lowercase() {
        let encoded = to_base32z(b"The quick brown fox jumps over the lazy dog");
        assert!(encoded.bytes().all(|c| !c.is_ascii_uppercase()));
        assert!(encoded.bytes().all(|c| SYMBOLS.contains(&c)));
    }
}
