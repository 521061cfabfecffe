use std::iter::FusedIterator;

use crate::SYMBOLS;

const fn generate_value_lut(symbols: &[u8; 32]) -> [u8; 256] {
    let mut lut = [0u8; 256];
    let mut i = 0u8;
    while i < 32 {
        let c = symbols[i as usize];
        lut[c.to_ascii_lowercase() as usize] = i;
        lut[c.to_ascii_uppercase() as usize] = i;
        i += 1;
    }
    lut
}

// Maps any input byte to its 5-bit value. Non-alphabet bytes map to 0, the
// same value as 'y', so validity cannot be read off the looked-up value;
// membership goes through is_symbol instead.
const VALUE_LUT: [u8; 256] = generate_value_lut(SYMBOLS);

const fn is_symbol(c: u8) -> bool {
    VALUE_LUT[c as usize] != 0 || c == b'y' || c == b'Y'
}

/// Returns true if `input` is an acceptable base32z string: every byte is
/// in the 32-symbol alphabet (either case) and the length is one the
/// encoder can actually produce.
pub fn is_base32z(input: impl AsRef<[u8]>) -> bool {
    is_base32z_const(input.as_ref())
}

#[doc(hidden)]
pub const fn is_base32z_const(input: &[u8]) -> bool {
    // Cheap length check before scanning; see from_base32z_size.
    if matches!(input.len() % 8, 1 | 3 | 6) {
        return false;
    }
    let mut i = 0;
    while i < input.len() {
        if !is_symbol(input[i]) {
            return false;
        }
        i += 1;
    }
    true
}

/// Streaming base32z decoder: pulls symbols from an inner iterator and
/// yields one byte per call to `next`.
///
/// The input must satisfy [`is_base32z`]; the decoder performs no
/// validation of its own and produces unspecified bytes for invalid input.
/// Trailing padding bits (the 0-4 low bits of the final symbol that carry
/// no data) are ignored outright, not required to be zero: `"9999"`,
/// `"9993"`, and `"999z"` all decode to the same bytes as the canonical
/// `"999o"`.
///
/// Each emitted byte consumes at least one input symbol, so when decoding
/// in place the write position never passes the read position.
pub struct Base32zDecoder<I> {
    iter: I,
    buf: u16,
    bits: u8,
}

impl<I: Iterator<Item = u8>> Base32zDecoder<I> {
    pub fn new<T: IntoIterator<IntoIter = I>>(symbols: T) -> Self {
        let mut dec = Base32zDecoder {
            iter: symbols.into_iter(),
            buf: 0,
            bits: 0,
        };
        dec.fill();
        dec
    }

    // Top the accumulator up to at least 8 significant bits, 5 at a time.
    // Leaves fewer than 8 only when the input is exhausted.
    fn fill(&mut self) {
        while self.bits < 8 {
            match self.iter.next() {
                Some(c) => {
                    self.buf = (self.buf << 5) | VALUE_LUT[c as usize] as u16;
                    self.bits += 5;
                }
                None => break,
            }
        }
    }
}

impl<I: Iterator<Item = u8>> Iterator for Base32zDecoder<I> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.bits < 8 {
            // Input exhausted; whatever bits remain are padding.
            return None;
        }
        let byte = (self.buf >> (self.bits - 8)) as u8;
        self.bits -= 8;
        self.buf &= (1 << self.bits) - 1;
        self.fill();
        Some(byte)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let bytes = |n: usize| (self.bits as usize + n * 5) / 8;
        let (lower, upper) = self.iter.size_hint();
        (bytes(lower), upper.map(bytes))
    }
}

impl<I: ExactSizeIterator<Item = u8>> ExactSizeIterator for Base32zDecoder<I> {}

impl<I: FusedIterator<Item = u8>> FusedIterator for Base32zDecoder<I> {}

/// Decodes a base32z string to bytes.
///
/// The input must satisfy [`is_base32z`]; callers holding untrusted data
/// must check it first. Output for invalid input is unspecified (checked
/// only by a debug assertion).
pub fn from_base32z(input: impl AsRef<[u8]>) -> Vec<u8> {
    let input = input.as_ref();
    debug_assert!(is_base32z(input), "from_base32z input failed is_base32z");
    let capacity = crate::from_base32z_size(input.len()).unwrap_or(0);
    let mut out = Vec::with_capacity(capacity);
    out.extend(Base32zDecoder::new(input.iter().copied()));
    out
}

#[doc(hidden)]
pub const fn decode_const<const N: usize>(input: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let mut buf = 0u16;
    let mut bits = 0u8;
    let mut i = 0;
    let mut o = 0;
    while i < input.len() {
        buf = (buf << 5) | VALUE_LUT[input[i] as usize] as u16;
        bits += 5;
        i += 1;
        if bits >= 8 {
            out[o] = (buf >> (bits - 8)) as u8;
            bits -= 8;
            buf &= (1 << bits) - 1;
            o += 1;
        }
    }
    out
}
