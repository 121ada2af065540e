//! MSB-first fixed-width bit window reader.

/// Mask covering the low `width` bits. `width` may be 64.
#[inline]
pub(crate) fn low_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Yields consecutive `width`-bit unsigned values from a byte slice.
///
/// Bits are read most significant first, straddling byte boundaries as
/// needed. Iteration stops as soon as fewer than `width` bits remain; the
/// trailing partial window is dropped rather than padded.
///
/// # Example
///
/// ```
/// use word_d::BitReader;
///
/// let values: Vec<u64> = BitReader::new(&[0b1011_0100], 3).collect();
/// assert_eq!(values, vec![0b101, 0b101]);
/// ```
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    width: u32,
    // Holds at most width + 7 valid bits, so 128 bits covers width = 64
    buffer: u128,
    bits_in_buffer: u32,
}

impl<'a> BitReader<'a> {
    /// Creates a reader producing `width`-bit values.
    ///
    /// # Panics
    ///
    /// Panics if `width` is not in `1..=64`.
    pub fn new(data: &'a [u8], width: u32) -> Self {
        assert!(
            (1..=64).contains(&width),
            "bit width must be between 1 and 64, got {}",
            width
        );
        Self {
            data,
            width,
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// The window width in bits.
    pub fn width(&self) -> u32 {
        self.width
    }
}

impl Iterator for BitReader<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        while self.bits_in_buffer < self.width {
            let (&byte, rest) = self.data.split_first()?;
            self.data = rest;
            self.buffer = (self.buffer << 8) | u128::from(byte);
            self.bits_in_buffer += 8;
        }

        self.bits_in_buffer -= self.width;
        let value = (self.buffer >> self.bits_in_buffer) as u64 & low_mask(self.width);
        // Keep only the unread low bits
        self.buffer &= (1u128 << self.bits_in_buffer) - 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let available = self.data.len() * 8 + self.bits_in_buffer as usize;
        let remaining = available / self.width as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

impl std::iter::FusedIterator for BitReader<'_> {}
