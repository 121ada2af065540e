//! MSB-first packer, the inverse of [`BitReader`](super::bit_reader::BitReader).

use super::bit_reader::low_mask;

/// Packs fixed-width values back into bytes, most significant bit first.
#[derive(Debug)]
pub(crate) struct BitWriter {
    bytes: Vec<u8>,
    width: u32,
    buffer: u128,
    bits_in_buffer: u32,
}

impl BitWriter {
    pub(crate) fn new(width: u32) -> Self {
        debug_assert!((1..=64).contains(&width));
        Self {
            bytes: Vec::new(),
            width,
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    pub(crate) fn with_capacity(width: u32, values: usize) -> Self {
        let mut writer = Self::new(width);
        writer.bytes.reserve(values * width as usize / 8);
        writer
    }

    /// Appends the low `width` bits of `value`.
    pub(crate) fn write(&mut self, value: u64) {
        self.buffer = (self.buffer << self.width) | u128::from(value & low_mask(self.width));
        self.bits_in_buffer += self.width;

        while self.bits_in_buffer >= 8 {
            self.bits_in_buffer -= 8;
            self.bytes.push((self.buffer >> self.bits_in_buffer) as u8);
        }
        self.buffer &= (1u128 << self.bits_in_buffer) - 1;
    }

    /// Returns the whole bytes written. A trailing partial byte is dropped:
    /// it can only hold bits the reader never produced.
    pub(crate) fn finish(self) -> Vec<u8> {
        self.bytes
    }
}
