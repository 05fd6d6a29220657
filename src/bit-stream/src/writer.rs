use bit_stream_utils::{
    align::{self, bit_in_byte, byte_index},
    hints::cold_path,
};
use byteorder::{BigEndian, ByteOrder};

use crate::{
    utils::{low_mask, suffix_len},
    Codec, Error,
};

// We transfer whole words at a time when the buffer permits.
const WORD_BYTES: usize = (u64::BITS >> 3) as usize;

// Unary prefix and suffix of an Elias-gamma code are fused into
// a single field write up to this suffix length.
const FUSED_GAMMA_SUFFIX: u32 = (u64::BITS >> 1) - 1;

/// A cursor which serializes integer codes into a borrowed buffer.
///
/// Individual bit writing starts at the MSB of the byte, working
/// towards the LSB.
///
/// Only the bits covered by a write are modified; all other bits of
/// a partially written byte keep their previous value.
#[derive(Debug)]
pub struct BitWriter<'a> {
    // The buffer data is being written to.
    buf: &'a mut [u8],

    // Absolute bit offset of the next write.
    pos: usize,
}

impl<'a> BitWriter<'a> {
    /// Creates a [`BitWriter`] which starts at the beginning of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self::with_offset(buf, 0)
    }

    /// Creates a [`BitWriter`] which starts `bit_offset` bits into `buf`.
    pub fn with_offset(buf: &'a mut [u8], bit_offset: usize) -> Self {
        Self {
            buf,
            pos: bit_offset,
        }
    }

    /// Gets the current bit offset of the cursor.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Gets the total size of the buffer in bits.
    #[inline]
    pub fn capacity_bits(&self) -> usize {
        self.buf.len() << 3
    }

    /// Gets the number of bits that can still be written.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.capacity_bits().saturating_sub(self.pos)
    }

    /// Gets the number of bytes touched by the written bits so far.
    #[inline]
    pub fn written_bytes(&self) -> usize {
        align::bytes_spanned(self.pos)
    }

    /// Whether the cursor currently sits at a byte boundary.
    #[inline]
    pub fn is_byte_aligned(&self) -> bool {
        bit_in_byte(self.pos) == 0
    }

    /// Gets a view of the buffer up to the last touched byte.
    #[inline]
    pub fn view(&self) -> &[u8] {
        &self.buf[..self.written_bytes()]
    }

    /// Consumes the [`BitWriter`] and returns the borrowed buffer.
    #[inline]
    pub fn into_inner(self) -> &'a mut [u8] {
        self.buf
    }

    #[inline(always)]
    fn can_write_in_fast_path(&self, idx: usize) -> bool {
        idx + WORD_BYTES <= self.buf.len()
    }

    #[inline(always)]
    fn write_word(&mut self, idx: usize, shift: u32, value: u64, width: u32) {
        let word = &mut self.buf[idx..idx + WORD_BYTES];

        // Position of the field's LSB inside the big endian word.
        let lsb = u64::BITS - shift - width;
        let mask = low_mask(width) << lsb;

        let old = BigEndian::read_u64(word);
        BigEndian::write_u64(word, (old & !mask) | ((value << lsb) & mask));
    }

    fn write_slow(&mut self, value: u64, width: u32) {
        let mut pos = self.pos;
        let mut left = width;

        while left > 0 {
            let free = u8::BITS - bit_in_byte(pos);
            let nbits = free.min(left);

            let chunk = ((value >> (left - nbits)) & low_mask(nbits)) as u8;
            let shift = free - nbits;
            let mask = (low_mask(nbits) as u8) << shift;

            let byte = &mut self.buf[byte_index(pos)];
            *byte = (*byte & !mask) | (chunk << shift);

            pos += nbits as usize;
            left -= nbits;
        }
    }

    /// Writes the low `width` bits of `value` as a fixed-width field.
    ///
    /// A `width` of 0 writes nothing.
    ///
    /// # Panics
    ///
    /// Panics when the field extends past the end of the buffer, and
    /// in debug mode when `width` exceeds 64.
    #[inline]
    pub fn write(&mut self, value: u64, width: u32) {
        debug_assert!(width <= u64::BITS);
        if width == 0 {
            return;
        }

        let idx = byte_index(self.pos);
        let shift = bit_in_byte(self.pos);

        if shift + width <= u64::BITS && self.can_write_in_fast_path(idx) {
            self.write_word(idx, shift, value, width);
        } else {
            cold_path();
            self.write_slow(value, width);
        }

        self.pos += width as usize;
    }

    /// Writes `value` in unary code, as `value` zero bits followed by
    /// a one bit.
    pub fn write_unary(&mut self, value: u64) {
        let mut zeros = value;
        while zeros >= u64::BITS as u64 {
            self.write(0, u64::BITS);
            zeros -= u64::BITS as u64;
        }

        // The terminating one bit is the LSB of the final field.
        self.write(1, zeros as u32 + 1);
    }

    /// Writes `value + 1` in Elias-gamma code.
    pub fn write_elias_gamma(&mut self, value: u64) {
        let len = suffix_len(value);
        let x = value.wrapping_add(1);

        if len <= FUSED_GAMMA_SUFFIX {
            // `len` leading zeros, the implicit one bit and the suffix
            // are exactly `x` in a `2 * len + 1` bit field.
            self.write(x, 2 * len + 1);
        } else {
            self.write_unary(len as u64);
            self.write(x, len);
        }
    }

    /// Writes `value + 1` in Elias-delta code.
    pub fn write_elias_delta(&mut self, value: u64) {
        let len = suffix_len(value);

        self.write_elias_gamma(len as u64);
        self.write(value.wrapping_add(1), len);
    }

    /// Writes `value` as a vbyte code.
    ///
    /// The cursor is realigned to the next byte boundary first.
    pub fn write_vbyte(&mut self, value: u64) {
        self.realign_to_byte();

        let mut value = value;
        while value >= 0x80 {
            self.push_byte(value as u8 | 0x80);
            value >>= 7;
        }
        self.push_byte(value as u8);
    }

    #[inline(always)]
    fn push_byte(&mut self, byte: u8) {
        debug_assert!(self.is_byte_aligned());
        self.buf[byte_index(self.pos)] = byte;
        self.pos += u8::BITS as usize;
    }

    /// Writes `value` with the given [`Codec`].
    pub fn write_with(&mut self, codec: Codec, value: u64) {
        log::trace!("Writing {value} as {codec:?} at bit {}", self.pos);

        match codec {
            Codec::Fixed(width) => self.write(value, width),
            Codec::Unary => self.write_unary(value),
            Codec::EliasGamma => self.write_elias_gamma(value),
            Codec::EliasDelta => self.write_elias_delta(value),
            Codec::VByte => self.write_vbyte(value),
        }
    }

    /// Advances to the next byte boundary, zeroing the skipped bits.
    ///
    /// Does nothing when the cursor is already aligned.
    pub fn realign_to_byte(&mut self) {
        let pad = align::align_up(self.pos, 8) - self.pos;
        self.write(0, pad as u32);
    }

    fn reserve(&self, codec: Codec, value: u64) -> Result<(), Error> {
        if let Codec::Fixed(width) = codec {
            if width > u64::BITS {
                log::debug!("Rejecting {width}-bit field at bit {}", self.pos);
                return Err(Error::InvalidWidth(width));
            }
        }

        let required = codec.encoded_bits(value, self.pos);
        let available = self.remaining_bits() as u64;
        if required <= available {
            Ok(())
        } else {
            log::debug!(
                "Rejecting write of {value} as {codec:?} at bit {}: {required} bits required, {available} available",
                self.pos
            );
            Err(Error::CapacityOverflow {
                required,
                available,
            })
        }
    }

    /// Checked version of [`Self::write`].
    ///
    /// Fails without modifying anything when `width` exceeds 64 or the
    /// field does not fit into the buffer.
    pub fn try_write(&mut self, value: u64, width: u32) -> Result<(), Error> {
        self.reserve(Codec::Fixed(width), value)?;
        self.write(value, width);
        Ok(())
    }

    /// Checked version of [`Self::write_unary`].
    pub fn try_write_unary(&mut self, value: u64) -> Result<(), Error> {
        self.reserve(Codec::Unary, value)?;
        self.write_unary(value);
        Ok(())
    }

    /// Checked version of [`Self::write_elias_gamma`].
    pub fn try_write_elias_gamma(&mut self, value: u64) -> Result<(), Error> {
        self.reserve(Codec::EliasGamma, value)?;
        self.write_elias_gamma(value);
        Ok(())
    }

    /// Checked version of [`Self::write_elias_delta`].
    pub fn try_write_elias_delta(&mut self, value: u64) -> Result<(), Error> {
        self.reserve(Codec::EliasDelta, value)?;
        self.write_elias_delta(value);
        Ok(())
    }

    /// Checked version of [`Self::write_vbyte`].
    ///
    /// The alignment padding counts towards the required space.
    pub fn try_write_vbyte(&mut self, value: u64) -> Result<(), Error> {
        self.reserve(Codec::VByte, value)?;
        self.write_vbyte(value);
        Ok(())
    }

    /// Checked version of [`Self::write_with`].
    pub fn try_write_with(&mut self, codec: Codec, value: u64) -> Result<(), Error> {
        self.reserve(codec, value)?;
        self.write_with(codec, value);
        Ok(())
    }
}
