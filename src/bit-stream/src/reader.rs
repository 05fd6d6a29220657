use bit_stream_utils::{
    align::{self, bit_in_byte, byte_index},
    hints::cold_path,
};
use byteorder::{BigEndian, ByteOrder};

use crate::{
    utils::{from_suffix, low_mask},
    Codec, Error,
};

// We fetch whole words at a time when the buffer permits.
const WORD_BYTES: usize = (u64::BITS >> 3) as usize;

// A vbyte code for a 64-bit value spans at most this many bytes.
const MAX_VBYTE_LEN: u32 = (u64::BITS + 6) / 7;

/// A cursor which deserializes integer codes from a borrowed buffer.
///
/// Individual bit reading starts at the MSB of the byte, working
/// towards the LSB.
///
/// Reads must mirror the sequence of writes that produced the
/// buffer, code by code. The reader has no way of telling apart
/// fields that were written with a different [`Codec`].
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    // The spanned byte view.
    data: &'a [u8],

    // Absolute bit offset of the next read.
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new [`BitReader`] over a given byte slice.
    pub const fn new(data: &'a [u8]) -> Self {
        Self::with_offset(data, 0)
    }

    /// Creates a new [`BitReader`] which starts `bit_offset` bits into
    /// the given byte slice.
    pub const fn with_offset(data: &'a [u8], bit_offset: usize) -> Self {
        Self {
            data,
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
        self.data.len() << 3
    }

    /// Gets the total number of remaining bits in the reader.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.capacity_bits().saturating_sub(self.pos)
    }

    /// Whether the cursor currently sits at a byte boundary.
    #[inline]
    pub fn is_byte_aligned(&self) -> bool {
        bit_in_byte(self.pos) == 0
    }

    /// Skips the remaining bits of a partially consumed byte.
    #[inline]
    pub fn realign_to_byte(&mut self) {
        self.pos = align::align_up(self.pos, 8);
    }

    /// Skips `count` bits without decoding them.
    #[inline]
    pub fn skip(&mut self, count: usize) {
        self.pos += count;
    }

    #[inline(always)]
    fn can_read_in_fast_path(&self, idx: usize) -> bool {
        idx + WORD_BYTES <= self.data.len()
    }

    #[inline(always)]
    fn load_word(&self, idx: usize) -> u64 {
        BigEndian::read_u64(&self.data[idx..idx + WORD_BYTES])
    }

    fn read_slow(&self, width: u32) -> u64 {
        let mut pos = self.pos;
        let mut left = width;
        let mut value = 0;

        while left > 0 {
            let free = u8::BITS - bit_in_byte(pos);
            let nbits = free.min(left);

            let byte = self.data[byte_index(pos)] as u64;
            value = (value << nbits) | ((byte >> (free - nbits)) & low_mask(nbits));

            pos += nbits as usize;
            left -= nbits;
        }

        value
    }

    /// Reads a `width` bits wide fixed-width field.
    ///
    /// A `width` of 0 reads nothing and yields 0.
    ///
    /// # Panics
    ///
    /// Panics when the field extends past the end of the buffer, and
    /// in debug mode when `width` exceeds 64.
    #[inline]
    pub fn read(&mut self, width: u32) -> u64 {
        debug_assert!(width <= u64::BITS);
        if width == 0 {
            return 0;
        }

        let idx = byte_index(self.pos);
        let shift = bit_in_byte(self.pos);

        let value = if shift + width <= u64::BITS && self.can_read_in_fast_path(idx) {
            (self.load_word(idx) << shift) >> (u64::BITS - width)
        } else {
            cold_path();
            self.read_slow(width)
        };

        self.pos += width as usize;
        value
    }

    /// Reads a unary code and returns the number of zero bits before
    /// the terminating one bit.
    pub fn read_unary(&mut self) -> u64 {
        let mut count = 0;

        loop {
            let idx = byte_index(self.pos);
            let shift = bit_in_byte(self.pos);

            let (zeros, span) = if self.can_read_in_fast_path(idx) {
                let word = self.load_word(idx) << shift;
                (word.leading_zeros(), u64::BITS - shift)
            } else {
                cold_path();
                let byte = self.data[idx] << shift;
                (byte.leading_zeros(), u8::BITS - shift)
            };

            if zeros < span {
                self.pos += zeros as usize + 1;
                return count + zeros as u64;
            }

            self.pos += span as usize;
            count += span as u64;
        }
    }

    /// Reads an Elias-gamma code and returns the encoded value minus one.
    pub fn read_elias_gamma(&mut self) -> u64 {
        let len = self.read_unary();
        debug_assert!(len <= u64::BITS as u64);

        let len = len as u32;
        let suffix = self.read(len);
        from_suffix(len, suffix).unwrap_or_default()
    }

    /// Reads an Elias-delta code and returns the encoded value minus one.
    pub fn read_elias_delta(&mut self) -> u64 {
        let len = self.read_elias_gamma();
        debug_assert!(len <= u64::BITS as u64);

        let len = len as u32;
        let suffix = self.read(len);
        from_suffix(len, suffix).unwrap_or_default()
    }

    /// Reads a vbyte code.
    ///
    /// The cursor is realigned to the next byte boundary first.
    pub fn read_vbyte(&mut self) -> u64 {
        self.realign_to_byte();

        let mut value = 0;
        let mut shift = 0u32;
        loop {
            let byte = self.data[byte_index(self.pos)];
            self.pos += u8::BITS as usize;

            value |= ((byte & 0x7F) as u64).wrapping_shl(shift);
            if byte & 0x80 == 0 {
                return value;
            }

            shift += 7;
        }
    }

    /// Reads a value with the given [`Codec`].
    pub fn read_with(&mut self, codec: Codec) -> u64 {
        log::trace!("Reading {codec:?} at bit {}", self.pos);

        match codec {
            Codec::Fixed(width) => self.read(width),
            Codec::Unary => self.read_unary(),
            Codec::EliasGamma => self.read_elias_gamma(),
            Codec::EliasDelta => self.read_elias_delta(),
            Codec::VByte => self.read_vbyte(),
        }
    }

    // Runs a checked read and rewinds the cursor when it fails.
    #[inline]
    fn rewind_on_error<F, T>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        let start = self.pos;

        let res = f(self);
        if let Err(e) = &res {
            log::debug!("Rejecting read at bit {start}: {e}");
            self.pos = start;
        }

        res
    }

    fn ensure(&self, required: u64) -> Result<(), Error> {
        let available = self.remaining_bits() as u64;
        if required <= available {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                required,
                available,
            })
        }
    }

    fn ensure_length_prefix(len: u64) -> Result<u32, Error> {
        if len <= u64::BITS as u64 {
            Ok(len as u32)
        } else {
            Err(Error::Malformed("length prefix exceeds 64 bits"))
        }
    }

    /// Checked version of [`Self::read`].
    pub fn try_read(&mut self, width: u32) -> Result<u64, Error> {
        if width > u64::BITS {
            log::debug!("Rejecting {width}-bit field at bit {}", self.pos);
            return Err(Error::InvalidWidth(width));
        }

        self.rewind_on_error(|r| {
            r.ensure(width as u64)?;
            Ok(r.read(width))
        })
    }

    /// Checked version of [`Self::skip`].
    pub fn try_skip(&mut self, count: usize) -> Result<(), Error> {
        self.rewind_on_error(|r| {
            r.ensure(count as u64)?;
            r.skip(count);
            Ok(())
        })
    }

    /// Checked version of [`Self::read_unary`].
    ///
    /// Fails when no terminating one bit is found before the end of
    /// the buffer.
    pub fn try_read_unary(&mut self) -> Result<u64, Error> {
        self.rewind_on_error(|r| {
            let mut count = 0;

            while r.remaining_bits() > 0 {
                let span = r.remaining_bits().min(u64::BITS as usize) as u32;
                let chunk = r.read(span);

                if chunk != 0 {
                    // The chunk holds `span` bits in its low end.
                    let zeros = chunk.leading_zeros() - (u64::BITS - span);
                    r.pos -= (span - zeros - 1) as usize;
                    return Ok(count + zeros as u64);
                }

                count += span as u64;
            }

            Err(Error::OutOfBounds {
                required: count + 1,
                available: count,
            })
        })
    }

    /// Checked version of [`Self::read_elias_gamma`].
    pub fn try_read_elias_gamma(&mut self) -> Result<u64, Error> {
        self.rewind_on_error(|r| {
            let len = Self::ensure_length_prefix(r.try_read_unary()?)?;
            let suffix = r.try_read(len)?;

            from_suffix(len, suffix).ok_or(Error::Malformed("decoded value overflows 64 bits"))
        })
    }

    /// Checked version of [`Self::read_elias_delta`].
    pub fn try_read_elias_delta(&mut self) -> Result<u64, Error> {
        self.rewind_on_error(|r| {
            let len = Self::ensure_length_prefix(r.try_read_elias_gamma()?)?;
            let suffix = r.try_read(len)?;

            from_suffix(len, suffix).ok_or(Error::Malformed("decoded value overflows 64 bits"))
        })
    }

    /// Checked version of [`Self::read_vbyte`].
    ///
    /// Fails on codes that are longer than 10 bytes or decode to a
    /// value exceeding 64 bits.
    pub fn try_read_vbyte(&mut self) -> Result<u64, Error> {
        self.rewind_on_error(|r| {
            r.realign_to_byte();

            let mut value = 0;
            for group in 0..MAX_VBYTE_LEN {
                let byte = r.try_read(u8::BITS)? as u8;

                let shift = group * 7;
                let payload = (byte & 0x7F) as u64;
                if payload > u64::MAX >> shift {
                    return Err(Error::Malformed("vbyte code overflows 64 bits"));
                }

                value |= payload << shift;
                if byte & 0x80 == 0 {
                    return Ok(value);
                }
            }

            Err(Error::Malformed("vbyte code exceeds 10 bytes"))
        })
    }

    /// Checked version of [`Self::read_with`].
    pub fn try_read_with(&mut self, codec: Codec) -> Result<u64, Error> {
        log::trace!("Reading {codec:?} at bit {}", self.pos);

        match codec {
            Codec::Fixed(width) => self.try_read(width),
            Codec::Unary => self.try_read_unary(),
            Codec::EliasGamma => self.try_read_elias_gamma(),
            Codec::EliasDelta => self.try_read_elias_delta(),
            Codec::VByte => self.try_read_vbyte(),
        }
    }
}
