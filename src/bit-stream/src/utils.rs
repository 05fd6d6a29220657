//! Sizing helpers for bit and byte counts.
//!
//! Buffers handed to a [`BitWriter`](crate::BitWriter) must be
//! large enough for everything written to them. These functions
//! compute the sizes involved.

use bit_stream_utils::align;

/// Gets the minimum number of bits required to represent `value`
/// in unsigned binary.
///
/// Zero still occupies a single bit.
///
/// ```
/// # use bit_stream::utils::bits;
/// assert_eq!(bits(0), 1);
/// assert_eq!(bits(5), 3);
/// assert_eq!(bits(u64::MAX), 64);
/// ```
#[inline]
pub const fn bits(value: u64) -> u32 {
    u64::BITS - (value | 1).leading_zeros()
}

/// Gets the minimum number of bytes required to hold `value`.
///
/// This is the buffer size for a single fixed-width field of
/// [`bits`]`(value)` bits written at a byte boundary. The result is
/// returned as a buffer length, ready for allocating the buffer.
///
/// ```
/// # use bit_stream::utils::bytes;
/// assert_eq!(bytes(255), 1);
/// assert_eq!(bytes(256), 2);
/// ```
#[inline]
pub const fn bytes(value: u64) -> usize {
    align::bytes_spanned(bits(value) as usize)
}

/// Gets the number of bytes needed to store a stream of
/// `nbits` bits.
///
/// Like [`bytes`], an empty stream is reported as one byte.
#[inline]
pub const fn bytes_for_bits(nbits: usize) -> usize {
    if nbits == 0 {
        1
    } else {
        align::bytes_spanned(nbits)
    }
}

// Mask for the low `width` bits of a word, `width` must be in 1..=64.
#[inline(always)]
pub(crate) const fn low_mask(width: u32) -> u64 {
    u64::MAX >> (u64::BITS - width)
}

// Number of bits following the implicit leading one of `value + 1`.
//
// `u64::MAX + 1` needs 65 bits, which leaves a 64 bit suffix.
#[inline(always)]
pub(crate) const fn suffix_len(value: u64) -> u32 {
    match value.checked_add(1) {
        Some(x) => bits(x) - 1,
        None => u64::BITS,
    }
}

// Restores `value` from the `len`-bit suffix of `value + 1`.
//
// Yields `None` when the result does not fit in 64 bits.
#[inline(always)]
pub(crate) fn from_suffix(len: u32, suffix: u64) -> Option<u64> {
    debug_assert!(len <= u64::BITS);
    u64::try_from(((1u128 << len) | suffix as u128) - 1).ok()
}
