//! Arithmetic on bit offsets and their byte alignment.
//!
//! Bit offsets count from the MSB of the first byte in a buffer.

/// Rounds `value` down to a multiple of `align`.
///
/// # Panics
///
/// Panics in debug mode when `align` is not a power of two.
#[inline(always)]
pub const fn align_down(value: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    value & !(align - 1)
}

/// Rounds `value` up to a multiple of `align`.
///
/// # Panics
///
/// Panics in debug mode when `align` is not a power of two.
#[inline(always)]
pub const fn align_up(value: usize, align: usize) -> usize {
    align_down(value + align - 1, align)
}

/// Gets the index of the byte which holds `bit`.
#[inline(always)]
pub const fn byte_index(bit: usize) -> usize {
    bit >> 3
}

/// Gets the offset of `bit` inside its byte, counted from the MSB.
#[inline(always)]
pub const fn bit_in_byte(bit: usize) -> u32 {
    (bit & 7) as u32
}

/// Counts the bytes touched by the first `nbits` bits of a buffer.
#[inline(always)]
pub const fn bytes_spanned(nbits: usize) -> usize {
    align_up(nbits, 8) >> 3
}
