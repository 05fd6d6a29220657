use bit_stream_utils::align;

use crate::utils::{bits, suffix_len};

/// The integer codes supported by [`BitWriter`](crate::BitWriter) and
/// [`BitReader`](crate::BitReader).
///
/// A stream is only decodable when every field is read back with the
/// same [`Codec`] it was written with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Codec {
    /// A fixed-width field of the given number of bits.
    Fixed(u32),
    /// `n` zero bits followed by a one bit.
    Unary,
    /// Elias-gamma code of `n + 1`.
    EliasGamma,
    /// Elias-delta code of `n + 1`.
    EliasDelta,
    /// Byte-aligned groups of 7 bits, least significant first.
    #[cfg_attr(feature = "serde", serde(rename = "vbyte"))]
    VByte,
}

impl Codec {
    /// Gets the fixed-width codec that is just wide enough for all
    /// values up to `max_value`.
    #[inline]
    pub const fn fixed_for(max_value: u64) -> Self {
        Self::Fixed(bits(max_value))
    }

    /// Gets the exact number of bits that writing `value` at bit
    /// offset `at_bit` advances the cursor by.
    ///
    /// The offset only matters for [`Codec::VByte`], which pads to
    /// the next byte boundary first. Unary lengths saturate at
    /// [`u64::MAX`].
    pub const fn encoded_bits(self, value: u64, at_bit: usize) -> u64 {
        match self {
            Self::Fixed(width) => width as u64,
            Self::Unary => value.saturating_add(1),
            Self::EliasGamma => gamma_bits(value),
            Self::EliasDelta => {
                let len = suffix_len(value);
                gamma_bits(len as u64) + len as u64
            }
            Self::VByte => {
                let pad = align::align_up(at_bit, 8) - at_bit;
                let groups = (bits(value) as u64 + 6) / 7;
                pad as u64 + groups * 8
            }
        }
    }

    /// Indicates whether fields of this codec always start and end
    /// at byte boundaries.
    #[inline]
    pub const fn is_byte_aligned(self) -> bool {
        matches!(self, Self::VByte)
    }
}

#[inline]
const fn gamma_bits(value: u64) -> u64 {
    2 * suffix_len(value) as u64 + 1
}
