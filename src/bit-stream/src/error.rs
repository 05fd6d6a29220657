use thiserror::Error;

/// Errors reported by the checked `try_` operations of
/// [`BitWriter`](crate::BitWriter) and [`BitReader`](crate::BitReader).
///
/// Sizes are given in bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A fixed-width field was requested with more than 64 bits.
    #[error("invalid field width of {0} bits")]
    InvalidWidth(u32),

    /// The encoded value does not fit into the rest of the buffer.
    #[error("buffer capacity overflow: {required} bits required, {available} available")]
    CapacityOverflow { required: u64, available: u64 },

    /// The code extends past the end of the buffer.
    #[error("attempted to read out of bounds: {required} bits required, {available} available")]
    OutOfBounds { required: u64, available: u64 },

    /// The data cannot have been produced by a [`BitWriter`](crate::BitWriter).
    #[error("malformed code: {0}")]
    Malformed(&'static str),
}
