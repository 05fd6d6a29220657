//! Provides bit-level integer codes over caller-owned buffers.
//!
//! Compressed integer lists, such as the posting lists of an
//! inverted index, are stored as tightly packed bit sequences.
//! This crate supplies the cursors which produce and consume
//! them: a [`BitWriter`] appends encoded values to a mutable
//! byte slice and a [`BitReader`] decodes them again in the
//! same order.
//!
//! # Codes
//!
//! - fixed-width fields of 0 to 64 bits
//! - unary codes, `n` zero bits terminated by a one bit
//! - Elias-gamma and Elias-delta codes of `n + 1`
//! - byte-aligned variable-length ("vbyte") codes
//!
//! All bits are laid out MSB first within each byte. Which code
//! is used for which field is up to the caller; [`Codec`] can be
//! used to keep that choice as data.
//!
//! # Safety and bounds
//!
//! The plain operations trust the caller to size the buffer
//! appropriately, see [`utils::bits`] and [`utils::bytes`]. Going
//! past the end of the buffer panics. Every operation also comes
//! in a `try_` flavor which validates the stream first and
//! reports an [`Error`] instead.
//!
//! # Implementation
//!
//! Fields that fit into a single 64-bit word are transferred
//! with one unaligned big endian load or store when at least 8
//! bytes of buffer are left. Close to the end of the buffer, a
//! bytewise slow path takes over.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod codec;
pub use codec::Codec;

mod error;
pub use error::Error;

mod reader;
pub use reader::BitReader;

mod writer;
pub use writer::BitWriter;

pub mod utils;
