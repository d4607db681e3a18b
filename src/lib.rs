//! # RLE Encoding Scheme
//!
//! ```text
//!         XX              literal, one byte emitted as-is
//!         XX XX           literal pair, a run of exactly two
//!         00 NN XX        escaped run, NN repetitions of XX
//!                 ▲
//!        NN in 1..=255
//! ```
//!
//! A run only pays for the 3-byte escape form once it is at least 3 bytes
//! long, so runs of one or two bytes are written back literally.
//!
//! The byte 0x00 is the escape marker and never appears as a literal.
//! Every zero in the input, even a lone one, is written as the escaped
//! run `00 01 00`.
//!
//! Runs are capped at 255 repetitions so the count always fits in the
//! single count byte; longer runs split into multiple escape tokens.
//!
//! The encoding is self-delimiting: the decoder needs no out-of-band
//! length and consumes the stream byte by byte with a three-state
//! machine. A stream that ends inside an escape token is malformed.

#[macro_use]
extern crate log;

mod derle;
mod error;
mod filter;
mod rle;

pub use derle::{decode, DeRle};
pub use error::DecodeError;
pub use filter::{
    CharCounter, Classification, RunLengthDecoder, RunLengthEncoder, TextFilter,
};
pub use rle::{encode, Rle};

/// escape marker introducing a `(marker, count, value)` token
const ESCAPE: u8 = 0x00;
/// longest run a single escape token can describe
const MAX_RUN: u8 = u8::MAX;

/// Encode/decode pairs as (raw hex, encoded hex), exercised in both
/// directions by the `rle` and `derle` test modules.
#[cfg(test)]
pub(crate) const TEST_VECTOR: [(&str, &str); 12] = [
    ("", ""),
    ("41", "41"),
    ("4141", "4141"),
    ("414141", "000341"),
    ("4141414141", "000541"),
    ("00", "000100"),
    ("0000", "000100000100"),
    ("410041", "4100010041"),
    ("4142", "4142"),
    ("414142424242", "4141000442"),
    ("434343004343", "0003430001004343"),
    ("4d61636b20436879736f6e203d3d3d", "4d61636b20436879736f6e2000033d"),
];
