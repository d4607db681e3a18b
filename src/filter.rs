//! Text filters over the run-length codec.
//!
//! A filter either reduces its input to a scalar or transforms it into an
//! equivalent representation; [`TextFilter::classify`] tells the caller
//! which, without running the filter. Input and output types are fixed
//! per implementation through associated types.

use std::convert::Infallible;

use crate::error::DecodeError;
use crate::{derle, rle};

/// How a filter's output relates to its input.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Classification {
    /// Reduces the input to a scalar summary.
    Reducer,
    /// Rewrites the input into an equivalent representation.
    Transformer,
}

pub trait TextFilter {
    type Input: ?Sized;
    type Output;
    type Error;

    fn classify(&self) -> Classification;

    fn apply(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// Counts the characters of the input that belong to a fixed set.
pub struct CharCounter {
    chars: Vec<char>,
}

impl CharCounter {
    pub fn new(chars: &str) -> CharCounter {
        CharCounter {
            chars: chars.chars().collect(),
        }
    }
}

impl TextFilter for CharCounter {
    type Input = str;
    type Output = usize;
    type Error = Infallible;

    fn classify(&self) -> Classification {
        Classification::Reducer
    }

    fn apply(&self, input: &str) -> Result<usize, Infallible> {
        Ok(input.chars().filter(|c| self.chars.contains(c)).count())
    }
}

/// Run-length encodes the UTF-8 bytes of the input text.
pub struct RunLengthEncoder;

impl TextFilter for RunLengthEncoder {
    type Input = str;
    type Output = Vec<u8>;
    type Error = Infallible;

    fn classify(&self) -> Classification {
        Classification::Transformer
    }

    fn apply(&self, input: &str) -> Result<Vec<u8>, Infallible> {
        Ok(rle::encode(input.as_bytes()))
    }
}

/// Decodes a run-length stream back into text.
pub struct RunLengthDecoder;

impl TextFilter for RunLengthDecoder {
    type Input = [u8];
    type Output = String;
    type Error = DecodeError;

    fn classify(&self) -> Classification {
        Classification::Transformer
    }

    fn apply(&self, input: &[u8]) -> Result<String, DecodeError> {
        let bytes = derle::decode(input)?;
        Ok(String::from_utf8(bytes)?)
    }
}
