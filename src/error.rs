//! Option parsing errors

use core::fmt::{self, Display};

/// A DMA option could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseOptionError {
    /// Nothing to parse
    Empty,
    /// Neither an index in `0..=255` nor `none`
    Invalid,
}

impl Display for ParseOptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseOptionError::Empty => f.write_str("empty DMA option"),
            ParseOptionError::Invalid => f.write_str("DMA option is not an index or NONE"),
        }
    }
}
