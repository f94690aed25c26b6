//! DMA options and where they come from
//!
//! Several physical channels may serve the same peripheral or timer channel.
//! A [`DmaOption`] picks one of them. Options are board configuration: they're
//! persisted per pin and handed to the resolvers through an
//! [`OptionProvider`].

use core::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::error::ParseOptionError;

/// Selects one of the DMA channels wired to a peripheral or timer channel
///
/// Any value can be represented. The resolvers reject values outside of
/// their option range, so an out-of-range option behaves like "no DMA."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmaOption(i16);

impl DmaOption {
    /// No DMA binding requested
    pub const UNUSED: DmaOption = DmaOption(-1);

    /// Wrap a raw option.
    pub const fn new(raw: i16) -> Self {
        DmaOption(raw)
    }
    /// Returns the raw option value
    pub const fn raw(self) -> i16 {
        self.0
    }
    /// Returns `true` if this is [`UNUSED`](DmaOption::UNUSED)
    pub const fn is_unused(self) -> bool {
        self.0 == Self::UNUSED.0
    }
    /// Returns the option as an index, if it's within `[0, options)`.
    pub const fn index(self, options: usize) -> Option<usize> {
        if self.0 >= 0 && (self.0 as usize) < options {
            Some(self.0 as usize)
        } else {
            None
        }
    }
    /// The option that selects `index`.
    ///
    /// Indexes are bounded by small option tables, so they always fit.
    pub(crate) const fn from_index(index: usize) -> Self {
        DmaOption(index as i16)
    }
}

impl From<u8> for DmaOption {
    fn from(index: u8) -> Self {
        DmaOption(index as i16)
    }
}

impl Display for DmaOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            f.write_str("NONE")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for DmaOption {
    type Err = ParseOptionError;

    /// Parse an option as a configuration CLI writes it: a decimal index,
    /// or `none` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseOptionError::Empty);
        }
        if s.eq_ignore_ascii_case("none") {
            return Ok(DmaOption::UNUSED);
        }
        s.parse::<u8>()
            .map(DmaOption::from)
            .map_err(|_| ParseOptionError::Invalid)
    }
}

/// A pin identity
///
/// Encodes `(port + 1) << 4 | pin`, with port A as zero. The zero tag names
/// no pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IoTag(u8);

impl IoTag {
    /// No pin.
    pub const NONE: IoTag = IoTag(0);

    /// The tag for `pin` on `port`, where port A is 0.
    ///
    /// Only the low four bits of `pin` are kept.
    ///
    /// # Panics
    ///
    /// Panics if `port` is 15 or greater, since the tag has room for
    /// ports A through O.
    pub const fn new(port: u8, pin: u8) -> Self {
        assert!(port < 15, "IO port out of range");
        IoTag(((port + 1) << 4) | (pin & 0x0F))
    }
    /// Returns the raw tag
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Supplies the DMA option configured for a pin
///
/// Implemented by the configuration store. Returns
/// [`DmaOption::UNUSED`] when the pin has no DMA binding; that's an
/// answer, not an error.
pub trait OptionProvider {
    /// Returns the DMA option configured for `tag`.
    fn dma_option(&self, tag: IoTag) -> DmaOption;
}

/// Use when timer pin configuration isn't part of the build
///
/// Every pin reports [`DmaOption::UNUSED`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTimerConfig;

impl OptionProvider for NoTimerConfig {
    fn dma_option(&self, _: IoTag) -> DmaOption {
        DmaOption::UNUSED
    }
}

/// One persisted timer pin configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerIoConfig {
    /// The pin
    pub tag: IoTag,
    /// Which timer output drives the pin, when more than one could
    pub index: u8,
    /// The pin's DMA option
    pub dma_option: DmaOption,
}

impl TimerIoConfig {
    /// An unused configuration slot.
    pub const EMPTY: TimerIoConfig = TimerIoConfig {
        tag: IoTag::NONE,
        index: 0,
        dma_option: DmaOption::UNUSED,
    };
}

/// The first configuration that names the pin wins.
impl OptionProvider for [TimerIoConfig] {
    fn dma_option(&self, tag: IoTag) -> DmaOption {
        self.iter()
            .find(|config| config.tag == tag)
            .map_or(DmaOption::UNUSED, |config| config.dma_option)
    }
}

impl<const N: usize> OptionProvider for [TimerIoConfig; N] {
    fn dma_option(&self, tag: IoTag) -> DmaOption {
        self[..].dma_option(tag)
    }
}
