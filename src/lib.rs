//! DMA request and channel resolution for flight controller targets.
//!
//! `dma-reqmap` answers one question during board bring-up: which physical DMA
//! channel, and which hardware request line, serve a peripheral or a timer
//! channel? It doesn't program the DMA controller; it hands back a
//! [`ChannelSpec`] that your DMA driver uses to do that.
//!
//! Chips come in two flavors.
//!
//! - Multiplexed parts (AT32F43x) route any request to any channel. The
//!   [`Remap`] resolver owns a pool of channels. An option selects a pool
//!   slot, and the resolver stamps the request into that slot.
//! - Fixed-wiring parts (STM32F4/F7, STM32F3) wire each request to a few
//!   channels. The [`Fixed`] resolver indexes into a per-request list.
//!
//! Both implement [`DmaResolver`]. The chip family is a build-time choice:
//! the crate features select which [`chip`] module is re-exported as
//! [`target`].
//!
//! | Feature   | Family               |
//! |-----------|----------------------|
//! | (none)    | AT32F43x             |
//! | `stm32f4` | STM32F4, STM32F7     |
//! | `stm32f3` | STM32F3              |
//!
//! # Getting started
//!
//! Create the resolver for your target, then ask it for channels. An
//! option that doesn't exist, or a peripheral without DMA, resolves to
//! `None`.
//!
//! ```
//! use dma_reqmap::{chip::at32f43x, DmaOption, DmaResolver, Peripheral};
//!
//! let mut resolver = at32f43x::resolver();
//!
//! // SPI1 transmit, on the first channel of the pool.
//! let spec = resolver
//!     .channel_spec_by_peripheral(Peripheral::SpiMosi, 0, DmaOption::new(0))
//!     .unwrap();
//! assert_eq!(spec.request(), at32f43x::request::SPI1_TX.raw());
//!
//! // There's no SPI5.
//! assert!(resolver
//!     .channel_spec_by_peripheral(Peripheral::SpiMosi, 4, DmaOption::new(0))
//!     .is_none());
//! ```
//!
//! Timer outputs take their option from the board configuration:
//!
//! ```
//! use dma_reqmap::{
//!     chip::stm32f4, DmaOption, DmaResolver, IoTag, Timer, TimerChannel, TimerHardware,
//!     TimerIoConfig,
//! };
//!
//! let pa8 = IoTag::new(0, 8);
//! let output = TimerHardware::new(pa8, Timer::TIM1, TimerChannel::Ch1);
//! let config = [TimerIoConfig { tag: pa8, index: 0, dma_option: DmaOption::new(1) }];
//!
//! let mut resolver = stm32f4::resolver();
//! let spec = resolver.channel_spec_by_timer(Some(&output), &config).unwrap();
//! assert_eq!((spec.code().controller(), spec.code().stream()), (2, 1));
//! ```
//!
//! # Shared channel pool
//!
//! A multiplexed resolver keeps one descriptor per option. Resolving writes
//! into that descriptor, and the result borrows it, so finish with one
//! binding before resolving the next. There's no locking: the resolver is
//! meant for one execution context during bring-up.
//!
//! ### License
//!
//! Licensed under either of
//!
//! - [Apache License, Version 2.0](http://www.apache.org/licenses/LICENSE-2.0) ([LICENSE-APACHE](./LICENSE-APACHE))
//! - [MIT License](http://opensource.org/licenses/MIT) ([LICENSE-MIT](./LICENSE-MIT))
//!
//! at your option.
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted
//! for inclusion in the work by you, as defined in the Apache-2.0 license, shall be
//! dual licensed as above, without any additional terms or conditions.

#![no_std]

mod channel;
pub mod chip;
mod error;
pub mod fixed;
mod option;
mod peripheral;
mod ral;
pub mod remap;
mod timer;

pub use channel::{ChannelSpec, DmaCode, DmaResource, RequestId};
pub use error::ParseOptionError;
pub use fixed::Fixed;
pub use option::{DmaOption, IoTag, NoTimerConfig, OptionProvider, TimerIoConfig};
pub use peripheral::Peripheral;
pub use ral::dma::{channel::RegisterBlock as ChannelRegisters, stream::RegisterBlock as StreamRegisters};
pub use remap::Remap;
pub use timer::{Timer, TimerChannel, TimerHardware};

cfg_if::cfg_if! {
    if #[cfg(all(feature = "stm32f4", feature = "stm32f3"))] {
        compile_error!("select one chip family: enable either `stm32f4` or `stm32f3`, not both");
    } else if #[cfg(feature = "stm32f4")] {
        /// The chip family selected by the crate features.
        pub use chip::stm32f4 as target;
    } else if #[cfg(feature = "stm32f3")] {
        /// The chip family selected by the crate features.
        pub use chip::stm32f3 as target;
    } else {
        /// The chip family selected by the crate features.
        pub use chip::at32f43x as target;
    }
}

/// Resolves logical DMA users to physical channels
///
/// Resolution never fails loudly. An option outside of
/// `[0, MAX_*_OPTIONS)` is rejected before any lookup, and a peripheral or
/// timer channel missing from the tables has no DMA; both return `None`.
pub trait DmaResolver {
    /// Number of options for peripherals
    const MAX_PERIPHERAL_OPTIONS: usize;
    /// Number of options for timer channels
    const MAX_TIMER_OPTIONS: usize;

    /// Find the channel for instance `index` of `device`.
    ///
    /// The first table row for `device` and `index` wins.
    fn channel_spec_by_peripheral(
        &mut self,
        device: Peripheral,
        index: u8,
        option: DmaOption,
    ) -> Option<&ChannelSpec>;

    /// Find the channel for a timer's capture / compare channel.
    fn channel_spec_by_timer_value(
        &mut self,
        timer: Timer,
        channel: TimerChannel,
        option: DmaOption,
    ) -> Option<&ChannelSpec>;

    /// Find the channel for a timer output, using the option configured
    /// for its pin.
    ///
    /// No timer output means no channel. That's not an error.
    fn channel_spec_by_timer<P>(
        &mut self,
        hardware: Option<&TimerHardware>,
        config: &P,
    ) -> Option<&ChannelSpec>
    where
        P: OptionProvider + ?Sized,
    {
        let hardware = hardware?;
        let option = config.dma_option(hardware.tag);
        self.channel_spec_by_timer_value(hardware.timer, hardware.channel, option)
    }

    /// Find the option that selects the timer's pre-configured DMA channel.
    ///
    /// Returns [`DmaOption::UNUSED`] if the timer has no configured channel,
    /// or if no option selects it.
    fn option_by_timer(&self, hardware: &TimerHardware) -> DmaOption;
}

#[cfg(test)]
mod tests {
    use super::{target, DmaOption, DmaResolver, NoTimerConfig, Peripheral};

    #[test]
    fn target_resolver_is_usable() {
        let mut resolver = target::resolver();
        assert!(resolver
            .channel_spec_by_peripheral(Peripheral::SpiMosi, 0, DmaOption::new(0))
            .is_some());
        assert!(resolver
            .channel_spec_by_timer(None, &NoTimerConfig)
            .is_none());
    }

    #[test]
    fn features_select_one_family() {
        let expected = if cfg!(feature = "stm32f4") {
            (2, 3)
        } else if cfg!(feature = "stm32f3") {
            (2, 2)
        } else {
            (14, 14)
        };
        assert_eq!(
            (
                <target::Resolver as DmaResolver>::MAX_PERIPHERAL_OPTIONS,
                <target::Resolver as DmaResolver>::MAX_TIMER_OPTIONS,
            ),
            expected
        );
    }

    #[test]
    fn option_bounds_follow_the_family() {
        assert_eq!(<super::chip::at32f43x::Resolver as DmaResolver>::MAX_PERIPHERAL_OPTIONS, 14);
        assert_eq!(<super::chip::at32f43x::Resolver as DmaResolver>::MAX_TIMER_OPTIONS, 14);
        assert_eq!(<super::chip::stm32f4::Resolver as DmaResolver>::MAX_PERIPHERAL_OPTIONS, 2);
        assert_eq!(<super::chip::stm32f4::Resolver as DmaResolver>::MAX_TIMER_OPTIONS, 3);
        assert_eq!(<super::chip::stm32f3::Resolver as DmaResolver>::MAX_TIMER_OPTIONS, 2);
    }
}
