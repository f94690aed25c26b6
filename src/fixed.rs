//! Resolution for parts with fixed DMA wiring
//!
//! Each request is hard-wired to a handful of channels. The tables list
//! those channels per peripheral and per timer channel, already carrying
//! their request setting, and an option indexes straight into the list.
//! Nothing is mutated.

use core::marker::PhantomData;

use crate::{
    channel::ChannelSpec,
    option::DmaOption,
    peripheral::Peripheral,
    timer::{Timer, TimerChannel, TimerHardware},
    DmaResolver,
};

/// The channels that can serve a peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeripheralChannels<const N: usize> {
    pub device: Peripheral,
    pub index: u8,
    pub specs: [ChannelSpec; N],
}

impl<const N: usize> PeripheralChannels<N> {
    pub const fn new(device: Peripheral, index: u8, specs: [ChannelSpec; N]) -> Self {
        PeripheralChannels {
            device,
            index,
            specs,
        }
    }
}

/// The channels that can serve a timer channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerChannels<const N: usize> {
    pub timer: Timer,
    pub channel: TimerChannel,
    pub specs: [ChannelSpec; N],
}

impl<const N: usize> TimerChannels<N> {
    pub const fn new(timer: Timer, channel: TimerChannel, specs: [ChannelSpec; N]) -> Self {
        TimerChannels {
            timer,
            channel,
            specs,
        }
    }
}

/// How a pre-configured timer binding is matched against a table slot
///
/// The register block always has to match. Some controllers also select a
/// request per stream, and then that selection has to match, too.
pub trait Wiring {
    /// Returns `true` if `spec` agrees with the timer's configured request.
    fn matches_request(spec: &ChannelSpec, hardware: &TimerHardware) -> bool;
}

/// Streams with a channel selector (STM32F4, STM32F7)
pub enum StreamWiring {}

impl Wiring for StreamWiring {
    fn matches_request(spec: &ChannelSpec, hardware: &TimerHardware) -> bool {
        spec.request() == hardware.dma_channel_configured
    }
}

/// Channels with one request wiring (STM32F3)
pub enum ChannelWiring {}

impl Wiring for ChannelWiring {
    fn matches_request(_: &ChannelSpec, _: &TimerHardware) -> bool {
        true
    }
}

/// A resolver for fixed DMA wiring
///
/// `P` and `T` are the option counts for peripherals and timers. Rows that
/// list fewer channels are padded with [`ChannelSpec::EMPTY`], and those
/// slots never resolve.
pub struct Fixed<W, const P: usize, const T: usize> {
    peripherals: &'static [PeripheralChannels<P>],
    timers: &'static [TimerChannels<T>],
    _wiring: PhantomData<W>,
}

impl<W: Wiring, const P: usize, const T: usize> Fixed<W, P, T> {
    /// Create a resolver over channel tables.
    pub const fn new(
        peripherals: &'static [PeripheralChannels<P>],
        timers: &'static [TimerChannels<T>],
    ) -> Self {
        Fixed {
            peripherals,
            timers,
            _wiring: PhantomData,
        }
    }
}

impl<W: Wiring, const P: usize, const T: usize> DmaResolver for Fixed<W, P, T> {
    const MAX_PERIPHERAL_OPTIONS: usize = P;
    const MAX_TIMER_OPTIONS: usize = T;

    fn channel_spec_by_peripheral(
        &mut self,
        device: Peripheral,
        index: u8,
        option: DmaOption,
    ) -> Option<&ChannelSpec> {
        let slot = option.index(Self::MAX_PERIPHERAL_OPTIONS)?;
        let periph = self
            .peripherals
            .iter()
            .find(|periph| periph.device == device && periph.index == index)?;
        Some(&periph.specs[slot]).filter(|spec| spec.is_available())
    }

    fn channel_spec_by_timer_value(
        &mut self,
        timer: Timer,
        channel: TimerChannel,
        option: DmaOption,
    ) -> Option<&ChannelSpec> {
        let slot = option.index(Self::MAX_TIMER_OPTIONS)?;
        self.timers
            .iter()
            .find(|mapping| {
                mapping.timer == timer
                    && mapping.channel == channel
                    && mapping.specs[slot].is_available()
            })
            .map(|mapping| &mapping.specs[slot])
    }

    fn option_by_timer(&self, hardware: &TimerHardware) -> DmaOption {
        let Some(configured) = hardware.dma_ref_configured else {
            return DmaOption::UNUSED;
        };
        self.timers
            .iter()
            .filter(|mapping| mapping.timer == hardware.timer && mapping.channel == hardware.channel)
            .find_map(|mapping| {
                mapping.specs.iter().position(|spec| {
                    spec.resource() == Some(configured) && W::matches_request(spec, hardware)
                })
            })
            .map_or(DmaOption::UNUSED, DmaOption::from_index)
    }
}
