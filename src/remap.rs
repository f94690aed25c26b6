//! Resolution for parts with a DMA request multiplexer
//!
//! Any channel can serve any request, so the tables only record request
//! lines. The option picks a channel out of a shared pool, and the resolver
//! stamps the request into that channel before handing it back.

use crate::{
    channel::{ChannelSpec, DmaResource, RequestId},
    option::DmaOption,
    peripheral::Peripheral,
    timer::{Timer, TimerChannel, TimerHardware},
    DmaResolver,
};

/// A peripheral's request line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeripheralRequest {
    pub device: Peripheral,
    pub index: u8,
    pub request: RequestId,
}

impl PeripheralRequest {
    pub const fn new(device: Peripheral, index: u8, request: RequestId) -> Self {
        PeripheralRequest {
            device,
            index,
            request,
        }
    }
}

/// A timer channel's request line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub timer: Timer,
    pub channel: TimerChannel,
    pub request: RequestId,
}

impl TimerRequest {
    pub const fn new(timer: Timer, channel: TimerChannel, request: RequestId) -> Self {
        TimerRequest {
            timer,
            channel,
            request,
        }
    }
}

/// A resolver for multiplexed DMA
///
/// `OPTIONS` is the size of the channel pool. Option `n` always selects
/// pool slot `n`, for peripherals and timers alike.
///
/// The pool is shared state. A resolved `ChannelSpec` borrows its pool slot,
/// and the next resolution against that slot rewrites it. Resolve, program
/// the DMA channel, then resolve the next binding. Nothing here locks; use
/// the resolver from one execution context during bring-up.
pub struct Remap<const OPTIONS: usize> {
    peripherals: &'static [PeripheralRequest],
    timers: &'static [TimerRequest],
    pool: [ChannelSpec; OPTIONS],
}

impl<const OPTIONS: usize> Remap<OPTIONS> {
    /// Create a resolver over request tables and a channel pool.
    ///
    /// Every pool slot should describe a channel. Table order matters only
    /// for duplicate rows: the first row wins.
    pub const fn new(
        peripherals: &'static [PeripheralRequest],
        timers: &'static [TimerRequest],
        pool: [ChannelSpec; OPTIONS],
    ) -> Self {
        Remap {
            peripherals,
            timers,
            pool,
        }
    }

    /// Returns the channel pool
    pub fn pool(&self) -> &[ChannelSpec; OPTIONS] {
        &self.pool
    }

    /// Find the option whose channel serves the timer's update request.
    ///
    /// Like [`option_by_timer`](DmaResolver::option_by_timer), but matches
    /// against the timer's pre-configured update (overflow) binding.
    pub fn up_option_by_timer(&self, hardware: &TimerHardware) -> DmaOption {
        self.option_by_resource(hardware.dma_tim_up_ref)
    }

    fn option_by_resource(&self, resource: Option<DmaResource>) -> DmaOption {
        let Some(resource) = resource else {
            return DmaOption::UNUSED;
        };
        self.pool
            .iter()
            .position(|spec| spec.resource() == Some(resource))
            .map_or(DmaOption::UNUSED, DmaOption::from_index)
    }

    fn stamp(&mut self, slot: usize, request: RequestId) -> &ChannelSpec {
        let spec = &mut self.pool[slot];
        spec.stamp(request);
        spec
    }
}

impl<const OPTIONS: usize> DmaResolver for Remap<OPTIONS> {
    const MAX_PERIPHERAL_OPTIONS: usize = OPTIONS;
    const MAX_TIMER_OPTIONS: usize = OPTIONS;

    fn channel_spec_by_peripheral(
        &mut self,
        device: Peripheral,
        index: u8,
        option: DmaOption,
    ) -> Option<&ChannelSpec> {
        let slot = option.index(Self::MAX_PERIPHERAL_OPTIONS)?;
        let request = self
            .peripherals
            .iter()
            .find(|periph| periph.device == device && periph.index == index)?
            .request;
        Some(self.stamp(slot, request))
    }

    fn channel_spec_by_timer_value(
        &mut self,
        timer: Timer,
        channel: TimerChannel,
        option: DmaOption,
    ) -> Option<&ChannelSpec> {
        let slot = option.index(Self::MAX_TIMER_OPTIONS)?;
        let request = self
            .timers
            .iter()
            .find(|mapping| mapping.timer == timer && mapping.channel == channel)?
            .request;
        Some(self.stamp(slot, request))
    }

    fn option_by_timer(&self, hardware: &TimerHardware) -> DmaOption {
        self.option_by_resource(hardware.dma_ref_configured)
    }
}
