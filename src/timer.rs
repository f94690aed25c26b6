//! Timer identities and timer hardware descriptions

use crate::{channel::DmaResource, option::IoTag};

/// A hardware timer instance
///
/// Opaque to the resolver; timers only need to compare equal to themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timer(u8);

impl Timer {
    pub const TIM1: Timer = Timer(1);
    pub const TIM2: Timer = Timer(2);
    pub const TIM3: Timer = Timer(3);
    pub const TIM4: Timer = Timer(4);
    pub const TIM5: Timer = Timer(5);
    pub const TIM8: Timer = Timer(8);
    pub const TIM15: Timer = Timer(15);
    pub const TIM16: Timer = Timer(16);
    pub const TIM17: Timer = Timer(17);
    pub const TIM20: Timer = Timer(20);

    /// The timer with the given number, as printed on the datasheet.
    pub const fn new(number: u8) -> Self {
        Timer(number)
    }
    /// Returns the timer number
    pub const fn number(self) -> u8 {
        self.0
    }
}

/// A timer capture / compare channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerChannel {
    Ch1,
    Ch2,
    Ch3,
    Ch4,
}

/// A timer output wired to a pin
///
/// Boards describe each usable timer pin with one of these. The `dma_*`
/// fields hold the DMA binding the board shipped with, if any; they're
/// consulted by the reverse lookups, never by the forward resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerHardware {
    /// The pin this output drives
    pub tag: IoTag,
    /// The timer instance
    pub timer: Timer,
    /// The capture / compare channel
    pub channel: TimerChannel,
    /// Pre-configured DMA channel for the capture / compare request
    pub dma_ref_configured: Option<DmaResource>,
    /// Pre-configured stream channel selection (STM32F4/F7 only)
    pub dma_channel_configured: u8,
    /// Pre-configured DMA channel for the timer update request
    pub dma_tim_up_ref: Option<DmaResource>,
}

impl TimerHardware {
    /// A timer output with no pre-configured DMA binding.
    pub const fn new(tag: IoTag, timer: Timer, channel: TimerChannel) -> Self {
        TimerHardware {
            tag,
            timer,
            channel,
            dma_ref_configured: None,
            dma_channel_configured: 0,
            dma_tim_up_ref: None,
        }
    }
}
