//! STM32F303
//!
//! DMA1 has seven channels and DMA2 has five. Every request is hard-wired to
//! one channel, or to two when SYSCFG can remap it, so there's no request to
//! select: a `ChannelSpec`'s request is always zero. The channel number
//! rides in the stream field of the code.

use crate::{
    channel::{options, ChannelSpec, DmaCode, DmaResource},
    fixed::{ChannelWiring, Fixed, PeripheralChannels, TimerChannels},
    peripheral::Peripheral::{self, *},
    timer::{
        Timer,
        TimerChannel::{self, *},
    },
};

/// DMA1 base address
pub const DMA1: usize = 0x4002_0000;
/// DMA2 base address
pub const DMA2: usize = 0x4002_0400;

/// Channels that may serve one peripheral.
pub const PERIPHERAL_OPTIONS: usize = 2;
/// Channels that may serve one timer channel.
pub const TIMER_OPTIONS: usize = 2;

/// The resolver for this family.
pub type Resolver = Fixed<ChannelWiring, PERIPHERAL_OPTIONS, TIMER_OPTIONS>;

/// Create the resolver.
pub const fn resolver() -> Resolver {
    Fixed::new(PERIPHERALS, TIMERS)
}

const fn dma(controller: u8, channel: u8) -> ChannelSpec {
    let base = if controller == 1 { DMA1 } else { DMA2 };
    ChannelSpec::new(
        DmaCode::new(controller, channel, 0),
        DmaResource::channel(base, channel),
        0,
    )
}

const fn periph<const M: usize>(
    device: Peripheral,
    index: u8,
    specs: [ChannelSpec; M],
) -> PeripheralChannels<PERIPHERAL_OPTIONS> {
    PeripheralChannels::new(device, index, options(specs))
}

pub const PERIPHERALS: &[PeripheralChannels<PERIPHERAL_OPTIONS>] = &[
    periph(SpiMosi, 0, [dma(1, 3)]),
    periph(SpiMiso, 0, [dma(1, 2)]),
    periph(SpiMosi, 1, [dma(1, 5)]),
    periph(SpiMiso, 1, [dma(1, 4)]),
    periph(SpiMosi, 2, [dma(2, 2)]),
    periph(SpiMiso, 2, [dma(2, 1)]),
    periph(Adc, 0, [dma(1, 1)]),
    periph(Adc, 1, [dma(2, 1), dma(2, 3)]),
    periph(Adc, 2, [dma(2, 5)]),
    periph(Adc, 3, [dma(2, 2), dma(2, 4)]),
    periph(UartTx, 0, [dma(1, 4)]),
    periph(UartRx, 0, [dma(1, 5)]),
    periph(UartTx, 1, [dma(1, 7)]),
    periph(UartRx, 1, [dma(1, 6)]),
    periph(UartTx, 2, [dma(1, 2)]),
    periph(UartRx, 2, [dma(1, 3)]),
    periph(UartTx, 3, [dma(2, 5)]),
    periph(UartRx, 3, [dma(2, 3)]),
    periph(TimUp, 0, [dma(1, 5)]),
    periph(TimUp, 1, [dma(1, 2)]),
    periph(TimUp, 2, [dma(1, 3)]),
    periph(TimUp, 3, [dma(1, 7)]),
    periph(TimUp, 7, [dma(2, 1)]),
    periph(TimUp, 14, [dma(1, 5)]),
    periph(TimUp, 15, [dma(1, 3), dma(1, 6)]),
    periph(TimUp, 16, [dma(1, 1), dma(1, 7)]),
];

const fn tim<const M: usize>(
    timer: Timer,
    channel: TimerChannel,
    specs: [ChannelSpec; M],
) -> TimerChannels<TIMER_OPTIONS> {
    TimerChannels::new(timer, channel, options(specs))
}

pub const TIMERS: &[TimerChannels<TIMER_OPTIONS>] = &[
    tim(Timer::TIM1, Ch1, [dma(1, 2)]),
    tim(Timer::TIM1, Ch2, [dma(1, 3)]),
    tim(Timer::TIM1, Ch3, [dma(1, 6)]),
    tim(Timer::TIM1, Ch4, [dma(1, 4)]),
    tim(Timer::TIM2, Ch1, [dma(1, 5)]),
    tim(Timer::TIM2, Ch2, [dma(1, 7)]),
    tim(Timer::TIM2, Ch3, [dma(1, 1)]),
    tim(Timer::TIM2, Ch4, [dma(1, 7)]),
    tim(Timer::TIM3, Ch1, [dma(1, 6)]),
    tim(Timer::TIM3, Ch3, [dma(1, 2)]),
    tim(Timer::TIM3, Ch4, [dma(1, 3)]),
    tim(Timer::TIM4, Ch1, [dma(1, 1)]),
    tim(Timer::TIM4, Ch2, [dma(1, 4)]),
    tim(Timer::TIM4, Ch3, [dma(1, 5)]),
    tim(Timer::TIM8, Ch1, [dma(2, 3)]),
    tim(Timer::TIM8, Ch2, [dma(2, 5)]),
    tim(Timer::TIM8, Ch3, [dma(2, 1)]),
    tim(Timer::TIM8, Ch4, [dma(2, 2)]),
    tim(Timer::TIM15, Ch1, [dma(1, 5)]),
    tim(Timer::TIM16, Ch1, [dma(1, 3), dma(1, 6)]),
    tim(Timer::TIM17, Ch1, [dma(1, 1), dma(1, 7)]),
];

#[cfg(test)]
mod tests {
    use super::{resolver, DMA1, DMA2};
    use crate::{
        DmaCode, DmaOption, DmaResolver, DmaResource, IoTag, NoTimerConfig, Peripheral::*,
        Timer, TimerChannel::*, TimerHardware,
    };

    #[test]
    fn fixed_channels_carry_no_request() {
        let mut resolver = resolver();
        let spec = resolver
            .channel_spec_by_peripheral(Adc, 3, DmaOption::new(1))
            .unwrap();
        assert_eq!(spec.code(), DmaCode::new(2, 4, 0));
        assert_eq!(spec.request(), 0);
        assert_eq!(spec.resource(), Some(DmaResource::channel(DMA2, 4)));
    }

    #[test]
    fn remapped_timer_channels() {
        let mut resolver = resolver();
        let default = *resolver
            .channel_spec_by_timer_value(Timer::TIM16, Ch1, DmaOption::new(0))
            .unwrap();
        let remapped = *resolver
            .channel_spec_by_timer_value(Timer::TIM16, Ch1, DmaOption::new(1))
            .unwrap();
        assert_eq!(default.resource(), Some(DmaResource::channel(DMA1, 3)));
        assert_eq!(remapped.resource(), Some(DmaResource::channel(DMA1, 6)));
        assert!(resolver
            .channel_spec_by_timer_value(Timer::TIM15, Ch1, DmaOption::new(1))
            .is_none());
        assert!(resolver
            .channel_spec_by_timer_value(Timer::TIM3, Ch2, DmaOption::new(0))
            .is_none());
    }

    #[test]
    fn unconfigured_pins_get_no_channel() {
        let mut resolver = resolver();
        let hardware = TimerHardware::new(IoTag::new(0, 8), Timer::TIM1, Ch1);
        assert!(resolver
            .channel_spec_by_timer(Some(&hardware), &NoTimerConfig)
            .is_none());
    }

    #[test]
    fn configured_timers_match_channel_only() {
        let resolver = resolver();
        let mut hardware = TimerHardware::new(IoTag::new(1, 9), Timer::TIM17, Ch1);
        hardware.dma_ref_configured = Some(DmaResource::channel(DMA1, 7));
        // No channel selection on this family; whatever was recorded is ignored.
        hardware.dma_channel_configured = 5;
        assert_eq!(resolver.option_by_timer(&hardware), DmaOption::new(1));

        // Same channel, but configured on a different timer output.
        hardware.timer = Timer::TIM2;
        hardware.channel = Ch3;
        assert!(resolver.option_by_timer(&hardware).is_unused());
    }
}
