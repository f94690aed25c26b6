//! STM32F405 / STM32F411 / STM32F446 / STM32F7
//!
//! Two 8-stream controllers. Each request is wired to one or two streams,
//! and a stream picks among its requests with `CR[CHSEL]`. A `ChannelSpec`'s
//! request is that channel selection.

use crate::{
    channel::{options, ChannelSpec, DmaCode, DmaResource},
    fixed::{Fixed, PeripheralChannels, StreamWiring, TimerChannels},
    peripheral::Peripheral::{self, *},
    timer::{
        Timer,
        TimerChannel::{self, *},
    },
};

/// DMA1 base address
pub const DMA1: usize = 0x4002_6000;
/// DMA2 base address
pub const DMA2: usize = 0x4002_6400;

/// Streams that may serve one peripheral.
pub const PERIPHERAL_OPTIONS: usize = 2;
/// Streams that may serve one timer channel.
pub const TIMER_OPTIONS: usize = 3;

/// The resolver for this family.
pub type Resolver = Fixed<StreamWiring, PERIPHERAL_OPTIONS, TIMER_OPTIONS>;

/// Create the resolver.
pub const fn resolver() -> Resolver {
    Fixed::new(PERIPHERALS, TIMERS)
}

/// Stream `stream` of `controller`, selecting `channel`.
const fn dma(controller: u8, stream: u8, channel: u8) -> ChannelSpec {
    let base = if controller == 1 { DMA1 } else { DMA2 };
    ChannelSpec::new(
        DmaCode::new(controller, stream, channel),
        DmaResource::stream(base, stream),
        channel,
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
    periph(SpiMosi, 0, [dma(2, 3, 3), dma(2, 5, 3)]),
    periph(SpiMiso, 0, [dma(2, 0, 3), dma(2, 2, 3)]),
    periph(SpiMosi, 1, [dma(1, 4, 0)]),
    periph(SpiMiso, 1, [dma(1, 3, 0)]),
    periph(SpiMosi, 2, [dma(1, 5, 0), dma(1, 7, 0)]),
    periph(SpiMiso, 2, [dma(1, 0, 0), dma(1, 2, 0)]),
    periph(SpiMosi, 3, [dma(2, 1, 4)]),
    periph(SpiMiso, 3, [dma(2, 0, 4)]),
    periph(Adc, 0, [dma(2, 0, 0), dma(2, 4, 0)]),
    periph(Adc, 1, [dma(2, 2, 1), dma(2, 3, 1)]),
    periph(Adc, 2, [dma(2, 0, 2), dma(2, 1, 2)]),
    periph(Sdio, 0, [dma(2, 3, 4), dma(2, 6, 4)]),
    periph(UartTx, 0, [dma(2, 7, 4)]),
    periph(UartRx, 0, [dma(2, 5, 4), dma(2, 2, 4)]),
    periph(UartTx, 1, [dma(1, 6, 4)]),
    periph(UartRx, 1, [dma(1, 5, 4)]),
    periph(UartTx, 2, [dma(1, 3, 4)]),
    periph(UartRx, 2, [dma(1, 1, 4)]),
    periph(UartTx, 3, [dma(1, 4, 4)]),
    periph(UartRx, 3, [dma(1, 2, 4)]),
    periph(UartTx, 4, [dma(1, 7, 4)]),
    periph(UartRx, 4, [dma(1, 0, 4)]),
    periph(UartTx, 5, [dma(2, 6, 5), dma(2, 7, 5)]),
    periph(UartRx, 5, [dma(2, 1, 5), dma(2, 2, 5)]),
    periph(TimUp, 0, [dma(2, 5, 6)]),
    periph(TimUp, 1, [dma(1, 1, 3), dma(1, 7, 3)]),
    periph(TimUp, 2, [dma(1, 2, 5)]),
    periph(TimUp, 3, [dma(1, 6, 2)]),
    periph(TimUp, 4, [dma(1, 0, 6), dma(1, 6, 6)]),
    periph(TimUp, 5, [dma(1, 1, 7)]),
    periph(TimUp, 6, [dma(1, 2, 1), dma(1, 4, 1)]),
    periph(TimUp, 7, [dma(2, 1, 7)]),
];

const fn tim<const M: usize>(
    timer: Timer,
    channel: TimerChannel,
    specs: [ChannelSpec; M],
) -> TimerChannels<TIMER_OPTIONS> {
    TimerChannels::new(timer, channel, options(specs))
}

// TIM1 CH1..CH3 and TIM8 CH1..CH3 can also share their timer's
// capture/compare stream (channel 0), listed first.
pub const TIMERS: &[TimerChannels<TIMER_OPTIONS>] = &[
    tim(Timer::TIM1, Ch1, [dma(2, 6, 0), dma(2, 1, 6), dma(2, 3, 6)]),
    tim(Timer::TIM1, Ch2, [dma(2, 6, 0), dma(2, 2, 6)]),
    tim(Timer::TIM1, Ch3, [dma(2, 6, 0), dma(2, 6, 6)]),
    tim(Timer::TIM1, Ch4, [dma(2, 4, 6)]),
    tim(Timer::TIM2, Ch1, [dma(1, 5, 3)]),
    tim(Timer::TIM2, Ch2, [dma(1, 6, 3)]),
    tim(Timer::TIM2, Ch3, [dma(1, 1, 3)]),
    tim(Timer::TIM2, Ch4, [dma(1, 7, 3), dma(1, 6, 3)]),
    tim(Timer::TIM3, Ch1, [dma(1, 4, 5)]),
    tim(Timer::TIM3, Ch2, [dma(1, 5, 5)]),
    tim(Timer::TIM3, Ch3, [dma(1, 7, 5)]),
    tim(Timer::TIM3, Ch4, [dma(1, 2, 5)]),
    tim(Timer::TIM4, Ch1, [dma(1, 0, 2)]),
    tim(Timer::TIM4, Ch2, [dma(1, 3, 2)]),
    tim(Timer::TIM4, Ch3, [dma(1, 7, 2)]),
    tim(Timer::TIM5, Ch1, [dma(1, 2, 6)]),
    tim(Timer::TIM5, Ch2, [dma(1, 4, 6)]),
    tim(Timer::TIM5, Ch3, [dma(1, 0, 6)]),
    tim(Timer::TIM5, Ch4, [dma(1, 1, 6), dma(1, 3, 6)]),
    tim(Timer::TIM8, Ch1, [dma(2, 2, 0), dma(2, 2, 7)]),
    tim(Timer::TIM8, Ch2, [dma(2, 2, 0), dma(2, 3, 7)]),
    tim(Timer::TIM8, Ch3, [dma(2, 2, 0), dma(2, 4, 7)]),
    tim(Timer::TIM8, Ch4, [dma(2, 7, 7)]),
];
