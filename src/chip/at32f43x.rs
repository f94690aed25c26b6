//! AT32F435 / AT32F437
//!
//! Two 7-channel controllers behind a request multiplexer. The pool holds
//! all 14 channels, DMA1 first. A channel's number rides in the stream
//! field of its code, so stamping a request never loses it.

use crate::{
    channel::{ChannelSpec, DmaCode, DmaResource, RequestId},
    peripheral::Peripheral::{self, *},
    remap::{PeripheralRequest, Remap, TimerRequest},
    timer::{
        Timer,
        TimerChannel::{self, *},
    },
};

/// DMA1 base address
pub const DMA1: usize = 0x4002_6400;
/// DMA2 base address
pub const DMA2: usize = 0x4002_6600;

/// Number of options, for peripherals and timers.
pub const OPTIONS: usize = 14;

/// The resolver for this family.
pub type Resolver = Remap<OPTIONS>;

/// Create the resolver, with a fresh channel pool.
pub const fn resolver() -> Resolver {
    Remap::new(PERIPHERALS, TIMERS, POOL)
}

/// Multiplexer request lines.
pub mod request {
    use crate::channel::RequestId;

    pub const ADC1: RequestId = RequestId::new(0x05);
    pub const TMR6_OVERFLOW: RequestId = RequestId::new(0x08);
    pub const TMR7_OVERFLOW: RequestId = RequestId::new(0x09);
    pub const SPI1_RX: RequestId = RequestId::new(0x0A);
    pub const SPI1_TX: RequestId = RequestId::new(0x0B);
    pub const SPI2_RX: RequestId = RequestId::new(0x0C);
    pub const SPI2_TX: RequestId = RequestId::new(0x0D);
    pub const SPI3_RX: RequestId = RequestId::new(0x0E);
    pub const SPI3_TX: RequestId = RequestId::new(0x0F);
    pub const USART1_RX: RequestId = RequestId::new(0x18);
    pub const USART1_TX: RequestId = RequestId::new(0x19);
    pub const USART2_RX: RequestId = RequestId::new(0x1A);
    pub const USART2_TX: RequestId = RequestId::new(0x1B);
    pub const USART3_RX: RequestId = RequestId::new(0x1C);
    pub const USART3_TX: RequestId = RequestId::new(0x1D);
    pub const UART4_RX: RequestId = RequestId::new(0x1E);
    pub const UART4_TX: RequestId = RequestId::new(0x1F);
    pub const UART5_RX: RequestId = RequestId::new(0x20);
    pub const UART5_TX: RequestId = RequestId::new(0x21);
    pub const ADC2: RequestId = RequestId::new(0x24);
    pub const ADC3: RequestId = RequestId::new(0x25);
    pub const TMR1_CH1: RequestId = RequestId::new(0x2A);
    pub const TMR1_CH2: RequestId = RequestId::new(0x2B);
    pub const TMR1_CH3: RequestId = RequestId::new(0x2C);
    pub const TMR1_CH4: RequestId = RequestId::new(0x2D);
    pub const TMR1_OVERFLOW: RequestId = RequestId::new(0x2E);
    pub const TMR8_CH1: RequestId = RequestId::new(0x31);
    pub const TMR8_CH2: RequestId = RequestId::new(0x32);
    pub const TMR8_CH3: RequestId = RequestId::new(0x33);
    pub const TMR8_CH4: RequestId = RequestId::new(0x34);
    pub const TMR8_OVERFLOW: RequestId = RequestId::new(0x35);
    pub const TMR2_CH1: RequestId = RequestId::new(0x38);
    pub const TMR2_CH2: RequestId = RequestId::new(0x39);
    pub const TMR2_CH3: RequestId = RequestId::new(0x3A);
    pub const TMR2_CH4: RequestId = RequestId::new(0x3B);
    pub const TMR2_OVERFLOW: RequestId = RequestId::new(0x3C);
    pub const TMR3_CH1: RequestId = RequestId::new(0x3D);
    pub const TMR3_CH2: RequestId = RequestId::new(0x3E);
    pub const TMR3_CH3: RequestId = RequestId::new(0x3F);
    pub const TMR3_CH4: RequestId = RequestId::new(0x40);
    pub const TMR3_OVERFLOW: RequestId = RequestId::new(0x41);
    pub const TMR4_CH1: RequestId = RequestId::new(0x43);
    pub const TMR4_CH2: RequestId = RequestId::new(0x44);
    pub const TMR4_CH3: RequestId = RequestId::new(0x45);
    pub const TMR4_CH4: RequestId = RequestId::new(0x46);
    pub const TMR4_OVERFLOW: RequestId = RequestId::new(0x47);
    pub const TMR5_CH1: RequestId = RequestId::new(0x48);
    pub const TMR5_CH2: RequestId = RequestId::new(0x49);
    pub const TMR5_CH3: RequestId = RequestId::new(0x4A);
    pub const TMR5_CH4: RequestId = RequestId::new(0x4B);
    pub const TMR5_OVERFLOW: RequestId = RequestId::new(0x4C);
    pub const TMR20_CH1: RequestId = RequestId::new(0x56);
    pub const TMR20_CH2: RequestId = RequestId::new(0x57);
    pub const TMR20_CH3: RequestId = RequestId::new(0x58);
    pub const TMR20_CH4: RequestId = RequestId::new(0x59);
    pub const TMR20_OVERFLOW: RequestId = RequestId::new(0x5A);
    pub const SPI4_RX: RequestId = RequestId::new(0x6A);
    pub const SPI4_TX: RequestId = RequestId::new(0x6B);
    pub const USART6_RX: RequestId = RequestId::new(0x72);
    pub const USART6_TX: RequestId = RequestId::new(0x73);
}

use request::*;

const fn periph(device: Peripheral, index: u8, request: RequestId) -> PeripheralRequest {
    PeripheralRequest::new(device, index, request)
}

/// Timer update pseudo-peripherals are indexed by timer number minus one.
const fn tim_up(timer: u8, request: RequestId) -> PeripheralRequest {
    PeripheralRequest::new(TimUp, timer - 1, request)
}

/// Peripheral request lines. SPI MOSI is the controller's TX request.
pub const PERIPHERALS: &[PeripheralRequest] = &[
    periph(SpiMosi, 0, SPI1_TX),
    periph(SpiMiso, 0, SPI1_RX),
    periph(SpiMosi, 1, SPI2_TX),
    periph(SpiMiso, 1, SPI2_RX),
    periph(SpiMosi, 2, SPI3_TX),
    periph(SpiMiso, 2, SPI3_RX),
    periph(SpiMosi, 3, SPI4_TX),
    periph(SpiMiso, 3, SPI4_RX),
    periph(Adc, 0, ADC1),
    periph(Adc, 1, ADC2),
    periph(Adc, 2, ADC3),
    periph(UartTx, 0, USART1_TX),
    periph(UartRx, 0, USART1_RX),
    periph(UartTx, 1, USART2_TX),
    periph(UartRx, 1, USART2_RX),
    periph(UartTx, 2, USART3_TX),
    periph(UartRx, 2, USART3_RX),
    periph(UartTx, 3, UART4_TX),
    periph(UartRx, 3, UART4_RX),
    periph(UartTx, 4, UART5_TX),
    periph(UartRx, 4, UART5_RX),
    periph(UartTx, 5, USART6_TX),
    periph(UartRx, 5, USART6_RX),
    tim_up(1, TMR1_OVERFLOW),
    tim_up(2, TMR2_OVERFLOW),
    tim_up(3, TMR3_OVERFLOW),
    tim_up(4, TMR4_OVERFLOW),
    tim_up(5, TMR5_OVERFLOW),
    tim_up(6, TMR6_OVERFLOW),
    tim_up(7, TMR7_OVERFLOW),
    tim_up(8, TMR8_OVERFLOW),
    tim_up(20, TMR20_OVERFLOW),
];

const fn tim(timer: Timer, channel: TimerChannel, request: RequestId) -> TimerRequest {
    TimerRequest::new(timer, channel, request)
}

/// Timer channel request lines.
// TODO TMR15, TMR16 and TMR17 channels once their requests are confirmed.
pub const TIMERS: &[TimerRequest] = &[
    tim(Timer::TIM1, Ch1, TMR1_CH1),
    tim(Timer::TIM1, Ch2, TMR1_CH2),
    tim(Timer::TIM1, Ch3, TMR1_CH3),
    tim(Timer::TIM1, Ch4, TMR1_CH4),
    tim(Timer::TIM2, Ch1, TMR2_CH1),
    tim(Timer::TIM2, Ch2, TMR2_CH2),
    tim(Timer::TIM2, Ch3, TMR2_CH3),
    tim(Timer::TIM2, Ch4, TMR2_CH4),
    tim(Timer::TIM3, Ch1, TMR3_CH1),
    tim(Timer::TIM3, Ch2, TMR3_CH2),
    tim(Timer::TIM3, Ch3, TMR3_CH3),
    tim(Timer::TIM3, Ch4, TMR3_CH4),
    tim(Timer::TIM4, Ch1, TMR4_CH1),
    tim(Timer::TIM4, Ch2, TMR4_CH2),
    tim(Timer::TIM4, Ch3, TMR4_CH3),
    tim(Timer::TIM4, Ch4, TMR4_CH4),
    tim(Timer::TIM5, Ch1, TMR5_CH1),
    tim(Timer::TIM5, Ch2, TMR5_CH2),
    tim(Timer::TIM5, Ch3, TMR5_CH3),
    tim(Timer::TIM5, Ch4, TMR5_CH4),
    tim(Timer::TIM8, Ch1, TMR8_CH1),
    tim(Timer::TIM8, Ch2, TMR8_CH2),
    tim(Timer::TIM8, Ch3, TMR8_CH3),
    tim(Timer::TIM8, Ch4, TMR8_CH4),
    tim(Timer::TIM20, Ch1, TMR20_CH1),
    tim(Timer::TIM20, Ch2, TMR20_CH2),
    tim(Timer::TIM20, Ch3, TMR20_CH3),
    tim(Timer::TIM20, Ch4, TMR20_CH4),
];

const fn dma(controller: u8, channel: u8) -> ChannelSpec {
    let base = if controller == 1 { DMA1 } else { DMA2 };
    ChannelSpec::new(
        DmaCode::new(controller, channel, 0),
        DmaResource::channel(base, channel),
        0,
    )
}

/// The channel pool, before any request is stamped.
pub const POOL: [ChannelSpec; OPTIONS] = [
    dma(1, 1),
    dma(1, 2),
    dma(1, 3),
    dma(1, 4),
    dma(1, 5),
    dma(1, 6),
    dma(1, 7),
    dma(2, 1),
    dma(2, 2),
    dma(2, 3),
    dma(2, 4),
    dma(2, 5),
    dma(2, 6),
    dma(2, 7),
];

#[cfg(test)]
mod tests {
    use super::{request, resolver, DMA1, DMA2, OPTIONS, PERIPHERALS, POOL, TIMERS};
    use crate::{
        DmaCode, DmaOption, DmaResolver, DmaResource, IoTag, NoTimerConfig, Peripheral::*,
        Timer, TimerChannel::*, TimerHardware, TimerIoConfig,
    };

    #[test]
    fn spi1_mosi_stamps_option_zero() {
        let mut resolver = resolver();
        let spec = resolver
            .channel_spec_by_peripheral(SpiMosi, 0, DmaOption::new(0))
            .unwrap();
        assert_eq!(spec.request(), request::SPI1_TX.raw());
        assert_eq!(spec.code(), DmaCode::new(1, 1, request::SPI1_TX.raw()));
        assert_eq!(spec.resource(), Some(DmaResource::channel(DMA1, 1)));
    }

    #[test]
    fn every_peripheral_resolves_on_every_option() {
        let mut resolver = resolver();
        for periph in PERIPHERALS {
            for option in 0..OPTIONS {
                let spec = resolver
                    .channel_spec_by_peripheral(
                        periph.device,
                        periph.index,
                        DmaOption::new(option as i16),
                    )
                    .unwrap();
                let slot = POOL[option].code();
                assert_eq!(spec.request(), periph.request.raw());
                assert_eq!(spec.code().controller(), slot.controller());
                assert_eq!(spec.code().stream(), slot.stream());
                assert_eq!(spec.code().request(), periph.request.raw());
                assert_eq!(spec.resource(), POOL[option].resource());
            }
        }
    }

    #[test]
    fn out_of_range_options_never_resolve() {
        let mut resolver = resolver();
        for option in [-1, -128, OPTIONS as i16, 99, i16::MAX] {
            for periph in PERIPHERALS {
                assert!(resolver
                    .channel_spec_by_peripheral(periph.device, periph.index, DmaOption::new(option))
                    .is_none());
            }
            assert!(resolver
                .channel_spec_by_timer_value(Timer::TIM1, Ch1, DmaOption::new(option))
                .is_none());
        }
        // Range checks leave the pool alone.
        assert_eq!(resolver.pool(), &POOL);
    }

    #[test]
    fn missing_peripherals_never_resolve() {
        let mut resolver = resolver();
        for option in 0..OPTIONS as i16 {
            let option = DmaOption::new(option);
            assert!(resolver.channel_spec_by_peripheral(SpiMosi, 4, option).is_none());
            assert!(resolver.channel_spec_by_peripheral(Adc, 3, option).is_none());
            assert!(resolver.channel_spec_by_peripheral(Sdio, 0, option).is_none());
            assert!(resolver.channel_spec_by_peripheral(TimUp, 8, option).is_none());
        }
        assert_eq!(resolver.pool(), &POOL);
    }

    #[test]
    fn timer_update_uses_timer_number() {
        let mut resolver = resolver();
        let spec = resolver
            .channel_spec_by_peripheral(TimUp, 19, DmaOption::new(3))
            .unwrap();
        assert_eq!(spec.request(), request::TMR20_OVERFLOW.raw());
        assert_eq!(spec.code(), DmaCode::new(1, 4, request::TMR20_OVERFLOW.raw()));
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let mut resolver = resolver();
        let first = *resolver
            .channel_spec_by_peripheral(UartRx, 2, DmaOption::new(9))
            .unwrap();
        let second = *resolver
            .channel_spec_by_peripheral(UartRx, 2, DmaOption::new(9))
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.code(), DmaCode::new(2, 3, request::USART3_RX.raw()));
    }

    #[test]
    fn later_resolution_rewrites_the_slot() {
        let mut resolver = resolver();
        resolver.channel_spec_by_peripheral(SpiMosi, 0, DmaOption::new(5));
        resolver.channel_spec_by_timer_value(Timer::TIM3, Ch2, DmaOption::new(5));
        assert_eq!(resolver.pool()[5].request(), request::TMR3_CH2.raw());
        assert_eq!(resolver.pool()[5].code(), DmaCode::new(1, 6, request::TMR3_CH2.raw()));
    }

    #[test]
    fn every_timer_channel_resolves() {
        let mut resolver = resolver();
        for mapping in TIMERS {
            let spec = resolver
                .channel_spec_by_timer_value(mapping.timer, mapping.channel, DmaOption::new(13))
                .unwrap();
            assert_eq!(spec.request(), mapping.request.raw());
            assert_eq!(spec.resource(), Some(DmaResource::channel(DMA2, 7)));
        }
        assert!(resolver
            .channel_spec_by_timer_value(Timer::TIM15, Ch1, DmaOption::new(0))
            .is_none());
    }

    #[test]
    fn timer_hardware_takes_its_option_from_config() {
        let mut resolver = resolver();
        let pa8 = IoTag::new(0, 8);
        let hardware = TimerHardware::new(pa8, Timer::TIM1, Ch1);
        let configs = [TimerIoConfig {
            tag: pa8,
            index: 0,
            dma_option: DmaOption::new(7),
        }];

        let spec = resolver.channel_spec_by_timer(Some(&hardware), &configs).unwrap();
        assert_eq!(spec.code(), DmaCode::new(2, 1, request::TMR1_CH1.raw()));

        assert!(resolver
            .channel_spec_by_timer(Some(&hardware), &NoTimerConfig)
            .is_none());
        assert!(resolver.channel_spec_by_timer(None, &configs).is_none());
    }

    #[test]
    fn configured_timers_map_back_to_options() {
        let resolver = resolver();
        let mut hardware = TimerHardware::new(IoTag::new(1, 6), Timer::TIM4, Ch1);
        assert!(resolver.option_by_timer(&hardware).is_unused());

        hardware.dma_ref_configured = Some(DmaResource::channel(DMA2, 2));
        assert_eq!(resolver.option_by_timer(&hardware), DmaOption::new(8));
        assert!(resolver.up_option_by_timer(&hardware).is_unused());

        hardware.dma_tim_up_ref = Some(DmaResource::channel(DMA1, 7));
        assert_eq!(resolver.up_option_by_timer(&hardware), DmaOption::new(6));

        hardware.dma_ref_configured = Some(DmaResource::channel(0x4002_0000, 1));
        assert!(resolver.option_by_timer(&hardware).is_unused());
    }

    #[test]
    fn resolved_channels_map_back_to_their_option() {
        let mut resolver = resolver();
        for option in 0..OPTIONS as i16 {
            let option = DmaOption::new(option);
            let resource = resolver
                .channel_spec_by_peripheral(UartTx, 0, option)
                .and_then(|spec| spec.resource());
            let mut hardware = TimerHardware::new(IoTag::new(0, 9), Timer::TIM1, Ch2);
            hardware.dma_ref_configured = resource;
            hardware.dma_tim_up_ref = resource;
            assert_eq!(resolver.option_by_timer(&hardware), option);
            assert_eq!(resolver.up_option_by_timer(&hardware), option);
        }
    }
}
