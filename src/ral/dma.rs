//! DMA channel and stream register blocks

use super::RWRegister;

/// Channel registers, as found on STM32F3 and AT32F43x.
///
/// One block per channel. Channel `n` (1-based) starts at
/// `DMAx + 0x08 + 0x14 * (n - 1)`.
pub mod channel {
    use super::RWRegister;

    /// DMA channel registers.
    #[repr(C)]
    pub struct RegisterBlock {
        /// Channel configuration register
        pub CCR: RWRegister<u32>,
        /// Channel number of data register
        pub CNDTR: RWRegister<u32>,
        /// Channel peripheral address register
        pub CPAR: RWRegister<u32>,
        /// Channel memory address register
        pub CMAR: RWRegister<u32>,
        _reserved: [u32; 1],
    }

    const _: () = assert!(core::mem::size_of::<RegisterBlock>() == 0x14);

    /// Offset of the first channel from the controller base.
    const FIRST: usize = 0x08;
    /// Distance between two channels.
    const STRIDE: usize = 0x14;

    /// Compute the address of `channel` (1-based) on the controller at `base`.
    pub(crate) const fn address(base: usize, channel: u8) -> usize {
        assert!(channel != 0, "DMA channels count from 1");
        base + FIRST + STRIDE * (channel as usize - 1)
    }
}

/// Stream registers, as found on STM32F4 and STM32F7.
///
/// One block per stream. Stream `n` (0-based) starts at
/// `DMAx + 0x10 + 0x18 * n`.
pub mod stream {
    use super::RWRegister;

    /// DMA stream registers.
    #[repr(C)]
    pub struct RegisterBlock {
        /// Stream configuration register, which also selects the channel
        pub CR: RWRegister<u32>,
        /// Stream number of data register
        pub NDTR: RWRegister<u32>,
        /// Stream peripheral address register
        pub PAR: RWRegister<u32>,
        /// Stream memory 0 address register
        pub M0AR: RWRegister<u32>,
        /// Stream memory 1 address register
        pub M1AR: RWRegister<u32>,
        /// Stream FIFO control register
        pub FCR: RWRegister<u32>,
    }

    const _: () = assert!(core::mem::size_of::<RegisterBlock>() == 0x18);

    /// Offset of stream 0 from the controller base.
    const FIRST: usize = 0x10;
    /// Distance between two streams.
    const STRIDE: usize = 0x18;

    /// Compute the address of `stream` (0-based) on the controller at `base`.
    pub(crate) const fn address(base: usize, stream: u8) -> usize {
        base + FIRST + STRIDE * stream as usize
    }
}
