//! DMA capable peripherals.

/// A peripheral function that can request DMA service
///
/// Directional peripherals carry their direction in the variant. Instances
/// are counted separately, starting at zero: `SPI1` is index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Peripheral {
    /// SPI transmit
    SpiMosi,
    /// SPI receive
    SpiMiso,
    /// ADC regular conversion results
    Adc,
    /// SD card host controller
    Sdio,
    /// UART transmit
    UartTx,
    /// UART receive
    UartRx,
    /// Timer update (overflow) event, indexed by timer number minus one
    TimUp,
}
