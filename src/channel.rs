//! DMA channel descriptors

use core::fmt::{self, Debug};

use crate::ral::{
    dma::{self, channel::RegisterBlock as ChannelRegisters, stream::RegisterBlock as StreamRegisters},
    Kind, Static,
};

/// A hardware DMA request line
///
/// On parts with a request multiplexer, this is the value written into a
/// channel's multiplexer to route a peripheral event to that channel. The
/// value is only meaningful to the DMA controller.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RequestId(u8);

impl RequestId {
    /// Wrap a raw request line.
    pub const fn new(raw: u8) -> Self {
        RequestId(raw)
    }
    /// Returns the raw request line
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// A composite channel identity
///
/// Packs the DMA controller, the stream (or channel) and the request
/// (or channel selection) into 16 bits:
///
/// ```text
/// 15      12 11       8 7                0
/// | ctrl    | stream   |  request        |
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DmaCode(u16);

impl DmaCode {
    /// Pack a code.
    ///
    /// `controller` and `stream` are truncated to four bits.
    pub const fn new(controller: u8, stream: u8, request: u8) -> Self {
        DmaCode(
            ((controller as u16 & 0xF) << 12) | ((stream as u16 & 0xF) << 8) | request as u16,
        )
    }
    /// The DMA controller number, starting at 1
    pub const fn controller(self) -> u8 {
        ((self.0 >> 12) & 0xF) as u8
    }
    /// The stream, or channel, on the controller
    pub const fn stream(self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }
    /// The request line, or stream channel selection
    pub const fn request(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
    /// Returns the packed value
    pub const fn raw(self) -> u16 {
        self.0
    }
    /// Keep the controller and stream, replace the request.
    pub(crate) const fn with_request(self, request: u8) -> Self {
        DmaCode::new(self.controller(), self.stream(), request)
    }
}

impl Debug for DmaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DMA_CODE({}, {}, {})",
            self.controller(),
            self.stream(),
            self.request()
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DmaCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "DMA_CODE({=u8}, {=u8}, {=u8})",
            self.controller(),
            self.stream(),
            self.request()
        )
    }
}

/// The register block behind a physical DMA channel
///
/// Two resources are equal when they refer to the same registers. Timers
/// that come out of board bring-up with a pre-configured DMA binding carry
/// one of these; that's how their option is recovered.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DmaResource(Kind);

impl DmaResource {
    /// Channel `channel` (1-based) of the controller at `base`.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is zero. In a `const` table, that's a build error.
    pub const fn channel(base: usize, channel: u8) -> Self {
        DmaResource(Kind::Channel(Static::at(dma::channel::address(base, channel))))
    }

    /// Stream `stream` (0-based) of the controller at `base`.
    pub const fn stream(base: usize, stream: u8) -> Self {
        DmaResource(Kind::Stream(Static::at(dma::stream::address(base, stream))))
    }

    /// Returns the address of the register block
    pub fn address(self) -> usize {
        match self.0 {
            Kind::Channel(registers) => registers.address(),
            Kind::Stream(registers) => registers.address(),
        }
    }

    /// Returns the channel registers, if this is a channel.
    ///
    /// # Safety
    ///
    /// The resource must describe real peripheral memory on the running
    /// chip. The built-in tables do, but only on the chip they describe.
    /// Caller must make sure no one else is programming the same channel.
    pub unsafe fn channel_registers(&self) -> Option<&'static ChannelRegisters> {
        match self.0 {
            Kind::Channel(registers) => Some(&*registers.0),
            Kind::Stream(_) => None,
        }
    }

    /// Returns the stream registers, if this is a stream.
    ///
    /// # Safety
    ///
    /// See [`channel_registers`](DmaResource::channel_registers).
    pub unsafe fn stream_registers(&self) -> Option<&'static StreamRegisters> {
        match self.0 {
            Kind::Stream(registers) => Some(&*registers.0),
            Kind::Channel(_) => None,
        }
    }
}

impl Debug for DmaResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Kind::Channel(_) => write!(f, "Channel({:#010X})", self.address()),
            Kind::Stream(_) => write!(f, "Stream({:#010X})", self.address()),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DmaResource {
    fn format(&self, f: defmt::Formatter) {
        match self.0 {
            Kind::Channel(_) => defmt::write!(f, "Channel({=usize:#x})", self.address()),
            Kind::Stream(_) => defmt::write!(f, "Stream({=usize:#x})", self.address()),
        }
    }
}

/// Everything needed to drive one physical DMA channel
///
/// A `ChannelSpec` names a channel, the registers behind it, and the request
/// that the channel should respond to. It's what the resolvers hand back.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSpec {
    code: DmaCode,
    resource: Option<DmaResource>,
    request: u8,
}

impl ChannelSpec {
    /// An option slot with no channel behind it.
    pub const EMPTY: Self = ChannelSpec {
        code: DmaCode::new(0, 0, 0),
        resource: None,
        request: 0,
    };

    /// Describe a channel.
    pub const fn new(code: DmaCode, resource: DmaResource, request: u8) -> Self {
        ChannelSpec {
            code,
            resource: Some(resource),
            request,
        }
    }

    /// Returns the composite channel code
    pub const fn code(&self) -> DmaCode {
        self.code
    }

    /// Returns the registers behind this channel
    ///
    /// `None` only for [`EMPTY`](ChannelSpec::EMPTY) slots; the resolvers
    /// never return those.
    pub const fn resource(&self) -> Option<DmaResource> {
        self.resource
    }

    /// Returns the request setting for this channel
    ///
    /// - multiplexed parts: the request line routed to the channel
    /// - STM32F4/F7: the stream's channel selection (`CHSEL`)
    /// - STM32F3: always zero, since wiring is fixed
    pub const fn request(&self) -> u8 {
        self.request
    }

    /// Returns `true` if there's a channel behind this slot
    pub const fn is_available(&self) -> bool {
        self.resource.is_some()
    }

    /// Bind `request` to this channel.
    ///
    /// Rewrites the request portion of the code; controller and stream stay.
    pub(crate) fn stamp(&mut self, request: RequestId) {
        self.request = request.raw();
        self.code = self.code.with_request(self.request);
        #[cfg(feature = "defmt")]
        defmt::trace!("DMA request {=u8} stamped into {}", self.request, self.code);
    }
}

/// Lay out `specs` in an `N` slot option array, padding with empty slots.
///
/// Fails to evaluate if there are more specs than slots.
pub(crate) const fn options<const M: usize, const N: usize>(
    specs: [ChannelSpec; M],
) -> [ChannelSpec; N] {
    let mut slots = [ChannelSpec::EMPTY; N];
    let mut idx = 0;
    while idx < M {
        slots[idx] = specs[idx];
        idx += 1;
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::{options, ChannelSpec, DmaCode, DmaResource, RequestId};

    #[test]
    #[should_panic(expected = "DMA channels count from 1")]
    fn channel_zero_is_rejected() {
        let channel = 0;
        let _ = DmaResource::channel(0x4002_0000, channel);
    }

    #[test]
    fn code_packing() {
        let code = DmaCode::new(2, 5, 0x2A);
        assert_eq!(code.raw(), 0x252A);
        assert_eq!(code.controller(), 2);
        assert_eq!(code.stream(), 5);
        assert_eq!(code.request(), 0x2A);
    }

    #[test]
    fn code_replaces_request() {
        let code = DmaCode::new(1, 7, 3).with_request(0xFF);
        assert_eq!((code.controller(), code.stream(), code.request()), (1, 7, 0xFF));
    }

    #[test]
    fn resources_compare_by_address() {
        let a = DmaResource::channel(0x4002_0000, 1);
        let b = DmaResource::channel(0x4002_0000, 1);
        let c = DmaResource::channel(0x4002_0000, 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.address(), 0x4002_0008);
        assert_eq!(c.address(), 0x4002_001C);
    }

    #[test]
    fn stream_and_channel_never_alias() {
        // Same address, different register layouts.
        let channel = DmaResource::channel(0x4002_6000, 1);
        let stream = DmaResource::stream(0x4002_5FF8, 0);
        assert_eq!(channel.address(), stream.address());
        assert_ne!(channel, stream);
    }

    #[test]
    fn stamp_keeps_channel_identity() {
        let mut spec = ChannelSpec::new(
            DmaCode::new(2, 3, 0),
            DmaResource::channel(0x4002_6600, 3),
            0,
        );
        spec.stamp(RequestId::new(0x0B));
        assert_eq!(spec.request(), 0x0B);
        assert_eq!(spec.code(), DmaCode::new(2, 3, 0x0B));
        assert_eq!(spec.resource(), Some(DmaResource::channel(0x4002_6600, 3)));
    }

    #[test]
    fn options_pad_with_empty_slots() {
        let spec = ChannelSpec::new(DmaCode::new(1, 0, 4), DmaResource::stream(0x4002_6000, 0), 4);
        let slots: [ChannelSpec; 3] = options([spec]);
        assert_eq!(slots[0], spec);
        assert!(!slots[1].is_available());
        assert!(!slots[2].is_available());
    }
}
