//! A RAL-like module describing DMA channel registers
//!
//! The resolver never touches these registers. It only needs a typed,
//! comparable handle to the register block of each physical channel so that
//! a DMA driver can take over once a channel has been chosen, and so that a
//! timer's statically configured binding can be matched back to an option.

#![allow(
    non_snake_case, // Compatibility with RAL
)]

pub mod dma;

use ral_registers::RWRegister;

//
// Helper types for static memory
//
// Similar to the RAL's `Instance` type, but more copy.
//

pub(crate) struct Static<T>(pub(crate) *const T);
impl<T> Clone for Static<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Static<T> {}

impl<T> PartialEq for Static<T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.0, other.0)
    }
}
impl<T> Eq for Static<T> {}

impl<T> Static<T> {
    /// Wrap a peripheral address.
    ///
    /// Evaluates at compile time, which is how the chip tables use it.
    pub(crate) const fn at(address: usize) -> Self {
        Static(address as *const T)
    }

    pub(crate) fn address(self) -> usize {
        self.0 as usize
    }
}

/// Manages the kind of DMA register block behind a resource.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Channel(Static<dma::channel::RegisterBlock>),
    Stream(Static<dma::stream::RegisterBlock>),
}
